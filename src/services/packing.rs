use crate::models::packing::PackingContent;
use crate::models::suggestion::GeneratePackingListRequest;

const BASE_CLOTHING: &[&str] = &[
    "T-shirts",
    "Pants/Jeans",
    "Underwear",
    "Socks",
    "Comfortable shoes",
    "Jacket or sweater",
];

const ELECTRONICS: &[&str] = &[
    "Phone charger",
    "Power adapter",
    "Camera",
    "Portable battery",
];

const TOILETRIES: &[&str] = &[
    "Toothbrush and toothpaste",
    "Shampoo and soap",
    "Sunscreen",
    "Medications",
    "First aid kit",
];

const DOCUMENTS: &[&str] = &[
    "Passport",
    "Travel insurance",
    "Hotel confirmations",
    "Emergency contacts",
    "Credit cards and cash",
];

pub struct PackingListService;

impl PackingListService {
    /// Derive a categorized packing list from trip type, destination and
    /// duration. Pure and deterministic; categories appear in insertion
    /// order: the four base categories, then any conditional ones in
    /// evaluation order.
    pub fn generate(request: &GeneratePackingListRequest) -> PackingContent {
        let mut content = PackingContent::new();
        content.push_items("Clothing", BASE_CLOTHING);
        content.push_items("Electronics", ELECTRONICS);
        content.push_items("Toiletries", TOILETRIES);
        content.push_items("Documents", DOCUMENTS);

        if request.trip_type == "Adventure" {
            content.push_items("Clothing", &["Hiking boots", "Athletic wear", "Rain jacket"]);
            content.push_items("Adventure Gear", &["Backpack", "Water bottle", "Sunglasses"]);
        }

        if request.trip_type == "Business" {
            content.push_items(
                "Clothing",
                &["Dress shirt", "Dress pants", "Tie", "Formal shoes"],
            );
            content.push_items("Business Items", &["Laptop", "Business cards", "Portfolio"]);
        }

        if request.destination.to_lowercase().contains("beach") || request.trip_type == "Leisure" {
            content.push_items("Clothing", &["Swimsuit", "Sandals", "Sun hat"]);
        }

        if request.duration_days > 5 {
            content.push_items(
                "Miscellaneous",
                &["Laundry detergent", "Extra bags for souvenirs"],
            );
        }

        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request(destination: &str, trip_type: &str, duration_days: u32) -> GeneratePackingListRequest {
        GeneratePackingListRequest {
            destination: destination.to_string(),
            trip_type: trip_type.to_string(),
            duration_days,
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 7).unwrap(),
        }
    }

    #[test]
    fn test_adventure_week_in_denver() {
        let content = PackingListService::generate(&request("Denver", "Adventure", 7));

        assert_eq!(
            content.category_names(),
            vec![
                "Clothing",
                "Electronics",
                "Toiletries",
                "Documents",
                "Adventure Gear",
                "Miscellaneous",
            ]
        );

        let clothing = content.items("Clothing").unwrap();
        assert_eq!(clothing.len(), BASE_CLOTHING.len() + 3);
        assert!(clothing.contains(&"Hiking boots".to_string()));
        // No beach items: destination has no "beach" and type is not Leisure.
        assert!(!clothing.contains(&"Swimsuit".to_string()));

        assert_eq!(content.items("Adventure Gear").unwrap().len(), 3);
        assert_eq!(content.items("Miscellaneous").unwrap().len(), 2);
    }

    #[test]
    fn test_business_trip_adds_business_items() {
        let content = PackingListService::generate(&request("Chicago", "Business", 3));

        let clothing = content.items("Clothing").unwrap();
        assert_eq!(clothing.len(), BASE_CLOTHING.len() + 4);
        assert!(clothing.contains(&"Tie".to_string()));
        assert_eq!(content.items("Business Items").unwrap().len(), 3);
        assert!(content.items("Miscellaneous").is_none());
    }

    #[test]
    fn test_beach_destination_adds_swimwear() {
        let content = PackingListService::generate(&request("Myrtle Beach", "Adventure", 4));
        let clothing = content.items("Clothing").unwrap();
        assert!(clothing.contains(&"Swimsuit".to_string()));
        assert!(clothing.contains(&"Sun hat".to_string()));
    }

    #[test]
    fn test_leisure_trip_adds_swimwear_anywhere() {
        let content = PackingListService::generate(&request("Prague", "Leisure", 4));
        assert!(content
            .items("Clothing")
            .unwrap()
            .contains(&"Sandals".to_string()));
    }

    #[test]
    fn test_generation_is_idempotent() {
        let req = request("Denver", "Adventure", 7);
        assert_eq!(
            PackingListService::generate(&req),
            PackingListService::generate(&req)
        );
    }

    #[test]
    fn test_short_trip_has_no_miscellaneous() {
        let content = PackingListService::generate(&request("Oslo", "Cultural", 5));
        assert!(content.items("Miscellaneous").is_none());
        assert_eq!(content.len(), 4);
    }
}
