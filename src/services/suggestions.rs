//! Activity suggestion generator.
//!
//! Candidate places from the lookup collaborator are scored against the
//! requested interest tags with per-tag keyword lists, categorized, then
//! assigned time slots from fixed pace tables. Every failure path degrades
//! to a smaller or empty result; generation never blocks the itinerary
//! flow.

use chrono::{Duration, NaiveTime};

use crate::models::suggestion::{ActivitySuggestion, CandidatePlace, GenerateActivitiesRequest};
use crate::services::place_lookup::{truncate_chars, PlaceLookupService, PlaceSource};

const DINING_DURATION_MINUTES: u32 = 90;
const DEFAULT_DURATION_MINUTES: u32 = 120;
const FALLBACK_SLOT: &str = "09:00";
const DEFAULT_CATEGORY: &str = "Sightseeing";
const NEARBY_NOTE_MAX_CHARS: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    Relaxed,
    Balanced,
    Busy,
}

impl Pace {
    /// Unrecognized values fall back to the balanced tables; a malformed
    /// pace never rejects the request.
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "relaxed" => Pace::Relaxed,
            "busy" => Pace::Busy,
            _ => Pace::Balanced,
        }
    }

    pub fn max_activities(&self) -> usize {
        match self {
            Pace::Relaxed => 3,
            Pace::Balanced => 4,
            Pace::Busy => 6,
        }
    }

    pub fn time_slots(&self) -> &'static [&'static str] {
        match self {
            Pace::Relaxed => &["09:00", "13:00", "18:00"],
            Pace::Balanced => &["09:00", "11:30", "14:00", "18:00"],
            Pace::Busy => &["08:00", "10:00", "12:00", "14:30", "17:00", "19:30"],
        }
    }
}

fn interest_keywords(interest: &str) -> &'static [&'static str] {
    match interest {
        "food" => &[
            "restaurant", "cafe", "market", "food", "cuisine", "dining", "bakery", "bistro",
            "eatery",
        ],
        "culture" => &[
            "museum", "gallery", "theater", "theatre", "cathedral", "church", "temple", "palace",
            "castle", "historic", "monument", "art", "opera", "concert",
        ],
        "nature" => &[
            "park", "garden", "beach", "mountain", "lake", "river", "forest", "nature",
            "botanical", "zoo", "aquarium",
        ],
        "adventure" => &[
            "adventure", "sport", "climbing", "hiking", "diving", "skiing", "kayak", "rafting",
        ],
        "shopping" => &["market", "shopping", "mall", "bazaar", "store", "boutique", "shop"],
        "nightlife" => &["bar", "club", "nightlife", "entertainment", "pub", "disco"],
        _ => &[],
    }
}

// Interest tag -> assigned category. Adventure scores but keeps whatever
// category is already assigned.
fn interest_category(interest: &str) -> Option<&'static str> {
    match interest {
        "food" => Some("Dining"),
        "culture" => Some("Sightseeing"),
        "nature" => Some("Activity"),
        "shopping" => Some("Shopping"),
        "nightlife" => Some("Entertainment"),
        _ => None,
    }
}

/// Score each candidate against the requested interests and keep the ones
/// with at least one keyword hit. With no interests requested, every
/// candidate passes through with the default category.
pub fn categorize_places(
    places: &[CandidatePlace],
    interests: &[String],
) -> Vec<ActivitySuggestion> {
    let mut suggestions = Vec::new();

    for place in places {
        let title_lower = place.title.to_lowercase();
        let desc_lower = place.description.to_lowercase();
        let mut category = DEFAULT_CATEGORY;
        let mut match_score = 0u32;

        for interest in interests {
            let mut hits = 0u32;
            for keyword in interest_keywords(interest) {
                if title_lower.contains(keyword) || desc_lower.contains(keyword) {
                    hits += 1;
                }
            }
            if hits > 0 {
                match_score += hits;
                if let Some(mapped) = interest_category(interest) {
                    category = mapped;
                }
            }
        }

        if match_score > 0 || interests.is_empty() {
            suggestions.push(place_suggestion(place, category));
        }
    }

    suggestions
}

fn place_suggestion(place: &CandidatePlace, category: &str) -> ActivitySuggestion {
    ActivitySuggestion {
        title: format!("Visit {}", place.title),
        category: category.to_string(),
        notes: place.description.clone(),
        start_time: None,
        end_time: None,
        duration_minutes: None,
        location: Some(place.title.clone()),
        location_lat: place.coordinates.map(|coords| coords.lat),
        location_lon: place.coordinates.map(|coords| coords.lon),
    }
}

/// Assign start time, end time and duration to the first
/// min(pace maximum, candidate count) suggestions. Slot i goes to
/// candidate i; a candidate past the slot table reuses "09:00".
pub fn schedule_suggestions(
    categorized: Vec<ActivitySuggestion>,
    pace: Pace,
) -> Vec<ActivitySuggestion> {
    let slots = pace.time_slots();
    let count = pace.max_activities().min(categorized.len());

    let mut scheduled = Vec::with_capacity(count);
    for (index, mut suggestion) in categorized.into_iter().take(count).enumerate() {
        let start = slots.get(index).copied().unwrap_or(FALLBACK_SLOT);
        let duration = if suggestion.category == "Dining" {
            DINING_DURATION_MINUTES
        } else {
            DEFAULT_DURATION_MINUTES
        };

        suggestion.start_time = Some(start.to_string());
        suggestion.end_time = Some(add_minutes(start, duration as i64));
        suggestion.duration_minutes = Some(duration);
        scheduled.push(suggestion);
    }

    scheduled
}

/// Minute-precision clock addition. Results crossing midnight wrap to
/// 00:00+ with no date rollover.
pub fn add_minutes(time: &str, minutes: i64) -> String {
    match NaiveTime::parse_from_str(time, "%H:%M") {
        Ok(start) => (start + Duration::minutes(minutes))
            .format("%H:%M")
            .to_string(),
        Err(_) => time.to_string(),
    }
}

pub struct SuggestionGenerator<S = PlaceLookupService> {
    lookup: Option<S>,
}

impl SuggestionGenerator<PlaceLookupService> {
    pub fn new() -> Self {
        // The generator still answers without a lookup client; it just has
        // no candidates to offer.
        let lookup = match PlaceLookupService::new() {
            Ok(service) => Some(service),
            Err(err) => {
                eprintln!("Place lookup not available: {}", err);
                None
            }
        };

        Self { lookup }
    }
}

impl Default for SuggestionGenerator<PlaceLookupService> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PlaceSource> SuggestionGenerator<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            lookup: Some(source),
        }
    }

    /// Full generation pipeline: lookup, categorize, schedule. Always
    /// resolves to a (possibly empty) list, never an error.
    pub async fn generate_activities(
        &self,
        request: &GenerateActivitiesRequest,
    ) -> Vec<ActivitySuggestion> {
        let places = match &self.lookup {
            Some(lookup) => {
                lookup
                    .lookup_places(&request.destination, request.starting_coords)
                    .await
            }
            None => Vec::new(),
        };

        build_suggestions(&places, request)
    }
}

/// Pure tail of the pipeline, separated from the network fetch.
pub fn build_suggestions(
    places: &[CandidatePlace],
    request: &GenerateActivitiesRequest,
) -> Vec<ActivitySuggestion> {
    if places.is_empty() {
        return Vec::new();
    }

    let pace = Pace::parse(&request.pace);
    let categorized = categorize_places(places, &request.interests);

    // Categorization filtered everything: surface the first few raw
    // candidates rather than an empty itinerary.
    if categorized.is_empty() {
        return places
            .iter()
            .take(pace.max_activities())
            .map(|place| place_suggestion(place, DEFAULT_CATEGORY))
            .collect();
    }

    let mut suggestions = schedule_suggestions(categorized, pace);

    if let (Some(location), Some(_)) = (&request.starting_location, request.starting_coords) {
        let note = format!(" Near {}.", location);
        for suggestion in &mut suggestions {
            if !suggestion.notes.is_empty() {
                suggestion.notes = format!(
                    "{}{}",
                    truncate_chars(&suggestion.notes, NEARBY_NOTE_MAX_CHARS),
                    note
                );
            }
        }
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::suggestion::Coordinates;

    fn place(title: &str, description: &str) -> CandidatePlace {
        CandidatePlace {
            title: title.to_string(),
            description: description.to_string(),
            coordinates: Some(Coordinates {
                lat: 38.7223,
                lon: -9.1393,
            }),
        }
    }

    fn request(interests: &[&str], pace: &str) -> GenerateActivitiesRequest {
        GenerateActivitiesRequest {
            destination: "Lisbon".to_string(),
            trip_type: "Leisure".to_string(),
            interests: interests.iter().map(|tag| tag.to_string()).collect(),
            pace: pace.to_string(),
            day_index: None,
            total_days: 5,
            starting_location: None,
            starting_coords: None,
        }
    }

    struct StubSource {
        places: Vec<CandidatePlace>,
    }

    impl PlaceSource for StubSource {
        async fn lookup_places(
            &self,
            _destination: &str,
            _starting_coords: Option<Coordinates>,
        ) -> Vec<CandidatePlace> {
            self.places.clone()
        }
    }

    #[test]
    fn test_food_keyword_maps_to_dining_with_90_minutes() {
        let places = vec![place("Mercado da Ribeira", "a riverside food market")];
        let suggestions = build_suggestions(&places, &request(&["food"], "balanced"));

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].category, "Dining");
        assert_eq!(suggestions[0].duration_minutes, Some(90));
        assert_eq!(suggestions[0].start_time.as_deref(), Some("09:00"));
        assert_eq!(suggestions[0].end_time.as_deref(), Some("10:30"));
    }

    #[test]
    fn test_non_dining_duration_is_120() {
        let places = vec![place("Gulbenkian Museum", "an art museum with gardens")];
        let suggestions = build_suggestions(&places, &request(&["culture"], "balanced"));

        assert_eq!(suggestions[0].category, "Sightseeing");
        assert_eq!(suggestions[0].duration_minutes, Some(120));
    }

    #[test]
    fn test_pace_bounds_suggestion_count() {
        let places: Vec<CandidatePlace> = (0..10)
            .map(|index| place(&format!("Spot {}", index), "a quiet viewpoint"))
            .collect();

        for (pace, expected) in [("relaxed", 3), ("balanced", 4), ("busy", 6)] {
            let suggestions = build_suggestions(&places, &request(&[], pace));
            assert_eq!(suggestions.len(), expected, "pace {}", pace);
        }

        // Never more than the categorized candidates either.
        let two = vec![place("A", "spot"), place("B", "spot")];
        assert_eq!(build_suggestions(&two, &request(&[], "busy")).len(), 2);
    }

    #[test]
    fn test_slots_follow_pace_table() {
        let places: Vec<CandidatePlace> = (0..4)
            .map(|index| place(&format!("Spot {}", index), "a viewpoint"))
            .collect();
        let suggestions = build_suggestions(&places, &request(&[], "balanced"));

        let starts: Vec<&str> = suggestions
            .iter()
            .filter_map(|s| s.start_time.as_deref())
            .collect();
        assert_eq!(starts, vec!["09:00", "11:30", "14:00", "18:00"]);
    }

    #[test]
    fn test_add_minutes() {
        assert_eq!(add_minutes("09:00", 120), "11:00");
        assert_eq!(add_minutes("10:15", 90), "11:45");
    }

    #[test]
    fn test_add_minutes_wraps_past_midnight() {
        assert_eq!(add_minutes("23:00", 120), "01:00");
        assert_eq!(add_minutes("23:30", 30), "00:00");
    }

    #[test]
    fn test_empty_interests_pass_everything_through() {
        let places = vec![place("Rua Augusta Arch", "a triumphal arch downtown")];
        let categorized = categorize_places(&places, &[]);

        assert_eq!(categorized.len(), 1);
        assert_eq!(categorized[0].category, "Sightseeing");
        assert_eq!(categorized[0].title, "Visit Rua Augusta Arch");
    }

    #[test]
    fn test_last_matching_interest_assigns_category() {
        let places = vec![place("Market Bar", "a market hall turned cocktail bar")];
        let suggestions =
            categorize_places(&places, &["food".to_string(), "nightlife".to_string()]);

        assert_eq!(suggestions[0].category, "Entertainment");
    }

    #[test]
    fn test_no_match_falls_back_to_raw_candidates() {
        let places = vec![
            place("Ponte 25 de Abril", "a suspension bridge over the Tagus"),
            place("Cristo Rei", "a towering statue across the river"),
        ];
        let suggestions = build_suggestions(&places, &request(&["food"], "relaxed"));

        assert_eq!(suggestions.len(), 2);
        for suggestion in &suggestions {
            assert_eq!(suggestion.category, "Sightseeing");
            assert!(suggestion.start_time.is_none());
            assert!(suggestion.duration_minutes.is_none());
        }
    }

    #[test]
    fn test_no_candidates_yields_empty() {
        assert!(build_suggestions(&[], &request(&["food"], "balanced")).is_empty());
    }

    #[test]
    fn test_unknown_pace_uses_balanced_tables() {
        let places: Vec<CandidatePlace> = (0..6)
            .map(|index| place(&format!("Spot {}", index), "a viewpoint"))
            .collect();
        let suggestions = build_suggestions(&places, &request(&[], "frantic"));

        assert_eq!(suggestions.len(), 4);
        assert_eq!(suggestions[0].start_time.as_deref(), Some("09:00"));
    }

    #[test]
    fn test_starting_location_appends_nearby_note() {
        let long_description = "b".repeat(200);
        let places = vec![place("Sé de Lisboa", &long_description)];

        let mut req = request(&[], "relaxed");
        req.starting_location = Some("Hotel Mundial".to_string());
        req.starting_coords = Some(Coordinates {
            lat: 38.7139,
            lon: -9.1335,
        });

        let suggestions = build_suggestions(&places, &req);
        let notes = &suggestions[0].notes;
        assert!(notes.ends_with(" Near Hotel Mundial."));
        assert_eq!(notes.len(), 150 + " Near Hotel Mundial.".len());
    }

    #[actix_rt::test]
    async fn test_failed_lookup_resolves_to_empty() {
        let generator = SuggestionGenerator::with_source(StubSource { places: Vec::new() });
        let suggestions = generator
            .generate_activities(&request(&["food"], "balanced"))
            .await;
        assert!(suggestions.is_empty());
    }

    #[actix_rt::test]
    async fn test_generation_uses_lookup_candidates() {
        let generator = SuggestionGenerator::with_source(StubSource {
            places: vec![place("Time Out Market", "a food market with stalls")],
        });
        let suggestions = generator
            .generate_activities(&request(&["food"], "busy"))
            .await;

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].category, "Dining");
        assert_eq!(suggestions[0].location.as_deref(), Some("Time Out Market"));
    }
}
