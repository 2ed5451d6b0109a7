use std::fmt;

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered category -> items mapping. Entries keep insertion order and
/// serialize as a plain document with the keys in that order, which is
/// also the display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackingContent {
    categories: Vec<(String, Vec<String>)>,
}

impl PackingContent {
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    fn position(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|(name, _)| name == category)
    }

    pub fn items(&self, category: &str) -> Option<&[String]> {
        self.position(category)
            .map(|pos| self.categories[pos].1.as_slice())
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Appends items to a category, creating the category at the end of the
    /// mapping if it does not exist yet.
    pub fn push_items(&mut self, category: &str, items: &[&str]) {
        let added: Vec<String> = items.iter().map(|item| item.to_string()).collect();
        match self.position(category) {
            Some(pos) => self.categories[pos].1.extend(added),
            None => self.categories.push((category.to_string(), added)),
        }
    }

    pub fn add_item(&mut self, category: &str, item: &str) {
        self.push_items(category, &[item]);
    }

    /// Removes the item at `index`. A category emptied by the removal is
    /// deleted, not retained.
    pub fn remove_item(&mut self, category: &str, index: usize) -> bool {
        let pos = match self.position(category) {
            Some(pos) => pos,
            None => return false,
        };
        let items = &mut self.categories[pos].1;
        if index >= items.len() {
            return false;
        }
        items.remove(index);
        if self.categories[pos].1.is_empty() {
            self.categories.remove(pos);
        }
        true
    }

    /// Adds an empty category unless one with the same name exists.
    pub fn add_category(&mut self, name: &str) {
        if self.position(name).is_none() {
            self.categories.push((name.to_string(), Vec::new()));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.categories.iter().map(|(name, items)| (name, items))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Serialize for PackingContent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for (name, items) in &self.categories {
            map.serialize_entry(name, items)?;
        }
        map.end()
    }
}

struct PackingContentVisitor;

impl<'de> Visitor<'de> for PackingContentVisitor {
    type Value = PackingContent;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of category names to item lists")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut categories = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, items)) = access.next_entry::<String, Vec<String>>()? {
            categories.push((name, items));
        }
        Ok(PackingContent { categories })
    }
}

impl<'de> Deserialize<'de> for PackingContent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(PackingContentVisitor)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PackingList {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub trip_id: ObjectId,
    pub content: PackingContent,
    pub generated_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

/// One edit to a stored packing list.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PackingEdit {
    AddItem { category: String, item: String },
    RemoveItem { category: String, index: usize },
    AddCategory { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PackingContent {
        let mut content = PackingContent::new();
        content.push_items("Clothing", &["T-shirts", "Socks"]);
        content.push_items("Documents", &["Passport"]);
        content
    }

    #[test]
    fn test_insertion_order_preserved_in_json() {
        let mut content = sample();
        content.push_items("Adventure Gear", &["Backpack"]);

        let json = serde_json::to_string(&content).unwrap();
        let clothing = json.find("Clothing").unwrap();
        let documents = json.find("Documents").unwrap();
        let gear = json.find("Adventure Gear").unwrap();
        assert!(clothing < documents && documents < gear);

        let parsed: PackingContent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, content);
    }

    #[test]
    fn test_remove_last_item_deletes_category() {
        let mut content = sample();
        assert!(content.remove_item("Documents", 0));
        assert!(content.items("Documents").is_none());
        assert_eq!(content.category_names(), vec!["Clothing"]);
    }

    #[test]
    fn test_remove_item_out_of_range() {
        let mut content = sample();
        assert!(!content.remove_item("Clothing", 5));
        assert!(!content.remove_item("Gadgets", 0));
        assert_eq!(content.items("Clothing").unwrap().len(), 2);
    }

    #[test]
    fn test_added_category_is_retained_while_empty() {
        let mut content = sample();
        content.add_category("Souvenirs");
        assert_eq!(content.items("Souvenirs"), Some(&[][..]));

        // Adding it again must not duplicate the entry.
        content.add_category("Souvenirs");
        assert_eq!(content.len(), 3);
    }

    #[test]
    fn test_add_item_creates_missing_category() {
        let mut content = sample();
        content.add_item("Gadgets", "Drone");
        assert_eq!(content.items("Gadgets").unwrap(), &["Drone".to_string()]);
    }
}
