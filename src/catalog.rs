use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub participants: Vec<String>,
}

impl Activity {
    /// Capacity minus current head count. Negative only for a malformed response.
    pub fn spots_left(&self) -> i64 {
        i64::from(self.max_participants) - self.participants.len() as i64
    }
}

/// Activities keyed by name, in the order the server listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityCatalog {
    entries: Vec<(String, Activity)>,
}

impl ActivityCatalog {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, a)| a)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Activity)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }

    // A repeated key keeps its first position and takes the latest value.
    fn insert(&mut self, name: String, activity: Activity) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = activity,
            None => self.entries.push((name, activity)),
        }
    }
}

impl FromIterator<(String, Activity)> for ActivityCatalog {
    fn from_iter<I: IntoIterator<Item = (String, Activity)>>(iter: I) -> Self {
        let mut catalog = ActivityCatalog::default();
        for (name, activity) in iter {
            catalog.insert(name, activity);
        }
        catalog
    }
}

impl<'de> Deserialize<'de> for ActivityCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = ActivityCatalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of activity name to activity")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
                let mut catalog = ActivityCatalog::default();
                while let Some((name, activity)) = map.next_entry::<String, Activity>()? {
                    catalog.insert(name, activity);
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// Human label for an email: "jane.doe@x.com" -> "Jane Doe".
pub fn display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    local
        .split(['.', '_'])
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(max: u32, participants: &[&str]) -> Activity {
        Activity {
            description: "d".into(),
            schedule: "s".into(),
            max_participants: max,
            participants: participants.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn spots_left_is_capacity_minus_participants() {
        assert_eq!(activity(12, &["a@x", "b@x"]).spots_left(), 10);
        assert_eq!(activity(2, &["a@x", "b@x"]).spots_left(), 0);
        assert_eq!(activity(0, &[]).spots_left(), 0);
    }

    #[test]
    fn spots_left_is_not_clamped_for_overfull_activity() {
        assert_eq!(activity(1, &["a@x", "b@x"]).spots_left(), -1);
    }

    #[test]
    fn display_names() {
        assert_eq!(display_name("john"), "John");
        assert_eq!(display_name("jane.doe"), "Jane Doe");
        assert_eq!(display_name("a_b.c"), "A B C");
        assert_eq!(display_name("jane.doe@x.com"), "Jane Doe");
        assert_eq!(display_name("michael@mergington.edu"), "Michael");
    }

    #[test]
    fn display_name_only_touches_first_letter() {
        assert_eq!(display_name("mcDonald.o_REILLY@x.com"), "McDonald O REILLY");
        assert_eq!(display_name("élodie@x.com"), "Élodie");
    }

    #[test]
    fn display_name_keeps_empty_words() {
        assert_eq!(display_name("a..b@x.com"), "A  B");
        assert_eq!(display_name("@x.com"), "");
    }

    #[test]
    fn catalog_keeps_response_order() {
        let json = r#"{
            "Programming Class": {"description": "p", "schedule": "Tue", "max_participants": 20, "participants": []},
            "Chess Club": {"description": "c", "schedule": "Fri", "max_participants": 12, "participants": ["michael@mergington.edu"]},
            "Art Studio": {"description": "a", "schedule": "Wed", "max_participants": 15, "participants": []}
        }"#;
        let catalog: ActivityCatalog = serde_json::from_str(json).unwrap();
        let names: Vec<_> = catalog.names().collect();
        assert_eq!(names, ["Programming Class", "Chess Club", "Art Studio"]);
        assert_eq!(catalog.get("Chess Club").unwrap().participants, ["michael@mergington.edu"]);
    }

    #[test]
    fn repeated_key_keeps_first_position_last_value() {
        let json = r#"{
            "A": {"description": "old", "schedule": "s", "max_participants": 1, "participants": []},
            "B": {"description": "b", "schedule": "s", "max_participants": 1, "participants": []},
            "A": {"description": "new", "schedule": "s", "max_participants": 1, "participants": []}
        }"#;
        let catalog: ActivityCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.names().collect::<Vec<_>>(), ["A", "B"]);
        assert_eq!(catalog.get("A").unwrap().description, "new");
    }

    #[test]
    fn missing_field_is_a_decode_error() {
        let json = r#"{"A": {"description": "d", "schedule": "s", "participants": []}}"#;
        assert!(serde_json::from_str::<ActivityCatalog>(json).is_err());
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert!(serde_json::from_str::<ActivityCatalog>("[]").is_err());
    }
}
