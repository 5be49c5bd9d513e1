//! Curated clue content: emoji pools, flags, greetings, facts and image indices.
//!
//! Loaded once per session and passed by reference into every clue context.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::city::{City, CityRef};
use crate::clue::Difficulty;

/// Greeting phrases for a country, tagged with the difficulty they suit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetingSet {
    pub difficulty: Difficulty,
    pub hello: String,
    pub welcome: String,
    pub thanks: String,
}

impl GreetingSet {
    /// Easy puzzles take easy phrases, medium take easy or medium, hard take medium or hard.
    #[must_use]
    pub fn suits(&self, puzzle: Difficulty) -> bool {
        matches!(
            (puzzle.for_generation(), self.difficulty.for_generation()),
            (Difficulty::Easy, Difficulty::Easy)
                | (Difficulty::Medium, Difficulty::Easy | Difficulty::Medium)
                | (Difficulty::Hard, Difficulty::Medium | Difficulty::Hard)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CountryContent {
    #[serde(default)]
    pub emoji: Vec<String>,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub greeting: Option<GreetingSet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RegionContent {
    #[serde(default)]
    pub flag: Option<String>,
}

/// Per-city curated content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityContent {
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub emoji: Vec<String>,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub weird_facts: Vec<String>,
    #[serde(default)]
    pub family: Vec<String>,
    #[serde(default)]
    pub festive_facts: Vec<String>,
    #[serde(default)]
    pub festive_images: Vec<String>,
    /// Family image indices keyed by bucket (`easy`, `medium`, `hard`, `xmas`).
    #[serde(default)]
    pub family_images: BTreeMap<String, Vec<u32>>,
}

/// All curated content, replacing any process-wide lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClueContent {
    #[serde(default)]
    pub countries: BTreeMap<String, CountryContent>,
    #[serde(default)]
    pub regions: BTreeMap<String, RegionContent>,
    #[serde(default)]
    pub cities: Vec<CityContent>,
    /// Recurring city whose festive family image follows the calendar.
    #[serde(default)]
    pub family_home: Option<CityRef>,
    /// Root used when building family image paths.
    #[serde(default)]
    pub family_image_root: String,
}

impl ClueContent {
    /// Load curated content from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into content tables.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn country(&self, country: &str) -> Option<&CountryContent> {
        self.countries.get(country)
    }

    #[must_use]
    pub fn city(&self, city: &City) -> Option<&CityContent> {
        self.cities
            .iter()
            .find(|entry| city.is(&entry.name, &entry.country))
    }

    #[must_use]
    pub fn region_flag(&self, region: &str) -> Option<&str> {
        self.regions.get(region)?.flag.as_deref()
    }

    #[must_use]
    pub fn is_family_home(&self, city: &City) -> bool {
        self.family_home
            .as_ref()
            .is_some_and(|home| home.matches(city))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greeting(difficulty: Difficulty) -> GreetingSet {
        GreetingSet {
            difficulty,
            hello: "Hei".into(),
            welcome: "Tervetuloa".into(),
            thanks: "Kiitos".into(),
        }
    }

    #[test]
    fn greeting_buckets_follow_difficulty() {
        assert!(greeting(Difficulty::Easy).suits(Difficulty::Easy));
        assert!(!greeting(Difficulty::Medium).suits(Difficulty::Easy));
        assert!(greeting(Difficulty::Easy).suits(Difficulty::Medium));
        assert!(greeting(Difficulty::Medium).suits(Difficulty::Medium));
        assert!(!greeting(Difficulty::Hard).suits(Difficulty::Medium));
        assert!(!greeting(Difficulty::Easy).suits(Difficulty::Hard));
        assert!(greeting(Difficulty::Hard).suits(Difficulty::Festive));
    }

    #[test]
    fn content_lookups_use_name_and_country() {
        let json = r#"{
            "countries": {"Finland": {"emoji": ["🧖"], "flag": "🇫🇮", "population": 5600000}},
            "regions": {"Uusimaa": {"flag": "flags/regions/uusimaa.svg"}},
            "cities": [{"name": "Helsinki", "country": "Finland", "weirdFacts": ["a", "b"],
                        "familyImages": {"easy": [1, 2]}}],
            "familyHome": {"name": "Helsinki", "country": "Finland"}
        }"#;
        let content = ClueContent::from_json(json).unwrap();
        let helsinki = City::new("Helsinki", "Finland", 60.17, 24.94);
        let impostor = City::new("Helsinki", "Sweden", 60.17, 24.94);

        assert_eq!(content.city(&helsinki).unwrap().weird_facts.len(), 2);
        assert!(content.city(&impostor).is_none());
        assert!(content.is_family_home(&helsinki));
        assert_eq!(
            content.region_flag("Uusimaa"),
            Some("flags/regions/uusimaa.svg")
        );
        assert_eq!(content.country("Finland").unwrap().population, Some(5_600_000));
    }
}
