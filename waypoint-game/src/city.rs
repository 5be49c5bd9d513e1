//! City reference data and the catalog that filters it per puzzle date.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::geo::distance_km;

/// A landmark with an optional representative image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Landmark {
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A notable artwork held or made in the city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Climate {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub summer_high_c: Option<f64>,
    #[serde(default)]
    pub winter_low_c: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Geography {
    #[serde(default)]
    pub elevation_m: Option<i32>,
    #[serde(default)]
    pub distance_to_sea_km: Option<u32>,
    /// Compass region of the city within its country, e.g. `north-west`.
    #[serde(default)]
    pub position_in_country: Option<String>,
}

impl Geography {
    #[must_use]
    pub const fn has_any(&self) -> bool {
        self.elevation_m.is_some()
            || self.distance_to_sea_km.is_some()
            || self.position_in_country.is_some()
    }
}

/// Optional enrichment fields of a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CityDetails {
    #[serde(default)]
    pub landmarks: Vec<Landmark>,
    #[serde(default)]
    pub cuisine: Vec<String>,
    #[serde(default)]
    pub art: Vec<Artwork>,
    #[serde(default)]
    pub climate: Option<Climate>,
    #[serde(default)]
    pub geography: Option<Geography>,
}

/// Immutable city record. Identity is the `(name, country)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub founded: Option<i32>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(flatten)]
    pub details: CityDetails,
    /// The city is excluded from puzzles dated before this day.
    #[serde(default)]
    pub hidden_until: Option<NaiveDate>,
}

impl City {
    /// Minimal city used by tests and synthetic pools.
    #[must_use]
    pub fn new(name: &str, country: &str, lat: f64, lng: f64) -> Self {
        Self {
            name: name.to_string(),
            country: country.to_string(),
            lat,
            lng,
            population: None,
            founded: None,
            region: None,
            details: CityDetails::default(),
            hidden_until: None,
        }
    }

    #[must_use]
    pub fn is(&self, name: &str, country: &str) -> bool {
        self.name == name && self.country == country
    }

    #[must_use]
    pub fn same_city(&self, other: &Self) -> bool {
        self.is(&other.name, &other.country)
    }

    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        distance_km(self.lat, self.lng, other.lat, other.lng)
    }

    #[must_use]
    pub fn distance_to_point(&self, lat: f64, lng: f64) -> f64 {
        distance_km(self.lat, self.lng, lat, lng)
    }

    /// Whether the city may appear in a puzzle dated `date`.
    #[must_use]
    pub fn is_visible_on(&self, date: NaiveDate) -> bool {
        self.hidden_until.is_none_or(|unlock| date >= unlock)
    }
}

/// Name + country reference into the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CityRef {
    pub name: String,
    pub country: String,
}

impl CityRef {
    #[must_use]
    pub fn new(name: &str, country: &str) -> Self {
        Self {
            name: name.to_string(),
            country: country.to_string(),
        }
    }

    #[must_use]
    pub fn matches(&self, city: &City) -> bool {
        city.is(&self.name, &self.country)
    }
}

impl From<&City> for CityRef {
    fn from(city: &City) -> Self {
        Self::new(&city.name, &city.country)
    }
}

/// Reference collection of cities, loaded once per session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct CityCatalog {
    cities: Vec<City>,
}

impl CityCatalog {
    #[must_use]
    pub const fn new(cities: Vec<City>) -> Self {
        Self { cities }
    }

    /// Load the catalog from a JSON array of cities.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into city records.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Every city, ignoring unlock dates. Festive routes resolve against this.
    #[must_use]
    pub fn all(&self) -> &[City] {
        &self.cities
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Cities visible for a puzzle dated `date`.
    #[must_use]
    pub fn filter_visible(&self, date: NaiveDate) -> Vec<City> {
        filter_visible(&self.cities, date)
    }

    /// Look up a city in the unfiltered catalog.
    #[must_use]
    pub fn find(&self, name: &str, country: &str) -> Option<&City> {
        self.cities.iter().find(|city| city.is(name, country))
    }
}

/// Drop every city whose unlock date is after `date`.
#[must_use]
pub fn filter_visible(cities: &[City], date: NaiveDate) -> Vec<City> {
    cities
        .iter()
        .filter(|city| city.is_visible_on(date))
        .cloned()
        .collect()
}

/// Nearest city to a point, with its distance in kilometers.
#[must_use]
pub fn nearest_city(cities: &[City], lat: f64, lng: f64) -> Option<(&City, f64)> {
    cities
        .iter()
        .map(|city| (city, city.distance_to_point(lat, lng)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn catalog_parses_optional_enrichment() {
        let json = r#"[
            {
                "name": "Porto",
                "country": "Portugal",
                "lat": 41.1579,
                "lng": -8.6291,
                "population": 231800,
                "region": "Norte",
                "landmarks": [{"name": "Dom Luís I Bridge", "imageUrl": "https://img/porto.jpg"}],
                "geography": {"elevationM": 104, "distanceToSeaKm": 0, "positionInCountry": "north"},
                "hiddenUntil": "2025-03-01"
            },
            {"name": "Braga", "country": "Portugal", "lat": 41.5454, "lng": -8.4265}
        ]"#;
        let catalog = CityCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        let porto = catalog.find("Porto", "Portugal").unwrap();
        assert_eq!(porto.details.landmarks.len(), 1);
        assert_eq!(
            porto.details.geography.as_ref().unwrap().elevation_m,
            Some(104)
        );
        assert_eq!(porto.hidden_until, Some(date(2025, 3, 1)));
        assert!(catalog.find("Porto", "Spain").is_none());
    }

    #[test]
    fn hidden_cities_unlock_on_their_date() {
        let mut hidden = City::new("Hidden", "Nowhere", 0.0, 0.0);
        hidden.hidden_until = Some(date(2025, 6, 10));
        let open = City::new("Open", "Nowhere", 1.0, 1.0);
        let catalog = CityCatalog::new(vec![hidden, open]);

        assert_eq!(catalog.filter_visible(date(2025, 6, 9)).len(), 1);
        assert_eq!(catalog.filter_visible(date(2025, 6, 10)).len(), 2);
        assert_eq!(catalog.all().len(), 2);
    }

    #[test]
    fn identity_is_name_and_country() {
        let a = City::new("Valencia", "Spain", 39.47, -0.38);
        let b = City::new("Valencia", "Venezuela", 10.16, -68.0);
        assert!(!a.same_city(&b));
        assert!(a.same_city(&a.clone()));
    }

    #[test]
    fn nearest_city_prefers_smallest_distance() {
        let cities = vec![
            City::new("A", "X", 0.0, 0.0),
            City::new("B", "X", 0.0, 1.0),
        ];
        let (city, dist) = nearest_city(&cities, 0.0, 0.9).unwrap();
        assert_eq!(city.name, "B");
        assert!(dist < 20.0);
        assert!(nearest_city(&[], 0.0, 0.0).is_none());
    }
}
