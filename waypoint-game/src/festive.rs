//! Festive calendar: date-triggered puzzles with curated itineraries.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::city::{City, CityCatalog, CityRef};
use crate::error::PuzzleError;

/// One festive date. Either a full route is fixed, or the final city (and
/// optionally the start) anchors an otherwise generated route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FestiveEntry {
    pub date: NaiveDate,
    pub final_city: CityRef,
    #[serde(default)]
    pub start_city: Option<CityRef>,
    #[serde(default)]
    pub route: Option<Vec<CityRef>>,
}

/// Festive entry resolved against the unfiltered catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum FestivePlan {
    /// Curator-fixed ordered route used verbatim.
    Fixed(Vec<City>),
    /// Generated route pinned to a final city and optional start.
    Anchored {
        start: Option<City>,
        final_city: City,
    },
}

/// Festive entry for `date`, if any.
#[must_use]
pub fn entry_for(entries: &[FestiveEntry], date: NaiveDate) -> Option<&FestiveEntry> {
    entries.iter().find(|entry| entry.date == date)
}

fn resolve_ref(
    catalog: &CityCatalog,
    date: NaiveDate,
    city: &CityRef,
) -> Result<City, PuzzleError> {
    catalog
        .find(&city.name, &city.country)
        .cloned()
        .ok_or_else(|| PuzzleError::FestiveCityMissing {
            date,
            name: city.name.clone(),
            country: city.country.clone(),
        })
}

impl FestiveEntry {
    /// Resolve every referenced city, failing on the first unknown one.
    ///
    /// Festive routes may use cities before their normal unlock date, so the
    /// lookup ignores `hidden_until`.
    ///
    /// # Errors
    ///
    /// Returns `PuzzleError::FestiveCityMissing` naming the offending city.
    pub fn resolve(&self, catalog: &CityCatalog) -> Result<FestivePlan, PuzzleError> {
        if let Some(route) = &self.route {
            let cities = route
                .iter()
                .map(|city| resolve_ref(catalog, self.date, city))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(FestivePlan::Fixed(cities));
        }
        let final_city = resolve_ref(catalog, self.date, &self.final_city)?;
        let start = self
            .start_city
            .as_ref()
            .map(|city| resolve_ref(catalog, self.date, city))
            .transpose()?;
        Ok(FestivePlan::Anchored { start, final_city })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CityCatalog {
        let mut hidden = City::new("Rovaniemi", "Finland", 66.5, 25.73);
        hidden.hidden_until = NaiveDate::from_ymd_opt(2030, 1, 1);
        CityCatalog::new(vec![
            City::new("Helsinki", "Finland", 60.17, 24.94),
            City::new("Oulu", "Finland", 65.01, 25.47),
            hidden,
        ])
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 25).unwrap()
    }

    #[test]
    fn anchored_entry_resolves_hidden_final_city() {
        let entry = FestiveEntry {
            date: date(),
            final_city: CityRef::new("Rovaniemi", "Finland"),
            start_city: Some(CityRef::new("Helsinki", "Finland")),
            route: None,
        };
        let FestivePlan::Anchored { start, final_city } = entry.resolve(&catalog()).unwrap()
        else {
            panic!("expected anchored plan");
        };
        assert_eq!(final_city.name, "Rovaniemi");
        assert_eq!(start.unwrap().name, "Helsinki");
    }

    #[test]
    fn fixed_route_keeps_order() {
        let entry = FestiveEntry {
            date: date(),
            final_city: CityRef::new("Rovaniemi", "Finland"),
            start_city: None,
            route: Some(vec![
                CityRef::new("Helsinki", "Finland"),
                CityRef::new("Oulu", "Finland"),
                CityRef::new("Rovaniemi", "Finland"),
            ]),
        };
        let FestivePlan::Fixed(route) = entry.resolve(&catalog()).unwrap() else {
            panic!("expected fixed plan");
        };
        let names: Vec<_> = route.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Helsinki", "Oulu", "Rovaniemi"]);
    }

    #[test]
    fn unknown_city_is_fatal() {
        let entry = FestiveEntry {
            date: date(),
            final_city: CityRef::new("Korvatunturi", "Finland"),
            start_city: None,
            route: None,
        };
        let err = entry.resolve(&catalog()).unwrap_err();
        assert!(matches!(
            err,
            PuzzleError::FestiveCityMissing { ref name, .. } if name == "Korvatunturi"
        ));
    }

    #[test]
    fn entry_lookup_by_date() {
        let entry = FestiveEntry {
            date: date(),
            final_city: CityRef::new("Oulu", "Finland"),
            start_city: None,
            route: None,
        };
        let entries = vec![entry];
        assert!(entry_for(&entries, date()).is_some());
        assert!(entry_for(&entries, date().succ_opt().unwrap()).is_none());
    }
}
