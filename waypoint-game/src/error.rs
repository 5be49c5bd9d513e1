//! Error taxonomy for puzzle generation.
use chrono::NaiveDate;
use thiserror::Error;

use crate::clue::ClueRole;
use crate::config::ConfigError;

/// Errors raised while loading data or building a puzzle.
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// A festive route names a city absent from the unfiltered catalog.
    #[error("festive route for {date} references unknown city {name} ({country})")]
    FestiveCityMissing {
        date: NaiveDate,
        name: String,
        country: String,
    },
    #[error("city pool exhausted: route needs {needed} cities but only {available} are available")]
    CatalogExhausted { needed: usize, available: usize },
    #[error("stop {stop} could not fill its {role} clue slot with any applicable clue type")]
    IncompleteStop { stop: usize, role: ClueRole },
    #[error("puzzle engine used before initialization")]
    NotInitialized,
    #[error("stop {stop} does not exist in this puzzle")]
    InvalidStop { stop: usize },
    #[error("failed to load puzzle data: {0}")]
    DataLoad(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PuzzleError {
    /// Wrap a loader failure.
    pub fn data_load<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::DataLoad(Box::new(err))
    }

    /// Configuration or data bugs, as opposed to runtime misuse.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::FestiveCityMissing { .. } | Self::CatalogExhausted { .. } | Self::Config(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn festive_error_names_offending_city_and_date() {
        let err = PuzzleError::FestiveCityMissing {
            date: NaiveDate::from_ymd_opt(2025, 12, 24).unwrap(),
            name: "Atlantis".into(),
            country: "Ocean".into(),
        };
        let message = err.to_string();
        assert!(message.contains("2025-12-24"));
        assert!(message.contains("Atlantis (Ocean)"));
        assert!(err.is_configuration());
    }

    #[test]
    fn data_load_keeps_source() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = PuzzleError::data_load(parse);
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_configuration());
    }
}
