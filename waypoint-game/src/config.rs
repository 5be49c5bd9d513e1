//! Data-driven puzzle configuration with validation.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_EASY_OFFSET, DEFAULT_GUESS_RADIUS_KM, DEFAULT_HARD_OFFSET, DEFAULT_MAX_HOP_KM,
    DEFAULT_MEDIUM_OFFSET, DEFAULT_RED_HERRING_FAR_POOL, DEFAULT_RED_HERRING_NEAR_WINDOW,
    ROUTE_LEN,
};
use crate::festive::FestiveEntry;
use crate::route::PortConnection;

/// Seed suffix per difficulty so each difficulty draws an independent stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyOffsets {
    #[serde(default = "DifficultyOffsets::default_easy")]
    pub easy: u32,
    #[serde(default = "DifficultyOffsets::default_medium")]
    pub medium: u32,
    #[serde(default = "DifficultyOffsets::default_hard")]
    pub hard: u32,
}

impl DifficultyOffsets {
    const fn default_easy() -> u32 {
        DEFAULT_EASY_OFFSET
    }

    const fn default_medium() -> u32 {
        DEFAULT_MEDIUM_OFFSET
    }

    const fn default_hard() -> u32 {
        DEFAULT_HARD_OFFSET
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.easy == self.medium || self.medium == self.hard || self.easy == self.hard {
            return Err(ConfigError::DuplicateOffsets {
                easy: self.easy,
                medium: self.medium,
                hard: self.hard,
            });
        }
        Ok(())
    }
}

impl Default for DifficultyOffsets {
    fn default() -> Self {
        Self {
            easy: Self::default_easy(),
            medium: Self::default_medium(),
            hard: Self::default_hard(),
        }
    }
}

/// Top-level puzzle configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    #[serde(default = "PuzzleConfig::default_max_hop_km")]
    pub max_hop_km: f64,
    #[serde(default = "PuzzleConfig::default_guess_radius_km")]
    pub guess_radius_km: f64,
    #[serde(default = "PuzzleConfig::default_red_herring_far_pool")]
    pub red_herring_far_pool: usize,
    #[serde(default = "PuzzleConfig::default_red_herring_near_window")]
    pub red_herring_near_window: usize,
    #[serde(default)]
    pub difficulty_offsets: DifficultyOffsets,
    #[serde(default)]
    pub port_connections: Vec<PortConnection>,
    #[serde(default)]
    pub festive: Vec<FestiveEntry>,
}

impl PuzzleConfig {
    #[must_use]
    pub const fn default_max_hop_km() -> f64 {
        DEFAULT_MAX_HOP_KM
    }

    #[must_use]
    pub const fn default_guess_radius_km() -> f64 {
        DEFAULT_GUESS_RADIUS_KM
    }

    #[must_use]
    pub const fn default_red_herring_far_pool() -> usize {
        DEFAULT_RED_HERRING_FAR_POOL
    }

    #[must_use]
    pub const fn default_red_herring_near_window() -> usize {
        DEFAULT_RED_HERRING_NEAR_WINDOW
    }

    /// Load configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when any field violates the documented bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("max_hop_km", self.max_hop_km, 50.0, 5_000.0)?;
        check_range("guess_radius_km", self.guess_radius_km, 1.0, 500.0)?;
        if self.red_herring_far_pool == 0 {
            return Err(ConfigError::MinViolation {
                field: "red_herring_far_pool",
                min: 1.0,
                value: 0.0,
            });
        }
        if self.red_herring_near_window == 0 {
            return Err(ConfigError::MinViolation {
                field: "red_herring_near_window",
                min: 1.0,
                value: 0.0,
            });
        }
        self.difficulty_offsets.validate()?;
        for port in &self.port_connections {
            if !(port.max_distance.is_finite() && port.max_distance > 0.0) {
                return Err(ConfigError::MinViolation {
                    field: "port_connections.max_distance",
                    min: 0.0,
                    value: port.max_distance,
                });
            }
        }
        if let Some(entry) = self
            .festive
            .iter()
            .find(|entry| entry.route.as_ref().is_some_and(|r| r.len() != ROUTE_LEN))
        {
            return Err(ConfigError::FestiveRouteLength {
                date: entry.date.to_string(),
                len: entry.route.as_ref().map_or(0, Vec::len),
            });
        }
        for entry in &self.festive {
            validate_fixed_route(entry)?;
        }
        let mut dates: Vec<_> = self.festive.iter().map(|entry| entry.date).collect();
        dates.sort_unstable();
        if let Some(pair) = dates.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(ConfigError::DuplicateFestiveDate {
                date: pair[0].to_string(),
            });
        }
        Ok(())
    }
}

fn validate_fixed_route(entry: &FestiveEntry) -> Result<(), ConfigError> {
    let Some(route) = &entry.route else {
        return Ok(());
    };
    for (i, city) in route.iter().enumerate() {
        if route[i + 1..].contains(city) {
            return Err(ConfigError::FestiveRouteRepeats {
                date: entry.date.to_string(),
                name: city.name.clone(),
            });
        }
    }
    if route.last() != Some(&entry.final_city) {
        return Err(ConfigError::FestiveFinalMismatch {
            date: entry.date.to_string(),
            expected: entry.final_city.name.clone(),
            found: route.last().map(|city| city.name.clone()).unwrap_or_default(),
        });
    }
    Ok(())
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if !(min..=max).contains(&value) {
        return Err(ConfigError::RangeViolation {
            field,
            min,
            max,
            value,
        });
    }
    Ok(())
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            max_hop_km: Self::default_max_hop_km(),
            guess_radius_km: Self::default_guess_radius_km(),
            red_herring_far_pool: Self::default_red_herring_far_pool(),
            red_herring_near_window: Self::default_red_herring_near_window(),
            difficulty_offsets: DifficultyOffsets::default(),
            port_connections: Vec::new(),
            festive: Vec::new(),
        }
    }
}

/// Errors raised when configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be at least {min:.2} (got {value:.2})")]
    MinViolation {
        field: &'static str,
        min: f64,
        value: f64,
    },
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("difficulty offsets must be distinct (easy {easy}, medium {medium}, hard {hard})")]
    DuplicateOffsets { easy: u32, medium: u32, hard: u32 },
    #[error("festive calendar lists {date} more than once")]
    DuplicateFestiveDate { date: String },
    #[error("fixed festive route for {date} has {len} cities, expected 5")]
    FestiveRouteLength { date: String, len: usize },
    #[error("fixed festive route for {date} visits {name} more than once")]
    FestiveRouteRepeats { date: String, name: String },
    #[error("fixed festive route for {date} ends at {found}, but its final city is {expected}")]
    FestiveFinalMismatch {
        date: String,
        expected: String,
        found: String,
    },
}
