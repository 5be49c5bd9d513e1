//! Waypoint Puzzle Engine
//!
//! Platform-agnostic core of the Waypoint daily geography puzzle. Builds a
//! seeded five-city route, deals typed clues for every stop, checks guesses
//! and scores the run. No UI or platform-specific dependencies.

pub mod city;
pub mod clue;
pub mod clues;
pub mod config;
pub mod constants;
pub mod content;
pub mod data;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod festive;
pub mod geo;
pub mod images;
pub mod numbers;
pub mod puzzle;
pub mod route;
pub mod score;
pub mod seed;

// Re-export commonly used types
pub use city::{City, CityCatalog, CityRef, nearest_city};
pub use clue::{Clue, ClueBody, ClueContext, ClueKind, ClueRole, Difficulty};
pub use clues::{ClueGenerator, ClueRegistry};
pub use config::{ConfigError, DifficultyOffsets, PuzzleConfig};
pub use content::ClueContent;
pub use data::{DataError, DirDataLoader, StaticDataLoader};
pub use distribution::{ClueDistributor, DistributionContext, roles_for};
pub use engine::{EnginePhase, PuzzleEngine, PuzzleRequest};
pub use error::PuzzleError;
pub use festive::{FestiveEntry, FestivePlan};
pub use images::{CatalogImages, ImageSource, ImageSubject, NoImages};
pub use puzzle::{GuessOutcome, GuessPosition, Location, Puzzle};
pub use route::{PortConnection, RouteSelector};
pub use score::ScoreBreakdown;
pub use seed::{PuzzleRng, date_seed, full_seed};

/// Trait for abstracting data loading operations
/// Platform-specific implementations should provide this
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the full city catalog, including cities not yet unlocked.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or parsed.
    fn load_cities(&self) -> Result<CityCatalog, Self::Error>;

    /// Load curated clue content.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be loaded or parsed.
    fn load_content(&self) -> Result<ClueContent, Self::Error>;

    /// Load puzzle configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_config(&self) -> Result<PuzzleConfig, Self::Error>;
}
