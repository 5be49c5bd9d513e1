//! Centralized tuning constants for Waypoint puzzle generation.
//!
//! Values that shape the deterministic puzzle math live here so they can only
//! change through reviewed code. Data-driven knobs (hop distance, guess radius,
//! festive calendar) belong to [`crate::config::PuzzleConfig`] instead.

// Route shape --------------------------------------------------------------
pub const ROUTE_LEN: usize = 5;
pub const FINAL_STOP: usize = ROUTE_LEN - 1;
pub const RED_HERRING_STOP_COUNT: usize = 2;
/// Stops eligible to carry a red herring (start plus the three waypoints).
pub const RED_HERRING_CANDIDATE_STOPS: [usize; 4] = [0, 1, 2, 3];
pub const WAYPOINT_CLUE_COUNT: usize = 4;
pub const VISIBLE_WAYPOINT_CLUES: usize = 3;

// Geography ----------------------------------------------------------------
pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const DEFAULT_MAX_HOP_KM: f64 = 500.0;
/// 50 miles.
pub const DEFAULT_GUESS_RADIUS_KM: f64 = 80.5;

// Red herrings -------------------------------------------------------------
pub const DEFAULT_RED_HERRING_FAR_POOL: usize = 20;
pub const DEFAULT_RED_HERRING_NEAR_WINDOW: usize = 19;

// Seeds --------------------------------------------------------------------
pub(crate) const SEED_DOMAIN_PUZZLE: &[u8] = b"waypoint.puzzle";
pub(crate) const SEED_DOMAIN_HINT: &[u8] = b"waypoint.hint";
pub const DEFAULT_EASY_OFFSET: u32 = 1;
pub const DEFAULT_MEDIUM_OFFSET: u32 = 2;
pub const DEFAULT_HARD_OFFSET: u32 = 3;

// Anagram ------------------------------------------------------------------
pub(crate) const ANAGRAM_MAX_ATTEMPTS: usize = 25;
pub(crate) const ANAGRAM_MIN_SCRAMBLE_RATIO: f64 = 0.5;
pub(crate) const ANAGRAM_DECOY_ALPHABET: &[u8] = b"AEIOURSTLNDKMBGHPVWYZ";

// Population ---------------------------------------------------------------
pub(crate) const POPULATION_DOT_SCALE: u8 = 5;
/// Lower bound (log10) of the city population dot scale.
pub(crate) const CITY_POPULATION_LOG_FLOOR: f64 = 4.0;
pub(crate) const CITY_POPULATION_LOG_CEIL: f64 = 7.0;
pub(crate) const COUNTRY_POPULATION_LOG_FLOOR: f64 = 5.0;
pub(crate) const COUNTRY_POPULATION_LOG_CEIL: f64 = 8.0;

// Clue payload sizes -------------------------------------------------------
pub(crate) const EMOJIS_PER_POOL: usize = 2;
pub(crate) const FLAGS_PER_CLUE: usize = 2;
pub(crate) const GREETINGS_PER_CLUE: usize = 2;
pub(crate) const WEIRD_FACTS_PER_CLUE: usize = 2;

// Scoring ------------------------------------------------------------------
pub const FINAL_POINTS_EASY: u32 = 5;
pub const FINAL_POINTS_MEDIUM: u32 = 8;
pub const FINAL_POINTS_HARD: u32 = 10;
pub const HINT_PENALTY_STANDARD: u32 = 1;
pub const HINT_PENALTY_HARD: u32 = 2;

// Assets -------------------------------------------------------------------
pub(crate) const FAMILY_IMAGE_EXT: &str = "jpg";
pub(crate) const FESTIVE_IMAGE_BUCKET: &str = "xmas";
