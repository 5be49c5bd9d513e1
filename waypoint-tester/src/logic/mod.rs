pub mod checks;
pub mod dates;
pub mod reports;
pub mod sweep;

pub use dates::{resolve_dates, resolve_difficulties};
pub use sweep::{CaseResult, PuzzleSweep};
