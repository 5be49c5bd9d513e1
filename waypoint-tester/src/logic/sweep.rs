use chrono::NaiveDate;
use colored::Colorize;
use log::{debug, warn};
use serde::Serialize;
use std::time::{Duration, Instant};
use waypoint_game::{DataLoader, Difficulty, PuzzleEngine, PuzzleRequest};

use super::checks::{
    check_closest_city, check_determinism, check_distinct_types, check_final_uniqueness,
    check_hints, check_red_herrings, check_shape,
};

/// Outcome of one date and difficulty.
#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    pub date: NaiveDate,
    pub difficulty: Difficulty,
    /// Displayed difficulty; differs on festive dates.
    pub played_as: Difficulty,
    pub seed: String,
    pub route: Vec<String>,
    pub passed: bool,
    pub failures: Vec<String>,
    pub duration: Duration,
}

impl CaseResult {
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.date, self.difficulty)
    }
}

/// Runs every check against freshly generated puzzles.
pub struct PuzzleSweep<L> {
    loader: L,
    verbose: bool,
}

impl<L: DataLoader + Clone> PuzzleSweep<L> {
    pub const fn new(loader: L, verbose: bool) -> Self {
        Self { loader, verbose }
    }

    fn engine(&self, date: NaiveDate, difficulty: Difficulty) -> PuzzleEngine<L> {
        PuzzleEngine::new(
            self.loader.clone(),
            PuzzleRequest::daily(date, difficulty),
        )
    }

    pub fn run(&self, dates: &[NaiveDate], difficulties: &[Difficulty]) -> Vec<CaseResult> {
        dates
            .iter()
            .flat_map(|date| difficulties.iter().map(move |difficulty| (*date, *difficulty)))
            .map(|(date, difficulty)| self.run_case(date, difficulty))
            .collect()
    }

    pub fn run_case(&self, date: NaiveDate, difficulty: Difficulty) -> CaseResult {
        let start = Instant::now();
        let mut engine = self.engine(date, difficulty);
        let generated = engine.generate_puzzle().cloned();

        let mut result = CaseResult {
            date,
            difficulty,
            played_as: engine.display_difficulty(),
            seed: String::new(),
            route: Vec::new(),
            passed: false,
            failures: Vec::new(),
            duration: Duration::ZERO,
        };

        match generated {
            Ok(puzzle) => {
                result.seed.clone_from(&puzzle.seed);
                result.route = puzzle.route().iter().map(|c| c.name.clone()).collect();
                let failures = &mut result.failures;
                failures.extend(check_shape(&puzzle));
                failures.extend(check_distinct_types(&puzzle));
                failures.extend(check_final_uniqueness(&puzzle));
                failures.extend(check_red_herrings(&puzzle));
                failures.extend(check_hints(&puzzle));
                failures.extend(check_determinism(&puzzle, self.engine(date, difficulty)));
                failures.extend(check_closest_city(&puzzle, &engine));
            }
            Err(err) => result.failures.push(format!("generation failed: {err}")),
        }

        result.passed = result.failures.is_empty();
        result.duration = start.elapsed();
        if result.passed {
            debug!("{} passed in {:?}", result.label(), result.duration);
        } else {
            warn!("{} failed: {}", result.label(), result.failures.join("; "));
        }
        if self.verbose {
            let status = if result.passed {
                "✅".green()
            } else {
                "❌".red()
            };
            println!(
                "{status} {} [{}] {:?}",
                result.label(),
                result.route.join(" -> "),
                result.duration
            );
        }
        result
    }
}
