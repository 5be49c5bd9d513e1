//! Scoring for correctly located stops, less the hint penalty.
use serde::{Deserialize, Serialize};

use crate::clue::Difficulty;
use crate::constants::{
    FINAL_POINTS_EASY, FINAL_POINTS_HARD, FINAL_POINTS_MEDIUM, FINAL_STOP, HINT_PENALTY_HARD,
    HINT_PENALTY_STANDARD,
};
use crate::puzzle::Location;

/// Score split into its earned and deducted parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub earned: u32,
    pub hint_penalty: u32,
    /// `earned - hint_penalty`, floored at zero.
    pub total: u32,
}

/// Points for locating `stop` correctly.
#[must_use]
pub fn stop_points(stop: usize, difficulty: Difficulty) -> u32 {
    let index = u32::try_from(stop).unwrap_or(u32::MAX);
    match (stop, difficulty.for_generation()) {
        (0, _) => 0,
        (s, Difficulty::Easy) if s >= FINAL_STOP => FINAL_POINTS_EASY,
        (s, Difficulty::Medium) if s >= FINAL_STOP => FINAL_POINTS_MEDIUM,
        (s, _) if s >= FINAL_STOP => FINAL_POINTS_HARD,
        (_, Difficulty::Easy) => index,
        (_, Difficulty::Medium) => index.saturating_add(1),
        (_, Difficulty::Hard | Difficulty::Festive) => index.saturating_mul(2),
    }
}

/// Deduction per revealed hint.
#[must_use]
pub const fn hint_penalty(difficulty: Difficulty) -> u32 {
    if difficulty.is_hard() {
        HINT_PENALTY_HARD
    } else {
        HINT_PENALTY_STANDARD
    }
}

/// Score a puzzle's locations.
#[must_use]
pub fn calculate_score(
    locations: &[Location],
    difficulty: Difficulty,
    hints_used: u32,
) -> ScoreBreakdown {
    let earned = locations
        .iter()
        .filter(|location| location.is_correct == Some(true))
        .map(|location| stop_points(location.id, difficulty))
        .fold(0u32, u32::saturating_add);
    let hint_penalty = hint_penalty(difficulty).saturating_mul(hints_used);
    ScoreBreakdown {
        earned,
        hint_penalty,
        total: earned.saturating_sub(hint_penalty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::City;

    fn locations(correct: &[bool]) -> Vec<Location> {
        correct
            .iter()
            .enumerate()
            .map(|(idx, ok)| {
                let mut location = Location::new(idx, City::new("X", "Y", 0.0, 0.0), Vec::new());
                location.is_correct = Some(*ok);
                location
            })
            .collect()
    }

    #[test]
    fn points_table_per_difficulty() {
        let table = |difficulty| (0..5).map(|s| stop_points(s, difficulty)).collect::<Vec<_>>();
        assert_eq!(table(Difficulty::Easy), vec![0, 1, 2, 3, 5]);
        assert_eq!(table(Difficulty::Medium), vec![0, 2, 3, 4, 8]);
        assert_eq!(table(Difficulty::Hard), vec![0, 2, 4, 6, 10]);
        assert_eq!(table(Difficulty::Festive), table(Difficulty::Hard));
    }

    #[test]
    fn perfect_medium_run() {
        let score = calculate_score(&locations(&[true; 5]), Difficulty::Medium, 0);
        assert_eq!(score.earned, 17);
        assert_eq!(score.total, 17);
    }

    #[test]
    fn only_correct_stops_count() {
        let score = calculate_score(
            &locations(&[true, false, true, false, true]),
            Difficulty::Easy,
            1,
        );
        assert_eq!(score.earned, 7);
        assert_eq!(score.hint_penalty, 1);
        assert_eq!(score.total, 6);
    }

    #[test]
    fn hard_hints_cost_double_and_floor_at_zero() {
        let score = calculate_score(
            &locations(&[true, true, false, false, false]),
            Difficulty::Festive,
            3,
        );
        assert_eq!(score.earned, 2);
        assert_eq!(score.hint_penalty, 6);
        assert_eq!(score.total, 0);
    }
}
