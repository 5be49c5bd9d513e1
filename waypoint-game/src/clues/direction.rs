use crate::clue::{Clue, ClueBody, ClueContext, ClueKind, Difficulty, Heading};
use crate::geo::{CompassRose, bearing_degrees};
use crate::numbers::round_f64_to_u16;
use crate::seed::PuzzleRng;

use super::ClueGenerator;

/// Bearing from the previous stop towards the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectionClue;

fn heading_for(bearing: f64, difficulty: Difficulty) -> Heading {
    match difficulty.for_generation() {
        Difficulty::Easy => Heading::Degrees {
            degrees: round_f64_to_u16(bearing) % 360,
        },
        Difficulty::Medium => Heading::SixteenPoint {
            label: CompassRose::SixteenPoint.label(bearing).to_string(),
        },
        Difficulty::Hard | Difficulty::Festive => Heading::EightPoint {
            label: CompassRose::EightPoint.label(bearing).to_string(),
        },
    }
}

impl ClueGenerator for DirectionClue {
    fn kind(&self) -> ClueKind {
        ClueKind::Direction
    }

    fn can_generate(&self, ctx: &ClueContext<'_>) -> bool {
        ctx.previous
            .is_some_and(|previous| !previous.same_city(ctx.target))
    }

    fn generate(&self, ctx: &ClueContext<'_>, _rng: &mut PuzzleRng) -> Option<Clue> {
        let previous = ctx.previous?;
        if previous.same_city(ctx.target) {
            return None;
        }
        let bearing = bearing_degrees(previous.lat, previous.lng, ctx.target.lat, ctx.target.lng);
        let body = ClueBody::Direction {
            from_city: previous.name.clone(),
            heading: heading_for(bearing, ctx.difficulty),
        };
        Some(Clue::from_context(ctx, ClueKind::Direction, body))
    }
}
