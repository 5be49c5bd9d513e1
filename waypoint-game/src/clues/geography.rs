use crate::city::Geography;
use crate::clue::{Clue, ClueBody, ClueContext, ClueKind};
use crate::seed::PuzzleRng;

use super::ClueGenerator;

/// Elevation, distance to the sea and position within the country.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeographyClue;

fn geography<'c>(ctx: &ClueContext<'c>) -> Option<&'c Geography> {
    ctx.target
        .details
        .geography
        .as_ref()
        .filter(|geo| geo.has_any())
}

impl ClueGenerator for GeographyClue {
    fn kind(&self) -> ClueKind {
        ClueKind::Geography
    }

    fn can_generate(&self, ctx: &ClueContext<'_>) -> bool {
        geography(ctx).is_some()
    }

    fn generate(&self, ctx: &ClueContext<'_>, _rng: &mut PuzzleRng) -> Option<Clue> {
        let geo = geography(ctx)?;
        let body = ClueBody::Geography {
            elevation_m: geo.elevation_m,
            distance_to_sea_km: geo.distance_to_sea_km,
            position_in_country: geo.position_in_country.clone(),
        };
        Some(Clue::from_context(ctx, ClueKind::Geography, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clue::Difficulty;
    use crate::clues::testing::{IMAGES, content, context, lyon};

    #[test]
    fn formats_every_known_field() {
        let lyon = lyon();
        let content = content();
        let ctx = context(&lyon, None, &content, Difficulty::Medium, &IMAGES);
        let clue = GeographyClue
            .generate(&ctx, &mut PuzzleRng::from_seed_str("geo"))
            .unwrap();
        assert_eq!(
            clue.text,
            "173 m above sea level, 280 km from the sea, in the east of the country"
        );
    }

    #[test]
    fn empty_geography_is_not_applicable() {
        let mut lyon = lyon();
        lyon.details.geography = Some(Geography::default());
        let content = content();
        let ctx = context(&lyon, None, &content, Difficulty::Medium, &IMAGES);
        assert!(!GeographyClue.can_generate(&ctx));
    }
}
