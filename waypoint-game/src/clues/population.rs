use crate::clue::{Clue, ClueBody, ClueContext, ClueKind};
use crate::constants::{
    CITY_POPULATION_LOG_CEIL, CITY_POPULATION_LOG_FLOOR, COUNTRY_POPULATION_LOG_CEIL,
    COUNTRY_POPULATION_LOG_FLOOR, POPULATION_DOT_SCALE,
};
use crate::numbers::{round_f64_to_u16, u64_to_f64};
use crate::seed::PuzzleRng;

use super::ClueGenerator;

/// City and country population with a quantized relative scale.
#[derive(Debug, Clone, Copy, Default)]
pub struct PopulationClue;

/// Filled dots on a log10 scale between `floor` and `ceil`; any non-zero
/// population shows at least one.
#[must_use]
pub fn population_dots(population: u64, floor: f64, ceil: f64) -> u8 {
    if population == 0 {
        return 0;
    }
    let fraction = ((u64_to_f64(population).log10() - floor) / (ceil - floor)).clamp(0.0, 1.0);
    let scale = f64::from(POPULATION_DOT_SCALE);
    let dots = round_f64_to_u16(fraction * scale).clamp(1, u16::from(POPULATION_DOT_SCALE));
    u8::try_from(dots).unwrap_or(POPULATION_DOT_SCALE)
}

impl ClueGenerator for PopulationClue {
    fn kind(&self) -> ClueKind {
        ClueKind::Population
    }

    fn can_generate(&self, _ctx: &ClueContext<'_>) -> bool {
        true
    }

    fn generate(&self, ctx: &ClueContext<'_>, _rng: &mut PuzzleRng) -> Option<Clue> {
        let city = ctx.target.population.unwrap_or(0);
        let country = ctx
            .content
            .country(&ctx.target.country)
            .and_then(|c| c.population)
            .unwrap_or(0);
        let body = ClueBody::Population {
            city,
            country,
            city_dots: population_dots(city, CITY_POPULATION_LOG_FLOOR, CITY_POPULATION_LOG_CEIL),
            country_dots: population_dots(
                country,
                COUNTRY_POPULATION_LOG_FLOOR,
                COUNTRY_POPULATION_LOG_CEIL,
            ),
        };
        Some(Clue::from_context(ctx, ClueKind::Population, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::City;
    use crate::clue::Difficulty;
    use crate::clues::testing::{IMAGES, content, context, lyon};

    #[test]
    fn dots_follow_log_scale() {
        assert_eq!(population_dots(0, 4.0, 7.0), 0);
        assert_eq!(population_dots(500, 4.0, 7.0), 1);
        assert_eq!(population_dots(1_500_000, 4.0, 7.0), 4);
        assert_eq!(population_dots(40_000_000, 4.0, 7.0), 5);
        assert_eq!(population_dots(10_000_000, 5.0, 8.0), 3);
    }

    #[test]
    fn renders_city_and_country() {
        let lyon = lyon();
        let content = content();
        let ctx = context(&lyon, None, &content, Difficulty::Medium, &IMAGES);
        let clue = PopulationClue
            .generate(&ctx, &mut PuzzleRng::from_seed_str("pop"))
            .unwrap();
        assert!(clue.text.starts_with("City 522,000"));
        assert!(clue.text.contains("Country 68,000,000"));
    }

    #[test]
    fn missing_figures_fall_back_to_zero() {
        let city = City::new("Nowhere", "Atlantis", 0.0, 0.0);
        let content = content();
        let ctx = context(&city, None, &content, Difficulty::Medium, &IMAGES);
        assert!(PopulationClue.can_generate(&ctx));
        let clue = PopulationClue
            .generate(&ctx, &mut PuzzleRng::from_seed_str("pop"))
            .unwrap();
        assert_eq!(
            clue.body,
            ClueBody::Population {
                city: 0,
                country: 0,
                city_dots: 0,
                country_dots: 0
            }
        );
    }
}
