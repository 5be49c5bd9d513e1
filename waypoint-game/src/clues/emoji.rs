use crate::clue::{Clue, ClueBody, ClueContext, ClueKind};
use crate::constants::EMOJIS_PER_POOL;
use crate::seed::PuzzleRng;

use super::ClueGenerator;

/// Two emoji each from the country pool and the city pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmojiClue;

fn pools<'c>(ctx: &ClueContext<'c>) -> (&'c [String], &'c [String]) {
    let content = ctx.content;
    let country = content
        .country(&ctx.target.country)
        .map(|c| c.emoji.as_slice())
        .unwrap_or_default();
    let city = content
        .city(ctx.target)
        .map(|c| c.emoji.as_slice())
        .unwrap_or_default();
    (country, city)
}

impl ClueGenerator for EmojiClue {
    fn kind(&self) -> ClueKind {
        ClueKind::Emoji
    }

    fn can_generate(&self, ctx: &ClueContext<'_>) -> bool {
        let (country, city) = pools(ctx);
        !country.is_empty() || !city.is_empty()
    }

    fn generate(&self, ctx: &ClueContext<'_>, rng: &mut PuzzleRng) -> Option<Clue> {
        let (country, city) = pools(ctx);
        if country.is_empty() && city.is_empty() {
            return None;
        }
        let body = ClueBody::Emoji {
            country: rng.sample(country, EMOJIS_PER_POOL),
            city: rng.sample(city, EMOJIS_PER_POOL),
        };
        Some(Clue::from_context(ctx, ClueKind::Emoji, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::City;
    use crate::clue::Difficulty;
    use crate::clues::testing::{IMAGES, content, context, lyon};

    #[test]
    fn samples_two_from_each_pool() {
        let lyon = lyon();
        let content = content();
        let ctx = context(&lyon, None, &content, Difficulty::Easy, &IMAGES);
        let clue = EmojiClue
            .generate(&ctx, &mut PuzzleRng::from_seed_str("emoji"))
            .unwrap();
        let ClueBody::Emoji { country, city } = clue.body else {
            panic!("expected emoji body");
        };
        assert_eq!(country.len(), 2);
        assert_eq!(city.len(), 2);
        assert_ne!(country[0], country[1]);
        assert!(city.iter().all(|e| ["🦁", "💡", "🎞️"].contains(&e.as_str())));
    }

    #[test]
    fn unknown_city_and_country_cannot_generate() {
        let city = City::new("Vaduz", "Liechtenstein", 47.141, 9.5215);
        let content = content();
        let ctx = context(&city, None, &content, Difficulty::Easy, &IMAGES);
        assert!(!EmojiClue.can_generate(&ctx));
    }
}
