use crate::clue::{Clue, ClueBody, ClueContext, ClueKind};
use crate::content::CityContent;
use crate::seed::PuzzleRng;

use super::ClueGenerator;

/// Seasonal facts, offered only on festive dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct FestiveFactsClue;

/// Seasonal photo, offered only on festive dates and tried before anything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct FestiveImageClue;

const FESTIVE_FACTS_PER_CLUE: usize = 2;

fn festive_content<'c>(ctx: &ClueContext<'c>) -> Option<&'c CityContent> {
    if !ctx.is_festive {
        return None;
    }
    ctx.content.city(ctx.target)
}

impl ClueGenerator for FestiveFactsClue {
    fn kind(&self) -> ClueKind {
        ClueKind::FestiveFacts
    }

    fn priority(&self) -> u8 {
        2
    }

    fn can_generate(&self, ctx: &ClueContext<'_>) -> bool {
        festive_content(ctx).is_some_and(|c| !c.festive_facts.is_empty())
    }

    fn generate(&self, ctx: &ClueContext<'_>, rng: &mut PuzzleRng) -> Option<Clue> {
        let pool = &festive_content(ctx)?.festive_facts;
        if pool.is_empty() {
            return None;
        }
        let body = ClueBody::Facts {
            facts: rng.sample(pool, FESTIVE_FACTS_PER_CLUE),
        };
        Some(Clue::from_context(ctx, ClueKind::FestiveFacts, body))
    }
}

impl ClueGenerator for FestiveImageClue {
    fn kind(&self) -> ClueKind {
        ClueKind::FestiveImage
    }

    fn priority(&self) -> u8 {
        3
    }

    fn can_generate(&self, ctx: &ClueContext<'_>) -> bool {
        festive_content(ctx).is_some_and(|c| !c.festive_images.is_empty())
    }

    fn generate(&self, ctx: &ClueContext<'_>, rng: &mut PuzzleRng) -> Option<Clue> {
        let url = rng.pick(&festive_content(ctx)?.festive_images)?.clone();
        let body = ClueBody::Image {
            subject: "The season seen from this city".to_string(),
            urls: vec![url],
        };
        Some(Clue::from_context(ctx, ClueKind::FestiveImage, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clue::Difficulty;
    use crate::clues::testing::{IMAGES, content, context, lyon};

    #[test]
    fn only_applies_on_festive_dates() {
        let lyon = lyon();
        let content = content();
        let mut ctx = context(&lyon, None, &content, Difficulty::Hard, &IMAGES);
        assert!(!FestiveFactsClue.can_generate(&ctx));
        assert!(!FestiveImageClue.can_generate(&ctx));

        ctx.is_festive = true;
        assert!(FestiveFactsClue.can_generate(&ctx));
        let clue = FestiveImageClue
            .generate(&ctx, &mut PuzzleRng::from_seed_str("xmas"))
            .unwrap();
        assert_eq!(
            clue.image_url.as_deref(),
            Some("https://img.example/lyon-lights.jpg")
        );
    }

    #[test]
    fn facts_clue_keeps_available_facts() {
        let lyon = lyon();
        let content = content();
        let mut ctx = context(&lyon, None, &content, Difficulty::Hard, &IMAGES);
        ctx.is_festive = true;
        let clue = FestiveFactsClue
            .generate(&ctx, &mut PuzzleRng::from_seed_str("xmas"))
            .unwrap();
        assert_eq!(clue.text, "Its markets glow with mulled wine stalls.");
    }
}
