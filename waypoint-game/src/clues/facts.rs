use crate::clue::{Clue, ClueBody, ClueContext, ClueKind};
use crate::constants::WEIRD_FACTS_PER_CLUE;
use crate::seed::PuzzleRng;

use super::ClueGenerator;

/// Two curated oddities about the target city.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeirdFactsClue;

fn facts<'c>(ctx: &ClueContext<'c>) -> &'c [String] {
    ctx.content
        .city(ctx.target)
        .map(|c| c.weird_facts.as_slice())
        .unwrap_or_default()
}

impl ClueGenerator for WeirdFactsClue {
    fn kind(&self) -> ClueKind {
        ClueKind::WeirdFacts
    }

    fn can_generate(&self, ctx: &ClueContext<'_>) -> bool {
        facts(ctx).len() >= WEIRD_FACTS_PER_CLUE
    }

    fn generate(&self, ctx: &ClueContext<'_>, rng: &mut PuzzleRng) -> Option<Clue> {
        let pool = facts(ctx);
        if pool.len() < WEIRD_FACTS_PER_CLUE {
            return None;
        }
        let body = ClueBody::Facts {
            facts: rng.sample(pool, WEIRD_FACTS_PER_CLUE),
        };
        Some(Clue::from_context(ctx, ClueKind::WeirdFacts, body))
    }
}
