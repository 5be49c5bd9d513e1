use crate::clue::{Clue, ClueBody, ClueContext, ClueKind, GreetingCategory, GreetingPhrase};
use crate::constants::GREETINGS_PER_CLUE;
use crate::content::GreetingSet;
use crate::seed::PuzzleRng;

use super::ClueGenerator;

/// Two local phrases from the target country's greeting set.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreetingClue;

const CATEGORIES: [GreetingCategory; 3] = [
    GreetingCategory::Hello,
    GreetingCategory::Welcome,
    GreetingCategory::Thanks,
];

fn greeting_set<'c>(ctx: &ClueContext<'c>) -> Option<&'c GreetingSet> {
    ctx.content
        .country(&ctx.target.country)?
        .greeting
        .as_ref()
        .filter(|set| set.suits(ctx.difficulty))
}

fn phrase(set: &GreetingSet, category: GreetingCategory) -> GreetingPhrase {
    let phrase = match category {
        GreetingCategory::Hello => &set.hello,
        GreetingCategory::Welcome => &set.welcome,
        GreetingCategory::Thanks => &set.thanks,
    };
    GreetingPhrase {
        category,
        phrase: phrase.clone(),
    }
}

impl ClueGenerator for GreetingClue {
    fn kind(&self) -> ClueKind {
        ClueKind::Greeting
    }

    fn can_generate(&self, ctx: &ClueContext<'_>) -> bool {
        greeting_set(ctx).is_some()
    }

    fn generate(&self, ctx: &ClueContext<'_>, rng: &mut PuzzleRng) -> Option<Clue> {
        let set = greeting_set(ctx)?;
        let phrases = rng
            .sample(&CATEGORIES, GREETINGS_PER_CLUE)
            .into_iter()
            .map(|category| phrase(set, category))
            .collect();
        let body = ClueBody::Greeting { phrases };
        Some(Clue::from_context(ctx, ClueKind::Greeting, body))
    }
}
