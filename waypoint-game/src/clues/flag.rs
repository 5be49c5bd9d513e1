use crate::clue::{Clue, ClueBody, ClueContext, ClueKind, Difficulty, FlagRef, FlagScope};
use crate::constants::FLAGS_PER_CLUE;
use crate::seed::PuzzleRng;

use super::ClueGenerator;

/// Two of the country, region and city flags, weighted by difficulty.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlagClue;

fn resolvable_flags(ctx: &ClueContext<'_>) -> Vec<FlagRef> {
    let content = ctx.content;
    let country = content
        .country(&ctx.target.country)
        .and_then(|c| c.flag.as_deref());
    let region = ctx
        .target
        .region
        .as_deref()
        .and_then(|region| content.region_flag(region));
    let city = content.city(ctx.target).and_then(|c| c.flag.as_deref());

    [
        (FlagScope::Country, country),
        (FlagScope::Region, region),
        (FlagScope::City, city),
    ]
    .into_iter()
    .filter_map(|(scope, symbol)| {
        symbol.map(|symbol| FlagRef {
            scope,
            symbol: symbol.to_string(),
        })
    })
    .collect()
}

/// Flags eligible at `difficulty`; hard puzzles never show the country flag.
fn eligible(flags: Vec<FlagRef>, difficulty: Difficulty) -> Vec<FlagRef> {
    if difficulty.is_hard() {
        flags
            .into_iter()
            .filter(|flag| flag.scope != FlagScope::Country)
            .collect()
    } else {
        flags
    }
}

fn select(flags: Vec<FlagRef>, difficulty: Difficulty, rng: &mut PuzzleRng) -> Vec<FlagRef> {
    match difficulty.for_generation() {
        Difficulty::Easy => {
            let (country, others): (Vec<_>, Vec<_>) = flags
                .into_iter()
                .partition(|flag| flag.scope == FlagScope::Country);
            let mut chosen = country;
            let missing = FLAGS_PER_CLUE.saturating_sub(chosen.len());
            chosen.extend(rng.sample(&others, missing));
            chosen
        }
        _ => rng.sample(&flags, FLAGS_PER_CLUE),
    }
}

impl ClueGenerator for FlagClue {
    fn kind(&self) -> ClueKind {
        ClueKind::Flag
    }

    fn can_generate(&self, ctx: &ClueContext<'_>) -> bool {
        eligible(resolvable_flags(ctx), ctx.difficulty).len() >= FLAGS_PER_CLUE
    }

    fn generate(&self, ctx: &ClueContext<'_>, rng: &mut PuzzleRng) -> Option<Clue> {
        let flags = eligible(resolvable_flags(ctx), ctx.difficulty);
        if flags.len() < FLAGS_PER_CLUE {
            return None;
        }
        let body = ClueBody::Flag {
            flags: select(flags, ctx.difficulty, rng),
        };
        Some(Clue::from_context(ctx, ClueKind::Flag, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clues::testing::{IMAGES, content, context, lyon};

    fn scopes(clue: &Clue) -> Vec<FlagScope> {
        let ClueBody::Flag { flags } = &clue.body else {
            panic!("expected flag body");
        };
        flags.iter().map(|flag| flag.scope).collect()
    }

    #[test]
    fn easy_always_includes_country_flag() {
        let lyon = lyon();
        let content = content();
        let ctx = context(&lyon, None, &content, Difficulty::Easy, &IMAGES);
        for seed in ["a", "b", "c", "d", "e"] {
            let clue = FlagClue
                .generate(&ctx, &mut PuzzleRng::from_seed_str(seed))
                .unwrap();
            let scopes = scopes(&clue);
            assert_eq!(scopes.len(), 2);
            assert_eq!(scopes[0], FlagScope::Country);
        }
    }

    #[test]
    fn hard_never_includes_country_flag() {
        let lyon = lyon();
        let content = content();
        let ctx = context(&lyon, None, &content, Difficulty::Hard, &IMAGES);
        let clue = FlagClue
            .generate(&ctx, &mut PuzzleRng::from_seed_str("hard"))
            .unwrap();
        let scopes = scopes(&clue);
        assert_eq!(scopes.len(), 2);
        assert!(!scopes.contains(&FlagScope::Country));
    }

    #[test]
    fn hard_needs_region_and_city_flags() {
        let mut lyon = lyon();
        lyon.region = None;
        let content = content();
        let easy = context(&lyon, None, &content, Difficulty::Easy, &IMAGES);
        assert!(FlagClue.can_generate(&easy));
        let hard = context(&lyon, None, &content, Difficulty::Hard, &IMAGES);
        assert!(!FlagClue.can_generate(&hard));
    }
}
