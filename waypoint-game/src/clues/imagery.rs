use crate::ImageSubject;
use crate::clue::{Clue, ClueBody, ClueContext, ClueKind, Difficulty};
use crate::seed::PuzzleRng;

use super::ClueGenerator;

/// Photo of a distinctive landmark in the target city.
#[derive(Debug, Clone, Copy, Default)]
pub struct LandmarkImageClue;

/// Photo of an artwork held or made in the target city.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtImageClue;

const GENERIC_LANDMARKS: [&str; 16] = [
    "old town",
    "city centre",
    "city center",
    "historic centre",
    "historic center",
    "main square",
    "market square",
    "town hall",
    "cathedral",
    "harbour",
    "harbor",
    "old port",
    "central station",
    "city park",
    "downtown",
    "university",
];

/// Names that could belong to almost any European city.
#[must_use]
pub fn is_generic_landmark(name: &str) -> bool {
    let name = name.trim().to_lowercase();
    GENERIC_LANDMARKS.contains(&name.as_str())
}

const fn image_limit(difficulty: Difficulty) -> usize {
    match difficulty.for_generation() {
        Difficulty::Easy => 2,
        _ => 1,
    }
}

fn image_clue(
    ctx: &ClueContext<'_>,
    kind: ClueKind,
    subject: ImageSubject,
    caption: &str,
) -> Option<Clue> {
    let urls = ctx
        .images
        .images_for(ctx.target, subject, image_limit(ctx.difficulty))?;
    if urls.is_empty() {
        return None;
    }
    let body = ClueBody::Image {
        subject: caption.to_string(),
        urls,
    };
    Some(Clue::from_context(ctx, kind, body))
}

impl ClueGenerator for LandmarkImageClue {
    fn kind(&self) -> ClueKind {
        ClueKind::LandmarkImage
    }

    fn can_generate(&self, ctx: &ClueContext<'_>) -> bool {
        !ctx.target.details.landmarks.is_empty()
    }

    fn generate(&self, ctx: &ClueContext<'_>, _rng: &mut PuzzleRng) -> Option<Clue> {
        image_clue(
            ctx,
            ClueKind::LandmarkImage,
            ImageSubject::Landmark,
            "A landmark you would pass here",
        )
    }
}

impl ClueGenerator for ArtImageClue {
    fn kind(&self) -> ClueKind {
        ClueKind::ArtImage
    }

    fn can_generate(&self, ctx: &ClueContext<'_>) -> bool {
        !ctx.target.details.art.is_empty()
    }

    fn generate(&self, ctx: &ClueContext<'_>, _rng: &mut PuzzleRng) -> Option<Clue> {
        image_clue(
            ctx,
            ClueKind::ArtImage,
            ImageSubject::Art,
            "A work of art you would find here",
        )
    }
}
