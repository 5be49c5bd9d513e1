use chrono::Datelike;

use crate::clue::{Clue, ClueBody, ClueContext, ClueKind};
use crate::constants::{FAMILY_IMAGE_EXT, FESTIVE_IMAGE_BUCKET};
use crate::seed::PuzzleRng;

use super::ClueGenerator;
use super::anagram::normalize_letters;

/// Curated family anecdote about the target city.
#[derive(Debug, Clone, Copy, Default)]
pub struct FamilyClue;

/// Photo from the family archive, preferred whenever the city has one.
#[derive(Debug, Clone, Copy, Default)]
pub struct FamilyImageClue;

fn family_lines<'c>(ctx: &ClueContext<'c>) -> &'c [String] {
    ctx.content
        .city(ctx.target)
        .map(|c| c.family.as_slice())
        .unwrap_or_default()
}

/// Bucket and indices to draw from: the festive bucket on festive dates when
/// it has entries, the difficulty bucket otherwise.
fn image_bucket<'c>(ctx: &ClueContext<'c>) -> Option<(&'c str, &'c [u32])> {
    let images = &ctx.content.city(ctx.target)?.family_images;
    let lookup = |bucket: &str| {
        images
            .get_key_value(bucket)
            .filter(|(_, indices)| !indices.is_empty())
            .map(|(key, indices)| (key.as_str(), indices.as_slice()))
    };
    if ctx.is_festive
        && let Some(festive) = lookup(FESTIVE_IMAGE_BUCKET)
    {
        return Some(festive);
    }
    lookup(ctx.difficulty.for_generation().key())
}

/// Asset path `{root}/{city}-{bucket}{index}.jpg` for a family image.
#[must_use]
pub fn family_image_path(root: &str, city: &str, bucket: &str, index: u32) -> String {
    let stem = normalize_letters(city).to_ascii_lowercase();
    let file = format!("{stem}-{bucket}{index}.{FAMILY_IMAGE_EXT}");
    if root.is_empty() {
        file
    } else {
        format!("{}/{file}", root.trim_end_matches('/'))
    }
}

impl ClueGenerator for FamilyClue {
    fn kind(&self) -> ClueKind {
        ClueKind::Family
    }

    fn can_generate(&self, ctx: &ClueContext<'_>) -> bool {
        !family_lines(ctx).is_empty()
    }

    fn generate(&self, ctx: &ClueContext<'_>, rng: &mut PuzzleRng) -> Option<Clue> {
        let text = rng.pick(family_lines(ctx))?.clone();
        Some(Clue::from_context(
            ctx,
            ClueKind::Family,
            ClueBody::Text { text },
        ))
    }
}

impl ClueGenerator for FamilyImageClue {
    fn kind(&self) -> ClueKind {
        ClueKind::FamilyImage
    }

    fn priority(&self) -> u8 {
        1
    }

    fn can_generate(&self, ctx: &ClueContext<'_>) -> bool {
        image_bucket(ctx).is_some()
    }

    fn generate(&self, ctx: &ClueContext<'_>, rng: &mut PuzzleRng) -> Option<Clue> {
        let (bucket, indices) = image_bucket(ctx)?;
        // The home city's festive photo follows the calendar, not the stream.
        let index = if ctx.is_festive
            && bucket == FESTIVE_IMAGE_BUCKET
            && ctx.content.is_family_home(ctx.target)
        {
            let day = usize::try_from(ctx.date.day0()).unwrap_or(0);
            indices.get(day % indices.len()).copied()?
        } else {
            *rng.pick(indices)?
        };
        let path = family_image_path(
            &ctx.content.family_image_root,
            &ctx.target.name,
            bucket,
            index,
        );
        let body = ClueBody::Image {
            subject: format!("A family photo taken in {}", ctx.target.country),
            urls: vec![path],
        };
        Some(Clue::from_context(ctx, ClueKind::FamilyImage, body))
    }
}
