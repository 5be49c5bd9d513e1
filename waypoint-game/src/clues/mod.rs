//! Clue generators.
//!
//! Each generator owns one [`ClueKind`] and a difficulty-aware content rule.
//! The set active for a puzzle is a pure filter over [`ClueRegistry::ALL_KINDS`]
//! keyed by generation difficulty; dispatch is by kind tag, never by name.

mod anagram;
mod direction;
mod emoji;
mod facts;
mod family;
mod festive;
mod flag;
mod geography;
mod greeting;
mod imagery;
mod population;

pub use anagram::{AnagramClue, normalize_letters, scramble_ratio};
pub use direction::DirectionClue;
pub use emoji::EmojiClue;
pub use facts::WeirdFactsClue;
pub use family::{FamilyClue, FamilyImageClue, family_image_path};
pub use festive::{FestiveFactsClue, FestiveImageClue};
pub use flag::FlagClue;
pub use geography::GeographyClue;
pub use greeting::GreetingClue;
pub use imagery::{ArtImageClue, LandmarkImageClue, is_generic_landmark};
pub use population::{PopulationClue, population_dots};

use crate::clue::{Clue, ClueContext, ClueKind, Difficulty};
use crate::seed::PuzzleRng;

/// One clue type's applicability check and content rule.
pub trait ClueGenerator {
    fn kind(&self) -> ClueKind;

    /// Generators with a higher priority are attempted before the shuffled
    /// walk when they apply. Zero means no preference.
    fn priority(&self) -> u8 {
        0
    }

    /// Cheap, side-effect free check that the target can support this type.
    fn can_generate(&self, ctx: &ClueContext<'_>) -> bool;

    /// Produce a clue, or `None` when content could not be resolved after all.
    /// Callers treat `None` as a cue to try another type.
    fn generate(&self, ctx: &ClueContext<'_>, rng: &mut PuzzleRng) -> Option<Clue>;
}

/// Generators registered for one generation difficulty, in stable order.
pub struct ClueRegistry {
    generators: Vec<Box<dyn ClueGenerator>>,
}

impl ClueRegistry {
    /// Registry order; availability lists preserve it before shuffling.
    pub const ALL_KINDS: [ClueKind; 14] = ClueKind::ALL;

    /// Build the registry for `difficulty` (festive is treated as hard).
    #[must_use]
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let difficulty = difficulty.for_generation();
        let generators = Self::ALL_KINDS
            .into_iter()
            .filter(|kind| kind_enabled(*kind, difficulty))
            .map(generator_for)
            .collect();
        Self { generators }
    }

    #[must_use]
    pub fn get(&self, kind: ClueKind) -> Option<&dyn ClueGenerator> {
        self.generators
            .iter()
            .find(|generator| generator.kind() == kind)
            .map(Box::as_ref)
    }

    #[must_use]
    pub fn kinds(&self) -> Vec<ClueKind> {
        self.generators.iter().map(|g| g.kind()).collect()
    }

    /// Kinds whose generator can produce a clue for `ctx`, in registry order.
    #[must_use]
    pub fn available(&self, ctx: &ClueContext<'_>) -> Vec<ClueKind> {
        self.generators
            .iter()
            .filter(|generator| generator.can_generate(ctx))
            .map(|generator| generator.kind())
            .collect()
    }

    #[must_use]
    pub fn priority(&self, kind: ClueKind) -> u8 {
        self.get(kind).map_or(0, ClueGenerator::priority)
    }

    /// Available kinds with a non-zero priority, highest first.
    #[must_use]
    pub fn prioritized(&self, available: &[ClueKind]) -> Vec<ClueKind> {
        let mut kinds: Vec<ClueKind> = available
            .iter()
            .copied()
            .filter(|kind| self.priority(*kind) > 0)
            .collect();
        kinds.sort_by(|a, b| self.priority(*b).cmp(&self.priority(*a)));
        kinds
    }
}

impl std::fmt::Debug for ClueRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClueRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// Easy and medium draw from a curated subset; hard drops only the trivial emoji clue.
const fn kind_enabled(kind: ClueKind, difficulty: Difficulty) -> bool {
    match difficulty {
        Difficulty::Easy => !matches!(kind, ClueKind::WeirdFacts | ClueKind::ArtImage),
        Difficulty::Medium => true,
        Difficulty::Hard | Difficulty::Festive => !matches!(kind, ClueKind::Emoji),
    }
}

fn generator_for(kind: ClueKind) -> Box<dyn ClueGenerator> {
    match kind {
        ClueKind::Direction => Box::new(DirectionClue),
        ClueKind::Anagram => Box::new(AnagramClue),
        ClueKind::Emoji => Box::new(EmojiClue),
        ClueKind::Flag => Box::new(FlagClue),
        ClueKind::Population => Box::new(PopulationClue),
        ClueKind::Geography => Box::new(GeographyClue),
        ClueKind::Greeting => Box::new(GreetingClue),
        ClueKind::WeirdFacts => Box::new(WeirdFactsClue),
        ClueKind::Family => Box::new(FamilyClue),
        ClueKind::FamilyImage => Box::new(FamilyImageClue),
        ClueKind::LandmarkImage => Box::new(LandmarkImageClue),
        ClueKind::ArtImage => Box::new(ArtImageClue),
        ClueKind::FestiveFacts => Box::new(FestiveFactsClue),
        ClueKind::FestiveImage => Box::new(FestiveImageClue),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fixture city, content and context for generator tests.
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    use crate::city::{Artwork, City, CityRef, Geography, Landmark};
    use crate::clue::{ClueContext, Difficulty};
    use crate::content::{ClueContent, CityContent, CountryContent, GreetingSet, RegionContent};
    use crate::{CatalogImages, ImageSource};

    pub fn lyon() -> City {
        let mut city = City::new("Lyon", "France", 45.764, 4.8357);
        city.population = Some(522_000);
        city.region = Some("Auvergne-Rhône-Alpes".into());
        city.details.geography = Some(Geography {
            elevation_m: Some(173),
            distance_to_sea_km: Some(280),
            position_in_country: Some("east".into()),
        });
        city.details.landmarks = vec![
            Landmark {
                name: "Old Town".into(),
                image_url: Some("https://img.example/lyon-old-town.jpg".into()),
            },
            Landmark {
                name: "Basilica of Notre-Dame de Fourvière".into(),
                image_url: Some("https://img.example/lyon-fourviere.jpg".into()),
            },
        ];
        city.details.art = vec![Artwork {
            title: "Fresque des Lyonnais".into(),
            artist: None,
            image_url: Some("https://img.example/lyon-fresque.jpg".into()),
        }];
        city
    }

    pub fn paris() -> City {
        let mut city = City::new("Paris", "France", 48.8566, 2.3522);
        city.population = Some(2_148_000);
        city
    }

    pub fn content() -> ClueContent {
        let mut countries = BTreeMap::new();
        countries.insert(
            "France".to_string(),
            CountryContent {
                emoji: vec!["🥖".into(), "🧀".into(), "🍷".into()],
                flag: Some("🇫🇷".into()),
                population: Some(68_000_000),
                greeting: Some(GreetingSet {
                    difficulty: Difficulty::Easy,
                    hello: "Bonjour".into(),
                    welcome: "Bienvenue".into(),
                    thanks: "Merci".into(),
                }),
            },
        );
        let mut regions = BTreeMap::new();
        regions.insert(
            "Auvergne-Rhône-Alpes".to_string(),
            RegionContent {
                flag: Some("flags/regions/auvergne-rhone-alpes.svg".into()),
            },
        );
        let mut family_images = BTreeMap::new();
        family_images.insert("easy".to_string(), vec![1, 2]);
        family_images.insert("hard".to_string(), vec![4]);
        family_images.insert("xmas".to_string(), vec![1, 2, 3]);
        ClueContent {
            countries,
            regions,
            cities: vec![CityContent {
                name: "Lyon".into(),
                country: "France".into(),
                emoji: vec!["🦁".into(), "💡".into(), "🎞️".into()],
                flag: Some("flags/cities/lyon.svg".into()),
                weird_facts: vec![
                    "Has a festival where residents put candles in every window.".into(),
                    "Its silk workers built covered passageways through buildings.".into(),
                    "The cinema was born here.".into(),
                ],
                family: vec!["We ate quenelles by the river here.".into()],
                festive_facts: vec!["Its markets glow with mulled wine stalls.".into()],
                festive_images: vec!["https://img.example/lyon-lights.jpg".into()],
                family_images,
            }],
            family_home: Some(CityRef::new("Lyon", "France")),
            family_image_root: "family".into(),
        }
    }

    pub fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    pub static IMAGES: CatalogImages = CatalogImages;

    pub fn context<'a>(
        target: &'a City,
        previous: Option<&'a City>,
        content: &'a ClueContent,
        difficulty: Difficulty,
        images: &'a dyn ImageSource,
    ) -> ClueContext<'a> {
        ClueContext {
            target,
            previous,
            final_city: target,
            stop: 1,
            difficulty,
            is_red_herring: false,
            red_herring_city: None,
            date: date(),
            seed: "2025-06-011",
            is_festive: false,
            content,
            images,
        }
    }
}
