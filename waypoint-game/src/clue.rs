//! Clue records, roles and the context handed to every generator call.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ImageSource;
use crate::city::City;
use crate::content::ClueContent;

/// Puzzle difficulty as shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    /// Calendar-triggered themed puzzle; generated and scored as [`Difficulty::Hard`].
    Festive,
}

impl Difficulty {
    /// Difficulty used for clue eligibility, seeding and scoring.
    #[must_use]
    pub const fn for_generation(self) -> Self {
        match self {
            Self::Festive => Self::Hard,
            other => other,
        }
    }

    #[must_use]
    pub const fn is_hard(self) -> bool {
        matches!(self.for_generation(), Self::Hard)
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Festive => "festive",
        }
    }

    /// Parse a case-insensitive difficulty label.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            "festive" => Some(Self::Festive),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Clue type tag. One generator is registered per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClueKind {
    Direction,
    Anagram,
    Emoji,
    Flag,
    Population,
    Geography,
    Greeting,
    #[serde(rename = "weirdfacts")]
    WeirdFacts,
    Family,
    FamilyImage,
    LandmarkImage,
    ArtImage,
    FestiveFacts,
    FestiveImage,
}

impl ClueKind {
    pub const ALL: [Self; 14] = [
        Self::Direction,
        Self::Anagram,
        Self::Emoji,
        Self::Flag,
        Self::Population,
        Self::Geography,
        Self::Greeting,
        Self::WeirdFacts,
        Self::Family,
        Self::FamilyImage,
        Self::LandmarkImage,
        Self::ArtImage,
        Self::FestiveFacts,
        Self::FestiveImage,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Direction => "direction",
            Self::Anagram => "anagram",
            Self::Emoji => "emoji",
            Self::Flag => "flag",
            Self::Population => "population",
            Self::Geography => "geography",
            Self::Greeting => "greeting",
            Self::WeirdFacts => "weirdfacts",
            Self::Family => "family",
            Self::FamilyImage => "family-image",
            Self::LandmarkImage => "landmark-image",
            Self::ArtImage => "art-image",
            Self::FestiveFacts => "festive-facts",
            Self::FestiveImage => "festive-image",
        }
    }
}

impl fmt::Display for ClueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Semantic role of a clue slot within a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClueRole {
    /// About the city the player is standing in.
    Current,
    /// About the final destination.
    Final,
    /// About a decoy city.
    RedHerring,
    /// Reserved fourth clue about the current city, revealed on demand.
    Hint,
}

impl fmt::Display for ClueRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Current => "current",
            Self::Final => "final",
            Self::RedHerring => "red-herring",
            Self::Hint => "hint",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagScope {
    Country,
    Region,
    City,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagRef {
    pub scope: FlagScope,
    pub symbol: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GreetingCategory {
    Hello,
    Welcome,
    Thanks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetingPhrase {
    pub category: GreetingCategory,
    pub phrase: String,
}

/// Angular precision of a direction clue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "precision", rename_all = "snake_case")]
pub enum Heading {
    Degrees { degrees: u16 },
    SixteenPoint { label: String },
    EightPoint { label: String },
}

/// Structured payload of a clue; rendering is left to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClueBody {
    Direction {
        from_city: String,
        heading: Heading,
    },
    Anagram {
        letters: String,
        decoy_count: u8,
    },
    Emoji {
        country: Vec<String>,
        city: Vec<String>,
    },
    Flag {
        flags: Vec<FlagRef>,
    },
    Population {
        city: u64,
        country: u64,
        city_dots: u8,
        country_dots: u8,
    },
    Geography {
        elevation_m: Option<i32>,
        distance_to_sea_km: Option<u32>,
        position_in_country: Option<String>,
    },
    Greeting {
        phrases: Vec<GreetingPhrase>,
    },
    Facts {
        facts: Vec<String>,
    },
    Text {
        text: String,
    },
    Image {
        subject: String,
        urls: Vec<String>,
    },
}

impl ClueBody {
    /// Plain-text rendering used as the clue's `text`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Direction { from_city, heading } => match heading {
                Heading::Degrees { degrees } => format!("{degrees}° from {from_city}"),
                Heading::SixteenPoint { label } | Heading::EightPoint { label } => {
                    format!("Head {label} from {from_city}")
                }
            },
            Self::Anagram { letters, .. } => format!("Unscramble: {letters}"),
            Self::Emoji { country, city } => format!("{} | {}", country.join(""), city.join("")),
            Self::Flag { flags } => flags
                .iter()
                .map(|flag| flag.symbol.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            Self::Population {
                city,
                country,
                city_dots,
                country_dots,
            } => format!(
                "City {} ({}) | Country {} ({})",
                format_thousands(*city),
                dots(*city_dots),
                format_thousands(*country),
                dots(*country_dots)
            ),
            Self::Geography {
                elevation_m,
                distance_to_sea_km,
                position_in_country,
            } => {
                let mut parts = Vec::new();
                if let Some(elevation) = elevation_m {
                    parts.push(format!("{elevation} m above sea level"));
                }
                if let Some(sea) = distance_to_sea_km {
                    if *sea == 0 {
                        parts.push("on the coast".to_string());
                    } else {
                        parts.push(format!("{sea} km from the sea"));
                    }
                }
                if let Some(position) = position_in_country {
                    parts.push(format!("in the {position} of the country"));
                }
                parts.join(", ")
            }
            Self::Greeting { phrases } => phrases
                .iter()
                .map(|p| format!("\"{}\"", p.phrase))
                .collect::<Vec<_>>()
                .join(" / "),
            Self::Facts { facts } => facts.join(" "),
            Self::Text { text } => text.clone(),
            Self::Image { subject, .. } => subject.clone(),
        }
    }

    /// First image URL carried by an image payload.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        match self {
            Self::Image { urls, .. } => urls.first().map(String::as_str),
            _ => None,
        }
    }
}

fn dots(filled: u8) -> String {
    let filled = usize::from(filled.min(crate::constants::POPULATION_DOT_SCALE));
    let empty = usize::from(crate::constants::POPULATION_DOT_SCALE) - filled;
    format!("{}{}", "●".repeat(filled), "○".repeat(empty))
}

/// Format an integer with comma thousands separators.
#[must_use]
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// A single clue shown (or reserved) at a stop.
///
/// `target_city_name` is the semantic subject, which is not necessarily the
/// stop the clue is displayed at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clue {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ClueKind,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub difficulty: Difficulty,
    pub is_red_herring: bool,
    pub target_city_name: String,
    pub target_country: String,
    pub body: ClueBody,
}

impl Clue {
    /// Build a clue about the context's target. The id is assigned by the caller.
    #[must_use]
    pub fn from_context(ctx: &ClueContext<'_>, kind: ClueKind, body: ClueBody) -> Self {
        Self {
            id: String::new(),
            kind,
            text: body.describe(),
            image_url: body.primary_image().map(str::to_string),
            difficulty: ctx.difficulty,
            is_red_herring: ctx.is_red_herring,
            target_city_name: ctx.target.name.clone(),
            target_country: ctx.target.country.clone(),
            body,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: String) -> Self {
        self.id = id;
        self
    }

    /// Whether the clue's subject is `city`.
    #[must_use]
    pub fn targets(&self, city: &City) -> bool {
        self.target_city_name == city.name && self.target_country == city.country
    }
}

/// Parameters for one generator call. Ephemeral; never persisted.
#[derive(Clone, Copy)]
pub struct ClueContext<'a> {
    /// Subject of the clue after role substitution.
    pub target: &'a City,
    pub previous: Option<&'a City>,
    pub final_city: &'a City,
    pub stop: usize,
    /// Generation difficulty; never [`Difficulty::Festive`].
    pub difficulty: Difficulty,
    pub is_red_herring: bool,
    pub red_herring_city: Option<&'a City>,
    pub date: NaiveDate,
    pub seed: &'a str,
    pub is_festive: bool,
    pub content: &'a ClueContent,
    pub images: &'a dyn ImageSource,
}

impl fmt::Debug for ClueContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClueContext")
            .field("target", &self.target.name)
            .field("previous", &self.previous.map(|c| c.name.as_str()))
            .field("final_city", &self.final_city.name)
            .field("stop", &self.stop)
            .field("difficulty", &self.difficulty)
            .field("is_red_herring", &self.is_red_herring)
            .field("date", &self.date)
            .field("is_festive", &self.is_festive)
            .finish_non_exhaustive()
    }
}

impl<'a> ClueContext<'a> {
    /// Copy of this context retargeted at `target`.
    #[must_use]
    pub fn retarget(&self, target: &'a City, is_red_herring: bool) -> Self {
        Self {
            target,
            is_red_herring,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn festive_generates_as_hard() {
        assert_eq!(Difficulty::Festive.for_generation(), Difficulty::Hard);
        assert_eq!(Difficulty::Easy.for_generation(), Difficulty::Easy);
        assert!(Difficulty::Festive.is_hard());
        assert!(!Difficulty::Medium.is_hard());
    }

    #[test]
    fn difficulty_keys_round_trip() {
        for difficulty in [
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Festive,
        ] {
            assert_eq!(Difficulty::from_key(difficulty.key()), Some(difficulty));
        }
        assert_eq!(Difficulty::from_key(" HARD "), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_key("nightmare"), None);
    }

    #[test]
    fn clue_kind_serializes_with_wire_names() {
        let json = serde_json::to_string(&ClueKind::WeirdFacts).unwrap();
        assert_eq!(json, "\"weirdfacts\"");
        let json = serde_json::to_string(&ClueKind::FamilyImage).unwrap();
        assert_eq!(json, "\"family-image\"");
        for kind in ClueKind::ALL {
            let encoded = serde_json::to_string(&kind).unwrap();
            assert_eq!(encoded, format!("\"{}\"", kind.key()));
        }
    }

    #[test]
    fn thousands_separator() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(2_148_271), "2,148,271");
    }

    #[test]
    fn population_body_describes_both_scales() {
        let body = ClueBody::Population {
            city: 1_500_000,
            country: 10_000_000,
            city_dots: 4,
            country_dots: 3,
        };
        assert_eq!(
            body.describe(),
            "City 1,500,000 (●●●●○) | Country 10,000,000 (●●●○○)"
        );
    }
}
