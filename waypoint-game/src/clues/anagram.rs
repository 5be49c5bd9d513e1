use regex::Regex;
use std::sync::OnceLock;

use crate::clue::{Clue, ClueBody, ClueContext, ClueKind, Difficulty};
use crate::constants::{ANAGRAM_DECOY_ALPHABET, ANAGRAM_MAX_ATTEMPTS, ANAGRAM_MIN_SCRAMBLE_RATIO};
use crate::numbers::usize_to_f64;
use crate::seed::PuzzleRng;

use super::ClueGenerator;

/// The target's name with its letters shuffled among a few decoys.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnagramClue;

fn non_letters() -> Option<&'static Regex> {
    static NON_LETTERS: OnceLock<Option<Regex>> = OnceLock::new();
    NON_LETTERS
        .get_or_init(|| Regex::new(r"[^A-Z]").ok())
        .as_ref()
}

fn fold_accent(ch: char) -> &'static str {
    match ch {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ą' | 'Ă' => "A",
        'Æ' => "AE",
        'Ç' | 'Ć' | 'Č' => "C",
        'Ď' | 'Đ' => "D",
        'È' | 'É' | 'Ê' | 'Ë' | 'Ę' | 'Ě' => "E",
        'Ğ' => "G",
        'Ì' | 'Í' | 'Î' | 'Ï' | 'İ' => "I",
        'Ł' => "L",
        'Ñ' | 'Ń' | 'Ň' => "N",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ő' => "O",
        'Œ' => "OE",
        'Ř' => "R",
        'Ś' | 'Š' | 'Ş' | 'Ș' => "S",
        'ẞ' => "SS",
        'Ť' | 'Ț' => "T",
        'Þ' => "TH",
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ů' | 'Ű' => "U",
        'Ý' | 'Ÿ' => "Y",
        'Ź' | 'Ż' | 'Ž' => "Z",
        _ => "",
    }
}

/// Uppercase ASCII letters of `name` with accents folded and everything else removed.
#[must_use]
pub fn normalize_letters(name: &str) -> String {
    let mut folded = String::with_capacity(name.len());
    for ch in name.chars().flat_map(char::to_uppercase) {
        if ch.is_ascii() {
            folded.push(ch);
        } else {
            folded.push_str(fold_accent(ch));
        }
    }
    match non_letters() {
        Some(re) => re.replace_all(&folded, "").into_owned(),
        None => folded.chars().filter(char::is_ascii_uppercase).collect(),
    }
}

/// Share of the original letters no longer at their original position.
#[must_use]
pub fn scramble_ratio(original: &[u8], scrambled: &[u8]) -> f64 {
    if original.is_empty() {
        return 0.0;
    }
    let in_place = original
        .iter()
        .zip(scrambled)
        .filter(|(a, b)| a == b)
        .count();
    usize_to_f64(original.len() - in_place) / usize_to_f64(original.len())
}

fn decoy_count(difficulty: Difficulty, rng: &mut PuzzleRng) -> usize {
    match difficulty.for_generation() {
        Difficulty::Easy => 1,
        Difficulty::Medium => 2 + rng.pick_index(2),
        Difficulty::Hard | Difficulty::Festive => 4 + rng.pick_index(2),
    }
}

fn scramble(letters: &[u8], difficulty: Difficulty, rng: &mut PuzzleRng) -> (Vec<u8>, usize) {
    let decoys = decoy_count(difficulty, rng);
    let mut pool = letters.to_vec();
    for _ in 0..decoys {
        if let Some(letter) = rng.pick(ANAGRAM_DECOY_ALPHABET) {
            pool.push(*letter);
        }
    }

    let mut best = pool.clone();
    let mut best_ratio = -1.0;
    for _ in 0..ANAGRAM_MAX_ATTEMPTS {
        let mut candidate = pool.clone();
        rng.shuffle(&mut candidate);
        let ratio = scramble_ratio(letters, &candidate);
        if ratio > best_ratio {
            best_ratio = ratio;
            best = candidate;
        }
        if best_ratio >= ANAGRAM_MIN_SCRAMBLE_RATIO {
            break;
        }
    }
    (best, decoys)
}

impl ClueGenerator for AnagramClue {
    fn kind(&self) -> ClueKind {
        ClueKind::Anagram
    }

    fn can_generate(&self, ctx: &ClueContext<'_>) -> bool {
        !normalize_letters(&ctx.target.name).is_empty()
    }

    fn generate(&self, ctx: &ClueContext<'_>, rng: &mut PuzzleRng) -> Option<Clue> {
        let letters = normalize_letters(&ctx.target.name);
        if letters.is_empty() {
            return None;
        }
        let (scrambled, decoys) = scramble(letters.as_bytes(), ctx.difficulty, rng);
        let body = ClueBody::Anagram {
            letters: String::from_utf8_lossy(&scrambled).into_owned(),
            decoy_count: u8::try_from(decoys).unwrap_or(u8::MAX),
        };
        Some(Clue::from_context(ctx, ClueKind::Anagram, body))
    }
}
