//! Puzzle output records handed to the presentation layer.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::city::City;
use crate::clue::{Clue, Difficulty};
use crate::constants::{VISIBLE_WAYPOINT_CLUES, WAYPOINT_CLUE_COUNT};

/// Map point placed by the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuessPosition {
    pub lat: f64,
    pub lng: f64,
}

/// One stop of the route with its clues and guess state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Stop index, 0 through 4.
    pub id: usize,
    pub city: City,
    pub clues: SmallVec<[Clue; WAYPOINT_CLUE_COUNT]>,
    pub is_guessed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guess_position: Option<GuessPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closest_city: Option<City>,
}

impl Location {
    #[must_use]
    pub fn new(id: usize, city: City, clues: Vec<Clue>) -> Self {
        Self {
            id,
            city,
            clues: SmallVec::from_vec(clues),
            is_guessed: false,
            guess_position: None,
            is_correct: None,
            closest_city: None,
        }
    }

    /// Clues shown up front; the reserved hint is excluded.
    #[must_use]
    pub fn visible_clues(&self) -> &[Clue] {
        if self.clues.len() == WAYPOINT_CLUE_COUNT {
            &self.clues[..VISIBLE_WAYPOINT_CLUES]
        } else {
            &self.clues
        }
    }

    /// Reserved hint clue of a waypoint stop.
    #[must_use]
    pub fn hint_clue(&self) -> Option<&Clue> {
        if self.clues.len() == WAYPOINT_CLUE_COUNT {
            self.clues.last()
        } else {
            None
        }
    }

    #[must_use]
    pub fn has_red_herring(&self) -> bool {
        self.clues.iter().any(|clue| clue.is_red_herring)
    }
}

/// A generated daily puzzle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle {
    /// Seed the stream was keyed with (date seed plus difficulty offset).
    pub seed: String,
    pub date: NaiveDate,
    /// Displayed difficulty; festive puzzles generate as hard.
    pub difficulty: Difficulty,
    pub locations: Vec<Location>,
}

impl Puzzle {
    #[must_use]
    pub fn route(&self) -> Vec<&City> {
        self.locations.iter().map(|location| &location.city).collect()
    }

    #[must_use]
    pub fn final_city(&self) -> Option<&City> {
        self.locations.last().map(|location| &location.city)
    }

    #[must_use]
    pub fn location(&self, stop: usize) -> Option<&Location> {
        self.locations.get(stop)
    }

    /// Stops whose clues include a red herring.
    #[must_use]
    pub fn red_herring_stops(&self) -> Vec<usize> {
        self.locations
            .iter()
            .filter(|location| location.has_red_herring())
            .map(|location| location.id)
            .collect()
    }

    #[must_use]
    pub const fn is_festive(&self) -> bool {
        matches!(self.difficulty, Difficulty::Festive)
    }
}

/// Result of a submitted guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessOutcome {
    pub stop: usize,
    pub correct: bool,
    /// Distance from the guess to the stop's true city.
    pub distance_km: f64,
    pub closest_city: Option<City>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clue::{ClueBody, ClueKind};

    fn clue(kind: ClueKind, is_red_herring: bool) -> Clue {
        Clue {
            id: format!("1-{kind}"),
            kind,
            text: String::new(),
            image_url: None,
            difficulty: Difficulty::Easy,
            is_red_herring,
            target_city_name: "Ghent".into(),
            target_country: "Belgium".into(),
            body: ClueBody::Text {
                text: String::new(),
            },
        }
    }

    #[test]
    fn hint_is_the_reserved_fourth_clue() {
        let city = City::new("Ghent", "Belgium", 51.0543, 3.7174);
        let location = Location::new(
            1,
            city.clone(),
            vec![
                clue(ClueKind::Anagram, false),
                clue(ClueKind::Flag, true),
                clue(ClueKind::Population, false),
                clue(ClueKind::Geography, false),
            ],
        );
        assert_eq!(location.visible_clues().len(), 3);
        assert_eq!(location.hint_clue().unwrap().kind, ClueKind::Geography);
        assert!(location.has_red_herring());

        let start = Location::new(0, city, vec![clue(ClueKind::Anagram, false)]);
        assert_eq!(start.visible_clues().len(), 1);
        assert!(start.hint_clue().is_none());
    }

    #[test]
    fn location_serializes_camel_case() {
        let city = City::new("Ghent", "Belgium", 51.0543, 3.7174);
        let mut location = Location::new(2, city, vec![clue(ClueKind::Anagram, false)]);
        location.is_guessed = true;
        location.guess_position = Some(GuessPosition {
            lat: 51.0,
            lng: 3.7,
        });
        let json = serde_json::to_value(&location).unwrap();
        assert_eq!(json["isGuessed"], true);
        assert_eq!(json["guessPosition"]["lat"], 51.0);
        assert_eq!(json["clues"][0]["type"], "anagram");
        assert_eq!(json["clues"][0]["isRedHerring"], false);
        assert!(json.get("closestCity").is_none());
    }
}
