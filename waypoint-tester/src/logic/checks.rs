//! Puzzle invariant checks. Each returns human-readable failures.
use std::collections::BTreeSet;
use std::hash::Hasher;

use twox_hash::XxHash64;
use waypoint_game::constants::{FINAL_STOP, ROUTE_LEN, WAYPOINT_CLUE_COUNT};
use waypoint_game::{ClueKind, DataLoader, Puzzle, PuzzleEngine};

pub fn check_shape(puzzle: &Puzzle) -> Vec<String> {
    let mut failures = Vec::new();
    if puzzle.locations.len() != ROUTE_LEN {
        failures.push(format!(
            "route has {} stops, expected {ROUTE_LEN}",
            puzzle.locations.len()
        ));
    }
    for location in &puzzle.locations {
        let expected = if location.id == 0 || location.id >= FINAL_STOP {
            1
        } else {
            WAYPOINT_CLUE_COUNT
        };
        if location.clues.len() != expected {
            failures.push(format!(
                "stop {} has {} clues, expected {expected}",
                location.id,
                location.clues.len()
            ));
        }
    }
    let route = puzzle.route();
    for (i, city) in route.iter().enumerate() {
        if route[i + 1..].iter().any(|other| other.same_city(city)) {
            failures.push(format!("{} appears twice in the route", city.name));
        }
    }
    failures
}

pub fn check_distinct_types(puzzle: &Puzzle) -> Vec<String> {
    puzzle
        .locations
        .iter()
        .filter_map(|location| {
            let kinds: BTreeSet<ClueKind> = location.clues.iter().map(|c| c.kind).collect();
            (kinds.len() != location.clues.len())
                .then(|| format!("stop {} repeats a clue type", location.id))
        })
        .collect()
}

pub fn check_final_uniqueness(puzzle: &Puzzle) -> Vec<String> {
    let Some(final_city) = puzzle.final_city() else {
        return vec!["puzzle has no final city".to_string()];
    };
    let mut seen = BTreeSet::new();
    let mut failures = Vec::new();
    for location in &puzzle.locations {
        for clue in location
            .clues
            .iter()
            .filter(|clue| !clue.is_red_herring && clue.targets(final_city))
        {
            if !seen.insert(clue.kind) {
                failures.push(format!(
                    "final destination clue type {} reused at stop {}",
                    clue.kind, location.id
                ));
            }
        }
    }
    failures
}

pub fn check_red_herrings(puzzle: &Puzzle) -> Vec<String> {
    let mut failures = Vec::new();
    let stops = puzzle.red_herring_stops();
    if stops.len() != 2 {
        failures.push(format!("expected 2 red herring stops, found {stops:?}"));
    }
    if stops.iter().any(|stop| *stop >= FINAL_STOP) {
        failures.push("the final stop carries a red herring".to_string());
    }
    let route = puzzle.route();
    for location in &puzzle.locations {
        for clue in location.clues.iter().filter(|clue| clue.is_red_herring) {
            if route.iter().any(|city| clue.targets(city)) {
                failures.push(format!(
                    "red herring at stop {} points at route city {}",
                    location.id, clue.target_city_name
                ));
            }
        }
    }
    failures
}

pub fn check_hints(puzzle: &Puzzle) -> Vec<String> {
    puzzle
        .locations
        .iter()
        .filter_map(|location| {
            let hint = location.hint_clue()?;
            (hint.is_red_herring || !hint.targets(&location.city)).then(|| {
                format!(
                    "hint at stop {} does not describe {}",
                    location.id, location.city.name
                )
            })
        })
        .collect()
}

pub fn puzzle_hash(puzzle: &Puzzle) -> u64 {
    let bytes = serde_json::to_vec(puzzle).unwrap_or_default();
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(&bytes);
    hasher.finish()
}

/// Regenerating from a fresh engine must give an identical puzzle.
pub fn check_determinism<L: DataLoader>(puzzle: &Puzzle, mut fresh: PuzzleEngine<L>) -> Vec<String> {
    match fresh.generate_puzzle() {
        Ok(again) if puzzle_hash(again) == puzzle_hash(puzzle) => Vec::new(),
        Ok(_) => vec!["regenerated puzzle differs".to_string()],
        Err(err) => vec![format!("regeneration failed: {err}")],
    }
}

/// Each stop's own coordinates resolve back to that city and score as correct.
pub fn check_closest_city<L: DataLoader>(puzzle: &Puzzle, engine: &PuzzleEngine<L>) -> Vec<String> {
    let mut failures = Vec::new();
    for location in &puzzle.locations {
        let (lat, lng) = (location.city.lat, location.city.lng);
        match engine.find_closest_city(lat, lng) {
            Some(city) if city.same_city(&location.city) => {}
            Some(city) => failures.push(format!(
                "closest city to {} resolved to {}",
                location.city.name, city.name
            )),
            None => failures.push(format!("no closest city for {}", location.city.name)),
        }
        if !engine.check_guess(location, lat, lng) {
            failures.push(format!(
                "exact guess on {} was marked wrong",
                location.city.name
            ));
        }
    }
    failures
}
