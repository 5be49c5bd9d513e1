use chrono::NaiveDate;
use waypoint_game::constants::ROUTE_LEN;
use waypoint_game::{
    CityRef, ClueKind, ConfigError, DataError, DataLoader, Difficulty, FestiveEntry,
    PuzzleConfig, PuzzleEngine, PuzzleError, PuzzleRequest, StaticDataLoader,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct PatchedConfig(PuzzleConfig);

impl DataLoader for PatchedConfig {
    type Error = DataError;

    fn load_cities(&self) -> Result<waypoint_game::CityCatalog, Self::Error> {
        StaticDataLoader.load_cities()
    }

    fn load_content(&self) -> Result<waypoint_game::ClueContent, Self::Error> {
        StaticDataLoader.load_content()
    }

    fn load_config(&self) -> Result<PuzzleConfig, Self::Error> {
        Ok(self.0.clone())
    }
}

fn route_names(engine: &mut PuzzleEngine<impl DataLoader>) -> Vec<String> {
    engine
        .generate_puzzle()
        .unwrap()
        .route()
        .iter()
        .map(|city| city.name.clone())
        .collect()
}

#[test]
fn fixed_festive_route_is_used_verbatim() {
    let mut engine = PuzzleEngine::new(
        StaticDataLoader,
        PuzzleRequest::daily(date(2025, 12, 24), Difficulty::Easy),
    );
    assert_eq!(
        route_names(&mut engine),
        ["Vienna", "Salzburg", "Munich", "Strasbourg", "Cologne"]
    );
    assert!(engine.is_festive());

    let puzzle = engine.puzzle().unwrap();
    assert_eq!(puzzle.difficulty, Difficulty::Festive);
    assert!(puzzle.is_festive());
    assert_eq!(puzzle.seed, "2025-12-243");

    let festive_kinds = puzzle
        .locations
        .iter()
        .flat_map(|location| location.clues.iter())
        .filter(|clue| matches!(clue.kind, ClueKind::FestiveFacts | ClueKind::FestiveImage))
        .count();
    assert!(festive_kinds > 0);
    assert!(
        puzzle
            .locations
            .iter()
            .flat_map(|location| location.clues.iter())
            .all(|clue| clue.kind != ClueKind::Emoji)
    );
}

#[test]
fn festive_overrides_requested_difficulty() {
    let easy = {
        let mut engine = PuzzleEngine::new(
            StaticDataLoader,
            PuzzleRequest::daily(date(2025, 12, 24), Difficulty::Easy),
        );
        engine.generate_puzzle().unwrap().clone()
    };
    let hard = {
        let mut engine = PuzzleEngine::new(
            StaticDataLoader,
            PuzzleRequest::daily(date(2025, 12, 24), Difficulty::Hard),
        );
        engine.generate_puzzle().unwrap().clone()
    };
    assert_eq!(easy, hard);
}

#[test]
fn anchored_festive_route_uses_hidden_final_city() {
    let mut engine = PuzzleEngine::new(
        StaticDataLoader,
        PuzzleRequest::daily(date(2025, 12, 25), Difficulty::Medium),
    );
    engine.initialize().unwrap();
    assert!(
        engine
            .visible_cities()
            .iter()
            .all(|city| city.name != "Rovaniemi")
    );

    let names = route_names(&mut engine);
    assert_eq!(names.len(), ROUTE_LEN);
    assert_eq!(names.first().map(String::as_str), Some("Stockholm"));
    assert_eq!(names.last().map(String::as_str), Some("Rovaniemi"));
    for (i, name) in names.iter().enumerate() {
        assert!(!names[i + 1..].contains(name), "{name} repeated");
    }
}

#[test]
fn day_before_festive_is_ordinary() {
    let mut engine = PuzzleEngine::new(
        StaticDataLoader,
        PuzzleRequest::daily(date(2025, 12, 23), Difficulty::Easy),
    );
    let puzzle = engine.generate_puzzle().unwrap();
    assert_eq!(puzzle.difficulty, Difficulty::Easy);
    assert!(!engine.is_festive());
}

#[test]
fn missing_festive_city_is_a_configuration_error() {
    let mut config = StaticDataLoader.load_config().unwrap();
    config.festive.push(FestiveEntry {
        date: date(2025, 7, 4),
        final_city: CityRef::new("Atlantis", "Ocean"),
        start_city: None,
        route: None,
    });
    let mut engine = PuzzleEngine::new(
        PatchedConfig(config),
        PuzzleRequest::daily(date(2025, 7, 4), Difficulty::Easy),
    );
    let err = engine.generate_puzzle().unwrap_err();
    assert!(matches!(
        &err,
        PuzzleError::FestiveCityMissing { name, .. } if name == "Atlantis"
    ));
    assert!(err.is_configuration());
}

fn engine_with_fixed_route(route: &[(&str, &str)]) -> PuzzleEngine<PatchedConfig> {
    let mut config = StaticDataLoader.load_config().unwrap();
    config.festive.push(FestiveEntry {
        date: date(2026, 3, 3),
        final_city: CityRef::new("Cologne", "Germany"),
        start_city: None,
        route: Some(
            route
                .iter()
                .map(|(name, country)| CityRef::new(name, country))
                .collect(),
        ),
    });
    PuzzleEngine::new(
        PatchedConfig(config),
        PuzzleRequest::daily(date(2026, 3, 3), Difficulty::Medium),
    )
}

#[test]
fn fixed_route_with_repeated_city_is_rejected() {
    let mut engine = engine_with_fixed_route(&[
        ("Vienna", "Austria"),
        ("Vienna", "Austria"),
        ("Munich", "Germany"),
        ("Munich", "Germany"),
        ("Cologne", "Germany"),
    ]);
    let err = engine.generate_puzzle().unwrap_err();
    assert!(matches!(
        &err,
        PuzzleError::Config(ConfigError::FestiveRouteRepeats { date, name })
            if date == "2026-03-03" && name == "Vienna"
    ));
    assert!(err.is_configuration());
}

#[test]
fn fixed_route_must_finish_at_its_final_city() {
    let mut engine = engine_with_fixed_route(&[
        ("Vienna", "Austria"),
        ("Salzburg", "Austria"),
        ("Munich", "Germany"),
        ("Strasbourg", "France"),
        ("Zurich", "Switzerland"),
    ]);
    let err = engine.generate_puzzle().unwrap_err();
    assert!(matches!(
        &err,
        PuzzleError::Config(ConfigError::FestiveFinalMismatch { expected, found, .. })
            if expected == "Cologne" && found == "Zurich"
    ));
}
