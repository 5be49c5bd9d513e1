//! Puzzle engine facade: lifecycle, generation, guesses, hints and scoring.
use chrono::NaiveDate;
use log::info;
use std::collections::BTreeSet;
use std::fmt;

use crate::city::{City, CityCatalog};
use crate::clue::{Clue, Difficulty};
use crate::config::PuzzleConfig;
use crate::constants::ROUTE_LEN;
use crate::content::ClueContent;
use crate::distribution::{ClueDistributor, DistributionContext, generate_hint};
use crate::error::PuzzleError;
use crate::festive::{FestivePlan, entry_for};
use crate::puzzle::{GuessOutcome, GuessPosition, Location, Puzzle};
use crate::route::RouteSelector;
use crate::score::{ScoreBreakdown, calculate_score};
use crate::seed::{PuzzleRng, date_seed, full_seed};
use crate::{CatalogImages, DataLoader, ImageSource};

/// What to generate: a seed string, the puzzle date and the requested difficulty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleRequest {
    pub seed: String,
    pub date: NaiveDate,
    pub difficulty: Difficulty,
}

impl PuzzleRequest {
    #[must_use]
    pub fn new(seed: impl Into<String>, date: NaiveDate, difficulty: Difficulty) -> Self {
        Self {
            seed: seed.into(),
            date,
            difficulty,
        }
    }

    /// The daily puzzle: seeded by the ISO date itself.
    #[must_use]
    pub fn daily(date: NaiveDate, difficulty: Difficulty) -> Self {
        Self::new(date_seed(date), date, difficulty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    Uninitialized,
    Initializing,
    Initialized,
    Generated,
}

/// Data loaded once per engine.
#[derive(Debug, Clone)]
struct SessionData {
    catalog: CityCatalog,
    content: ClueContent,
    config: PuzzleConfig,
    visible: Vec<City>,
}

/// Lifecycle owner for one puzzle request.
pub struct PuzzleEngine<L: DataLoader> {
    loader: L,
    images: Box<dyn ImageSource>,
    request: PuzzleRequest,
    phase: EnginePhase,
    data: Option<SessionData>,
    puzzle: Option<Puzzle>,
    revealed_hints: BTreeSet<usize>,
    extra_hints: BTreeSet<usize>,
}

impl<L: DataLoader> fmt::Debug for PuzzleEngine<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PuzzleEngine")
            .field("request", &self.request)
            .field("phase", &self.phase)
            .field("generated", &self.puzzle.is_some())
            .field("hints_used", &self.hints_used())
            .finish_non_exhaustive()
    }
}

impl<L: DataLoader> PuzzleEngine<L> {
    /// Engine serving images from the city dataset.
    pub fn new(loader: L, request: PuzzleRequest) -> Self {
        Self::with_images(loader, request, CatalogImages)
    }

    pub fn with_images(
        loader: L,
        request: PuzzleRequest,
        images: impl ImageSource + 'static,
    ) -> Self {
        Self {
            loader,
            images: Box::new(images),
            request,
            phase: EnginePhase::Uninitialized,
            data: None,
            puzzle: None,
            revealed_hints: BTreeSet::new(),
            extra_hints: BTreeSet::new(),
        }
    }

    #[must_use]
    pub const fn request(&self) -> &PuzzleRequest {
        &self.request
    }

    #[must_use]
    pub const fn phase(&self) -> EnginePhase {
        self.phase
    }

    #[must_use]
    pub const fn puzzle(&self) -> Option<&Puzzle> {
        self.puzzle.as_ref()
    }

    /// Cities eligible for this puzzle's date; empty before initialization.
    #[must_use]
    pub fn visible_cities(&self) -> &[City] {
        self.data.as_ref().map_or(&[], |data| data.visible.as_slice())
    }

    /// Load and validate the catalog, content and configuration. Repeated
    /// calls after success do nothing.
    ///
    /// # Errors
    ///
    /// Returns `PuzzleError::DataLoad` when a loader fails and
    /// `PuzzleError::Config` when the configuration is invalid.
    pub fn initialize(&mut self) -> Result<(), PuzzleError> {
        if matches!(
            self.phase,
            EnginePhase::Initialized | EnginePhase::Generated
        ) {
            return Ok(());
        }
        self.phase = EnginePhase::Initializing;
        match self.load() {
            Ok(data) => {
                info!(
                    "loaded {} cities ({} visible on {})",
                    data.catalog.len(),
                    data.visible.len(),
                    self.request.date
                );
                self.data = Some(data);
                self.phase = EnginePhase::Initialized;
                Ok(())
            }
            Err(err) => {
                self.phase = EnginePhase::Uninitialized;
                Err(err)
            }
        }
    }

    fn load(&self) -> Result<SessionData, PuzzleError> {
        let catalog = self.loader.load_cities().map_err(PuzzleError::data_load)?;
        let content = self.loader.load_content().map_err(PuzzleError::data_load)?;
        let config = self.loader.load_config().map_err(PuzzleError::data_load)?;
        config.validate()?;
        let visible = catalog.filter_visible(self.request.date);
        Ok(SessionData {
            catalog,
            content,
            config,
            visible,
        })
    }

    /// Whether the request date is on the festive calendar.
    #[must_use]
    pub fn is_festive(&self) -> bool {
        self.data
            .as_ref()
            .is_some_and(|data| entry_for(&data.config.festive, self.request.date).is_some())
    }

    /// Difficulty shown to the player: festive dates override the request,
    /// and a festive request on an ordinary date plays as hard.
    #[must_use]
    pub fn display_difficulty(&self) -> Difficulty {
        if self.is_festive() {
            Difficulty::Festive
        } else {
            self.request.difficulty.for_generation()
        }
    }

    /// Generate the puzzle, initializing first if needed. Later calls return
    /// the cached puzzle.
    ///
    /// # Errors
    ///
    /// Returns any initialization error, `PuzzleError::FestiveCityMissing`
    /// or `PuzzleError::CatalogExhausted` for configuration problems, and
    /// `PuzzleError::IncompleteStop` when a clue slot cannot be filled.
    pub fn generate_puzzle(&mut self) -> Result<&Puzzle, PuzzleError> {
        if self.puzzle.is_none() {
            self.initialize()?;
            let puzzle = self.build()?;
            self.puzzle = Some(puzzle);
            self.phase = EnginePhase::Generated;
        }
        self.puzzle.as_ref().ok_or(PuzzleError::NotInitialized)
    }

    fn build(&self) -> Result<Puzzle, PuzzleError> {
        let data = self.data.as_ref().ok_or(PuzzleError::NotInitialized)?;
        let date = self.request.date;
        let difficulty = self.display_difficulty();
        let seed = full_seed(
            &self.request.seed,
            difficulty,
            &data.config.difficulty_offsets,
        );
        info!("generating {difficulty} puzzle for {date} with seed {seed}");
        let mut rng = PuzzleRng::from_seed_str(&seed);

        let selector = RouteSelector::new(data.config.max_hop_km, &data.config.port_connections);
        let route = match entry_for(&data.config.festive, date) {
            Some(entry) => {
                info!("festive date {date}: using curated route");
                match entry.resolve(&data.catalog)? {
                    FestivePlan::Fixed(route) => route,
                    FestivePlan::Anchored { start, final_city } => selector
                        .select_anchored_route(
                            &mut rng,
                            &data.visible,
                            ROUTE_LEN,
                            start.as_ref(),
                            &final_city,
                        )?,
                }
            }
            None => selector.select_route(&mut rng, &data.visible, ROUTE_LEN)?,
        };

        let ctx = DistributionContext {
            route: &route,
            pool: &data.visible,
            content: &data.content,
            images: self.images.as_ref(),
            date,
            seed: &seed,
            difficulty,
            is_festive: difficulty == Difficulty::Festive,
            red_herring_far_pool: data.config.red_herring_far_pool,
            red_herring_near_window: data.config.red_herring_near_window,
        };
        let mut distributor = ClueDistributor::new(ctx, &mut rng);
        let stops = distributor.distribute(&mut rng)?;

        let locations = route
            .iter()
            .cloned()
            .zip(stops)
            .enumerate()
            .map(|(stop, (city, clues))| {
                let mut location = Location::new(stop, city, clues);
                if stop == 0 {
                    location.is_guessed = true;
                    location.is_correct = Some(true);
                }
                location
            })
            .collect();

        Ok(Puzzle {
            seed,
            date,
            difficulty,
            locations,
        })
    }

    /// Cities a guess can resolve to: the visible pool plus any route city
    /// unlocked early by a festive itinerary.
    fn guess_pool(&self) -> Vec<&City> {
        let Some(data) = self.data.as_ref() else {
            return Vec::new();
        };
        let mut pool: Vec<&City> = data.visible.iter().collect();
        if let Some(puzzle) = self.puzzle.as_ref() {
            for city in puzzle.route() {
                if !pool.iter().any(|known| known.same_city(city)) {
                    pool.push(city);
                }
            }
        }
        pool
    }

    /// Nearest known city to a point, if it lies within the guess radius.
    /// Returns `None` before initialization.
    #[must_use]
    pub fn find_closest_city(&self, lat: f64, lng: f64) -> Option<&City> {
        let radius = self.data.as_ref()?.config.guess_radius_km;
        self.guess_pool()
            .into_iter()
            .map(|city| (city, city.distance_to_point(lat, lng)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .filter(|(_, distance)| *distance <= radius)
            .map(|(city, _)| city)
    }

    /// A guess is correct when it lies within the guess radius of the true
    /// city and no other known city is as close. Returns `false` before
    /// initialization.
    #[must_use]
    pub fn check_guess(&self, location: &Location, lat: f64, lng: f64) -> bool {
        let Some(data) = self.data.as_ref() else {
            return false;
        };
        let distance = location.city.distance_to_point(lat, lng);
        if distance > data.config.guess_radius_km {
            return false;
        }
        self.guess_pool()
            .into_iter()
            .filter(|city| !city.same_city(&location.city))
            .all(|city| city.distance_to_point(lat, lng) > distance)
    }

    /// Record a guess for `stop` on the generated puzzle.
    ///
    /// # Errors
    ///
    /// Returns `PuzzleError::NotInitialized` before generation and
    /// `PuzzleError::InvalidStop` for an unknown stop.
    pub fn submit_guess(
        &mut self,
        stop: usize,
        lat: f64,
        lng: f64,
    ) -> Result<GuessOutcome, PuzzleError> {
        let puzzle = self.puzzle.as_ref().ok_or(PuzzleError::NotInitialized)?;
        let location = puzzle
            .location(stop)
            .ok_or(PuzzleError::InvalidStop { stop })?;
        let correct = self.check_guess(location, lat, lng);
        let distance_km = location.city.distance_to_point(lat, lng);
        let closest_city = self.find_closest_city(lat, lng).cloned();

        let location = self
            .puzzle
            .as_mut()
            .and_then(|puzzle| puzzle.locations.get_mut(stop))
            .ok_or(PuzzleError::InvalidStop { stop })?;
        location.is_guessed = true;
        location.guess_position = Some(GuessPosition { lat, lng });
        location.is_correct = Some(correct);
        location.closest_city.clone_from(&closest_city);

        Ok(GuessOutcome {
            stop,
            correct,
            distance_km,
            closest_city,
        })
    }

    /// Reveal the reserved hint of a waypoint stop. Each stop's hint counts
    /// once toward the penalty.
    ///
    /// # Errors
    ///
    /// Returns `PuzzleError::NotInitialized` before generation and
    /// `PuzzleError::InvalidStop` for an unknown stop.
    pub fn reveal_hint(&mut self, stop: usize) -> Result<Option<Clue>, PuzzleError> {
        let puzzle = self.puzzle.as_ref().ok_or(PuzzleError::NotInitialized)?;
        let hint = puzzle
            .location(stop)
            .ok_or(PuzzleError::InvalidStop { stop })?
            .hint_clue()
            .cloned();
        if hint.is_some() {
            self.revealed_hints.insert(stop);
        }
        Ok(hint)
    }

    /// Produce an additional hint for `stop` from the independent hint stream.
    /// `None` means every applicable type is already in use at that stop.
    ///
    /// # Errors
    ///
    /// Returns `PuzzleError::NotInitialized` before generation and
    /// `PuzzleError::InvalidStop` for an unknown stop.
    pub fn generate_hint(&mut self, stop: usize) -> Result<Option<Clue>, PuzzleError> {
        let puzzle = self.puzzle.as_ref().ok_or(PuzzleError::NotInitialized)?;
        let data = self.data.as_ref().ok_or(PuzzleError::NotInitialized)?;
        let location = puzzle
            .location(stop)
            .ok_or(PuzzleError::InvalidStop { stop })?;
        let route: Vec<City> = puzzle.route().into_iter().cloned().collect();
        let ctx = DistributionContext {
            route: &route,
            pool: &data.visible,
            content: &data.content,
            images: self.images.as_ref(),
            date: puzzle.date,
            seed: &puzzle.seed,
            difficulty: puzzle.difficulty,
            is_festive: puzzle.is_festive(),
            red_herring_far_pool: data.config.red_herring_far_pool,
            red_herring_near_window: data.config.red_herring_near_window,
        };
        let mut rng = PuzzleRng::for_hint(&puzzle.seed, stop);
        let hint = generate_hint(&ctx, stop, &location.clues, &mut rng)?;
        if hint.is_some() {
            self.extra_hints.insert(stop);
        }
        Ok(hint)
    }

    /// Hints revealed or generated so far, one per stop and source.
    #[must_use]
    pub fn hints_used(&self) -> u32 {
        let used = self.revealed_hints.len() + self.extra_hints.len();
        u32::try_from(used).unwrap_or(u32::MAX)
    }

    /// Score of the generated puzzle; zero before generation.
    #[must_use]
    pub fn calculate_score(&self) -> ScoreBreakdown {
        self.puzzle.as_ref().map_or_else(ScoreBreakdown::default, |puzzle| {
            calculate_score(&puzzle.locations, puzzle.difficulty, self.hints_used())
        })
    }
}
