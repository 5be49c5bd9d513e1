//! Clue distribution: assigns roles to each stop's clue slots and fills them
//! from the registered generators under the per-stop and puzzle-wide
//! uniqueness rules.
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::collections::BTreeSet;

use crate::ImageSource;
use crate::city::City;
use crate::clue::{Clue, ClueContext, ClueKind, ClueRole, Difficulty};
use crate::clues::ClueRegistry;
use crate::constants::{
    FINAL_STOP, RED_HERRING_CANDIDATE_STOPS, RED_HERRING_STOP_COUNT, ROUTE_LEN,
    VISIBLE_WAYPOINT_CLUES,
};
use crate::content::ClueContent;
use crate::error::PuzzleError;
use crate::numbers::{floor_f64_to_usize, usize_to_f64};
use crate::seed::PuzzleRng;

const FINAL_ONLY: [ClueRole; 1] = [ClueRole::Final];
const RED_HERRING_ONLY: [ClueRole; 1] = [ClueRole::RedHerring];
const WAYPOINT_WITH_RED_HERRING: [ClueRole; 4] = [
    ClueRole::Current,
    ClueRole::Final,
    ClueRole::RedHerring,
    ClueRole::Hint,
];
const WAYPOINT: [ClueRole; 4] = [
    ClueRole::Current,
    ClueRole::Current,
    ClueRole::Final,
    ClueRole::Hint,
];

/// Role table for a stop. The start city is revealed, so stop 0 only carries
/// its destination (or red-herring) clue.
#[must_use]
pub const fn roles_for(stop: usize, has_red_herring: bool) -> &'static [ClueRole] {
    match (stop, has_red_herring) {
        (0, false) => &FINAL_ONLY,
        (0, true) => &RED_HERRING_ONLY,
        (s, _) if s >= FINAL_STOP => &FINAL_ONLY,
        (_, true) => &WAYPOINT_WITH_RED_HERRING,
        (_, false) => &WAYPOINT,
    }
}

/// Puzzle-wide inputs shared by every stop.
#[derive(Clone, Copy)]
pub struct DistributionContext<'a> {
    pub route: &'a [City],
    /// Visible cities red herrings are drawn from.
    pub pool: &'a [City],
    pub content: &'a ClueContent,
    pub images: &'a dyn ImageSource,
    pub date: NaiveDate,
    pub seed: &'a str,
    pub difficulty: Difficulty,
    pub is_festive: bool,
    pub red_herring_far_pool: usize,
    pub red_herring_near_window: usize,
}

impl std::fmt::Debug for DistributionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistributionContext")
            .field(
                "route",
                &self.route.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            )
            .field("pool", &self.pool.len())
            .field("date", &self.date)
            .field("difficulty", &self.difficulty)
            .field("is_festive", &self.is_festive)
            .finish_non_exhaustive()
    }
}

impl<'a> DistributionContext<'a> {
    fn final_city(&self) -> Option<&'a City> {
        self.route.last()
    }

    /// Base context for `stop`: the stop's own city, never a red herring.
    fn stop_context(&self, stop: usize) -> Result<ClueContext<'a>, PuzzleError> {
        let target = self.route.get(stop).ok_or(PuzzleError::InvalidStop { stop })?;
        let final_city = self.final_city().ok_or(PuzzleError::InvalidStop { stop })?;
        Ok(ClueContext {
            target,
            previous: stop.checked_sub(1).and_then(|prev| self.route.get(prev)),
            final_city,
            stop,
            difficulty: self.difficulty.for_generation(),
            is_red_herring: false,
            red_herring_city: None,
            date: self.date,
            seed: self.seed,
            is_festive: self.is_festive,
            content: self.content,
            images: self.images,
        })
    }

    /// Decoy city for `stop`: far from the destination at the start, then
    /// drawn from a window of ever closer near-misses.
    fn red_herring_target(&self, stop: usize, rng: &mut PuzzleRng) -> Option<&'a City> {
        let final_city = self.final_city()?;
        let mut candidates: Vec<(&'a City, f64)> = self
            .pool
            .iter()
            .filter(|city| !self.route.iter().any(|stop_city| stop_city.same_city(city)))
            .map(|city| (city, city.distance_to(final_city)))
            .collect();
        candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

        let total = candidates.len();
        if total == 0 {
            warn!("no red herring candidates for stop {stop}");
            return None;
        }
        let window: &[(&'a City, f64)] = if stop == 0 {
            let take = self.red_herring_far_pool.min(total);
            &candidates[total - take..]
        } else {
            let scale = 1.0 - usize_to_f64(stop) / usize_to_f64(ROUTE_LEN - 1);
            let base = self.red_herring_near_window.min(total.saturating_sub(1));
            let size = floor_f64_to_usize(usize_to_f64(base) * scale);
            if size == 0 {
                warn!("red herring window for stop {stop} collapsed; using nearest candidate");
            }
            &candidates[..size.clamp(1, total)]
        };
        rng.pick(window).map(|(city, _)| *city)
    }
}

/// Builds every stop's clue list in stop order.
#[derive(Debug)]
pub struct ClueDistributor<'a> {
    ctx: DistributionContext<'a>,
    registry: ClueRegistry,
    red_herring_stops: Vec<usize>,
    used_final: BTreeSet<ClueKind>,
}

impl<'a> ClueDistributor<'a> {
    /// Picks the two red-herring stops from the shared stream.
    #[must_use]
    pub fn new(ctx: DistributionContext<'a>, rng: &mut PuzzleRng) -> Self {
        let mut stops = RED_HERRING_CANDIDATE_STOPS;
        rng.shuffle(&mut stops);
        let mut red_herring_stops = stops[..RED_HERRING_STOP_COUNT].to_vec();
        red_herring_stops.sort_unstable();
        debug!("red herring stops: {red_herring_stops:?}");
        Self {
            ctx,
            registry: ClueRegistry::for_difficulty(ctx.difficulty),
            red_herring_stops,
            used_final: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn red_herring_stops(&self) -> &[usize] {
        &self.red_herring_stops
    }

    #[must_use]
    pub fn has_red_herring(&self, stop: usize) -> bool {
        self.red_herring_stops.contains(&stop)
    }

    /// Clue types already spent on the final destination.
    #[must_use]
    pub const fn used_final(&self) -> &BTreeSet<ClueKind> {
        &self.used_final
    }

    /// Fill every stop, strictly in route order.
    ///
    /// # Errors
    ///
    /// Propagates the first [`PuzzleError`] raised by [`Self::clues_for_stop`].
    pub fn distribute(&mut self, rng: &mut PuzzleRng) -> Result<Vec<Vec<Clue>>, PuzzleError> {
        (0..self.ctx.route.len())
            .map(|stop| self.clues_for_stop(stop, rng))
            .collect()
    }

    /// Generate the clues for one stop.
    ///
    /// # Errors
    ///
    /// Returns `PuzzleError::InvalidStop` for a stop outside the route and
    /// `PuzzleError::IncompleteStop` when a slot cannot be filled by any
    /// applicable type.
    pub fn clues_for_stop(
        &mut self,
        stop: usize,
        rng: &mut PuzzleRng,
    ) -> Result<Vec<Clue>, PuzzleError> {
        let base = self.ctx.stop_context(stop)?;
        let roles = roles_for(stop, self.has_red_herring(stop));
        info!(
            "stop {stop} ({}): generating {} clue(s)",
            base.target.name,
            roles.len()
        );

        let available = self.registry.available(&base);
        let prioritized = self.registry.prioritized(&available);
        let mut order = available;
        rng.shuffle(&mut order);

        let mut used_in_stop: Vec<ClueKind> = Vec::with_capacity(roles.len());
        let mut clues: Vec<Clue> = Vec::with_capacity(roles.len());
        let mut pointer = 0usize;

        for (slot, role) in roles.iter().copied().enumerate() {
            let role_ctx = match role {
                ClueRole::Current | ClueRole::Hint => base,
                ClueRole::Final => base.retarget(base.final_city, false),
                ClueRole::RedHerring => {
                    let decoy = self
                        .ctx
                        .red_herring_target(stop, rng)
                        .ok_or(PuzzleError::IncompleteStop { stop, role })?;
                    ClueContext {
                        red_herring_city: Some(decoy),
                        ..base.retarget(decoy, true)
                    }
                }
            };

            let used_final = &self.used_final;
            let allowed = |kind: &ClueKind| {
                !used_in_stop.contains(kind)
                    && (role != ClueRole::Final || !used_final.contains(kind))
            };

            let mut produced = prioritized
                .iter()
                .filter(|kind| allowed(*kind))
                .find_map(|kind| self.attempt(*kind, &role_ctx, rng));

            if produced.is_none() && !order.is_empty() {
                produced = (0..order.len())
                    .map(|step| order[(pointer + step) % order.len()])
                    .filter(|kind| allowed(kind))
                    .find_map(|kind| self.attempt(kind, &role_ctx, rng));
            }
            pointer += 1;

            if produced.is_none() {
                warn!("stop {stop}: no {role} clue under the usual rules, trying any unused type");
                produced = order
                    .iter()
                    .filter(|kind| !used_in_stop.contains(kind))
                    .find_map(|kind| self.attempt(*kind, &role_ctx, rng));
            }

            let clue = produced.ok_or(PuzzleError::IncompleteStop { stop, role })?;
            used_in_stop.push(clue.kind);
            if role == ClueRole::Final {
                self.used_final.insert(clue.kind);
            }
            let id = format!("{stop}-{slot}-{}", clue.kind);
            clues.push(clue.with_id(id));
        }

        if clues.len() > VISIBLE_WAYPOINT_CLUES {
            rng.shuffle(&mut clues[..VISIBLE_WAYPOINT_CLUES]);
        }
        info!(
            "stop {stop} ({}): done [{}]",
            base.target.name,
            clues
                .iter()
                .map(|c| c.kind.key())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(clues)
    }

    fn attempt(&self, kind: ClueKind, ctx: &ClueContext<'_>, rng: &mut PuzzleRng) -> Option<Clue> {
        let generator = self.registry.get(kind)?;
        if !generator.can_generate(ctx) {
            debug!("{kind} does not apply to {}", ctx.target.name);
            return None;
        }
        let clue = generator.generate(ctx, rng);
        if clue.is_none() {
            debug!("{kind} produced nothing for {}", ctx.target.name);
        }
        clue
    }
}

/// Extra hint for a stop, outside the normal build.
///
/// Picks an applicable type not already present among `existing` and
/// generates a clue about the stop's own city. `None` means no hint is left.
///
/// # Errors
///
/// Returns `PuzzleError::InvalidStop` when `stop` is outside the route.
pub fn generate_hint(
    ctx: &DistributionContext<'_>,
    stop: usize,
    existing: &[Clue],
    rng: &mut PuzzleRng,
) -> Result<Option<Clue>, PuzzleError> {
    let base = ctx.stop_context(stop)?;
    let registry = ClueRegistry::for_difficulty(ctx.difficulty);
    let mut remaining: Vec<ClueKind> = registry
        .available(&base)
        .into_iter()
        .filter(|kind| !existing.iter().any(|clue| clue.kind == *kind))
        .collect();
    rng.shuffle(&mut remaining);

    let hint = remaining.into_iter().find_map(|kind| {
        let generator = registry.get(kind)?;
        generator
            .generate(&base, rng)
            .map(|clue| clue.with_id(format!("{stop}-hint-{kind}")))
    });
    if hint.is_none() {
        debug!("stop {stop}: no unused clue type left for a hint");
    }
    Ok(hint)
}
