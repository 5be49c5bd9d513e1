//! Route selection: a seeded walk of hop-limited cities with port exceptions.
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::city::City;
use crate::error::PuzzleError;
use crate::seed::PuzzleRng;

/// Directional allow-list entry permitting a hop beyond the normal maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortConnection {
    pub from: String,
    pub to: String,
    pub max_distance: f64,
}

impl PortConnection {
    #[must_use]
    pub fn allows(&self, from: &City, to: &City) -> bool {
        self.from == from.name && self.to == to.name && from.distance_to(to) <= self.max_distance
    }
}

/// Chooses the ordered cities of a puzzle.
#[derive(Debug, Clone, Copy)]
pub struct RouteSelector<'a> {
    max_hop_km: f64,
    ports: &'a [PortConnection],
}

impl<'a> RouteSelector<'a> {
    #[must_use]
    pub const fn new(max_hop_km: f64, ports: &'a [PortConnection]) -> Self {
        Self { max_hop_km, ports }
    }

    /// Whether a hop from `from` to `to` is legal without fallback.
    #[must_use]
    pub fn hop_allowed(&self, from: &City, to: &City) -> bool {
        from.distance_to(to) <= self.max_hop_km || self.ports.iter().any(|p| p.allows(from, to))
    }

    /// Pick `count` distinct cities starting from a random city.
    ///
    /// Dead ends fall back to the closest unused city regardless of the hop
    /// limit, so the returned route may contain an over-long hop.
    ///
    /// # Errors
    ///
    /// Returns `PuzzleError::CatalogExhausted` if the pool has fewer than
    /// `count` cities.
    pub fn select_route(
        &self,
        rng: &mut PuzzleRng,
        pool: &[City],
        count: usize,
    ) -> Result<Vec<City>, PuzzleError> {
        ensure_pool(pool.len(), count)?;
        let mut shuffled = pool.to_vec();
        rng.shuffle(&mut shuffled);

        let mut route: Vec<City> = Vec::with_capacity(count);
        if let Some(start) = shuffled.first() {
            route.push(start.clone());
        }
        while route.len() < count {
            let next = self.next_stop(rng, &shuffled, &route, None)?;
            route.push(next);
        }
        debug!(
            "route selected: {}",
            route
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(" -> ")
        );
        Ok(route)
    }

    /// Generate a route ending at `final_city`, optionally from a fixed start.
    ///
    /// The second-to-last stop must be within the hop limit of both its
    /// predecessor and the final city; dead ends fall back to the city with
    /// the smallest of the larger of those two distances.
    ///
    /// # Errors
    ///
    /// Returns `PuzzleError::CatalogExhausted` if the pool cannot supply the
    /// intermediate stops.
    pub fn select_anchored_route(
        &self,
        rng: &mut PuzzleRng,
        pool: &[City],
        count: usize,
        start: Option<&City>,
        final_city: &City,
    ) -> Result<Vec<City>, PuzzleError> {
        info!(
            "festive route anchored at {} ({})",
            final_city.name, final_city.country
        );
        let mut shuffled: Vec<City> = pool
            .iter()
            .filter(|city| !city.same_city(final_city))
            .filter(|city| start.is_none_or(|s| !city.same_city(s)))
            .cloned()
            .collect();
        let reserved = 1 + usize::from(start.is_some());
        ensure_pool(shuffled.len() + reserved, count)?;
        rng.shuffle(&mut shuffled);

        let mut route: Vec<City> = Vec::with_capacity(count);
        match start {
            Some(start) => route.push(start.clone()),
            None => {
                if let Some(first) = shuffled.first() {
                    route.push(first.clone());
                }
            }
        }
        while route.len() + 1 < count {
            let anchor = (route.len() + 2 == count).then_some(final_city);
            let next = self.next_stop(rng, &shuffled, &route, anchor)?;
            route.push(next);
        }
        route.push(final_city.clone());
        Ok(route)
    }

    fn next_stop(
        &self,
        rng: &mut PuzzleRng,
        pool: &[City],
        route: &[City],
        final_anchor: Option<&City>,
    ) -> Result<City, PuzzleError> {
        let Some(prev) = route.last() else {
            return Err(PuzzleError::CatalogExhausted {
                needed: 1,
                available: pool.len(),
            });
        };
        let unused: Vec<&City> = pool
            .iter()
            .filter(|city| !route.iter().any(|used| used.same_city(city)))
            .collect();

        let candidates: Vec<&City> = unused
            .iter()
            .copied()
            .filter(|city| self.hop_allowed(prev, city))
            .filter(|city| final_anchor.is_none_or(|fin| self.hop_allowed(city, fin)))
            .collect();

        if let Some(chosen) = rng.pick(&candidates) {
            return Ok((*chosen).clone());
        }

        let fallback_metric = |city: &City| {
            let hop = prev.distance_to(city);
            final_anchor.map_or(hop, |fin| hop.max(city.distance_to(fin)))
        };
        let fallback = unused
            .iter()
            .copied()
            .min_by(|a, b| fallback_metric(a).total_cmp(&fallback_metric(b)))
            .ok_or(PuzzleError::CatalogExhausted {
                needed: route.len() + 1,
                available: route.len(),
            })?;
        warn!(
            "dead end after {}: falling back to closest city {} ({:.0} km)",
            prev.name,
            fallback.name,
            prev.distance_to(fallback)
        );
        Ok(fallback.clone())
    }
}

fn ensure_pool(available: usize, needed: usize) -> Result<(), PuzzleError> {
    if available < needed {
        return Err(PuzzleError::CatalogExhausted { needed, available });
    }
    Ok(())
}
