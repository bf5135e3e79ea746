//! Picks the next color for an entity.
//!
//! Incremental choice is maximin: the free pool entry whose nearest
//! already-assigned color is as far away as possible. Once every pool
//! entry is taken, colors are reused cyclically by the entity's ordinal.

use super::color::Color;
use super::distance::{EuclideanRgb, Metric};
use crate::util::ScopedTimer;
use serde::Serialize;
use std::collections::BTreeMap;

/// Distance from `candidate` to its closest neighbour in `assigned`.
/// Infinite when nothing is assigned yet.
pub fn min_distance<M: Metric<Color>>(candidate: &Color, assigned: &[Color], metric: &M) -> f64 {
    assigned
        .iter()
        .map(|a| metric.distance(candidate, a))
        .fold(f64::INFINITY, f64::min)
}

/// Maximin selection over `pool` with the RGB metric.
///
/// Returns `pool[0]` when nothing is assigned, and `None` when the pool is
/// empty or every entry in it is already assigned.
pub fn select_next(assigned: &[Color], pool: &[Color]) -> Option<Color> {
    select_next_with(assigned, pool, &EuclideanRgb)
}

pub fn select_next_with<M: Metric<Color>>(
    assigned: &[Color],
    pool: &[Color],
    metric: &M,
) -> Option<Color> {
    let seed = pool.first()?;
    if assigned.is_empty() {
        return Some(*seed);
    }

    let mut best: Option<(Color, f64)> = None;
    for candidate in pool {
        if assigned.contains(candidate) {
            continue;
        }
        let distance = min_distance(candidate, assigned, metric);
        match best {
            Some((_, best_distance)) if distance <= best_distance => {}
            _ => best = Some((*candidate, distance)),
        }
    }
    log::trace!(
        "Maximin choice {:?} among {} assigned colors",
        best,
        assigned.len()
    );
    best.map(|(color, _)| color)
}

/// `pool[index mod len]`, or `None` for an empty pool.
pub fn cyclic_fallback(index: usize, pool: &[Color]) -> Option<Color> {
    if pool.is_empty() {
        return None;
    }
    Some(pool[index % pool.len()])
}

/// Color for the entity at position `ordinal` in assignment order.
///
/// The first `pool.len()` entities get maximin choices; everyone after that
/// (or anyone for whom no free color is left) gets the cyclic fallback.
pub fn assign(ordinal: usize, assigned: &[Color], pool: &[Color]) -> Option<Color> {
    if pool.is_empty() {
        return None;
    }
    if ordinal < pool.len() {
        if let Some(color) = select_next(assigned, pool) {
            return Some(color);
        }
    }
    metrics::increment_counter!("count.cyclic_fallbacks");
    log::debug!(
        "Pool of {} exhausted, reusing color for ordinal {}",
        pool.len(),
        ordinal
    );
    cyclic_fallback(ordinal, pool)
}

/// Result of a bulk re-derivation: entity id -> color, plus the order in
/// which the colors were handed out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub colors: BTreeMap<String, Color>,
    pub order: Vec<String>,
}

impl Assignment {
    pub fn get(&self, id: &str) -> Option<Color> {
        self.colors.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Assign colors from scratch to `(id, priority)` pairs.
///
/// Entities are stable-sorted by priority (first-seen time), then assigned
/// one by one while the set of used colors accumulates. Ids are expected to
/// be unique. Running it twice on the same input gives the same mapping.
pub fn rederive<I, K, P>(entities: I, pool: &[Color]) -> Assignment
where
    I: IntoIterator<Item = (K, P)>,
    K: Into<String>,
    P: Ord,
{
    let _timer = ScopedTimer::new("rederive");
    let mut ranked: Vec<(String, P)> = entities
        .into_iter()
        .map(|(id, priority)| (id.into(), priority))
        .collect();
    ranked.sort_by(|a, b| a.1.cmp(&b.1));

    let mut assignment = Assignment::default();
    let mut assigned: Vec<Color> = Vec::with_capacity(ranked.len());
    for (ordinal, (id, _)) in ranked.into_iter().enumerate() {
        let Some(color) = assign(ordinal, &assigned, pool) else {
            log::warn!("No colors available, leaving {} unassigned", id);
            continue;
        };
        assigned.push(color);
        assignment.colors.insert(id.clone(), color);
        assignment.order.push(id);
    }
    metrics::counter!("count.colors_assigned", assignment.len() as u64);
    assignment
}
