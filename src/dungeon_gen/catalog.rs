//! Room catalog: the sized-but-unplaced rooms a dungeon starts from.

use super::placement::RoomCandidate;
use crate::constants::*;
use crate::params::ResolvedParams;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use std::cmp::Reverse;

/// Weighted pool of base room sizes.
///
/// Sizes run from `max` down to `min`, each weighted twice as heavily as the
/// size above it, so small rooms dominate the catalog.
pub struct SizePool {
    sizes: Vec<u32>,
    weights: WeightedIndex<f64>,
}

impl SizePool {
    /// Returns None for an empty range. Sizes above `MAX_ROOM_SIZE` are left out.
    pub fn new(min_size: u32, max_size: u32) -> Option<Self> {
        let max_size = max_size.min(MAX_ROOM_SIZE);
        let sizes: Vec<u32> = (min_size..=max_size).rev().collect();
        let weights = WeightedIndex::new(
            (0..sizes.len()).map(|k| 2f64.powi((k as i32).min(SIZE_WEIGHT_MAX_EXPONENT))),
        )
        .ok()?;
        Some(Self { sizes, weights })
    }

    pub fn sample(&self, rng: &mut impl Rng) -> u32 {
        self.sizes[self.weights.sample(rng)]
    }

    /// Sizes in pool order, largest first
    pub fn sizes(&self) -> &[u32] {
        &self.sizes
    }
}

/// Draw rooms until their combined area reaches the area goal.
///
/// The result is sorted largest room first (stable), so the boss room, if
/// requested, is always candidate 0.
pub fn build_catalog(params: &ResolvedParams, rng: &mut impl Rng) -> Vec<RoomCandidate> {
    puffin::profile_function!();

    // No room larger than the map can ever be placed
    let largest_fit = params.width.max(params.height).min(MAX_ROOM_SIZE as usize) as u32;
    let max_size = params.max_size.min(largest_fit);

    let Some(pool) = SizePool::new(params.min_size, max_size) else {
        log::warn!(
            "Room sizes {}..={} cannot fit a {}x{} map, no rooms generated",
            params.min_size,
            params.max_size,
            params.width,
            params.height
        );
        return Vec::new();
    };

    let area_goal = params.area_goal();
    let mut area = 0.0;
    let mut rooms = Vec::new();

    while area < area_goal {
        let size = pool.sample(rng) as i32;
        let mut width = size;
        let mut height = size;

        // Stretch one side to get some rectangular rooms
        if rng.gen_bool(ROOM_STRETCH_CHANCE) {
            if rng.gen_bool(0.5) {
                width += ROOM_STRETCH_AMOUNT as i32;
            } else {
                height += ROOM_STRETCH_AMOUNT as i32;
            }
        }

        let room = RoomCandidate::new(width, height);
        area += room.area() as f64;
        rooms.push(room);
    }

    rooms.sort_by_key(|room| Reverse(room.area()));

    log::debug!(
        "Room catalog: {} rooms covering {} cells (goal {:.0})",
        rooms.len(),
        area,
        area_goal
    );

    rooms
}
