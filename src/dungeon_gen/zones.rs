//! Zone partitioning.
//!
//! Zones are disjoint rectangles that rooms are clustered into. They start as a
//! staggered set of equal cells, one per column band, and then grow one cell at a
//! time until they run out of space or cover enough of the map.

use super::{Rect, Zone};
use crate::constants::*;
use crate::params::ResolvedParams;
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The rectangle extended by one cell on this side
    pub fn grow(self, rect: &Rect) -> Rect {
        match self {
            Direction::Up => Rect::new(rect.x, rect.y - 1, rect.width, rect.height + 1),
            Direction::Down => Rect::new(rect.x, rect.y, rect.width, rect.height + 1),
            Direction::Left => Rect::new(rect.x - 1, rect.y, rect.width + 1, rect.height),
            Direction::Right => Rect::new(rect.x, rect.y, rect.width + 1, rect.height),
        }
    }
}

/// Build and grow `params.zones` zones. Returns an empty list when the map is
/// too small to give every zone a non-empty starting cell.
pub fn partition(params: &ResolvedParams, rng: &mut impl Rng) -> Vec<Zone> {
    puffin::profile_function!();

    let width = params.width as i32;
    let height = params.height as i32;

    let mut zones = initial_zones(width, height, params.zones, rng);
    if zones.is_empty() {
        log::debug!(
            "{}x{} map too small for {} zones, placing rooms freely",
            width,
            height,
            params.zones
        );
        return zones;
    }

    let fraction = (params.goal * ZONE_AREA_GOAL_FACTOR).min(ZONE_AREA_MAX_FRACTION);
    let target_area = fraction * (params.width * params.height) as f64;
    grow_zones(&mut zones, width, height, target_area, rng);

    log::debug!(
        "Zones: {} covering {} cells (target {:.0})",
        zones.len(),
        total_area(&zones),
        target_area
    );

    zones
}

/// One cell per column band, with rows assigned in shuffled order so the
/// cells are staggered down the map.
pub fn initial_zones(width: i32, height: i32, count: u32, rng: &mut impl Rng) -> Vec<Zone> {
    let count = count as i32;
    if count <= 0 {
        return Vec::new();
    }

    let x_step = (width - 2) / count;
    let y_step = (height - 2) / count;
    if x_step <= 0 || y_step <= 0 {
        return Vec::new();
    }

    let mut rows: Vec<i32> = (0..count).collect();
    rows.shuffle(rng);

    rows.iter()
        .enumerate()
        .map(|(column, &row)| Rect::new(column as i32 * x_step + 1, row * y_step + 1, x_step, y_step))
        .collect()
}

/// Grow zones round by round. Each round every zone tries one random feasible
/// direction; growth ends when no zone can grow or the target area is reached.
pub fn grow_zones(zones: &mut [Zone], width: i32, height: i32, target_area: f64, rng: &mut impl Rng) {
    loop {
        let mut grew = false;

        for i in 0..zones.len() {
            if total_area(zones) as f64 >= target_area {
                return;
            }

            let options: Vec<Rect> = Direction::ALL
                .iter()
                .map(|dir| dir.grow(&zones[i]))
                .filter(|grown| fits_inside_border(grown, width, height))
                .filter(|grown| {
                    zones
                        .iter()
                        .enumerate()
                        .all(|(j, other)| j == i || !grown.overlaps_with_border(other, 0))
                })
                .collect();

            if let Some(grown) = options.choose(rng) {
                zones[i] = *grown;
                grew = true;
            }
        }

        if !grew {
            return;
        }
    }
}

fn fits_inside_border(rect: &Rect, width: i32, height: i32) -> bool {
    rect.x >= 1 && rect.y >= 1 && rect.right() <= width - 1 && rect.bottom() <= height - 1
}

pub fn total_area(zones: &[Zone]) -> i32 {
    zones.iter().map(|z| z.area()).sum()
}
