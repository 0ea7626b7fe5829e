//! Room placement and rasterization.
//!
//! Candidates are positioned with random retries: first inside zones (if any),
//! then anywhere in the map interior. Candidates that run out of attempts stay
//! unplaced and are dropped when converted into rooms.

use super::{Rect, Room, Zone};
use crate::constants::*;
use crate::grid::Grid;
use rand::Rng;

/// Where a candidate room ended up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Unplaced,
    Placed { x: i32, y: i32 },
}

/// A sized room that may or may not have found a position yet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomCandidate {
    pub width: i32,
    pub height: i32,
    pub placement: Placement,
    pub zone: Option<usize>,
}

impl RoomCandidate {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            placement: Placement::Unplaced,
            zone: None,
        }
    }

    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    pub fn is_placed(&self) -> bool {
        matches!(self.placement, Placement::Placed { .. })
    }

    pub fn rect(&self) -> Option<Rect> {
        match self.placement {
            Placement::Placed { x, y } => Some(Rect::new(x, y, self.width, self.height)),
            Placement::Unplaced => None,
        }
    }

    fn place(&mut self, x: i32, y: i32, zone: Option<usize>) {
        self.placement = Placement::Placed { x, y };
        self.zone = zone;
    }
}

/// Padding a room demands around itself
pub fn room_border(width: i32, height: i32) -> i32 {
    if width >= LARGE_ROOM_MIN_DIMENSION && height >= LARGE_ROOM_MIN_DIMENSION {
        LARGE_ROOM_BORDER
    } else {
        ROOM_BORDER
    }
}

/// Whether two rooms are too close. The larger of the two borders applies.
pub fn rooms_overlap(a: &Rect, b: &Rect) -> bool {
    let border = room_border(a.width, a.height).max(room_border(b.width, b.height));
    a.overlaps_with_border(b, border)
}

/// Remaining number of rooms that may still be placed, shared by every phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomBudget {
    remaining: Option<usize>,
}

impl RoomBudget {
    /// `None` means no cap
    pub fn new(cap: Option<usize>) -> Self {
        Self { remaining: cap }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }

    pub fn remaining(&self) -> Option<usize> {
        self.remaining
    }

    /// Consume one slot. Returns false when none are left.
    pub fn take(&mut self) -> bool {
        match self.remaining {
            Some(0) => false,
            Some(ref mut n) => {
                *n -= 1;
                true
            }
            None => true,
        }
    }
}

/// Check a proposed position for `candidates[index]` against every other placed room
fn fits_at(candidates: &[RoomCandidate], index: usize, rect: &Rect) -> bool {
    candidates
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != index)
        .filter_map(|(_, other)| other.rect())
        .all(|other| !rooms_overlap(rect, &other))
}

/// Pin the largest candidate (index 0) to its canonical spot: left-aligned and
/// vertically centred in the first zone, or centred on the map without zones.
/// The room is left unplaced if it does not fit there.
pub fn pin_boss_room(
    candidates: &mut [RoomCandidate],
    first_zone: Option<&Zone>,
    width: i32,
    height: i32,
    budget: &mut RoomBudget,
) {
    let Some(room) = candidates.first_mut() else {
        return;
    };

    let spot = match first_zone {
        Some(zone) if room.width <= zone.width && room.height <= zone.height => {
            Some((zone.x, zone.y + (zone.height - room.height) / 2, Some(0)))
        }
        Some(_) => None,
        None if room.width <= width - 2 && room.height <= height - 2 => {
            Some(((width - room.width) / 2, (height - room.height) / 2, None))
        }
        None => None,
    };

    match spot {
        Some((x, y, zone)) if budget.take() => {
            room.place(x, y, zone);
            log::debug!("Boss room {}x{} pinned at ({}, {})", room.width, room.height, x, y);
        }
        Some(_) => {}
        None => log::debug!(
            "Boss room {}x{} does not fit its canonical spot",
            room.width,
            room.height
        ),
    }
}

/// Place unplaced candidates inside zones, rotating to the next zone after each
/// success. Returns the number of rooms placed.
pub fn place_by_zone(
    candidates: &mut [RoomCandidate],
    zones: &[Zone],
    width: i32,
    height: i32,
    budget: &mut RoomBudget,
    rng: &mut impl Rng,
) -> usize {
    puffin::profile_function!();

    if zones.is_empty() {
        return 0;
    }

    let mut placed = 0;
    let mut zone_index = 0;

    for i in 0..candidates.len() {
        if budget.is_exhausted() {
            break;
        }
        if candidates[i].is_placed() {
            continue;
        }

        let zone = &zones[zone_index];
        let (room_w, room_h) = (candidates[i].width, candidates[i].height);

        // The room's corner stays inside the zone, the room itself may spill out of it
        let min_x = zone.x;
        let max_x = zone.right().min(width - room_w - 1);
        let min_y = zone.y;
        let max_y = zone.bottom().min(height - room_h - 1);
        if min_x + room_w > width - 1 || min_y + room_h > height - 1 {
            continue;
        }

        for _ in 0..ZONE_PLACEMENT_ATTEMPTS {
            let x = rng.gen_range(min_x..=max_x);
            let y = rng.gen_range(min_y..=max_y);
            if fits_at(candidates, i, &Rect::new(x, y, room_w, room_h)) {
                candidates[i].place(x, y, Some(zone_index));
                budget.take();
                placed += 1;
                zone_index = (zone_index + 1) % zones.len();
                break;
            }
        }
    }

    log::debug!("Placed {} rooms across {} zones", placed, zones.len());
    placed
}

/// Place every remaining candidate anywhere in the map interior. Returns the
/// number of rooms placed.
pub fn place_freely(
    candidates: &mut [RoomCandidate],
    width: i32,
    height: i32,
    budget: &mut RoomBudget,
    rng: &mut impl Rng,
) -> usize {
    puffin::profile_function!();

    let mut placed = 0;

    for i in 0..candidates.len() {
        if budget.is_exhausted() {
            break;
        }
        if candidates[i].is_placed() {
            continue;
        }

        let (room_w, room_h) = (candidates[i].width, candidates[i].height);
        let max_x = width - room_w - 1;
        let max_y = height - room_h - 1;
        if max_x < 1 || max_y < 1 {
            continue;
        }

        for _ in 0..FREE_PLACEMENT_ATTEMPTS {
            let x = rng.gen_range(1..=max_x);
            let y = rng.gen_range(1..=max_y);
            if fits_at(candidates, i, &Rect::new(x, y, room_w, room_h)) {
                candidates[i].place(x, y, None);
                budget.take();
                placed += 1;
                break;
            }
        }
    }

    let unplaced = candidates.iter().filter(|c| !c.is_placed()).count();
    log::debug!("Placed {} rooms freely, {} dropped", placed, unplaced);
    placed
}

/// Drop unplaced candidates and number the rest `1..=N` in catalog order.
/// Every room starts out as its own group.
pub fn into_rooms(candidates: Vec<RoomCandidate>) -> Vec<Room> {
    candidates
        .into_iter()
        .filter_map(|c| c.rect().map(|rect| (rect, c.zone)))
        .enumerate()
        .map(|(i, (rect, zone))| Room {
            id: i as u32 + 1,
            rect,
            group: i as u32 + 1,
            zone,
        })
        .collect()
}

/// Stamp each room's footprint into the grid with its id
pub fn rasterize(grid: &mut Grid, rooms: &[Room]) {
    puffin::profile_function!();

    for room in rooms {
        grid.fill_rect(&room.rect, room.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::DungeonRng;

    fn placed(width: i32, height: i32, x: i32, y: i32) -> RoomCandidate {
        let mut c = RoomCandidate::new(width, height);
        c.place(x, y, None);
        c
    }

    #[test]
    fn test_room_border_sizes() {
        assert_eq!(room_border(3, 3), 1);
        assert_eq!(room_border(7, 5), 1);
        assert_eq!(room_border(7, 7), 3);
        assert_eq!(room_border(9, 8), 3);
    }

    #[test]
    fn test_large_rooms_need_wider_gap() {
        let small = Rect::new(1, 1, 3, 3);
        let big = Rect::new(6, 1, 7, 7);
        // Gap of 2 columns: fine for small rooms, too tight next to a large one
        assert!(!rooms_overlap(&small, &Rect::new(6, 1, 3, 3)));
        assert!(rooms_overlap(&small, &big));
        assert!(!rooms_overlap(&small, &Rect::new(7, 1, 7, 7)));
    }

    #[test]
    fn test_budget() {
        let mut budget = RoomBudget::new(Some(2));
        assert!(budget.take());
        assert!(budget.take());
        assert!(budget.is_exhausted());
        assert!(!budget.take());

        let mut unlimited = RoomBudget::new(None);
        for _ in 0..100 {
            assert!(unlimited.take());
        }
        assert!(!unlimited.is_exhausted());
    }

    #[test]
    fn test_boss_room_in_first_zone() {
        let mut candidates = vec![RoomCandidate::new(5, 3), RoomCandidate::new(3, 3)];
        let zone = Rect::new(2, 4, 8, 9);
        let mut budget = RoomBudget::new(Some(5));
        pin_boss_room(&mut candidates, Some(&zone), 40, 40, &mut budget);

        assert_eq!(candidates[0].placement, Placement::Placed { x: 2, y: 7 });
        assert_eq!(candidates[0].zone, Some(0));
        assert!(!candidates[1].is_placed());
        assert_eq!(budget.remaining(), Some(4));
    }

    #[test]
    fn test_boss_room_too_big_for_zone() {
        let mut candidates = vec![RoomCandidate::new(9, 3)];
        let zone = Rect::new(1, 1, 8, 8);
        let mut budget = RoomBudget::new(None);
        pin_boss_room(&mut candidates, Some(&zone), 40, 40, &mut budget);
        assert!(!candidates[0].is_placed());
    }

    #[test]
    fn test_boss_room_centred_without_zones() {
        let mut candidates = vec![RoomCandidate::new(6, 4)];
        let mut budget = RoomBudget::new(None);
        pin_boss_room(&mut candidates, None, 20, 11, &mut budget);
        assert_eq!(candidates[0].placement, Placement::Placed { x: 7, y: 3 });
        assert_eq!(candidates[0].zone, None);
    }

    #[test]
    fn test_boss_room_respects_exhausted_budget() {
        let mut candidates = vec![RoomCandidate::new(4, 4)];
        let mut budget = RoomBudget::new(Some(0));
        pin_boss_room(&mut candidates, None, 20, 20, &mut budget);
        assert!(!candidates[0].is_placed());
    }

    #[test]
    fn test_fits_at_ignores_self_and_unplaced() {
        let candidates = vec![placed(3, 3, 1, 1), RoomCandidate::new(3, 3), placed(3, 3, 10, 10)];
        assert!(fits_at(&candidates, 1, &Rect::new(5, 1, 3, 3)));
        assert!(!fits_at(&candidates, 1, &Rect::new(4, 1, 3, 3)));
        // Moving room 0 over its own old position is fine
        assert!(fits_at(&candidates, 0, &Rect::new(2, 2, 3, 3)));
    }

    #[test]
    fn test_free_placement_keeps_rooms_apart() {
        let mut candidates: Vec<RoomCandidate> =
            (0..30).map(|i| RoomCandidate::new(3 + i % 5, 3 + i % 3)).collect();
        let mut budget = RoomBudget::new(None);
        let mut rng = DungeonRng::new(31);
        place_freely(&mut candidates, 40, 40, &mut budget, &mut rng);

        let rects: Vec<Rect> = candidates.iter().filter_map(|c| c.rect()).collect();
        assert!(!rects.is_empty());
        for (i, a) in rects.iter().enumerate() {
            assert!(a.x >= 1 && a.y >= 1 && a.right() <= 39 && a.bottom() <= 39);
            for b in &rects[i + 1..] {
                assert!(!rooms_overlap(a, b));
            }
        }
    }

    #[test]
    fn test_free_placement_honours_budget() {
        let mut candidates: Vec<RoomCandidate> = (0..10).map(|_| RoomCandidate::new(3, 3)).collect();
        let mut budget = RoomBudget::new(Some(3));
        let mut rng = DungeonRng::new(1);
        let placed = place_freely(&mut candidates, 50, 50, &mut budget, &mut rng);
        assert_eq!(placed, 3);
        assert_eq!(candidates.iter().filter(|c| c.is_placed()).count(), 3);
    }

    #[test]
    fn test_zone_placement_records_zone_and_rotates() {
        let zones = vec![Rect::new(1, 1, 10, 10), Rect::new(20, 20, 10, 10)];
        let mut candidates: Vec<RoomCandidate> = (0..4).map(|_| RoomCandidate::new(3, 3)).collect();
        let mut budget = RoomBudget::new(None);
        let mut rng = DungeonRng::new(77);
        place_by_zone(&mut candidates, &zones, 40, 40, &mut budget, &mut rng);

        for c in candidates.iter().filter(|c| c.is_placed()) {
            let rect = c.rect().unwrap();
            let zone = &zones[c.zone.unwrap()];
            assert!(rect.x >= zone.x && rect.x <= zone.right());
            assert!(rect.y >= zone.y && rect.y <= zone.bottom());
        }
        assert_eq!(candidates[0].zone, Some(0));
        assert_eq!(candidates[1].zone, Some(1));
    }

    #[test]
    fn test_room_too_large_for_map_is_dropped() {
        let mut candidates = vec![RoomCandidate::new(20, 3)];
        let mut budget = RoomBudget::new(None);
        let mut rng = DungeonRng::new(1);
        assert_eq!(place_freely(&mut candidates, 20, 20, &mut budget, &mut rng), 0);
        assert!(into_rooms(candidates).is_empty());
    }

    #[test]
    fn test_into_rooms_numbers_placed_rooms() {
        let candidates = vec![placed(3, 3, 1, 1), RoomCandidate::new(4, 4), placed(3, 3, 8, 1)];
        let rooms = into_rooms(candidates);
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].id, 1);
        assert_eq!(rooms[1].id, 2);
        assert_eq!(rooms[1].rect, Rect::new(8, 1, 3, 3));
    }

    #[test]
    fn test_rasterize_stamps_ids() {
        let rooms = into_rooms(vec![placed(2, 2, 1, 1), placed(3, 1, 5, 1)]);
        let mut grid = Grid::new(10, 4);
        rasterize(&mut grid, &rooms);
        assert_eq!(grid.get(1, 1), Some(1));
        assert_eq!(grid.get(2, 2), Some(1));
        assert_eq!(grid.get(7, 1), Some(2));
        assert_eq!(grid.get(4, 1), Some(0));
    }
}
