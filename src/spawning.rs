//! Player start location.
//!
//! The player starts far from the boss room. Both locators run a breadth-first
//! traversal over walkable cells starting at the boss room's center.

use crate::constants::FALLBACK_SPAWN;
use crate::dungeon_gen::{Map, Room};
use crate::tile::Cell;
use std::collections::{HashSet, VecDeque};

const NEIGHBORS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Walk every cell reachable from `start`, calling `visit` with each cell and its
/// depth in dequeue order.
fn traverse(map: &Map, start: (i32, i32), mut visit: impl FnMut((i32, i32), u32)) {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back((start, 0));

    while let Some(((x, y), depth)) = queue.pop_front() {
        visit((x, y), depth);
        for (dx, dy) in NEIGHBORS {
            let next = (x + dx, y + dy);
            if map.is_walkable(next.0, next.1) && visited.insert(next) {
                queue.push_back((next, depth + 1));
            }
        }
    }
}

fn room_cell(map: &Map, pos: (i32, i32)) -> Option<&Room> {
    match map.cell(pos.0, pos.1)? {
        Cell::Room(id) => map.room(id),
        _ => None,
    }
}

/// Center of the room owning the last room cell the traversal dequeues.
///
/// The traversal has no notion of distance, so this is only an approximation of
/// the farthest room. Returns `(1, 1)` for a map without rooms.
pub fn player_start(map: &Map) -> (i32, i32) {
    puffin::profile_function!();

    let Some(boss) = map.boss_room() else {
        return FALLBACK_SPAWN;
    };

    let mut last = boss;
    traverse(map, boss.rect.center(), |pos, _| {
        if let Some(room) = room_cell(map, pos) {
            last = room;
        }
    });

    log::debug!("Player start in room {} (boss room {})", last.id, boss.id);
    last.rect.center()
}

/// Center of the room holding the cell with the greatest walking distance from
/// the boss room's center. Ties go to the room reached first.
pub fn farthest_room_start(map: &Map) -> (i32, i32) {
    puffin::profile_function!();

    let Some(boss) = map.boss_room() else {
        return FALLBACK_SPAWN;
    };

    let mut farthest = (boss, 0);
    traverse(map, boss.rect.center(), |pos, depth| {
        if let Some(room) = room_cell(map, pos) {
            if depth > farthest.1 {
                farthest = (room, depth);
            }
        }
    });

    log::debug!(
        "Farthest room {} is {} steps from boss room {}",
        farthest.0.id,
        farthest.1,
        boss.id
    );
    farthest.0.rect.center()
}
