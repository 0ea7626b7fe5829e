//! Reachability over walkable cells.

use crate::dungeon_gen::Map;
use crate::grid::Grid;
use std::collections::{HashSet, VecDeque};

const NEIGHBORS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Every walkable cell 4-connected to `start`. Empty if `start` is not walkable.
pub fn flood_fill(grid: &Grid, start: (i32, i32)) -> HashSet<(i32, i32)> {
    let mut visited = HashSet::new();
    if !grid.is_walkable(start.0, start.1) {
        return visited;
    }

    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some((x, y)) = queue.pop_front() {
        for (dx, dy) in NEIGHBORS {
            let next = (x + dx, y + dy);
            if grid.is_walkable(next.0, next.1) && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    visited
}

/// Ids of the rooms a flood fill from the first room's top-left cell touches
pub fn rooms_reachable(map: &Map) -> HashSet<u32> {
    let Some(first) = map.rooms.first() else {
        return HashSet::new();
    };

    let room_count = map.rooms.len() as u32;
    flood_fill(&map.grid, (first.rect.x, first.rect.y))
        .into_iter()
        .map(|(x, y)| map.grid.value(x, y))
        .filter(|&value| (1..=room_count).contains(&value))
        .collect()
}

/// Whether every room can be walked to from every other room
pub fn is_fully_connected(map: &Map) -> bool {
    rooms_reachable(map).len() == map.rooms.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from(rows: &[&str]) -> Grid {
        let rows: Vec<Vec<u32>> = rows
            .iter()
            .map(|row| row.chars().map(|c| if c == '#' { 0 } else { 1 }).collect())
            .collect();
        Grid::from_rows(&rows)
    }

    #[test]
    fn test_flood_fill_stays_in_component() {
        let grid = grid_from(&["######", "#..#.#", "#..#.#", "######"]);
        let cells = flood_fill(&grid, (1, 1));
        assert_eq!(cells.len(), 4);
        assert!(!cells.contains(&(4, 1)));
        assert!(flood_fill(&grid, (0, 0)).is_empty());
    }

    #[test]
    fn test_rooms_reachable_through_corridor() {
        use crate::dungeon_gen::{Rect, Room};

        let rooms: Vec<Room> = [Rect::new(1, 1, 2, 2), Rect::new(5, 1, 2, 2), Rect::new(1, 5, 2, 2)]
            .iter()
            .enumerate()
            .map(|(i, &rect)| Room {
                id: i as u32 + 1,
                rect,
                group: i as u32 + 1,
                zone: None,
            })
            .collect();
        let mut grid = Grid::new(9, 9);
        for room in &rooms {
            grid.fill_rect(&room.rect, room.id);
        }
        for x in 3..5 {
            grid.set(x, 1, 4);
        }
        let map = Map {
            width: 9,
            height: 9,
            grid,
            rooms,
            zones: Vec::new(),
            connected: false,
        };

        let reached = rooms_reachable(&map);
        assert_eq!(reached, HashSet::from([1, 2]));
        assert!(!is_fully_connected(&map));
    }
}
