//! Structural checks over a finished map.

use super::placement::rooms_overlap;
use super::Map;
use crate::pathfinding;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuditIssue {
    /// Two rooms closer than their padding allows
    Overlap { a: u32, b: u32 },
    /// `rooms[index]` does not carry id `index + 1`
    IdOutOfSequence { index: usize, id: u32 },
    /// Room footprint leaves the map interior
    OutOfBounds { room: u32 },
    /// Cell value larger than the corridor marker
    StrayValue { x: i32, y: i32, value: u32 },
    /// Room id stamped outside that room's rectangle
    MisplacedFloor { x: i32, y: i32, room: u32 },
    /// Cell inside a room's rectangle that does not carry its id
    MissingFloor { x: i32, y: i32, room: u32 },
    /// The `connected` flag disagrees with a flood fill over the grid
    Connectivity { flagged: bool, reachable: bool },
}

pub fn audit(map: &Map) -> Vec<AuditIssue> {
    let mut issues = Vec::new();
    let width = map.width as i32;
    let height = map.height as i32;

    for (index, room) in map.rooms.iter().enumerate() {
        if room.id as usize != index + 1 {
            issues.push(AuditIssue::IdOutOfSequence { index, id: room.id });
        }

        let rect = &room.rect;
        if rect.x < 1 || rect.y < 1 || rect.right() > width - 1 || rect.bottom() > height - 1 {
            issues.push(AuditIssue::OutOfBounds { room: room.id });
        }

        for other in &map.rooms[index + 1..] {
            if rooms_overlap(&room.rect, &other.rect) {
                issues.push(AuditIssue::Overlap {
                    a: room.id,
                    b: other.id,
                });
            }
        }

        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                if map.grid.get(x, y).is_some_and(|v| v != room.id) {
                    issues.push(AuditIssue::MissingFloor { x, y, room: room.id });
                }
            }
        }
    }

    let room_count = map.rooms.len() as u32;
    let corridor = map.corridor_marker();
    for y in 0..height {
        for x in 0..width {
            let value = map.grid.value(x, y);
            if value > corridor {
                issues.push(AuditIssue::StrayValue { x, y, value });
            } else if (1..=room_count).contains(&value)
                && !map.room(value).is_some_and(|r| r.rect.contains(x, y))
            {
                issues.push(AuditIssue::MisplacedFloor { x, y, room: value });
            }
        }
    }

    let reachable = pathfinding::is_fully_connected(map);
    if reachable != map.connected {
        issues.push(AuditIssue::Connectivity {
            flagged: map.connected,
            reachable,
        });
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon_gen::{Rect, Room};
    use crate::grid::Grid;

    fn two_room_map(connected: bool) -> Map {
        let rooms = vec![
            Room {
                id: 1,
                rect: Rect::new(1, 1, 3, 3),
                group: 1,
                zone: None,
            },
            Room {
                id: 2,
                rect: Rect::new(6, 1, 3, 3),
                group: 2,
                zone: None,
            },
        ];
        let mut grid = Grid::new(10, 5);
        for room in &rooms {
            grid.fill_rect(&room.rect, room.id);
        }
        Map {
            width: 10,
            height: 5,
            grid,
            rooms,
            zones: Vec::new(),
            connected,
        }
    }

    #[test]
    fn test_clean_map_has_no_issues() {
        assert!(two_room_map(false).audit().is_empty());
    }

    #[test]
    fn test_wrong_connected_flag() {
        let issues = two_room_map(true).audit();
        assert_eq!(
            issues,
            vec![AuditIssue::Connectivity {
                flagged: true,
                reachable: false
            }]
        );
    }

    #[test]
    fn test_corridor_makes_it_connected() {
        let mut map = two_room_map(true);
        for x in 4..6 {
            map.grid.set(x, 2, map.corridor_marker());
        }
        assert!(map.audit().is_empty());
    }

    #[test]
    fn test_overlap_and_stray_values_reported() {
        let mut map = two_room_map(false);
        map.rooms[1].rect = Rect::new(4, 1, 3, 3);
        map.grid.set(9, 4, 7);
        let issues = map.audit();
        assert!(issues.contains(&AuditIssue::Overlap { a: 1, b: 2 }));
        assert!(issues.contains(&AuditIssue::StrayValue { x: 9, y: 4, value: 7 }));
        assert!(issues.iter().any(|i| matches!(i, AuditIssue::MisplacedFloor { room: 2, .. })));
    }

    #[test]
    fn test_id_gap_reported() {
        let mut map = two_room_map(false);
        map.rooms[1].id = 3;
        let issues = map.audit();
        assert!(issues.contains(&AuditIssue::IdOutOfSequence { index: 1, id: 3 }));
    }
}
