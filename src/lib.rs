//! Procedural dungeon grids.
//!
//! [`generate`] turns a set of [`GenerationParams`] into a [`Map`]: an occupancy
//! grid of non-overlapping rectangular rooms, optionally clustered into zones,
//! joined by doorways and straight corridors. [`player_start`] then picks a spawn
//! point far from the boss room.
//!
//! ```no_run
//! use dungeon_grid::{generate, player_start, DungeonRng, GenerationParams};
//!
//! let params = GenerationParams::new(80, 50).with_zones(4).with_boss_room(true);
//! let map = generate(&params, &mut DungeonRng::new(42)).unwrap();
//! let (x, y) = player_start(&map);
//! assert!(map.is_walkable(x, y));
//! ```

pub mod constants;
pub mod dungeon_gen;
pub mod error;
pub mod grid;
pub mod params;
pub mod pathfinding;
pub mod rng;
pub mod spawning;
pub mod tile;
pub mod union_find;

pub use dungeon_gen::{AuditIssue, Map, Rect, Room, Zone};
pub use error::ParamsError;
pub use grid::Grid;
pub use params::{GenerationParams, ResolvedParams};
pub use rng::DungeonRng;
pub use spawning::{farthest_room_start, player_start};
pub use tile::Cell;

use rand::Rng;

/// Validate `params` and generate one dungeon.
pub fn generate(params: &GenerationParams, rng: &mut impl Rng) -> Result<Map, ParamsError> {
    let resolved = params.resolve()?;
    Ok(dungeon_gen::generate(&resolved, rng))
}

/// Validate `params` and generate until the dungeon is fully connected or
/// `max_attempts` maps have been tried. Returns the last map and the attempts used.
pub fn generate_connected(
    params: &GenerationParams,
    rng: &mut impl Rng,
    max_attempts: u32,
) -> Result<(Map, u32), ParamsError> {
    let resolved = params.resolve()?;
    Ok(dungeon_gen::generate_connected(&resolved, rng, max_attempts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon_gen::placement::rooms_overlap;
    use proptest::prelude::*;

    fn params_strategy() -> impl Strategy<Value = GenerationParams> {
        (
            12usize..64,
            12usize..48,
            0.05f64..0.8,
            0u32..6,
            any::<bool>(),
            prop::option::of(0usize..30),
        )
            .prop_map(|(width, height, goal, zones, boss_room, max_rooms)| {
                let mut params = GenerationParams::new(width, height)
                    .with_goal(goal)
                    .with_zones(zones)
                    .with_boss_room(boss_room);
                params.max_rooms = max_rooms;
                params
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_generated_maps_pass_audit(params in params_strategy(), seed in any::<u64>()) {
            let map = generate(&params, &mut DungeonRng::new(seed)).unwrap();
            let issues = map.audit();
            prop_assert!(issues.is_empty(), "{:?}", issues);
        }

        #[test]
        fn test_no_padded_overlap(params in params_strategy(), seed in any::<u64>()) {
            let map = generate(&params, &mut DungeonRng::new(seed)).unwrap();
            for (i, a) in map.rooms.iter().enumerate() {
                for b in &map.rooms[i + 1..] {
                    prop_assert!(!rooms_overlap(&a.rect, &b.rect));
                }
            }
        }

        #[test]
        fn test_connected_flag_matches_flood_fill(params in params_strategy(), seed in any::<u64>()) {
            let map = generate(&params, &mut DungeonRng::new(seed)).unwrap();
            prop_assert_eq!(map.connected, pathfinding::is_fully_connected(&map));
        }

        #[test]
        fn test_room_cap_respected(params in params_strategy(), seed in any::<u64>()) {
            let map = generate(&params, &mut DungeonRng::new(seed)).unwrap();
            if let Some(cap) = params.max_rooms {
                prop_assert!(map.rooms.len() <= cap);
            }
        }

        #[test]
        fn test_spawn_is_walkable(params in params_strategy(), seed in any::<u64>()) {
            let map = generate(&params, &mut DungeonRng::new(seed)).unwrap();
            if !map.rooms.is_empty() {
                let (x, y) = player_start(&map);
                prop_assert!(map.room_at(x, y).is_some());
                let (x, y) = farthest_room_start(&map);
                prop_assert!(map.room_at(x, y).is_some());
            }
        }
    }

    #[test]
    fn test_small_scenario() {
        let params = GenerationParams::new(21, 21).with_goal(0.5).with_room_sizes(3, 7);
        let map = generate(&params, &mut DungeonRng::new(1234)).unwrap();
        let n = map.rooms.len() as u32;
        assert!(n >= 1);
        let ids: Vec<u32> = map.rooms.iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=n).collect::<Vec<_>>());
        assert!(map.grid.cells().iter().all(|&v| v <= n + 1));
    }

    #[test]
    fn test_boss_room_pinned_in_first_zone() {
        for seed in 0..20 {
            let params = GenerationParams::new(80, 50)
                .with_room_sizes(3, 7)
                .with_zones(4)
                .with_boss_room(true);
            let map = generate(&params, &mut DungeonRng::new(seed)).unwrap();

            assert_eq!(map.zones.len(), 4);
            let zone = map.zones[0];
            let boss = map.rooms[0];
            assert!(map.rooms.iter().all(|r| r.rect.area() <= boss.rect.area()));
            assert_eq!(boss.zone, Some(0));
            assert_eq!(boss.rect.x, zone.x);
            assert_eq!(boss.rect.y, zone.y + (zone.height - boss.rect.height) / 2);
        }
    }

    #[test]
    fn test_oversized_rooms_give_empty_map() {
        let params = GenerationParams::new(10, 10).with_room_sizes(50_000, 50_000);
        let map = generate(&params, &mut DungeonRng::new(1)).unwrap();
        assert!(map.rooms.is_empty());
        assert!(map.connected);
        assert_eq!(player_start(&map), (1, 1));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = GenerationParams::new(40, 40).with_goal(1.5);
        assert!(matches!(
            generate(&params, &mut DungeonRng::new(0)),
            Err(ParamsError::GoalOutOfRange(_))
        ));
    }

    #[test]
    fn test_generate_connected_reports_attempts() {
        let params = GenerationParams::new(60, 40);
        let (map, attempts) = generate_connected(&params, &mut DungeonRng::new(77), 10).unwrap();
        assert!((1..=10).contains(&attempts));
        assert!(map.connected || attempts == 10);
    }
}
