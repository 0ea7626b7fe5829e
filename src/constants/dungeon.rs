//! Dungeon-wide defaults and room catalog constants.

/// Default dungeon width used by the CLI
pub const DUNGEON_DEFAULT_WIDTH: usize = 80;
/// Default dungeon height used by the CLI
pub const DUNGEON_DEFAULT_HEIGHT: usize = 50;

/// Fraction of the map area the room catalog aims to cover when no goal is given
pub const DEFAULT_AREA_GOAL: f64 = 0.5;
/// Minimum room width and height when none is given
pub const DEFAULT_MIN_ROOM_SIZE: u32 = 3;
/// Default max room size is the smaller map dimension divided by this
pub const DEFAULT_MAX_ROOM_SIZE_DIVISOR: usize = 4;

/// Chance that a catalog room gets one dimension stretched
pub const ROOM_STRETCH_CHANCE: f64 = 0.7;
/// Cells added to the stretched dimension
pub const ROOM_STRETCH_AMOUNT: u32 = 2;
/// Size pool weights double per step down from max size, capped here so f64 weights stay finite
pub const SIZE_WEIGHT_MAX_EXPONENT: i32 = 60;

/// Spawn point returned when the map has no rooms
pub const FALLBACK_SPAWN: (i32, i32) = (1, 1);

/// Hard ceiling on room size, keeping room dimensions well inside `i32`
pub const MAX_ROOM_SIZE: u32 = 1 << 20;
