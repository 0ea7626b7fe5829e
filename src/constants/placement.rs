//! Room placement constants.

/// Random-position attempts per room when placing inside a zone
pub const ZONE_PLACEMENT_ATTEMPTS: u32 = 100;
/// Random-position attempts per room when placing anywhere on the map
pub const FREE_PLACEMENT_ATTEMPTS: u32 = 1000;

/// Padding kept around ordinary rooms
pub const ROOM_BORDER: i32 = 1;
/// Padding kept around large rooms
pub const LARGE_ROOM_BORDER: i32 = 3;
/// Both dimensions must reach this for a room to count as large
pub const LARGE_ROOM_MIN_DIMENSION: i32 = 7;
