//! Zone partitioning constants.

/// Total zone area target, as a multiple of the room area goal
pub const ZONE_AREA_GOAL_FACTOR: f64 = 1.5;
/// Upper bound of the zone area target, as a fraction of the map area
pub const ZONE_AREA_MAX_FRACTION: f64 = 1.0;
