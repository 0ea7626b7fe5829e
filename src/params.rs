//! Generation parameters.
//!
//! `GenerationParams` is what callers supply (directly, or from a JSON file).
//! Optional fields fall back to defaults derived from the map dimensions when
//! resolved into `ResolvedParams`, which is what the generator consumes.

use crate::constants::*;
use crate::error::ParamsError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Caller-facing generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationParams {
    pub width: usize,
    pub height: usize,
    /// Fraction of the map the room catalog should cover (default 0.5)
    pub goal: Option<f64>,
    /// Minimum room width and height (default 3)
    pub min_size: Option<u32>,
    /// Maximum base room size, before stretching (default derived from the map)
    pub max_size: Option<u32>,
    /// Number of zones to cluster rooms into; 0 or 1 disables zoning
    pub zones: Option<u32>,
    /// Pin the largest room to a canonical position
    pub boss_room: bool,
    /// Cap on the number of placed rooms
    pub max_rooms: Option<usize>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::new(DUNGEON_DEFAULT_WIDTH, DUNGEON_DEFAULT_HEIGHT)
    }
}

impl GenerationParams {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            goal: None,
            min_size: None,
            max_size: None,
            zones: None,
            boss_room: false,
            max_rooms: None,
        }
    }

    pub fn with_goal(mut self, goal: f64) -> Self {
        self.goal = Some(goal);
        self
    }

    pub fn with_room_sizes(mut self, min_size: u32, max_size: u32) -> Self {
        self.min_size = Some(min_size);
        self.max_size = Some(max_size);
        self
    }

    pub fn with_zones(mut self, zones: u32) -> Self {
        self.zones = Some(zones);
        self
    }

    pub fn with_boss_room(mut self, boss_room: bool) -> Self {
        self.boss_room = boss_room;
        self
    }

    pub fn with_max_rooms(mut self, max_rooms: usize) -> Self {
        self.max_rooms = Some(max_rooms);
        self
    }

    /// Load parameters from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ParamsError> {
        let json_str = std::fs::read_to_string(path).map_err(|source| ParamsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json_str).map_err(|source| ParamsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fill in defaults and validate.
    pub fn resolve(&self) -> Result<ResolvedParams, ParamsError> {
        let goal = self.goal.unwrap_or(DEFAULT_AREA_GOAL);
        if !goal.is_finite() || !(0.0..=1.0).contains(&goal) {
            return Err(ParamsError::GoalOutOfRange(goal));
        }

        let min_size = self.min_size.unwrap_or(DEFAULT_MIN_ROOM_SIZE);
        if min_size == 0 {
            return Err(ParamsError::ZeroMinSize);
        }

        let max_size = match self.max_size {
            Some(max) => max,
            None => {
                let derived = self.width.min(self.height) / DEFAULT_MAX_ROOM_SIZE_DIVISOR;
                (derived as u32).max(min_size)
            }
        };
        if min_size > max_size {
            return Err(ParamsError::SizeRange {
                min: min_size,
                max: max_size,
            });
        }

        Ok(ResolvedParams {
            width: self.width,
            height: self.height,
            goal,
            min_size,
            max_size,
            zones: self.zones.unwrap_or(0),
            boss_room: self.boss_room,
            max_rooms: self.max_rooms,
        })
    }
}

/// Validated parameters with every default filled in
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParams {
    pub width: usize,
    pub height: usize,
    pub goal: f64,
    pub min_size: u32,
    pub max_size: u32,
    pub zones: u32,
    pub boss_room: bool,
    pub max_rooms: Option<usize>,
}

impl ResolvedParams {
    /// Total room area the catalog aims for
    pub fn area_goal(&self) -> f64 {
        (self.width * self.height) as f64 * self.goal
    }

    pub fn uses_zones(&self) -> bool {
        self.zones > 1
    }
}
