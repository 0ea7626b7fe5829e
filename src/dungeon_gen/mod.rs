//! Procedural dungeon generation.
//!
//! Rooms are synthesized to cover an area goal, optionally clustered into zones,
//! scattered without overlap, stamped into an occupancy grid and then connected:
//! first by single-cell doorways between directly adjacent rooms, then by straight
//! corridors between the groups that remain.
//!
//! Generation never fails. Rooms that cannot be placed are dropped, and a map whose
//! rooms could not all be joined is returned with `connected == false`.

pub mod audit;
pub mod catalog;
pub mod connect;
pub mod placement;
pub mod zones;

use crate::grid::Grid;
use crate::params::ResolvedParams;
use crate::tile::Cell;
use rand::Rng;
use serde::Serialize;

pub use audit::AuditIssue;
pub use connect::{GroupConnector, LocalConnectorCandidate};
pub use placement::{Placement, RoomBudget, RoomCandidate};

/// A rectangle representing a room or region
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if a point is inside this rectangle
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    /// One past the last column
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// One past the last row
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Whether the rectangles come within `border` cells of each other.
    /// With a border of 0 this is plain intersection.
    pub fn overlaps_with_border(&self, other: &Rect, border: i32) -> bool {
        if self.x >= other.right() + border || other.x >= self.right() + border {
            return false;
        }
        if self.y >= other.bottom() + border || other.y >= self.bottom() + border {
            return false;
        }
        true
    }
}

/// Spatial cluster used to bias room placement
pub type Zone = Rect;

/// A placed room
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Room {
    /// 1-based id, also the value stamped into the grid
    pub id: u32,
    #[serde(flatten)]
    pub rect: Rect,
    /// Connectivity group after doorways are carved, relabelled to `1..=G`
    pub group: u32,
    /// Index of the zone the room was placed in, if any
    pub zone: Option<usize>,
}

/// A finished dungeon
#[derive(Clone, Debug, Serialize)]
pub struct Map {
    pub width: usize,
    pub height: usize,
    pub grid: Grid,
    /// Ordered by id; `rooms[0]` is the boss room
    pub rooms: Vec<Room>,
    pub zones: Vec<Zone>,
    /// Whether every room ended up in one connectivity class
    pub connected: bool,
}

impl Map {
    /// Value stamped into corridor and doorway cells
    pub fn corridor_marker(&self) -> u32 {
        self.rooms.len() as u32 + 1
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.grid.is_walkable(x, y)
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.grid.cell(x, y, self.rooms.len())
    }

    pub fn room(&self, id: u32) -> Option<&Room> {
        let index = (id as usize).checked_sub(1)?;
        self.rooms.get(index)
    }

    /// The first room in placement order, used as the traversal origin for spawning
    pub fn boss_room(&self) -> Option<&Room> {
        self.rooms.first()
    }

    /// Room whose floor covers this cell
    pub fn room_at(&self, x: i32, y: i32) -> Option<&Room> {
        match self.cell(x, y)? {
            Cell::Room(id) => self.room(id),
            _ => None,
        }
    }

    /// Number of distinct connectivity groups left after doorways
    pub fn group_count(&self) -> u32 {
        self.rooms.iter().map(|r| r.group).max().unwrap_or(0)
    }

    /// Check structural invariants. An empty list means the map is sound.
    pub fn audit(&self) -> Vec<AuditIssue> {
        audit::audit(self)
    }
}

/// Generate a dungeon from resolved parameters.
pub fn generate(params: &ResolvedParams, rng: &mut impl Rng) -> Map {
    puffin::profile_function!();

    let width = params.width as i32;
    let height = params.height as i32;

    let mut candidates = catalog::build_catalog(params, rng);

    let zones = if params.uses_zones() {
        zones::partition(params, rng)
    } else {
        Vec::new()
    };

    let mut budget = RoomBudget::new(params.max_rooms);

    if params.boss_room {
        placement::pin_boss_room(&mut candidates, zones.first(), width, height, &mut budget);
    }

    if !zones.is_empty() {
        placement::place_by_zone(&mut candidates, &zones, width, height, &mut budget, rng);
    }
    placement::place_freely(&mut candidates, width, height, &mut budget, rng);

    let mut rooms = placement::into_rooms(candidates);
    let mut grid = Grid::new(params.width, params.height);
    placement::rasterize(&mut grid, &rooms);

    let mut links = connect::Connectivity::new(&grid, rooms.len());
    connect::connect_nearby_rooms(&mut grid, &mut rooms, &mut links);
    let connected = connect::connect_distant_groups(&mut grid, &mut rooms, &mut links);

    let map = Map {
        width: params.width,
        height: params.height,
        grid,
        rooms,
        zones,
        connected,
    };

    log::info!(
        "Generated {}x{} dungeon: {} rooms, {} groups, {} zones, connected={}",
        map.width,
        map.height,
        map.rooms.len(),
        map.group_count(),
        map.zones.len(),
        map.connected
    );

    map
}

/// Regenerate until the map is fully connected, giving up after `max_attempts`.
/// Returns the last map produced and the number of attempts used.
pub fn generate_connected(
    params: &ResolvedParams,
    rng: &mut impl Rng,
    max_attempts: u32,
) -> (Map, u32) {
    let mut attempts = 1;
    let mut map = generate(params, rng);
    while !map.connected && attempts < max_attempts {
        log::debug!("Attempt {} left the dungeon disconnected, retrying", attempts);
        map = generate(params, rng);
        attempts += 1;
    }
    (map, attempts)
}
