//! Room connectivity.
//!
//! Two passes join the placed rooms:
//!
//! 1. Doorways: a single empty cell flanked by two different rooms on one axis
//!    and by empty cells on the other axis becomes a doorway. Each directly
//!    adjacent pair of rooms gets at most one, and only if the two rooms are not
//!    already connected.
//! 2. Corridors: the groups left over are joined by straight corridors across
//!    the gaps between axis-aligned rooms, shortest gaps first.
//!
//! Connectivity is tracked per room in a union-find whose class labels are the
//! smallest room id in the class.

use super::{Rect, Room};
use crate::grid::Grid;
use crate::union_find::UnionFind;
use std::collections::HashMap;

const NEIGHBORS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// An empty cell that would join rooms `r1 < r2` with a one-cell doorway
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalConnectorCandidate {
    pub x: i32,
    pub y: i32,
    pub r1: u32,
    pub r2: u32,
}

/// Straight gap between two rooms that a corridor could span
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gap {
    /// First corridor cell
    pub x: i32,
    pub y: i32,
    /// Corridor length
    pub distance: i32,
    /// How many rows or columns the two rooms share
    pub alignment: i32,
    pub horizontal: bool,
}

/// Best corridor found between two connectivity groups
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupConnector {
    pub g1: u32,
    pub g2: u32,
    pub room1: u32,
    pub room2: u32,
    pub x: i32,
    pub y: i32,
    pub distance: i32,
    pub alignment: i32,
    pub horizontal: bool,
}

impl GroupConnector {
    /// Shorter gaps win, then wider overlaps
    fn beats(&self, other: &GroupConnector) -> bool {
        self.distance < other.distance
            || (self.distance == other.distance && self.alignment > other.alignment)
    }
}

/// Connectivity state shared by both passes.
///
/// Carved cells remember which room carved them so that a corridor touching an
/// older corridor, or brushing past a third room, merges those classes too. That
/// keeps the union-find in step with what a flood fill over the grid would see.
pub struct Connectivity {
    links: UnionFind,
    corridor: u32,
    width: usize,
    owners: Vec<u32>,
}

impl Connectivity {
    pub fn new(grid: &Grid, room_count: usize) -> Self {
        Self {
            // Index 0 is unused so room ids index directly
            links: UnionFind::new(room_count + 1),
            corridor: room_count as u32 + 1,
            width: grid.width,
            owners: vec![0; grid.cells().len()],
        }
    }

    pub fn room_count(&self) -> usize {
        self.corridor as usize - 1
    }

    pub fn same(&mut self, a: u32, b: u32) -> bool {
        self.links.same(a as usize, b as usize)
    }

    pub fn merge(&mut self, a: u32, b: u32) -> bool {
        self.links.union(a as usize, b as usize)
    }

    /// Smallest room id connected to `room`
    pub fn label(&mut self, room: u32) -> u32 {
        self.links.label(room as usize) as u32
    }

    /// True when every room shares room 1's class (trivially true with no rooms)
    pub fn all_connected(&mut self) -> bool {
        (2..=self.room_count()).all(|room| self.links.same(1, room))
    }

    fn owner_index(&self, grid: &Grid, x: i32, y: i32) -> Option<usize> {
        grid.get(x, y)?;
        Some(y as usize * self.width + x as usize)
    }

    /// Carve one corridor cell on behalf of room `owner`. Occupied cells are kept
    /// as they are; anything the cell touches joins the owner's class.
    pub fn carve(&mut self, grid: &mut Grid, x: i32, y: i32, owner: u32) {
        let Some(idx) = self.owner_index(grid, x, y) else {
            return;
        };

        if grid.value(x, y) == 0 {
            grid.set(x, y, self.corridor);
            self.owners[idx] = owner;
        } else {
            self.absorb_contact(grid, x, y, owner);
        }

        for (dx, dy) in NEIGHBORS {
            self.absorb_contact(grid, x + dx, y + dy, owner);
        }
    }

    fn absorb_contact(&mut self, grid: &Grid, x: i32, y: i32, owner: u32) {
        let value = grid.value(x, y);
        if value == 0 {
            return;
        }

        let other = if value == self.corridor {
            match self.owner_index(grid, x, y) {
                Some(idx) => self.owners[idx],
                None => 0,
            }
        } else {
            value
        };

        if other != 0 {
            self.merge(owner, other);
        }
    }
}

/// Scan the interior for doorway cells, in row-major order.
pub fn find_local_candidates(grid: &Grid) -> Vec<LocalConnectorCandidate> {
    let width = grid.width as i32;
    let height = grid.height as i32;
    let mut candidates = Vec::new();

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            if grid.value(x, y) != 0 {
                continue;
            }

            let up = grid.value(x, y - 1);
            let down = grid.value(x, y + 1);
            let left = grid.value(x - 1, y);
            let right = grid.value(x + 1, y);

            // Open above and below, rooms either side: a doorway in a vertical wall.
            // Requiring the perpendicular cells to be empty rules out corners.
            let pair = if up == 0 && down == 0 && left != 0 && right != 0 {
                (left, right)
            } else if left == 0 && right == 0 && up != 0 && down != 0 {
                (up, down)
            } else {
                continue;
            };

            if pair.0 != pair.1 {
                candidates.push(LocalConnectorCandidate {
                    x,
                    y,
                    r1: pair.0.min(pair.1),
                    r2: pair.0.max(pair.1),
                });
            }
        }
    }

    candidates
}

/// Carve one doorway per adjacent room pair that is not yet connected and record
/// each room's resulting group. Returns the number of doorways carved.
pub fn connect_nearby_rooms(grid: &mut Grid, rooms: &mut [Room], links: &mut Connectivity) -> usize {
    puffin::profile_function!();

    let mut candidates = find_local_candidates(grid);
    candidates.sort_by_key(|c| (c.r1, c.r2, c.x, c.y));

    let mut doorways = 0;
    let mut cur = 0;
    while cur < candidates.len() {
        let pair = (candidates[cur].r1, candidates[cur].r2);
        let mut nxt = cur + 1;
        while nxt < candidates.len() && (candidates[nxt].r1, candidates[nxt].r2) == pair {
            nxt += 1;
        }

        if !links.same(pair.0, pair.1) {
            // The middle of the shared wall
            let door = candidates[cur + (nxt - cur) / 2];
            links.merge(door.r1, door.r2);
            links.carve(grid, door.x, door.y, door.r1);
            doorways += 1;
        }

        cur = nxt;
    }

    for room in rooms.iter_mut() {
        room.group = links.label(room.id);
    }

    log::debug!(
        "Doorways: {} candidates, {} carved",
        candidates.len(),
        doorways
    );

    doorways
}

/// Renumber groups to `1..=G`, ordered by their old labels. Returns `G`.
pub fn relabel_groups(rooms: &mut [Room]) -> u32 {
    let mut order: Vec<usize> = (0..rooms.len()).collect();
    order.sort_by_key(|&i| (rooms[i].group, rooms[i].id));

    let mut groups = 0;
    let mut previous = None;
    for i in order {
        let old = rooms[i].group;
        if previous != Some(old) {
            groups += 1;
            previous = Some(old);
        }
        rooms[i].group = groups;
    }

    groups
}

/// The straight gap between two rooms, if they share rows or columns across it.
/// Diagonally offset rooms, and rooms with no gap, have none.
pub fn gap_between(a: &Rect, b: &Rect) -> Option<Gap> {
    let separated_vertically = a.y > b.bottom() || b.y > a.bottom();
    let separated_horizontally = a.x > b.right() || b.x > a.right();

    if separated_vertically {
        if separated_horizontally {
            return None;
        }
        let (y, distance) = if a.y > b.bottom() {
            (b.bottom(), a.y - b.bottom())
        } else {
            (a.bottom(), b.y - a.bottom())
        };
        let lo = a.x.max(b.x);
        let hi = a.right().min(b.right());
        Some(Gap {
            x: (lo + hi) / 2,
            y,
            distance,
            alignment: hi - lo,
            horizontal: false,
        })
    } else if separated_horizontally {
        let (x, distance) = if a.x > b.right() {
            (b.right(), a.x - b.right())
        } else {
            (a.right(), b.x - a.right())
        };
        let lo = a.y.max(b.y);
        let hi = a.bottom().min(b.bottom());
        Some(Gap {
            x,
            y: (lo + hi) / 2,
            distance,
            alignment: hi - lo,
            horizontal: true,
        })
    } else {
        None
    }
}

/// Best corridor for every pair of groups that can be joined, in discovery order.
pub fn best_group_connectors(rooms: &[Room]) -> Vec<GroupConnector> {
    let mut order: Vec<&Room> = rooms.iter().collect();
    order.sort_by_key(|r| (r.group, r.id));

    let mut best: Vec<GroupConnector> = Vec::new();
    let mut index: HashMap<(u32, u32), usize> = HashMap::new();

    for (pos, a) in order.iter().enumerate() {
        for b in &order[pos + 1..] {
            if a.group == b.group {
                continue;
            }
            let Some(gap) = gap_between(&a.rect, &b.rect) else {
                continue;
            };
            if gap.alignment == 0 {
                continue;
            }

            let connector = GroupConnector {
                g1: a.group,
                g2: b.group,
                room1: a.id,
                room2: b.id,
                x: gap.x,
                y: gap.y,
                distance: gap.distance,
                alignment: gap.alignment,
                horizontal: gap.horizontal,
            };

            match index.get(&(connector.g1, connector.g2)) {
                Some(&k) => {
                    if connector.beats(&best[k]) {
                        best[k] = connector;
                    }
                }
                None => {
                    index.insert((connector.g1, connector.g2), best.len());
                    best.push(connector);
                }
            }
        }
    }

    best
}

/// Join the groups left after doorways with straight corridors. Returns whether
/// every room ends up connected.
pub fn connect_distant_groups(grid: &mut Grid, rooms: &mut [Room], links: &mut Connectivity) -> bool {
    puffin::profile_function!();

    let groups = relabel_groups(rooms);
    if groups <= 1 {
        return true;
    }

    let mut connectors = best_group_connectors(rooms);
    connectors.sort_by_key(|c| (c.distance, c.alignment));

    let mut corridors = 0;
    for connector in &connectors {
        if links.same(connector.room1, connector.room2) {
            continue;
        }
        links.merge(connector.room1, connector.room2);
        carve_corridor(grid, links, connector);
        corridors += 1;
    }

    let connected = links.all_connected();
    log::debug!(
        "Corridors: {} groups, {} candidates, {} carved, connected={}",
        groups,
        connectors.len(),
        corridors,
        connected
    );

    connected
}

fn carve_corridor(grid: &mut Grid, links: &mut Connectivity, connector: &GroupConnector) {
    for offset in 0..connector.distance {
        let (x, y) = if connector.horizontal {
            (connector.x + offset, connector.y)
        } else {
            (connector.x, connector.y + offset)
        };
        links.carve(grid, x, y, connector.room1);
    }
}
