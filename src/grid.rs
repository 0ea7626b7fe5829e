use crate::dungeon_gen::Rect;
use crate::tile::Cell;
use serde::{Serialize, Serializer};

/// Occupancy grid: `0` is empty, `1..=N` is a room id, `N + 1` marks corridors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    cells: Vec<u32>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Build a grid from rows of raw cell values. Rows must share one length.
    pub fn from_rows(rows: &[Vec<u32>]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        let cells = rows.iter().flat_map(|row| row.iter().copied()).collect();
        Self { width, height, cells }
    }

    fn get_index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        self.get_index(x, y).map(|idx| self.cells[idx])
    }

    /// Raw cell value, with out-of-bounds cells reading as empty
    pub fn value(&self, x: i32, y: i32) -> u32 {
        self.get(x, y).unwrap_or(0)
    }

    pub fn set(&mut self, x: i32, y: i32, value: u32) {
        if let Some(idx) = self.get_index(x, y) {
            self.cells[idx] = value;
        }
    }

    /// Whether a player may stand on this cell
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.value(x, y) != 0
    }

    /// Classify a cell given the number of rooms stamped into the grid
    pub fn cell(&self, x: i32, y: i32, room_count: usize) -> Option<Cell> {
        self.get(x, y).map(|value| Cell::classify(value, room_count))
    }

    pub fn fill_rect(&mut self, rect: &Rect, value: u32) {
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                self.set(x, y, value);
            }
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.cells.chunks(self.width.max(1))
    }

    pub fn cells(&self) -> &[u32] {
        &self.cells
    }
}

// Serialized as a row-major matrix, the shape renderers index as grid[y][x]
impl Serialize for Grid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.rows())
    }
}
