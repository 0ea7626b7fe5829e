/// What occupies a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    /// Floor of the room with this id
    Room(u32),
    /// Doorway or distant corridor
    Corridor,
}

impl Cell {
    /// Interpret a raw grid value. Ids above `room_count` are corridor markers.
    pub fn classify(value: u32, room_count: usize) -> Self {
        if value == 0 {
            Cell::Empty
        } else if value as usize <= room_count {
            Cell::Room(value)
        } else {
            Cell::Corridor
        }
    }

    pub fn is_walkable(&self) -> bool {
        !matches!(self, Cell::Empty)
    }

    /// Character used by the ASCII dump
    pub fn glyph(&self) -> char {
        match self {
            Cell::Empty => '#',
            Cell::Room(_) => '.',
            Cell::Corridor => '+',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Cell::classify(0, 3), Cell::Empty);
        assert_eq!(Cell::classify(1, 3), Cell::Room(1));
        assert_eq!(Cell::classify(3, 3), Cell::Room(3));
        assert_eq!(Cell::classify(4, 3), Cell::Corridor);
    }

    #[test]
    fn test_only_empty_blocks() {
        assert!(!Cell::Empty.is_walkable());
        assert!(Cell::Room(2).is_walkable());
        assert!(Cell::Corridor.is_walkable());
    }
}
