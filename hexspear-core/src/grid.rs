//! Hex board geometry with offset (odd-r) coordinates

use serde::{Deserialize, Serialize};

/// Offset hex coordinates (column, row)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub q: i8,
    pub r: i8,
}

impl Pos {
    pub const fn new(q: i8, r: i8) -> Self {
        Self { q, r }
    }
}

/// One of the six board directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Side {
    UpRight = 0,
    Right = 1,
    DownRight = 2,
    DownLeft = 3,
    Left = 4,
    UpLeft = 5,
}

/// All sides in discriminant order.
pub const ALL_SIDES: [Side; 6] = [
    Side::UpRight,
    Side::Right,
    Side::DownRight,
    Side::DownLeft,
    Side::Left,
    Side::UpLeft,
];

/// Direction deltas (dq, dr) for even rows, indexed by `Side`.
const EVEN_ROW_DELTAS: [(i8, i8); 6] = [
    (0, -1),  // UpRight
    (1, 0),   // Right
    (0, 1),   // DownRight
    (-1, 1),  // DownLeft
    (-1, 0),  // Left
    (-1, -1), // UpLeft
];

/// Direction deltas (dq, dr) for odd rows, indexed by `Side`.
const ODD_ROW_DELTAS: [(i8, i8); 6] = [
    (1, -1),  // UpRight
    (1, 0),   // Right
    (1, 1),   // DownRight
    (0, 1),   // DownLeft
    (-1, 0),  // Left
    (0, -1),  // UpLeft
];

impl Side {
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Side {
        ALL_SIDES[(index % 6) as usize]
    }

    /// The side facing back at this one.
    pub fn opposite(self) -> Side {
        Side::from_index((self.index() + 3) % 6)
    }

    /// Coordinate delta for this direction given the row parity (r & 1).
    fn delta(self, parity: i8) -> (i8, i8) {
        if parity == 0 {
            EVEN_ROW_DELTAS[self.index() as usize]
        } else {
            ODD_ROW_DELTAS[self.index() as usize]
        }
    }
}

/// Board shape: `height` offset rows, odd rows one cell narrower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i8,
    height: i8,
}

impl Grid {
    pub const fn new(width: i8, height: i8) -> Self {
        Self { width, height }
    }

    pub const fn width(&self) -> i8 {
        self.width
    }

    pub const fn height(&self) -> i8 {
        self.height
    }

    /// Cells in row `r` (odd rows lose one).
    pub const fn row_width(&self, r: i8) -> i8 {
        self.width - (r & 1)
    }

    /// Check if a position is on the board.
    pub fn contains(&self, pos: Pos) -> bool {
        pos.r >= 0 && pos.r < self.height && pos.q >= 0 && pos.q < self.row_width(pos.r)
    }

    /// Adjacent position in a direction, or None past the edge.
    pub fn neighbor(&self, pos: Pos, side: Side) -> Option<Pos> {
        let (dq, dr) = side.delta(pos.r & 1);
        let next = Pos::new(pos.q + dq, pos.r + dr);
        self.contains(next).then_some(next)
    }

    /// Direction from `a` to an adjacent `b`; None when not adjacent.
    /// Callers are expected to pass already-verified-adjacent pairs.
    pub fn direction_between(&self, a: Pos, b: Pos) -> Option<Side> {
        let diff = (b.q - a.q, b.r - a.r);
        ALL_SIDES.into_iter().find(|side| side.delta(a.r & 1) == diff)
    }

    /// Iterate every position on the board, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let grid = *self;
        (0..grid.height).flat_map(move |r| (0..grid.row_width(r)).map(move |q| Pos::new(q, r)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_widths() {
        let grid = Grid::new(5, 5);
        assert_eq!(grid.row_width(0), 5);
        assert_eq!(grid.row_width(1), 4);
        assert!(grid.contains(Pos::new(4, 2)));
        assert!(!grid.contains(Pos::new(4, 1)));
        assert!(!grid.contains(Pos::new(0, 5)));
        assert!(!grid.contains(Pos::new(-1, 0)));
    }

    #[test]
    fn test_parity_adjacency() {
        let grid = Grid::new(5, 5);
        // Even row
        assert_eq!(grid.neighbor(Pos::new(2, 2), Side::UpRight), Some(Pos::new(2, 1)));
        assert_eq!(grid.neighbor(Pos::new(2, 2), Side::DownLeft), Some(Pos::new(1, 3)));
        // Odd row
        assert_eq!(grid.neighbor(Pos::new(2, 1), Side::UpRight), Some(Pos::new(3, 0)));
        assert_eq!(grid.neighbor(Pos::new(2, 1), Side::UpLeft), Some(Pos::new(2, 0)));
    }

    #[test]
    fn test_neighbor_off_board() {
        let grid = Grid::new(5, 5);
        assert_eq!(grid.neighbor(Pos::new(4, 2), Side::Right), None);
        assert_eq!(grid.neighbor(Pos::new(0, 0), Side::UpRight), None);
        // (3,1) is the last cell of an odd row
        assert_eq!(grid.neighbor(Pos::new(3, 1), Side::Right), None);
    }

    #[test]
    fn test_direction_between_inverts_neighbor() {
        let grid = Grid::new(5, 5);
        for side in ALL_SIDES {
            let from = Pos::new(2, 2);
            if let Some(to) = grid.neighbor(from, side) {
                assert_eq!(grid.direction_between(from, to), Some(side));
                assert_eq!(grid.direction_between(to, from), Some(side.opposite()));
            }
        }
        assert_eq!(grid.direction_between(Pos::new(0, 0), Pos::new(3, 3)), None);
    }

    #[test]
    fn test_opposite() {
        assert_eq!(Side::UpRight.opposite(), Side::DownLeft);
        assert_eq!(Side::Right.opposite(), Side::Left);
        assert_eq!(Side::DownRight.opposite(), Side::UpLeft);
        assert_eq!(Side::Left.opposite().opposite(), Side::Left);
    }

    #[test]
    fn test_position_count() {
        // 5 + 4 + 5 + 4 + 5 cells on the default board
        let grid = Grid::new(5, 5);
        assert_eq!(grid.positions().count(), 23);
    }
}
