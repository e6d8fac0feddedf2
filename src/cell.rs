//! Grid positions and movement

/// A position on the grid. Row 0 is the top border, column 0 the left one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

/// Size of the whole grid, border included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub height: i32,
    pub width: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self {
        Cell { row, col }
    }

    /// The neighbouring cell one step towards `direction`
    pub fn step(&self, direction: Direction) -> Cell {
        let (d_row, d_col) = match direction {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
        };

        Cell::new(self.row + d_row, self.col + d_col)
    }
}

impl Bounds {
    pub fn new(height: i32, width: i32) -> Self {
        Bounds { height, width }
    }

    pub fn max_row(&self) -> i32 {
        self.height - 1
    }

    pub fn max_col(&self) -> i32 {
        self.width - 1
    }

    /// True for border cells and anything beyond them
    pub fn is_wall(&self, cell: Cell) -> bool {
        cell.row <= 0 || cell.col <= 0 || cell.row >= self.max_row() || cell.col >= self.max_col()
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.height / 2, self.width / 2)
    }

    /// Every playable cell, row by row
    pub fn interior(&self) -> impl Iterator<Item = Cell> {
        let (max_row, max_col) = (self.max_row(), self.max_col());
        (1..max_row).flat_map(move |row| (1..max_col).map(move |col| Cell::new(row, col)))
    }
}
