use tracing::debug;

use crate::cell::{Cell, Direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment {
    cell: Cell,
    // Only ever set on the tail
    pending_growth: bool,
}

/// The snake's body, head first.
pub struct Snake {
    body: Vec<Segment>,
    heading: Direction,
}

impl Snake {
    /// A snake of `size` segments with its head at `head`, trailing behind it
    /// opposite to `heading`.
    pub fn new(head: Cell, size: usize, heading: Direction) -> Self {
        let behind = match heading {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        };

        let mut cells = Vec::with_capacity(size);
        let mut cell = head;
        for _ in 0..size.max(1) {
            cells.push(cell);
            cell = cell.step(behind);
        }

        Self::from_cells(cells, heading)
    }

    /// Builds a snake from explicit cells, head first. Panics on an empty body.
    pub fn from_cells(cells: Vec<Cell>, heading: Direction) -> Self {
        assert!(!cells.is_empty(), "a snake needs at least a head");

        let body = cells.into_iter()
            .map(|cell| Segment { cell, pending_growth: false })
            .collect();
        Snake { body, heading }
    }

    pub fn head(&self) -> Cell {
        self.body[0].cell
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Whether a segment will be added on the next move
    pub fn pending_growth(&self) -> bool {
        self.body.last().map_or(false, |seg| seg.pending_growth)
    }

    /// Segment positions, head first
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().map(|seg| seg.cell)
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.cells().any(|c| c == cell)
    }

    /// True if the head shares its cell with any other segment
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.cells().skip(1).any(|c| c == head)
    }

    /// Moves one step towards `direction`. Each segment takes the place its
    /// predecessor had before the move. Pending growth on the tail appends a
    /// segment where the tail used to be.
    pub fn advance(&mut self, direction: Direction) {
        let new_head = self.head().step(direction);
        self.heading = direction;

        let tail = self.body.len() - 1;
        let old_tail = self.body[tail];

        for i in (1..=tail).rev() {
            self.body[i].cell = self.body[i - 1].cell;
        }
        self.body[0].cell = new_head;

        if old_tail.pending_growth {
            self.body[tail].pending_growth = false;
            self.body.push(Segment { cell: old_tail.cell, pending_growth: false });
            debug!("Snake grew to {} segments", self.body.len());
        }
    }

    /// Requests one extra segment on the next move. Requests don't stack.
    pub fn grow(&mut self) {
        if self.pending_growth() {
            return;
        }

        if let Some(tail) = self.body.last_mut() {
            tail.pending_growth = true;
        }
    }
}
