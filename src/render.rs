//! Painting the game onto a character screen

use anyhow::Result;

use crate::cell::{Bounds, Cell};
use crate::config::{
    BORDER_HORIZONTAL_CHAR, BORDER_VERTICAL_CHAR, DEAD_SNAKE_CHAR, FOOD_CHAR, SNAKE_BODY_CHAR, SNAKE_HEAD_CHAR,
};
use crate::food::FoodSet;
use crate::snake::Snake;

/// A grid of character cells the game draws on. Output may be buffered
/// until `flush`.
pub trait Screen {
    /// (rows, columns)
    fn query_dimensions(&self) -> (u16, u16);

    fn move_cursor_to(&mut self, row: u16, col: u16) -> Result<()>;

    /// Writes `ch` at the cursor position
    fn draw_char(&mut self, ch: char) -> Result<()>;

    fn flush(&mut self) -> Result<()>;

    /// Draws `ch` at `cell`. Cells off the screen are ignored.
    fn put(&mut self, cell: Cell, ch: char) -> Result<()> {
        match (u16::try_from(cell.row), u16::try_from(cell.col)) {
            (Ok(row), Ok(col)) => {
                self.move_cursor_to(row, col)?;
                self.draw_char(ch)
            }
            _ => Ok(()),
        }
    }
}

/// Keeps track of what it drew so the next frame can erase exactly that.
#[derive(Debug, Default)]
pub struct Renderer {
    painted: Vec<Cell>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blanks every cell painted by the previous `paint`
    pub fn erase<S: Screen>(&mut self, screen: &mut S) -> Result<()> {
        for cell in self.painted.drain(..) {
            screen.put(cell, ' ')?;
        }
        Ok(())
    }

    pub fn paint<S: Screen>(&mut self, screen: &mut S, snake: &Snake, food: &FoodSet) -> Result<()> {
        self.paint_with(screen, snake, food, SNAKE_HEAD_CHAR, SNAKE_BODY_CHAR)
    }

    /// Final frame of a lost game, the whole snake crossed out
    pub fn paint_dead<S: Screen>(&mut self, screen: &mut S, snake: &Snake, food: &FoodSet) -> Result<()> {
        self.paint_with(screen, snake, food, DEAD_SNAKE_CHAR, DEAD_SNAKE_CHAR)
    }

    fn paint_with<S: Screen>(&mut self, screen: &mut S, snake: &Snake, food: &FoodSet, head: char, body: char) -> Result<()> {
        for cell in food.iter() {
            self.paint_cell(screen, cell, FOOD_CHAR)?;
        }

        for (i, cell) in snake.cells().enumerate() {
            let ch = if i == 0 { head } else { body };
            self.paint_cell(screen, cell, ch)?;
        }

        Ok(())
    }

    fn paint_cell<S: Screen>(&mut self, screen: &mut S, cell: Cell, ch: char) -> Result<()> {
        screen.put(cell, ch)?;
        self.painted.push(cell);
        Ok(())
    }
}

pub fn draw_border<S: Screen>(screen: &mut S, bounds: Bounds) -> Result<()> {
    let (end_row, end_col) = (bounds.max_row(), bounds.max_col());

    for col in 0..bounds.width {
        screen.put(Cell::new(0, col), BORDER_HORIZONTAL_CHAR)?;
        screen.put(Cell::new(end_row, col), BORDER_HORIZONTAL_CHAR)?;
    }

    for row in 1..end_row {
        screen.put(Cell::new(row, 0), BORDER_VERTICAL_CHAR)?;
        screen.put(Cell::new(row, end_col), BORDER_VERTICAL_CHAR)?;
    }

    screen.flush()
}

/// Shows `lines` in a blank box centered on the grid
pub fn show_message<S: Screen>(screen: &mut S, bounds: Bounds, lines: &[&str]) -> Result<()> {
    let msg_height = lines.len() as i32 + 2;
    let msg_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32 + 2;
    let center = bounds.center();
    let top_left = Cell::new(center.row - msg_height / 2, center.col - msg_width / 2);

    // Top and bottom padding rows
    for row in [top_left.row, top_left.row + msg_height - 1] {
        for col_diff in 0..msg_width {
            screen.put(Cell::new(row, top_left.col + col_diff), ' ')?;
        }
    }

    for (i, line) in lines.iter().enumerate() {
        let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
        let row = top_left.row + i as i32 + 1;
        for (col_diff, ch) in padded_line.chars().enumerate() {
            screen.put(Cell::new(row, top_left.col + col_diff as i32), ch)?;
        }
    }

    screen.flush()
}
