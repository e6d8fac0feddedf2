//! End-of-game detection

use crate::cell::Bounds;
use crate::snake::Snake;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Continue,
    LoseWall,
    LoseSelf,
}

impl GameResult {
    pub fn is_loss(&self) -> bool {
        !matches!(self, GameResult::Continue)
    }
}

/// Checks the snake after it moved. Hitting the border wins over hitting
/// itself when both happen at once.
pub fn evaluate(snake: &Snake, bounds: Bounds) -> GameResult {
    if bounds.is_wall(snake.head()) {
        GameResult::LoseWall
    } else if snake.head_overlaps_body() {
        GameResult::LoseSelf
    } else {
        GameResult::Continue
    }
}
