//! Food items and where new ones appear

use rand::{seq::SliceRandom, Rng};
use tracing::debug;

use crate::cell::{Bounds, Cell};
use crate::snake::Snake;

/// Food on the grid, in the order it was placed
#[derive(Debug, Default)]
pub struct FoodSet {
    items: Vec<Cell>,
}

impl FoodSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.items.contains(&cell)
    }

    /// Removes the item at `cell`, returning whether there was one
    pub fn remove(&mut self, cell: Cell) -> bool {
        match self.items.iter().position(|c| *c == cell) {
            Some(i) => {
                self.items.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn push(&mut self, cell: Cell) {
        self.items.push(cell);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.items.iter().copied()
    }
}

pub struct FoodSpawner {
    chance: f64,
    max_attempts: u32,
}

impl FoodSpawner {
    pub fn new(chance: f64, max_attempts: u32) -> Self {
        FoodSpawner { chance: chance.clamp(0.0, 1.0), max_attempts }
    }

    /// Rolls for a new food item and places it on a free interior cell.
    /// Returns the new item, or `None` if the roll failed or the grid is full.
    pub fn spawn<R: Rng>(&self, snake: &Snake, food: &mut FoodSet, bounds: Bounds, rng: &mut R) -> Option<Cell> {
        if !rng.gen_bool(self.chance) {
            return None;
        }

        let is_free = |cell: Cell| !snake.occupies(cell) && !food.contains(cell);

        let mut cell = self.random_attempts(bounds, rng).find(|cell| is_free(*cell));
        if cell.is_none() {
            // Crowded grid, pick among what's left
            let choices: Vec<Cell> = bounds.interior().filter(|cell| is_free(*cell)).collect();
            cell = choices.choose(rng).copied();
        }

        match cell {
            Some(cell) => {
                debug!("Spawned food at {:?}, {} on the grid", cell, food.len() + 1);
                food.push(cell);
            }
            None => debug!("No free cell left for food"),
        }

        cell
    }

    fn random_attempts<'a, R: Rng>(&self, bounds: Bounds, rng: &'a mut R) -> impl Iterator<Item = Cell> + 'a {
        let attempts = if bounds.height > 2 && bounds.width > 2 { self.max_attempts } else { 0 };

        (0..attempts).map(move |_| Cell::new(
            rng.gen_range(1..bounds.max_row()),
            rng.gen_range(1..bounds.max_col()),
        ))
    }
}
