//! Game tunables

use std::time::Duration;

/// Time between two simulation steps
pub const TICK_INTERVAL: Duration = Duration::from_millis(90);

/// Probability of a food item appearing on any given tick
pub const SPAWN_CHANCE: f64 = 0.25;

/// Random placement attempts before falling back to scanning for free cells
pub const MAX_SPAWN_ATTEMPTS: u32 = 64;

/// Segments of a freshly created snake
pub const INITIAL_SNAKE_LENGTH: usize = 2;

/// How long the end message stays up before the terminal is restored
pub const GAME_OVER_PAUSE: Duration = Duration::from_millis(1500);

/// Smallest terminal (rows, columns) that leaves room to play
pub const MIN_GRID_HEIGHT: u16 = 5;
pub const MIN_GRID_WIDTH: u16 = 5;

/// Environment variable naming the log file. Logging is off when unset.
pub const LOG_FILE_ENV: &str = "SNAKE_LOG";

pub const DEFAULT_LOG_FILTER: &str = "terminal_snake=info";

pub const SNAKE_HEAD_CHAR: char = '@';
pub const SNAKE_BODY_CHAR: char = 'o';
pub const DEAD_SNAKE_CHAR: char = 'X';
pub const FOOD_CHAR: char = '*';
pub const BORDER_HORIZONTAL_CHAR: char = '_';
pub const BORDER_VERTICAL_CHAR: char = '|';

/// Runtime knobs of a single game
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub tick_interval: Duration,
    pub game_over_pause: Duration,
    pub spawn_chance: f64,
    pub max_spawn_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            tick_interval: TICK_INTERVAL,
            game_over_pause: GAME_OVER_PAUSE,
            spawn_chance: SPAWN_CHANCE,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,
        }
    }
}
