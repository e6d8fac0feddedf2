use std::thread::sleep;

use anyhow::{bail, Result};
use rand::Rng;
use tracing::{debug, info};

use crate::cell::{Bounds, Direction};
use crate::collision::{evaluate, GameResult};
use crate::config::{GameConfig, INITIAL_SNAKE_LENGTH, MIN_GRID_HEIGHT, MIN_GRID_WIDTH};
use crate::food::{FoodSet, FoodSpawner};
use crate::input::{Command, InputChannel};
use crate::render::{draw_border, show_message, Renderer, Screen};
use crate::snake::Snake;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Quit,
    Lost(GameResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Running,
    Ended(EndReason),
}

pub struct SnakeGame<S: Screen, R: Rng> {
    screen: S,
    rng: R,
    input: InputChannel,
    config: GameConfig,
    bounds: Bounds,
    snake: Snake,
    food: FoodSet,
    spawner: FoodSpawner,
    renderer: Renderer,
    eaten: usize,
    state: GameState,
}

impl<S: Screen, R: Rng> SnakeGame<S, R> {
    /// Sets up a fresh game covering the whole screen and draws the border.
    pub fn new(mut screen: S, rng: R, input: InputChannel, config: GameConfig) -> Result<Self> {
        let (height, width) = screen.query_dimensions();
        if height < MIN_GRID_HEIGHT || width < MIN_GRID_WIDTH {
            bail!(
                "Terminal is {}x{}, need at least {}x{}",
                width, height, MIN_GRID_WIDTH, MIN_GRID_HEIGHT
            );
        }

        let bounds = Bounds::new(height as i32, width as i32);
        let snake = Snake::new(bounds.center(), INITIAL_SNAKE_LENGTH, Direction::North);
        let spawner = FoodSpawner::new(config.spawn_chance, config.max_spawn_attempts);

        draw_border(&mut screen, bounds)?;
        info!("New game on a {}x{} grid", width, height);

        Ok(SnakeGame {
            screen,
            rng,
            input,
            config,
            bounds,
            snake,
            food: FoodSet::new(),
            spawner,
            renderer: Renderer::new(),
            eaten: 0,
            state: GameState::Running,
        })
    }

    /// Food items eaten so far
    pub fn score(&self) -> usize {
        self.eaten
    }

    /// One simulation step: erase, move, check, spawn, paint. Does not sleep.
    pub fn tick(&mut self) -> Result<GameState> {
        if self.state != GameState::Running {
            return Ok(self.state);
        }

        self.renderer.erase(&mut self.screen)?;

        let direction = self.input.get().direction().unwrap_or_else(|| self.snake.heading());
        self.snake.advance(direction);

        if self.food.remove(self.snake.head()) {
            self.eaten += 1;
            self.snake.grow();
            debug!("Ate food at {:?}, score {}, length {}", self.snake.head(), self.eaten, self.snake.len());
        }

        let result = evaluate(&self.snake, self.bounds);
        if result.is_loss() {
            info!("Game lost: {:?}", result);
            self.renderer.paint_dead(&mut self.screen, &self.snake, &self.food)?;
            self.screen.flush()?;
            self.state = GameState::Ended(EndReason::Lost(result));
            return Ok(self.state);
        }

        self.spawner.spawn(&self.snake, &mut self.food, self.bounds, &mut self.rng);

        self.renderer.paint(&mut self.screen, &self.snake, &self.food)?;
        self.screen.flush()?;

        Ok(self.state)
    }

    /// Plays until the snake dies or the player quits, then shows the end
    /// message for a moment.
    pub fn run(&mut self) -> Result<EndReason> {
        let reason = loop {
            if let GameState::Ended(reason) = self.tick()? {
                break reason;
            }

            sleep(self.config.tick_interval);

            if self.input.get() == Command::Quit {
                info!("Player quit");
                self.state = GameState::Ended(EndReason::Quit);
                break EndReason::Quit;
            }
        };

        self.game_over(reason)?;
        Ok(reason)
    }

    fn game_over(&mut self, reason: EndReason) -> Result<()> {
        let score = format!("Score: {}", self.eaten);
        let mut lines = match reason {
            EndReason::Quit => vec!["Bye!"],
            EndReason::Lost(GameResult::LoseWall) => vec!["Game over!", "You hit a wall"],
            EndReason::Lost(_) => vec!["Game over!", "You ran into yourself"],
        };
        lines.push(&score);

        show_message(&mut self.screen, self.bounds, &lines)?;
        sleep(self.config.game_over_pause);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::config::{DEAD_SNAKE_CHAR, FOOD_CHAR, SNAKE_BODY_CHAR, SNAKE_HEAD_CHAR};
    use crate::render::testing::MemoryScreen;
    use rand::{rngs::StdRng, SeedableRng};
    use std::time::Duration;

    fn quiet_config(spawn_chance: f64) -> GameConfig {
        GameConfig {
            tick_interval: Duration::ZERO,
            game_over_pause: Duration::ZERO,
            spawn_chance,
            ..GameConfig::default()
        }
    }

    fn new_game(height: u16, width: u16, spawn_chance: f64) -> (SnakeGame<MemoryScreen, StdRng>, InputChannel) {
        let input = InputChannel::new();
        let game = SnakeGame::new(
            MemoryScreen::new(height, width),
            StdRng::seed_from_u64(42),
            input.clone(),
            quiet_config(spawn_chance),
        ).unwrap();
        (game, input)
    }

    #[test]
    fn test_rejects_tiny_terminal() {
        let res = SnakeGame::new(MemoryScreen::new(4, 40), StdRng::seed_from_u64(0), InputChannel::new(), quiet_config(0.0));
        assert!(res.is_err());
    }

    #[test]
    fn test_initial_state() {
        let (game, _) = new_game(20, 20, 0.0);

        assert_eq!(game.state, GameState::Running);
        assert_eq!(game.snake.cells().collect::<Vec<_>>(), vec![Cell::new(10, 10), Cell::new(11, 10)]);
        assert_eq!(game.food.len(), 0);
        assert_eq!(game.screen.at(0, 3), '_');
        assert_eq!(game.screen.at(3, 0), '|');
    }

    #[test]
    fn test_tick_moves_and_redraws() {
        let (mut game, input) = new_game(20, 20, 0.0);
        input.set(Command::East);

        assert_eq!(game.tick().unwrap(), GameState::Running);
        assert_eq!(game.snake.head(), Cell::new(10, 11));
        assert_eq!(game.screen.at(10, 11), SNAKE_HEAD_CHAR);
        assert_eq!(game.screen.at(10, 10), SNAKE_BODY_CHAR);

        game.tick().unwrap();
        assert_eq!(game.screen.at(10, 12), SNAKE_HEAD_CHAR);
        assert_eq!(game.screen.at(10, 11), SNAKE_BODY_CHAR);
        // Erased from the previous frame
        assert_eq!(game.screen.at(10, 10), ' ');
    }

    #[test]
    fn test_quit_keeps_heading() {
        let (mut game, input) = new_game(20, 20, 0.0);
        input.set(Command::West);
        game.tick().unwrap();
        input.set(Command::Quit);
        game.tick().unwrap();

        assert_eq!(game.snake.head(), Cell::new(10, 8));
    }

    #[test]
    fn test_eating_grows_on_next_tick() {
        let (mut game, _) = new_game(20, 20, 0.0);
        game.food.push(Cell::new(9, 10));

        game.tick().unwrap();
        assert_eq!(game.snake.head(), Cell::new(9, 10));
        assert_eq!(game.food.len(), 0);
        assert_eq!(game.score(), 1);
        assert_eq!(game.snake.len(), 2);
        assert!(game.snake.pending_growth());

        game.tick().unwrap();
        assert_eq!(
            game.snake.cells().collect::<Vec<_>>(),
            vec![Cell::new(8, 10), Cell::new(9, 10), Cell::new(10, 10)]
        );
    }

    #[test]
    fn test_spawned_food_is_painted() {
        let (mut game, input) = new_game(20, 20, 1.0);
        input.set(Command::East);
        game.tick().unwrap();

        assert_eq!(game.food.len(), 1);
        let food = game.food.iter().next().unwrap();
        assert!(!game.snake.occupies(food));
        assert_eq!(game.screen.at(food.row, food.col), FOOD_CHAR);
    }

    #[test]
    fn test_segments_match_eaten_food() {
        let (mut game, input) = new_game(30, 30, 1.0);
        let path = [Command::East, Command::South, Command::West, Command::North];

        for i in 0..40 {
            input.set(path[(i / 4) % 4]);
            if game.tick().unwrap() != GameState::Running {
                break;
            }
            let snake = &game.snake;
            assert_eq!(snake.len() + snake.pending_growth() as usize, INITIAL_SNAKE_LENGTH + game.score());
        }
    }

    #[test]
    fn test_wall_ends_game() {
        let (mut game, _) = new_game(10, 10, 0.0);

        for _ in 0..4 {
            assert_eq!(game.tick().unwrap(), GameState::Running);
        }
        assert_eq!(game.tick().unwrap(), GameState::Ended(EndReason::Lost(GameResult::LoseWall)));
        assert_eq!(game.snake.head().row, 0);

        // Ended is terminal
        assert_eq!(game.tick().unwrap(), GameState::Ended(EndReason::Lost(GameResult::LoseWall)));
        assert_eq!(game.snake.head().row, 0);
    }

    #[test]
    fn test_run_until_wall() {
        let (mut game, _) = new_game(10, 30, 0.0);

        assert_eq!(game.run().unwrap(), EndReason::Lost(GameResult::LoseWall));
        assert!(game.screen.text().contains("You hit a wall"));
    }

    #[test]
    fn test_lost_game_leaves_dead_snake_on_screen() {
        let (mut game, _) = new_game(10, 10, 0.0);
        game.food.push(Cell::new(7, 2));
        while game.tick().unwrap() == GameState::Running {}

        // Head on the top border, neck just below it
        assert_eq!(game.screen.at(0, 5), DEAD_SNAKE_CHAR);
        assert_eq!(game.screen.at(1, 5), DEAD_SNAKE_CHAR);
        assert_eq!(game.screen.at(7, 2), FOOD_CHAR);
    }

    #[test]
    fn test_two_segment_reversal_swaps_head_and_neck() {
        let (mut game, input) = new_game(20, 20, 0.0);
        input.set(Command::South);

        assert_eq!(game.tick().unwrap(), GameState::Running);
        assert_eq!(game.snake.cells().collect::<Vec<_>>(), vec![Cell::new(11, 10), Cell::new(10, 10)]);
        assert_eq!(game.snake.heading(), Direction::South);
    }

    #[test]
    fn test_run_until_self_hit() {
        let (mut game, input) = new_game(20, 30, 0.0);
        game.food.push(Cell::new(9, 15));
        game.tick().unwrap();
        game.tick().unwrap();
        assert_eq!(game.snake.len(), 3);

        // Turning back into the neck
        input.set(Command::South);
        assert_eq!(game.run().unwrap(), EndReason::Lost(GameResult::LoseSelf));
        assert!(game.screen.text().contains("You ran into yourself"));
    }

    #[test]
    fn test_run_until_quit() {
        let (mut game, input) = new_game(40, 40, 0.0);
        input.set(Command::Quit);

        assert_eq!(game.run().unwrap(), EndReason::Quit);
        assert_eq!(game.state, GameState::Ended(EndReason::Quit));
        assert_eq!(game.snake.head(), Cell::new(19, 20));
        assert!(game.screen.text().contains("Bye!"));
    }

    #[test]
    fn test_default_heading_is_north() {
        let (game, _) = new_game(20, 20, 0.0);
        assert_eq!(game.snake.heading(), Direction::North);
    }
}
