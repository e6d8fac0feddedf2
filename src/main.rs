mod cell;
mod collision;
mod config;
mod food;
mod game;
mod input;
mod logging;
mod render;
mod snake;
mod term;

use anyhow::Result;
use tracing::info;

use crate::config::GameConfig;
use crate::game::{EndReason, SnakeGame};
use crate::input::{spawn_input_thread, InputChannel};
use crate::term::{CrosstermKeys, TermManager};

fn main() -> Result<()> {
    logging::setup()?;

    // The input thread is left running; it dies with the process
    let reason = play()?;
    info!("Game ended: {:?}", reason);
    Ok(())
}

/// Runs one game. The terminal is restored when this returns, error or not.
fn play() -> Result<EndReason> {
    let term = TermManager::new()?;
    let input = InputChannel::new();
    spawn_input_thread(CrosstermKeys, input.clone())?;

    let mut game = SnakeGame::new(term, rand::thread_rng(), input, GameConfig::default())?;
    let reason = game.run()?;
    info!("Final score: {}", game.score());
    Ok(reason)
}
