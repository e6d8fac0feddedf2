//! Keyboard capture on a dedicated thread, handed to the game loop through
//! a single-slot mailbox.

use std::{io, sync::Arc, thread::{self, JoinHandle}};

use anyhow::Result;
use parking_lot::Mutex;
use tracing::{debug, error};

use crate::cell::Direction;

/// What raw mode delivers for Ctrl+C instead of a SIGINT
const CTRL_C: char = '\u{3}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    #[default]
    North,
    South,
    East,
    West,
    Quit,
}

impl Command {
    /// Maps a keystroke to a command. Anything outside the key set is `None`.
    pub fn from_key(key: char) -> Option<Command> {
        match key {
            'w' => Some(Command::North),
            'a' => Some(Command::West),
            's' => Some(Command::South),
            'd' => Some(Command::East),
            'q' | CTRL_C => Some(Command::Quit),
            _ => None,
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            Command::North => Some(Direction::North),
            Command::South => Some(Direction::South),
            Command::East => Some(Direction::East),
            Command::West => Some(Direction::West),
            Command::Quit => None,
        }
    }
}

/// Last-write-wins mailbox shared between the input thread and the game loop.
///
/// Clones share the same slot. Neither side ever parks on the lock: both spin
/// on `try_lock`, and the lock is only held for a single copy.
#[derive(Debug, Clone, Default)]
pub struct InputChannel {
    latest: Arc<Mutex<Command>>,
}

impl InputChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, command: Command) {
        self.with_slot(|slot| *slot = command);
    }

    pub fn get(&self) -> Command {
        self.with_slot(|slot| *slot)
    }

    /// Spins until the slot is free. The lock is only ever held for a single copy.
    fn with_slot<T>(&self, f: impl FnOnce(&mut Command) -> T) -> T {
        loop {
            if let Some(mut slot) = self.latest.try_lock() {
                return f(&mut slot);
            }
            thread::yield_now();
        }
    }
}

/// Blocking source of keystrokes
pub trait KeySource {
    /// Waits for the next event. `None` means the event was not a character.
    fn read_key(&mut self) -> Result<Option<char>>;
}

/// Starts the thread feeding `channel`. It runs until the process exits, or
/// until the key source fails.
pub fn spawn_input_thread<K>(mut keys: K, channel: InputChannel) -> io::Result<JoinHandle<()>>
where
    K: KeySource + Send + 'static,
{
    thread::Builder::new()
        .name("input".into())
        .spawn(move || loop {
            match keys.read_key() {
                Ok(Some(key)) => {
                    if let Some(command) = Command::from_key(key) {
                        debug!("Accepted key {:?} as {:?}", key, command);
                        channel.set(command);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    error!("Reading keyboard input failed: {}", e);
                    break;
                }
            }
        })
}
