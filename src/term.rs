use std::io::{stdout, BufWriter, Stdout, Write};

use anyhow::Result;
use crossterm::event::{read, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};
use tracing::error;

use crate::input::KeySource;
use crate::render::Screen;

/// The real terminal. Raw mode and the alternate screen last as long as
/// this value does.
pub struct TermManager {
    width: u16,
    height: u16,
    stdout: BufWriter<Stdout>,
}

/// Blocking keyboard reader
pub struct CrosstermKeys;

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        let mut stdout = stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::DisableBlinking,
        )?;

        Ok(TermManager { width, height, stdout: BufWriter::new(stdout) })
    }
}

impl Screen for TermManager {
    fn query_dimensions(&self) -> (u16, u16) {
        (self.height, self.width)
    }

    fn move_cursor_to(&mut self, row: u16, col: u16) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(col, row))?;
        Ok(())
    }

    fn draw_char(&mut self, ch: char) -> Result<()> {
        queue!(self.stdout, style::Print(ch))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if terminal::disable_raw_mode().is_err() {
            error!("Failed to disable raw mode");
        }

        if execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen).is_err() {
            error!("Failed to leave alternate screen");
        }
    }
}

impl KeySource for CrosstermKeys {
    fn read_key(&mut self) -> Result<Option<char>> {
        let key = match read()? {
            Event::Key(KeyEvent { code: KeyCode::Char('c'), modifiers }) if modifiers.contains(KeyModifiers::CONTROL) => {
                Some('\u{3}')
            }
            Event::Key(KeyEvent { code: KeyCode::Char(ch), .. }) => Some(ch),
            _ => None,
        };

        Ok(key)
    }
}
