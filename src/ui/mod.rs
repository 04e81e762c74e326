//! Terminal rendering of the session.
//!
//! The screen is laid out in fixed rows; every sink callback redraws
//! only its own region. Draw failures are dropped, the session never
//! depends on the screen being writable.

use std::io::{self, stdout, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::markup;
use crate::sinks::DisplaySink;

pub(crate) mod input;

const TITLE_ROW: u16 = 0;
const DESCRIPTION_ROW: u16 = 2;
const DESCRIPTION_HEIGHT: u16 = 6;
const IMAGE_ROW: u16 = DESCRIPTION_ROW + DESCRIPTION_HEIGHT;
const TIMER_ROW: u16 = IMAGE_ROW + 2;
const INNER_BAR_ROW: u16 = TIMER_ROW + 3;
const OVERALL_BAR_ROW: u16 = INNER_BAR_ROW + 1;
const HELP_ROW: u16 = OVERALL_BAR_ROW + 2;

/// Columns available for wrapped description text
const TEXT_WIDTH: usize = 76;

/// Width of the progress bars
const BAR_WIDTH: usize = 40;

/// Full-screen terminal frontend.
///
/// Raw mode is enabled for the lifetime of the value so key presses
/// arrive unbuffered; dropping it restores the terminal.
pub(crate) struct Terminal {
    paused: bool,
}

impl Terminal {
    pub(crate) fn new() -> io::Result<Terminal> {
        terminal::enable_raw_mode()?;

        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::Hide,
            Clear(ClearType::All),
            MoveTo(0, TITLE_ROW),
            SetForegroundColor(Color::Cyan),
            Print("stretcher"),
            ResetColor,
        )?;

        let terminal = Terminal { paused: false };
        terminal.draw_help()?;
        Ok(terminal)
    }

    fn draw_timer(&self, text: &str) -> io::Result<()> {
        let mut stdout = stdout();
        let mut lines = text.lines();

        execute!(
            stdout,
            MoveTo(0, TIMER_ROW),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(lines.next().unwrap_or("")),
            ResetColor,
            MoveTo(0, TIMER_ROW + 1),
            Clear(ClearType::CurrentLine),
            Print(lines.next().unwrap_or("")),
        )
    }

    fn draw_description(&self, text: &str) -> io::Result<()> {
        let mut stdout = stdout();

        for row in 0..DESCRIPTION_HEIGHT {
            execute!(
                stdout,
                MoveTo(0, DESCRIPTION_ROW + row),
                Clear(ClearType::CurrentLine)
            )?;
        }

        let lines = markup::wrap(text, TEXT_WIDTH);
        for (row, line) in lines.iter().take(DESCRIPTION_HEIGHT as usize).enumerate() {
            execute!(
                stdout,
                MoveTo(0, DESCRIPTION_ROW + row as u16),
                Print(line)
            )?;
        }

        stdout.flush()
    }

    fn draw_image(&self, image: &str) -> io::Result<()> {
        let mut stdout = stdout();
        execute!(
            stdout,
            MoveTo(0, IMAGE_ROW),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::DarkGrey),
            Print(format!("[{}]", image)),
            ResetColor,
        )
    }

    fn draw_bar(&self, row: u16, label: &str, percent: u8) -> io::Result<()> {
        let mut stdout = stdout();
        execute!(
            stdout,
            MoveTo(0, row),
            Clear(ClearType::CurrentLine),
            Print(label),
            SetForegroundColor(Color::Green),
            Print(markup::bar(percent, BAR_WIDTH)),
            ResetColor,
        )
    }

    fn draw_help(&self) -> io::Result<()> {
        let mut stdout = stdout();

        if self.paused {
            execute!(
                stdout,
                MoveTo(0, HELP_ROW),
                Clear(ClearType::CurrentLine),
                SetForegroundColor(Color::Yellow),
                Print(markup::PAUSED_LINE),
                ResetColor,
            )
        } else {
            execute!(
                stdout,
                MoveTo(0, HELP_ROW),
                Clear(ClearType::CurrentLine),
                SetForegroundColor(Color::DarkGrey),
                Print(markup::HELP_LINE),
                ResetColor,
            )
        }
    }
}

impl DisplaySink for Terminal {
    fn set_timer_text(&mut self, text: &str) {
        let _ = self.draw_timer(text);
    }

    fn set_description(&mut self, text: &str) {
        let _ = self.draw_description(text);
    }

    fn set_image(&mut self, image: &str) {
        let _ = self.draw_image(image);
    }

    fn set_overall_progress(&mut self, percent: u8) {
        let _ = self.draw_bar(OVERALL_BAR_ROW, "Session  ", percent);
    }

    fn set_inner_progress(&mut self, percent: u8) {
        let _ = self.draw_bar(INNER_BAR_ROW, "Exercise ", percent);
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        let _ = self.draw_help();
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // Best effort cleanup
        let mut stdout = stdout();
        let _ = execute!(stdout, MoveTo(0, HELP_ROW + 1), cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}
