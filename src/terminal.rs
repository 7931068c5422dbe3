// Terminal capability: the only way the timer talks to the screen.
//
// The core (countdown, sessions, menu) writes through the `Terminal` trait so
// it stays independent of how the console redraws a line or clears itself.
// `ConsoleTerminal` is the real implementation over stdout.

use anyhow::{Context, Result};
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::{self, IsTerminal, Stdout, Write};

pub trait Terminal {
    /// Print a full line of text.
    fn write_line(&mut self, text: &str) -> io::Result<()>;

    /// Print text without a trailing newline and flush, so the user types
    /// right after it.
    fn prompt(&mut self, text: &str) -> io::Result<()>;

    /// Replace the current status line in place.
    fn write_status_line(&mut self, text: &str) -> io::Result<()>;

    /// Leave the last status line on screen and move to a fresh line.
    fn finish_status_line(&mut self) -> io::Result<()>;

    fn clear_screen(&mut self) -> io::Result<()>;
}

/// Console terminal, writing to stdout unless told otherwise.
///
/// On a TTY the status line is an `indicatif` bar showing only its message and
/// the screen is cleared with `crossterm`. When the output is piped the status
/// line falls back to carriage-return overwrites and clearing is skipped.
pub struct ConsoleTerminal<W: Write = Stdout> {
    out: W,
    is_tty: bool,
    style: ProgressStyle,
    status: Option<ProgressBar>,
}

impl ConsoleTerminal<Stdout> {
    pub fn new() -> Result<Self> {
        let out = io::stdout();
        let is_tty = out.is_terminal();
        Self::build(out, is_tty)
    }
}

impl<W: Write> ConsoleTerminal<W> {
    /// Terminal over any writer. Such writers are never treated as a TTY.
    pub fn with_writer(out: W) -> Result<Self> {
        Self::build(out, false)
    }

    fn build(out: W, is_tty: bool) -> Result<Self> {
        let style = ProgressStyle::with_template("{msg}").context("Building status line style")?;
        Ok(ConsoleTerminal {
            out,
            is_tty,
            style,
            status: None,
        })
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Terminal for ConsoleTerminal<W> {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{}", text)?;
        self.out.flush()
    }

    // The TTY branch is only reachable through `new`, where `out` is stdout,
    // so drawing the bar on stdout is the same stream.
    fn write_status_line(&mut self, text: &str) -> io::Result<()> {
        if self.is_tty {
            let style = &self.style;
            let bar = self.status.get_or_insert_with(|| {
                ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout())
                    .with_style(style.clone())
            });
            bar.set_message(text.to_string());
            Ok(())
        } else {
            write!(self.out, "\r{}", text)?;
            self.out.flush()
        }
    }

    fn finish_status_line(&mut self) -> io::Result<()> {
        if self.is_tty {
            if let Some(bar) = self.status.take() {
                bar.finish();
            }
            Ok(())
        } else {
            writeln!(self.out)
        }
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        if !self.is_tty {
            return Ok(());
        }
        execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))
    }
}
