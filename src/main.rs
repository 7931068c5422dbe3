// Entrypoint for the focus timer.
// - Keeps `main` small: set up logging, the terminal, the clock and the
//   quote bank, then hand everything to the menu loop.
// - Returns `anyhow::Result`; quitting from the menu exits with status 0.

use anyhow::Result;
use focus_timer::quotes::{QuoteBank, RandomSource};
use focus_timer::terminal::ConsoleTerminal;
use focus_timer::timer::SystemClock;
use focus_timer::ui::main_menu;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Diagnostics go to stderr so they never mix with the timer display.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut term = ConsoleTerminal::new()?;
    let clock = SystemClock::new();
    // Seeded once here; every quote pick reuses this source.
    let quotes = QuoteBank::new(RandomSource::from_time());

    // Blocks until the user quits or stdin closes.
    main_menu(&mut term, std::io::stdin().lock(), &clock, quotes)?;
    Ok(())
}
