// UI layer: the numbered main menu and the flows behind each entry.
// Everything here is synchronous; a selected session blocks the loop until
// its last countdown finishes.

use crate::error::{Field, InputError};
use crate::input::TokenReader;
use crate::quotes::QuoteBank;
use crate::session::{SessionRunner, TimerConfig, DEFAULT_BREAK_MINUTES, DEFAULT_FOCUS_MINUTES};
use crate::terminal::Terminal;
use crate::timer::Clock;
use anyhow::{Context, Result};
use std::io::BufRead;

const RULE: &str = "============================================";
const INVALID_INPUT: &str = "Invalid input. Please enter a number.";
const INVALID_SELECTION: &str = "Invalid menu selection. Please choose 1, 2, or 3.";
const FAREWELL: &str = "Exiting the program. Go reach today's focus goal!";

/// Main interactive menu. Runs until the user picks "Quit" or standard input
/// is closed, both of which end the program successfully.
pub fn main_menu<R: BufRead>(
    term: &mut dyn Terminal,
    input: R,
    clock: &dyn Clock,
    mut quotes: QuoteBank,
) -> Result<()> {
    let mut input = TokenReader::new(input);

    loop {
        show_menu(term)?;

        let choice = match input.read_int(Field::MenuChoice) {
            Ok(choice) => Some(choice),
            // Too large to be a number at all; same treatment as 7.
            Err(InputError::Range { .. }) => None,
            Err(InputError::Parse { token }) => {
                // Straight back to the menu, without the "press enter" step.
                tracing::warn!(%token, "menu choice is not a number");
                term.write_line(INVALID_INPUT)?;
                input.discard_line();
                continue;
            }
            Err(InputError::Eof) => return farewell(term),
            Err(e) => return Err(e).context("Reading menu choice"),
        };

        match choice {
            Some(1) => {
                SessionRunner::new(term, clock, &mut quotes).run_default()?;
            }
            Some(2) => match configure_custom(term, &mut input) {
                Ok(config) => {
                    SessionRunner::new(term, clock, &mut quotes).run_custom(&config)?;
                }
                Err(InputError::Eof) => return farewell(term),
                Err(e) if e.is_recoverable() => {
                    tracing::warn!(error = %e, "custom configuration rejected");
                    term.write_line(&describe_rejection(&e))?;
                    input.discard_line();
                }
                Err(e) => return Err(e).context("Reading custom configuration"),
            },
            Some(3) => return farewell(term),
            other => {
                tracing::warn!(choice = ?other, field = %Field::MenuChoice, "menu choice out of range");
                term.write_line(INVALID_SELECTION)?;
            }
        }

        // Wait for acknowledgement before redrawing the menu.
        input.discard_line();
        term.write_line("")?;
        term.prompt("(Press Enter to return to the main menu...)")?;
        match input.read_line() {
            Ok(_) => {}
            Err(InputError::Eof) => return farewell(term),
            Err(e) => return Err(e).context("Waiting for Enter"),
        }
        term.clear_screen().context("Clearing the screen")?;
    }
}

fn show_menu(term: &mut dyn Terminal) -> Result<()> {
    term.write_line("")?;
    term.write_line(RULE)?;
    term.write_line("         Focus Timer")?;
    term.write_line(RULE)?;
    term.write_line(&format!(
        "1. Start Pomodoro timer ({} min focus / {} min break)",
        DEFAULT_FOCUS_MINUTES, DEFAULT_BREAK_MINUTES
    ))?;
    term.write_line("2. Configure custom times and start")?;
    term.write_line("3. Quit")?;
    term.write_line(RULE)?;
    term.prompt("Select a menu option (1-3): ")?;
    Ok(())
}

/// Prompt for focus minutes, break minutes and cycle count, in that order,
/// then validate them together.
fn configure_custom<R: BufRead>(
    term: &mut dyn Terminal,
    input: &mut TokenReader<R>,
) -> Result<TimerConfig, InputError> {
    term.write_line("")?;
    term.write_line("[ Custom timer setup ]")?;

    term.prompt("Enter focus time (minutes): ")?;
    let focus = defer_range(input.read_int(Field::FocusMinutes))?;

    term.prompt("Enter break time (minutes): ")?;
    let brk = defer_range(input.read_int(Field::BreakMinutes))?;

    term.prompt("Enter number of cycles: ")?;
    let cycles = defer_range(input.read_int(Field::Cycles))?;

    TimerConfig::custom(focus?, brk?, cycles?)
}

/// Non-numbers abort the setup at once. Out-of-range numbers are held until
/// all three answers are read, like values below 1.
fn defer_range(read: Result<i64, InputError>) -> Result<Result<i64, InputError>, InputError> {
    match read {
        Ok(value) => Ok(Ok(value)),
        Err(e @ InputError::Range { .. }) => Ok(Err(e)),
        Err(e) => Err(e),
    }
}

fn describe_rejection(err: &InputError) -> String {
    match err {
        InputError::Range { field, value } => format!(
            "Invalid {}: {}. Enter a whole number from 1 to {}. Please configure again.",
            field,
            value,
            u32::MAX
        ),
        _ => INVALID_INPUT.to_string(),
    }
}

fn farewell(term: &mut dyn Terminal) -> Result<()> {
    term.write_line("")?;
    term.write_line(FAREWELL)?;
    tracing::info!("quit");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::RandomSource;
    use crate::terminal::testing::{Event, RecordingTerminal};
    use crate::timer::testing::FakeClock;
    use std::io::Cursor;

    fn drive(script: &str) -> (RecordingTerminal, FakeClock) {
        let mut term = RecordingTerminal::new();
        let clock = FakeClock::new();
        let quotes = QuoteBank::new(RandomSource::from_seed(9));
        main_menu(&mut term, Cursor::new(script.as_bytes().to_vec()), &clock, quotes).unwrap();
        (term, clock)
    }

    #[test]
    fn quit_says_goodbye() {
        let (term, clock) = drive("3\n");
        assert_eq!(term.lines().last(), Some(&FAREWELL));
        assert_eq!(term.count_lines("timer started"), 0);
        assert_eq!(clock.sleeps(), 0);
    }

    #[test]
    fn non_numeric_choice_returns_to_menu() {
        let (term, _) = drive("abc\n3\n");
        assert_eq!(term.count_lines(INVALID_INPUT), 1);
        assert_eq!(term.count_lines("timer started"), 0);
        // menu drawn twice, no acknowledge step in between
        assert_eq!(term.count_lines("3. Quit"), 2);
        assert!(!term.events.contains(&Event::Clear));
    }

    #[test]
    fn out_of_range_choice_is_rejected() {
        let (term, _) = drive("7\n\n3\n");
        assert_eq!(term.count_lines(INVALID_SELECTION), 1);
        assert_eq!(term.count_lines("timer started"), 0);
        assert!(term.events.contains(&Event::Clear));
        assert_eq!(term.lines().last(), Some(&FAREWELL));
    }

    #[test]
    fn zero_focus_minutes_cites_focus_and_runs_nothing() {
        let (term, clock) = drive("2\n0\n5\n3\n\n3\n");
        assert_eq!(term.count_lines("Invalid focus minutes: 0"), 1);
        assert_eq!(term.count_lines("timer started"), 0);
        assert_eq!(clock.sleeps(), 0);
        assert_eq!(term.lines().last(), Some(&FAREWELL));
    }

    #[test]
    fn non_numeric_custom_field_uses_the_same_policy() {
        let (term, _) = drive("2\n10\nfive\n\n3\n");
        assert_eq!(term.count_lines(INVALID_INPUT), 1);
        assert_eq!(term.count_lines("timer started"), 0);
        assert_eq!(term.lines().last(), Some(&FAREWELL));
    }

    #[test]
    fn custom_session_runs_then_waits_for_enter() {
        let (term, clock) = drive("2\n1\n1\n2\n\n3\n");
        assert_eq!(term.count_lines("Focus timer started (1 min)"), 2);
        assert_eq!(term.count_lines("Break timer started (1 min)"), 1);
        assert_eq!(term.count_lines("Custom timer session is complete"), 1);
        assert_eq!(clock.elapsed().as_secs(), 3 * 60);

        let ack = term
            .events
            .iter()
            .position(|e| matches!(e, Event::Prompt(p) if p.contains("Press Enter")))
            .unwrap();
        let clear = term.events.iter().position(|e| *e == Event::Clear).unwrap();
        assert!(ack < clear);
    }

    #[test]
    fn default_session_runs_from_menu() {
        let (term, clock) = drive("1\n\n3\n");
        assert_eq!(term.count_lines("Focus timer started (25 min)"), 4);
        assert_eq!(term.count_lines("Short Break timer started (5 min)"), 3);
        assert_eq!(term.count_lines("Long Break timer started (30 min)"), 1);
        assert_eq!(term.count_lines("Quote of the moment"), 4);
        assert_eq!(clock.elapsed().as_secs(), 145 * 60);
    }

    #[test]
    fn invalid_utf8_choice_is_rejected_without_failing() {
        let mut script = vec![0xff, 0xfe, b'\n'];
        script.extend_from_slice(b"3\n");

        let mut term = RecordingTerminal::new();
        let clock = FakeClock::new();
        let quotes = QuoteBank::new(RandomSource::from_seed(9));
        main_menu(&mut term, Cursor::new(script), &clock, quotes).unwrap();

        assert_eq!(term.count_lines(INVALID_INPUT), 1);
        assert_eq!(term.count_lines("timer started"), 0);
        assert_eq!(term.lines().last(), Some(&FAREWELL));
    }

    #[test]
    fn oversized_choice_is_an_invalid_selection() {
        let (term, _) = drive("99999999999999999999\n\n3\n");
        assert_eq!(term.count_lines(INVALID_SELECTION), 1);
        assert_eq!(term.count_lines(INVALID_INPUT), 0);
        assert_eq!(term.lines().last(), Some(&FAREWELL));
    }

    #[test]
    fn oversized_minutes_message_covers_the_upper_bound() {
        let (term, clock) = drive("2\n5000000000\n5\n3\n\n3\n");
        assert_eq!(
            term.count_lines("Invalid focus minutes: 5000000000. Enter a whole number from 1 to 4294967295."),
            1
        );
        assert_eq!(clock.sleeps(), 0);
        // all three answers consumed, the blank line acknowledged
        assert_eq!(term.count_lines("3. Quit"), 2);
        assert_eq!(term.lines().last(), Some(&FAREWELL));
    }

    #[test]
    fn end_of_input_quits_cleanly() {
        let (term, _) = drive("");
        assert_eq!(term.lines().last(), Some(&FAREWELL));

        let (term, _) = drive("2\n10\n");
        assert_eq!(term.lines().last(), Some(&FAREWELL));
        assert_eq!(term.count_lines("timer started"), 0);
    }

    #[test]
    fn quit_after_a_session_still_succeeds() {
        let (term, _) = drive("2\n1\n1\n1\n\n3\n");
        assert_eq!(term.count_lines("Custom timer session is complete"), 1);
        assert_eq!(term.lines().last(), Some(&FAREWELL));
    }
}
