// Session orchestration: runs focus/break countdowns for a number of cycles
// and shows a quote before every focus phase.

use crate::error::{Field, InputError};
use crate::quotes::QuoteBank;
use crate::terminal::Terminal;
use crate::timer::{Clock, Countdown};
use std::io;

pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;
pub const DEFAULT_LONG_BREAK_MINUTES: u32 = 30;
pub const DEFAULT_CYCLES: u32 = 4;

const RULE: &str = "============================================";

/// Durations and cycle count for one session. All values are > 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    pub focus_minutes: u32,
    pub break_minutes: u32,
    /// Only the default Pomodoro session ends with a long break.
    pub long_break_minutes: Option<u32>,
    pub cycles: u32,
}

impl TimerConfig {
    /// The classic 25/5 Pomodoro with a 30 minute long break after 4 cycles.
    pub fn pomodoro() -> Self {
        TimerConfig {
            focus_minutes: DEFAULT_FOCUS_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
            long_break_minutes: Some(DEFAULT_LONG_BREAK_MINUTES),
            cycles: DEFAULT_CYCLES,
        }
    }

    /// Build a user configured session. Fields are checked in order and the
    /// first one that is not positive is reported.
    pub fn custom(focus_minutes: i64, break_minutes: i64, cycles: i64) -> Result<Self, InputError> {
        Ok(TimerConfig {
            focus_minutes: positive(Field::FocusMinutes, focus_minutes)?,
            break_minutes: positive(Field::BreakMinutes, break_minutes)?,
            long_break_minutes: None,
            cycles: positive(Field::Cycles, cycles)?,
        })
    }

    fn is_pomodoro(&self) -> bool {
        self.long_break_minutes.is_some()
    }

    fn break_label(&self) -> &'static str {
        if self.is_pomodoro() {
            Phase::ShortBreak.label()
        } else {
            "Break"
        }
    }
}

fn positive(field: Field, value: i64) -> Result<u32, InputError> {
    match u32::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(InputError::Range {
            field,
            value: value.to_string(),
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Focus,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Focus => "Focus",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }
}

/// Where a running session currently is. Lives only for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub cycle: u32,
    pub phase: Phase,
    pub elapsed_secs: u64,
}

/// What a finished session did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Phases in the order they ran.
    pub phases: Vec<Phase>,
    pub quotes_shown: u32,
    pub focus_minutes: u64,
    pub break_minutes: u64,
}

impl SessionSummary {
    pub fn count(&self, phase: Phase) -> usize {
        self.phases.iter().filter(|p| **p == phase).count()
    }
}

pub struct SessionRunner<'a> {
    term: &'a mut dyn Terminal,
    clock: &'a dyn Clock,
    quotes: &'a mut QuoteBank,
}

impl<'a> SessionRunner<'a> {
    pub fn new(term: &'a mut dyn Terminal, clock: &'a dyn Clock, quotes: &'a mut QuoteBank) -> Self {
        SessionRunner { term, clock, quotes }
    }

    /// Run the default Pomodoro session.
    pub fn run_default(&mut self) -> io::Result<SessionSummary> {
        self.run(&TimerConfig::pomodoro())
    }

    /// Run a user configured session: no long break, and no break after the
    /// last cycle.
    pub fn run_custom(&mut self, config: &TimerConfig) -> io::Result<SessionSummary> {
        self.run(config)
    }

    /// Run any session. A long break is only taken when the config has one
    /// and there is more than one cycle.
    pub fn run(&mut self, config: &TimerConfig) -> io::Result<SessionSummary> {
        self.run_observed(config, |_| {})
    }

    /// Run a session, handing the live `SessionState` to `on_tick` on every
    /// countdown poll.
    pub fn run_observed<F>(&mut self, config: &TimerConfig, mut on_tick: F) -> io::Result<SessionSummary>
    where
        F: FnMut(&SessionState),
    {
        let title = if config.is_pomodoro() { "Pomodoro timer" } else { "Custom timer" };
        self.term.write_line("")?;
        self.term.write_line(&format!(
            "[ {} started: {} min focus / {} min break ({} cycles) ]",
            title, config.focus_minutes, config.break_minutes, config.cycles
        ))?;
        tracing::info!(?config, "session started");

        let mut summary = SessionSummary::default();
        let mut state = SessionState {
            cycle: 1,
            phase: Phase::Focus,
            elapsed_secs: 0,
        };

        for cycle in 1..=config.cycles {
            state.cycle = cycle;
            self.term.write_line("")?;
            self.term
                .write_line(&format!("--- [ {} / {} cycle ] ---", cycle, config.cycles))?;

            self.show_quote(&mut summary)?;
            self.run_phase(
                &mut state,
                &mut summary,
                &mut on_tick,
                Phase::Focus,
                config.focus_minutes,
                Phase::Focus.label(),
            )?;

            if cycle < config.cycles {
                self.run_phase(
                    &mut state,
                    &mut summary,
                    &mut on_tick,
                    Phase::ShortBreak,
                    config.break_minutes,
                    config.break_label(),
                )?;
            } else if let Some(long) = config.long_break_minutes.filter(|_| config.cycles > 1) {
                self.term.write_line("")?;
                self.term
                    .write_line("--- All cycles complete! Starting the long break. ---")?;
                self.run_phase(
                    &mut state,
                    &mut summary,
                    &mut on_tick,
                    Phase::LongBreak,
                    long,
                    Phase::LongBreak.label(),
                )?;
            }
        }

        self.term.write_line("")?;
        if config.is_pomodoro() {
            self.term
                .write_line("[ The whole Pomodoro session is complete! Well done! ]")?;
        } else {
            self.term.write_line("[ Custom timer session is complete! ]")?;
        }
        self.term.write_line(&format!(
            "Total focus time: {} min over {} cycles",
            summary.focus_minutes, config.cycles
        ))?;
        tracing::info!(
            focus_minutes = summary.focus_minutes,
            break_minutes = summary.break_minutes,
            "session finished"
        );

        Ok(summary)
    }

    fn show_quote(&mut self, summary: &mut SessionSummary) -> io::Result<()> {
        let quote = self.quotes.pick_random();
        self.term.write_line("")?;
        self.term.write_line(RULE)?;
        self.term.write_line(&format!(" Quote of the moment: {}", quote))?;
        self.term.write_line(RULE)?;
        summary.quotes_shown += 1;
        Ok(())
    }

    fn run_phase(
        &mut self,
        state: &mut SessionState,
        summary: &mut SessionSummary,
        on_tick: &mut dyn FnMut(&SessionState),
        phase: Phase,
        minutes: u32,
        label: &str,
    ) -> io::Result<()> {
        state.phase = phase;
        state.elapsed_secs = 0;
        tracing::debug!(cycle = state.cycle, ?phase, minutes, "phase started");

        Countdown::new(&mut *self.term, self.clock).run_observed(minutes, label, |elapsed| {
            state.elapsed_secs = elapsed;
            on_tick(&*state);
        })?;
        tracing::debug!(
            cycle = state.cycle,
            phase = ?state.phase,
            elapsed_secs = state.elapsed_secs,
            "phase finished"
        );

        summary.phases.push(phase);
        match phase {
            Phase::Focus => summary.focus_minutes += u64::from(minutes),
            Phase::ShortBreak | Phase::LongBreak => summary.break_minutes += u64::from(minutes),
        }
        Ok(())
    }
}
