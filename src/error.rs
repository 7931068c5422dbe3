// Error types for everything the user can type wrong.
//
// None of these are fatal: the menu loop catches them, prints a message and
// carries on. Only `Io` means the terminal itself is broken.

use std::fmt;
use thiserror::Error;

/// Which numeric prompt a value was read for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    MenuChoice,
    FocusMinutes,
    BreakMinutes,
    Cycles,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::MenuChoice => "menu choice",
            Field::FocusMinutes => "focus minutes",
            Field::BreakMinutes => "break minutes",
            Field::Cycles => "cycle count",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    /// The token was not an integer.
    #[error("invalid input {token:?}: please enter a number")]
    Parse { token: String },

    /// The value is a whole number but outside what the prompt accepts,
    /// including numbers too large to represent. `value` is kept as typed.
    #[error("{field} out of range: {value}")]
    Range { field: Field, value: String },

    /// Standard input was closed.
    #[error("end of input")]
    Eof,

    #[error("failed to read input")]
    Io(#[from] std::io::Error),
}

impl InputError {
    /// Parse and range errors are recovered by re-prompting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, InputError::Parse { .. } | InputError::Range { .. })
    }
}
