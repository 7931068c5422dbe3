// Library root
// -----------
// This crate exposes the pieces of the console focus timer. The binary
// (`main.rs`) wires them to the real terminal and runs the menu.
//
// Module responsibilities:
// - `ui`: the main menu loop and the custom-session prompts.
// - `session`: timer configuration and the focus/break cycle runner.
// - `timer`: the blocking countdown and the clock it polls.
// - `quotes`: the motivational quote list and its random source.
// - `input`: whitespace-token reading from stdin.
// - `terminal`: the output capability, with a stdout implementation.
// - `error`: input error types.
//
// The core only sees the `Terminal` and `Clock` traits, so whole sessions
// can be run in tests without waiting or touching the real console.
pub mod error;
pub mod input;
pub mod quotes;
pub mod session;
pub mod terminal;
pub mod timer;
pub mod ui;
