//! A small, embeddable line-oriented command interpreter.
//!
//! This crate reads lines, dispatches them to handlers registered in a
//! [`CommandTable`], and remembers successful lines in a bounded [`HistoryBuffer`]
//! that the builtins `hist` and `run <index>` expose. Handlers can ask the user for
//! input through blocking prompts (free text, yes/no, keyed menu) and read secrets
//! with terminal echo switched off through an [`EchoController`].
//!
//! The main entry point is [`Interpreter`]. Everything is single-threaded and
//! synchronous: one command, one line read at a time.

mod builtin;
pub mod command;
pub mod echo;
pub mod error;
pub mod history;
mod interpreter;
pub mod io_adapters;
mod prompts;
#[cfg(test)]
mod test_utils;

pub use command::{CommandTable, Handler};
pub use echo::EchoController;
pub use error::{Error, Result};
pub use history::HistoryBuffer;
/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::{Interpreter, MAX_RUN_DEPTH};
pub use io_adapters::PromptIo;
