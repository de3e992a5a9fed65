use std::io;

/// Errors produced while dispatching commands or prompting the user.
///
/// Everything except [`Error::Io`] is a user-level error: the interpreter reports it on
/// the error channel and keeps going.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("history index {index} out of range (len {len})")]
    HistoryOutOfRange { index: usize, len: usize },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Usage: run <history item number>")]
    RunUsage,

    #[error("Usage: hist")]
    HistUsage,

    #[error("run: nesting limit of {0} reached")]
    RunDepthExceeded(usize),

    #[error("ERROR: {0:#}")]
    Handler(anyhow::Error),

    #[error("choice: no items to choose from")]
    EmptyChoice,

    #[error("end of input")]
    EndOfInput,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether the error should be reported and swallowed rather than propagated.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Error::Io(_))
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_command_display() {
        let e = Error::UnknownCommand("foo bar".into());
        assert_eq!(format!("{e}"), "Unknown command: foo bar");
    }

    #[test]
    fn handler_error_display_includes_context() {
        let inner = anyhow::anyhow!("disk full").context("saving");
        let e = Error::Handler(inner);
        assert_eq!(format!("{e}"), "ERROR: saving: disk full");
    }

    #[test]
    fn io_is_not_a_user_error() {
        let e = Error::from(io::Error::other("broken pipe"));
        assert!(!e.is_user_error());
        assert!(Error::RunUsage.is_user_error());
        assert!(Error::EndOfInput.is_user_error());
    }
}
