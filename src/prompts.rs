//! Blocking interactive prompts.
//!
//! Each prompt writes its label on the informational channel and reads whole lines
//! until it gets an acceptable answer. There is no timeout; running out of input
//! ends the wait with [`Error::EndOfInput`].

use crate::error::{Error, Result};
use crate::interpreter::Interpreter;
use std::collections::BTreeMap;
use std::fmt::Display;

impl Interpreter {
    /// Ask for a non-empty string.
    ///
    /// With an empty `allowed` list any non-empty line is accepted; otherwise the line
    /// must equal one of `allowed`. Anything else re-prompts.
    pub fn input_string(&mut self, label: &str, allowed: &[&str]) -> Result<String> {
        loop {
            let value = self.ask(label)?;
            if !value.is_empty() && (allowed.is_empty() || allowed.contains(&value.as_str())) {
                return Ok(value);
            }
        }
    }

    /// Ask a yes/no question.
    ///
    /// Only an empty line re-prompts. With an empty `allowed` list any answer counts as
    /// yes; otherwise the answer is yes iff it equals one of `allowed`, and any other
    /// non-empty answer is an immediate no.
    pub fn yes_no(&mut self, label: &str, allowed: &[&str]) -> Result<bool> {
        loop {
            let value = self.ask(label)?;
            if value.is_empty() {
                continue;
            }
            return Ok(allowed.is_empty() || allowed.contains(&value.as_str()));
        }
    }

    /// Show a menu of `key  - label` lines, in key order, and wait for a valid key.
    pub fn choice<K, V>(&mut self, items: &BTreeMap<K, V>) -> Result<String>
    where
        K: AsRef<str> + Ord,
        V: Display,
    {
        if items.is_empty() {
            return Err(Error::EmptyChoice);
        }
        let menu: String = items
            .iter()
            .map(|(key, label)| format!("{}  - {label}\n", key.as_ref()))
            .collect();
        loop {
            self.info(format_args!("{menu}>>> "))?;
            let value = self.read_required_line()?;
            if items.keys().any(|key| key.as_ref() == value) {
                return Ok(value);
            }
        }
    }

    /// Read a line with terminal echo disabled, using `label` as the prompt.
    ///
    /// The previous prompt is put back afterwards. If echo can't be disabled the
    /// warning is shown and the line is read anyway.
    pub fn read_secret(&mut self, label: &str) -> Result<String> {
        let previous = self.set_prompt(label);
        let result = self.read_silenced();
        self.set_prompt(previous);
        result
    }

    /// Echo is restored whenever it was switched off, even if a read or write failed.
    fn read_silenced(&mut self) -> Result<String> {
        self.prompt()?;
        let silenced = self.echo_off()?;
        let line = self.read_line();
        let newline = self.new_line();
        let restored = if silenced { self.echo_on().map(drop) } else { Ok(()) };
        let line = line?;
        newline?;
        restored?;
        line.ok_or(Error::EndOfInput)
    }

    fn ask(&mut self, label: &str) -> Result<String> {
        self.info(format_args!("{label}: "))?;
        self.read_required_line()
    }

    fn read_required_line(&mut self) -> Result<String> {
        self.read_line()?.ok_or(Error::EndOfInput)
    }
}

#[cfg(test)]
mod tests {
    use crate::CommandTable;
    use crate::error::Error;
    use crate::interpreter::Interpreter;
    use crate::io_adapters::{MemReader, PromptIo};
    use crate::test_utils::{FailingWriter, RecordingEcho, TestCli};
    use std::collections::BTreeMap;
    use std::io;

    fn cli(input: &[&str]) -> TestCli {
        TestCli::new(CommandTable::new(), 1, input)
    }

    #[test]
    fn test_input_string_returns_first_non_empty_line() {
        let mut t = cli(&["", "", "hello world", "later"]);

        assert_eq!(t.cli.input_string("Name", &[]).unwrap(), "hello world");
        assert_eq!(t.out(), "Name: Name: Name: ");
    }

    #[test]
    fn test_input_string_reprompts_until_allowed() {
        let mut t = cli(&["x", "", "y"]);

        assert_eq!(t.cli.input_string("Continue", &["y", "n"]).unwrap(), "y");
        assert_eq!(t.out(), "Continue: ".repeat(3));
    }

    #[test]
    fn test_input_string_end_of_input() {
        let mut t = cli(&["nope"]);

        let err = t.cli.input_string("Pick", &["y"]).unwrap_err();
        assert!(matches!(err, Error::EndOfInput));
    }

    #[test]
    fn test_yes_no_without_constraints_accepts_anything() {
        let mut t = cli(&["whatever"]);

        assert!(t.cli.yes_no("Sure?", &[]).unwrap());
    }

    #[test]
    fn test_yes_no_mismatch_is_immediate_no() {
        // a non-matching answer is final; unlike input_string there is no re-prompt
        let mut t = cli(&["n", "y"]);

        assert!(!t.cli.yes_no("Sure?", &["y"]).unwrap());
        assert_eq!(t.out(), "Sure?: ");

        assert!(t.cli.yes_no("Sure?", &["y"]).unwrap());
    }

    #[test]
    fn test_yes_no_reprompts_only_on_empty() {
        let mut t = cli(&["", "", "yes"]);

        assert!(t.cli.yes_no("Sure?", &["y", "yes"]).unwrap());
        assert_eq!(t.out(), "Sure?: ".repeat(3));
    }

    #[test]
    fn test_choice_rejects_unknown_keys() {
        let mut t = cli(&["c", "", "b"]);
        let items = BTreeMap::from([("b", "Beta"), ("a", "Alpha")]);

        assert_eq!(t.cli.choice(&items).unwrap(), "b");
        let menu = "a  - Alpha\nb  - Beta\n>>> ";
        assert_eq!(t.out(), menu.repeat(3));
    }

    #[test]
    fn test_choice_menu_order_is_stable() {
        let items: BTreeMap<String, String> = ["zulu", "alpha", "mike"]
            .iter()
            .map(|k| (k.to_string(), k.to_uppercase()))
            .collect();

        let mut first = cli(&["mike"]);
        let mut second = cli(&["mike"]);
        first.cli.choice(&items).unwrap();
        second.cli.choice(&items).unwrap();

        assert_eq!(first.out(), second.out());
        assert_eq!(
            first.out(),
            "alpha  - ALPHA\nmike  - MIKE\nzulu  - ZULU\n>>> "
        );
    }

    #[test]
    fn test_choice_empty_menu_is_an_error() {
        let mut t = cli(&["a"]);
        let items: BTreeMap<&str, &str> = BTreeMap::new();

        assert!(matches!(t.cli.choice(&items), Err(Error::EmptyChoice)));
    }

    #[test]
    fn test_read_secret_toggles_echo_and_restores_prompt() {
        let echo = RecordingEcho::default();
        let mut t = cli(&["hunter2"]).with_echo(echo.clone());

        assert_eq!(t.cli.read_secret("Enter your Secret: ").unwrap(), "hunter2");

        assert_eq!(echo.calls(), vec!["off", "on"]);
        assert_eq!(t.cli.current_prompt(), "> ");
        assert_eq!(t.err(), "Enter your Secret: ");
        assert_eq!(t.out(), "\n");
    }

    #[test]
    fn test_read_secret_continues_when_echo_fails() {
        let echo = RecordingEcho::failing();
        let mut t = cli(&["visible"]).with_echo(echo.clone());

        assert_eq!(t.cli.read_secret("Secret: ").unwrap(), "visible");

        assert_eq!(echo.calls(), vec!["off"]);
        assert_eq!(t.err(), "Secret: could not turn echo off\n");
        assert_eq!(t.cli.current_prompt(), "> ");
    }

    #[test]
    fn test_read_secret_end_of_input_still_restores() {
        let echo = RecordingEcho::default();
        let mut t = cli(&[]).with_echo(echo.clone());

        assert!(matches!(
            t.cli.read_secret("Secret: "),
            Err(Error::EndOfInput)
        ));
        assert_eq!(echo.calls(), vec!["off", "on"]);
        assert_eq!(t.cli.current_prompt(), "> ");
    }

    #[test]
    fn test_read_secret_restores_when_output_fails() {
        let echo = RecordingEcho::default();
        let io = PromptIo::new(MemReader::from_lines(&["pw"]), FailingWriter, io::sink());
        let mut cli = Interpreter::new(CommandTable::new(), "> ", 1)
            .with_io(io)
            .with_echo(echo.clone());

        assert!(matches!(cli.read_secret("Secret: "), Err(Error::Io(_))));

        assert_eq!(echo.calls(), vec!["off", "on"]);
        assert_eq!(cli.current_prompt(), "> ");
    }

    #[test]
    fn test_read_secret_warns_when_echo_cannot_be_restored() {
        let echo = RecordingEcho::failing_on();
        let mut t = cli(&["hunter2"]).with_echo(echo.clone());

        assert_eq!(t.cli.read_secret("Secret: ").unwrap(), "hunter2");

        assert_eq!(echo.calls(), vec!["off", "on"]);
        assert_eq!(t.err(), "Secret: could not turn echo on again\n");
        assert_eq!(t.cli.current_prompt(), "> ");
    }
}
