use crate::builtin;
use crate::command::CommandTable;
use crate::echo::{self, EchoController};
use crate::error::{Error, Result};
use crate::history::HistoryBuffer;
use crate::io_adapters::PromptIo;
use std::fmt::Display;

/// Maximum nesting of `run` builtins before the chain is cut off.
///
/// A history entry can only re-enter `run` through a handler that calls
/// [`Interpreter::exec`] itself, so hitting this limit means such a handler formed a
/// cycle.
pub const MAX_RUN_DEPTH: usize = 64;

/// Line-oriented command interpreter.
///
/// Owns the [`CommandTable`], the bounded [`HistoryBuffer`], the current prompt and the
/// I/O channels. Handlers receive `&mut Interpreter` and use it to print, prompt and
/// toggle terminal echo.
///
/// Example
/// ```
/// use line_commands::echo::UnsupportedEcho;
/// use line_commands::io_adapters::{captured, MemReader, MemWriter};
/// use line_commands::{CommandTable, Interpreter, PromptIo};
///
/// let table = CommandTable::new().with("greet", |cli: &mut Interpreter, args: &[&str]| {
///     cli.info(format_args!("Hello {}\n", args.get(1).unwrap_or(&"world")))?;
///     Ok(())
/// });
/// let (out, out_rc) = MemWriter::with_handle();
/// let mut cli = Interpreter::new(table, ">>> ", 10)
///     .with_io(PromptIo::new(MemReader::new(Vec::new()), out, std::io::sink()))
///     .with_echo(UnsupportedEcho);
///
/// cli.exec("greet bob").unwrap();
/// assert_eq!(captured(&out_rc), "Hello bob\n");
/// assert_eq!(cli.history().get(0).unwrap(), "greet bob");
/// ```
pub struct Interpreter {
    commands: CommandTable,
    prompt: String,
    history: HistoryBuffer,
    io: PromptIo,
    echo: Box<dyn EchoController>,
    should_exit: bool,
    run_depth: usize,
}

impl Interpreter {
    /// Create an interpreter on process stdio with the platform echo backend.
    ///
    /// `history_size` below 1 is clamped to 1.
    pub fn new(commands: CommandTable, prompt: impl Into<String>, history_size: usize) -> Self {
        Self {
            commands,
            prompt: prompt.into(),
            history: HistoryBuffer::new(history_size),
            io: PromptIo::stdio(),
            echo: echo::default_controller(),
            should_exit: false,
            run_depth: 0,
        }
    }

    /// Replace the I/O channels.
    pub fn with_io(mut self, io: PromptIo) -> Self {
        self.io = io;
        self
    }

    /// Replace the echo backend.
    pub fn with_echo(mut self, echo: impl EchoController + 'static) -> Self {
        self.echo = Box::new(echo);
        self
    }

    /// Show the current prompt on the error channel.
    pub fn prompt(&mut self) -> Result<()> {
        self.io.prompt(&self.prompt)?;
        Ok(())
    }

    pub fn current_prompt(&self) -> &str {
        &self.prompt
    }

    /// Install a new prompt and return the previous one.
    ///
    /// Nothing restores the old prompt automatically; callers put it back themselves.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) -> String {
        std::mem::replace(&mut self.prompt, prompt.into())
    }

    /// Write to the informational channel (stdout by default).
    pub fn info(&mut self, msg: impl Display) -> Result<()> {
        self.io.info(msg)?;
        Ok(())
    }

    /// Write to the error channel (stderr by default).
    pub fn error(&mut self, msg: impl Display) -> Result<()> {
        self.io.error(msg)?;
        Ok(())
    }

    pub fn new_line(&mut self) -> Result<()> {
        self.io.new_line()?;
        Ok(())
    }

    /// Read one line of input; `None` at end of input.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        Ok(self.io.read_line()?)
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    /// Ask [`repl`](Self::repl) to stop after the current command.
    pub fn request_exit(&mut self) {
        self.should_exit = true;
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Disable terminal echo.
    ///
    /// A failing backend is reported as a warning and otherwise ignored. Returns whether
    /// echo is now off.
    pub fn echo_off(&mut self) -> Result<bool> {
        match self.echo.echo_off() {
            Ok(()) => Ok(true),
            Err(e) => {
                log::warn!("could not turn echo off: {e}");
                self.io.error("could not turn echo off\n")?;
                Ok(false)
            }
        }
    }

    /// Restore terminal echo, warning on failure. Returns whether the restore worked.
    pub fn echo_on(&mut self) -> Result<bool> {
        match self.echo.echo_on() {
            Ok(()) => Ok(true),
            Err(e) => {
                log::warn!("could not turn echo on again: {e}");
                self.io.error("could not turn echo on again\n")?;
                Ok(false)
            }
        }
    }

    /// Execute one command line.
    ///
    /// Builtins (`hist`, `run`) are checked first, then the command table. User errors
    /// are reported on the error channel and swallowed; only a failure to write output
    /// is returned.
    pub fn exec(&mut self, line: &str) -> Result<()> {
        match self.dispatch(line) {
            Err(e) if e.is_user_error() => {
                log::debug!("{line:?} failed: {e}");
                self.io.error(format_args!("{e}\n"))?;
                Ok(())
            }
            other => other,
        }
    }

    fn dispatch(&mut self, line: &str) -> Result<()> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(&name) = tokens.first() else {
            return Ok(());
        };

        if let Some(result) = builtin::try_dispatch(self, &tokens) {
            return result;
        }

        let handler = self
            .commands
            .get(name)
            .ok_or_else(|| Error::UnknownCommand(line.to_string()))?;
        log::debug!("dispatching {name:?} with {} argument(s)", tokens.len() - 1);
        handler(self, &tokens).map_err(Error::Handler)?;

        self.history.add(line);
        Ok(())
    }

    /// Execute a line on behalf of the `run` builtin, enforcing [`MAX_RUN_DEPTH`].
    pub(crate) fn exec_nested(&mut self, line: &str) -> Result<()> {
        if self.run_depth >= MAX_RUN_DEPTH {
            return Err(Error::RunDepthExceeded(MAX_RUN_DEPTH));
        }
        self.run_depth += 1;
        let result = self.exec(line);
        self.run_depth -= 1;
        result
    }

    /// Prompt, read and execute lines until end of input or [`request_exit`](Self::request_exit).
    pub fn repl(&mut self) -> Result<()> {
        while !self.should_exit {
            self.prompt()?;
            let Some(line) = self.io.read_line()? else {
                self.io.new_line()?;
                break;
            };
            self.exec(&line)?;
        }
        Ok(())
    }
}
