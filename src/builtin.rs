use crate::error::{Error, Result};
use crate::interpreter::Interpreter;
use argh::{EarlyExit, FromArgs};

/// Commands the dispatcher recognizes before consulting the command table.
///
/// Builtins are parsed with [`argh`] (`FromArgs`). Any parse failure, including an
/// explicit `--help`, is reported as the builtin's usage error.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "hist" or "run".
    fn name() -> &'static str;

    /// Error reported when the arguments don't parse.
    fn usage() -> Error;

    /// Arguments to hand to argh, or `None` to reject them outright.
    ///
    /// argh treats `--` and leading dashes as option syntax, which the builtins don't
    /// want.
    fn checked_args<'a>(args: &'a [&'a str]) -> Option<&'a [&'a str]> {
        Some(args)
    }

    fn execute(self, interp: &mut Interpreter) -> Result<()>;
}

fn try_builtin<T: BuiltinCommand>(interp: &mut Interpreter, tokens: &[&str]) -> Option<Result<()>> {
    let (&name, args) = tokens.split_first()?;
    if name != T::name() {
        return None;
    }
    let Some(args) = T::checked_args(args) else {
        log::debug!("{name}: rejected arguments {args:?}");
        return Some(Err(T::usage()));
    };
    Some(match T::from_args(&[name], args) {
        Ok(cmd) => cmd.execute(interp),
        Err(EarlyExit { output, .. }) => {
            log::debug!("{name}: {}", output.trim_end());
            Err(T::usage())
        }
    })
}

/// Run `tokens` as a builtin if its first token names one.
pub(crate) fn try_dispatch(interp: &mut Interpreter, tokens: &[&str]) -> Option<Result<()>> {
    try_builtin::<Hist>(interp, tokens).or_else(|| try_builtin::<Run>(interp, tokens))
}

#[derive(FromArgs)]
/// Print the command history, oldest entry first.
pub(crate) struct Hist {}

impl BuiltinCommand for Hist {
    fn name() -> &'static str {
        "hist"
    }

    fn usage() -> Error {
        Error::HistUsage
    }

    /// Anything but a lone `--help` is ignored.
    fn checked_args<'a>(args: &'a [&'a str]) -> Option<&'a [&'a str]> {
        Some(if args == ["--help"] { args } else { &args[..0] })
    }

    fn execute(self, interp: &mut Interpreter) -> Result<()> {
        let listing: String = interp
            .history()
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{i:5} {line}\n"))
            .collect();
        interp.info(listing)
    }
}

#[derive(FromArgs)]
/// Execute a history entry again.
pub(crate) struct Run {
    #[argh(positional)]
    /// position of the entry as shown by `hist`.
    pub index: usize,
}

impl BuiltinCommand for Run {
    fn name() -> &'static str {
        "run"
    }

    fn usage() -> Error {
        Error::RunUsage
    }

    /// Exactly one argument made of decimal digits.
    fn checked_args<'a>(args: &'a [&'a str]) -> Option<&'a [&'a str]> {
        match args {
            [index] if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) => {
                Some(args)
            }
            _ => None,
        }
    }

    fn execute(self, interp: &mut Interpreter) -> Result<()> {
        let line = match interp.history().get(self.index) {
            Ok(line) => line.to_owned(),
            Err(e) => {
                log::debug!("run: {e}");
                return Err(Error::RunUsage);
            }
        };
        interp.exec_nested(&line)
    }
}
