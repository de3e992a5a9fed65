//! Shared fixtures for unit tests: scripted interpreters, recording handlers and a fake
//! echo backend.

use crate::command::CommandTable;
use crate::echo::EchoController;
use crate::interpreter::Interpreter;
use crate::io_adapters::{MemReader, MemWriter, PromptIo, captured};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Interpreter wired to in-memory input and captured output channels.
pub(crate) struct TestCli {
    pub cli: Interpreter,
    out: Rc<RefCell<Vec<u8>>>,
    err: Rc<RefCell<Vec<u8>>>,
}

impl TestCli {
    /// Prompt is `"> "`; `input` lines are fed in order.
    pub fn new(table: CommandTable, history_size: usize, input: &[&str]) -> Self {
        let mut raw = Vec::new();
        for line in input {
            raw.extend_from_slice(line.as_bytes());
            raw.push(b'\n');
        }
        Self::from_bytes(table, history_size, &raw)
    }

    /// Like [`new`](Self::new), with the input given verbatim.
    pub fn from_bytes(table: CommandTable, history_size: usize, input: &[u8]) -> Self {
        let (out, out_rc) = MemWriter::with_handle();
        let (err, err_rc) = MemWriter::with_handle();
        let cli = Interpreter::new(table, "> ", history_size)
            .with_io(PromptIo::new(MemReader::new(input.to_vec()), out, err))
            .with_echo(RecordingEcho::default());
        Self {
            cli,
            out: out_rc,
            err: err_rc,
        }
    }

    pub fn with_echo(mut self, echo: RecordingEcho) -> Self {
        self.cli = self.cli.with_echo(echo);
        self
    }

    pub fn out(&self) -> String {
        captured(&self.out)
    }

    pub fn err(&self) -> String {
        captured(&self.err)
    }
}

pub(crate) type CallLog = Rc<RefCell<Vec<Vec<String>>>>;

/// A table whose handlers all succeed and record the tokens they were called with.
pub(crate) fn recorder(names: &[&str]) -> (CallLog, CommandTable) {
    let calls = CallLog::default();
    let mut table = CommandTable::new();
    for name in names {
        let log = Rc::clone(&calls);
        table.insert(*name, move |_: &mut Interpreter, args: &[&str]| {
            log.borrow_mut()
                .push(args.iter().map(|s| s.to_string()).collect());
            Ok(())
        });
    }
    (calls, table)
}

/// Recorded calls, tokens joined by single spaces.
pub(crate) fn call_log(calls: &CallLog) -> Vec<String> {
    calls.borrow().iter().map(|call| call.join(" ")).collect()
}

/// Echo backend that records calls and optionally fails them.
#[derive(Clone, Default)]
pub(crate) struct RecordingEcho {
    calls: Rc<RefCell<Vec<&'static str>>>,
    fail_off: bool,
    fail_on: bool,
}

impl RecordingEcho {
    /// Both calls fail.
    pub fn failing() -> Self {
        Self {
            fail_off: true,
            fail_on: true,
            ..Self::default()
        }
    }

    /// Echo can be turned off but not back on.
    pub fn failing_on() -> Self {
        Self {
            fail_on: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: &'static str, fail: bool) -> io::Result<()> {
        self.calls.borrow_mut().push(call);
        if fail {
            Err(io::Error::other("not a terminal"))
        } else {
            Ok(())
        }
    }
}

impl EchoController for RecordingEcho {
    fn echo_off(&mut self) -> io::Result<()> {
        self.record("off", self.fail_off)
    }

    fn echo_on(&mut self) -> io::Result<()> {
        self.record("on", self.fail_on)
    }
}

/// Writer whose every write fails, e.g. a closed terminal.
pub(crate) struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "output closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
