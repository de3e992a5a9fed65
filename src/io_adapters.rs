use std::cell::RefCell;
use std::fmt::Display;
use std::io::{self, BufRead, BufReader, Cursor, Read, Result as IoResult, Write};
use std::rc::Rc;

/// Line-oriented input plus the two output channels the interpreter talks through.
///
/// Informational text goes to `out`; prompts, warnings and errors go to `err`.
/// Every write is flushed so a prompt without a trailing newline is visible before
/// the blocking read that follows it.
pub struct PromptIo {
    input: Box<dyn BufRead>,
    out: Box<dyn Write>,
    err: Box<dyn Write>,
}

impl PromptIo {
    pub fn new(
        input: impl BufRead + 'static,
        out: impl Write + 'static,
        err: impl Write + 'static,
    ) -> Self {
        Self {
            input: Box::new(input),
            out: Box::new(out),
            err: Box::new(err),
        }
    }

    /// Process stdin, stdout and stderr.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout(), io::stderr())
    }

    /// Read one line without its terminator.
    ///
    /// Bytes that aren't valid UTF-8 are replaced with U+FFFD rather than failing the
    /// read. Returns `None` once the input is exhausted.
    pub fn read_line(&mut self) -> IoResult<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    /// Show a prompt on the error channel.
    pub fn prompt(&mut self, prompt: &str) -> IoResult<()> {
        self.err.write_all(prompt.as_bytes())?;
        self.err.flush()
    }

    pub fn info(&mut self, msg: impl Display) -> IoResult<()> {
        write!(self.out, "{msg}")?;
        self.out.flush()
    }

    pub fn error(&mut self, msg: impl Display) -> IoResult<()> {
        write!(self.err, "{msg}")?;
        self.err.flush()
    }

    pub fn new_line(&mut self) -> IoResult<()> {
        writeln!(self.out)?;
        self.out.flush()
    }
}

/// Memory-backed line source for scripted input.
pub struct MemReader {
    cursor: Cursor<Vec<u8>>,
}

impl MemReader {
    /// Create a MemReader that will read from the provided buffer.
    pub fn new(buf: Vec<u8>) -> Self {
        Self {
            cursor: Cursor::new(buf),
        }
    }

    /// Feed the given lines, each terminated by `\n`.
    pub fn from_lines(lines: &[&str]) -> Self {
        let mut buf = String::new();
        for line in lines {
            buf.push_str(line);
            buf.push('\n');
        }
        Self::new(buf.into_bytes())
    }
}

impl Read for MemReader {
    fn read(&mut self, out: &mut [u8]) -> IoResult<usize> {
        self.cursor.read(out)
    }
}

impl BufRead for MemReader {
    fn fill_buf(&mut self) -> IoResult<&[u8]> {
        self.cursor.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.cursor.consume(amt)
    }
}

/// Memory-backed writer for capturing output.
///
/// The buffer is shared, so a handle kept by the caller can be inspected after the
/// writer itself has been moved into a [`PromptIo`].
#[derive(Default)]
pub struct MemWriter {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl MemWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer and return it along with a handle to its buffer.
    pub fn with_handle() -> (Self, Rc<RefCell<Vec<u8>>>) {
        let mw = MemWriter::new();
        let rc = Rc::clone(&mw.buf);
        (mw, rc)
    }
}

impl Write for MemWriter {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

/// Captured output of a [`MemWriter`], lossily decoded.
pub fn captured(handle: &Rc<RefCell<Vec<u8>>>) -> String {
    String::from_utf8_lossy(&handle.borrow()).into_owned()
}
