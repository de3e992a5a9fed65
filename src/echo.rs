//! Terminal echo suppression.
//!
//! The interpreter only sees the [`EchoController`] trait. Backends are chosen at
//! build time by [`default_controller`].

use std::io;

/// Capability to switch terminal character echo off and back on.
pub trait EchoController {
    /// Capture the current terminal state and disable echo.
    fn echo_off(&mut self) -> io::Result<()>;

    /// Restore the state captured by the last successful [`echo_off`](Self::echo_off).
    fn echo_on(&mut self) -> io::Result<()>;
}

/// Backend for targets without echo control. Both operations fail.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedEcho;

impl EchoController for UnsupportedEcho {
    fn echo_off(&mut self) -> io::Result<()> {
        Err(unsupported())
    }

    fn echo_on(&mut self) -> io::Result<()> {
        Err(unsupported())
    }
}

fn unsupported() -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        "terminal echo control is not available on this platform",
    )
}

#[cfg(unix)]
pub use self::termios::TermiosEcho;

#[cfg(unix)]
mod termios {
    use super::EchoController;
    use std::io;
    use std::mem::MaybeUninit;
    use std::os::fd::RawFd;

    /// POSIX backend clearing the `ECHO` local flag with `tcsetattr`.
    pub struct TermiosEcho {
        fd: RawFd,
        saved: Option<libc::termios>,
    }

    impl TermiosEcho {
        pub fn new(fd: RawFd) -> Self {
            Self { fd, saved: None }
        }

        /// Controller for the process's standard input.
        pub fn stdin() -> Self {
            Self::new(libc::STDIN_FILENO)
        }
    }

    impl EchoController for TermiosEcho {
        fn echo_off(&mut self) -> io::Result<()> {
            let mut attrs = MaybeUninit::<libc::termios>::uninit();
            // SAFETY: tcgetattr only writes into the provided struct, which is read
            // after the call reported success.
            if unsafe { libc::tcgetattr(self.fd, attrs.as_mut_ptr()) } != 0 {
                return Err(io::Error::last_os_error());
            }
            // SAFETY: tcgetattr returned 0, so it fully initialized `attrs`.
            let saved = unsafe { attrs.assume_init() };

            let mut silent = saved;
            silent.c_lflag &= !libc::ECHO;
            // SAFETY: `silent` is a fully initialized termios obtained above.
            if unsafe { libc::tcsetattr(self.fd, libc::TCSANOW, &silent) } != 0 {
                return Err(io::Error::last_os_error());
            }
            self.saved = Some(saved);
            log::debug!("echo disabled on fd {}", self.fd);
            Ok(())
        }

        fn echo_on(&mut self) -> io::Result<()> {
            let Some(saved) = self.saved else {
                return Ok(());
            };
            // SAFETY: `saved` came from a successful tcgetattr on the same fd.
            if unsafe { libc::tcsetattr(self.fd, libc::TCSANOW, &saved) } != 0 {
                return Err(io::Error::last_os_error());
            }
            self.saved = None;
            log::debug!("echo restored on fd {}", self.fd);
            Ok(())
        }
    }
}

/// The echo backend for the current platform, acting on standard input.
pub fn default_controller() -> Box<dyn EchoController> {
    #[cfg(unix)]
    {
        Box::new(TermiosEcho::stdin())
    }
    #[cfg(not(unix))]
    {
        Box::new(UnsupportedEcho)
    }
}
