//! Serial console.
//!
//! All output goes through a [Console]: protocol replies, which are always
//! written, and diagnostic lines, which are written only when the console is
//! [Verbosity::Verbose]. Diagnostics are prefixed with `INFO:` or `ERROR:`;
//! hosts ignore any line they don't recognize as a reply.

use core::fmt::{self, Write};

use heapless::String;
use ufmt::uWrite;

use crate::{Reply, Verbosity};

/// Longest diagnostic line. Longer messages are truncated.
pub const LOG_LINE_CAPACITY: usize = 96;

/// Severity of a diagnostic line.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Level {
    Info,
    Error,
}
impl Level {
    fn prefix(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Error => "ERROR",
        }
    }
}

/// Writes a diagnostic line at `INFO` level.
///
/// ```ignore
/// info!(console, "batch of {} pairs", count)?;
/// ```
#[macro_export]
macro_rules! info {
    ($console:expr, $($arg:tt)*) => {
        $console.log($crate::Level::Info, format_args!($($arg)*))
    };
}

/// Writes a diagnostic line at `ERROR` level.
#[macro_export]
macro_rules! error {
    ($console:expr, $($arg:tt)*) => {
        $console.log($crate::Level::Error, format_args!($($arg)*))
    };
}

/// Diagnostic line buffer that keeps whatever fits.
#[derive(Default)]
struct LogLine(String<LOG_LINE_CAPACITY>);
impl Write for LogLine {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            self.0.push(c).map_err(|_| fmt::Error)?;
        }
        Ok(())
    }
}

/// Line-oriented output channel.
///
/// # Type Parameters
///
/// - `W`: the underlying writer, typically a serial port.
pub struct Console<W> {
    writer: W,
    verbosity: Verbosity,
}
impl<W: uWrite> Console<W> {
    pub fn new(writer: W, verbosity: Verbosity) -> Self {
        Self { writer, verbosity }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: Verbosity) {
        self.verbosity = verbosity;
    }

    /// Writes a protocol reply as its own line.
    pub fn reply(&mut self, reply: Reply) -> Result<(), W::Error> {
        self.writer.write_str(reply.token())?;
        self.writer.write_char('\n')
    }

    /// Writes a diagnostic line if the console is verbose.
    ///
    /// Prefer the [info!] and [error!] macros.
    pub fn log(&mut self, level: Level, args: fmt::Arguments) -> Result<(), W::Error> {
        if self.verbosity == Verbosity::Quiet {
            return Ok(());
        }
        let mut line = LogLine::default();
        let _ = write!(line, "{}: {}", level.prefix(), args);
        self.writer.write_str(&line.0)?;
        self.writer.write_char('\n')
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }
}
