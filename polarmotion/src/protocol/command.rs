use ufmt_macros::uDebug;
use winnow::combinator::{alt, eof, terminated};
use winnow::token::literal;
use winnow::Parser;

use super::batch::{parse_batch, Batch};
use super::parse_numbers::parse_decimal;
use crate::Reply;

/// A command received from the host.
///
/// Batches carry no payload here: their waypoints are parsed into a
/// [Batch] buffer owned by the caller.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Command {
    /// Drive the radial axis to its stop and zero both axes.
    Home,
    /// Change the speed limit, in steps per second.
    SetSpeed(f32),
    /// Unwind theta to zero without moving.
    ResetTheta,
    /// Travel through the waypoints in the batch buffer.
    Batch,
}
impl Command {
    /// Classifies and parses one line.
    ///
    /// Keywords are checked first, so `SET_SPEED 5;` is a bad speed rather
    /// than a batch. Any other line ending in `;` is a batch and is parsed
    /// into `batch`; `batch` is left untouched for every other line.
    ///
    /// # Parameters
    ///
    /// - `line`: a line with its terminator removed.
    /// - `batch`: buffer that receives the waypoints of a batch line.
    pub fn parse<const N: usize>(line: &str, batch: &mut Batch<N>) -> Result<Command, Error> {
        let mut input = line;
        if let Ok(command) = parse_keyword(&mut input) {
            return Ok(command);
        }
        if let Some(argument) = line.strip_prefix("SET_SPEED") {
            return parse_speed_argument(argument);
        }
        if line.ends_with(';') {
            batch.clear();
            let mut input = line;
            parse_batch(&mut input, batch);
            return Ok(Command::Batch);
        }
        Err(Error::Unrecognized)
    }
}

/// Parse a keyword that takes no argument and fills the whole line.
fn parse_keyword<'s>(input: &mut &'s str) -> winnow::Result<Command> {
    terminated(
        alt((
            literal("HOME").value(Command::Home),
            literal("RESET_THETA").value(Command::ResetTheta),
        )),
        eof,
    )
    .parse_next(input)
}

/// Parse what follows `SET_SPEED`.
fn parse_speed_argument(argument: &str) -> Result<Command, Error> {
    if argument.is_empty() {
        return Err(Error::MissingArgument);
    }
    let Some(mut value) = argument.strip_prefix(' ') else {
        return Err(Error::Unrecognized);
    };
    match terminated(parse_decimal, eof).parse_next(&mut value) {
        Ok(speed) if speed > 0.0 => Ok(Command::SetSpeed(speed)),
        _ => Err(Error::InvalidSpeed),
    }
}

/// Reasons a line is not a usable command.
#[derive(Debug, uDebug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The line is not a command at all.
    Unrecognized,
    /// `SET_SPEED` was sent without a value.
    MissingArgument,
    /// The `SET_SPEED` value is not a positive number.
    InvalidSpeed,
}
impl Error {
    /// The reply telling the host about this error.
    pub fn reply(&self) -> Reply {
        match self {
            Error::Unrecognized => Reply::Ignored,
            Error::MissingArgument => Reply::InvalidCommand,
            Error::InvalidSpeed => Reply::InvalidSpeed,
        }
    }
}
