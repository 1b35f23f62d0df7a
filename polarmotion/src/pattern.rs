//! Theta-rho pattern files, as read by a host.
//!
//! A pattern file lists one waypoint per line as two whitespace-separated
//! numbers, `theta rho`. Blank lines and lines starting with `#` are
//! ignored. A host streams a pattern to the firmware by splitting it into
//! batches no larger than the firmware's buffer and sending each as a batch
//! line, waiting for `READY` in between.

use core::fmt::{self, Write};

use crate::Waypoint;

/// Parses one line of a pattern file.
///
/// Returns `None` for blank lines, comments and lines that are not exactly
/// two numbers.
pub fn parse_line(line: &str) -> Option<Waypoint> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let mut fields = line.split_whitespace();
    let theta = fields.next()?.parse::<f32>().ok()?;
    let rho = fields.next()?.parse::<f32>().ok()?;
    if fields.next().is_some() || !theta.is_finite() || !rho.is_finite() {
        return None;
    }
    Some(Waypoint::new(theta, rho))
}

/// Waypoints of a whole pattern file, in order.
pub fn parse_pattern(text: &str) -> impl Iterator<Item = Waypoint> + '_ {
    text.lines().filter_map(parse_line)
}

/// Appends a batch line for `waypoints` to `line`.
///
/// Each waypoint is written `theta,rho;` with three decimals. No line
/// terminator is added.
///
/// # Returns
///
/// An error if `line` is too small; it then holds a truncated batch that
/// must not be sent.
pub fn encode_batch<W: Write>(waypoints: &[Waypoint], line: &mut W) -> fmt::Result {
    for waypoint in waypoints {
        write!(line, "{:.3},{:.3};", waypoint.theta, waypoint.rho)?;
    }
    Ok(())
}

/// Splits a pattern into batches of at most `capacity` waypoints.
///
/// A `capacity` of zero is treated as one.
pub fn batches(waypoints: &[Waypoint], capacity: usize) -> core::slice::Chunks<'_, Waypoint> {
    waypoints.chunks(capacity.max(1))
}
