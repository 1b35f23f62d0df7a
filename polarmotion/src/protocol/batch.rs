use winnow::token::literal;
use winnow::{Parser, Result};

use super::parse_numbers::parse_decimal;
use crate::Waypoint;

/// Fixed-capacity buffer of waypoints received in one batch line.
///
/// The buffer is filled from the front and executed in order, then cleared.
/// Pairs that arrive once the buffer is full are counted in
/// [Batch::dropped] and otherwise discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch<const N: usize> {
    waypoints: heapless::Vec<Waypoint, N>,
    dropped: usize,
    malformed: bool,
}
impl<const N: usize> Batch<N> {
    pub fn new() -> Self {
        Self {
            waypoints: heapless::Vec::new(),
            dropped: 0,
            malformed: false,
        }
    }

    /// Empties the buffer.
    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.dropped = 0;
        self.malformed = false;
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Number of well-formed pairs discarded because the buffer was full.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// `true` if parsing stopped early at a malformed pair.
    pub fn is_malformed(&self) -> bool {
        self.malformed
    }

    fn push(&mut self, waypoint: Waypoint) {
        if self.waypoints.push(waypoint).is_err() {
            self.dropped += 1;
        }
    }
}

impl<const N: usize> Default for Batch<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses `theta,rho;` pairs into a batch.
///
/// Pairs are read left to right until the input runs out or a pair fails to
/// parse. Pairs before a malformed one are kept; the rest of the line is
/// discarded. The batch is not cleared first.
pub fn parse_batch<'s, const N: usize>(input: &mut &'s str, batch: &mut Batch<N>) {
    while !input.is_empty() {
        match parse_pair.parse_next(input) {
            Ok(waypoint) => batch.push(waypoint),
            Err(_) => {
                batch.malformed = true;
                break;
            }
        }
    }
}

/// Parse a single `theta,rho;` pair.
fn parse_pair<'s>(input: &mut &'s str) -> Result<Waypoint> {
    (parse_decimal, literal(","), parse_decimal, literal(";"))
        .map(|(theta, _, rho, _)| Waypoint::new(theta, rho))
        .parse_next(input)
}
