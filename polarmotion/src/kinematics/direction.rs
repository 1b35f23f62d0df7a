use ufmt_macros::uDebug;

/// Describes the direction for an axis movement.
#[derive(Debug, uDebug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    /// Positive direction is associated with a "high" direction signal.
    Positive,
    /// Negative direction is associated with a "low" direction signal.
    ///
    /// On the radial axis this is "inward", towards the mechanical stop at
    /// `rho = 0`.
    Negative,
}
impl Direction {
    /// Returns the direction required to travel a signed number of steps.
    ///
    /// Zero travel has no meaningful direction; it is reported as `None`.
    pub fn of_delta(delta: i32) -> Option<Direction> {
        match delta {
            d if d > 0 => Some(Direction::Positive),
            d if d < 0 => Some(Direction::Negative),
            _ => None,
        }
    }
}
