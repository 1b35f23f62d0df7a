/// A target position in polar space.
///
/// - `theta`: angle of the turntable in radians. Unbounded; values beyond
///   `2π` mean additional revolutions.
/// - `rho`: normalized radial position, where `0` is the inner mechanical
///   limit and `1` is full travel outward.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Waypoint {
    pub theta: f32,
    pub rho: f32,
}
impl Waypoint {
    /// Creates a new waypoint. `rho` is stored as given.
    pub fn new(theta: f32, rho: f32) -> Self {
        Self { theta, rho }
    }

    /// The origin: `theta = 0`, `rho = 0`.
    pub fn origin() -> Self {
        Self::default()
    }

    /// Returns this waypoint with `rho` clamped to `[0, 1]`.
    ///
    /// Out-of-range `rho` is treated as a rounding overshoot from the peer
    /// and is silently clamped rather than rejected. NaN clamps to `0`.
    pub fn clamped(&self) -> Self {
        let rho = if self.rho.is_nan() {
            0.0
        } else {
            self.rho.clamp(0.0, 1.0)
        };
        Self {
            theta: self.theta,
            rho,
        }
    }
}
