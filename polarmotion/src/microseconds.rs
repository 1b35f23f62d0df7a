/// Time in microseconds;
#[derive(Debug, PartialEq, PartialOrd, Eq, Ord, Copy, Clone)]
pub struct MicroSeconds(u32);
impl MicroSeconds {
    /// Creates a new `MicroSeconds`.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the value as a `u32`.
    pub fn get_value(&self) -> u32 {
        self.0
    }

    /// Interval between steps at a given step rate.
    ///
    /// The interval is rounded up, so stepping at this interval never exceeds
    /// `steps_per_second`. Rates that are not positive yield the longest
    /// representable interval.
    pub fn per_step(steps_per_second: f32) -> Self {
        if !(steps_per_second > 0.0) {
            return Self(u32::MAX);
        }
        let interval = libm::ceilf(1_000_000.0 / steps_per_second);
        // `as` saturates on overflow.
        Self((interval as u32).max(1))
    }
}
