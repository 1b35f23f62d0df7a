use core::ops::{Add, Sub};

use ufmt_macros::uDebug;

/// Underlying type representing the number of steps.
pub type StepRepr = i32;

/// Number of steps.
///
/// `Steps` is careful to prevent overflows, so that it can be used safely to
/// track axis positions.
#[derive(Debug, uDebug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
pub struct Steps(StepRepr);
impl Steps {
    /// Create a new number of steps.
    pub fn new(steps: StepRepr) -> Self {
        Self(steps)
    }

    /// Zero steps.
    pub fn zero() -> Self {
        Steps(0)
    }

    /// Rounds a fractional step count to the nearest whole step.
    ///
    /// Halves round away from zero. Values outside the representable range
    /// saturate at the range limits, and NaN becomes zero.
    pub fn from_rounded(value: f32) -> Self {
        // `as` saturates and maps NaN to 0.
        Steps(libm::roundf(value) as StepRepr)
    }

    /// Returns the value represented by `Steps`.
    pub fn get_value(&self) -> StepRepr {
        self.0
    }

    /// Increment the value if it's safe to do so without an overflow.
    pub fn inc(&self) -> Option<Self> {
        self.0.checked_add_unsigned(1).map(Steps)
    }

    /// Decrement the value if it's safe to do so without an overflow.
    pub fn dec(&self) -> Option<Self> {
        self.0.checked_sub_unsigned(1).map(Steps)
    }

    /// Number of steps between `self` and `other`, ignoring direction.
    pub fn distance_to(&self, other: Steps) -> u32 {
        self.0.abs_diff(other.0)
    }
}

impl Add for Steps {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Steps(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Steps {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Steps(self.0.saturating_sub(rhs.0))
    }
}
