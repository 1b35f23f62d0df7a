use ufmt_macros::uDebug;

use crate::{Direction, StepTarget, Steps};

/// The two axes of the polar mechanism.
#[derive(Debug, uDebug, PartialEq, Eq, Clone, Copy)]
pub enum Axis {
    /// The turntable axis (theta).
    Rotation,
    /// The in/out arm axis (rho). Carried by the rotation gear train.
    Radial,
}

/// Stepper actuation for both axes of the mechanism.
///
/// This is the boundary to whatever generates step pulses. Implementations
/// own step timing, acceleration profiles and axis synchronization; the
/// motion logic only asks for absolute positions and waits for them to be
/// reached.
///
/// Every motion call blocks until it has finished. There is no stall
/// detection: a move is trusted to reach its target.
pub trait Actuator {
    /// Sets the maximum step rate for both axes, in steps per second.
    fn set_max_speed(&mut self, steps_per_second: f32);

    /// Sets the acceleration for both axes, in steps per second per second.
    fn set_acceleration(&mut self, steps_per_second2: f32);

    /// Moves both axes to absolute step positions, arriving together.
    ///
    /// Blocks until both axes are at their targets and at rest.
    fn move_to(&mut self, target: StepTarget);

    /// Moves both axes to absolute step positions without stopping there.
    ///
    /// The next move starts at the speed this one ended with. The move ends
    /// slow enough to come to rest within `stop_distance` further steps of
    /// the longer axis, so a path of several moves can finish with
    /// [Actuator::move_to].
    fn move_through(&mut self, target: StepTarget, stop_distance: u32);

    /// Takes a single step on one axis at a constant rate.
    ///
    /// This is a raw jog: it ignores the acceleration profile. It blocks for
    /// one step interval at `steps_per_second`.
    fn jog(&mut self, axis: Axis, direction: Direction, steps_per_second: f32);

    /// Returns the position reference of an axis, in steps.
    fn position(&self, axis: Axis) -> Steps;

    /// Re-seats the position reference of an axis without moving it.
    fn set_position(&mut self, axis: Axis, position: Steps);
}
