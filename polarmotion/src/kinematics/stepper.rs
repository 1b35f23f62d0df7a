use crate::Direction;

/// Stepper motor.
///
/// This kind of stepper never fails to take a step (at least in principle).
/// For a stepper that keeps track of where it is, see
/// [crate::PositionedStepper].
pub trait Stepper {
    /// Takes a single step in the supplied direction.
    ///
    /// # Parameters
    ///
    /// - `direction`: Direction in which to take the step.
    fn step(&mut self, direction: Direction);
}
