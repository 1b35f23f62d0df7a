use crate::Direction;
use crate::Stepper;
use crate::Steps;

/// Stepper which tracks its own position.
///
/// A `PositionedStepper` executes its stepping commands by wrapping some
/// underlying [Stepper]. The position it reports is a gauge: it counts the
/// pulses that were sent, and can be re-seated without moving the motor.
pub struct PositionedStepper<S> {
    stepper: S,
    position: Steps,
}
impl<S: Stepper> PositionedStepper<S> {
    /// Creates a new positioned stepper.
    ///
    /// The new stepper has an initial position of zero.
    ///
    /// # Parameters
    ///
    /// - `stepper`: The underlying stepper to use.
    pub fn new(stepper: S) -> Self {
        Self {
            stepper,
            position: Steps::zero(),
        }
    }

    /// Sets the current position of the stepper to a given value.
    ///
    /// This DOES NOT move the stepper. It simply sets the position to the
    /// supplied value, wherever the stepper currently is.
    pub fn set_gauge_position(&mut self, position: Steps) {
        self.position = position;
    }

    /// Returns the current position of the stepper.
    pub fn get_position(&self) -> Steps {
        self.position
    }

    /// Take a step.
    ///
    /// This takes a step with the underlying stepper provided that doing so
    /// would not overflow the step count.
    ///
    /// # Returns
    ///
    /// - `Some(steps)`: if the step could successfully be taken. This returns
    ///   the new position of the stepper.
    /// - `None`: if no step could be taken without overflowing limits.
    pub fn step(&mut self, direction: Direction) -> Option<Steps> {
        let next_position = match direction {
            Direction::Negative => self.position.dec(),
            Direction::Positive => self.position.inc(),
        }?;

        self.stepper.step(direction);
        self.position = next_position;
        Some(next_position)
    }

    /// Take one step towards `target`.
    ///
    /// # Returns
    ///
    /// - `Some(steps)`: the new position, if a step was taken.
    /// - `None`: if the stepper is already at `target`, or the step would
    ///   overflow.
    pub fn step_toward(&mut self, target: Steps) -> Option<Steps> {
        let delta = (target - self.position).get_value();
        Direction::of_delta(delta).and_then(|direction| self.step(direction))
    }
}

#[cfg(test)]
mod test {
    use super::super::direction::test::direction;
    use super::*;
    use crate::TestStepper;
    use proptest::collection;
    use proptest::prelude::*;

    #[test]
    fn test_set_gauge_position() {
        let stepper = TestStepper::new(0);
        let mut pstepper = PositionedStepper::new(stepper);

        for _ in 0..10 {
            pstepper.step(Direction::Positive);
        }
        assert_eq!(10, pstepper.get_position().get_value());
        assert_eq!(10, pstepper.stepper.get_position());

        // Only the gauge moves.
        pstepper.set_gauge_position(Steps::zero());
        assert_eq!(0, pstepper.get_position().get_value());
        assert_eq!(10, pstepper.stepper.get_position());
    }

    #[test]
    fn test_step_at_limit() {
        let mut pstepper = PositionedStepper::new(TestStepper::new(0));
        pstepper.set_gauge_position(Steps::new(i32::MIN));

        assert_eq!(None, pstepper.step(Direction::Negative));
        assert_eq!(0, pstepper.stepper.get_pulses());
    }

    #[test]
    fn test_step_toward() {
        let mut pstepper = PositionedStepper::new(TestStepper::new(0));
        let target = Steps::new(-3);

        while pstepper.step_toward(target).is_some() {}

        assert_eq!(target, pstepper.get_position());
        assert_eq!(-3, pstepper.stepper.get_position());
        assert_eq!(None, pstepper.step_toward(target));
    }

    proptest! {
        #[test]
        fn test_multi_steps(
            single_steps in collection::vec(direction(), 1..64)
        ) {
            let mut pos: i32 = 0;
            let mut pstepper = PositionedStepper::new(TestStepper::new(0));
            for dir in single_steps {
                match dir {
                    Direction::Positive => { pos += 1; }
                    Direction::Negative => { pos -= 1; }
                }

                let step_result = pstepper.step(dir);

                assert_eq!(Some(Steps::new(pos)), step_result);
                assert_eq!(pos, pstepper.get_position().get_value());
                assert_eq!(pos as i128, pstepper.stepper.get_position());
            }
        }
    }

    proptest! {
        #[test]
        fn test_gauge_offset_is_preserved(
            gauge in -10_000i32..10_000,
            target in -10_000i32..10_000,
        ) {
            let mut pstepper = PositionedStepper::new(TestStepper::new(0));
            pstepper.set_gauge_position(Steps::new(gauge));

            while pstepper.step_toward(Steps::new(target)).is_some() {}

            assert_eq!(target, pstepper.get_position().get_value());
            assert_eq!(
                (target - gauge) as i128,
                pstepper.stepper.get_position()
            );
        }
    }
}
