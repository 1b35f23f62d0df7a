use crate::{
    Actuator, Axis, Delay, Direction, MachineConfig, MicroSeconds,
    PositionedStepper, StepTarget, Stepper, Steps,
};

/// Two positioned steppers driven together.
///
/// Coordinated moves interleave the axes Bresenham-style: the axis with the
/// longer travel steps on every tick and the other is spread evenly across
/// the move, so both arrive together. Tick timing follows a trapezoidal
/// profile: the step rate ramps up at the configured acceleration, ramps
/// down so the axes are at rest where they must stop, and never exceeds the
/// configured maximum speed.
///
/// The rate reached at the end of [Actuator::move_through] carries into the
/// next move, so a path split into short moves runs at full speed.
///
/// # Type Parameters
///
/// - `R`: rotation axis [Stepper].
/// - `P`: radial axis [Stepper].
/// - `D`: [Delay] used for step timing.
pub struct DualAxis<R, P, D> {
    rotation: PositionedStepper<R>,
    radial: PositionedStepper<P>,
    delay: D,
    max_speed: f32,
    acceleration: f32,
    /// Step rate at the end of the last move; zero when at rest.
    speed: f32,
}
impl<R: Stepper, P: Stepper, D: Delay> DualAxis<R, P, D> {
    /// Creates a new `DualAxis`, with both positions at zero and default
    /// speed limits.
    pub fn new(rotation: R, radial: P, delay: D) -> Self {
        Self {
            rotation: PositionedStepper::new(rotation),
            radial: PositionedStepper::new(radial),
            delay,
            max_speed: MachineConfig::DEFAULT_MAX_SPEED,
            acceleration: MachineConfig::DEFAULT_MAX_ACCELERATION,
            speed: 0.0,
        }
    }

    fn here(&self) -> StepTarget {
        StepTarget::new(self.rotation.get_position(), self.radial.get_position())
    }

    /// Step rate for tick `tick` of a move entered at `entry` steps per
    /// second, with `to_stop` ticks left, this one included, before the
    /// axes must be at rest.
    fn tick_speed(&self, entry: f32, tick: u32, to_stop: u32) -> f32 {
        let gained = 2.0 * self.acceleration * (tick + 1) as f32;
        let accelerating = libm::sqrtf(entry * entry + gained);
        let stopping = libm::sqrtf(2.0 * self.acceleration * to_stop as f32);
        accelerating.min(stopping).min(self.max_speed)
    }

    /// Runs a coordinated move to `target`, leaving room to stop within
    /// `stop_distance` ticks after it.
    fn drive(&mut self, target: StepTarget, stop_distance: u32) {
        let here = self.here();
        let rotation_steps = here.rotation.distance_to(target.rotation) as u64;
        let radial_steps = here.radial.distance_to(target.radial) as u64;
        let ticks = here.ticks_to(&target);

        let entry = self.speed;
        let mut speed = entry;
        let mut rotation_error: u64 = 0;
        let mut radial_error: u64 = 0;
        for tick in 0..ticks {
            rotation_error += rotation_steps;
            if rotation_error >= ticks as u64 {
                rotation_error -= ticks as u64;
                // Only fails at the ends of the step range.
                let _ = self.rotation.step_toward(target.rotation);
            }
            radial_error += radial_steps;
            if radial_error >= ticks as u64 {
                radial_error -= ticks as u64;
                let _ = self.radial.step_toward(target.radial);
            }
            speed = self.tick_speed(entry, tick, ticks - tick + stop_distance);
            self.delay.delay_us(MicroSeconds::per_step(speed));
        }
        self.speed = if stop_distance == 0 { 0.0 } else { speed };
    }
}

impl<R: Stepper, P: Stepper, D: Delay> Actuator for DualAxis<R, P, D> {
    fn set_max_speed(&mut self, steps_per_second: f32) {
        self.max_speed = steps_per_second;
    }

    fn set_acceleration(&mut self, steps_per_second2: f32) {
        self.acceleration = steps_per_second2;
    }

    fn move_to(&mut self, target: StepTarget) {
        self.drive(target, 0);
    }

    fn move_through(&mut self, target: StepTarget, stop_distance: u32) {
        self.drive(target, stop_distance);
    }

    fn jog(&mut self, axis: Axis, direction: Direction, steps_per_second: f32) {
        let _ = match axis {
            Axis::Rotation => self.rotation.step(direction),
            Axis::Radial => self.radial.step(direction),
        };
        self.speed = 0.0;
        self.delay.delay_us(MicroSeconds::per_step(steps_per_second));
    }

    fn position(&self, axis: Axis) -> Steps {
        match axis {
            Axis::Rotation => self.rotation.get_position(),
            Axis::Radial => self.radial.get_position(),
        }
    }

    fn set_position(&mut self, axis: Axis, position: Steps) {
        match axis {
            Axis::Rotation => self.rotation.set_gauge_position(position),
            Axis::Radial => self.radial.set_gauge_position(position),
        }
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::kinematics::delay::test::TestDelay;
    use crate::TestStepper;
    use proptest::prelude::*;

    /// A [DualAxis] wired to test doubles, with handles to observe them.
    pub struct Rig {
        pub rotation: TestStepper,
        pub radial: TestStepper,
        pub delay: TestDelay,
    }
    impl Rig {
        /// Builds a rig whose radial carriage starts `radial_start` steps out
        /// from a hard stop at zero.
        pub fn new(radial_start: i128) -> (Self, DualAxis<TestStepper, TestStepper, TestDelay>) {
            let rig = Rig {
                rotation: TestStepper::new(0),
                radial: TestStepper::with_hard_stop(radial_start, 0),
                delay: TestDelay::new(),
            };
            let axes = DualAxis::new(
                rig.rotation.clone(),
                rig.radial.clone(),
                rig.delay.clone(),
            );
            (rig, axes)
        }
    }

    #[test]
    fn test_move_arrives_together() {
        let (rig, mut axes) = Rig::new(10_000);
        axes.move_to(StepTarget::new(Steps::new(300), Steps::new(-120)));

        assert_eq!(Steps::new(300), axes.position(Axis::Rotation));
        assert_eq!(Steps::new(-120), axes.position(Axis::Radial));
        assert_eq!(300, rig.rotation.get_position());
        assert_eq!(10_000 - 120, rig.radial.get_position());
        // One tick per step of the longer axis.
        assert_eq!(300, rig.delay.requests().len());
    }

    #[test]
    fn test_zero_move_does_nothing() {
        let (rig, mut axes) = Rig::new(0);
        axes.move_to(StepTarget::new(Steps::zero(), Steps::zero()));
        assert_eq!(0, rig.rotation.get_pulses());
        assert!(rig.delay.requests().is_empty());
    }

    #[test]
    fn test_profile_ramps_and_respects_ceiling() {
        let (rig, mut axes) = Rig::new(0);
        axes.set_max_speed(400.0);
        axes.set_acceleration(4000.0);
        axes.move_to(StepTarget::new(Steps::new(1000), Steps::zero()));

        let intervals = rig.delay.requests();
        let floor = MicroSeconds::per_step(400.0);
        assert!(intervals.iter().all(|i| *i >= floor));
        // Slow at both ends, at full speed in the middle.
        assert!(intervals[0] > floor);
        assert!(intervals[999] > floor);
        assert_eq!(floor, intervals[500]);
    }

    #[test]
    fn test_move_through_carries_speed() {
        let (rig, mut axes) = Rig::new(0);
        axes.set_max_speed(400.0);
        axes.set_acceleration(4000.0);
        axes.move_through(StepTarget::new(Steps::new(100), Steps::zero()), 1000);
        axes.move_to(StepTarget::new(Steps::new(200), Steps::zero()));

        let intervals = rig.delay.requests();
        let floor = MicroSeconds::per_step(400.0);
        assert_eq!(200, intervals.len());
        assert!(intervals[0] > floor);
        // No stop in between: the second move starts at full speed.
        assert_eq!(floor, intervals[99]);
        assert_eq!(floor, intervals[100]);
        assert!(intervals[199] > floor);
        assert_eq!(200, rig.rotation.get_position());
    }

    #[test]
    fn test_move_to_ends_at_rest() {
        let (rig, mut axes) = Rig::new(0);
        axes.set_max_speed(400.0);
        axes.set_acceleration(4000.0);
        axes.move_to(StepTarget::new(Steps::new(100), Steps::zero()));
        axes.move_to(StepTarget::new(Steps::new(200), Steps::zero()));

        let intervals = rig.delay.requests();
        assert_eq!(intervals[0], intervals[100]);
        assert_eq!(intervals[99], intervals[199]);
    }

    #[test]
    fn test_move_through_slows_for_short_stop() {
        let (rig, mut axes) = Rig::new(0);
        axes.set_max_speed(400.0);
        axes.set_acceleration(4000.0);
        axes.move_through(StepTarget::new(Steps::new(100), Steps::zero()), 2);

        // Three ticks before rest: sqrt(2 * 4000 * 3) steps per second.
        let intervals = rig.delay.requests();
        assert_eq!(MicroSeconds::per_step(libm::sqrtf(24000.0)), intervals[99]);
    }

    #[test]
    fn test_set_position_does_not_move() {
        let (rig, mut axes) = Rig::new(50);
        axes.set_position(Axis::Radial, Steps::new(7));
        assert_eq!(Steps::new(7), axes.position(Axis::Radial));
        assert_eq!(50, rig.radial.get_position());
        assert_eq!(0, rig.radial.get_pulses());
    }

    #[test]
    fn test_jog_runs_at_constant_rate() {
        let (rig, mut axes) = Rig::new(5);
        for _ in 0..3 {
            axes.jog(Axis::Radial, Direction::Negative, 250.0);
        }
        assert_eq!(Steps::new(-3), axes.position(Axis::Radial));
        assert_eq!(2, rig.radial.get_position());
        assert_eq!(vec![MicroSeconds::new(4000); 3], rig.delay.requests());
    }

    proptest! {
        #[test]
        fn test_moves_reach_targets(
            moves in proptest::collection::vec((-3000i32..3000, -3000i32..3000), 1..6)
        ) {
            let (rig, mut axes) = Rig::new(1_000_000);
            for (rotation, radial) in moves {
                axes.move_to(StepTarget::new(Steps::new(rotation), Steps::new(radial)));
                prop_assert_eq!(Steps::new(rotation), axes.position(Axis::Rotation));
                prop_assert_eq!(Steps::new(radial), axes.position(Axis::Radial));
                prop_assert_eq!(rotation as i128, rig.rotation.get_position());
                prop_assert_eq!(1_000_000 + radial as i128, rig.radial.get_position());
            }
        }
    }
}
