//! Motion state and execution.
//!
//! [MotionContext] bundles everything a motion needs: the machine
//! configuration, the logical position of the machine and the actuator that
//! moves it. It is owned by the control loop and lent to each operation.

use core::f32::consts::TAU;

use crate::{
    config, step_target, Actuator, Axis, Interpolation, MachineConfig, StepTarget,
    Steps, Waypoint,
};

/// Logical position of the machine.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct MotionState {
    theta: f32,
    rho: f32,
    total_revolutions: f32,
    first_since_reset: bool,
}
impl MotionState {
    /// The state after homing: at the origin, waiting for a first waypoint.
    pub fn origin() -> Self {
        Self {
            theta: 0.0,
            rho: 0.0,
            total_revolutions: 0.0,
            first_since_reset: true,
        }
    }

    /// Current angle in radians, including whole revolutions.
    pub fn theta(&self) -> f32 {
        self.theta
    }

    /// Current radial position, in `[0, 1]`.
    pub fn rho(&self) -> f32 {
        self.rho
    }

    /// Revolutions turned since theta was last zeroed.
    pub fn total_revolutions(&self) -> f32 {
        self.total_revolutions
    }

    /// `true` until the first waypoint after homing or a theta reset.
    pub fn is_first_since_reset(&self) -> bool {
        self.first_since_reset
    }

    pub fn position(&self) -> Waypoint {
        Waypoint::new(self.theta, self.rho)
    }

    /// Records arrival at `waypoint`.
    fn arrive(&mut self, waypoint: Waypoint) {
        self.theta = waypoint.theta;
        self.rho = waypoint.rho;
        self.total_revolutions = waypoint.theta / TAU;
        self.first_since_reset = false;
    }
}

/// Everything needed to move the machine.
///
/// # Type Parameters
///
/// - `A`: the [Actuator] driving the motors.
pub struct MotionContext<A> {
    config: MachineConfig,
    state: MotionState,
    actuator: A,
}
impl<A: Actuator> MotionContext<A> {
    /// Creates a new context, applying the configured speed limits to the
    /// actuator. The machine is assumed to be at the origin; run homing to
    /// make that true.
    pub fn new(config: MachineConfig, mut actuator: A) -> Self {
        actuator.set_max_speed(config.max_speed());
        actuator.set_acceleration(config.max_acceleration());
        Self {
            config,
            state: MotionState::origin(),
            actuator,
        }
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub(crate) fn actuator_mut(&mut self) -> &mut A {
        &mut self.actuator
    }

    /// Changes the speed limit of both axes.
    pub fn set_max_speed(&mut self, steps_per_second: f32) -> Result<(), config::Error> {
        self.config.set_max_speed(steps_per_second)?;
        self.actuator.set_max_speed(steps_per_second);
        Ok(())
    }

    /// Moves directly to a waypoint in one coordinated move.
    ///
    /// `rho` is clamped to `[0, 1]`. The motion state is updated once the
    /// move has finished.
    pub fn execute(&mut self, waypoint: Waypoint) {
        let waypoint = waypoint.clamped();
        let target = step_target(&self.config, &waypoint);
        self.actuator.move_to(target);
        self.state.arrive(waypoint);
    }

    /// Travels from the current position to a waypoint.
    ///
    /// With interpolation configured, the path is broken into short segments
    /// and each is executed in turn without stopping in between; otherwise
    /// this is a single move.
    ///
    /// The first waypoint after a reset sets the heading: the turntable
    /// adopts the waypoint's angle where it stands instead of spinning to it.
    pub fn travel_to(&mut self, waypoint: Waypoint) {
        let waypoint = waypoint.clamped();
        if self.state.first_since_reset {
            self.adopt_heading(waypoint.theta);
        }
        match self.config.interpolation() {
            Some(resolution) => {
                let path = Interpolation::new(self.state.position(), waypoint, resolution);
                let end = step_target(&self.config, &path.end());
                let mut path = path.peekable();
                while let Some(point) = path.next() {
                    if path.peek().is_some() {
                        self.pass_through(point, &end);
                    } else {
                        self.execute(point);
                    }
                }
            }
            None => self.execute(waypoint),
        }
    }

    /// Moves to a waypoint on the way to `end` without stopping there.
    fn pass_through(&mut self, waypoint: Waypoint, end: &StepTarget) {
        let target = step_target(&self.config, &waypoint);
        self.actuator.move_through(target, target.ticks_to(end));
        self.state.arrive(waypoint);
    }

    /// Travels through every waypoint of a batch, in order.
    pub fn run_batch(&mut self, waypoints: &[Waypoint]) {
        for waypoint in waypoints {
            self.travel_to(*waypoint);
        }
    }

    /// Unwinds theta to zero without moving.
    ///
    /// The rotation reference is re-seated to zero and the radial reference
    /// to the uncoupled position for the current `rho`, so that later targets
    /// agree with where the motors really are.
    pub fn reset_theta(&mut self) {
        let radial = Steps::from_rounded(self.state.rho * self.config.radial_total_steps() as f32);
        self.actuator.set_position(Axis::Rotation, Steps::zero());
        self.actuator.set_position(Axis::Radial, radial);
        self.state.theta = 0.0;
        self.state.total_revolutions = 0.0;
        self.state.first_since_reset = true;
    }

    /// Declares the current physical position to be the origin.
    pub(crate) fn zero_at_origin(&mut self) {
        self.actuator.set_position(Axis::Radial, Steps::zero());
        self.actuator.set_position(Axis::Rotation, Steps::zero());
        self.state = MotionState::origin();
    }

    /// Relabels the current heading as `theta` without moving.
    fn adopt_heading(&mut self, theta: f32) {
        let here = Waypoint::new(theta, self.state.rho);
        let target = step_target(&self.config, &here);
        self.actuator.set_position(Axis::Rotation, target.rotation);
        self.actuator.set_position(Axis::Radial, target.radial);
        self.state.arrive(here);
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::config::test::sample_config;
    use crate::kinematics::Rig;
    use crate::{DualAxis, MicroSeconds, TestStepper};

    pub type TestAxes = DualAxis<TestStepper, TestStepper, crate::kinematics::delay_test::TestDelay>;

    /// A context for the sample mechanism on a test rig.
    pub fn sample_context(
        config: MachineConfig,
        radial_start: i128,
    ) -> (Rig, MotionContext<TestAxes>) {
        let (rig, axes) = Rig::new(radial_start);
        (rig, MotionContext::new(config, axes))
    }

    fn direct() -> MachineConfig {
        sample_config().with_interpolation(None).unwrap()
    }

    #[test]
    fn test_execute_updates_state_after_move() {
        let (rig, mut ctx) = sample_context(direct(), 0);
        ctx.execute(Waypoint::new(1.5708, 0.5));

        assert_eq!(Steps::new(3433), ctx.actuator().position(Axis::Rotation));
        assert_eq!(Steps::new(1806), ctx.actuator().position(Axis::Radial));
        assert_eq!(3433, rig.rotation.get_position());
        assert_eq!(1.5708, ctx.state().theta());
        assert_eq!(0.5, ctx.state().rho());
        assert!((ctx.state().total_revolutions() - 0.25).abs() < 1e-4);
        assert!(!ctx.state().is_first_since_reset());
    }

    #[test]
    fn test_execute_clamps_rho() {
        let (_, mut ctx) = sample_context(direct(), 0);
        ctx.execute(Waypoint::new(0.0, 1.3));
        assert_eq!(1.0, ctx.state().rho());
        assert_eq!(Steps::new(4642), ctx.actuator().position(Axis::Radial));

        ctx.execute(Waypoint::new(0.0, -0.2));
        assert_eq!(0.0, ctx.state().rho());
        assert_eq!(Steps::zero(), ctx.actuator().position(Axis::Radial));
    }

    #[test]
    fn test_travel_interpolates() {
        let config = sample_config().with_interpolation(Some(0.1)).unwrap();
        let (rig, mut ctx) = sample_context(config, 0);
        ctx.travel_to(Waypoint::new(0.0, 0.0));
        ctx.travel_to(Waypoint::new(0.0, 0.5));

        // Five segments of 0.1 in rho, each its own move.
        let expected = step_target(ctx.config(), &Waypoint::new(0.0, 0.5));
        assert_eq!(expected.radial, ctx.actuator().position(Axis::Radial));
        assert_eq!(2321, rig.radial.get_position());
        assert_eq!(0.5, ctx.state().rho());
    }

    #[test]
    fn test_first_waypoint_adopts_heading() {
        let (rig, mut ctx) = sample_context(direct(), 10_000);
        let heading = Waypoint::new(20.0, 0.0);
        ctx.travel_to(heading);

        // No motion: the table just takes 20 rad as its heading.
        assert_eq!(0, rig.rotation.get_pulses());
        assert_eq!(0, rig.radial.get_pulses());
        assert_eq!(20.0, ctx.state().theta());

        // Later waypoints move relative to the adopted heading.
        let next = Waypoint::new(20.0 + TAU, 0.0);
        ctx.travel_to(next);
        let from = step_target(ctx.config(), &heading);
        let to = step_target(ctx.config(), &next);
        let turned = (to.rotation - from.rotation).get_value();
        assert_eq!(turned as i128, rig.rotation.get_position());
        assert!((turned - 13730).abs() <= 1);
        // The radial motor only unwinds the drift of one revolution.
        let unwound = (to.radial - from.radial).get_value();
        assert_eq!(10_000 + unwound as i128, rig.radial.get_position());
        assert!((unwound + 2060).abs() <= 1);
    }

    #[test]
    fn test_first_waypoint_keeps_radial_move() {
        let (rig, mut ctx) = sample_context(direct(), 0);
        ctx.travel_to(Waypoint::new(20.0, 0.5));

        // Only theta is adopted; rho is travelled to as usual.
        assert_eq!(0, rig.rotation.get_pulses());
        assert_eq!(2321, rig.radial.get_position());
        assert_eq!(0.5, ctx.state().rho());
    }

    #[test]
    fn test_interpolated_travel_keeps_pace() {
        let (rig, mut ctx) = sample_context(sample_config(), 0);
        ctx.travel_to(Waypoint::new(0.0, 0.0));
        ctx.travel_to(Waypoint::new(0.0, 1.0));
        assert_eq!(4642, rig.radial.get_position());

        // Two hundred short segments, but one ramp up and one ramp down.
        let intervals = rig.delay.requests();
        let floor = MicroSeconds::per_step(MachineConfig::DEFAULT_MAX_SPEED);
        assert_eq!(4642, intervals.len());
        assert!(intervals.iter().all(|i| *i >= floor));
        assert!(intervals.iter().filter(|i| **i == floor).count() >= 4500);
        assert!(intervals[0] > floor);
        assert!(intervals[4641] > floor);
    }

    #[test]
    fn test_reset_theta_reseats_references() {
        let (rig, mut ctx) = sample_context(direct(), 0);
        ctx.travel_to(Waypoint::new(0.0, 0.0));
        ctx.travel_to(Waypoint::new(3.0 * TAU, 0.25));
        let before = (rig.rotation.get_position(), rig.radial.get_position());

        ctx.reset_theta();

        assert_eq!(0.0, ctx.state().theta());
        assert_eq!(0.0, ctx.state().total_revolutions());
        assert_eq!(0.25, ctx.state().rho());
        assert!(ctx.state().is_first_since_reset());
        assert_eq!(Steps::zero(), ctx.actuator().position(Axis::Rotation));
        assert_eq!(Steps::new(1161), ctx.actuator().position(Axis::Radial));
        // Nothing moved.
        assert_eq!(before, (rig.rotation.get_position(), rig.radial.get_position()));
    }

    #[test]
    fn test_reset_theta_is_idempotent() {
        let (_, mut ctx) = sample_context(direct(), 0);
        ctx.travel_to(Waypoint::new(0.0, 0.0));
        ctx.travel_to(Waypoint::new(7.5, 0.6));

        ctx.reset_theta();
        let once = (*ctx.state(), StepTarget::new(
            ctx.actuator().position(Axis::Rotation),
            ctx.actuator().position(Axis::Radial),
        ));
        ctx.reset_theta();
        let twice = (*ctx.state(), StepTarget::new(
            ctx.actuator().position(Axis::Rotation),
            ctx.actuator().position(Axis::Radial),
        ));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_set_max_speed_reaches_actuator() {
        let (rig, mut ctx) = sample_context(direct(), 0);
        assert!(ctx.set_max_speed(-5.0).is_err());
        assert_eq!(MachineConfig::DEFAULT_MAX_SPEED, ctx.config().max_speed());

        ctx.set_max_speed(300.0).unwrap();
        ctx.travel_to(Waypoint::new(0.0, 0.0));
        ctx.travel_to(Waypoint::new(2.0, 0.5));
        let floor = MicroSeconds::per_step(300.0);
        assert!(rig.delay.requests().iter().all(|i| *i >= floor));
        assert!(rig.delay.requests().contains(&floor));
    }
}
