//! Motion control for a polar sand table.
//!
//! A polar sand table drags a steel ball through sand with a magnet carried
//! on a rotating arm. The arm has two axes: rotation (theta) and radial
//! position along the arm (rho). The radial axis is driven through the
//! rotation gear train, so turning the table also winds the radial axis;
//! this crate compensates for that coupling.
//!
//! The crate is `no_std` and independent of any board. Hardware plugs in
//! through the [Stepper] and [Delay] traits, or through [Actuator] directly.
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod console;

mod actuator;
mod config;
mod dispatcher;
mod homing;
mod interpolate;
mod kinematics;
mod microseconds;
mod motion;
pub mod pattern;
pub mod protocol;
mod waypoint;

pub use actuator::{Actuator, Axis};
pub use config::{Coupling, CouplingSign, Error as ConfigError, MachineConfig, Verbosity};
pub use console::{Console, Level, LOG_LINE_CAPACITY};
pub use dispatcher::{Dispatcher, Rejection, State as DispatchState};
pub use homing::{Homing, HomingPhase};
pub use interpolate::{shortest_angle, Interpolation};
pub use kinematics::{
    step_target, Delay, Direction, DualAxis, PositionedStepper, StepRepr,
    StepTarget, Stepper, Steps,
};
pub use microseconds::MicroSeconds;
pub use motion::{MotionContext, MotionState};
pub use protocol::{Command, Reply};
pub use waypoint::Waypoint;

#[cfg(test)]
pub use kinematics::TestStepper;
