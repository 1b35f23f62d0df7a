mod delay;
mod direction;
mod dual_axis;
mod positioned_stepper;
mod stepper;
mod steps;
mod transform;

pub use delay::Delay;
pub use direction::Direction;
pub use dual_axis::DualAxis;
pub use positioned_stepper::PositionedStepper;
pub use stepper::Stepper;
pub use steps::{StepRepr, Steps};
pub use transform::{step_target, StepTarget};

#[cfg(test)]
pub(crate) use delay::test as delay_test;
#[cfg(test)]
pub(crate) use dual_axis::test::Rig;
#[cfg(test)]
pub use stepper::test::TestStepper;
