use core::f32::consts::TAU;

use ufmt_macros::uDebug;

use crate::{MachineConfig, Steps, Waypoint};

/// Absolute step positions for both axes.
#[derive(Debug, uDebug, PartialEq, Eq, Clone, Copy)]
pub struct StepTarget {
    pub rotation: Steps,
    pub radial: Steps,
}
impl StepTarget {
    pub fn new(rotation: Steps, radial: Steps) -> Self {
        Self { rotation, radial }
    }

    /// Ticks of a coordinated move from `self` to `other`: the step count of
    /// the axis with the longer travel.
    pub fn ticks_to(&self, other: &StepTarget) -> u32 {
        let rotation = self.rotation.distance_to(other.rotation);
        let radial = self.radial.distance_to(other.radial);
        rotation.max(radial)
    }
}

/// Converts a polar waypoint into absolute step targets.
///
/// - The rotation target is `theta` scaled to steps.
/// - The radial target is `rho` scaled to steps, corrected for the drift the
///   turntable's revolutions put into the radial gear train.
///
/// The waypoint is used as given; callers clamp `rho` first.
pub fn step_target(config: &MachineConfig, waypoint: &Waypoint) -> StepTarget {
    let rotation_steps_per_radian = config.rotation_total_steps() as f32 / TAU;
    let rotation = Steps::from_rounded(waypoint.theta * rotation_steps_per_radian);

    let coupling = config.coupling();
    let offset = coupling.offset(waypoint.theta / TAU);
    let radial = Steps::from_rounded(waypoint.rho * config.radial_total_steps() as f32);

    StepTarget {
        rotation,
        radial: coupling.compensate(radial, offset),
    }
}
