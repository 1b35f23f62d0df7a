//! Machine configuration.
//!
//! A [MachineConfig] is built once at startup from constants describing the
//! physical mechanism. After that, only the maximum speed may change.

use ufmt_macros::uDebug;

use crate::Steps;

/// Direction in which the rotation-to-radial coupling correction is applied.
///
/// The radial axis is carried by the turntable's gear train, so turning the
/// table also winds the radial axis. Whether that winding must be subtracted
/// from or added to the radial target depends on how the gears mesh in a
/// particular build.
#[derive(Debug, uDebug, PartialEq, Eq, Clone, Copy)]
pub enum CouplingSign {
    /// `radial = round(rho * total) - offset`
    Subtract,
    /// `radial = round(rho * total) + offset`
    Add,
}

/// Mechanical coupling between the rotation and radial axes.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Coupling {
    /// Radial steps of drift caused by one full turntable revolution.
    steps_per_revolution: f32,
    sign: CouplingSign,
}
impl Coupling {
    /// Coupling derived from a gear ratio: one revolution drifts the radial
    /// axis by `rotation_total_steps / gear_ratio` steps.
    pub fn from_gear_ratio(
        rotation_total_steps: u32,
        gear_ratio: f32,
        sign: CouplingSign,
    ) -> Self {
        Self {
            steps_per_revolution: rotation_total_steps as f32 / gear_ratio,
            sign,
        }
    }

    /// Coupling measured directly, in radial steps per revolution.
    pub fn fixed(steps_per_revolution: f32, sign: CouplingSign) -> Self {
        Self {
            steps_per_revolution,
            sign,
        }
    }

    /// No coupling at all, for mechanisms with independent axes.
    pub fn none() -> Self {
        Self::fixed(0.0, CouplingSign::Subtract)
    }

    /// Radial steps of drift per revolution.
    pub fn steps_per_revolution(&self) -> f32 {
        self.steps_per_revolution
    }

    pub fn sign(&self) -> CouplingSign {
        self.sign
    }

    /// Radial drift, in whole steps, after `revolutions` turns.
    pub fn offset(&self, revolutions: f32) -> Steps {
        Steps::from_rounded(revolutions * self.steps_per_revolution)
    }

    /// Applies a drift correction to a radial target.
    pub fn compensate(&self, radial: Steps, offset: Steps) -> Steps {
        match self.sign {
            CouplingSign::Subtract => radial - offset,
            CouplingSign::Add => radial + offset,
        }
    }
}

/// How chatty the console is.
#[derive(Debug, uDebug, PartialEq, Eq, Clone, Copy)]
pub enum Verbosity {
    /// Only protocol acknowledgments are written.
    Quiet,
    /// `INFO:` and `ERROR:` lines are written as well.
    Verbose,
}

/// Static description of the machine.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct MachineConfig {
    rotation_total_steps: u32,
    radial_total_steps: u32,
    coupling: Coupling,
    max_speed: f32,
    max_acceleration: f32,
    interpolation: Option<f32>,
    homing_speed: f32,
    verbosity: Verbosity,
}
impl MachineConfig {
    /// Default maximum step rate, in steps per second.
    pub const DEFAULT_MAX_SPEED: f32 = 550.0;
    /// Default acceleration, in steps per second per second.
    pub const DEFAULT_MAX_ACCELERATION: f32 = 5000.0;
    /// Default interpolation resolution, in combined (theta, rho) units.
    pub const DEFAULT_RESOLUTION: f32 = 0.005;
    /// Default homing jog rate, in steps per second.
    pub const DEFAULT_HOMING_SPEED: f32 = 550.0;

    /// Creates a configuration with default speeds and interpolation on.
    ///
    /// # Parameters
    ///
    /// - `rotation_total_steps`: steps for one full turntable revolution.
    /// - `radial_total_steps`: steps from `rho = 0` to `rho = 1`.
    /// - `coupling`: drift compensation for this mechanism.
    pub fn new(
        rotation_total_steps: u32,
        radial_total_steps: u32,
        coupling: Coupling,
    ) -> Result<Self, Error> {
        if rotation_total_steps == 0 || radial_total_steps == 0 {
            return Err(Error::InvalidStepCount);
        }
        if !coupling.steps_per_revolution.is_finite() {
            return Err(Error::InvalidCoupling);
        }
        Ok(Self {
            rotation_total_steps,
            radial_total_steps,
            coupling,
            max_speed: Self::DEFAULT_MAX_SPEED,
            max_acceleration: Self::DEFAULT_MAX_ACCELERATION,
            interpolation: Some(Self::DEFAULT_RESOLUTION),
            homing_speed: Self::DEFAULT_HOMING_SPEED,
            verbosity: Verbosity::Quiet,
        })
    }

    pub fn with_max_speed(mut self, steps_per_second: f32) -> Result<Self, Error> {
        self.set_max_speed(steps_per_second)?;
        Ok(self)
    }

    pub fn with_max_acceleration(
        mut self,
        steps_per_second2: f32,
    ) -> Result<Self, Error> {
        if !is_positive(steps_per_second2) {
            return Err(Error::InvalidAcceleration);
        }
        self.max_acceleration = steps_per_second2;
        Ok(self)
    }

    /// Sets the interpolation resolution; `None` moves point to point.
    pub fn with_interpolation(
        mut self,
        resolution: Option<f32>,
    ) -> Result<Self, Error> {
        if let Some(r) = resolution {
            if !is_positive(r) {
                return Err(Error::InvalidResolution);
            }
        }
        self.interpolation = resolution;
        Ok(self)
    }

    pub fn with_homing_speed(
        mut self,
        steps_per_second: f32,
    ) -> Result<Self, Error> {
        if !is_positive(steps_per_second) {
            return Err(Error::InvalidSpeed);
        }
        self.homing_speed = steps_per_second;
        Ok(self)
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Changes the maximum step rate.
    ///
    /// This is the only setting that may change once the machine is running.
    pub fn set_max_speed(&mut self, steps_per_second: f32) -> Result<(), Error> {
        if !is_positive(steps_per_second) {
            return Err(Error::InvalidSpeed);
        }
        self.max_speed = steps_per_second;
        Ok(())
    }

    pub fn rotation_total_steps(&self) -> u32 {
        self.rotation_total_steps
    }

    pub fn radial_total_steps(&self) -> u32 {
        self.radial_total_steps
    }

    pub fn coupling(&self) -> Coupling {
        self.coupling
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn max_acceleration(&self) -> f32 {
        self.max_acceleration
    }

    /// Maximum segment length for interpolation, if interpolation is on.
    pub fn interpolation(&self) -> Option<f32> {
        self.interpolation
    }

    pub fn homing_speed(&self) -> f32 {
        self.homing_speed
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Inward travel, in steps, that guarantees homing reaches the stop.
    ///
    /// This is 110% of the full radial travel, rounded up, so that the stop
    /// is reached even if the step count has drifted.
    pub fn homing_travel(&self) -> u32 {
        let travel = (self.radial_total_steps as u64 * 11).div_ceil(10);
        travel.min(u32::MAX as u64) as u32
    }
}

/// Returns `true` for finite values greater than zero.
fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Configuration errors.
#[derive(Debug, uDebug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// An axis was configured with zero steps of travel.
    InvalidStepCount,
    /// The coupling magnitude is not a finite number.
    InvalidCoupling,
    /// A speed was zero, negative or not finite.
    InvalidSpeed,
    /// An acceleration was zero, negative or not finite.
    InvalidAcceleration,
    /// An interpolation resolution was zero, negative or not finite.
    InvalidResolution,
}
