//! Homing.
//!
//! There is no limit switch. Instead, the radial axis is driven inwards far
//! enough that it must end up against its mechanical stop, wherever it
//! started. Steps commanded after the carriage reaches the stop are lost
//! against it. Once the travel is done, the current position of both axes is
//! declared to be the origin.

use ufmt::uWrite;

use crate::{Actuator, Axis, Console, Direction, MotionContext, Reply, Steps};

/// Stage of a homing run.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum HomingPhase {
    /// Not started; `HOMING` has not been written yet.
    Announce,
    /// Driving inwards from `start`.
    Seeking { start: Steps },
    /// Travel done; positions are about to be zeroed.
    Zeroing,
    /// Finished; `HOMED` has been written.
    Complete,
}

/// Homing state machine.
///
/// Each call to [Homing::poll] does one small piece of work, so a caller can
/// interleave homing with other duties. [Homing::run] polls to completion.
pub struct Homing {
    phase: HomingPhase,
    travel: u32,
    speed: f32,
}
impl Homing {
    /// Prepares a homing run using the travel and speed from the context's
    /// configuration.
    pub fn new<A: Actuator>(ctx: &MotionContext<A>) -> Self {
        Self {
            phase: HomingPhase::Announce,
            travel: ctx.config().homing_travel(),
            speed: ctx.config().homing_speed(),
        }
    }

    pub fn phase(&self) -> HomingPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == HomingPhase::Complete
    }

    /// Advances homing by one step.
    ///
    /// While seeking, this checks how far the radial axis has travelled and,
    /// if that is not yet far enough, jogs it inwards by one step.
    ///
    /// # Returns
    ///
    /// The phase homing is in after this call.
    pub fn poll<A: Actuator, W: uWrite>(
        &mut self,
        ctx: &mut MotionContext<A>,
        console: &mut Console<W>,
    ) -> Result<HomingPhase, W::Error> {
        self.phase = match self.phase {
            HomingPhase::Announce => {
                console.reply(Reply::Homing)?;
                info!(console, "homing: {} steps inwards", self.travel)?;
                let start = ctx.actuator().position(Axis::Radial);
                HomingPhase::Seeking { start }
            }
            HomingPhase::Seeking { start } => {
                let position = ctx.actuator().position(Axis::Radial);
                let travelled = start.get_value() as i64 - position.get_value() as i64;
                if travelled >= self.travel as i64 {
                    HomingPhase::Zeroing
                } else {
                    ctx.actuator_mut()
                        .jog(Axis::Radial, Direction::Negative, self.speed);
                    HomingPhase::Seeking { start }
                }
            }
            HomingPhase::Zeroing => {
                ctx.zero_at_origin();
                console.reply(Reply::Homed)?;
                HomingPhase::Complete
            }
            HomingPhase::Complete => HomingPhase::Complete,
        };
        Ok(self.phase)
    }

    /// Polls until homing is complete.
    pub fn run<A: Actuator, W: uWrite>(
        &mut self,
        ctx: &mut MotionContext<A>,
        console: &mut Console<W>,
    ) -> Result<(), W::Error> {
        while !self.is_complete() {
            self.poll(ctx, console)?;
        }
        Ok(())
    }
}
