//! Command dispatch.
//!
//! The [Dispatcher] turns lines from the host into motion. It holds the
//! batch buffer and tracks whether a command is in progress. The firmware's
//! reader is blocked while a command runs, but the guard keeps the rule
//! explicit: a line that arrives while busy is answered with `IGNORED`
//! and changes nothing.

use ufmt::uWrite;

use crate::protocol::{self, Batch, Command};
use crate::{Actuator, Console, Homing, MotionContext, Reply};

/// What the dispatcher is doing.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum State {
    /// Waiting for a line.
    Idle,
    /// A command has been accepted and not yet finished.
    Busy(Command),
}

/// Why a line was not accepted.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Rejection {
    /// A command is already in progress.
    Busy,
    /// The line could not be parsed.
    Protocol(protocol::Error),
}
impl Rejection {
    /// The reply telling the host about this rejection.
    pub fn reply(&self) -> Reply {
        match self {
            Rejection::Busy => Reply::Ignored,
            Rejection::Protocol(error) => error.reply(),
        }
    }
}

/// Line dispatcher.
///
/// # Type Parameters
///
/// - `N`: capacity of the batch buffer, in waypoints.
pub struct Dispatcher<const N: usize> {
    state: State,
    batch: Batch<N>,
}
impl<const N: usize> Dispatcher<N> {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            batch: Batch::new(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Waypoints waiting to be executed.
    pub fn batch(&self) -> &Batch<N> {
        &self.batch
    }

    /// Announces readiness, then homes.
    ///
    /// This is the power-on sequence: `READY`, `HOMING`, `HOMED`, `READY`.
    pub fn startup<A: Actuator, W: uWrite>(
        &mut self,
        ctx: &mut MotionContext<A>,
        console: &mut Console<W>,
    ) -> Result<(), W::Error> {
        console.reply(Reply::Ready)?;
        self.state = State::Busy(Command::Home);
        self.run(ctx, console)
    }

    /// Accepts a line for execution.
    ///
    /// On success the dispatcher is busy until [Dispatcher::run] is called.
    /// A line offered while busy is rejected without being parsed, so a
    /// pending batch is never overwritten.
    pub fn accept(&mut self, line: &str) -> Result<Command, Rejection> {
        if let State::Busy(_) = self.state {
            return Err(Rejection::Busy);
        }
        let command = Command::parse(line, &mut self.batch).map_err(Rejection::Protocol)?;
        self.state = State::Busy(command);
        Ok(command)
    }

    /// Executes the accepted command, if any, and returns to idle.
    pub fn run<A: Actuator, W: uWrite>(
        &mut self,
        ctx: &mut MotionContext<A>,
        console: &mut Console<W>,
    ) -> Result<(), W::Error> {
        let State::Busy(command) = self.state else {
            return Ok(());
        };
        let result = self.execute(command, ctx, console);
        self.batch.clear();
        self.state = State::Idle;
        result
    }

    /// Accepts and runs a line, replying to it either way.
    pub fn handle_line<A: Actuator, W: uWrite>(
        &mut self,
        line: &str,
        ctx: &mut MotionContext<A>,
        console: &mut Console<W>,
    ) -> Result<(), W::Error> {
        match self.accept(line) {
            Ok(_) => self.run(ctx, console),
            Err(rejection) => {
                info!(console, "rejected {:?}: {}", rejection, line)?;
                console.reply(rejection.reply())
            }
        }
    }

    fn execute<A: Actuator, W: uWrite>(
        &self,
        command: Command,
        ctx: &mut MotionContext<A>,
        console: &mut Console<W>,
    ) -> Result<(), W::Error> {
        match command {
            Command::Home => {
                Homing::new(ctx).run(ctx, console)?;
            }
            Command::SetSpeed(speed) => {
                if ctx.set_max_speed(speed).is_err() {
                    return console.reply(Reply::InvalidSpeed);
                }
                console.reply(Reply::SpeedSet)?;
            }
            Command::ResetTheta => {
                ctx.reset_theta();
                // Sent twice; hosts wait for either copy.
                console.reply(Reply::ThetaReset)?;
                console.reply(Reply::ThetaReset)?;
            }
            Command::Batch => {
                if self.batch.is_malformed() {
                    error!(console, "malformed pair after {} waypoints", self.batch.len())?;
                }
                if self.batch.dropped() > 0 {
                    info!(console, "batch full, {} pairs dropped", self.batch.dropped())?;
                }
                ctx.run_batch(self.batch.waypoints());
            }
        }
        console.reply(Reply::Ready)
    }
}

impl<const N: usize> Default for Dispatcher<N> {
    fn default() -> Self {
        Self::new()
    }
}
