use ufmt::{uDisplay, uWrite, Formatter};
use ufmt_macros::uDebug;

/// Acknowledgment tokens written back to the host, one per line.
#[derive(Debug, uDebug, PartialEq, Eq, Clone, Copy)]
pub enum Reply {
    /// The firmware is idle and will accept a command.
    Ready,
    /// Homing has started.
    Homing,
    /// Homing has finished; the machine is at the origin.
    Homed,
    /// The speed limit was changed.
    SpeedSet,
    /// A `SET_SPEED` value was unusable.
    InvalidSpeed,
    /// A keyword command was malformed.
    InvalidCommand,
    /// Theta was unwound to zero.
    ThetaReset,
    /// The line was not acted on.
    Ignored,
}
impl Reply {
    const ALL: [Reply; 8] = [
        Reply::Ready,
        Reply::Homing,
        Reply::Homed,
        Reply::SpeedSet,
        Reply::InvalidSpeed,
        Reply::InvalidCommand,
        Reply::ThetaReset,
        Reply::Ignored,
    ];

    /// The token as written on the wire.
    pub fn token(&self) -> &'static str {
        match self {
            Reply::Ready => "READY",
            Reply::Homing => "HOMING",
            Reply::Homed => "HOMED",
            Reply::SpeedSet => "SPEED_SET",
            Reply::InvalidSpeed => "INVALID_SPEED",
            Reply::InvalidCommand => "INVALID_COMMAND",
            Reply::ThetaReset => "THETA_RESET",
            Reply::Ignored => "IGNORED",
        }
    }

    /// Recognizes a reply line, as read by a host.
    pub fn from_token(line: &str) -> Option<Reply> {
        Self::ALL.into_iter().find(|reply| reply.token() == line)
    }
}

impl uDisplay for Reply {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        f.write_str(self.token())
    }
}
