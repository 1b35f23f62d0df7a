//! Line protocol spoken over the serial link.
//!
//! The host sends one command per line. A line is one of:
//!
//! - `HOME`
//! - `SET_SPEED <steps per second>`
//! - `RESET_THETA`
//! - a batch of waypoints, each written `theta,rho;`, for example
//!   `0.000,0.000;1.571,0.500;`
//!
//! Matching is exact: keywords are case sensitive and no surrounding
//! whitespace is accepted. The firmware answers each line with one or more
//! [Reply] lines. Lines are assembled with a [LineBuffer].

mod batch;
mod command;
mod line;
mod parse_numbers;
mod reply;

pub use batch::{parse_batch, Batch};
pub use command::{Command, Error};
pub use line::{LineBuffer, Overflow};
pub use parse_numbers::parse_decimal;
pub use reply::Reply;
