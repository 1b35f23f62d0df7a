mod delay;
pub mod read_uart;
mod stepper;

pub use delay::Delay;
pub use stepper::Stepper;
