use arduino_hal::{
    delay_us,
    port::{mode::Output, Pin, PinOps},
    prelude::_unwrap_infallible_UnwrapInfallible,
};
use embedded_hal::digital::{OutputPin, PinState};
use polarmotion::{Direction, MicroSeconds};

/// Stepper motor driven through step and direction pins.
///
/// # Type Parameters
///
/// - `P`: pulse pin
/// - `D`: direction pin
pub struct Stepper<P, D> {
    /// Pin to use for pulses.
    pin_pulse: Pin<Output, P>,
    /// Pin to use for direction indication.
    pin_direction: Pin<Output, D>,
    /// Stores the current direction.
    direction: Direction,
    /// Width of the high and low halves of a pulse.
    delay_pulse: MicroSeconds,
    /// Settling time either side of a direction change.
    delay_direction: MicroSeconds,
}

impl<P: PinOps, D: PinOps> Stepper<P, D> {
    /// Creates a new `Stepper`.
    ///
    /// # Parameters
    ///
    /// - `pin_pulse`: Pin to use for pulse signals.
    /// - `pin_direction`: Pin to use for direction signals.
    /// - `delay_pulse`: Width of each half of a pulse.
    /// - `delay_direction`: Settling time around direction changes.
    pub fn new(
        pin_pulse: Pin<Output, P>,
        pin_direction: Pin<Output, D>,
        delay_pulse: MicroSeconds,
        delay_direction: MicroSeconds,
    ) -> Self {
        let direction = Direction::Negative;
        let mut stepper = Self {
            pin_pulse,
            pin_direction,
            direction,
            delay_pulse,
            delay_direction,
        };

        // The pin may not match our idea of the direction yet.
        stepper.force_set_direction(direction);

        stepper
    }

    /// Set the direction, but only if it needs changing.
    fn set_direction(&mut self, direction: Direction) {
        if direction != self.direction {
            self.force_set_direction(direction);
        }
    }

    /// Set the direction pin unconditionally.
    fn force_set_direction(&mut self, direction: Direction) {
        delay_us(self.delay_direction.get_value());
        self.pin_direction
            .set_state(pin_state(direction))
            .unwrap_infallible();
        self.direction = direction;
        delay_us(self.delay_direction.get_value());
    }
}

/// Direction pin level: high for positive travel.
fn pin_state(direction: Direction) -> PinState {
    match direction {
        Direction::Positive => PinState::High,
        Direction::Negative => PinState::Low,
    }
}

impl<P: PinOps, D: PinOps> polarmotion::Stepper for Stepper<P, D> {
    fn step(&mut self, direction: Direction) {
        self.set_direction(direction);
        self.pin_pulse.set_high();
        delay_us(self.delay_pulse.get_value());
        self.pin_pulse.set_low();
        delay_us(self.delay_pulse.get_value());
    }
}
