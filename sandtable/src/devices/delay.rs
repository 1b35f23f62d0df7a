use polarmotion::MicroSeconds;

/// Real delay on the Arduino Uno microcontroller.
pub struct Delay;

impl polarmotion::Delay for Delay {
    fn delay_us(&mut self, duration: MicroSeconds) {
        arduino_hal::delay_us(duration.get_value());
    }
}
