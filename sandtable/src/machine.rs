use crate::devices::{read_uart, Delay, Stepper};
use arduino_hal::{
    default_serial, delay_ms,
    hal::port::{PD0, PD1},
    pac::USART0,
    pins,
    port::{
        mode::{Input, Output},
        Pin, D10, D11, D8, D9,
    },
    prelude::_unwrap_infallible_UnwrapInfallible,
    Peripherals, Pins, Usart,
};
use polarmotion::{
    error, info, protocol::LineBuffer, ConfigError, Console, Coupling,
    CouplingSign, Dispatcher, DualAxis, MachineConfig, MicroSeconds,
    MotionContext, Reply, Verbosity,
};
use ufmt::uwriteln;

/// Steps for one full turn of the turntable.
const ROTATION_TOTAL_STEPS: u32 = 13730;
/// Steps from the centre stop to the rim.
const RADIAL_TOTAL_STEPS: u32 = 4642;
/// Turntable gear ratio; sets how far one turn winds the radial axis.
const GEAR_RATIO: f32 = 100.0 / 15.0;
const COUPLING_SIGN: CouplingSign = CouplingSign::Subtract;
/// Steps per second.
const MAX_SPEED: f32 = 550.0;
/// Steps per second per second.
const MAX_ACCELERATION: f32 = 5000.0;
/// Steps per second.
const HOMING_SPEED: f32 = 550.0;
const INTERPOLATION_RESOLUTION: Option<f32> = Some(0.005);
const VERBOSITY: Verbosity = Verbosity::Quiet;

const BAUD_RATE: u32 = 115200;
/// Waypoints per batch.
const BATCH_CAPACITY: usize = 10;
/// Longest line kept whole: a full batch of `-dd.ddd,d.ddd;` pairs, with
/// room to spare. Longer batch lines are cut back to whole pairs.
const LINE_CAPACITY: usize = 192;

type Serial = Usart<USART0, Pin<Input, PD0>, Pin<Output, PD1>>;
type Axes = DualAxis<Stepper<D8, D9>, Stepper<D10, D11>, Delay>;

pub struct Machine {
    ctx: MotionContext<Axes>,
    console: Console<Serial>,
    dispatcher: Dispatcher<BATCH_CAPACITY>,
    uart_input_buffer: LineBuffer<LINE_CAPACITY>,
}

impl Machine {
    pub fn new() -> Self {
        let peripherals: Peripherals = unsafe { Peripherals::steal() };
        let pins: Pins = pins!(peripherals);
        let mut serial = default_serial!(peripherals, pins, BAUD_RATE);
        delay_ms(100);

        let config = match machine_config() {
            Ok(config) => config,
            Err(err) => {
                uwriteln!(&mut serial, "ERROR: Invalid configuration: {:?}.", err)
                    .unwrap_infallible();
                halt()
            }
        };

        // Driver timing
        let delay_pulse = MicroSeconds::new(5);
        let delay_direction = MicroSeconds::new(10);

        // Axes
        let rotation = Stepper::new(
            pins.d8.into_output(),
            pins.d9.into_output(),
            delay_pulse,
            delay_direction,
        );
        let radial = Stepper::new(
            pins.d10.into_output(),
            pins.d11.into_output(),
            delay_pulse,
            delay_direction,
        );
        let axes = DualAxis::new(rotation, radial, Delay);

        Self {
            ctx: MotionContext::new(config, axes),
            console: Console::new(serial, config.verbosity()),
            dispatcher: Dispatcher::new(),
            uart_input_buffer: LineBuffer::new(),
        }
    }

    /// Announce the machine and home it.
    pub fn start(&mut self) {
        self.dispatcher
            .startup(&mut self.ctx, &mut self.console)
            .unwrap_infallible();
    }

    /// Block for the next line and act on it.
    pub fn next_command(&mut self) {
        read_uart::readln(self.console.writer_mut(), &mut self.uart_input_buffer);
        match self.uart_input_buffer.line() {
            Err(_) => {
                error!(self.console, "UART buffer overflow.").unwrap_infallible();
                self.console.reply(Reply::Ignored).unwrap_infallible();
            }
            Ok(line) => {
                if self.uart_input_buffer.is_truncated() {
                    info!(self.console, "line cut to {} chars", line.len())
                        .unwrap_infallible();
                }
                self.dispatcher
                    .handle_line(line, &mut self.ctx, &mut self.console)
                    .unwrap_infallible();
            }
        }
    }
}

/// The configuration of this table.
fn machine_config() -> Result<MachineConfig, ConfigError> {
    let coupling =
        Coupling::from_gear_ratio(ROTATION_TOTAL_STEPS, GEAR_RATIO, COUPLING_SIGN);
    Ok(MachineConfig::new(ROTATION_TOTAL_STEPS, RADIAL_TOTAL_STEPS, coupling)?
        .with_max_speed(MAX_SPEED)?
        .with_max_acceleration(MAX_ACCELERATION)?
        .with_homing_speed(HOMING_SPEED)?
        .with_interpolation(INTERPOLATION_RESOLUTION)?
        .with_verbosity(VERBOSITY))
}

/// Stop here for good.
fn halt() -> ! {
    loop {
        delay_ms(1000);
    }
}
