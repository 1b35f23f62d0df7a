use arduino_hal::{
    hal::Atmega,
    prelude::*,
    usart::{Usart, UsartOps},
};
use polarmotion::protocol::LineBuffer;

/// Reads an ASCII line from the serial UART into `buffer`.
///
/// This blocks until a `'\n'` arrives. The terminator is not stored. A line
/// that does not fit is read to its end; `buffer` keeps what it can use.
pub fn readln<USART, RX, TX, const N: usize>(
    serial: &mut Usart<USART, RX, TX>,
    buffer: &mut LineBuffer<N>,
) where
    USART: UsartOps<Atmega, RX, TX>,
{
    buffer.clear();
    while !buffer.push(read_u8_blocking(serial) as char) {}
}

/// Block and wait for a character from a serial input.
fn read_u8_blocking<USART, RX, TX>(serial: &mut Usart<USART, RX, TX>) -> u8
where
    USART: UsartOps<Atmega, RX, TX>,
{
    nb::block!(serial.read()).unwrap_infallible()
}
