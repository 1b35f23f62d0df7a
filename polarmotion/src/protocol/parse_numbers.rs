use winnow::ascii::{digit0, digit1};
use winnow::combinator::{alt, opt};
use winnow::token::{literal, one_of};
use winnow::{Parser, Result};

/// Parses a decimal number as an `f32`.
///
/// Accepts an optional sign, digits with an optional fractional part and an
/// optional exponent. Values that overflow `f32` are rejected, as are `inf`
/// and `nan`.
///
/// Examples of valid input:
///
/// - `"1.571"`
/// - `"-0.5"`
/// - `"+3"`
/// - `".25"`
/// - `"1e3"`
pub fn parse_decimal<'s>(input: &mut &'s str) -> Result<f32> {
    (opt(parse_sign), parse_mantissa, opt(parse_exponent))
        .take()
        .try_map(str::parse::<f32>)
        .verify(|value: &f32| value.is_finite())
        .parse_next(input)
}

/// Parse a sign indicator ("+" or "-").
fn parse_sign<'s>(input: &mut &'s str) -> Result<char> {
    one_of(['+', '-']).parse_next(input)
}

/// Parse digits with an optional fraction, like `12`, `12.`, `12.5` or `.5`.
fn parse_mantissa<'s>(input: &mut &'s str) -> Result<()> {
    alt((
        (digit1, opt((literal("."), digit0))).void(),
        (literal("."), digit1).void(),
    ))
    .parse_next(input)
}

/// Parse an exponent, like `e3` or `E-2`.
fn parse_exponent<'s>(input: &mut &'s str) -> Result<()> {
    (one_of(['e', 'E']), opt(parse_sign), digit1)
        .void()
        .parse_next(input)
}
