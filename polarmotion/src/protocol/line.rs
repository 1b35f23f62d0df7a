use heapless::String;

/// Assembles a line from characters received one at a time.
///
/// A line that does not fit is cut back to its last complete `;`, so an
/// over-long batch line still yields its leading pairs; the batch capacity
/// then decides which of them run. Characters after the cut are read and
/// discarded up to the terminator, so the tail of a long line is never
/// mistaken for the next one.
///
/// # Type Parameters
///
/// - `N`: capacity in bytes.
#[derive(Debug, Default)]
pub struct LineBuffer<const N: usize> {
    text: String<N>,
    truncated: bool,
}
impl<const N: usize> LineBuffer<N> {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            truncated: false,
        }
    }

    /// Forgets the current line.
    pub fn clear(&mut self) {
        self.text.clear();
        self.truncated = false;
    }

    /// Appends a received character.
    ///
    /// # Returns
    ///
    /// `true` if `c` was the `'\n'` that ends the line. The terminator is not
    /// stored.
    pub fn push(&mut self, c: char) -> bool {
        if c == '\n' {
            return true;
        }
        if !self.truncated && self.text.push(c).is_err() {
            self.truncated = true;
            let keep = self.text.rfind(';').map_or(0, |i| i + 1);
            self.text.truncate(keep);
        }
        false
    }

    /// `true` if the line did not fit and was cut short.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// The line received so far.
    ///
    /// # Returns
    ///
    /// - `Ok(line)`: the whole line, or the part of an over-long line up to
    ///   its last `;` that fit.
    /// - `Err(Overflow)`: if the line did not fit and nothing usable was
    ///   kept.
    pub fn line(&self) -> Result<&str, Overflow> {
        if self.truncated && self.text.is_empty() {
            Err(Overflow)
        } else {
            Ok(&self.text)
        }
    }
}

/// A line was too long to be used.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Overflow;

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::test::sample_config;
    use crate::console::test::Transcript;
    use crate::motion::test::sample_context;
    use crate::pattern::encode_batch;
    use crate::{Console, Dispatcher, Verbosity, Waypoint};

    /// Feeds `text` in, stopping after the first terminator.
    fn receive<const N: usize>(buffer: &mut LineBuffer<N>, text: &str) -> bool {
        buffer.clear();
        text.chars().any(|c| buffer.push(c))
    }

    #[test]
    fn test_whole_line() {
        let mut buffer = LineBuffer::<16>::new();
        assert!(receive(&mut buffer, "HOME\n"));
        assert_eq!(Ok("HOME"), buffer.line());
        assert!(!buffer.is_truncated());
    }

    #[test]
    fn test_waits_for_terminator() {
        let mut buffer = LineBuffer::<16>::new();
        assert!(!receive(&mut buffer, "1,0.5;"));
        assert_eq!(Ok("1,0.5;"), buffer.line());
    }

    #[test]
    fn test_long_batch_keeps_whole_pairs() {
        let mut buffer = LineBuffer::<16>::new();
        assert!(receive(&mut buffer, "1.000,0.500;2.000,0.500;3.000,0.500;\n"));
        assert_eq!(Ok("1.000,0.500;"), buffer.line());
        assert!(buffer.is_truncated());
    }

    #[test]
    fn test_long_line_without_pairs() {
        let mut buffer = LineBuffer::<8>::new();
        assert!(receive(&mut buffer, "SET_SPEED 1000000\n"));
        assert_eq!(Err(Overflow), buffer.line());
    }

    #[test]
    fn test_clear_after_overflow() {
        let mut buffer = LineBuffer::<8>::new();
        receive(&mut buffer, "SET_SPEED 1000000\n");
        assert!(receive(&mut buffer, "HOME\n"));
        assert_eq!(Ok("HOME"), buffer.line());
        assert!(!buffer.is_truncated());
    }

    #[test]
    fn test_long_batch_still_runs() {
        // Twenty pairs at three decimals, as a host streams them.
        let waypoints: Vec<Waypoint> = (0..20)
            .map(|i| Waypoint::new(0.0, (i + 1) as f32 / 20.0))
            .collect();
        let mut text: std::string::String = std::string::String::new();
        encode_batch(&waypoints, &mut text).unwrap();
        text.push('\n');
        assert!(text.len() > 192);

        let mut buffer = LineBuffer::<192>::new();
        assert!(receive(&mut buffer, &text));
        assert!(buffer.is_truncated());

        let config = sample_config().with_interpolation(None).unwrap();
        let (_, mut ctx) = sample_context(config, 0);
        let mut console = Console::new(Transcript::new(), Verbosity::Quiet);
        let mut dispatcher: Dispatcher<10> = Dispatcher::new();
        let line = buffer.line().unwrap();
        dispatcher.handle_line(line, &mut ctx, &mut console).unwrap();

        assert_eq!(vec!["READY"], console.writer().lines());
        assert_eq!(0.5, ctx.state().rho());
    }
}
