use crate::MicroSeconds;

/// Abstraction for synchronous timing delays.
pub trait Delay {
    /// Blocks for the specified time before returning.
    ///
    /// # Parameters
    ///
    /// - `duration`: How long to block.
    fn delay_us(&mut self, duration: MicroSeconds);
}

#[cfg(test)]
pub mod test {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Delay that records every request instead of blocking.
    ///
    /// Clones share the same record.
    #[derive(Clone, Default)]
    pub struct TestDelay {
        requests: Arc<Mutex<Vec<MicroSeconds>>>,
    }
    impl TestDelay {
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns all delays requested so far, in order.
        pub fn requests(&self) -> Vec<MicroSeconds> {
            self.requests.lock().unwrap().clone()
        }
    }
    impl Delay for TestDelay {
        fn delay_us(&mut self, duration: MicroSeconds) {
            self.requests.lock().unwrap().push(duration);
        }
    }
}
