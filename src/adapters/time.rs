//! Blocking sleeper for the refresh loop and reconnect backoff.

use std::time::Duration;

use crate::app::ports::Sleeper;

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl ThreadSleeper {
    pub fn new() -> Self {
        Self
    }
}

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
