use chrono::{DateTime, Local};

/// Wall-clock source for receipt timestamps and window ends.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// The host's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
