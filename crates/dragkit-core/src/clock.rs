use web_time::Instant;

/// Wall clock for hosts that do not get frame timestamps from their event
/// loop. Reports nanoseconds elapsed since the clock was created, suitable
/// for [`Runtime::advance_frame`](crate::Runtime::advance_frame).
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now_nanos(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}
