//! Single-threaded runtime for dragkit
//!
//! The runtime owns two queues that the host drives by reporting frame
//! timestamps:
//!
//! - frame callbacks, used by animations to advance one step per frame
//! - scheduled tasks, used for deferred work such as delayed drag activation
//!
//! Time only moves when the host calls [`Runtime::advance_frame`], which keeps
//! every interaction deterministic under test. Real hosts can feed it from a
//! [`MonotonicClock`].

mod clock;
mod frame_clock;
mod runtime;
mod task;

pub use clock::MonotonicClock;
pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use runtime::{Runtime, RuntimeHandle};
pub use task::ScheduledTask;

pub type FrameCallbackId = u64;
pub type TaskId = u64;

/// Nanoseconds in one millisecond.
pub const NANOS_PER_MILLI: u64 = 1_000_000;

/// Frame interval used by test harnesses and the demo (~60 FPS).
pub const FRAME_INTERVAL_NANOS: u64 = 16_666_667;
