//! Wall-clock timing for single blocks of work.
//!
//! [`time_and_return`] runs a block, reports its elapsed milliseconds to a
//! callback exactly once, and passes the block's return through untouched.
//! A block declares through [`BlockReturn`] whether it finished immediately
//! or handed back a future; deferred blocks are measured to settlement, not
//! to first return. [`log_time_and_return()`] layers a human-readable log
//! line on top, and the [`log_time_and_return!`] macro captures the block's
//! source text for the label.
//!
//! This is not a profiler: one invocation, one measurement, one report.

pub mod clock;
pub mod log;
pub mod timing;

pub use clock::Clock;
pub use clock::MonotonicClock;
pub use log::LogSink;
pub use log::StdoutSink;
pub use log::TracingSink;
pub use log::UNNAMED_BLOCK;
pub use log::log_time_and_return;
pub use log::log_time_and_return_with;
pub use timing::BlockReturn;
pub use timing::BoxedBlockReturn;
pub use timing::time_and_return;
pub use timing::time_and_return_with;
