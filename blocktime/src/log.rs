//! Log how long a block ran, in the shape
//! `"<definition>" ran for <secs> seconds`.

use std::future::Future;

use blocktime_format::format_block_time;

use crate::clock::MonotonicClock;
use crate::timing::BlockReturn;
use crate::timing::time_and_return_with;

/// Label for blocks the caller has no better name for.
pub const UNNAMED_BLOCK: &str = "<block>";

/// Destination for formatted timing lines.
///
/// Fire-and-forget: implementations report nothing back. The sink is a
/// plain value the caller passes in, so tests record lines without touching
/// process-wide state; deferred blocks carry their sink into the completion
/// path.
pub trait LogSink {
    /// Write one formatted line.
    fn write_line(&self, line: &str);
}

/// Emits lines through `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write_line(&self, line: &str) {
        tracing::info!("{line}");
    }
}

/// Writes lines to standard output, for use without a tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn write_line(&self, line: &str) {
        println!("{line}");
    }
}

/// Run `block` and log how long it took through the default [`TracingSink`],
/// labelled `label`.
///
/// `label` stands in for the block's source text, which Rust cannot recover
/// from a closure at runtime; the [`log_time_and_return!`](crate::log_time_and_return!)
/// macro captures it from the source instead. The block's return passes
/// through untouched, and for a deferred block the line is written on
/// settlement, not on return.
pub fn log_time_and_return<T, F, B>(
    label: impl Into<String>,
    block: B,
) -> BlockReturn<T, impl Future<Output = T>>
where
    B: FnOnce() -> BlockReturn<T, F>,
    F: Future<Output = T>,
{
    log_time_and_return_with(TracingSink, label, block)
}

/// [`log_time_and_return()`] through an explicit sink.
pub fn log_time_and_return_with<S, T, F, B>(
    sink: S,
    label: impl Into<String>,
    block: B,
) -> BlockReturn<T, impl Future<Output = T>>
where
    S: LogSink,
    B: FnOnce() -> BlockReturn<T, F>,
    F: Future<Output = T>,
{
    let label = label.into();
    time_and_return_with(
        MonotonicClock::new(),
        move |elapsed_ms| sink.write_line(&format_block_time(&label, elapsed_ms)),
        block,
    )
}

/// Run a block expression and log how long it took, using the block's own
/// source text as the label.
///
/// The single-argument form logs through the default [`TracingSink`]; the
/// two-argument form takes an explicit [`LogSink`] first.
///
/// ```
/// use blocktime::BlockReturn;
/// use blocktime::log_time_and_return;
///
/// let result = log_time_and_return!(|| BlockReturn::now(1 + 1));
/// assert_eq!(result.into_immediate(), Some(2));
/// ```
#[macro_export]
macro_rules! log_time_and_return {
    ($sink:expr, $block:expr) => {
        $crate::log_time_and_return_with($sink, ::std::stringify!($block), $block)
    };
    ($block:expr) => {
        $crate::log_time_and_return(::std::stringify!($block), $block)
    };
}
