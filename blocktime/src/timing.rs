//! Run a block, report its wall-clock time to a callback, and pass its
//! return through untouched.

use std::future::Future;
use std::future::Ready;

use futures::future::BoxFuture;

use crate::clock::Clock;
use crate::clock::MonotonicClock;

/// What a block produced: a value that is already available, or a future
/// that will produce it.
///
/// The variant is part of the block's type, so the completion path (report
/// immediately vs. report on settlement) is selected statically rather than
/// by inspecting the value at runtime. Blocks that genuinely decide at
/// runtime box the deferred side; see [`BoxedBlockReturn`].
#[derive(Debug)]
pub enum BlockReturn<T, F> {
    /// The block finished synchronously.
    Immediate(T),
    /// The block handed back a deferred computation.
    Deferred(F),
}

/// [`BlockReturn`] for blocks that choose their variant at runtime.
pub type BoxedBlockReturn<'a, T> = BlockReturn<T, BoxFuture<'a, T>>;

impl<T> BlockReturn<T, Ready<T>> {
    /// An immediate return, with the deferred side pinned to [`Ready`] so
    /// always-synchronous blocks infer without a turbofish.
    pub fn now(value: T) -> Self {
        Self::Immediate(value)
    }
}

impl<T, F> BlockReturn<T, F>
where
    F: Future<Output = T>,
{
    /// A deferred return.
    pub fn later(future: F) -> Self {
        Self::Deferred(future)
    }

    /// The immediate value, or the future's output once it completes.
    ///
    /// # Examples
    ///
    /// ```
    /// use blocktime::BlockReturn;
    /// use futures::executor::block_on;
    ///
    /// let immediate: BlockReturn<u8, std::future::Ready<u8>> = BlockReturn::now(7);
    /// assert_eq!(block_on(immediate.settle()), 7);
    /// assert_eq!(block_on(BlockReturn::later(async { 9 }).settle()), 9);
    /// ```
    pub async fn settle(self) -> T {
        match self {
            Self::Immediate(value) => value,
            Self::Deferred(future) => future.await,
        }
    }
}

impl<T, F> BlockReturn<T, F> {
    pub fn is_immediate(&self) -> bool {
        matches!(self, Self::Immediate(_))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    pub fn into_immediate(self) -> Option<T> {
        match self {
            Self::Immediate(value) => Some(value),
            Self::Deferred(_) => None,
        }
    }

    pub fn into_deferred(self) -> Option<F> {
        match self {
            Self::Deferred(future) => Some(future),
            Self::Immediate(_) => None,
        }
    }
}

/// Run `block`, report its wall-clock time to `callback`, and return what
/// the block returned.
///
/// The callback receives elapsed milliseconds as `f64`, exactly once, with
/// sub-millisecond precision intact. For an immediate block it fires before
/// this function returns; for a deferred block this function returns without
/// firing it, and the returned future reports on completion while yielding
/// the inner future's output unconsumed. Measurement always spans from just
/// before the block is invoked to completion, never to first return.
///
/// A block that panics synchronously unwinds past this function and the
/// callback never fires. A deferred block that settles with an `Err` output
/// still fires the callback: cost is measured regardless of outcome. If the
/// returned future is dropped or never polled to completion, the callback
/// never fires and the pending measurement is dropped with it.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
///
/// use blocktime::BlockReturn;
/// use blocktime::time_and_return;
///
/// let reported = Cell::new(None);
/// let result = time_and_return(
///     |elapsed_ms| reported.set(Some(elapsed_ms)),
///     || BlockReturn::now(2 + 2),
/// );
/// assert_eq!(result.into_immediate(), Some(4));
/// assert!(reported.get().is_some());
/// ```
pub fn time_and_return<T, F, B, C>(
    callback: C,
    block: B,
) -> BlockReturn<T, impl Future<Output = T>>
where
    B: FnOnce() -> BlockReturn<T, F>,
    F: Future<Output = T>,
    C: FnOnce(f64),
{
    time_and_return_with(MonotonicClock::new(), callback, block)
}

/// [`time_and_return`] measured against an explicit [`Clock`].
pub fn time_and_return_with<K, T, F, B, C>(
    clock: K,
    callback: C,
    block: B,
) -> BlockReturn<T, impl Future<Output = T>>
where
    K: Clock,
    B: FnOnce() -> BlockReturn<T, F>,
    F: Future<Output = T>,
    C: FnOnce(f64),
{
    let start_ms = clock.now_ms();
    match block() {
        BlockReturn::Immediate(value) => {
            callback(clock.now_ms() - start_ms);
            BlockReturn::Immediate(value)
        }
        BlockReturn::Deferred(future) => BlockReturn::Deferred(async move {
            let value = future.await;
            callback(clock.now_ms() - start_ms);
            value
        }),
    }
}
