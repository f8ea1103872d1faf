//! # Diagnostic logging for signals
//!
//! [`Logged`] wraps a signal and reports what happens to it through the
//! [`log`] facade. Which events are reported is chosen with [`Trace`].
//! No logger is installed by this crate.
//!
//! ```rust
//! use tether::{State, Signal, debug::{Logged, Trace}};
//!
//! let count = State::new(0);
//!
//! // Logs every committed value at `info`.
//! let logged = Logged::changes(count.clone());
//!
//! // Logs reads and watcher lifecycle as well.
//! let noisy = Logged::labelled(count.clone(), "count", Trace::verbose());
//!
//! count.set(1);
//! assert_eq!(noisy.get(), 1);
//! # drop(logged);
//! ```

use alloc::{boxed::Box, rc::Rc};
use core::any::type_name;

use crate::{
    Signal,
    watcher::{BoxWatcherGuard, Context, OnDrop},
};

/// A signal wrapper that logs changes, reads and watcher lifecycle.
#[derive(Debug, Clone)]
pub struct Logged<S> {
    source: S,
    inner: Rc<LoggedInner>,
}

struct LoggedInner {
    _guard: BoxWatcherGuard,
    label: &'static str,
    trace: Trace,
}

impl core::fmt::Debug for LoggedInner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoggedInner")
            .field("label", &self.label)
            .field("trace", &self.trace)
            .finish_non_exhaustive()
    }
}

impl<S> Logged<S>
where
    S: Signal,
    S::Output: core::fmt::Debug,
{
    /// Wraps `source`, naming it after its type in log lines.
    pub fn with_trace(source: S, trace: Trace) -> Self {
        Self::labelled(source, type_name::<S>(), trace)
    }

    /// Wraps `source`, naming it `label` in log lines.
    ///
    /// When changes are traced, the value at the time of wrapping is logged
    /// once as well.
    pub fn labelled(source: S, label: &'static str, trace: Trace) -> Self {
        let guard: BoxWatcherGuard = if trace.logs_changes() {
            log::info!("`{label}` starts as {:?}", source.get());
            Box::new(source.watch(move |context: Context<S::Output>| {
                let value = context.value();
                let metadata = context.metadata();
                if metadata.is_empty() {
                    log::info!("`{label}` changed to {value:?}");
                } else {
                    log::info!("`{label}` changed to {value:?} with metadata {metadata:?}");
                }
            }))
        } else {
            Box::new(())
        };

        Self {
            source,
            inner: Rc::new(LoggedInner {
                _guard: guard,
                label,
                trace,
            }),
        }
    }

    /// Logs committed values only.
    pub fn changes(source: S) -> Self {
        Self::with_trace(source, Trace::changes())
    }

    /// Logs everything.
    pub fn verbose(source: S) -> Self {
        Self::with_trace(source, Trace::verbose())
    }

    /// The wrapped signal.
    pub const fn source(&self) -> &S {
        &self.source
    }
}

/// Selects the events a [`Logged`] signal reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Trace(u8);

impl Trace {
    const READ: u8 = 1 << 0;
    const WATCH: u8 = 1 << 1;
    const UNWATCH: u8 = 1 << 2;
    const CHANGE: u8 = 1 << 3;

    /// Logs nothing.
    #[must_use]
    pub const fn off() -> Self {
        Self(0)
    }

    /// Logs committed values, at `info`.
    #[must_use]
    pub const fn changes() -> Self {
        Self(Self::CHANGE)
    }

    /// Logs reads, watcher lifecycle and committed values.
    #[must_use]
    pub const fn verbose() -> Self {
        Self(Self::READ | Self::WATCH | Self::UNWATCH | Self::CHANGE)
    }

    /// Logs reads, at `debug`.
    #[must_use]
    pub const fn reads() -> Self {
        Self(Self::READ)
    }

    /// Logs watcher registration and removal, at `debug`.
    #[must_use]
    pub const fn watchers() -> Self {
        Self(Self::WATCH | Self::UNWATCH)
    }

    /// Combines two settings.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    const fn has(self, flag: u8) -> bool {
        self.0 & flag == flag
    }

    const fn logs_changes(self) -> bool {
        self.has(Self::CHANGE)
    }

    const fn logs_reads(self) -> bool {
        self.has(Self::READ)
    }

    const fn logs_watch(self) -> bool {
        self.has(Self::WATCH)
    }

    const fn logs_unwatch(self) -> bool {
        self.has(Self::UNWATCH)
    }
}

impl Default for Trace {
    fn default() -> Self {
        Self::changes()
    }
}

impl<S> Signal for Logged<S>
where
    S: Signal,
    S::Output: core::fmt::Debug,
{
    type Output = S::Output;
    type Guard = BoxWatcherGuard;

    fn get(&self) -> Self::Output {
        let value = self.source.get();
        if self.inner.trace.logs_reads() {
            log::debug!("`{}` read {value:?}", self.inner.label);
        }
        value
    }

    fn watch(&self, watcher: impl Fn(Context<S::Output>) + 'static) -> Self::Guard {
        let guard = self.source.watch(watcher);
        let label = self.inner.label;
        if self.inner.trace.logs_watch() {
            log::debug!("`{label}` gained a watcher");
        }
        if self.inner.trace.logs_unwatch() {
            Box::new(OnDrop::attach(guard, move || {
                log::debug!("`{label}` lost a watcher");
            }))
        } else {
            Box::new(guard)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::State;

    #[test]
    fn union_combines_flags() {
        let trace = Trace::reads().union(Trace::watchers());
        assert!(trace.logs_reads());
        assert!(trace.logs_watch());
        assert!(!trace.logs_changes());
        assert_eq!(trace.union(Trace::changes()), Trace::verbose());
    }

    #[test]
    fn logged_signal_is_transparent() {
        let state = State::new(1);
        let logged = Logged::verbose(state.clone());
        let seen = Rc::new(core::cell::Cell::new(0));

        let guard = {
            let seen = seen.clone();
            logged.watch(move |ctx| seen.set(*ctx.value()))
        };
        state.set(5);
        assert_eq!(logged.get(), 5);
        assert_eq!(seen.get(), 5);

        drop(guard);
        state.set(6);
        assert_eq!(seen.get(), 5);
    }
}
