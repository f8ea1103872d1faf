//! Core traits and watcher plumbing for tether.

#![no_std]
#![forbid(unsafe_code)]
extern crate alloc;

#[cfg(test)]
extern crate std;

use crate::watcher::{Context, WatcherGuard};

pub mod watcher;

/// A value that can be read and observed.
///
/// Implementors hand out their current value through [`Signal::get`] and
/// notify registered watchers whenever that value is replaced.
pub trait Signal: Clone + 'static {
    /// The type of value produced by this signal.
    type Output: 'static;
    /// The guard returned by [`Signal::watch`]. Dropping it unregisters the watcher.
    type Guard: WatcherGuard;

    /// Returns the current value.
    fn get(&self) -> Self::Output;

    /// Registers a watcher that is called with every new value.
    ///
    /// Returns a guard that, when dropped, will unregister the watcher.
    #[must_use]
    fn watch(&self, watcher: impl Fn(Context<Self::Output>) + 'static) -> Self::Guard;
}

/// A [`Signal`] that also accepts new values from the outside.
///
/// This is the write half of a two-way binding: a view reads through
/// [`Signal::get`] and writes user edits back through [`Writable::set`].
pub trait Writable: Signal {
    /// Replaces the current value.
    ///
    /// This will typically trigger notifications to any watchers.
    fn set(&self, value: Self::Output);
}
