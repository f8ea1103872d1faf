//! # Counters
//!
//! A [`Counter`] shows why updates that may share a batch should be written
//! as functions of the previous value.
//!
//! [`Counter::add_repeated`] queues `n` functional updates; each one sees the
//! result of the one before it, so the counter moves by `n * delta`.
//! [`Counter::add_repeated_stale`] queues `n` values computed from the value
//! read when the batch opened; they all agree, so the counter moves by
//! `delta` once.
//!
//! ```rust
//! use tether::Counter;
//!
//! let by_three = Counter::<i32>::default();
//! by_three.add_repeated(1, 3);
//! assert_eq!(by_three.get(), 3);
//!
//! let stale = Counter::<i32>::default();
//! stale.add_repeated_stale(1, 3);
//! assert_eq!(stale.get(), 1);
//! ```

use num_traits::Num;

use crate::{State, watcher::WatcherManagerGuard};

/// `current + delta`.
pub fn apply_delta<T: Num>(current: T, delta: T) -> T {
    current + delta
}

/// A numeric state with increment helpers.
#[derive(Debug, Clone)]
pub struct Counter<T: 'static> {
    state: State<T>,
}

impl<T: Num + Copy + 'static> Counter<T> {
    /// Creates a counter starting at `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            state: State::new(initial),
        }
    }

    /// The committed count.
    #[must_use]
    pub fn get(&self) -> T {
        self.state.get()
    }

    /// The state behind this counter.
    #[must_use]
    pub const fn state(&self) -> &State<T> {
        &self.state
    }

    /// Adds one.
    pub fn increment(&self) {
        self.add(T::one());
    }

    /// Adds `delta` to whatever the latest value is when the update runs.
    pub fn add(&self, delta: T) {
        self.state.update(move |current| apply_delta(*current, delta));
    }

    /// Adds `delta` `times` times within one batch. Watchers see one change.
    pub fn add_repeated(&self, delta: T, times: usize) {
        self.state.batch(|| {
            for _ in 0..times {
                self.add(delta);
            }
        });
    }

    /// Queues `times` replacements computed from the value read when the batch
    /// opened. Every replacement is the same number, so only one `delta` lands.
    pub fn add_repeated_stale(&self, delta: T, times: usize) {
        self.state.batch(|| {
            for _ in 0..times {
                self.state.set(apply_delta(self.state.get(), delta));
            }
        });
    }

    /// Registers `watcher` for every committed count.
    pub fn watch(&self, watcher: impl Fn(T) + 'static) -> WatcherManagerGuard<T> {
        self.state.watch(move |context| watcher(*context.value()))
    }
}

impl<T: Num + Copy + 'static> Default for Counter<T> {
    fn default() -> Self {
        Self::new(T::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{rc::Rc, vec::Vec};
    use core::cell::RefCell;

    #[test]
    fn apply_delta_adds() {
        assert_eq!(apply_delta(40, 2), 42);
        assert_eq!(apply_delta(0.5_f64, 0.25), 0.75);
    }

    #[test]
    fn functional_batch_observes_latest_value() {
        let counter = Counter::new(10_i64);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _guard = {
            let seen = seen.clone();
            counter.watch(move |n| seen.borrow_mut().push(n))
        };

        counter.add_repeated(1, 3);
        counter.add_repeated(-2, 4);

        assert_eq!(counter.get(), 5);
        assert_eq!(*seen.borrow(), [13, 5]);
    }

    #[test]
    fn stale_batch_lands_once() {
        let counter = Counter::<u32>::default();
        counter.add_repeated_stale(1, 3);
        assert_eq!(counter.get(), 1);
        counter.add_repeated_stale(5, 2);
        assert_eq!(counter.get(), 6);
    }

    #[test]
    fn increments_outside_batch_apply_one_by_one() {
        let counter = Counter::<u8>::default();
        counter.increment();
        counter.increment();
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn zero_repetitions_change_nothing() {
        let counter = Counter::new(7);
        counter.add_repeated(1, 0);
        assert_eq!(counter.get(), 7);
        assert_eq!(counter.state().pending(), 0);
    }
}
