//! # State
//!
//! [`State<T>`] is the container a component owns for one piece of local
//! state. It hands out the current value, accepts replacements and
//! functional updates, and tells its watchers about every committed value.
//!
//! ## Batching
//!
//! Updates issued inside [`State::batch`] are queued and only applied once
//! the outermost batch closes. They run in the order they were issued, and
//! watchers hear about the result once. Reads inside the batch return the
//! value committed before it opened.
//!
//! Because of that, the two ways of writing "add one" behave differently
//! inside a batch:
//!
//! ```rust
//! use tether::State;
//!
//! let fresh = State::new(0);
//! fresh.batch(|| {
//!     for _ in 0..3 {
//!         fresh.update(|n| n + 1);
//!     }
//! });
//! assert_eq!(fresh.get(), 3);
//!
//! let stale = State::new(0);
//! stale.batch(|| {
//!     for _ in 0..3 {
//!         stale.set(stale.get() + 1);
//!     }
//! });
//! assert_eq!(stale.get(), 1);
//! ```

use alloc::{rc::Rc, vec::Vec};
use core::{
    any::type_name,
    cell::{Cell, RefCell},
    fmt,
};

use crate::{
    Signal, Writable,
    batch::{Flushed, Update},
    watcher::{Context, Metadata, WatcherManager, WatcherManagerGuard},
};

/// An observable, batch-aware value.
///
/// Cloning a `State` yields another handle to the same value.
pub struct State<T: 'static> {
    inner: Rc<Inner<T>>,
}

struct Inner<T: 'static> {
    value: RefCell<T>,
    pending: RefCell<Vec<Update<T>>>,
    depth: Cell<usize>,
    watchers: WatcherManager<T>,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("value", &self.inner.value.borrow())
            .field("pending", &self.inner.pending.borrow().len())
            .field("watchers", &self.inner.watchers.len())
            .finish()
    }
}

impl<T: Default + 'static> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: 'static> State<T> {
    /// Creates a state holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                pending: RefCell::new(Vec::new()),
                depth: Cell::new(0),
                watchers: WatcherManager::new(),
            }),
        }
    }

    /// Borrows the committed value for the duration of `f`.
    ///
    /// # Panics
    ///
    /// Panics if `f` updates this state while outside a batch.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Returns `true` while a batch is open.
    #[must_use]
    pub fn is_batching(&self) -> bool {
        self.inner.depth.get() > 0
    }

    /// Number of updates waiting for the current batch to close.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.pending.borrow().len()
    }

    /// Number of registered watchers.
    #[must_use]
    pub fn watcher_count(&self) -> usize {
        self.inner.watchers.len()
    }

    /// Registers `watcher` for every committed value.
    pub fn watch(&self, watcher: impl Fn(Context<T>) + 'static) -> WatcherManagerGuard<T> {
        self.inner.watchers.register_as_guard(watcher)
    }
}

impl<T: Clone + 'static> State<T> {
    /// Returns a clone of the committed value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Replaces the value.
    pub fn set(&self, value: T) {
        self.set_with(value, Metadata::new());
    }

    /// Replaces the value, annotating the notification with `metadata`.
    pub fn set_with(&self, value: T, metadata: Metadata) {
        self.enqueue(Update::replace(value, metadata));
    }

    /// Computes the next value from the latest one.
    ///
    /// Inside a batch, `f` sees the result of every update queued before it.
    pub fn update(&self, f: impl FnOnce(&T) -> T + 'static) {
        self.update_with(f, Metadata::new());
    }

    /// Like [`update`](Self::update), annotating the notification with `metadata`.
    pub fn update_with(&self, f: impl FnOnce(&T) -> T + 'static, metadata: Metadata) {
        self.enqueue(Update::apply(f, metadata));
    }

    /// Runs `f` with updates to this state deferred until it returns.
    ///
    /// Batches nest. Queued updates are applied when the outermost one closes.
    pub fn batch<R>(&self, f: impl FnOnce() -> R) -> R {
        let result = {
            let _open = Open::new(&self.inner.depth);
            f()
        };
        if !self.is_batching() {
            self.flush();
        }
        result
    }

    fn enqueue(&self, update: Update<T>) {
        self.inner.pending.borrow_mut().push(update);
        if !self.is_batching() {
            self.flush();
        }
    }

    fn flush(&self) {
        loop {
            let updates = core::mem::take(&mut *self.inner.pending.borrow_mut());
            if updates.is_empty() {
                break;
            }

            let count = updates.len();
            let mut metadata = Metadata::new();
            let next = {
                // Updater closures that touch this state get queued for the next round.
                let _open = Open::new(&self.inner.depth);
                let mut current = self.get();
                for update in updates {
                    current = update.run(&current, &mut metadata);
                }
                current
            };

            *self.inner.value.borrow_mut() = next.clone();
            metadata.insert(Flushed { updates: count });
            // Write-backs from watchers wait until every watcher has seen `next`.
            let _open = Open::new(&self.inner.depth);
            self.inner.watchers.notify(&Context::new(next, metadata));
        }
    }
}

impl<T: Clone + 'static> Signal for State<T> {
    type Output = T;
    type Guard = WatcherManagerGuard<T>;

    fn get(&self) -> T {
        Self::get(self)
    }

    fn watch(&self, watcher: impl Fn(Context<T>) + 'static) -> Self::Guard {
        Self::watch(self, watcher)
    }
}

impl<T: Clone + 'static> Writable for State<T> {
    fn set(&self, value: T) {
        Self::set(self, value);
    }
}

/// Keeps a batch open while alive.
struct Open<'a>(&'a Cell<usize>);

impl Open<'_> {
    fn new(depth: &Cell<usize>) -> Open<'_> {
        depth.set(depth.get() + 1);
        Open(depth)
    }
}

impl Drop for Open<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}
