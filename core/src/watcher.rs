//! # Watchers
//!
//! Registration, notification and cleanup of the callbacks that observe a
//! [`Signal`](crate::Signal). A watcher receives a [`Context`]: the new value
//! plus [`Metadata`] describing where the change came from.

use alloc::{boxed::Box, collections::BTreeMap, rc::Rc, vec::Vec};
use core::{
    any::{Any, TypeId, type_name},
    cell::RefCell,
    fmt::Debug,
    num::NonZeroUsize,
};

/// Typed annotations attached to a notification.
///
/// At most one value per type is stored. Later insertions of the same type
/// replace earlier ones.
#[derive(Debug, Default, Clone)]
pub struct Metadata(BTreeMap<TypeId, Rc<dyn Any>>);

impl Metadata {
    /// Creates an empty metadata set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value and returns the updated metadata.
    #[must_use]
    pub fn with<T: Clone + 'static>(mut self, value: T) -> Self {
        self.insert(value);
        self
    }

    /// Inserts a value, replacing any previous value of the same type.
    pub fn insert<T: Clone + 'static>(&mut self, value: T) {
        self.0.insert(TypeId::of::<T>(), Rc::new(value));
    }

    /// Returns a clone of the stored value of type `T`, if any.
    #[must_use]
    pub fn get<T: Clone + 'static>(&self) -> Option<T> {
        self.0
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
            .cloned()
    }

    /// Returns `true` if a value of type `T` is present.
    #[must_use]
    pub fn contains<T: 'static>(&self) -> bool {
        self.0.contains_key(&TypeId::of::<T>())
    }

    /// Moves every entry of `other` into `self`. Entries of `other` win on conflict.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Returns `true` if no annotation is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Reference-counted watcher callback.
pub type Watcher<T> = Rc<dyn Fn(Context<T>) + 'static>;

/// The payload handed to a watcher: a value and its metadata.
#[derive(Debug, Clone)]
pub struct Context<T> {
    value: T,
    metadata: Metadata,
}

impl<T> Context<T> {
    /// Creates a context from a value and metadata.
    pub const fn new(value: T, metadata: Metadata) -> Self {
        Self { value, metadata }
    }

    /// Adds an annotation to this context.
    #[must_use]
    pub fn with<V: Clone + 'static>(mut self, value: V) -> Self {
        self.metadata.insert(value);
        self
    }

    /// Returns a reference to the value.
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Consumes the context and returns the value.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Returns a reference to the metadata.
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Splits the context into its value and metadata.
    pub fn into_parts(self) -> (T, Metadata) {
        (self.value, self.metadata)
    }

    /// Transforms the value, keeping the metadata.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Context<U> {
        Context::new(f(self.value), self.metadata)
    }
}

impl<T> From<T> for Context<T> {
    fn from(value: T) -> Self {
        Self::new(value, Metadata::new())
    }
}

/// Keeps a watcher registered for as long as it is alive.
#[must_use]
pub trait WatcherGuard: 'static {}

impl WatcherGuard for () {}

impl<A: WatcherGuard, B: WatcherGuard> WatcherGuard for (A, B) {}

impl<T: WatcherGuard + ?Sized> WatcherGuard for Box<T> {}

impl<T: WatcherGuard + ?Sized> WatcherGuard for Rc<T> {}

/// Boxed, type-erased guard.
pub type BoxWatcherGuard = Box<dyn WatcherGuard>;

/// Runs a closure when dropped.
#[derive(Debug)]
pub struct OnDrop<F: FnOnce()>(Option<F>);

impl<F: FnOnce() + 'static> OnDrop<F> {
    /// Creates a new `OnDrop` that will call `f` when dropped.
    pub const fn new(f: F) -> Self {
        Self(Some(f))
    }

    /// Wraps `guard` so that `f` runs right after it is released.
    #[allow(clippy::needless_pass_by_value)]
    pub fn attach(guard: impl WatcherGuard, f: F) -> impl WatcherGuard {
        OnDrop::new(move || {
            drop(guard);
            f();
        })
    }
}

impl<F: FnOnce()> Drop for OnDrop<F> {
    fn drop(&mut self) {
        if let Some(f) = self.0.take() {
            f();
        }
    }
}

impl<F: FnOnce() + 'static> WatcherGuard for OnDrop<F> {}

/// Identifier handed out for each registration.
pub type WatcherId = NonZeroUsize;

/// The set of watchers observing one value.
///
/// Cloning shares the underlying set.
#[derive(Debug)]
pub struct WatcherManager<T> {
    inner: Rc<RefCell<WatcherSet<T>>>,
}

impl<T> Clone for WatcherManager<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for WatcherManager<T> {
    fn default() -> Self {
        Self {
            inner: Rc::default(),
        }
    }
}

impl<T: 'static> WatcherManager<T> {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no watcher is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().map.is_empty()
    }

    /// Returns the number of registered watchers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().map.len()
    }

    /// Registers a watcher and returns its identifier.
    pub fn register(&self, watcher: impl Fn(Context<T>) + 'static) -> WatcherId {
        self.inner.borrow_mut().insert(Rc::new(watcher))
    }

    /// Registers a watcher that is removed when the returned guard is dropped.
    pub fn register_as_guard(
        &self,
        watcher: impl Fn(Context<T>) + 'static,
    ) -> WatcherManagerGuard<T> {
        let id = self.register(watcher);
        WatcherManagerGuard {
            manager: self.clone(),
            id,
        }
    }

    /// Calls every registered watcher with a clone of `ctx`.
    ///
    /// The watcher list is snapshotted first, so watchers may register,
    /// cancel, or trigger further notifications while being called.
    pub fn notify(&self, ctx: &Context<T>)
    where
        T: Clone,
    {
        let watchers: Vec<Watcher<T>> = self.inner.borrow().map.values().cloned().collect();
        for watcher in watchers {
            watcher(ctx.clone());
        }
    }

    /// Removes a watcher. Unknown identifiers are ignored.
    pub fn cancel(&self, id: WatcherId) {
        self.inner.borrow_mut().map.remove(&id);
    }
}

/// Unregisters its watcher on drop.
#[must_use]
#[derive(Debug)]
pub struct WatcherManagerGuard<T: 'static> {
    manager: WatcherManager<T>,
    id: WatcherId,
}

impl<T> WatcherGuard for WatcherManagerGuard<T> {}

impl<T: 'static> Drop for WatcherManagerGuard<T> {
    fn drop(&mut self) {
        self.manager.cancel(self.id);
    }
}

struct WatcherSet<T> {
    next: WatcherId,
    map: BTreeMap<WatcherId, Watcher<T>>,
}

impl<T> Debug for WatcherSet<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("watchers", &self.map.len())
            .finish()
    }
}

impl<T> Default for WatcherSet<T> {
    fn default() -> Self {
        Self {
            next: WatcherId::MIN,
            map: BTreeMap::new(),
        }
    }
}

impl<T> WatcherSet<T> {
    fn insert(&mut self, watcher: Watcher<T>) -> WatcherId {
        let id = self.next;
        self.next = match id.checked_add(1) {
            Some(next) => next,
            None => panic!("watcher id overflowed `usize::MAX`"),
        };
        self.map.insert(id, watcher);
        id
    }
}
