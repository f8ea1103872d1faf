//! # Derived signals
//!
//! [`Map`] presents a transformed, read-only view of another signal. The
//! function runs on every read and on every notification of the source.
//!
//! ```rust
//! use tether::{State, Signal, SignalExt};
//!
//! let text = State::new(String::from("Hi"));
//! let label = text.clone().map(|text: String| format!("Current Value: {text}"));
//!
//! assert_eq!(label.get(), "Current Value: Hi");
//! text.set("Hello".into());
//! assert_eq!(label.get(), "Current Value: Hello");
//! ```

use core::marker::PhantomData;

use alloc::rc::Rc;

use crate::{Signal, watcher::Context};

/// A signal producing `f(source)`.
pub struct Map<S, F, Output> {
    source: S,
    f: Rc<F>,
    _marker: PhantomData<Output>,
}

impl<S: Signal, F, Output> Map<S, F, Output>
where
    F: Fn(S::Output) -> Output + 'static,
{
    /// Creates a derived signal over `source`.
    pub fn new(source: S, f: F) -> Self {
        Self {
            source,
            f: Rc::new(f),
            _marker: PhantomData,
        }
    }
}

impl<S: Clone, F, Output> Clone for Map<S, F, Output> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            f: Rc::clone(&self.f),
            _marker: PhantomData,
        }
    }
}

impl<S: core::fmt::Debug, F, Output> core::fmt::Debug for Map<S, F, Output> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Map")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl<S, F, Output> Signal for Map<S, F, Output>
where
    S: Signal,
    F: Fn(S::Output) -> Output + 'static,
    Output: 'static,
{
    type Output = Output;
    type Guard = S::Guard;

    fn get(&self) -> Output {
        (self.f)(self.source.get())
    }

    fn watch(&self, watcher: impl Fn(Context<Output>) + 'static) -> Self::Guard {
        let f = Rc::clone(&self.f);
        self.source
            .watch(move |context| watcher(context.map(|value| f(value))))
    }
}
