use crate::{Signal, debug::Logged, map::Map, stream::Changes};

/// Combinators available on every [`Signal`].
pub trait SignalExt: Signal + Sized {
    /// Derives a read-only signal by applying `f` to every value.
    fn map<F, Output>(self, f: F) -> Map<Self, F, Output>
    where
        F: Fn(Self::Output) -> Output + 'static,
    {
        Map::new(self, f)
    }

    /// Logs the values committed to this signal under `label`.
    fn logged(self, label: &'static str) -> Logged<Self>
    where
        Self::Output: core::fmt::Debug,
    {
        Logged::labelled(self, label, crate::debug::Trace::changes())
    }

    /// Turns future notifications into a [`Stream`](futures_core::Stream).
    fn changes(&self) -> Changes<Self> {
        Changes::new(self)
    }
}

impl<S: Signal> SignalExt for S {}
