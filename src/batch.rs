//! Queued updates waiting for a batch to close.

use alloc::boxed::Box;
use core::fmt;

use crate::watcher::Metadata;

/// Attached to every notification sent by a [`State`](crate::State): how many
/// queued updates were folded into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flushed {
    /// Number of updates applied before this notification.
    pub updates: usize,
}

type Updater<T> = Box<dyn FnOnce(&T) -> T>;

pub(crate) enum Change<T> {
    /// A precomputed value. Whatever was committed before is discarded.
    Replace(T),
    /// A function of the latest value, including earlier updates in the same batch.
    Apply(Updater<T>),
}

pub(crate) struct Update<T> {
    change: Change<T>,
    metadata: Metadata,
}

impl<T> Update<T> {
    pub(crate) const fn replace(value: T, metadata: Metadata) -> Self {
        Self {
            change: Change::Replace(value),
            metadata,
        }
    }

    pub(crate) fn apply(f: impl FnOnce(&T) -> T + 'static, metadata: Metadata) -> Self {
        Self {
            change: Change::Apply(Box::new(f)),
            metadata,
        }
    }

    /// Produces the next value from `current`, moving this update's metadata into `metadata`.
    pub(crate) fn run(self, current: &T, metadata: &mut Metadata) -> T {
        metadata.extend(self.metadata);
        match self.change {
            Change::Replace(value) => value,
            Change::Apply(f) => f(current),
        }
    }
}

impl<T> fmt::Debug for Update<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.change {
            Change::Replace(_) => "Replace",
            Change::Apply(_) => "Apply",
        };
        f.debug_struct("Update")
            .field("change", &kind)
            .field("metadata", &self.metadata)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_sees_current_value() {
        let mut metadata = Metadata::new();
        let next = Update::apply(|v: &i32| v + 1, Metadata::new()).run(&41, &mut metadata);
        assert_eq!(next, 42);
    }

    #[test]
    fn replace_ignores_current_value_and_merges_metadata() {
        let mut metadata = Metadata::new().with("first");
        let next = Update::replace(1, Metadata::new().with("second")).run(&41, &mut metadata);
        assert_eq!(next, 1);
        assert_eq!(metadata.get::<&str>(), Some("second"));
    }
}
