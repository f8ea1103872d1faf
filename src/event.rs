//! Change events emitted by input controls.

use alloc::string::String;

/// One user edit: `field` now holds `value`.
///
/// Forms attach the event to the [`Metadata`](crate::watcher::Metadata) of
/// the notification it causes, so watchers can tell which field moved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangeEvent {
    field: String,
    value: String,
}

impl ChangeEvent {
    /// Creates an event for `field`.
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// The name of the edited field.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The new value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Splits the event into `(field, value)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.field, self.value)
    }
}

impl<F: Into<String>, V: Into<String>> From<(F, V)> for ChangeEvent {
    fn from((field, value): (F, V)) -> Self {
        Self::new(field, value)
    }
}
