//! Error types.

use alloc::string::String;

/// A change named a field the record was not initialized with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field `{field}` is not declared on this record")]
pub struct UnknownFieldError {
    field: String,
}

impl UnknownFieldError {
    /// Creates an error for `field`.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// The offending field name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }
}

/// Errors reported by tether.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// See [`UnknownFieldError`].
    #[error(transparent)]
    UnknownField(#[from] UnknownFieldError),
    /// The receiving end of an event queue has been dropped.
    #[error("event queue is closed")]
    Closed,
}

/// Shorthand for results using [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
