//! # Configuration
//!
//! A [`Config`] is a small `Copy` value assembled from `const` builders:
//!
//! ```rust
//! use tether::config::{Config, UnknownFieldPolicy};
//! use tether::debug::Trace;
//!
//! const LENIENT: Config = Config::new()
//!     .unknown_fields(UnknownFieldPolicy::Insert)
//!     .trace(Trace::verbose());
//!
//! assert_eq!(LENIENT.unknown_field_policy(), UnknownFieldPolicy::Insert);
//! ```

pub use crate::debug::Trace;

/// What a record does with a change to a field it was not initialized with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UnknownFieldPolicy {
    /// Fail with [`UnknownFieldError`](crate::UnknownFieldError).
    #[default]
    Reject,
    /// Drop the change and keep the record as it is.
    Ignore,
    /// Append the field to the record.
    Insert,
}

/// Settings for a [`Form`](crate::form::Form).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    unknown_fields: UnknownFieldPolicy,
    trace: Trace,
}

impl Config {
    /// Rejects unknown fields and logs committed records.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::Reject,
            trace: Trace::changes(),
        }
    }

    /// Sets the unknown-field policy.
    #[must_use]
    pub const fn unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_fields = policy;
        self
    }

    /// Sets which diagnostic events are logged.
    #[must_use]
    pub const fn trace(mut self, trace: Trace) -> Self {
        self.trace = trace;
        self
    }

    /// The configured unknown-field policy.
    #[must_use]
    pub const fn unknown_field_policy(&self) -> UnknownFieldPolicy {
        self.unknown_fields
    }

    /// The configured trace settings.
    #[must_use]
    pub const fn trace_settings(&self) -> Trace {
        self.trace
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
