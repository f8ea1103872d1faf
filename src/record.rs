//! # Records
//!
//! A [`Record`] is an immutable snapshot of a form: field names mapped to
//! string values. Its key set is fixed when it is initialized; applying a
//! [`ChangeEvent`] produces a new snapshot and leaves the old one alone.
//!
//! ```rust
//! use tether::{ChangeEvent, Record};
//!
//! let empty = Record::initialize(["firstName", "lastName", "email"]);
//! let edited = empty.apply_change(&ChangeEvent::new("firstName", "Ada")).unwrap();
//!
//! assert_eq!(edited.get("firstName"), Some("Ada"));
//! assert_eq!(edited.get("lastName"), Some(""));
//! assert_eq!(empty.get("firstName"), Some(""));
//! assert!(empty.apply_change(&ChangeEvent::new("age", "36")).is_err());
//! ```

use alloc::{
    rc::Rc,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

use crate::{ChangeEvent, UnknownFieldError, config::UnknownFieldPolicy};

/// Field names mapped to values, in declaration order.
///
/// Cloning is cheap: snapshots share their storage until one of them is changed.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Record {
    entries: Rc<Vec<(String, String)>>,
}

impl Record {
    /// Creates a record with every field in `fields` set to an empty string.
    ///
    /// Repeated names are kept once, at their first position.
    pub fn initialize<I>(fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut entries: Vec<(String, String)> = Vec::new();
        for field in fields {
            let field = field.into();
            if !entries.iter().any(|(name, _)| *name == field) {
                entries.push((field, String::new()));
            }
        }
        Self {
            entries: Rc::new(entries),
        }
    }

    /// Returns the value of `field`, or `None` if it was never declared.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.position(field).map(|index| self.entries[index].1.as_str())
    }

    /// Returns `true` if `field` is one of this record's keys.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.position(field).is_some()
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Field names in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(field, _)| field.as_str())
    }

    /// `(field, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    /// Returns a copy of this record with `event.field()` set to `event.value()`.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownFieldError`] if the field was not declared.
    pub fn apply_change(&self, event: &ChangeEvent) -> Result<Self, UnknownFieldError> {
        self.apply_change_with(event, UnknownFieldPolicy::Reject)
    }

    /// Like [`apply_change`](Self::apply_change), handling undeclared fields per `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownFieldError`] for an undeclared field under
    /// [`UnknownFieldPolicy::Reject`].
    pub fn apply_change_with(
        &self,
        event: &ChangeEvent,
        policy: UnknownFieldPolicy,
    ) -> Result<Self, UnknownFieldError> {
        let index = match (self.position(event.field()), policy) {
            (Some(index), _) => Some(index),
            (None, UnknownFieldPolicy::Reject) => {
                return Err(UnknownFieldError::new(event.field()));
            }
            (None, UnknownFieldPolicy::Ignore) => return Ok(self.clone()),
            (None, UnknownFieldPolicy::Insert) => None,
        };

        let mut entries = Vec::clone(&self.entries);
        match index {
            Some(index) => entries[index].1 = event.value().to_string(),
            None => entries.push((event.field().to_string(), event.value().to_string())),
        }
        Ok(Self {
            entries: Rc::new(entries),
        })
    }

    fn position(&self, field: &str) -> Option<usize> {
        self.entries.iter().position(|(name, _)| name == field)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders `field: value` pairs separated by spaces, in declaration order.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (field, value)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{field}: {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{format, vec};

    fn contact() -> Record {
        Record::initialize(["firstName", "lastName", "email"])
    }

    #[test]
    fn initialize_sets_every_field_empty() {
        let record = contact();
        assert_eq!(record.len(), 3);
        assert!(record.iter().all(|(_, value)| value.is_empty()));
        assert_eq!(
            record.fields().collect::<Vec<_>>(),
            vec!["firstName", "lastName", "email"]
        );
    }

    #[test]
    fn initialize_collapses_duplicates() {
        let record = Record::initialize(["a", "b", "a"]);
        assert_eq!(record.fields().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn change_touches_only_its_field() {
        let before = contact()
            .apply_change(&ChangeEvent::new("email", "ada@example.com"))
            .unwrap();
        let after = before
            .apply_change(&ChangeEvent::new("firstName", "Ada"))
            .unwrap();

        assert_eq!(after.get("firstName"), Some("Ada"));
        for field in ["lastName", "email"] {
            assert_eq!(after.get(field), before.get(field));
        }
    }

    #[test]
    fn applying_same_change_twice_settles() {
        let event = ChangeEvent::new("lastName", "Lovelace");
        let once = contact().apply_change(&event).unwrap();
        let twice = once.apply_change(&event).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn snapshots_are_independent() {
        let original = contact();
        let _edited = original
            .apply_change(&ChangeEvent::new("firstName", "Ada"))
            .unwrap();
        assert_eq!(original, contact());
    }

    #[test]
    fn unknown_field_policies() {
        let event = ChangeEvent::new("phone", "555");
        let record = contact();

        let err = record.apply_change(&event).unwrap_err();
        assert_eq!(err.field(), "phone");

        let ignored = record
            .apply_change_with(&event, UnknownFieldPolicy::Ignore)
            .unwrap();
        assert_eq!(ignored, record);

        let inserted = record
            .apply_change_with(&event, UnknownFieldPolicy::Insert)
            .unwrap();
        assert_eq!(inserted.len(), 4);
        assert_eq!(inserted.fields().last(), Some("phone"));
        assert_eq!(inserted.get("phone"), Some("555"));
    }

    #[test]
    fn formats_in_declaration_order() {
        let record = contact()
            .apply_change(&ChangeEvent::new("firstName", "Ada"))
            .unwrap();
        assert_eq!(
            format!("{record}"),
            "firstName: Ada lastName:  email: "
        );
        assert_eq!(
            format!("{record:?}"),
            r#"{"firstName": "Ada", "lastName": "", "email": ""}"#
        );
    }
}
