//! # Forms
//!
//! A [`Form`] synchronizes a set of controlled inputs with one [`Record`].
//! Inputs forward edits as [`ChangeEvent`]s; the form replaces its record
//! with a new snapshot and tells its watchers, which re-render.
//!
//! ```rust
//! use tether::{ChangeEvent, Form, Signal, Writable};
//!
//! let form = Form::new(["firstName", "lastName", "email"]);
//! form.handle_change(ChangeEvent::new("firstName", "Ada")).unwrap();
//!
//! let last_name = form.field("lastName").unwrap();
//! last_name.set("Lovelace".into());
//!
//! assert_eq!(form.value("firstName").as_deref(), Some("Ada"));
//! assert_eq!(form.summary().get(), "firstName: Ada lastName: Lovelace email: ");
//! assert!(form.handle_change(ChangeEvent::new("age", "36")).is_err());
//! ```

use alloc::{
    rc::Rc,
    string::{String, ToString},
};

use crate::{
    ChangeEvent, Record, Signal, SignalExt, State, UnknownFieldError, Writable,
    config::{Config, UnknownFieldPolicy},
    debug::Logged,
    watcher::{BoxWatcherGuard, Context, Metadata, WatcherManagerGuard},
};

/// Owns the record behind a group of controlled inputs.
#[derive(Debug)]
pub struct Form {
    state: State<Record>,
    logged: Logged<State<Record>>,
    config: Config,
}

impl Form {
    /// Creates a form whose record declares `fields`, all empty.
    pub fn new<I>(fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::with_config(fields, Config::default())
    }

    /// Like [`new`](Self::new), with explicit settings.
    pub fn with_config<I>(fields: I, config: Config) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let state = State::new(Record::initialize(fields));
        let logged = Logged::labelled(state.clone(), "form", config.trace_settings());
        Self {
            state,
            logged,
            config,
        }
    }

    /// The settings this form was built with.
    #[must_use]
    pub const fn config(&self) -> Config {
        self.config
    }

    /// The underlying state.
    #[must_use]
    pub const fn state(&self) -> &State<Record> {
        &self.state
    }

    /// The committed record.
    #[must_use]
    pub fn record(&self) -> Record {
        self.logged.get()
    }

    /// The committed value of `field`.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<String> {
        self.state
            .with(|record| record.get(field).map(ToString::to_string))
    }

    /// Applies one user edit.
    ///
    /// The change is a functional update, so several edits issued inside
    /// [`batch`](Self::batch) all land. Watchers find the event in the
    /// notification metadata.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownFieldError`] if the field is not declared and the
    /// form rejects unknown fields.
    pub fn handle_change(&self, event: ChangeEvent) -> Result<(), UnknownFieldError> {
        let policy = self.config.unknown_field_policy();
        let declared = self.state.with(|record| record.contains(event.field()));
        if !declared {
            match policy {
                UnknownFieldPolicy::Reject => {
                    log::warn!("rejected change to undeclared field `{}`", event.field());
                    return Err(UnknownFieldError::new(event.field()));
                }
                UnknownFieldPolicy::Ignore => {
                    log::debug!("ignored change to undeclared field `{}`", event.field());
                    return Ok(());
                }
                UnknownFieldPolicy::Insert => {
                    log::debug!("adding undeclared field `{}`", event.field());
                }
            }
        }

        let metadata = Metadata::new().with(event.clone());
        self.state.update_with(
            move |record| {
                record
                    .apply_change_with(&event, policy)
                    .unwrap_or_else(|_| record.clone())
            },
            metadata,
        );
        Ok(())
    }

    /// Shorthand for [`handle_change`](Self::handle_change).
    ///
    /// # Errors
    ///
    /// See [`handle_change`](Self::handle_change).
    pub fn change(
        &self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), UnknownFieldError> {
        self.handle_change(ChangeEvent::new(field, value))
    }

    /// A two-way binding to a single field.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownFieldError`] if `field` is not declared.
    pub fn field(&self, field: &str) -> Result<FieldBinding, UnknownFieldError> {
        if !self.state.with(|record| record.contains(field)) {
            return Err(UnknownFieldError::new(field));
        }
        Ok(FieldBinding {
            state: self.state.clone(),
            field: Rc::from(field),
        })
    }

    /// Runs `f` with every change deferred until it returns.
    pub fn batch<R>(&self, f: impl FnOnce() -> R) -> R {
        self.state.batch(f)
    }

    /// Registers a render callback for every committed record.
    pub fn watch(&self, render: impl Fn(Context<Record>) + 'static) -> BoxWatcherGuard {
        self.logged.watch(render)
    }

    /// The record rendered as `field: value` pairs.
    pub fn summary(&self) -> impl Signal<Output = String> + use<> {
        self.state.clone().map(|record: Record| record.to_string())
    }
}

/// A [`Form`] field seen as a standalone string binding.
///
/// Reading returns the field's committed value; setting it issues a
/// [`ChangeEvent`] for that field. Watchers are called on every commit of
/// the form, whichever field changed.
#[derive(Debug, Clone)]
pub struct FieldBinding {
    state: State<Record>,
    field: Rc<str>,
}

impl FieldBinding {
    /// The field this binding points at.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.field
    }
}

impl Signal for FieldBinding {
    type Output = String;
    type Guard = WatcherManagerGuard<Record>;

    fn get(&self) -> String {
        self.state
            .with(|record| record.get(&self.field).unwrap_or_default().to_string())
    }

    fn watch(&self, watcher: impl Fn(Context<String>) + 'static) -> Self::Guard {
        let field = Rc::clone(&self.field);
        self.state.watch(move |context| {
            watcher(context.map(|record| record.get(&field).unwrap_or_default().to_string()));
        })
    }
}

impl Writable for FieldBinding {
    fn set(&self, value: String) {
        let event = ChangeEvent::new(&*self.field, value);
        let metadata = Metadata::new().with(event.clone());
        // Fields are never removed, so the change always applies.
        self.state.update_with(
            move |record| record.apply_change(&event).unwrap_or_else(|_| record.clone()),
            metadata,
        );
    }
}
