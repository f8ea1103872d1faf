//! # Controlled inputs
//!
//! A [`ControlledInput`] is a text field whose displayed text always comes
//! from a [`State<String>`]. Edits go into the state, and a render watcher
//! copies every committed value back into the view:
//!
//! ```text
//! view shows value -> user edits -> on_change -> state commits -> view re-renders
//! ```
//!
//! ```rust
//! use tether::{ControlledInput, Signal};
//!
//! let input = ControlledInput::new("");
//! input.on_change("Hi");
//!
//! assert_eq!(input.value(), "Hi");
//! assert_eq!(input.displayed(), input.value());
//! assert_eq!(input.label().get(), "Current Value: Hi");
//! ```

use alloc::{format, rc::Rc, string::String};
use core::cell::RefCell;

use crate::{
    Signal, SignalExt, State,
    watcher::{Context, WatcherManagerGuard},
};

/// A text input bound two ways to its own state.
#[derive(Debug)]
pub struct ControlledInput {
    value: State<String>,
    view: Rc<RefCell<String>>,
    _render: WatcherManagerGuard<String>,
}

impl ControlledInput {
    /// Creates an input showing `initial`.
    pub fn new(initial: impl Into<String>) -> Self {
        let initial = initial.into();
        let view = Rc::new(RefCell::new(initial.clone()));
        let value = State::new(initial);
        let render = {
            let view = Rc::clone(&view);
            value.watch(move |context: Context<String>| {
                *view.borrow_mut() = context.into_value();
            })
        };
        Self {
            value,
            view,
            _render: render,
        }
    }

    /// Handles an input event carrying the field's new text.
    pub fn on_change(&self, text: impl Into<String>) {
        self.value.set(text.into());
    }

    /// The stored value.
    #[must_use]
    pub fn value(&self) -> String {
        self.value.get()
    }

    /// The text currently rendered in the field.
    #[must_use]
    pub fn displayed(&self) -> String {
        self.view.borrow().clone()
    }

    /// The state behind this input. Writes to it re-render the field.
    #[must_use]
    pub const fn binding(&self) -> &State<String> {
        &self.value
    }

    /// Registers an extra render callback, called with every committed value.
    pub fn on_render(&self, render: impl Fn(&str) + 'static) -> WatcherManagerGuard<String> {
        self.value.watch(move |context| render(context.value()))
    }

    /// Text of the paragraph shown under the field.
    pub fn label(&self) -> impl Signal<Output = String> + use<> {
        self.value
            .clone()
            .map(|text: String| format!("Current Value: {text}"))
    }
}

impl Default for ControlledInput {
    fn default() -> Self {
        Self::new(String::new())
    }
}
