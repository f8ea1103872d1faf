//! # Event dispatch
//!
//! Input controls rarely hold a reference to the form they feed. Instead
//! they get an [`EventSender`] and push [`ChangeEvent`]s into a queue; the
//! owning [`Dispatcher`] applies them one at a time, in the order they were
//! sent.
//!
//! ```rust
//! use tether::{Form, dispatch};
//!
//! let (sender, dispatcher) = dispatch::channel(Form::new(["firstName", "email"]));
//! sender.send(("firstName", "Ada")).unwrap();
//! sender.send(("nickname", "Countess")).unwrap();
//!
//! let drained = dispatcher.pump();
//! assert_eq!(drained.applied, 1);
//! assert_eq!(drained.rejected[0].field(), "nickname");
//! assert_eq!(dispatcher.form().value("firstName").as_deref(), Some("Ada"));
//! ```

use alloc::vec::Vec;

use async_channel::{Receiver, Sender, unbounded};

use crate::{ChangeEvent, Error, Form, Result, UnknownFieldError};

/// Creates a queue feeding `form`.
#[must_use]
pub fn channel(form: Form) -> (EventSender, Dispatcher) {
    let (sender, receiver) = unbounded();
    (EventSender { sender }, Dispatcher { form, receiver })
}

/// The input side of a dispatch queue. Clone it for every control.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: Sender<ChangeEvent>,
}

impl EventSender {
    /// Queues an event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] if the dispatcher has been dropped.
    pub fn send(&self, event: impl Into<ChangeEvent>) -> Result<()> {
        self.sender
            .try_send(event.into())
            .map_err(|_| Error::Closed)
    }

    /// Returns `true` if the dispatcher has been dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Applies queued events to its form.
#[derive(Debug)]
pub struct Dispatcher {
    form: Form,
    receiver: Receiver<ChangeEvent>,
}

/// What a drain of the queue did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Drained {
    /// Events applied to the form.
    pub applied: usize,
    /// Events the form refused, in queue order.
    pub rejected: Vec<UnknownFieldError>,
}

impl Drained {
    /// Returns `true` if nothing was rejected.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    fn record(&mut self, outcome: core::result::Result<(), UnknownFieldError>) {
        match outcome {
            Ok(()) => self.applied += 1,
            Err(err) => {
                log::debug!("dispatcher dropped an event: {err}");
                self.rejected.push(err);
            }
        }
    }
}

impl Dispatcher {
    /// The form events are applied to.
    #[must_use]
    pub const fn form(&self) -> &Form {
        &self.form
    }

    /// Number of events waiting in the queue.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Applies every queued event, one commit per event.
    pub fn pump(&self) -> Drained {
        let mut drained = Drained::default();
        while let Ok(event) = self.receiver.try_recv() {
            drained.record(self.form.handle_change(event));
        }
        drained
    }

    /// Applies every queued event in one batch, so watchers see one commit.
    pub fn pump_batched(&self) -> Drained {
        self.form.batch(|| self.pump())
    }

    /// Applies events as they arrive until every [`EventSender`] is dropped.
    pub async fn run(&self) -> Drained {
        let mut drained = Drained::default();
        while let Ok(event) = self.receiver.recv().await {
            drained.record(self.form.handle_change(event));
        }
        log::debug!("event queue closed after {} events", drained.applied);
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{rc::Rc, string::ToString};
    use core::{
        cell::Cell,
        pin::pin,
        task::{Context, Poll, Waker},
    };

    fn contact() -> Form {
        Form::new(["firstName", "lastName", "email"])
    }

    #[test]
    fn pump_applies_in_send_order() {
        let (sender, dispatcher) = channel(contact());
        sender.send(("email", "a@example.com")).unwrap();
        sender.send(("email", "ada@example.com")).unwrap();
        assert_eq!(dispatcher.pending(), 2);

        let drained = dispatcher.pump();
        assert!(drained.is_clean());
        assert_eq!(drained.applied, 2);
        assert_eq!(
            dispatcher.form().value("email").as_deref(),
            Some("ada@example.com")
        );
    }

    #[test]
    fn pump_batched_commits_once() {
        let (sender, dispatcher) = channel(contact());
        let commits = Rc::new(Cell::new(0));
        let _guard = {
            let commits = commits.clone();
            dispatcher.form().watch(move |_| commits.set(commits.get() + 1))
        };

        sender.send(("firstName", "Ada")).unwrap();
        sender.send(("lastName", "Lovelace")).unwrap();
        dispatcher.pump_batched();

        assert_eq!(commits.get(), 1);
        assert_eq!(
            dispatcher.form().record().to_string(),
            "firstName: Ada lastName: Lovelace email: "
        );
    }

    #[test]
    fn send_after_dispatcher_dropped_fails() {
        let (sender, dispatcher) = channel(contact());
        drop(dispatcher);
        assert!(sender.is_closed());
        assert_eq!(sender.send(("email", "x")), Err(Error::Closed));
    }

    #[test]
    fn run_finishes_when_senders_are_gone() {
        let (sender, dispatcher) = channel(contact());
        sender.send(("firstName", "Ada")).unwrap();
        sender.send(("phone", "555")).unwrap();

        let mut cx = Context::from_waker(Waker::noop());
        let mut run = pin!(dispatcher.run());
        assert!(run.as_mut().poll(&mut cx).is_pending());

        drop(sender);
        let Poll::Ready(drained) = run.as_mut().poll(&mut cx) else {
            panic!("queue should be closed");
        };
        assert_eq!(drained.applied, 1);
        assert_eq!(drained.rejected, [UnknownFieldError::new("phone")]);
    }
}
