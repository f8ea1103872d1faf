//! Stream interop.
//!
//! [`Changes`] exposes the notifications of a [`Signal`] as a
//! [`futures_core::Stream`], so async consumers can follow a state without
//! registering callbacks themselves. The value held when the stream is
//! created is not replayed.
//!
//! [`Changes::new`] buffers every notification until it is polled, so a
//! stream nobody polls grows with each commit. [`Changes::latest`] keeps
//! only the newest value for consumers that just need to catch up.

use core::{
    pin::Pin,
    task::{Context as TaskContext, Poll},
};

use async_channel::{Receiver, Sender, bounded, unbounded};
use futures_core::Stream;
use pin_project_lite::pin_project;

use crate::Signal;

pin_project! {
    /// A stream of the values a signal is notified with.
    ///
    /// The underlying watcher stays registered until the stream is dropped.
    pub struct Changes<S>
    where
        S: Signal,
    {
        #[pin]
        receiver: Receiver<S::Output>,
        _guard: S::Guard,
    }
}

impl<S: Signal> Changes<S> {
    /// Starts listening to `signal`, buffering every value in notification
    /// order.
    ///
    /// The buffer is unbounded: poll the stream, or use
    /// [`latest`](Self::latest) if intermediate values do not matter.
    pub fn new(signal: &S) -> Self {
        let (sender, receiver) = unbounded();
        Self::forward(signal, sender, receiver, |sender, value| {
            sender.try_send(value).is_ok()
        })
    }

    /// Starts listening to `signal`, holding at most one value. A newer
    /// notification replaces one that has not been polled yet.
    pub fn latest(signal: &S) -> Self {
        let (sender, receiver) = bounded(1);
        Self::forward(signal, sender, receiver, |sender, value| {
            sender.force_send(value).is_ok()
        })
    }

    fn forward(
        signal: &S,
        sender: Sender<S::Output>,
        receiver: Receiver<S::Output>,
        send: fn(&Sender<S::Output>, S::Output) -> bool,
    ) -> Self {
        let guard = signal.watch(move |context| {
            // Only fails once the receiver, and with it the guard, is gone.
            if !send(&sender, context.into_value()) {
                log::trace!("dropped a change for a closed stream");
            }
        });
        Self {
            receiver,
            _guard: guard,
        }
    }

    /// Number of values buffered and not yet polled.
    pub fn buffered(&self) -> usize {
        self.receiver.len()
    }
}

impl<S: Signal> core::fmt::Debug for Changes<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Changes")
            .field("buffered", &self.receiver.len())
            .finish_non_exhaustive()
    }
}

impl<S: Signal> Stream for Changes<S> {
    type Item = S::Output;

    fn poll_next(self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Option<Self::Item>> {
        self.project().receiver.poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.receiver.len(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SignalExt, State};
    use core::{pin::pin, task::Waker};

    fn poll<S: Stream>(stream: Pin<&mut S>) -> Poll<Option<S::Item>> {
        let mut cx = TaskContext::from_waker(Waker::noop());
        stream.poll_next(&mut cx)
    }

    #[test]
    fn yields_committed_values_in_order() {
        let state = State::new(0);
        let mut changes = pin!(state.changes());

        assert_eq!(poll(changes.as_mut()), Poll::Pending);

        state.set(1);
        state.batch(|| {
            state.update(|n| n + 1);
            state.update(|n| n + 1);
        });

        assert_eq!(changes.buffered(), 2);
        assert_eq!(poll(changes.as_mut()), Poll::Ready(Some(1)));
        assert_eq!(poll(changes.as_mut()), Poll::Ready(Some(3)));
        assert_eq!(poll(changes.as_mut()), Poll::Pending);
    }

    #[test]
    fn latest_keeps_only_the_newest_value() {
        let state = State::new(0);
        let mut changes = pin!(Changes::latest(&state));

        state.set(1);
        state.set(2);
        state.set(3);

        assert_eq!(changes.buffered(), 1);
        assert_eq!(poll(changes.as_mut()), Poll::Ready(Some(3)));
        assert_eq!(poll(changes.as_mut()), Poll::Pending);

        state.set(4);
        assert_eq!(poll(changes.as_mut()), Poll::Ready(Some(4)));
    }

    #[test]
    fn dropping_stream_unregisters() {
        let state = State::new(0);
        let changes = state.changes();
        assert_eq!(state.watcher_count(), 1);
        drop(changes);
        assert_eq!(state.watcher_count(), 0);
    }
}
