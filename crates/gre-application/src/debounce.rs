//! Trailing-edge debounce for user input.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;

/// Delivers the last value pushed once `delay` has passed without a newer one.
///
/// Values are delivered in order and a burst collapses into its final value.
/// Dropping the debouncer discards a pending value.
pub struct Debouncer<T> {
    sender: mpsc::UnboundedSender<T>,
    shutdown: CancellationToken,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawns the debounce task. Must be called inside a Tokio runtime.
    pub fn spawn<F>(delay: Duration, mut on_settled: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (sender, mut receiver) = mpsc::unbounded_channel::<T>();
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();

        tokio::spawn(async move {
            let mut pending: Option<T> = None;
            let timer = sleep(delay);
            tokio::pin!(timer);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    received = receiver.recv() => match received {
                        Some(value) => {
                            pending = Some(value);
                            timer.as_mut().reset(Instant::now() + delay);
                        }
                        None => break,
                    },
                    _ = &mut timer, if pending.is_some() => {
                        if let Some(value) = pending.take() {
                            on_settled(value);
                        }
                    }
                }
            }
            tracing::trace!("Debounce task finished");
        });

        Self { sender, shutdown }
    }

    /// Queues a value, restarting the quiet period.
    pub fn push(&self, value: T) {
        if self.sender.send(value).is_err() {
            tracing::debug!("Debounce task already stopped; value dropped");
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
