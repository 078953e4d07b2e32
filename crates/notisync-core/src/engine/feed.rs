//! Observer handles over the engine's broadcast channels.
//!
//! A [`Feed`] wraps a `tokio::sync::broadcast::Receiver`. Every feed sees
//! every value published after it was created; values published earlier are
//! never replayed.

use tokio::sync::broadcast;

/// Errors from receiving on a [`Feed`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    /// The observer fell behind and `n` values were dropped for it.
    #[error("lagged behind by {0} values")]
    Lagged(u64),
    /// Every sender is gone: the engine and every [`crate::SnapshotSink`]
    /// it handed out (a source may keep sinks alive past `close`).
    #[error("feed closed")]
    Closed,
}

/// One observer's view of a published stream.
#[derive(Debug)]
pub struct Feed<T> {
    receiver: broadcast::Receiver<T>,
}

impl<T: Clone> Feed<T> {
    pub(crate) const fn new(receiver: broadcast::Receiver<T>) -> Self {
        Self { receiver }
    }

    /// Wait for the next published value.
    ///
    /// After [`FeedError::Lagged`] the feed has skipped ahead, and the next
    /// call returns the oldest value still retained.
    pub async fn recv(&mut self) -> Result<T, FeedError> {
        self.receiver.recv().await.map_err(|error| match error {
            broadcast::error::RecvError::Lagged(n) => FeedError::Lagged(n),
            broadcast::error::RecvError::Closed => FeedError::Closed,
        })
    }

    /// Take the next value if one is already waiting.
    pub fn try_recv(&mut self) -> Option<Result<T, FeedError>> {
        match self.receiver.try_recv() {
            Ok(value) => Some(Ok(value)),
            Err(broadcast::error::TryRecvError::Empty) => None,
            Err(broadcast::error::TryRecvError::Lagged(n)) => Some(Err(FeedError::Lagged(n))),
            Err(broadcast::error::TryRecvError::Closed) => Some(Err(FeedError::Closed)),
        }
    }

    /// Drain every value currently waiting, skipping over lag gaps.
    pub fn drain(&mut self) -> Vec<T> {
        let mut values = Vec::new();
        while let Some(result) = self.try_recv() {
            match result {
                Ok(value) => values.push(value),
                Err(FeedError::Lagged(_)) => {}
                Err(FeedError::Closed) => break,
            }
        }
        values
    }
}
