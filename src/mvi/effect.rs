//! Effects: asynchronous work returned by reducers.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use super::action::Action;
use super::store::{Envelope, PendingCount, PendingGuard, StoreError};
use crate::storage::StorageError;

/// Why an effect stopped before finishing its work.
#[derive(Debug, Error)]
pub enum EffectError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub(crate) type EffectFuture = Pin<Box<dyn Future<Output = Result<(), EffectError>> + Send>>;
pub(crate) type EffectWork<A> = Box<dyn FnOnce(Sender<A>) -> EffectFuture + Send>;

/// Work a reducer asks the store to perform after a state transition.
pub enum Effect<A: Action> {
    /// Nothing to do.
    None,
    /// Run an async task that may emit follow-up actions through a [`Sender`].
    Run(EffectWork<A>),
}

impl<A: Action> Effect<A> {
    pub fn none() -> Self {
        Self::None
    }

    /// Wrap an async closure as an effect.
    ///
    /// The closure receives a [`Sender`] for follow-up actions. Returning an
    /// error aborts the rest of the effect; the store records the failure
    /// but emits no action for it.
    pub fn run<F, Fut>(work: F) -> Self
    where
        F: FnOnce(Sender<A>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), EffectError>> + Send + 'static,
    {
        Self::Run(Box::new(move |sender| Box::pin(work(sender))))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl<A: Action> fmt::Debug for Effect<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "Effect::None"),
            Self::Run(_) => write!(f, "Effect::Run(..)"),
        }
    }
}

/// Handle an effect uses to feed follow-up actions back into its store.
pub struct Sender<A> {
    queue: mpsc::Sender<Envelope<A>>,
    pending: PendingCount,
}

impl<A: Action> Sender<A> {
    pub(crate) fn new(queue: mpsc::Sender<Envelope<A>>, pending: PendingCount) -> Self {
        Self { queue, pending }
    }

    /// Enqueue a follow-up action and wait until the store has reduced it.
    pub async fn send(&self, action: A) -> Result<(), StoreError> {
        let (reply, applied) = oneshot::channel();
        let queued = PendingGuard::enter(self.pending.clone());
        self.queue
            .send(Envelope { action, reply })
            .await
            .map_err(|_| StoreError::Closed)?;
        queued.disarm();
        applied.await.map(|_task| ()).map_err(|_| StoreError::Closed)
    }
}
