//! Single-consumer store that runs a reducer over a queue of actions.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use super::effect::{Effect, EffectWork, Sender};
use super::reducer::Reducer;

const ACTION_BUFFER: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store is closed")]
    Closed,
}

/// Observable record of effects that aborted.
///
/// Failed effects emit no action and leave state untouched; this is the
/// only place their failure shows up besides the log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectReport {
    pub failed_effects: u64,
    pub last_failure: Option<String>,
}

impl EffectReport {
    pub fn is_clean(&self) -> bool {
        self.failed_effects == 0
    }
}

pub(crate) struct Envelope<A> {
    pub(crate) action: A,
    pub(crate) reply: oneshot::Sender<StoreTask>,
}

/// Number of queued actions plus running effects.
#[derive(Clone)]
pub(crate) struct PendingCount {
    inner: Arc<watch::Sender<usize>>,
}

impl PendingCount {
    fn new() -> Self {
        Self {
            inner: Arc::new(watch::channel(0).0),
        }
    }

    pub(crate) fn enter(&self) {
        self.inner.send_modify(|count| *count += 1);
    }

    pub(crate) fn leave(&self) {
        self.inner.send_modify(|count| *count = count.saturating_sub(1));
    }

    async fn wait_idle(&self) {
        let mut receiver = self.inner.subscribe();
        // Err only when the sender is gone, and we hold it.
        let _ = receiver.wait_for(|count| *count == 0).await;
    }
}

/// Holds one unit of the pending count and gives it back on drop, so a
/// cancelled send or a panicking effect cannot leave `settle` waiting.
pub(crate) struct PendingGuard {
    count: PendingCount,
    armed: bool,
}

impl PendingGuard {
    pub(crate) fn enter(count: PendingCount) -> Self {
        count.enter();
        Self { count, armed: true }
    }

    /// Keep the unit held; whoever dequeues the action releases it.
    pub(crate) fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if self.armed {
            self.count.leave();
        }
    }
}

/// Handle to the effect started by one action.
#[derive(Debug)]
pub struct StoreTask {
    handle: Option<JoinHandle<()>>,
}

impl StoreTask {
    fn done() -> Self {
        Self { handle: None }
    }

    /// True when the action produced no effect or its effect has ended.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the effect (and every follow-up it sent) to complete.
    pub async fn finish(self) {
        if let Some(handle) = self.handle {
            if let Err(err) = handle.await {
                tracing::warn!(error = %err, "effect task did not complete");
            }
        }
    }
}

/// Owns feature state and applies actions one at a time.
///
/// Actions sent through [`Store::send`] or by effects share one queue and are
/// reduced in arrival order by a single consumer task. Effects run as
/// separate tokio tasks, so the store keeps reducing while they are
/// suspended on storage calls.
///
/// Must be created from within a tokio runtime.
pub struct Store<R: Reducer> {
    queue: mpsc::Sender<Envelope<R::Action>>,
    state: watch::Receiver<R::State>,
    reports: watch::Receiver<EffectReport>,
    pending: PendingCount,
}

impl<R> Store<R>
where
    R: Reducer + Send + 'static,
{
    pub fn new(initial_state: R::State, reducer: R) -> Self {
        let (queue, receiver) = mpsc::channel(ACTION_BUFFER);
        let (state_tx, state) = watch::channel(initial_state);
        let (reports_tx, reports) = watch::channel(EffectReport::default());
        let pending = PendingCount::new();

        let consumer = Consumer {
            receiver,
            queue: queue.downgrade(),
            reducer,
            state: state_tx,
            reports: Arc::new(reports_tx),
            pending: pending.clone(),
        };
        tokio::spawn(consumer.run());

        Self {
            queue,
            state,
            reports,
            pending,
        }
    }

    /// Enqueue a root action. Resolves once the action has been reduced.
    ///
    /// The returned task tracks the action's effect, if any.
    pub async fn send(&self, action: R::Action) -> Result<StoreTask, StoreError> {
        let (reply, reduced) = oneshot::channel();
        let queued = PendingGuard::enter(self.pending.clone());
        self.queue
            .send(Envelope { action, reply })
            .await
            .map_err(|_| StoreError::Closed)?;
        queued.disarm();
        reduced.await.map_err(|_| StoreError::Closed)
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> R::State {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<R::State> {
        self.state.clone()
    }

    pub fn report(&self) -> EffectReport {
        self.reports.borrow().clone()
    }

    pub fn reports(&self) -> watch::Receiver<EffectReport> {
        self.reports.clone()
    }

    /// Wait until no action is queued and no effect is running.
    pub async fn settle(&self) {
        self.pending.wait_idle().await;
    }
}

struct Consumer<R: Reducer> {
    receiver: mpsc::Receiver<Envelope<R::Action>>,
    queue: mpsc::WeakSender<Envelope<R::Action>>,
    reducer: R,
    state: watch::Sender<R::State>,
    reports: Arc<watch::Sender<EffectReport>>,
    pending: PendingCount,
}

impl<R> Consumer<R>
where
    R: Reducer + Send + 'static,
{
    async fn run(mut self) {
        tracing::debug!("store consumer started");
        while let Some(Envelope { action, reply }) = self.receiver.recv().await {
            let current = self.state.borrow().clone();
            let (next, effect) = self.reducer.reduce(current, action);
            self.state.send_if_modified(|state| {
                if *state == next {
                    return false;
                }
                *state = next;
                true
            });

            let task = match effect {
                Effect::None => StoreTask::done(),
                Effect::Run(work) => self.spawn_effect(work),
            };
            if reply.send(task).is_err() {
                tracing::trace!("store: reduce acknowledgement dropped (sender gone)");
            }
            self.pending.leave();
        }
        tracing::debug!("store consumer stopped");
    }

    fn spawn_effect(&self, work: EffectWork<R::Action>) -> StoreTask {
        let Some(queue) = self.queue.upgrade() else {
            tracing::debug!("store closed, effect skipped");
            return StoreTask::done();
        };

        let guard = PendingGuard::enter(self.pending.clone());
        let sender = Sender::new(queue, self.pending.clone());
        let reports = Arc::clone(&self.reports);

        let handle = tokio::spawn(async move {
            let _guard = guard;
            if let Err(err) = work(sender).await {
                tracing::warn!(error = %err, "effect aborted, remaining work dropped");
                reports.send_modify(|report| {
                    report.failed_effects += 1;
                    report.last_failure = Some(err.to_string());
                });
            }
        });

        StoreTask {
            handle: Some(handle),
        }
    }
}
