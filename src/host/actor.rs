//! Single-consumer store actor
//!
//! One blocking task owns the engine and drains a bounded queue. Calls
//! from any number of async tasks are applied strictly in queue order,
//! each caller awaiting its own oneshot reply. The task ends, handing the
//! engine back, once every `StoreHandle` has been dropped.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::record::{CallerId, RecordId, RecordView, ToggleOutcome};
use crate::store::{Mutation, MutationOutcome, RecordEngine, ToggleKind};

use super::errors::{HostError, HostResult};

/// Default queue depth for `StoreActor::spawn`
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

enum Command {
    Apply {
        mutation: Mutation,
        reply: oneshot::Sender<HostResult<MutationOutcome>>,
    },
    List {
        upper_bound: i64,
        reply: oneshot::Sender<Vec<RecordView>>,
    },
}

pub struct StoreActor<E> {
    engine: E,
    receiver: mpsc::Receiver<Command>,
}

impl<E> StoreActor<E>
where
    E: RecordEngine + Send + 'static,
    E::Error: Into<HostError>,
{
    /// Move `engine` onto its own blocking task.
    ///
    /// Journal appends fsync, so the engine runs on the blocking pool
    /// rather than an async worker.
    pub fn spawn(engine: E, capacity: usize) -> (StoreHandle, JoinHandle<E>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let actor = StoreActor { engine, receiver };
        let task = tokio::task::spawn_blocking(move || actor.run());
        (StoreHandle { sender }, task)
    }

    fn run(mut self) -> E {
        while let Some(command) = self.receiver.blocking_recv() {
            match command {
                Command::Apply { mutation, reply } => {
                    let result = self.engine.apply(mutation).map_err(Into::into);
                    // The caller may have stopped waiting; the call still happened
                    let _ = reply.send(result);
                }
                Command::List { upper_bound, reply } => {
                    let _ = reply.send(self.engine.list(upper_bound));
                }
            }
        }
        self.engine
    }
}

/// Cloneable async front for a `StoreActor`
#[derive(Debug, Clone)]
pub struct StoreHandle {
    sender: mpsc::Sender<Command>,
}

impl StoreHandle {
    pub async fn apply(&self, mutation: Mutation) -> HostResult<MutationOutcome> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(Command::Apply { mutation, reply })
            .await
            .map_err(|_| HostError::ActorClosed)?;
        response.await.map_err(|_| HostError::ActorClosed)?
    }

    pub async fn add_record(&self, caller: CallerId, text: impl Into<String>) -> HostResult<RecordId> {
        match self.apply(Mutation::Create { caller, text: text.into() }).await? {
            MutationOutcome::Created(id) => Ok(id),
            other => Err(HostError::MismatchedOutcome(other.kind_name(), "add_record")),
        }
    }

    pub async fn update_record(
        &self,
        caller: CallerId,
        id: RecordId,
        text: impl Into<String>,
    ) -> HostResult<()> {
        match self.apply(Mutation::Update { caller, id, text: text.into() }).await? {
            MutationOutcome::Updated => Ok(()),
            other => Err(HostError::MismatchedOutcome(other.kind_name(), "update_record")),
        }
    }

    pub async fn delete_record(&self, caller: CallerId, id: RecordId) -> HostResult<()> {
        match self.apply(Mutation::Delete { caller, id }).await? {
            MutationOutcome::Deleted => Ok(()),
            other => Err(HostError::MismatchedOutcome(other.kind_name(), "delete_record")),
        }
    }

    pub async fn toggle_like(&self, caller: CallerId, id: RecordId) -> HostResult<ToggleOutcome> {
        self.toggle(caller, id, ToggleKind::Like).await
    }

    pub async fn toggle_retweet(&self, caller: CallerId, id: RecordId) -> HostResult<ToggleOutcome> {
        self.toggle(caller, id, ToggleKind::Retweet).await
    }

    async fn toggle(&self, caller: CallerId, id: RecordId, kind: ToggleKind) -> HostResult<ToggleOutcome> {
        let mutation = Mutation::Toggle { caller, id, kind };
        let op = mutation.op_name();
        match self.apply(mutation).await? {
            MutationOutcome::Toggled(outcome) => Ok(outcome),
            other => Err(HostError::MismatchedOutcome(other.kind_name(), op)),
        }
    }

    pub async fn list_records(&self, upper_bound: i64) -> HostResult<Vec<RecordView>> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(Command::List { upper_bound, reply })
            .await
            .map_err(|_| HostError::ActorClosed)?;
        response.await.map_err(|_| HostError::ActorClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RecordStore;

    #[tokio::test]
    async fn test_calls_round_trip_through_actor() {
        let (handle, task) = StoreActor::spawn(RecordStore::default(), 8);

        let id = handle.add_record(CallerId::from("alice"), "hello").await.unwrap();
        assert_eq!(id, RecordId::new(0));
        assert_eq!(
            handle.toggle_like(CallerId::from("bob"), id).await.unwrap(),
            ToggleOutcome::Added
        );

        let err = handle
            .update_record(CallerId::from("bob"), id, "mine now")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "TWEET_PERMISSION_DENIED");

        let views = handle.list_records(-1).await.unwrap();
        assert_eq!(views[0].text, "hello");

        drop(handle);
        let store = task.await.unwrap();
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_actor_ends_when_handles_drop() {
        let (handle, task) = StoreActor::spawn(RecordStore::default(), 1);
        let other = handle.clone();
        drop(handle);
        other.add_record(CallerId::from("a"), "x").await.unwrap();
        drop(other);

        assert_eq!(task.await.unwrap().len(), 1);
    }
}
