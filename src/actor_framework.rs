use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Payloads, and Actions)
// =============================================================================

/// Trait that any record owned by the collaborator must implement to be
/// served by a [`ResourceActor`].
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Ord + Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    /// Name used in logs and error messages.
    const KIND: &'static str;

    fn id(&self) -> &Self::Id;

    /// Construct the full record from the assigned id and the payload.
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, String>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), String> {
        Ok(())
    }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), String>;
    fn on_delete(&self) -> Result<(), String> {
        Ok(())
    }

    /// Handle a domain-specific action. A returned error must leave the
    /// record unchanged.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, String>;
}

/// Failures of the actor plumbing or rejections raised by an entity hook.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped the response")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, ResourceClient::new(sender))
    }

    /// Serves requests until every client has been dropped.
    #[tracing::instrument(name = "resource_actor", fields(kind = T::KIND), skip(self))]
    pub async fn run(mut self) {
        info!("Actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { payload, respond_to } => {
                    let _ = respond_to.send(self.handle_create(payload));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let _ = respond_to.send(self.handle_action(id, action));
                }
            }
        }
        info!(rows = self.store.len(), "Actor stopped");
    }

    fn handle_create(&mut self, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create(id.clone(), payload).map_err(FrameworkError::Rejected)?;
        item.on_create().map_err(FrameworkError::Rejected)?;
        self.store.insert(id.clone(), item.clone());
        debug!(%id, "Created");
        Ok(item)
    }

    fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        let item = self.store.get_mut(&id).ok_or_else(|| not_found::<T>(&id))?;
        // Hooks work on a copy so a rejected patch cannot leave a half-applied row.
        let mut updated = item.clone();
        updated.on_update(patch).map_err(FrameworkError::Rejected)?;
        *item = updated.clone();
        Ok(updated)
    }

    fn handle_delete(&mut self, id: T::Id) -> Result<(), FrameworkError> {
        let item = self.store.get(&id).ok_or_else(|| not_found::<T>(&id))?;
        item.on_delete().map_err(FrameworkError::Rejected)?;
        self.store.remove(&id);
        debug!(%id, "Deleted");
        Ok(())
    }

    fn handle_action(&mut self, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        let item = self.store.get_mut(&id).ok_or_else(|| not_found::<T>(&id))?;
        let mut working = item.clone();
        match working.handle_action(action) {
            Ok(result) => {
                *item = working;
                Ok(result)
            }
            Err(reason) => {
                warn!(%id, %reason, "Action rejected");
                Err(FrameworkError::Rejected(reason))
            }
        }
    }
}

fn not_found<T: Entity>(id: &T::Id) -> FrameworkError {
    FrameworkError::NotFound(format!("{} {}", T::KIND, id))
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { payload, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to })
            .await
    }
}

/// Strictly increasing id generator starting at 1.
pub fn sequential_ids() -> impl Fn() -> u64 + Send + Sync + 'static {
    let counter = std::sync::atomic::AtomicU64::new(1);
    move || counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Counter {
        id: u64,
        label: String,
        value: i64,
    }

    #[derive(Debug)]
    struct CounterCreate {
        label: String,
    }

    #[derive(Debug)]
    struct CounterPatch {
        label: Option<String>,
    }

    #[derive(Debug)]
    enum CounterAction {
        Add(i64),
    }

    impl Entity for Counter {
        type Id = u64;
        type CreatePayload = CounterCreate;
        type Patch = CounterPatch;
        type Action = CounterAction;
        type ActionResult = i64;

        const KIND: &'static str = "counter";

        fn id(&self) -> &u64 {
            &self.id
        }

        fn from_create(id: u64, payload: CounterCreate) -> Result<Self, String> {
            if payload.label.is_empty() {
                return Err("label required".to_string());
            }
            Ok(Self { id, label: payload.label, value: 0 })
        }

        fn on_update(&mut self, patch: CounterPatch) -> Result<(), String> {
            if let Some(label) = patch.label {
                self.label = label;
            }
            Ok(())
        }

        fn handle_action(&mut self, action: CounterAction) -> Result<i64, String> {
            match action {
                CounterAction::Add(n) => {
                    self.value += n;
                    if self.value < 0 {
                        return Err("counter cannot go negative".to_string());
                    }
                    Ok(self.value)
                }
            }
        }
    }

    #[tokio::test]
    async fn test_resource_actor_crud_and_actions() {
        let (actor, client) = ResourceActor::<Counter>::new(10, sequential_ids());
        tokio::spawn(actor.run());

        let first = client.create(CounterCreate { label: "a".into() }).await.unwrap();
        let second = client.create(CounterCreate { label: "b".into() }).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        assert_eq!(client.perform_action(1, CounterAction::Add(5)).await.unwrap(), 5);

        let renamed = client
            .update(1, CounterPatch { label: Some("renamed".into()) })
            .await
            .unwrap();
        assert_eq!(renamed.label, "renamed");
        assert_eq!(renamed.value, 5);

        let ids: Vec<u64> = client.list().await.unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);

        client.delete(2).await.unwrap();
        assert_eq!(client.get(2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejected_action_leaves_row_untouched() {
        let (actor, client) = ResourceActor::<Counter>::new(10, sequential_ids());
        tokio::spawn(actor.run());

        client.create(CounterCreate { label: "a".into() }).await.unwrap();
        client.perform_action(1, CounterAction::Add(3)).await.unwrap();

        let err = client.perform_action(1, CounterAction::Add(-10)).await.unwrap_err();
        assert!(matches!(err, FrameworkError::Rejected(_)));
        assert_eq!(client.get(1).await.unwrap().unwrap().value, 3);
    }

    #[tokio::test]
    async fn test_missing_rows_and_rejected_payloads() {
        let (actor, client) = ResourceActor::<Counter>::new(10, sequential_ids());
        tokio::spawn(actor.run());

        assert_eq!(
            client.delete(42).await,
            Err(FrameworkError::NotFound("counter 42".to_string()))
        );
        let err = client.create(CounterCreate { label: String::new() }).await.unwrap_err();
        assert_eq!(err, FrameworkError::Rejected("label required".to_string()));
    }
}
