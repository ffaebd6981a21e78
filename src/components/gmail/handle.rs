use crate::config::Config;
use crate::error::AgentResult;
use super::actor::GmailActorHandle;
use super::models::NormalizedEmail;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Handle for interacting with the Gmail actor
#[derive(Clone)]
pub struct GmailHandle {
    actor_handle: GmailActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl GmailHandle {
    /// Create a new GmailHandle and spawn the actor
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        use super::actor::GmailActor;

        let (mut actor, handle) = GmailActor::new(config);

        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// List the most recent messages, flattened for display
    pub async fn list_messages(&self, max_items: Option<u32>) -> AgentResult<Vec<NormalizedEmail>> {
        self.actor_handle.list_messages(max_items).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AgentResult<()> {
        self.actor_handle.shutdown().await
    }
}
