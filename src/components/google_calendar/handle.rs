use crate::config::Config;
use crate::error::AgentResult;
use super::actor::GoogleCalendarActorHandle;
use super::models::CalendarEvent;
use super::time::TimeBound;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Handle for interacting with the Google Calendar actor
#[derive(Clone)]
pub struct GoogleCalendarHandle {
    actor_handle: GoogleCalendarActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl GoogleCalendarHandle {
    /// Create a new GoogleCalendarHandle and spawn the actor
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        use super::actor::GoogleCalendarActor;

        let (mut actor, handle) = GoogleCalendarActor::new(config);

        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// List events inside the window described by the given bounds
    pub async fn list_events(
        &self,
        time_min: TimeBound,
        time_max: TimeBound,
        max_items: Option<u32>,
    ) -> AgentResult<Vec<CalendarEvent>> {
        self.actor_handle
            .list_events(time_min, time_max, max_items)
            .await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AgentResult<()> {
        self.actor_handle.shutdown().await
    }
}
