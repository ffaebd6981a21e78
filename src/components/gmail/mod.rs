mod actor;
mod handle;
pub mod models;
pub mod payload;

pub use handle::GmailHandle;
pub use models::NormalizedEmail;
pub use payload::normalize_message;

use crate::config::Config;
use crate::error::AgentResult;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Gmail component of the assistant backend
#[derive(Default)]
pub struct Gmail {
    handle: RwLock<Option<GmailHandle>>,
}

impl Gmail {
    /// Create a new Gmail component
    pub fn new() -> Self {
        Self {
            handle: RwLock::new(None),
        }
    }

    /// Get the handle if it exists
    pub async fn get_handle(&self) -> Option<GmailHandle> {
        let handle_lock = self.handle.read().await;
        handle_lock.clone()
    }
}

#[async_trait]
impl super::Component for Gmail {
    fn name(&self) -> &'static str {
        "gmail"
    }

    async fn init(&self, config: Arc<RwLock<Config>>) -> AgentResult<()> {
        // Create a new handle if one doesn't exist
        let mut handle_lock = self.handle.write().await;
        if handle_lock.is_none() {
            *handle_lock = Some(GmailHandle::new(config));
        }

        Ok(())
    }

    async fn shutdown(&self) -> AgentResult<()> {
        let handle_lock = self.handle.read().await;
        if let Some(handle) = &*handle_lock {
            handle.shutdown().await?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
