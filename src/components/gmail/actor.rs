use crate::components::token::{access_token, TokenManager};
use crate::config::Config;
use crate::error::{gmail_error, AgentResult};
use super::models::{NormalizedEmail, RawMessage};
use super::payload::normalize_message;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info};
use url::Url;

const GMAIL_MESSAGES_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages";

/// The Gmail actor that processes messages
pub struct GmailActor {
    config: Arc<RwLock<Config>>,
    token_manager: TokenManager,
    client: Client,
    command_rx: mpsc::Receiver<GmailCommand>,
}

/// Commands that can be sent to the Gmail actor
pub enum GmailCommand {
    ListMessages {
        max_items: Option<u32>,
        respond_to: mpsc::Sender<AgentResult<Vec<NormalizedEmail>>>,
    },
    Shutdown,
}

/// Handle for communicating with the Gmail actor
#[derive(Clone)]
pub struct GmailActorHandle {
    command_tx: mpsc::Sender<GmailCommand>,
}

impl GmailActorHandle {
    /// List the most recent messages, flattened for display
    pub async fn list_messages(&self, max_items: Option<u32>) -> AgentResult<Vec<NormalizedEmail>> {
        let (respond_to, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(GmailCommand::ListMessages {
                max_items,
                respond_to,
            })
            .await
            .map_err(|e| gmail_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| gmail_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AgentResult<()> {
        let _ = self.command_tx.send(GmailCommand::Shutdown).await;
        Ok(())
    }
}

impl GmailActor {
    /// Create a new actor and return its handle
    pub fn new(config: Arc<RwLock<Config>>) -> (Self, GmailActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            config: Arc::clone(&config),
            token_manager: TokenManager::new(config),
            client: Client::new(),
            command_rx,
        };

        let handle = GmailActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Gmail actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                GmailCommand::ListMessages {
                    max_items,
                    respond_to,
                } => {
                    let result = Self::list_messages(
                        Arc::clone(&self.config),
                        self.token_manager.clone(),
                        self.client.clone(),
                        max_items,
                    )
                    .await;
                    let _ = respond_to.send(result).await;
                }
                GmailCommand::Shutdown => {
                    info!("Gmail actor shutting down");
                    break;
                }
            }
        }

        info!("Gmail actor shut down");
    }

    /// Fetch the most recent message ids, then each full message, and
    /// flatten every payload. Normalization failures abort the listing so
    /// the caller never sees a partially normalized batch.
    async fn list_messages(
        config: Arc<RwLock<Config>>,
        token_manager: TokenManager,
        client: Client,
        max_items: Option<u32>,
    ) -> AgentResult<Vec<NormalizedEmail>> {
        let default_max = {
            let config_read = config.read().await;
            config_read.max_email_results
        };

        let token = token_manager.get_token().await?;
        let access_token = access_token(&token)?.to_string();

        let mut url = Url::parse(GMAIL_MESSAGES_URL)
            .map_err(|e| gmail_error(&format!("Failed to parse URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("maxResults", &max_items.unwrap_or(default_max).to_string());

        let listing: serde_json::Value = Self::get_json(&client, url, &access_token).await?;

        let ids: Vec<String> = listing
            .get("messages")
            .and_then(|m| m.as_array())
            .map(|messages| {
                messages
                    .iter()
                    .filter_map(|m| m.get("id").and_then(|id| id.as_str()))
                    .map(|id| id.to_string())
                    .collect()
            })
            .unwrap_or_default();

        debug!("Fetching {} messages", ids.len());

        let mut normalized = Vec::with_capacity(ids.len());
        for id in ids {
            let message_url = Url::parse(&format!("{}/{}", GMAIL_MESSAGES_URL, id))
                .map_err(|e| gmail_error(&format!("Failed to parse URL: {}", e)))?;
            let raw: RawMessage = serde_json::from_value(
                Self::get_json(&client, message_url, &access_token).await?,
            )
            .map_err(|e| gmail_error(&format!("Unexpected message shape: {}", e)))?;

            normalized.push(normalize_message(&raw)?);
        }

        Ok(normalized)
    }

    async fn get_json(
        client: &Client,
        url: Url,
        access_token: &str,
    ) -> AgentResult<serde_json::Value> {
        let response = client
            .get(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(|e| gmail_error(&format!("Failed to fetch messages: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(gmail_error(&format!(
                "Failed to fetch messages: HTTP {} - {}",
                status, error_body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| gmail_error(&format!("Failed to parse messages response: {}", e)))
    }
}
