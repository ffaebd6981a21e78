use crate::components::token::{access_token, TokenManager};
use crate::config::Config;
use crate::error::{google_calendar_error, AgentResult};
use super::models::CalendarEvent;
use super::time::{normalize_window, TimeBound};
use chrono::Utc;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info};
use url::Url;

/// The Google Calendar actor that processes messages
pub struct GoogleCalendarActor {
    config: Arc<RwLock<Config>>,
    token_manager: TokenManager,
    client: Client,
    command_rx: mpsc::Receiver<GoogleCalendarCommand>,
}

/// Commands that can be sent to the Google Calendar actor
pub enum GoogleCalendarCommand {
    ListEvents {
        time_min: TimeBound,
        time_max: TimeBound,
        max_items: Option<u32>,
        respond_to: mpsc::Sender<AgentResult<Vec<CalendarEvent>>>,
    },
    Shutdown,
}

/// Handle for communicating with the Google Calendar actor
#[derive(Clone)]
pub struct GoogleCalendarActorHandle {
    command_tx: mpsc::Sender<GoogleCalendarCommand>,
}

impl GoogleCalendarActorHandle {
    /// List events inside the window described by the given bounds
    pub async fn list_events(
        &self,
        time_min: TimeBound,
        time_max: TimeBound,
        max_items: Option<u32>,
    ) -> AgentResult<Vec<CalendarEvent>> {
        let (respond_to, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(GoogleCalendarCommand::ListEvents {
                time_min,
                time_max,
                max_items,
                respond_to,
            })
            .await
            .map_err(|e| google_calendar_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| google_calendar_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AgentResult<()> {
        let _ = self.command_tx.send(GoogleCalendarCommand::Shutdown).await;
        Ok(())
    }
}

impl GoogleCalendarActor {
    /// Create a new actor and return its handle
    pub fn new(config: Arc<RwLock<Config>>) -> (Self, GoogleCalendarActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            config: Arc::clone(&config),
            token_manager: TokenManager::new(config),
            client: Client::new(),
            command_rx,
        };

        let handle = GoogleCalendarActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Google Calendar actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                GoogleCalendarCommand::ListEvents {
                    time_min,
                    time_max,
                    max_items,
                    respond_to,
                } => {
                    let result = Self::list_events(
                        Arc::clone(&self.config),
                        self.token_manager.clone(),
                        self.client.clone(),
                        time_min,
                        time_max,
                        max_items,
                    )
                    .await;
                    let _ = respond_to.send(result).await;
                }
                GoogleCalendarCommand::Shutdown => {
                    info!("Google Calendar actor shutting down");
                    break;
                }
            }
        }

        info!("Google Calendar actor shut down");
    }

    /// List events from the calendar within the resolved time window
    async fn list_events(
        config: Arc<RwLock<Config>>,
        token_manager: TokenManager,
        client: Client,
        time_min: TimeBound,
        time_max: TimeBound,
        max_items: Option<u32>,
    ) -> AgentResult<Vec<CalendarEvent>> {
        let (calendar_id, default_max) = {
            let config_read = config.read().await;
            (
                config_read.google_calendar_id.clone(),
                config_read.max_calendar_results,
            )
        };

        let token = token_manager.get_token().await?;
        let access_token = access_token(&token)?;

        // Resolve the listing window against the current instant
        let window = normalize_window(&time_min, &time_max, Utc::now());
        debug!(
            "Listing events from {} to {:?}",
            window.time_min_param(),
            window.time_max_param()
        );

        let url_str = format!(
            "https://www.googleapis.com/calendar/v3/calendars/{}/events",
            calendar_id
        );
        let mut url = Url::parse(&url_str)
            .map_err(|e| google_calendar_error(&format!("Failed to parse URL: {}", e)))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("timeMin", &window.time_min_param());
            // An open-ended window omits the upper bound entirely
            if let Some(time_max) = window.time_max_param() {
                query.append_pair("timeMax", &time_max);
            }
            query.append_pair(
                "maxResults",
                &max_items.unwrap_or(default_max).to_string(),
            );
            query.append_pair("singleEvents", "true");
            query.append_pair("orderBy", "startTime");
        }

        let response = client
            .get(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to fetch events: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to fetch events: HTTP {} - {}",
                status, error_body
            )));
        }

        let response_data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse events response: {}", e)))?;

        let items = response_data
            .get("items")
            .and_then(|i| i.as_array())
            .ok_or_else(|| google_calendar_error("No items in response"))?;

        Ok(items.iter().map(CalendarEvent::from_item).collect())
    }
}
