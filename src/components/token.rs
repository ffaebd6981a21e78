use crate::config::Config;
use crate::error::{google_calendar_error, AgentResult};
use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};
use std::fs;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Manages the provisioned OAuth token shared by the Google API components.
///
/// The token file must be provisioned out of band; this manager only reads
/// it, refreshes the access token when expired and writes the result back.
#[derive(Clone)]
pub struct TokenManager {
    config: Arc<RwLock<Config>>,
    client: Client,
}

impl TokenManager {
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Get an OAuth token with a usable access token, refreshing if expired
    pub async fn get_token(&self) -> AgentResult<Value> {
        let token_path = {
            let config_read = self.config.read().await;
            config_read.token_path.clone()
        };

        let token_str = fs::read_to_string(&token_path).map_err(|_| {
            google_calendar_error(&format!(
                "No token file at {}. Please provision one manually.",
                token_path
            ))
        })?;

        let token: Value = serde_json::from_str(&token_str)
            .map_err(|e| google_calendar_error(&format!("Failed to parse token JSON: {}", e)))?;

        // Check if token is expired
        if let Some(expiry) = token.get("expires_at").and_then(|v| v.as_i64()) {
            let now = Utc::now().timestamp();
            if expiry > now {
                return Ok(token);
            }
            debug!("Access token expired, refreshing");
            return self.refresh_token(&token, &token_path).await;
        }

        // No expiry recorded, the access token cannot be trusted
        self.refresh_token(&token, &token_path).await
    }

    /// Refresh an expired token and persist the result
    async fn refresh_token(&self, token: &Value, token_path: &str) -> AgentResult<Value> {
        let refresh_token = token
            .get("refresh_token")
            .and_then(|v| v.as_str())
            .ok_or_else(|| google_calendar_error("No refresh token in token data"))?;

        let (client_id, client_secret) = {
            let config_read = self.config.read().await;
            (
                config_read.google_client_id.clone(),
                config_read.google_client_secret.clone(),
            )
        };

        let params = [
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token.to_string()),
            ("grant_type", "refresh_token".to_string()),
        ];

        let response = self
            .client
            .post("https://oauth2.googleapis.com/token")
            .form(&params)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to refresh token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to refresh token: HTTP {} - {}",
                status, error_body
            )));
        }

        let new_token: Value = response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse token response: {}", e)))?;

        let access_token = new_token
            .get("access_token")
            .cloned()
            .ok_or_else(|| google_calendar_error("Token response missing 'access_token' field"))?;

        // Combine new access token with the existing refresh token
        let expires_in = new_token
            .get("expires_in")
            .and_then(|v| v.as_i64())
            .unwrap_or(3600);
        let token_json = json!({
            "access_token": access_token,
            "refresh_token": refresh_token,
            "expires_at": Utc::now().timestamp() + expires_in,
        });

        fs::write(token_path, token_json.to_string())
            .map_err(|e| google_calendar_error(&format!("Failed to save token file: {}", e)))?;

        Ok(token_json)
    }
}

/// Pull the bearer token string out of a token object
pub fn access_token(token: &Value) -> AgentResult<&str> {
    token
        .get("access_token")
        .and_then(|t| t.as_str())
        .ok_or_else(|| google_calendar_error("No access token available"))
}
