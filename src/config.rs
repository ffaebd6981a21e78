use crate::error::{env_error, AgentResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;

/// Default calendar to list events from
pub const DEFAULT_CALENDAR_ID: &str = "primary";

/// Default number of calendar events to fetch in one listing
pub const DEFAULT_MAX_EVENTS: u32 = 200;

/// Default number of emails to fetch in one listing
pub const DEFAULT_MAX_EMAILS: u32 = 10;

/// Main configuration structure for the assistant backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Google API client ID
    pub google_client_id: String,
    /// Google API client secret
    pub google_client_secret: String,
    /// Google Calendar ID to list events from
    pub google_calendar_id: String,
    /// Path to the provisioned OAuth token file
    pub token_path: String,
    /// Map of component names to their enabled status
    pub components: HashMap<String, bool>,
    /// Maximum number of calendar events per listing
    pub max_calendar_results: u32,
    /// Maximum number of emails per listing
    pub max_email_results: u32,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> AgentResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Required environment variables
        let google_client_id =
            env::var("GOOGLE_CLIENT_ID").map_err(|_| env_error("GOOGLE_CLIENT_ID"))?;
        let google_client_secret =
            env::var("GOOGLE_CLIENT_SECRET").map_err(|_| env_error("GOOGLE_CLIENT_SECRET"))?;

        // Optional variables with defaults
        let google_calendar_id = env::var("GOOGLE_CALENDAR_ID")
            .unwrap_or_else(|_| String::from(DEFAULT_CALENDAR_ID));
        let token_path = env::var("TOKEN_PATH").unwrap_or_else(|_| String::from("token.json"));

        let max_calendar_results = env::var("MAX_CALENDAR_RESULTS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_EVENTS);

        let max_email_results = env::var("MAX_EMAIL_RESULTS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_EMAILS);

        // Initialize default components
        let mut components = HashMap::new();
        components.insert("google_calendar".to_string(), true);
        components.insert("gmail".to_string(), true);

        // Load components configuration from file if it exists
        if let Ok(content) = fs::read_to_string("config/components.toml") {
            if let Ok(file_components) = toml::from_str::<HashMap<String, bool>>(&content) {
                // Merge with defaults
                for (key, value) in file_components {
                    components.insert(key, value);
                }
            }
        }

        Ok(Config {
            google_client_id,
            google_client_secret,
            google_calendar_id,
            token_path,
            components,
            max_calendar_results,
            max_email_results,
        })
    }

    /// Check if a component is enabled
    pub fn is_component_enabled(&self, name: &str) -> bool {
        *self.components.get(name).unwrap_or(&false)
    }
}
