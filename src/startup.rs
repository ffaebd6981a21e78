use crate::components::gmail::Gmail;
use crate::components::google_calendar::GoogleCalendar;
use crate::components::{ComponentManager, GmailHandle, GoogleCalendarHandle};
use crate::config::Config;
use crate::error::Error;
use crate::tools;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Fetch both listings and print each tool response as pretty JSON
pub async fn run_overview(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    // Initialize component manager
    let mut component_manager = ComponentManager::new(Arc::clone(&config));
    component_manager.register(GoogleCalendar::new());
    component_manager.register(Gmail::new());
    component_manager.init_all().await?;

    let (calendar_enabled, gmail_enabled) = {
        let config_read = config.read().await;
        (
            config_read.is_component_enabled("google_calendar"),
            config_read.is_component_enabled("gmail"),
        )
    };

    if calendar_enabled {
        let handle = calendar_handle(&component_manager, &config).await;
        let response = tools::get_calendar_events(&handle, None, None, None).await;

        info!("Calendar events");
        println!("{}", serde_json::to_string_pretty(&response).map_err(Error::from)?);
    }

    if gmail_enabled {
        let handle = gmail_handle(&component_manager, &config).await;
        let response = tools::get_emails(&handle, None).await;

        info!("Emails");
        println!("{}", serde_json::to_string_pretty(&response).map_err(Error::from)?);
    }

    component_manager.shutdown_all().await?;

    Ok(())
}

/// Get the calendar handle from the manager, or a standalone one
async fn calendar_handle(
    manager: &ComponentManager,
    config: &Arc<RwLock<Config>>,
) -> GoogleCalendarHandle {
    if let Some(component) = manager.get_component_by_name("google_calendar") {
        if let Some(calendar) = component.as_any().downcast_ref::<GoogleCalendar>() {
            if let Some(handle) = calendar.get_handle().await {
                return handle;
            }
        }
    }

    debug!("Google Calendar component not initialized, creating standalone handle");
    GoogleCalendarHandle::new(Arc::clone(config))
}

/// Get the Gmail handle from the manager, or a standalone one
async fn gmail_handle(manager: &ComponentManager, config: &Arc<RwLock<Config>>) -> GmailHandle {
    if let Some(component) = manager.get_component_by_name("gmail") {
        if let Some(gmail) = component.as_any().downcast_ref::<Gmail>() {
            if let Some(handle) = gmail.get_handle().await {
                return handle;
            }
        }
    }

    debug!("Gmail component not initialized, creating standalone handle");
    GmailHandle::new(Arc::clone(config))
}
