// src/api/state.rs
// Web server state management

use std::sync::Arc;

use crate::config::SeoConfig;
use crate::error::Result;
use crate::webhook::WebhookClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SeoConfig>,

    /// Webhook client, None when SEO_WEBHOOK_URL is unset
    pub webhook: Option<WebhookClient>,
}

impl AppState {
    /// Create state from configuration, building the webhook client if configured
    pub fn new(config: SeoConfig) -> Result<Self> {
        let webhook = match &config.webhook_url {
            Some(url) => Some(WebhookClient::new(url.clone(), config.webhook_timeout())?),
            None => None,
        };

        Ok(Self {
            config: Arc::new(config),
            webhook,
        })
    }

    pub fn webhook_configured(&self) -> bool {
        self.webhook.is_some()
    }
}
