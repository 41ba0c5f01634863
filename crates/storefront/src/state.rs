//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::jsonbin::{JsonBinClient, JsonBinError};
use crate::services::{EmailJsClient, EmailJsError};

/// Error creating the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("document-store client error: {0}")]
    JsonBin(#[from] JsonBinError),
    #[error("email relay client error: {0}")]
    EmailJs(#[from] EmailJsError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the two external-service clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    jsonbin: JsonBinClient,
    emailjs: EmailJsClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if either external-service client fails to build.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let jsonbin = JsonBinClient::new(&config.jsonbin)?;
        let emailjs = EmailJsClient::new(&config.emailjs)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                jsonbin,
                emailjs,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the document-store client.
    #[must_use]
    pub fn jsonbin(&self) -> &JsonBinClient {
        &self.inner.jsonbin
    }

    /// Get a reference to the order relay client.
    #[must_use]
    pub fn emailjs(&self) -> &EmailJsClient {
        &self.inner.emailjs
    }
}
