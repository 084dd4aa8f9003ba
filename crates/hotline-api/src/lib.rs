//! # hotline-api
//!
//! HTTP clients for the three remote services Hotline depends on: auth,
//! contacts and calls. Each is an independent endpoint with its own base URL;
//! they share one `reqwest::Client`, the `X-User-Id` header convention and a
//! common error taxonomy. Every call is a single attempt with no retry.

pub mod auth;
pub mod calls;
pub mod config;
pub mod contacts;
pub mod error;

mod http;

pub use auth::{AuthClient, AuthError};
pub use calls::{CallsClient, EndedCall, StartedCall};
pub use config::Endpoints;
pub use contacts::ContactsClient;
pub use error::{ApiError, Result};

use std::time::Duration;

/// The three service clients, built over one shared HTTP client.
#[derive(Debug, Clone)]
pub struct ServiceClients {
    pub auth: AuthClient,
    pub contacts: ContactsClient,
    pub calls: CallsClient,
}

impl ServiceClients {
    pub fn new(endpoints: &Endpoints) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(endpoints.request_timeout_secs))
            .build()?;

        Ok(Self {
            auth: AuthClient::new(http.clone(), endpoints.auth_url.clone()),
            contacts: ContactsClient::new(http.clone(), endpoints.contacts_url.clone()),
            calls: CallsClient::new(http, endpoints.calls_url.clone()),
        })
    }
}
