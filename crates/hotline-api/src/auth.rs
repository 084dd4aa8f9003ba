//! Client for the auth service.
//!
//! One URL, action-dispatched POST bodies. Register and login are single
//! attempts; the caller decides what to do with a failure.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use hotline_shared::User;

use crate::error::ApiError;
use crate::http;

/// Auth failures, classified from the service's status codes so the UI can
/// phrase them: 409 on register means the email is taken, 401 on login means
/// bad credentials, everything else is opaque.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("An account with this email already exists")]
    DuplicateEmail,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Serialize)]
struct AuthBody<'a> {
    action: &'a str,
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<&'a str>,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    url: String,
}

impl AuthClient {
    pub fn new(http: reqwest::Client, url: String) -> Self {
        Self { http, url }
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<User, AuthError> {
        let body = AuthBody {
            action: "register",
            email,
            password,
            display_name: Some(display_name),
        };

        match self.post(&body).await {
            Ok(user) => Ok(user),
            Err(e) if e.status() == Some(409) => Err(AuthError::DuplicateEmail),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let body = AuthBody {
            action: "login",
            email,
            password,
            display_name: None,
        };

        match self.post(&body).await {
            Ok(user) => Ok(user),
            Err(e) if e.status() == Some(401) => Err(AuthError::InvalidCredentials),
            Err(e) => Err(e.into()),
        }
    }

    async fn post(&self, body: &AuthBody<'_>) -> crate::Result<User> {
        let resp = self.http.post(&self.url).json(body).send().await?;
        let envelope: UserEnvelope = http::decode(resp).await?;
        Ok(envelope.user)
    }
}
