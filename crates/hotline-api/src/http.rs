//! Shared response decoding for the three service clients.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ApiError, Result};

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Decode a service response into `T`, mapping non-2xx statuses to
/// [`ApiError::Rejected`] and undecodable 2xx bodies to
/// [`ApiError::Malformed`].
pub(crate) async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    let bytes = resp.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .map(|b| b.error)
            .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
        return Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&bytes).map_err(|e| ApiError::Malformed(e.to_string()))
}

/// Header carrying the acting user's id on contacts and calls requests.
pub(crate) const USER_ID_HEADER: &str = "X-User-Id";
