//! Client for the calls service.
//!
//! Calls here are bookkeeping rows, not media sessions: `start_call` inserts
//! an active row and returns its id, `end_call` stamps the end time and
//! computed duration. History is the supplementary read surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hotline_shared::{timestamp, CallId, CallRecord, UserId};

use crate::error::Result;
use crate::http::{self, USER_ID_HEADER};

/// The service's answer to `start_call`.
#[derive(Debug, Clone, Deserialize)]
pub struct StartedCall {
    pub id: CallId,
    #[serde(default, with = "timestamp::flexible_opt")]
    pub started_at: Option<DateTime<Utc>>,
}

/// The service's answer to `end_call`.
#[derive(Debug, Clone, Deserialize)]
pub struct EndedCall {
    pub id: CallId,
    #[serde(default)]
    pub duration_seconds: Option<i64>,
}

#[derive(Deserialize)]
struct CallEnvelope<T> {
    call: T,
}

#[derive(Deserialize)]
struct HistoryEnvelope {
    calls: Vec<CallRecord>,
}

#[derive(Serialize)]
#[serde(tag = "action")]
enum Command {
    #[serde(rename = "start_call")]
    StartCall { receiver_id: UserId },
    #[serde(rename = "end_call")]
    EndCall { call_id: CallId },
}

#[derive(Debug, Clone)]
pub struct CallsClient {
    http: reqwest::Client,
    url: String,
}

impl CallsClient {
    pub fn new(http: reqwest::Client, url: String) -> Self {
        Self { http, url }
    }

    pub async fn start_call(&self, user: UserId, receiver: UserId) -> Result<StartedCall> {
        let resp = self
            .http
            .post(&self.url)
            .header(USER_ID_HEADER, user.to_string())
            .json(&Command::StartCall {
                receiver_id: receiver,
            })
            .send()
            .await?;
        let envelope: CallEnvelope<StartedCall> = http::decode(resp).await?;
        Ok(envelope.call)
    }

    pub async fn end_call(&self, user: UserId, call: CallId) -> Result<EndedCall> {
        let resp = self
            .http
            .post(&self.url)
            .header(USER_ID_HEADER, user.to_string())
            .json(&Command::EndCall { call_id: call })
            .send()
            .await?;
        let envelope: CallEnvelope<EndedCall> = http::decode(resp).await?;
        Ok(envelope.call)
    }

    /// Recent calls involving `user`, newest first, capped at 50 by the
    /// service.
    pub async fn history(&self, user: UserId) -> Result<Vec<CallRecord>> {
        let resp = self
            .http
            .get(&self.url)
            .query(&[("action", "history")])
            .header(USER_ID_HEADER, user.to_string())
            .send()
            .await?;
        let envelope: HistoryEnvelope = http::decode(resp).await?;
        Ok(envelope.calls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn started_call_decodes_service_payload() {
        let env: CallEnvelope<StartedCall> = serde_json::from_str(
            r#"{"call": {"id": 17, "started_at": "2024-01-15 10:30:00.000001+00:00"}}"#,
        )
        .unwrap();
        assert_eq!(env.call.id, CallId(17));
        assert!(env.call.started_at.is_some());
    }

    #[test]
    fn ended_call_decodes_service_payload() {
        let env: CallEnvelope<EndedCall> =
            serde_json::from_str(r#"{"call": {"id": 17, "duration_seconds": 93}}"#).unwrap();
        assert_eq!(env.call.duration_seconds, Some(93));
    }

    #[test]
    fn history_decodes_service_payload() {
        let json = r#"{"calls": [{
            "id": 3,
            "status": "ended",
            "started_at": "2024-01-15 10:00:00+00:00",
            "ended_at": "2024-01-15 10:01:33+00:00",
            "duration_seconds": 93,
            "caller_id": 1,
            "receiver_id": 2,
            "other_user_name": "Boris",
            "other_user_avatar": null
        }]}"#;
        let env: HistoryEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(env.calls.len(), 1);
        assert!(env.calls[0].is_outgoing_for(UserId(1)));
    }
}
