//! Client for the contacts / friend-graph service.
//!
//! Queries go through `GET ?action=...`, commands through action-dispatched
//! POST bodies; both carry the acting user in the `X-User-Id` header.

use serde::{Deserialize, Serialize};

use hotline_shared::{Contact, FriendRequest, RequestId, SearchResult, UserId};

use crate::error::Result;
use crate::http::{self, USER_ID_HEADER};

#[derive(Deserialize)]
struct FriendsEnvelope {
    friends: Vec<Contact>,
}

#[derive(Deserialize)]
struct RequestsEnvelope {
    requests: Vec<FriendRequest>,
}

#[derive(Deserialize)]
struct ResultsEnvelope {
    results: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct AckEnvelope {
    #[allow(dead_code)]
    success: bool,
    #[serde(default)]
    request_id: Option<RequestId>,
}

#[derive(Serialize)]
#[serde(tag = "action")]
enum Command {
    #[serde(rename = "send_request")]
    SendRequest { receiver_id: UserId },
    #[serde(rename = "accept_request")]
    AcceptRequest { request_id: RequestId },
    #[serde(rename = "reject_request")]
    RejectRequest { request_id: RequestId },
}

#[derive(Debug, Clone)]
pub struct ContactsClient {
    http: reqwest::Client,
    url: String,
}

impl ContactsClient {
    pub fn new(http: reqwest::Client, url: String) -> Self {
        Self { http, url }
    }

    /// The accepted friends of `user`, most recently seen first.
    pub async fn friends(&self, user: UserId) -> Result<Vec<Contact>> {
        let resp = self
            .http
            .get(&self.url)
            .query(&[("action", "friends")])
            .header(USER_ID_HEADER, user.to_string())
            .send()
            .await?;
        let envelope: FriendsEnvelope = http::decode(resp).await?;
        Ok(envelope.friends)
    }

    /// Pending incoming requests for `user`, newest first.
    pub async fn pending_requests(&self, user: UserId) -> Result<Vec<FriendRequest>> {
        let resp = self
            .http
            .get(&self.url)
            .query(&[("action", "requests")])
            .header(USER_ID_HEADER, user.to_string())
            .send()
            .await?;
        let envelope: RequestsEnvelope = http::decode(resp).await?;
        Ok(envelope.requests)
    }

    /// Substring search over display names and emails. The service rejects
    /// queries under two characters with a 400; callers gate locally first.
    pub async fn search(&self, user: UserId, query: &str) -> Result<Vec<SearchResult>> {
        let resp = self
            .http
            .get(&self.url)
            .query(&[("action", "search"), ("q", query)])
            .header(USER_ID_HEADER, user.to_string())
            .send()
            .await?;
        let envelope: ResultsEnvelope = http::decode(resp).await?;
        Ok(envelope.results)
    }

    /// Send a friend request to `receiver`. The service answers 409 when a
    /// request between the pair already exists.
    pub async fn send_request(
        &self,
        user: UserId,
        receiver: UserId,
    ) -> Result<Option<RequestId>> {
        let ack = self
            .command(user, &Command::SendRequest {
                receiver_id: receiver,
            })
            .await?;
        Ok(ack.request_id)
    }

    /// Accept a pending request. 404 when the request is unknown, already
    /// handled, or addressed to someone else.
    pub async fn accept_request(&self, user: UserId, request: RequestId) -> Result<()> {
        self.command(user, &Command::AcceptRequest {
            request_id: request,
        })
        .await?;
        Ok(())
    }

    /// Reject a pending request. The service answers 200 even for unknown
    /// ids, so success here only means the request is no longer pending.
    pub async fn reject_request(&self, user: UserId, request: RequestId) -> Result<()> {
        self.command(user, &Command::RejectRequest {
            request_id: request,
        })
        .await?;
        Ok(())
    }

    async fn command(&self, user: UserId, command: &Command) -> Result<AckEnvelope> {
        let resp = self
            .http
            .post(&self.url)
            .header(USER_ID_HEADER, user.to_string())
            .json(command)
            .send()
            .await?;
        http::decode(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_serialize_with_action_tag() {
        let json = serde_json::to_value(Command::SendRequest {
            receiver_id: UserId(5),
        })
        .unwrap();
        assert_eq!(json["action"], "send_request");
        assert_eq!(json["receiver_id"], 5);

        let json = serde_json::to_value(Command::AcceptRequest {
            request_id: RequestId(9),
        })
        .unwrap();
        assert_eq!(json["action"], "accept_request");
        assert_eq!(json["request_id"], 9);
    }

    #[test]
    fn ack_tolerates_missing_request_id() {
        let ack: AckEnvelope = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(ack.request_id.is_none());

        let ack: AckEnvelope =
            serde_json::from_str(r#"{"success": true, "request_id": 12}"#).unwrap();
        assert_eq!(ack.request_id, Some(RequestId(12)));
    }
}
