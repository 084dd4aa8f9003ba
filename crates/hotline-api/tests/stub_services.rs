//! End-to-end exercise of the three service clients against an in-process
//! stub implementing the observed wire contracts: action-dispatched JSON
//! bodies, `X-User-Id` headers, `{error}` bodies on rejection.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use hotline_api::{ApiError, AuthError, Endpoints, ServiceClients};
use hotline_shared::{RequestId, UserId};

#[derive(Default)]
struct StubState {
    // (id, email, password, display_name)
    users: Vec<(i64, String, String, String)>,
    // (id, sender, receiver, pending)
    requests: Vec<(i64, i64, i64, bool)>,
    friendships: Vec<(i64, i64)>,
    // (id, caller, receiver, ended)
    calls: Vec<(i64, i64, i64, bool)>,
}

type Shared = Arc<Mutex<StubState>>;

fn err(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message })))
}

fn user_id_from(headers: &HeaderMap) -> Option<i64> {
    headers.get("X-User-Id")?.to_str().ok()?.parse().ok()
}

fn now_pg() -> String {
    // the Postgres rendering the real services emit
    chrono::Utc::now()
        .format("%Y-%m-%d %H:%M:%S.%6f+00:00")
        .to_string()
}

async fn auth(State(state): State<Shared>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    let action = body["action"].as_str().unwrap_or_default();
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();

    match action {
        "register" => {
            if state.users.iter().any(|(_, e, _, _)| *e == email) {
                return err(StatusCode::CONFLICT, "Email already registered");
            }
            let id = state.users.len() as i64 + 1;
            let name = body["display_name"].as_str().unwrap_or_default().to_string();
            state.users.push((id, email.clone(), password, name.clone()));
            (
                StatusCode::OK,
                Json(json!({ "user": {
                    "id": id,
                    "email": email,
                    "display_name": name,
                    "avatar_url": null,
                    "created_at": now_pg(),
                }})),
            )
        }
        "login" => {
            match state
                .users
                .iter()
                .find(|(_, e, p, _)| *e == email && *p == password)
            {
                Some((id, email, _, name)) => (
                    StatusCode::OK,
                    Json(json!({ "user": {
                        "id": id,
                        "email": email,
                        "display_name": name,
                        "created_at": now_pg(),
                    }})),
                ),
                None => err(StatusCode::UNAUTHORIZED, "Invalid credentials"),
            }
        }
        _ => err(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
    }
}

async fn contacts_get(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    let Some(user) = user_id_from(&headers) else {
        return err(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    let state = state.lock().unwrap();

    match params.get("action").map(String::as_str) {
        Some("friends") => {
            let friends: Vec<Value> = state
                .friendships
                .iter()
                .filter_map(|(a, b)| {
                    let other = if *a == user {
                        Some(*b)
                    } else if *b == user {
                        Some(*a)
                    } else {
                        None
                    }?;
                    let (id, email, _, name) =
                        state.users.iter().find(|(id, ..)| *id == other)?;
                    Some(json!({
                        "id": id,
                        "display_name": name,
                        "email": email,
                        "last_seen": now_pg(),
                    }))
                })
                .collect();
            (StatusCode::OK, Json(json!({ "friends": friends })))
        }
        Some("requests") => {
            let requests: Vec<Value> = state
                .requests
                .iter()
                .filter(|(_, _, receiver, pending)| *receiver == user && *pending)
                .filter_map(|(id, sender, _, _)| {
                    let (_, email, _, name) =
                        state.users.iter().find(|(uid, ..)| uid == sender)?;
                    Some(json!({
                        "id": id,
                        "sender_id": sender,
                        "display_name": name,
                        "email": email,
                        "created_at": now_pg(),
                    }))
                })
                .collect();
            (StatusCode::OK, Json(json!({ "requests": requests })))
        }
        Some("search") => {
            let query = params.get("q").cloned().unwrap_or_default();
            if query.chars().count() < 2 {
                return err(StatusCode::BAD_REQUEST, "Query too short");
            }
            let needle = query.to_lowercase();
            let results: Vec<Value> = state
                .users
                .iter()
                .filter(|(id, email, _, name)| {
                    *id != user
                        && (name.to_lowercase().contains(&needle)
                            || email.to_lowercase().contains(&needle))
                })
                .map(|(id, email, _, name)| {
                    json!({ "id": id, "display_name": name, "email": email })
                })
                .collect();
            (StatusCode::OK, Json(json!({ "results": results })))
        }
        _ => err(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
    }
}

async fn contacts_post(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let Some(user) = user_id_from(&headers) else {
        return err(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    let mut state = state.lock().unwrap();

    match body["action"].as_str().unwrap_or_default() {
        "send_request" => {
            let receiver = body["receiver_id"].as_i64().unwrap_or_default();
            if state
                .requests
                .iter()
                .any(|(_, s, r, _)| *s == user && *r == receiver)
            {
                return err(StatusCode::CONFLICT, "Request already exists");
            }
            let id = state.requests.len() as i64 + 1;
            state.requests.push((id, user, receiver, true));
            (
                StatusCode::OK,
                Json(json!({ "success": true, "request_id": id })),
            )
        }
        "accept_request" => {
            let request_id = body["request_id"].as_i64().unwrap_or_default();
            let Some(entry) = state
                .requests
                .iter_mut()
                .find(|(id, _, receiver, pending)| {
                    *id == request_id && *receiver == user && *pending
                })
            else {
                return err(StatusCode::NOT_FOUND, "Request not found");
            };
            entry.3 = false;
            let (sender, receiver) = (entry.1, entry.2);
            state.friendships.push((sender.min(receiver), sender.max(receiver)));
            (StatusCode::OK, Json(json!({ "success": true })))
        }
        "reject_request" => {
            let request_id = body["request_id"].as_i64().unwrap_or_default();
            // the real service answers 200 even for unknown ids
            if let Some(entry) = state
                .requests
                .iter_mut()
                .find(|(id, _, receiver, _)| *id == request_id && *receiver == user)
            {
                entry.3 = false;
            }
            (StatusCode::OK, Json(json!({ "success": true })))
        }
        _ => err(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
    }
}

async fn calls_post(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let Some(user) = user_id_from(&headers) else {
        return err(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    let mut state = state.lock().unwrap();

    match body["action"].as_str().unwrap_or_default() {
        "start_call" => {
            let receiver = body["receiver_id"].as_i64().unwrap_or_default();
            let id = state.calls.len() as i64 + 1;
            state.calls.push((id, user, receiver, false));
            (
                StatusCode::OK,
                Json(json!({ "call": { "id": id, "started_at": now_pg() }})),
            )
        }
        "end_call" => {
            let call_id = body["call_id"].as_i64().unwrap_or_default();
            let Some(call) = state
                .calls
                .iter_mut()
                .find(|(id, caller, receiver, _)| {
                    *id == call_id && (*caller == user || *receiver == user)
                })
            else {
                return err(StatusCode::NOT_FOUND, "Call not found");
            };
            call.3 = true;
            (
                StatusCode::OK,
                Json(json!({ "call": { "id": call_id, "duration_seconds": 0 }})),
            )
        }
        _ => err(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
    }
}

async fn calls_get(State(state): State<Shared>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let Some(user) = user_id_from(&headers) else {
        return err(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    let state = state.lock().unwrap();

    let calls: Vec<Value> = state
        .calls
        .iter()
        .rev()
        .filter(|(_, caller, receiver, _)| *caller == user || *receiver == user)
        .filter_map(|(id, caller, receiver, ended)| {
            let other = if *caller == user { receiver } else { caller };
            let (_, _, _, name) = state.users.iter().find(|(uid, ..)| uid == other)?;
            Some(json!({
                "id": id,
                "status": if *ended { "ended" } else { "active" },
                "started_at": now_pg(),
                "ended_at": if *ended { Value::from(now_pg()) } else { Value::Null },
                "duration_seconds": if *ended { Value::from(0) } else { Value::Null },
                "caller_id": caller,
                "receiver_id": receiver,
                "other_user_name": name,
                "other_user_avatar": null,
            }))
        })
        .collect();
    (StatusCode::OK, Json(json!({ "calls": calls })))
}

async fn spawn_stub() -> String {
    let state: Shared = Arc::default();
    let router = Router::new()
        .route("/auth", post(auth))
        .route("/contacts", get(contacts_get).post(contacts_post))
        .route("/calls", get(calls_get).post(calls_post))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn full_flow_register_to_call() {
    let base = spawn_stub().await;
    let clients = ServiceClients::new(&Endpoints::all_at(&base)).unwrap();

    let anna = clients
        .auth
        .register("anna@example.com", "secret1", "Anna Petrova")
        .await
        .unwrap();
    let boris = clients
        .auth
        .register("boris@example.com", "secret2", "Boris Ivanov")
        .await
        .unwrap();
    assert_ne!(anna.id, boris.id);
    assert!(anna.created_at.is_some(), "flexible timestamp decoded");

    // Boris finds Anna and sends a request.
    let results = clients.contacts.search(boris.id, "ann").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, anna.id);

    let request_id = clients
        .contacts
        .send_request(boris.id, anna.id)
        .await
        .unwrap()
        .expect("stub returns the new request id");

    // A duplicate send is a 409 rejection.
    let dup = clients.contacts.send_request(boris.id, anna.id).await;
    assert!(matches!(dup, Err(ApiError::Rejected { status: 409, .. })));

    // Anna sees and accepts it.
    let pending = clients.contacts.pending_requests(anna.id).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, request_id);
    assert_eq!(pending[0].sender_id, boris.id);

    clients
        .contacts
        .accept_request(anna.id, request_id)
        .await
        .unwrap();

    // Accepting twice is a 404.
    let again = clients.contacts.accept_request(anna.id, request_id).await;
    assert!(matches!(again, Err(ApiError::Rejected { status: 404, .. })));

    // Both sides now list each other.
    let friends = clients.contacts.friends(anna.id).await.unwrap();
    assert_eq!(friends.len(), 1);
    assert_eq!(friends[0].id, boris.id);
    assert!(friends[0].is_online_at(chrono::Utc::now()));
    let friends = clients.contacts.friends(boris.id).await.unwrap();
    assert_eq!(friends[0].id, anna.id);

    // Call and hang up.
    let started = clients.calls.start_call(anna.id, boris.id).await.unwrap();
    let ended = clients.calls.end_call(anna.id, started.id).await.unwrap();
    assert_eq!(ended.id, started.id);
    assert!(ended.duration_seconds.is_some());

    let history = clients.calls.history(anna.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert!(history[0].is_outgoing_for(anna.id));
    assert_eq!(history[0].status, "ended");
}

#[tokio::test]
async fn auth_rejections_are_classified() {
    let base = spawn_stub().await;
    let clients = ServiceClients::new(&Endpoints::all_at(&base)).unwrap();

    clients
        .auth
        .register("anna@example.com", "secret1", "Anna")
        .await
        .unwrap();

    let dup = clients
        .auth
        .register("anna@example.com", "other", "Anna Again")
        .await;
    assert!(matches!(dup, Err(AuthError::DuplicateEmail)));

    let bad = clients.auth.login("anna@example.com", "wrong").await;
    assert!(matches!(bad, Err(AuthError::InvalidCredentials)));

    let ok = clients.auth.login("anna@example.com", "secret1").await;
    assert!(ok.is_ok());
}

#[tokio::test]
async fn reject_request_succeeds_even_for_unknown_ids() {
    let base = spawn_stub().await;
    let clients = ServiceClients::new(&Endpoints::all_at(&base)).unwrap();

    let anna = clients
        .auth
        .register("anna@example.com", "secret1", "Anna")
        .await
        .unwrap();

    clients
        .contacts
        .reject_request(anna.id, RequestId(999))
        .await
        .unwrap();
}

#[tokio::test]
async fn undecodable_success_body_is_malformed() {
    let router = Router::new().route("/auth", post(|| async { "not json" }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let clients =
        ServiceClients::new(&Endpoints::all_at(&format!("http://{addr}"))).unwrap();
    let result = clients.auth.login("a@b.c", "pw").await;
    assert!(matches!(result, Err(AuthError::Api(ApiError::Malformed(_)))));
}

#[tokio::test]
async fn transport_failure_is_surfaced() {
    // nothing is listening on this port
    let clients = ServiceClients::new(&Endpoints::all_at("http://127.0.0.1:1")).unwrap();
    let result = clients.contacts.friends(UserId(1)).await;
    assert!(matches!(result, Err(ApiError::Transport(_))));
}
