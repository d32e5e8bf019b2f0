// ABOUTME: SSE transport: GET opens a session stream, POST delivers requests into it
// ABOUTME: The first event on every stream is `endpoint`, naming the session message URL
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 AppUnite

use super::protocol::{McpRequest, McpResponse, ProtocolHandler};
use super::resources::ServerResources;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use dashmap::DashMap;
use futures_util::stream::{self, Stream, StreamExt};
use serde::Deserialize;
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, info};
use uuid::Uuid;

/// Active SSE sessions keyed by uuid
#[derive(Debug, Default)]
pub struct SseSessionRegistry {
    sessions: DashMap<String, mpsc::UnboundedSender<McpResponse>>,
}

impl SseSessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session and return its id plus the response receiver
    pub fn register(&self) -> (String, mpsc::UnboundedReceiver<McpResponse>) {
        let session_id = Uuid::new_v4().to_string();
        let (sender, receiver) = mpsc::unbounded_channel();
        self.sessions.insert(session_id.clone(), sender);
        (session_id, receiver)
    }

    pub fn unregister(&self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    /// Deliver a response to a session; false when the session is unknown
    /// or its stream has gone away
    pub fn deliver(&self, session_id: &str, response: McpResponse) -> bool {
        self.sessions
            .get(session_id)
            .is_some_and(|sender| sender.send(response).is_ok())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Shared state for the SSE routes
#[derive(Clone)]
pub struct SseState {
    pub resources: Arc<ServerResources>,
    pub registry: Arc<SseSessionRegistry>,
    /// Mount path of the stream endpoint, e.g. `/sse`
    pub path: String,
}

/// Removes the session from the registry when the stream is dropped
struct SessionGuard {
    registry: Arc<SseSessionRegistry>,
    session_id: String,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        debug!(session = %self.session_id, "SSE session closed");
        self.registry.unregister(&self.session_id);
    }
}

/// Build the SSE router: `GET {path}` and `POST {path}/messages`
pub fn router(resources: Arc<ServerResources>, path: &str) -> Router {
    let state = SseState {
        resources,
        registry: Arc::new(SseSessionRegistry::new()),
        path: path.to_string(),
    };
    Router::new()
        .route(path, get(open_stream))
        .route(&format!("{path}/messages"), post(post_message))
        .with_state(state)
}

async fn open_stream(
    State(state): State<SseState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (session_id, receiver) = state.registry.register();
    info!(session = %session_id, "SSE session opened");

    let endpoint = format!("{}/messages?session={session_id}", state.path);
    let endpoint_event = Event::default().event("endpoint").data(endpoint);

    let guard = SessionGuard {
        registry: Arc::clone(&state.registry),
        session_id,
    };
    let responses = UnboundedReceiverStream::new(receiver).map(move |response| {
        // the guard lives as long as the stream
        let _session = &guard;
        let data = serde_json::to_string(&response).unwrap_or_default();
        Ok(Event::default().event("message").data(data))
    });

    let stream = stream::once(async move { Ok(endpoint_event) }).chain(responses);
    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[derive(Debug, Deserialize)]
struct SessionQuery {
    session: String,
}

async fn post_message(
    State(state): State<SseState>,
    Query(query): Query<SessionQuery>,
    Json(request): Json<McpRequest>,
) -> Response {
    match ProtocolHandler::handle_request(request, &state.resources).await {
        Some(response) => {
            if state.registry.deliver(&query.session, response) {
                StatusCode::ACCEPTED.into_response()
            } else {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({"error": "unknown session"})),
                )
                    .into_response()
            }
        }
        // notifications produce no response on the stream
        None => StatusCode::ACCEPTED.into_response(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_registry_roundtrip() {
        let registry = SseSessionRegistry::new();
        let (id, mut receiver) = registry.register();
        assert_eq!(registry.len(), 1);

        let delivered = registry.deliver(&id, McpResponse::success(Some(json!(1)), json!({})));
        assert!(delivered);
        let response = receiver.recv().await.unwrap();
        assert_eq!(response.id, Some(json!(1)));

        registry.unregister(&id);
        assert!(registry.is_empty());
        assert!(!registry.deliver(&id, McpResponse::success(None, json!({}))));
    }

    #[test]
    fn test_deliver_fails_when_receiver_dropped() {
        let registry = SseSessionRegistry::new();
        let (id, receiver) = registry.register();
        drop(receiver);
        assert!(!registry.deliver(&id, McpResponse::success(None, json!({}))));
    }
}
