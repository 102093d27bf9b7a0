use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use protocol::{names, Envelope, Intent, SessionId};
use runtime::Directory;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::outbox::HttpOutbox;

#[derive(Clone)]
pub struct AppState {
    pub directory: Directory,
    pub outbox: HttpOutbox,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    actors: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct NewChatResponse {
    chat_id: String,
}

#[derive(Deserialize)]
struct MessageRequest {
    text: String,
}

#[derive(Serialize, Deserialize)]
struct RepliesResponse {
    replies: Vec<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/chats", post(new_chat))
        .route("/chats/:chat_id", delete(end_chat))
        .route("/chats/:chat_id/messages", post(post_message))
        .route("/chats/:chat_id/replies", get(get_replies))
        .with_state(state)
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        actors: state.directory.names(),
    })
}

async fn new_chat() -> Json<NewChatResponse> {
    Json(NewChatResponse {
        chat_id: uuid::Uuid::new_v4().to_string(),
    })
}

async fn post_message(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<String>,
    Json(req): Json<MessageRequest>,
) -> StatusCode {
    let chat = SessionId::new(chat_id);
    if state.outbox.is_closed(&chat) {
        return StatusCode::GONE;
    }

    let envelope = Envelope::new(Intent::UserMessage)
        .with_payload(req.text)
        .in_session(chat);

    match state.directory.send(names::CONVERSATION, &envelope) {
        Ok(()) => StatusCode::ACCEPTED,
        Err(e) => {
            warn!(error = %e, "Conversation actor unavailable");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn get_replies(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<String>,
) -> Json<RepliesResponse> {
    Json(RepliesResponse {
        replies: state.outbox.drain(&SessionId::new(chat_id)),
    })
}

async fn end_chat(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<String>,
) -> StatusCode {
    let chat = SessionId::new(chat_id);
    state.outbox.close_chat(&chat);

    // through the conversation actor, so the extractor sees it after this chat's requests
    let envelope = Envelope::new(Intent::EndSession).in_session(chat);
    if let Err(e) = state.directory.send(names::CONVERSATION, &envelope) {
        warn!(error = %e, "Failed to end chat session");
    }
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use runtime::{Actor, ActorSystem, Context};
    use tower::ServiceExt;

    /// Replies "echo: <text>" to every user message.
    struct Echo {
        outbox: HttpOutbox,
    }

    #[async_trait]
    impl Actor for Echo {
        async fn handle(&mut self, envelope: Envelope, _ctx: &Context) {
            use conversation::ChatFrontend;
            let text = format!("echo: {}", envelope.payload.unwrap_or_default());
            self.outbox.deliver(&envelope.session, &text).await.unwrap();
        }
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_message_roundtrip_over_http() {
        let outbox = HttpOutbox::new();
        let mut system = ActorSystem::new();
        system
            .spawn(names::CONVERSATION, Echo { outbox: outbox.clone() })
            .unwrap();
        let app = router(Arc::new(AppState {
            directory: system.directory().clone(),
            outbox: outbox.clone(),
        }));

        let response = app
            .clone()
            .oneshot(Request::post("/chats").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let chat: NewChatResponse = body_json(response).await;
        assert!(uuid::Uuid::parse_str(&chat.chat_id).is_ok());

        let response = app
            .clone()
            .oneshot(
                Request::post(format!("/chats/{}/messages", chat.chat_id))
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"text":"hi"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let mut replies = Vec::new();
        for _ in 0..100 {
            let response = app
                .clone()
                .oneshot(
                    Request::get(format!("/chats/{}/replies", chat.chat_id))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            let body: RepliesResponse = body_json(response).await;
            replies.extend(body.replies);
            if !replies.is_empty() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(replies, vec!["echo: hi"]);

        system.shutdown().await;
    }

    #[tokio::test]
    async fn test_deleted_chat_rejects_messages() {
        let outbox = HttpOutbox::new();
        let mut system = ActorSystem::new();
        system
            .spawn(names::CONVERSATION, Echo { outbox: outbox.clone() })
            .unwrap();
        let app = router(Arc::new(AppState {
            directory: system.directory().clone(),
            outbox: outbox.clone(),
        }));

        let response = app
            .clone()
            .oneshot(Request::delete("/chats/old").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(outbox.is_closed(&SessionId::new("old")));

        let response = app
            .oneshot(
                Request::post("/chats/old/messages")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"text":"hi"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::GONE);

        system.shutdown().await;
        assert_eq!(outbox.pending_chats(), 0);
    }

    #[tokio::test]
    async fn test_message_without_conversation_actor() {
        let system = ActorSystem::new();
        let app = router(Arc::new(AppState {
            directory: system.directory().clone(),
            outbox: HttpOutbox::new(),
        }));

        let response = app
            .oneshot(
                Request::post("/chats/x/messages")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"text":"hi"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
