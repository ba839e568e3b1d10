//! In-process stand-in for the Hugging Face Hub API.
//!
//! Runs an axum server on its own thread so blocking callers (the setup
//! orchestrator, the CLI binaries) can talk to it.

#![allow(dead_code)]

use std::net::TcpListener as StdTcpListener;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::oneshot;

pub const VALID_TOKEN: &str = "hf_valid_token";

/// How the create endpoint answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateBehavior {
    Create,
    AlreadyExists,
    ServerError,
}

#[derive(Clone)]
struct HubState {
    behavior: CreateBehavior,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

pub struct MockHub {
    pub endpoint: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl MockHub {
    pub fn start(behavior: CreateBehavior) -> Self {
        let listener = StdTcpListener::bind("127.0.0.1:0").expect("failed to bind mock hub");
        listener
            .set_nonblocking(true)
            .expect("failed to set mock hub non-blocking");
        let addr = listener.local_addr().expect("mock hub has no address");

        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = HubState {
            behavior,
            requests: requests.clone(),
        };
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let thread = std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build mock hub runtime");
            runtime.block_on(async move {
                let app = Router::new()
                    .route("/api/whoami-v2", get(whoami))
                    .route("/api/repos/create", post(create_repo))
                    .with_state(state);
                let listener = tokio::net::TcpListener::from_std(listener)
                    .expect("failed to adopt mock hub listener");
                axum::serve(listener, app)
                    .with_graceful_shutdown(async move {
                        let _ = shutdown_rx.await;
                    })
                    .await
                    .expect("mock hub server failed");
            });
        });

        Self {
            endpoint: format!("http://{}", addr),
            requests,
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn create_calls(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == "/api/repos/create")
            .collect()
    }
}

impl Drop for MockHub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn is_authorized(headers: &HeaderMap) -> bool {
    authorization(headers).as_deref() == Some(format!("Bearer {}", VALID_TOKEN).as_str())
}

async fn whoami(State(state): State<HubState>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    state.requests.lock().unwrap().push(RecordedRequest {
        path: "/api/whoami-v2".to_string(),
        authorization: authorization(&headers),
        body: None,
    });

    if is_authorized(&headers) {
        (StatusCode::OK, Json(json!({"name": "tera", "type": "user"})))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid credentials in Authorization header"})),
        )
    }
}

async fn create_repo(
    State(state): State<HubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.requests.lock().unwrap().push(RecordedRequest {
        path: "/api/repos/create".to_string(),
        authorization: authorization(&headers),
        body: Some(body.clone()),
    });

    if !is_authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid credentials"})),
        );
    }

    let repo = format!(
        "{}/{}",
        body["organization"].as_str().unwrap_or_default(),
        body["name"].as_str().unwrap_or_default()
    );

    match state.behavior {
        CreateBehavior::Create => (
            StatusCode::OK,
            Json(json!({"url": format!("https://huggingface.co/datasets/{}", repo)})),
        ),
        CreateBehavior::AlreadyExists => (
            StatusCode::CONFLICT,
            Json(json!({"error": "You already created this dataset repo"})),
        ),
        CreateBehavior::ServerError => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Internal Error"})),
        ),
    }
}
