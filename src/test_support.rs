//! Scripted in-process backend for client and endpoint tests.
//!
//! Replies are keyed by `(method, path)`; every request is recorded so tests
//! can assert on headers and bodies the client actually sent.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::session::{MemoryStore, Session};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned)
    }
}

#[derive(Debug, Clone)]
pub struct Reply {
    status: u16,
    body: String,
    content_type: &'static str,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self { status, body: body.to_string(), content_type: "application/json" }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self { status, body: body.to_owned(), content_type: "text/html" }
    }
}

#[derive(Default)]
struct Inner {
    replies: HashMap<(String, String), Vec<Reply>>,
    seen: Vec<Recorded>,
}

#[derive(Clone, Default)]
pub struct ScriptedBackend {
    inner: Arc<Mutex<Inner>>,
}

impl ScriptedBackend {
    /// Queue a reply for `method path`. Queued replies are served in order;
    /// the last one repeats.
    pub fn reply(&self, method: &str, path: &str, reply: Reply) -> &Self {
        self.inner
            .lock()
            .unwrap()
            .replies
            .entry((method.to_owned(), path.to_owned()))
            .or_default()
            .push(reply);
        self
    }

    pub fn seen(&self) -> Vec<Recorded> {
        self.inner.lock().unwrap().seen.clone()
    }

    pub fn last(&self) -> Recorded {
        self.seen().pop().expect("no request recorded")
    }

    pub async fn start(&self) -> String {
        let app = Router::new().fallback(scripted).with_state(self.clone());
        spawn(app).await
    }
}

async fn scripted(
    State(backend): State<ScriptedBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_owned();
    let mut inner = backend.inner.lock().unwrap();
    inner.seen.push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        headers,
        body: serde_json::from_slice(&body).ok(),
    });

    let Some(queue) = inner.replies.get_mut(&(method.to_string(), path)) else {
        return (StatusCode::NOT_FOUND, [(header::CONTENT_TYPE, "application/json")], r#"{"detail":"Not found."}"#)
            .into_response();
    };
    let reply = if queue.len() > 1 { queue.remove(0) } else { queue[0].clone() };
    let status = StatusCode::from_u16(reply.status).unwrap();
    (status, [(header::CONTENT_TYPE, reply.content_type)], reply.body).into_response()
}

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Client over an in-memory session the test can inspect.
pub fn client_for(base_url: &str) -> (Arc<MemoryStore>, ApiClient) {
    let store = Arc::new(MemoryStore::default());
    let config = ClientConfig::new(base_url, Some(std::env::temp_dir().join("borla-unused.json"))).unwrap();
    let client = ApiClient::new(&config, Session::new(Arc::clone(&store))).unwrap();
    (store, client)
}
