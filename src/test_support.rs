//! In-process HTTP fixture server for tests.

use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    pub fn event_stream(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "text/event-stream",
            body: body.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub body: String,
}

struct Fixture {
    routes: HashMap<String, Reply>,
    requests: Mutex<Vec<Recorded>>,
}

pub struct TestServer {
    addr: SocketAddr,
    fixture: Arc<Fixture>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn base(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.fixture.requests.lock().unwrap().clone()
    }
}

/// Serve canned replies keyed by request path; unknown paths get a 404.
pub async fn serve(routes: Vec<(&str, Reply)>) -> TestServer {
    let fixture = Arc::new(Fixture {
        routes: routes
            .into_iter()
            .map(|(p, r)| (p.to_string(), r))
            .collect(),
        requests: Mutex::new(Vec::new()),
    });

    let app = Router::new().fallback(reply).with_state(fixture.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    TestServer { addr, fixture }
}

async fn reply(
    State(fixture): State<Arc<Fixture>>,
    method: Method,
    uri: Uri,
    body: String,
) -> Response {
    let path = uri.path().to_string();
    let canned = fixture.routes.get(&path).cloned();
    fixture.requests.lock().unwrap().push(Recorded { method, path, body });

    let Some(canned) = canned else {
        return (StatusCode::NOT_FOUND, "{}").into_response();
    };
    let status = StatusCode::from_u16(canned.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, canned.content_type)], canned.body).into_response()
}
