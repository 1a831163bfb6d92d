//! In-process stand-in for the range API, served by axum on its own runtime
//! thread so both blocking and async clients can talk to it.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

use axum::Router;
use axum::extract::State;
use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use tokio::sync::oneshot;
use tracing_subscriber::EnvFilter;

/// Uppercase SHA1 hashes mapped to fake breach counts.
pub const PASSWORDS: &[(&str, u64)] = &[
    ("36E618512A68721F032470BB0891ADEF3362CFA9", 23), // p@ssword
    ("36E61AAAABBBBCCCCDDDDEEEEFFFFGGGGHHHHIII", 526), // same prefix as p@ssword
    ("D50F3D3D525303997D705F86CD80182365F964ED", 3), // drowssap
    ("E01C66B9CC16930797BF7E13BEF6B05997370B2C", 1), // m3atba11
];

#[derive(Debug, Clone)]
pub enum Behavior {
    /// Answer with the PASSWORDS records sharing the requested prefix.
    Serve,
    /// Like `Serve`, with the suffixes lowercased.
    ServeLowercase,
    /// Always answer 429 with this retry-after value.
    RateLimit(&'static str),
    /// Always answer with this status and an empty body.
    Status(StatusCode),
    /// Always answer 200 with this body.
    Body(&'static str),
}

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub query: Option<String>,
    pub padding: Option<String>,
    pub user_agent: Option<String>,
}

struct ServerState {
    behavior: Behavior,
    seen: Mutex<Vec<SeenRequest>>,
}

pub struct FakeRangeServer {
    pub url: String,
    state: Arc<ServerState>,
    _shutdown: oneshot::Sender<()>,
}

impl FakeRangeServer {
    pub fn start(behavior: Behavior) -> Self {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
        listener.set_nonblocking(true).expect("nonblocking should succeed");
        let addr = listener.local_addr().expect("listener has an address");

        let state = Arc::new(ServerState { behavior, seen: Mutex::new(Vec::new()) });
        let router = Router::new().fallback(serve_range).with_state(Arc::clone(&state));
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("runtime should build");

            runtime.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("listener should convert");
                axum::serve(listener, router)
                    .with_graceful_shutdown(async {
                        let _ = shutdown_rx.await;
                    })
                    .await
                    .ok();
            });
        });

        Self { url: format!("http://{addr}"), state, _shutdown: shutdown_tx }
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.state.seen.lock().unwrap().clone()
    }
}

async fn serve_range(
    State(state): State<Arc<ServerState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
    state.seen.lock().unwrap().push(SeenRequest {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        padding: header("add-padding"),
        user_agent: header("user-agent"),
    });

    match &state.behavior {
        Behavior::Serve => range_body(uri.path(), false).into_response(),
        Behavior::ServeLowercase => range_body(uri.path(), true).into_response(),
        Behavior::RateLimit(retry_after) => {
            (StatusCode::TOO_MANY_REQUESTS, [(RETRY_AFTER, *retry_after)]).into_response()
        }
        Behavior::Status(status) => (*status).into_response(),
        Behavior::Body(body) => (*body).into_response(),
    }
}

fn range_body(path: &str, lowercase: bool) -> String {
    let prefix = path.trim_start_matches('/').to_ascii_uppercase();

    let mut body = String::new();
    for (hash, count) in PASSWORDS {
        if hash[..5] != prefix {
            continue;
        }
        let suffix =
            if lowercase { hash[5..].to_ascii_lowercase() } else { hash[5..].to_string() };
        body.push_str(&format!("{suffix}:{count}\r\n"));
    }
    body
}

/// Serves every connection a 200 that advertises a 5000-byte body, sends only
/// `body` and then closes the socket. Returns the base URL.
pub fn start_truncating_server(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
    let addr = listener.local_addr().expect("listener has an address");

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }

            let head = "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 5000\r\n\r\n";
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(body.as_bytes());
            let _ = stream.flush();
        }
    });

    format!("http://{addr}")
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
