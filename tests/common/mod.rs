//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::convert::Infallible;
use std::fmt;
use std::future::{ready, Ready};
use std::net::SocketAddr;
use std::sync::Mutex;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::Request;
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;
use tower::Service;

use exception_gateway::observability::Logger;
use exception_gateway::{BypassExt, GatewayConfig, GatewayServer, HandlerRegisterer, PLUGIN_NAME};

/// Templates used throughout the end-to-end scenarios.
pub const TEMPLATES: [&str; 2] = ["/v1/profile/{accid}/setpassword", "/v1/login"];

/// Host extra config holding only the plugin section.
pub fn extra_config(section: Value) -> Map<String, Value> {
    let mut extra = Map::new();
    extra.insert(PLUGIN_NAME.to_string(), section);
    extra
}

/// Extra config with the given exception list and default dialect.
pub fn exceptions(list: Value) -> Map<String, Value> {
    extra_config(json!({ "exceptions": list }))
}

/// Build a request with an empty body.
pub fn request(path: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

/// Inner service answering with the bypass flag it received.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlagEcho;

impl Service<Request<Body>> for FlagEcho {
    type Response = bool;
    type Error = Infallible;
    type Future = Ready<Result<bool, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        ready(Ok(req.bypass_validation()))
    }
}

/// Logger keeping every line it is given, prefixed with its level.
#[derive(Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    fn push(&self, level: &str, message: fmt::Arguments<'_>) {
        self.lines.lock().unwrap().push(format!("{} {}", level, message));
    }
}

impl Logger for RecordingLogger {
    fn debug(&self, message: fmt::Arguments<'_>) {
        self.push("DEBUG", message);
    }
    fn info(&self, message: fmt::Arguments<'_>) {
        self.push("INFO", message);
    }
    fn warning(&self, message: fmt::Arguments<'_>) {
        self.push("WARNING", message);
    }
    fn error(&self, message: fmt::Arguments<'_>) {
        self.push("ERROR", message);
    }
    fn critical(&self, message: fmt::Arguments<'_>) {
        self.push("CRITICAL", message);
    }
    fn fatal(&self, message: fmt::Arguments<'_>) {
        self.push("FATAL", message);
    }
}

/// Start the gateway on an ephemeral port and return its address.
pub async fn start_gateway(mut config: GatewayConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let server = GatewayServer::new(config, &HandlerRegisterer::new());
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    addr
}
