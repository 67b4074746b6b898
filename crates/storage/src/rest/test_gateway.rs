//! In-process stand-in for the store's REST gateway.
//!
//! Serves a scripted axum router on an ephemeral port from its own runtime
//! and records every request line, so blocking client tests can assert on
//! what reached the gateway.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::runtime::Runtime;

use super::RestConnection;

pub(crate) struct TestGateway {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    _runtime: Runtime,
}

impl TestGateway {
    /// Serve the router built by `routes`, which receives the base URL.
    pub fn start(routes: impl FnOnce(&str) -> Router) -> Self {
        let runtime = Runtime::new().expect("test runtime");
        let listener = runtime
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .expect("bind test gateway");
        let base_url = format!("http://{}", listener.local_addr().expect("local addr"));

        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);
        let router = routes(&base_url).layer(middleware::from_fn(move |req: Request, next: Next| {
            log.lock().push(format!("{} {}", req.method(), req.uri().path()));
            next.run(req)
        }));

        runtime.spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            base_url,
            requests,
            _runtime: runtime,
        }
    }

    pub fn connection(&self) -> RestConnection {
        RestConnection::new(self.base_url.clone(), Duration::from_secs(5))
    }

    /// Request lines received so far, e.g. `GET /t1/schema`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    pub fn count(&self, line: &str) -> usize {
        self.requests().iter().filter(|r| *r == line).count()
    }
}

/// Cell set body with one entry per `(row, "family:qualifier", value)`.
///
/// Consecutive cells of the same row share a row entry.
pub(crate) fn cell_set(cells: &[(&str, &str, &str)]) -> Value {
    let mut rows: Vec<(String, Vec<Value>)> = Vec::new();
    for (row, column, value) in cells {
        let cell = json!({
            "column": STANDARD.encode(column),
            "$": STANDARD.encode(value),
        });
        match rows.last_mut() {
            Some((key, row_cells)) if key.as_str() == *row => row_cells.push(cell),
            _ => rows.push((row.to_string(), vec![cell])),
        }
    }

    let rows: Vec<Value> = rows
        .into_iter()
        .map(|(key, row_cells)| json!({ "key": STANDARD.encode(key), "Cell": row_cells }))
        .collect();
    json!({ "Row": rows })
}

/// Schema body declaring `families`.
pub(crate) fn schema(table: &str, families: &[&str]) -> Value {
    let columns: Vec<Value> = families.iter().map(|f| json!({ "name": f })).collect();
    json!({ "name": table, "ColumnSchema": columns })
}
