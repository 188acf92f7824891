use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

/// In-memory REST backend with json-server conventions: numeric ids,
/// `?field=value` equality filters, 404 for unknown records.
#[derive(Default)]
pub struct MockBackend {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    next_id: AtomicU64,
    offline: AtomicBool,
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn has_id(record: &Value, id: &str) -> bool {
    record.get("id").map(as_text).as_deref() == Some(id)
}

#[allow(dead_code)]
impl MockBackend {
    /// Stores a record directly, bypassing the HTTP surface. Returns it with its id.
    pub fn seed(&self, collection: &str, mut record: Value) -> Value {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        record["id"] = json!(id);
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(record.clone());
        record
    }

    pub fn records(&self, collection: &str) -> Vec<Value> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn is_offline(&self) -> bool {
        self.offline.load(Ordering::SeqCst)
    }
}

type Shared = Arc<MockBackend>;

fn unavailable() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, "backend offline").into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({}))).into_response()
}

async fn list(
    State(backend): State<Shared>,
    Path(collection): Path<String>,
    Query(filters): Query<HashMap<String, String>>,
) -> Response {
    if backend.is_offline() {
        return unavailable();
    }
    let records: Vec<Value> = backend
        .records(&collection)
        .into_iter()
        .filter(|record| {
            filters
                .iter()
                .all(|(field, value)| record.get(field).map(as_text).as_deref() == Some(value))
        })
        .collect();
    Json(records).into_response()
}

async fn create(
    State(backend): State<Shared>,
    Path(collection): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if backend.is_offline() {
        return unavailable();
    }
    (StatusCode::CREATED, Json(backend.seed(&collection, body))).into_response()
}

async fn get_one(
    State(backend): State<Shared>,
    Path((collection, id)): Path<(String, String)>,
) -> Response {
    if backend.is_offline() {
        return unavailable();
    }
    match backend
        .records(&collection)
        .into_iter()
        .find(|r| has_id(r, &id))
    {
        Some(record) => Json(record).into_response(),
        None => not_found(),
    }
}

fn modify(backend: &MockBackend, collection: &str, id: &str, body: Value, merge: bool) -> Response {
    if backend.is_offline() {
        return unavailable();
    }
    let mut collections = backend.collections.lock().unwrap();
    let Some(record) = collections
        .get_mut(collection)
        .and_then(|records| records.iter_mut().find(|r| has_id(r, id)))
    else {
        return not_found();
    };

    let record_id = record["id"].clone();
    match body {
        Value::Object(changes) if merge && record.is_object() => {
            for (key, value) in changes {
                record[key.as_str()] = value;
            }
        }
        body => *record = body,
    }
    record["id"] = record_id;
    Json(record.clone()).into_response()
}

async fn replace(
    State(backend): State<Shared>,
    Path((collection, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    modify(&backend, &collection, &id, body, false)
}

async fn patch(
    State(backend): State<Shared>,
    Path((collection, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    modify(&backend, &collection, &id, body, true)
}

async fn remove(
    State(backend): State<Shared>,
    Path((collection, id)): Path<(String, String)>,
) -> Response {
    if backend.is_offline() {
        return unavailable();
    }
    let mut collections = backend.collections.lock().unwrap();
    let Some(records) = collections.get_mut(&collection) else {
        return not_found();
    };
    let before = records.len();
    records.retain(|r| !has_id(r, &id));
    if records.len() == before {
        return not_found();
    }
    Json(json!({})).into_response()
}

/// Serves a fresh backend on a random local port.
pub async fn spawn_mock_backend() -> (Arc<MockBackend>, String) {
    let backend = Arc::new(MockBackend::default());
    let router = Router::new()
        .route("/:collection", get(list).post(create))
        .route(
            "/:collection/:id",
            get(get_one).put(replace).patch(patch).delete(remove),
        )
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (backend, format!("http://{addr}"))
}
