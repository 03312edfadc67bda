//! In-memory todo service.
//!
//! # Overview
//! Exposes the todo CRUD API over HTTP/JSON: list, create, update, toggle
//! and delete, plus a `/health` probe. All state lives in a [`TodoStore`]
//! owned by the router, so every instance returned by [`app`] is fully
//! isolated — nothing survives the process and tests never share state.
//!
//! # Design
//! - Handlers return `Result<_, Error>`; the error type renders the
//!   `{"error": ...}` body and status code, so every failure path has a
//!   defined response shape.
//! - Path ids are parsed leniently: a non-numeric segment becomes an id
//!   that matches no record and falls out as 404.

pub mod error;
pub mod store;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, put},
    Json, Router,
};
use serde::Deserialize;
use tokio::{net::TcpListener, sync::RwLock};

pub use error::Error;
pub use store::{Todo, TodoStore};

pub type Db = Arc<RwLock<TodoStore>>;

/// Request payload for creating a new todo.
///
/// `title` is optional at the serde level so that a missing field reaches
/// the validation in [`TodoStore::create`] and comes back as a 400 rather
/// than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CreateTodo {
    pub title: Option<String>,
}

/// Request payload for updating an existing todo. An omitted `title`
/// leaves the stored title unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(TodoStore::new()));
    Router::new()
        .route("/health", get(health))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", put(update_todo).delete(delete_todo))
        .route("/api/todos/{id}/toggle", patch(toggle_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Turn a raw path segment into a lookup id. Ids start at 1, so mapping
/// unparsable segments to 0 guarantees a miss and therefore a 404.
fn parse_id(raw: &str) -> u64 {
    raw.parse().unwrap_or(0)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(store.list())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), Error> {
    let mut store = db.write().await;
    let todo = store.create(input.title.as_deref())?;
    tracing::info!(id = todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, Error> {
    let mut store = db.write().await;
    let todo = store.update(parse_id(&id), input.title.as_deref())?;
    tracing::debug!(id = todo.id, "updated todo");
    Ok(Json(todo))
}

async fn toggle_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, Error> {
    let mut store = db.write().await;
    let todo = store.toggle(parse_id(&id))?;
    tracing::debug!(id = todo.id, completed = todo.completed, "toggled todo");
    Ok(Json(todo))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, Error> {
    let id = parse_id(&id);
    let mut store = db.write().await;
    store.delete(id)?;
    tracing::info!(id, "deleted todo");
    Ok(Json(serde_json::json!({ "message": "Todo deleted" })))
}
