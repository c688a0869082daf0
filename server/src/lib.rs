//! HTTP service for the todo list.
//!
//! Routes:
//! - `GET    /todos`       list, newest first
//! - `POST   /todos`       create
//! - `GET    /todos/{id}`  fetch one
//! - `POST   /todos/{id}`  partial update
//! - `DELETE /todos/{id}`  delete

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod store;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::ApiError;
pub use model::Todo;
pub use store::TodoStore;

use handlers::{create_todo, delete_todo, get_todo, list_todos, update_todo};

pub fn app(store: TodoStore) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).post(update_todo).delete(delete_todo),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

pub async fn run(listener: TcpListener, store: TodoStore) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store)).await
}

/// Like [`run`], but returns once `shutdown` resolves and in-flight requests
/// have finished.
pub async fn run_until<F>(
    listener: TcpListener,
    store: TodoStore,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown)
        .await
}
