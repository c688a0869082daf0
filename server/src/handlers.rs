use axum::{
    extract::{rejection::JsonRejection, FromRequestParts, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::model::{CreateTodo, Message, Todo, UpdateTodo};
use crate::store::TodoStore;

/// `axum::extract::Path` with rejections reported as `ApiError`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);

pub async fn list_todos(State(store): State<TodoStore>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = store
        .list()
        .await
        .map_err(ApiError::store("Failed to fetch todos"))?;
    debug!(count = todos.len(), "listed todos");
    Ok(Json(todos))
}

/// Whitespace-only titles pass; only a missing or empty title is rejected.
pub async fn create_todo(
    State(store): State<TodoStore>,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(input) = payload.map_err(ApiError::body("Failed to create todo"))?;
    let title = match input.title {
        Some(title) if !title.is_empty() => title,
        _ => return Err(ApiError::Validation("Title is required".to_string())),
    };
    let todo = store
        .create(&title)
        .await
        .map_err(ApiError::store("Failed to create todo"))?;
    info!(id = todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn get_todo(
    State(store): State<TodoStore>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Todo>, ApiError> {
    store
        .get(id)
        .await
        .map_err(ApiError::store("Failed to fetch todo"))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn update_todo(
    State(store): State<TodoStore>,
    AppPath(id): AppPath<i64>,
    payload: Result<Json<UpdateTodo>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Json(changes) = payload.map_err(ApiError::body("Failed to update todo"))?;
    let todo = store
        .update(id, &changes)
        .await
        .map_err(ApiError::store("Failed to update todo"))?
        .ok_or(ApiError::NotFound)?;
    info!(id, completed = todo.completed, "updated todo");
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(store): State<TodoStore>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Message>, ApiError> {
    let deleted = store
        .delete(id)
        .await
        .map_err(ApiError::store("Failed to delete todo"))?;
    if !deleted {
        return Err(ApiError::NotFound);
    }
    info!(id, "deleted todo");
    Ok(Json(Message {
        message: "Todo deleted".to_string(),
    }))
}
