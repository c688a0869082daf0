//! State behind the todo page.
//!
//! `TodoListView` keeps the last list the server returned plus the text in
//! the "new task" input. The list is only a read cache: every mutation is
//! followed by a fresh `refresh`, and nothing is patched locally.
//!
//! Like `TodoClient`, the view never performs I/O. Methods that talk to the
//! server return an `HttpRequest`; the matching `apply_*` method takes the
//! response.

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Todo, UpdateTodo};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

#[derive(Debug, Clone)]
pub struct TodoListView {
    client: TodoClient,
    todos: Vec<Todo>,
    draft: String,
}

impl TodoListView {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            todos: Vec::new(),
            draft: String::new(),
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    pub fn refresh(&self) -> HttpRequest {
        self.client.build_list_todos()
    }

    /// On failure the previously displayed list stays as it was.
    pub fn apply_list(&mut self, response: HttpResponse) -> Result<(), ApiError> {
        self.todos = self.client.parse_list_todos(response)?;
        Ok(())
    }

    /// `None` when the draft is blank after trimming. The title is sent as
    /// typed, untrimmed.
    pub fn submit_draft(&self) -> Result<Option<HttpRequest>, ApiError> {
        if self.draft.trim().is_empty() {
            return Ok(None);
        }
        let input = CreateTodo {
            title: self.draft.clone(),
        };
        self.client.build_create_todo(&input).map(Some)
    }

    /// Clears the draft only when the server accepted it.
    pub fn apply_created(&mut self, response: HttpResponse) -> Result<Todo, ApiError> {
        let todo = self.client.parse_create_todo(response)?;
        self.draft.clear();
        Ok(todo)
    }

    pub fn toggle(&self, todo: &Todo) -> Result<HttpRequest, ApiError> {
        let changes = UpdateTodo {
            completed: Some(!todo.completed),
            ..Default::default()
        };
        self.client.build_update_todo(todo.id, &changes)
    }

    pub fn remove(&self, todo: &Todo) -> HttpRequest {
        self.client.build_delete_todo(todo.id)
    }

    pub fn stats(&self) -> TodoStats {
        let completed = self.todos.iter().filter(|t| t.completed).count();
        TodoStats {
            total: self.todos.len(),
            completed,
            pending: self.todos.len() - completed,
        }
    }
}
