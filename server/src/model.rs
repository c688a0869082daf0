use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted todo row, serialized with camelCase keys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// `title` is optional here so a missing field reaches validation instead of
/// failing deserialization.
#[derive(Debug, Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn todo_serializes_with_camel_case_keys() {
        let todo = Todo {
            id: 7,
            title: "Test".to_string(),
            completed: false,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Test");
        assert_eq!(json["completed"], false);
        assert_eq!(json["createdAt"], "2024-05-01T12:00:00Z");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn create_todo_tolerates_missing_title() {
        let input: CreateTodo = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.title.is_none());
    }

    #[test]
    fn create_todo_treats_null_title_as_missing() {
        let input: CreateTodo = serde_json::from_str(r#"{"title":null}"#).unwrap();
        assert!(input.title.is_none());
    }

    #[test]
    fn update_todo_all_fields_optional() {
        let input: UpdateTodo = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.is_empty());
    }

    #[test]
    fn update_todo_keeps_explicit_false() {
        let input: UpdateTodo = serde_json::from_str(r#"{"completed":false}"#).unwrap();
        assert_eq!(input.completed, Some(false));
        assert!(input.title.is_none());
        assert!(!input.is_empty());
    }
}
