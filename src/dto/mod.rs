use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::models::Note;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NoteResponse {
    /// Note ID
    pub id: i64,
    /// Note content
    pub content: String,
    /// Whether the note is marked as important
    pub important: bool,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            content: note.content,
            important: note.important,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    /// Note content, must not be empty
    #[serde(default)]
    pub content: Option<String>,
    /// Any truthy value marks the note important, defaults to `false`
    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub important: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    /// Ignored, the path parameter identifies the note
    #[serde(default)]
    pub id: Option<i64>,
    /// Note content, must not be empty
    #[serde(default)]
    pub content: Option<String>,
    /// Any truthy value marks the note important, defaults to `false`
    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub important: Option<Value>,
}

/// Truthiness of a loosely typed JSON flag: `null`, `false`, `0`, `""`
/// and absence are false, everything else is true.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable reason
    pub error: String,
}
