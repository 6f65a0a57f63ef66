use crate::{
    dto::{CreateNoteRequest, NoteResponse, UpdateNoteRequest, is_truthy},
    error::AppError,
    repository::Repository,
};

use std::sync::Arc;

const CONTENT_MISSING: &str = "content missing";

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<tokio::sync::Mutex<Repository>>,
}

fn require_content(content: Option<String>) -> Result<String, AppError> {
    content
        .filter(|content| !content.is_empty())
        .ok_or_else(|| AppError::Validation(CONTENT_MISSING.to_string()))
}

impl NoteService {
    pub const fn new(repo: Arc<tokio::sync::Mutex<Repository>>) -> Self {
        Self { repo }
    }

    pub async fn create_note(&self, request: CreateNoteRequest) -> Result<NoteResponse, AppError> {
        let content = require_content(request.content)?;
        let important = is_truthy(request.important.as_ref());

        let note = self.repo.lock().await.create_note(content, important)?;
        tracing::debug!("Created note {}", note.id);

        Ok(note.into())
    }

    /// Replaces the note under `id`; the id carried in the body is ignored.
    pub async fn update_note(
        &self,
        id: i64,
        request: UpdateNoteRequest,
    ) -> Result<Option<NoteResponse>, AppError> {
        let content = require_content(request.content)?;
        let important = is_truthy(request.important.as_ref());

        if request.id.is_some_and(|body_id| body_id != id) {
            tracing::warn!(
                "Update body carries id {:?}, using path id {id}",
                request.id
            );
        }

        Ok(self
            .repo
            .lock()
            .await
            .update_note(id, content, important)
            .map(Into::into))
    }

    pub async fn delete_note(&self, id: i64) -> bool {
        let removed = self.repo.lock().await.delete_note(id);
        if !removed {
            tracing::debug!("Delete of unknown note {id} ignored");
        }

        removed
    }

    pub async fn get_one_note(&self, id: i64) -> Option<NoteResponse> {
        self.repo.lock().await.get_one_note(id).map(Into::into)
    }

    pub async fn get_all_notes(&self) -> Vec<NoteResponse> {
        self.repo
            .lock()
            .await
            .get_all_notes()
            .into_iter()
            .map(Into::into)
            .collect()
    }
}
