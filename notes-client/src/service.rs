use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};

use std::future::Future;

use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub content: String,
    pub important: bool,
}

/// A note that has not been accepted by the server yet. `id` and
/// `important` are placeholders; only the server's answer is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    pub content: String,
    pub important: bool,
    pub id: i64,
}

/// Remote side of the note view.
pub trait NoteBackend {
    fn get_all(&self) -> impl Future<Output = Result<Vec<Note>, ClientError>> + Send;

    fn create(&self, note: &NewNote) -> impl Future<Output = Result<Note, ClientError>> + Send;

    fn update(
        &self,
        id: i64,
        note: &Note,
    ) -> impl Future<Output = Result<Note, ClientError>> + Send;
}

#[derive(Debug, Clone)]
pub struct NotesService {
    client: reqwest::Client,
    base_url: String,
}

impl NotesService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn note_url(&self, id: i64) -> String {
        format!("{}/{id}", self.base_url)
    }
}

fn check_status(response: Response, id: Option<i64>) -> Result<Response, ClientError> {
    let status = response.status();

    match (status, id) {
        (StatusCode::NOT_FOUND, Some(id)) => Err(ClientError::NotFound(id)),
        (status, _) if !status.is_success() => Err(ClientError::Status(status.as_u16())),
        _ => Ok(response),
    }
}

impl NoteBackend for NotesService {
    async fn get_all(&self) -> Result<Vec<Note>, ClientError> {
        tracing::debug!("GET {}", self.base_url);
        let response = self.client.get(&self.base_url).send().await?;

        Ok(check_status(response, None)?.json().await?)
    }

    async fn create(&self, note: &NewNote) -> Result<Note, ClientError> {
        tracing::debug!("POST {}", self.base_url);
        let response = self.client.post(&self.base_url).json(note).send().await?;

        Ok(check_status(response, None)?.json().await?)
    }

    async fn update(&self, id: i64, note: &Note) -> Result<Note, ClientError> {
        let url = self.note_url(id);
        tracing::debug!("PUT {url}");
        let response = self.client.put(&url).json(note).send().await?;

        Ok(check_status(response, Some(id))?.json().await?)
    }
}
