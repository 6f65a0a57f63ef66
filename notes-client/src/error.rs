#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Note {0} not found on server")]
    NotFound(i64),

    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Note {0} is not in local state")]
    UnknownNote(i64),

    #[error("Notes have not been loaded yet")]
    NotLoaded,
}
