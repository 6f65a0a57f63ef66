pub mod config;
pub mod error;
pub mod service;
pub mod view;

pub use error::ClientError;
pub use service::{NewNote, Note, NoteBackend, NotesService};
pub use view::{NoteView, ToggleOutcome};
