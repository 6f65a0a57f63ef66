use crate::models::Note;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("no note id left after {0}")]
    IdSpaceExhausted(i64),
}

/// In-memory note collection, kept in insertion order.
#[derive(Debug, Default)]
pub struct Repository {
    notes: Vec<Note>,
}

impl Repository {
    pub const fn new() -> Self {
        Self { notes: Vec::new() }
    }

    /// The collection every process starts with.
    pub fn seeded() -> Self {
        let seed = [
            (1, "HTML is easy", true),
            (2, "Browser can execute only JavaScript", false),
            (
                3,
                "GET and POST are the most important methods of HTTP protocol",
                true,
            ),
        ];

        let notes = seed
            .into_iter()
            .map(|(id, content, important)| Note {
                id,
                content: content.to_string(),
                important,
            })
            .collect();

        tracing::debug!("Seeded repository with 3 notes");

        Self { notes }
    }

    fn next_id(&self) -> Result<i64, RepositoryError> {
        let max_id = self.notes.iter().map(|note| note.id).max().unwrap_or(0);

        max_id
            .checked_add(1)
            .ok_or(RepositoryError::IdSpaceExhausted(max_id))
    }

    pub fn create_note(&mut self, content: String, important: bool) -> Result<Note, RepositoryError> {
        let note = Note {
            id: self.next_id()?,
            content,
            important,
        };

        self.notes.push(note.clone());

        Ok(note)
    }

    /// Replaces content and importance in place, keeping the note's position.
    pub fn update_note(&mut self, id: i64, content: String, important: bool) -> Option<Note> {
        let note = self.notes.iter_mut().find(|note| note.id == id)?;

        note.content = content;
        note.important = important;

        Some(note.clone())
    }

    /// Returns whether a note was actually removed.
    pub fn delete_note(&mut self, id: i64) -> bool {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);

        self.notes.len() != before
    }

    pub fn get_one_note(&self, id: i64) -> Option<Note> {
        self.notes.iter().find(|note| note.id == id).cloned()
    }

    pub fn get_all_notes(&self) -> Vec<Note> {
        self.notes.clone()
    }
}
