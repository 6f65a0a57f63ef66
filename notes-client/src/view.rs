use rand::{Rng, rng};
use tokio::time::{Duration, Instant};

use crate::{
    error::ClientError,
    service::{NewNote, Note, NoteBackend},
};

pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone)]
struct Notification {
    message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The server accepted the change; carries the note it returned.
    Updated(Note),
    /// The update failed and the note was dropped from local state.
    Removed,
}

/// Notes to display for the given filter, in their stored order.
pub fn filter_notes(notes: &[Note], show_all: bool) -> Vec<&Note> {
    notes
        .iter()
        .filter(|note| show_all || note.important)
        .collect()
}

pub const fn importance_label(note: &Note) -> &'static str {
    if note.important {
        "make not important"
    } else {
        "make important"
    }
}

/// Client-side copy of the store, reconciled after every mutation.
pub struct NoteView<B> {
    backend: B,
    notes: Option<Vec<Note>>,
    new_note: String,
    show_all: bool,
    notification: Option<Notification>,
}

impl<B: NoteBackend> NoteView<B> {
    pub const fn new(backend: B) -> Self {
        Self {
            backend,
            notes: None,
            new_note: String::new(),
            show_all: true,
            notification: None,
        }
    }

    pub async fn load(&mut self) -> Result<(), ClientError> {
        let notes = self.backend.get_all().await?;
        tracing::info!("Loaded {} notes", notes.len());
        self.notes = Some(notes);

        Ok(())
    }

    /// `None` until the initial load has completed.
    pub fn notes(&self) -> Option<&[Note]> {
        self.notes.as_deref()
    }

    pub fn notes_to_show(&self) -> Vec<&Note> {
        self.notes
            .as_deref()
            .map(|notes| filter_notes(notes, self.show_all))
            .unwrap_or_default()
    }

    pub const fn show_all(&self) -> bool {
        self.show_all
    }

    pub const fn toggle_show_all(&mut self) {
        self.show_all = !self.show_all;
    }

    pub fn new_note(&self) -> &str {
        &self.new_note
    }

    pub fn set_new_note(&mut self, content: impl Into<String>) {
        self.new_note = content.into();
    }

    /// The current message, if it has not expired yet.
    pub fn notification(&self) -> Option<&str> {
        self.notification
            .as_ref()
            .filter(|n| Instant::now() < n.expires_at)
            .map(|n| n.message.as_str())
    }

    fn notify(&mut self, message: String) {
        self.notification = Some(Notification {
            message,
            expires_at: Instant::now() + NOTIFICATION_TIMEOUT,
        });
    }

    pub async fn toggle_importance(&mut self, id: i64) -> Result<ToggleOutcome, ClientError> {
        let note = self
            .notes
            .as_deref()
            .ok_or(ClientError::NotLoaded)?
            .iter()
            .find(|note| note.id == id)
            .cloned()
            .ok_or(ClientError::UnknownNote(id))?;

        let changed = Note {
            important: !note.important,
            ..note.clone()
        };

        match self.backend.update(id, &changed).await {
            Ok(returned) => {
                if let Some(local) = self
                    .notes
                    .as_mut()
                    .and_then(|notes| notes.iter_mut().find(|n| n.id == id))
                {
                    *local = returned.clone();
                }

                Ok(ToggleOutcome::Updated(returned))
            }
            Err(e) => {
                if matches!(e, ClientError::NotFound(_)) {
                    tracing::warn!("Note {id} is gone from server, dropping it");
                } else {
                    tracing::error!("Update of note {id} failed, dropping it: {e}");
                }

                self.notify(format!(
                    "Note '{}' was already removed from server",
                    note.content
                ));
                if let Some(notes) = self.notes.as_mut() {
                    notes.retain(|n| n.id != id);
                }

                Ok(ToggleOutcome::Removed)
            }
        }
    }

    /// Sends the input as a new note. On failure, notes and input are unchanged.
    pub async fn add_note(&mut self) -> Result<Note, ClientError> {
        let count = self.notes.as_ref().ok_or(ClientError::NotLoaded)?.len();

        let candidate = NewNote {
            content: self.new_note.clone(),
            important: rng().random_bool(0.5),
            id: i64::try_from(count).map_or(i64::MAX, |count| count.saturating_add(1)),
        };

        let returned = self.backend.create(&candidate).await?;
        if returned.id != candidate.id {
            tracing::debug!(
                "Server assigned id {} instead of placeholder {}",
                returned.id,
                candidate.id
            );
        }

        if let Some(notes) = self.notes.as_mut() {
            notes.push(returned.clone());
        }
        self.new_note.clear();

        Ok(returned)
    }

    /// Text rendering of the page, `None` before the initial load.
    pub fn render(&self) -> Option<String> {
        self.notes.as_ref()?;

        let mut lines = vec!["Notes".to_string()];
        if let Some(message) = self.notification() {
            lines.push(format!("! {message}"));
        }
        lines.push(format!(
            "[show {}]",
            if self.show_all { "important" } else { "all" }
        ));
        lines.extend(
            self.notes_to_show()
                .into_iter()
                .map(|note| format!("- {} [{}]", note.content, importance_label(note))),
        );

        let mut out = lines.join("\n");
        out.push('\n');

        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{collections::VecDeque, sync::Mutex};

    #[derive(Default)]
    struct FakeBackend {
        notes: Vec<Note>,
        updates: Mutex<VecDeque<Result<Note, ClientError>>>,
        creates: Mutex<VecDeque<Result<Note, ClientError>>>,
        sent: Mutex<Vec<NewNote>>,
    }

    impl FakeBackend {
        fn with_notes(notes: Vec<Note>) -> Self {
            Self {
                notes,
                ..Self::default()
            }
        }

        fn on_update(self, result: Result<Note, ClientError>) -> Self {
            self.updates.lock().unwrap().push_back(result);
            self
        }

        fn on_create(self, result: Result<Note, ClientError>) -> Self {
            self.creates.lock().unwrap().push_back(result);
            self
        }
    }

    impl NoteBackend for FakeBackend {
        async fn get_all(&self) -> Result<Vec<Note>, ClientError> {
            Ok(self.notes.clone())
        }

        async fn create(&self, note: &NewNote) -> Result<Note, ClientError> {
            self.sent.lock().unwrap().push(note.clone());
            self.creates
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected create")
        }

        async fn update(&self, _id: i64, _note: &Note) -> Result<Note, ClientError> {
            self.updates
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected update")
        }
    }

    fn note(id: i64, content: &str, important: bool) -> Note {
        Note {
            id,
            content: content.to_string(),
            important,
        }
    }

    async fn loaded(backend: FakeBackend) -> NoteView<FakeBackend> {
        let mut view = NoteView::new(backend);
        view.load().await.unwrap();
        view
    }

    #[test]
    fn filter_keeps_important_notes_in_order() {
        let notes = vec![
            note(1, "a", true),
            note(2, "b", false),
            note(3, "c", true),
            note(4, "d", false),
        ];

        let ids: Vec<i64> = filter_notes(&notes, false).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(filter_notes(&notes, true).len(), 4);
    }

    #[test]
    fn label_reflects_importance() {
        assert_eq!(importance_label(&note(1, "a", true)), "make not important");
        assert_eq!(importance_label(&note(1, "a", false)), "make important");
    }

    #[tokio::test]
    async fn nothing_renders_before_load() {
        let mut view = NoteView::new(FakeBackend::with_notes(vec![note(1, "a", false)]));

        assert!(view.notes().is_none());
        assert!(view.render().is_none());
        assert!(view.notes_to_show().is_empty());

        view.load().await.unwrap();
        assert_eq!(
            view.render().unwrap(),
            "Notes\n[show important]\n- a [make important]\n"
        );
    }

    #[tokio::test]
    async fn successful_toggle_takes_server_note() {
        let backend = FakeBackend::with_notes(vec![note(1, "a", false), note(2, "b", false)])
            .on_update(Ok(note(1, "a", true)));
        let mut view = loaded(backend).await;

        let outcome = view.toggle_importance(1).await.unwrap();

        assert_eq!(outcome, ToggleOutcome::Updated(note(1, "a", true)));
        assert_eq!(
            view.notes().unwrap(),
            &[note(1, "a", true), note(2, "b", false)]
        );
        assert!(view.notification().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_toggle_removes_note_and_notifies_for_five_seconds() {
        let backend = FakeBackend::with_notes(vec![note(1, "HTML is easy", false)])
            .on_update(Err(ClientError::NotFound(1)));
        let mut view = loaded(backend).await;

        let outcome = view.toggle_importance(1).await.unwrap();

        assert_eq!(outcome, ToggleOutcome::Removed);
        assert!(view.notes().unwrap().is_empty());
        assert_eq!(
            view.notification(),
            Some("Note 'HTML is easy' was already removed from server")
        );
        assert_eq!(
            view.render().unwrap(),
            "Notes\n! Note 'HTML is easy' was already removed from server\n[show important]\n"
        );

        tokio::time::advance(Duration::from_millis(4999)).await;
        assert!(view.notification().is_some());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(view.notification().is_none());
    }

    #[tokio::test]
    async fn any_update_failure_is_treated_as_removal() {
        let backend = FakeBackend::with_notes(vec![note(1, "a", false), note(2, "b", true)])
            .on_update(Err(ClientError::Status(500)));
        let mut view = loaded(backend).await;

        assert_eq!(
            view.toggle_importance(2).await.unwrap(),
            ToggleOutcome::Removed
        );
        assert_eq!(view.notes().unwrap(), &[note(1, "a", false)]);
    }

    #[tokio::test]
    async fn toggle_of_unknown_note_is_an_error() {
        let mut view = loaded(FakeBackend::with_notes(vec![note(1, "a", false)])).await;

        let err = view.toggle_importance(7).await.unwrap_err();

        assert!(matches!(err, ClientError::UnknownNote(7)));
        assert_eq!(view.notes().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn add_note_appends_server_note_and_clears_input() {
        let backend = FakeBackend::with_notes(vec![note(1, "a", false), note(3, "c", true)])
            .on_create(Ok(note(4, "fresh", false)));
        let mut view = loaded(backend).await;
        view.set_new_note("fresh");

        let created = view.add_note().await.unwrap();

        assert_eq!(created, note(4, "fresh", false));
        assert_eq!(view.notes().unwrap().last(), Some(&note(4, "fresh", false)));
        assert_eq!(view.new_note(), "");

        let sent = view.backend.sent.lock().unwrap();
        assert_eq!(sent[0].content, "fresh");
        assert_eq!(sent[0].id, 3);
    }

    #[tokio::test]
    async fn failed_add_keeps_state_and_input() {
        let backend = FakeBackend::with_notes(vec![note(1, "a", false)])
            .on_create(Err(ClientError::Status(400)));
        let mut view = loaded(backend).await;
        view.set_new_note("draft");

        let err = view.add_note().await.unwrap_err();

        assert!(matches!(err, ClientError::Status(400)));
        assert_eq!(view.notes().unwrap().len(), 1);
        assert_eq!(view.new_note(), "draft");
    }

    #[tokio::test]
    async fn show_all_toggle_filters_without_backend_calls() {
        let mut view = loaded(FakeBackend::with_notes(vec![
            note(1, "a", true),
            note(2, "b", false),
        ]))
        .await;

        view.toggle_show_all();

        assert!(!view.show_all());
        assert_eq!(view.notes_to_show(), vec![&note(1, "a", true)]);
        assert_eq!(
            view.render().unwrap(),
            "Notes\n[show all]\n- a [make not important]\n"
        );
    }
}
