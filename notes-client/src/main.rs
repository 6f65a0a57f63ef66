use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use notes_client::{NoteView, NotesService, ToggleOutcome, config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log setup
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "notes_client=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = config::load_config()?;
    let mut view = NoteView::new(NotesService::new(cfg.notes_api_url.clone()));

    // Initial load
    view.load().await?;
    println!("Connected to notes server at {}\n", cfg.notes_api_url);
    if let Some(page) = view.render() {
        println!("{page}");
    }

    // Add note
    let content = std::env::args()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");
    if content.is_empty() {
        println!("No note content given, skipping creation\n");
    } else {
        view.set_new_note(content);
        let created = view.add_note().await?;
        println!("Created note {}: {}\n", created.id, created.content);
    }

    // Toggle importance of the first note
    if let Some(id) = view.notes().and_then(|notes| notes.first()).map(|note| note.id) {
        match view.toggle_importance(id).await? {
            ToggleOutcome::Updated(note) => {
                println!("Note {} is now important: {}\n", note.id, note.important);
            }
            ToggleOutcome::Removed => println!("Note {id} was removed\n"),
        }
    }

    // Important notes only
    view.toggle_show_all();
    if let Some(page) = view.render() {
        println!("{page}");
    }

    Ok(())
}
