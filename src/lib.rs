pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

use axum::{Router, routing::get};

use std::sync::Arc;

use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use handlers::rest;
use repository::Repository;
use service::NoteService;

/// A service over the seeded in-memory repository.
pub fn seeded_service() -> Arc<NoteService> {
    let repo_ptr = Arc::new(tokio::sync::Mutex::new(Repository::seeded()));

    Arc::new(NoteService::new(repo_ptr))
}

pub fn app(service: Arc<NoteService>) -> Router {
    let notes_router = Router::new()
        .route(
            "/notes",
            get(rest::get_all_notes).post(rest::create_note),
        )
        .route(
            "/notes/{id}",
            get(rest::get_one_note)
                .put(rest::update_note)
                .delete(rest::delete_note),
        );

    Router::new()
        .route("/", get(rest::root))
        .nest("/api", notes_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .with_state(service)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(error::panic_response))
}
