mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::service::NoteService;

pub fn create_router(service: NoteService) -> Router {
    let api = Router::new()
        // Catalog
        .route("/subjects", get(handlers::list_subjects))
        .route("/subjects/{id}/chapters", get(handlers::list_subject_chapters))
        .route("/chapters", get(handlers::search_chapters))
        .route("/chapters/{id}", get(handlers::get_chapter))
        // Notes
        .route(
            "/chapters/{id}/note",
            get(handlers::get_note).delete(handlers::forget_note),
        )
        .route("/chapters/{id}/note/regenerate", post(handlers::regenerate_note))
        // Bookmarks
        .route("/bookmarks", get(handlers::list_bookmarks))
        .route("/bookmarks/{id}", post(handlers::toggle_bookmark))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}
