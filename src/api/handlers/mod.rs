use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::models::*;
use crate::service::NoteService;

type ApiError = (StatusCode, String);

fn chapter_not_found(id: &str) -> ApiError {
    tracing::warn!("Unknown chapter requested: {}", id);
    (StatusCode::NOT_FOUND, "Chapter not found".to_string())
}

fn find_chapter(id: &str) -> Result<&'static Chapter, ApiError> {
    catalog::chapter(id).ok_or_else(|| chapter_not_found(id))
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Catalog
// ============================================================

pub async fn list_subjects() -> Json<&'static [Subject]> {
    Json(catalog::subjects())
}

pub async fn list_subject_chapters(
    Path(id): Path<String>,
) -> Result<Json<Vec<&'static Chapter>>, ApiError> {
    let subject = catalog::subject_by_tag(&id)
        .ok_or((StatusCode::NOT_FOUND, "Subject not found".to_string()))?;
    Ok(Json(catalog::chapters_for(subject.id)))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

pub async fn search_chapters(Query(query): Query<SearchQuery>) -> Json<Vec<&'static Chapter>> {
    Json(catalog::search(query.q.as_deref().unwrap_or("")))
}

pub async fn get_chapter(
    State(service): State<NoteService>,
    Path(id): Path<String>,
) -> Result<Json<ChapterStatus>, ApiError> {
    let chapter = find_chapter(&id)?;
    let cache = service.cache();
    let note = cache.get_note(chapter.id);
    Ok(Json(ChapterStatus {
        chapter: chapter.clone(),
        bookmarked: cache.is_bookmarked(chapter.id),
        cached: note.is_some(),
        last_updated: note.as_ref().and_then(CachedNote::updated_at),
    }))
}

// ============================================================
// Notes
// ============================================================

pub async fn get_note(
    State(service): State<NoteService>,
    Path(id): Path<String>,
) -> Result<Json<ResolvedNote>, ApiError> {
    let chapter = find_chapter(&id)?;
    Ok(Json(service.resolve_note(chapter).await))
}

pub async fn regenerate_note(
    State(service): State<NoteService>,
    Path(id): Path<String>,
) -> Result<Json<ResolvedNote>, ApiError> {
    let chapter = find_chapter(&id)?;
    Ok(Json(service.regenerate(chapter).await))
}

pub async fn forget_note(
    State(service): State<NoteService>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let chapter = find_chapter(&id)?;
    if service.cache().remove_note(chapter.id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "No cached note".to_string()))
    }
}

// ============================================================
// Bookmarks
// ============================================================

#[derive(Debug, Serialize)]
pub struct BookmarkList {
    /// Bookmarked ids in the order they were added.
    pub ids: Vec<String>,
    /// Catalog chapters for those ids, in catalog order.
    pub chapters: Vec<&'static Chapter>,
    /// Home screen shelf: chapters among the first few bookmarks.
    pub quick_access: Vec<&'static Chapter>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookmarkToggled {
    pub chapter_id: String,
    pub bookmarked: bool,
}

pub async fn list_bookmarks(State(service): State<NoteService>) -> Json<BookmarkList> {
    let ids = service.cache().get_bookmarks();
    let chapters = catalog::bookmarked_chapters(&ids);
    let quick_access = catalog::quick_access(&ids, catalog::QUICK_ACCESS_LIMIT);
    Json(BookmarkList {
        ids,
        chapters,
        quick_access,
    })
}

pub async fn toggle_bookmark(
    State(service): State<NoteService>,
    Path(id): Path<String>,
) -> Result<Json<BookmarkToggled>, ApiError> {
    let chapter = find_chapter(&id)?;
    let bookmarked = service.cache().toggle_bookmark(chapter.id);
    Ok(Json(BookmarkToggled {
        chapter_id: chapter.id.to_string(),
        bookmarked,
    }))
}
