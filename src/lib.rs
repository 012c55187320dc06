//! Cached, generated revision notes for Class 10 chapters.
//!
//! The [`service::NoteService`] resolves a chapter's note from the
//! [`cache::CacheRepository`] or, on a miss, from a
//! [`generation::NoteGenerator`]. The CLI and the HTTP API in [`api`] are thin
//! shells around it.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod db;
pub mod generation;
pub mod models;
pub mod render;
pub mod service;
