#![allow(dead_code)]

use axum::Router;
use skillxchange_backend::api::{CorsPolicy, router};
use skillxchange_backend::db;
use skillxchange_backend::models::NewCourseRequest;
use skillxchange_backend::state::AppState;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

pub const WEB_ORIGIN: &str = "http://localhost:3000";

pub async fn migrated_pool() -> SqlitePool {
    // Each connection to `sqlite::memory:` is a separate database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create database");
    db::migrate(&pool).await.expect("Failed to run migrations");
    pool
}

pub async fn test_state() -> AppState {
    AppState::new(migrated_pool().await)
}

pub fn test_app(state: AppState) -> Router {
    router(state, CorsPolicy::new(vec![WEB_ORIGIN.to_string()]))
}

pub fn new_course(owner: &str, title: &str) -> NewCourseRequest {
    NewCourseRequest {
        title: Some(title.to_string()),
        description: Some(format!("{} description", title)),
        owner_wallet_address: Some(owner.to_string()),
        level: Some("beginner".to_string()),
        course_type: Some("teach".to_string()),
        location: Some("remote".to_string()),
        fees: Some("0".to_string()),
        zoom_link: Some(format!("https://zoom.us/j/{}", title.len())),
        ..Default::default()
    }
}
