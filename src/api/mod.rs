pub mod cors;

use axum::Json;
use axum::extract::{Path, Query};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, post};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::*;
use crate::services::Outcome;
use crate::state::AppState;

pub use cors::CorsPolicy;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteCourseParams {
    wallet_address: Option<String>,
}

impl<T: IntoResponse> IntoResponse for Outcome<T> {
    fn into_response(self) -> Response {
        match self {
            Outcome::Ok(body) => body.into_response(),
            Outcome::NoContent => StatusCode::NO_CONTENT.into_response(),
            Outcome::NotFound => StatusCode::NOT_FOUND.into_response(),
            Outcome::Forbidden(reason) => (StatusCode::FORBIDDEN, reason).into_response(),
        }
    }
}

pub fn router(state: AppState, cors: CorsPolicy) -> Router {
    let api = Router::new()
        .route("/courses", get(list_courses))
        .route("/courses/create", post(create_course))
        .route("/courses/delete/{id}", delete(delete_course))
        .route("/courses/owner/{owner_wallet_address}", get(list_courses_by_owner))
        .route("/courses/{id}", get(get_course))
        .route("/course/{id}", get(get_course))
        .route("/zoom/{id}", get(get_zoom_link))
        .route("/users", get(list_users).post(create_user))
        .route("/users/{wallet_address}", get(get_user));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(cors, cors::cors_middleware))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_courses(
    State(state): State<AppState>,
) -> Result<Outcome<Json<Vec<Course>>>, AppError> {
    Ok(state.courses.list_courses().await?.map(Json))
}

async fn create_course(
    State(state): State<AppState>,
    Json(req): Json<NewCourseRequest>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = state.courses.create_course(req).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<DeleteCourseParams>,
) -> Result<Outcome<StatusCode>, AppError> {
    let outcome = state
        .courses
        .delete_course(id, params.wallet_address.as_deref())
        .await?;
    Ok(outcome.map(|()| StatusCode::NO_CONTENT))
}

async fn list_courses_by_owner(
    State(state): State<AppState>,
    Path(owner_wallet_address): Path<String>,
) -> Result<Outcome<Json<Vec<Course>>>, AppError> {
    let courses = state.courses.list_by_owner(&owner_wallet_address).await?;
    Ok(Outcome::from_list(courses).map(Json))
}

async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Outcome<Json<Course>>, AppError> {
    Ok(state.courses.find_course(id).await?.map(Json))
}

async fn get_zoom_link(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Outcome<String>, AppError> {
    state.courses.zoom_link(id).await
}

async fn list_users(State(state): State<AppState>) -> Result<Outcome<Json<Vec<User>>>, AppError> {
    Ok(state.users.list_users().await?.map(Json))
}

async fn create_user(
    State(state): State<AppState>,
    Json(user): Json<User>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = state.users.register(user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn get_user(
    State(state): State<AppState>,
    Path(wallet_address): Path<String>,
) -> Result<Outcome<Json<User>>, AppError> {
    Ok(state.users.find_user(&wallet_address).await?.map(Json))
}
