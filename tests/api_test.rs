mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use serde_json::{Value, json};
use skillxchange_backend::models::Course;
use tower::ServiceExt;

use common::{WEB_ORIGIN, new_course, test_app, test_state};

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.expect("request failed")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body")
        .to_vec()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    serde_json::from_slice(&body_bytes(response).await).expect("invalid json body")
}

#[tokio::test]
async fn test_health() {
    let app = test_app(test_state().await);
    assert_eq!(send(&app, get("/health")).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_courses_empty_then_filled() {
    let state = test_state().await;
    let app = test_app(state.clone());

    let response = send(&app, get("/api/courses")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());

    state.courses.create_course(new_course("0xA", "one")).await.unwrap();

    let response = send(&app, get("/api/courses")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let courses: Vec<Course> = body_json(response).await;
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].title.as_deref(), Some("one"));
}

#[tokio::test]
async fn test_create_course_from_web_client_payload() {
    let app = test_app(test_state().await);

    let response = send(
        &app,
        post_json(
            "/api/courses/create",
            json!({
                "title": "Solidity 101",
                "category": "blockchain",
                "level": "beginner",
                "type": "teach",
                "location": "remote",
                "description": "Smart contracts from scratch",
                "tags": ["eth"],
                "ownerWalletAddress": "0xA",
                "fees": 0
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: Value = body_json(response).await;
    let id = created["id"].as_i64().expect("id should be assigned");
    assert_eq!(created["ownerWalletAddress"], "0xA");
    assert_eq!(created["type"], "teach");
    assert_eq!(created["fees"], "0");
    assert!(created["zoomLink"].is_null());

    let response = send(&app, get(&format!("/api/course/{}", id))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Value = body_json(response).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let app = test_app(test_state().await);

    let request = Request::builder()
        .method("POST")
        .uri("/api/courses/create")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    assert!(send(&app, request).await.status().is_client_error());
}

#[tokio::test]
async fn test_get_course_by_both_paths() {
    let state = test_state().await;
    let app = test_app(state.clone());
    let course = state.courses.create_course(new_course("0xA", "one")).await.unwrap();

    for path in ["/api/course", "/api/courses"] {
        let response = send(&app, get(&format!("{}/{}", path, course.id))).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", path);
        let fetched: Course = body_json(response).await;
        assert_eq!(fetched, course);

        let response = send(&app, get(&format!("{}/{}", path, course.id + 1))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", path);
        assert!(body_bytes(response).await.is_empty());
    }
}

#[tokio::test]
async fn test_delete_course_status_mapping() {
    let state = test_state().await;
    let app = test_app(state.clone());
    let course = state.courses.create_course(new_course("0xA", "one")).await.unwrap();

    let response = send(&app, delete(&format!("/api/courses/delete/{}?walletAddress=0xB", course.id))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_bytes(response).await, b"Unauthorized");

    let response = send(&app, delete(&format!("/api/courses/delete/{}", course.id))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(&app, delete(&format!("/api/courses/delete/{}?walletAddress=0xA", course.id))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, delete(&format!("/api/courses/delete/{}?walletAddress=0xA", course.id))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, get(&format!("/api/course/{}", course.id))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_courses_by_owner() {
    let state = test_state().await;
    let app = test_app(state.clone());

    let response = send(&app, get("/api/courses/owner/0xA")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    state.courses.create_course(new_course("0xA", "one")).await.unwrap();
    state.courses.create_course(new_course("0xa", "other")).await.unwrap();

    let response = send(&app, get("/api/courses/owner/0xA")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let courses: Vec<Course> = body_json(response).await;
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].owner_wallet_address.as_deref(), Some("0xA"));
}

#[tokio::test]
async fn test_zoom_link_endpoint() {
    let state = test_state().await;
    let app = test_app(state.clone());

    let live = state.courses.create_course(new_course("0xA", "live")).await.unwrap();
    let mut req = new_course("0xA", "offline");
    req.zoom_link = None;
    let offline = state.courses.create_course(req).await.unwrap();

    let response = send(&app, get(&format!("/api/zoom/{}", live.id))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );
    assert_eq!(
        body_bytes(response).await,
        live.zoom_link.unwrap().into_bytes()
    );

    let response = send(&app, get(&format!("/api/zoom/{}", offline.id))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, get(&format!("/api/zoom/{}", offline.id + 1))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_id_is_rejected() {
    let app = test_app(test_state().await);
    let response = send(&app, get("/api/course/abc")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_users_endpoints() {
    let app = test_app(test_state().await);

    let response = send(&app, get("/api/users")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(
        &app,
        post_json(
            "/api/users",
            json!({ "walletAddress": "0xA", "name": "Ada", "email": "ada@example.com" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(&app, get("/api/users/0xA")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let user: Value = body_json(response).await;
    assert_eq!(user["name"], "Ada");

    let response = send(&app, get("/api/users/0xB")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, get("/api/users")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cors_allowed_origin() {
    let state = test_state().await;
    let app = test_app(state.clone());
    state.courses.create_course(new_course("0xA", "one")).await.unwrap();

    let request = Request::builder()
        .uri("/api/courses")
        .header(header::ORIGIN, WEB_ORIGIN)
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        WEB_ORIGIN
    );
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = test_app(test_state().await);

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/courses/create")
        .header(header::ORIGIN, WEB_ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        WEB_ORIGIN
    );
    assert!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS]
            .to_str()
            .unwrap()
            .contains("POST")
    );
}

#[tokio::test]
async fn test_cors_other_origin_gets_no_headers() {
    let app = test_app(test_state().await);

    let request = Request::builder()
        .uri("/api/courses")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(
        !response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
    assert_eq!(response.headers()[header::VARY], "origin");
}

#[tokio::test]
async fn test_responses_vary_on_origin() {
    let app = test_app(test_state().await);

    let response = send(&app, get("/api/courses")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(response.headers()[header::VARY], "origin");

    let request = Request::builder()
        .uri("/api/courses")
        .header(header::ORIGIN, WEB_ORIGIN)
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.headers()[header::VARY], "origin");
}
