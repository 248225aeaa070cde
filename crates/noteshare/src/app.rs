use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        collaborations::{create_collaboration, delete_collaboration},
        health::health,
        notes::{create_note, delete_note, get_note, list_notes, update_note},
        users::{create_user, get_user},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::HeaderName::from_static("x-user-id")]);

    // API routes with CORS
    let api_routes = Router::new()
        // User routes
        .route("/users", post(create_user))
        .route("/users/{id}", get(get_user))
        // Note routes
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
        // Collaboration routes
        .route(
            "/collaborations",
            post(create_collaboration).delete(delete_collaboration),
        )
        .layer(cors);

    // Main application router
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn json_request(method: &str, uri: &str, user_id: Option<Uuid>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json");
        if let Some(user_id) = user_id {
            builder = builder.header("x-user-id", user_id.to_string());
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn empty_request(method: &str, uri: &str, user_id: Option<Uuid>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user_id) = user_id {
            builder = builder.header("x-user-id", user_id.to_string());
        }
        builder.body(Body::empty()).unwrap()
    }

    /// Registers a user and returns their id.
    async fn register(app: &Router, username: &str) -> Uuid {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/users",
                None,
                &format!(r#"{{"username": "{username}", "fullname": "Test User"}}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        json["userId"].as_str().unwrap().parse().unwrap()
    }

    /// Creates a note for the user and returns its id.
    async fn create_note_for(app: &Router, user_id: Uuid, body: &str) -> Uuid {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/notes", Some(user_id), body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        json["noteId"].as_str().unwrap().parse().unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(empty_request("GET", "/health", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_notes_require_identity() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(empty_request("GET", "/api/notes", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_identity_is_rejected() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/notes")
                    .header("x-user-id", "not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_note_defaults_title() {
        let app = create_app(AppState::default());
        let user = register(&app, "writer").await;

        let note_id = create_note_for(&app, user, r#"{"body": "hi", "tags": ["a"]}"#).await;

        let response = app
            .oneshot(empty_request(
                "GET",
                &format!("/api/notes/{note_id}"),
                Some(user),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["title"], "untitled");
        assert_eq!(json["username"], "writer");
        assert_eq!(json["tags"], serde_json::json!(["a"]));
    }

    #[tokio::test]
    async fn test_listing_reflects_mutations() {
        let app = create_app(AppState::default());
        let user = register(&app, "lister").await;

        // Prime the cached (empty) listing first
        let response = app
            .clone()
            .oneshot(empty_request("GET", "/api/notes", Some(user)))
            .await
            .unwrap();
        assert_eq!(body_json(response).await, serde_json::json!([]));

        let note_id =
            create_note_for(&app, user, r#"{"title": "first", "body": "b", "tags": []}"#).await;

        // The add invalidated the cached listing
        let response = app
            .clone()
            .oneshot(empty_request("GET", "/api/notes", Some(user)))
            .await
            .unwrap();
        let listing = body_json(response).await;
        assert_eq!(listing.as_array().unwrap().len(), 1);
        assert_eq!(listing[0]["title"], "first");

        // Edit and list again
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/notes/{note_id}"),
                Some(user),
                r#"{"title": "renamed", "body": "b", "tags": []}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(empty_request("GET", "/api/notes", Some(user)))
            .await
            .unwrap();
        let listing = body_json(response).await;
        assert_eq!(listing[0]["title"], "renamed");
    }

    #[tokio::test]
    async fn test_collaboration_grants_access_but_not_delete() {
        let app = create_app(AppState::default());
        let owner = register(&app, "owner").await;
        let collaborator = register(&app, "collaborator").await;

        let note_id = create_note_for(&app, owner, r#"{"body": "hi", "tags": ["a"]}"#).await;

        // A stranger to the note cannot read it
        let response = app
            .clone()
            .oneshot(empty_request(
                "GET",
                &format!("/api/notes/{note_id}"),
                Some(collaborator),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        // Owner grants access
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/collaborations",
                Some(owner),
                &format!(r#"{{"noteId": "{note_id}", "userId": "{collaborator}"}}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        // Now the collaborator can read and edit
        let response = app
            .clone()
            .oneshot(empty_request(
                "GET",
                &format!("/api/notes/{note_id}"),
                Some(collaborator),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/notes/{note_id}"),
                Some(collaborator),
                r#"{"title": "ours now", "body": "b", "tags": []}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // But never delete - that stays with the owner
        let response = app
            .clone()
            .oneshot(empty_request(
                "DELETE",
                &format!("/api/notes/{note_id}"),
                Some(collaborator),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .oneshot(empty_request(
                "DELETE",
                &format!("/api/notes/{note_id}"),
                Some(owner),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_only_owner_manages_collaborations() {
        let app = create_app(AppState::default());
        let owner = register(&app, "owner2").await;
        let other = register(&app, "other2").await;

        let note_id = create_note_for(&app, owner, r#"{"body": "hi", "tags": []}"#).await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/collaborations",
                Some(other),
                &format!(r#"{{"noteId": "{note_id}", "userId": "{other}"}}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_duplicate_collaboration_is_rejected() {
        let app = create_app(AppState::default());
        let owner = register(&app, "owner3").await;
        let collaborator = register(&app, "collab3").await;

        let note_id = create_note_for(&app, owner, r#"{"body": "hi", "tags": []}"#).await;
        let grant = format!(r#"{{"noteId": "{note_id}", "userId": "{collaborator}"}}"#);

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/collaborations", Some(owner), &grant))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(json_request("POST", "/api/collaborations", Some(owner), &grant))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_collaborator_sees_shared_note_in_listing() {
        let app = create_app(AppState::default());
        let owner = register(&app, "owner4").await;
        let collaborator = register(&app, "collab4").await;

        let note_id =
            create_note_for(&app, owner, r#"{"title": "shared", "body": "b", "tags": []}"#).await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/collaborations",
                Some(owner),
                &format!(r#"{{"noteId": "{note_id}", "userId": "{collaborator}"}}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(empty_request("GET", "/api/notes", Some(collaborator)))
            .await
            .unwrap();
        let listing = body_json(response).await;
        assert_eq!(listing.as_array().unwrap().len(), 1);
        assert_eq!(listing[0]["title"], "shared");
    }

    #[tokio::test]
    async fn test_operations_on_missing_note_are_not_found() {
        let app = create_app(AppState::default());
        let user = register(&app, "seeker").await;
        let missing = Uuid::new_v4();

        let response = app
            .clone()
            .oneshot(empty_request(
                "GET",
                &format!("/api/notes/{missing}"),
                Some(user),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/notes/{missing}"),
                Some(user),
                r#"{"title": "t", "body": "b", "tags": []}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(empty_request(
                "DELETE",
                &format!("/api/notes/{missing}"),
                Some(user),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let app = create_app(AppState::default());
        register(&app, "taken").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/users",
                None,
                r#"{"username": "taken", "fullname": "Someone Else"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_unknown_user_is_not_found() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(empty_request(
                "GET",
                &format!("/api/users/{}", Uuid::new_v4()),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
