use axum::{extract::State, http::StatusCode, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::health;
use super::state::AppState;
use super::types::ApiError;
use super::v1;
use crate::domain::DomainError;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints (no auth)
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .nest("/v1", v1::create_v1_router())
        // Unmatched paths and methods still answer with the error envelope
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn method_not_allowed() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

async fn route_not_found(State(state): State<AppState>) -> ApiError {
    state.errors.map(DomainError::not_found("No route for request"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, HeaderMap, Method, Request, StatusCode};
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::AppConfig;
    use crate::infrastructure::notification::CapturingNotifier;
    use crate::infrastructure::storage::StorageFactory;

    const REPORTER: (&str, &str) = ("reporter", "report-secret");

    struct TestApp {
        router: Router,
        notifier: Arc<CapturingNotifier>,
    }

    struct TestResponse {
        status: StatusCode,
        headers: HeaderMap,
        body: Value,
    }

    impl TestApp {
        async fn new() -> Self {
            let mut config = AppConfig::default();
            config.auth.reporter_user = REPORTER.0.to_string();
            config.auth.reporter_password = REPORTER.1.to_string();

            let notifier = Arc::new(CapturingNotifier::new());
            let state = AppState::build(&config, StorageFactory::in_memory(), notifier.clone())
                .await
                .unwrap();

            Self {
                router: create_router(state),
                notifier,
            }
        }

        async fn send(
            &self,
            method: Method,
            uri: &str,
            auth: Option<(&str, &str)>,
            body: Option<Value>,
        ) -> TestResponse {
            let mut builder = Request::builder().method(method).uri(uri);

            if let Some((user, password)) = auth {
                let encoded = STANDARD.encode(format!("{}:{}", user, password));
                builder = builder.header(header::AUTHORIZATION, format!("Basic {}", encoded));
            }

            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            self.dispatch(request).await
        }

        async fn dispatch(&self, request: Request<Body>) -> TestResponse {
            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let headers = response.headers().clone();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };

            TestResponse {
                status,
                headers,
                body,
            }
        }

        /// Register a volunteer and return the password mailed to them
        async fn register(&self, email: &str) -> String {
            let response = self
                .send(
                    Method::POST,
                    "/v1/volunteers",
                    None,
                    Some(json!({"email": email, "firstname": "Ann", "lastname": "Doe"})),
                )
                .await;
            assert_eq!(response.status, StatusCode::OK);

            self.notifier.password_for(email).await.unwrap()
        }
    }

    fn assert_challenge(response: &TestResponse) {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers[header::WWW_AUTHENTICATE],
            "Basic realm=\"Authorization Required\""
        );
        assert_eq!(response.body, json!({"error": "Unauthorized", "status": 401}));
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = TestApp::new().await;

        let health = app.send(Method::GET, "/health", None, None).await;
        assert_eq!(health.status, StatusCode::OK);
        assert_eq!(health.body["status"], "healthy");

        let ready = app.send(Method::GET, "/ready", None, None).await;
        assert_eq!(ready.status, StatusCode::OK);
        assert_eq!(ready.body["checks"][0]["name"], "storage");
    }

    #[tokio::test]
    async fn test_create_volunteer() {
        let app = TestApp::new().await;

        let response = app
            .send(
                Method::POST,
                "/v1/volunteers",
                None,
                Some(json!({"email": "a@x.com", "lastname": "Doe", "password": "ignored"})),
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({"Message": "a@x.com created"}));

        let password = app.notifier.password_for("a@x.com").await.unwrap();
        assert_eq!(password.len(), 16);
        assert_ne!(password, "ignored");
    }

    #[tokio::test]
    async fn test_create_duplicate_volunteer() {
        let app = TestApp::new().await;
        app.register("a@x.com").await;

        let response = app
            .send(
                Method::POST,
                "/v1/volunteers",
                None,
                Some(json!({"email": "a@x.com", "lastname": "Doe"})),
            )
            .await;

        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(
            response.body,
            json!({"error": "Entity already exists", "status": 409})
        );
        assert_eq!(app.notifier.sent().await.len(), 1);
    }

    #[tokio::test]
    async fn test_create_volunteer_rejects_bad_input() {
        let app = TestApp::new().await;

        let missing_lastname = app
            .send(
                Method::POST,
                "/v1/volunteers",
                None,
                Some(json!({"email": "a@x.com"})),
            )
            .await;
        assert_eq!(missing_lastname.status, StatusCode::BAD_REQUEST);
        assert_eq!(missing_lastname.body["status"], 400);

        let bad_email = app
            .send(
                Method::POST,
                "/v1/volunteers",
                None,
                Some(json!({"email": "not-an-email", "lastname": "Doe"})),
            )
            .await;
        assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);

        let request = Request::builder()
            .method(Method::POST)
            .uri("/v1/volunteers")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let malformed = app.dispatch(request).await;

        assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
        assert!(malformed.body["error"]
            .as_str()
            .unwrap()
            .starts_with("JSON decoding error: "));
        assert!(app.notifier.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_get_volunteer_as_owner() {
        let app = TestApp::new().await;
        let password = app.register("a@x.com").await;

        let response = app
            .send(
                Method::GET,
                "/v1/volunteers/a@x.com",
                Some(("a@x.com", &password)),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["email"], "a@x.com");
        assert_eq!(response.body["firstname"], "Ann");
        assert_eq!(response.body["lastname"], "Doe");
        assert_eq!(response.body["password"], password.as_str());
        assert!(response.body["id"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_get_volunteer_rejects_other_identity() {
        let app = TestApp::new().await;
        app.register("a@x.com").await;
        let other = app.register("b@x.com").await;

        let response = app
            .send(
                Method::GET,
                "/v1/volunteers/a@x.com",
                Some(("b@x.com", &other)),
                None,
            )
            .await;

        assert_challenge(&response);
    }

    #[tokio::test]
    async fn test_get_missing_volunteer() {
        let app = TestApp::new().await;
        let password = app.register("a@x.com").await;

        let response = app
            .send(
                Method::GET,
                "/v1/volunteers/ghost@x.com",
                Some(("a@x.com", &password)),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body, json!({"error": "Not found", "status": 404}));
    }

    #[tokio::test]
    async fn test_missing_or_malformed_credentials() {
        let app = TestApp::new().await;
        app.register("a@x.com").await;

        let missing = app
            .send(Method::GET, "/v1/volunteers/a@x.com", None, None)
            .await;
        assert_challenge(&missing);

        let wrong = app
            .send(
                Method::GET,
                "/v1/volunteers/a@x.com",
                Some(("a@x.com", "wrong")),
                None,
            )
            .await;
        assert_challenge(&wrong);

        let request = Request::builder()
            .method(Method::GET)
            .uri("/v1/volunteers/a@x.com")
            .header(header::AUTHORIZATION, "Basic !!!not-base64")
            .body(Body::empty())
            .unwrap();
        assert_challenge(&app.dispatch(request).await);
    }

    #[tokio::test]
    async fn test_list_volunteers_requires_reporter() {
        let app = TestApp::new().await;
        let password = app.register("a@x.com").await;
        app.register("b@x.com").await;

        let as_volunteer = app
            .send(
                Method::GET,
                "/v1/volunteers/",
                Some(("a@x.com", &password)),
                None,
            )
            .await;
        assert_challenge(&as_volunteer);

        let as_reporter = app
            .send(Method::GET, "/v1/volunteers/", Some(REPORTER), None)
            .await;
        assert_eq!(as_reporter.status, StatusCode::OK);
        assert_eq!(as_reporter.body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_volunteer() {
        let app = TestApp::new().await;
        let password = app.register("a@x.com").await;

        let response = app
            .send(
                Method::PUT,
                "/v1/volunteers/a@x.com",
                Some(("a@x.com", &password)),
                Some(json!({
                    "email": "a@x.com",
                    "firstname": "Anna",
                    "lastname": "Smith",
                    "password": "new-secret"
                })),
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["lastname"], "Smith");
        assert_eq!(response.body["password"], "new-secret");

        let old = app
            .send(
                Method::GET,
                "/v1/volunteers/a@x.com",
                Some(("a@x.com", &password)),
                None,
            )
            .await;
        assert_challenge(&old);

        let new = app
            .send(
                Method::GET,
                "/v1/volunteers/a@x.com",
                Some(("a@x.com", "new-secret")),
                None,
            )
            .await;
        assert_eq!(new.status, StatusCode::OK);
        assert_eq!(new.body["firstname"], "Anna");
    }

    #[tokio::test]
    async fn test_update_keeps_stored_email_and_password() {
        let app = TestApp::new().await;
        let password = app.register("a@x.com").await;

        let response = app
            .send(
                Method::PUT,
                "/v1/volunteers/a@x.com",
                Some(("a@x.com", &password)),
                Some(json!({"email": "other@x.com", "lastname": "Smith"})),
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["email"], "a@x.com");
        assert_eq!(response.body["password"], password.as_str());
    }

    #[tokio::test]
    async fn test_delete_volunteer() {
        let app = TestApp::new().await;
        let password = app.register("a@x.com").await;

        let response = app
            .send(
                Method::DELETE,
                "/v1/volunteers/a@x.com",
                Some(("a@x.com", &password)),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({"Message": "a@x.com deleted"}));

        let after = app
            .send(
                Method::GET,
                "/v1/volunteers/a@x.com",
                Some(("a@x.com", &password)),
                None,
            )
            .await;
        assert_challenge(&after);
    }

    #[tokio::test]
    async fn test_team_lifecycle() {
        let app = TestApp::new().await;
        let password = app.register("a@x.com").await;
        let auth = Some(("a@x.com", password.as_str()));

        let created = app
            .send(
                Method::POST,
                "/v1/teams",
                auth,
                Some(json!({"identifier": "red", "name": "Red Team"})),
            )
            .await;
        assert_eq!(created.status, StatusCode::OK);
        assert_eq!(created.body["identifier"], "red");
        assert_eq!(created.body["volunteeremails"], json!([]));
        let team_id = created.body["id"].clone();

        let signed = app
            .send(
                Method::PUT,
                "/v1/teams/red/sign",
                auth,
                Some(json!({"volunteeremail": "a@x.com"})),
            )
            .await;
        assert_eq!(signed.status, StatusCode::OK);
        assert_eq!(
            signed.body,
            json!({"TeamID": team_id, "volunteeremail": "a@x.com"})
        );

        let again = app
            .send(
                Method::PUT,
                "/v1/teams/red/sign",
                auth,
                Some(json!({"volunteeremail": "a@x.com"})),
            )
            .await;
        assert_eq!(again.status, StatusCode::CONFLICT);

        let fetched = app.send(Method::GET, "/v1/teams/red", auth, None).await;
        assert_eq!(fetched.status, StatusCode::OK);
        assert_eq!(fetched.body["volunteeremails"][0]["volunteeremail"], "a@x.com");

        let listed = app
            .send(Method::GET, "/v1/teams/", Some(REPORTER), None)
            .await;
        assert_eq!(listed.status, StatusCode::OK);
        assert_eq!(listed.body[0]["volunteeremails"].as_array().unwrap().len(), 1);

        let deassigned = app
            .send(
                Method::PUT,
                "/v1/teams/red/deassign",
                auth,
                Some(json!({"volunteeremail": "a@x.com"})),
            )
            .await;
        assert_eq!(deassigned.status, StatusCode::OK);

        let deassigned_again = app
            .send(
                Method::PUT,
                "/v1/teams/red/deassign",
                auth,
                Some(json!({"volunteeremail": "a@x.com"})),
            )
            .await;
        assert_eq!(deassigned_again.status, StatusCode::NOT_FOUND);

        let deleted = app.send(Method::DELETE, "/v1/teams/red", auth, None).await;
        assert_eq!(deleted.status, StatusCode::OK);
        assert_eq!(deleted.body, json!({"Message": "red deleted"}));

        let gone = app.send(Method::GET, "/v1/teams/red", auth, None).await;
        assert_eq!(gone.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_duplicate_team() {
        let app = TestApp::new().await;
        let auth = Some(REPORTER);
        let body = json!({"identifier": "red"});

        let first = app
            .send(Method::POST, "/v1/teams", auth, Some(body.clone()))
            .await;
        assert_eq!(first.status, StatusCode::OK);

        let second = app.send(Method::POST, "/v1/teams", auth, Some(body)).await;
        assert_eq!(second.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_team_routes_require_credentials() {
        let app = TestApp::new().await;

        let response = app
            .send(
                Method::POST,
                "/v1/teams",
                None,
                Some(json!({"identifier": "red"})),
            )
            .await;
        assert_challenge(&response);

        let list = app.send(Method::GET, "/v1/teams/", None, None).await;
        assert_challenge(&list);
    }

    #[tokio::test]
    async fn test_assign_to_missing_team_is_internal_error() {
        let app = TestApp::new().await;
        let password = app.register("a@x.com").await;

        let response = app
            .send(
                Method::PUT,
                "/v1/teams/ghost/sign",
                Some(("a@x.com", &password)),
                Some(json!({"volunteeremail": "a@x.com"})),
            )
            .await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.body,
            json!({"error": "Internal server error", "status": 500})
        );
    }

    #[tokio::test]
    async fn test_delete_team_removes_assignments() {
        let app = TestApp::new().await;
        let password = app.register("a@x.com").await;
        let auth = Some(("a@x.com", password.as_str()));

        app.send(Method::POST, "/v1/teams", auth, Some(json!({"identifier": "red"})))
            .await;
        app.send(
            Method::PUT,
            "/v1/teams/red/sign",
            auth,
            Some(json!({"volunteeremail": "a@x.com"})),
        )
        .await;
        app.send(Method::DELETE, "/v1/teams/red", auth, None).await;

        let recreated = app
            .send(Method::POST, "/v1/teams", auth, Some(json!({"identifier": "red"})))
            .await;
        assert_eq!(recreated.status, StatusCode::OK);

        let fetched = app.send(Method::GET, "/v1/teams/red", auth, None).await;
        assert_eq!(fetched.body["volunteeremails"], json!([]));
    }

    fn raw_post(uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder().method(Method::POST).uri(uri);

        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }

        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_register_without_content_type() {
        let app = TestApp::new().await;

        let response = app
            .dispatch(raw_post(
                "/v1/volunteers",
                None,
                r#"{"email":"a@x.com","lastname":"Doe"}"#,
            ))
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({"Message": "a@x.com created"}));
        assert!(app.notifier.password_for("a@x.com").await.is_some());
    }

    #[tokio::test]
    async fn test_register_with_form_content_type() {
        let app = TestApp::new().await;

        let response = app
            .dispatch(raw_post(
                "/v1/volunteers",
                Some("application/x-www-form-urlencoded"),
                r#"{"email":"b@x.com","lastname":"Doe"}"#,
            ))
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({"Message": "b@x.com created"}));
    }

    #[tokio::test]
    async fn test_register_with_empty_body() {
        let app = TestApp::new().await;

        let response = app.dispatch(raw_post("/v1/volunteers", None, "")).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert!(response.body["error"]
            .as_str()
            .unwrap()
            .starts_with("JSON decoding error: "));
    }

    #[tokio::test]
    async fn test_null_fields_bind_as_empty() {
        let app = TestApp::new().await;

        let response = app
            .send(
                Method::POST,
                "/v1/volunteers",
                None,
                Some(json!({
                    "email": "a@x.com",
                    "firstname": null,
                    "lastname": "Doe",
                    "password": null
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);

        let password = app.notifier.password_for("a@x.com").await.unwrap();
        let auth = Some(("a@x.com", password.as_str()));

        let fetched = app
            .send(Method::GET, "/v1/volunteers/a@x.com", auth, None)
            .await;
        assert_eq!(fetched.body["firstname"], "");

        let team = app
            .send(
                Method::POST,
                "/v1/teams",
                auth,
                Some(json!({"identifier": "red", "name": null})),
            )
            .await;
        assert_eq!(team.status, StatusCode::OK);
        assert_eq!(team.body["name"], "");
    }

    #[tokio::test]
    async fn test_null_required_field_is_rejected() {
        let app = TestApp::new().await;

        let response = app
            .send(
                Method::POST,
                "/v1/volunteers",
                None,
                Some(json!({"email": "a@x.com", "lastname": null})),
            )
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unmatched_method_uses_error_envelope() {
        let app = TestApp::new().await;

        for uri in ["/v1/volunteers", "/v1/teams"] {
            let response = app.send(Method::GET, uri, Some(REPORTER), None).await;

            assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(
                response.body,
                json!({"error": "Method not allowed", "status": 405})
            );
        }
    }

    #[tokio::test]
    async fn test_unknown_route_uses_error_envelope() {
        let app = TestApp::new().await;

        let response = app.send(Method::GET, "/v1/unknown", None, None).await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body, json!({"error": "Not found", "status": 404}));
    }
}
