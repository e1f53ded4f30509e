//! Tests for users API handlers.

use super::*;
use crate::domain::{AuthToken, BlogDraft, BlogId, ErrorCode};
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::test_utils::{TestPorts, root_profile};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

fn test_app(
    ports: TestPorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::from(ports)))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/api")
                .service(register_user)
                .service(list_users)
                .service(login),
        )
}

async fn post_json(ports: TestPorts, uri: &str, body: Value) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(ports)).await;
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(&body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

#[rstest]
#[actix_web::test]
async fn register_returns_created_profile_without_digest() {
    let mut ports = TestPorts::default();
    ports
        .registration
        .expect_register()
        .withf(|req| req.username == "root" && req.name == "Superuser" && req.password == "sekret")
        .times(1)
        .return_once(|_| Ok(root_profile()));

    let (status, body) = post_json(
        ports,
        "/api/users",
        json!({"username": "root", "name": "Superuser", "password": "sekret"}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.get("username"), Some(&json!("root")));
    assert_eq!(body.get("name"), Some(&json!("Superuser")));
    assert_eq!(body.get("blogs"), Some(&json!([])));
    assert!(body.get("id").and_then(Value::as_str).is_some());
    assert!(body.get("passwordDigest").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[rstest]
#[actix_web::test]
async fn register_forwards_missing_fields_as_empty_strings() {
    let mut ports = TestPorts::default();
    ports
        .registration
        .expect_register()
        .withf(|req| req.username.is_empty() && req.password == "sekret")
        .times(1)
        .return_once(|_| {
            Err(Error::invalid_request("username must be at least 3 characters long")
                .with_details(json!({"field": "username"})))
        });

    let (status, body) = post_json(ports, "/api/users", json!({"password": "sekret"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.pointer("/details/field"), Some(&json!("username")));
}

#[rstest]
#[actix_web::test]
async fn list_users_nests_entry_summaries() {
    let profile = root_profile();
    let blog = Blog::create(
        BlogId::random(),
        BlogDraft {
            title: "Go To Statement Considered Harmful".to_owned(),
            author: "Edsger W. Dijkstra".to_owned(),
            url: "http://example.com/goto".to_owned(),
            likes: Some(5),
        },
        profile.id.clone(),
    )
    .expect("valid blog");
    let mut ports = TestPorts::default();
    ports.users.expect_list_users().times(1).return_once(move || {
        Ok(vec![UserWithBlogs {
            profile,
            blogs: vec![blog],
        }])
    });

    let app = actix_test::init_service(test_app(ports)).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/users").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    let user = body.get(0).expect("one user");
    assert_eq!(user.get("username"), Some(&json!("root")));
    assert_eq!(user.pointer("/blogs/0/likes"), Some(&json!(5)));
    assert_eq!(user.pointer("/blogs/0/author"), Some(&json!("Edsger W. Dijkstra")));
    assert!(user.get("passwordDigest").is_none());
}

#[rstest]
#[actix_web::test]
async fn login_returns_token_and_profile() {
    let mut ports = TestPorts::default();
    ports
        .login
        .expect_login()
        .withf(|creds| creds.username() == "root" && creds.password() == "sekret")
        .times(1)
        .return_once(|_| {
            Ok(LoginSession {
                token: AuthToken::new("signed.jwt.value"),
                profile: root_profile(),
            })
        });

    let (status, body) = post_json(
        ports,
        "/api/login",
        json!({"username": "root", "password": "sekret"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"token": "signed.jwt.value", "username": "root", "name": "Superuser"})
    );
}

#[rstest]
#[case::blank_username(json!({"username": "   ", "password": "sekret"}))]
#[case::blank_password(json!({"username": "root", "password": ""}))]
#[case::empty_body(json!({}))]
#[actix_web::test]
async fn login_treats_blank_fields_as_wrong_credentials(#[case] payload: Value) {
    let mut ports = TestPorts::default();
    ports.login.expect_login().times(0);

    let (status, body) = post_json(ports, "/api/login", payload).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body.get("error"), Some(&json!(INVALID_CREDENTIALS)));
    assert_eq!(body.get("code"), Some(&json!("unauthorized")));
}

#[rstest]
#[actix_web::test]
async fn login_passes_through_service_rejection() {
    let mut ports = TestPorts::default();
    ports
        .login
        .expect_login()
        .times(1)
        .return_once(|_| Err(Error::unauthorized(INVALID_CREDENTIALS)));

    let (status, body) = post_json(
        ports,
        "/api/login",
        json!({"username": "root", "password": "wrong"}),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body.get("code").and_then(Value::as_str), Some("unauthorized"));
    let code: ErrorCode = serde_json::from_value(body.get("code").cloned().expect("code"))
        .expect("known error code");
    assert_eq!(code, ErrorCode::Unauthorized);
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_rejected_before_the_service() {
    let mut ports = TestPorts::default();
    ports.registration.expect_register().times(0);
    let app = actix_test::init_service(test_app(ports)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"username\":")
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
