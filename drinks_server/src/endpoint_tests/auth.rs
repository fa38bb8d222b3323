//! Guard-pipeline tests: every protected route must run the same verify-then-check sequence
//! before its handler, and every failure must surface through the uniform envelope.

use actix_web::{http::StatusCode, test::TestRequest};
use serde_json::{json, Value};

use super::{
    helpers::{send, verifier_granting, verifier_rejecting},
    mocks::{MockDrinkStore, MockVerifier},
};
use crate::{auth::Claims, errors::AuthError};

/// The four protected routes. The store mocks carry no expectations, so any of these reaching a
/// handler fails the test.
fn protected_requests() -> Vec<TestRequest> {
    let body = json!({"title": "Flat white", "recipe": [{"name": "milk", "color": "white", "parts": 1}]});
    vec![
        TestRequest::get().uri("/drinks-detail"),
        TestRequest::post().uri("/drinks").set_json(body.clone()),
        TestRequest::patch().uri("/drinks/1").set_json(body),
        TestRequest::delete().uri("/drinks/1"),
    ]
}

#[actix_web::test]
async fn requests_without_authorization_header_are_rejected() {
    for req in protected_requests() {
        let (status, body) = send(MockDrinkStore::new(), MockVerifier::new(), req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!(401));
        assert_eq!(body["code"], json!("invalid_header"));
    }
}

#[actix_web::test]
async fn non_bearer_schemes_are_rejected() {
    let req = TestRequest::get().uri("/drinks-detail").insert_header(("Authorization", "Basic dXNlcjpwYXNz"));
    let (status, body) = send(MockDrinkStore::new(), MockVerifier::new(), req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("invalid_header"), "was: {body}");
}

#[actix_web::test]
async fn tokens_missing_the_required_permission_are_forbidden() {
    for req in protected_requests() {
        // A real token, just not for this route.
        let verifier = verifier_granting(&["get:kitchen-sink"]);
        let (status, body) = send(MockDrinkStore::new(), verifier, req.insert_header(("Authorization", "Bearer t"))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["error"], json!(403));
        assert_eq!(body["code"], json!("unauthorized"));
    }
}

#[actix_web::test]
async fn expired_tokens_are_unauthorized() {
    let verifier = verifier_rejecting(AuthError::TokenExpired);
    let req = TestRequest::get().uri("/drinks-detail").insert_header(("Authorization", "Bearer stale"));
    let (status, body) = send(MockDrinkStore::new(), verifier, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["code"], json!("token_expired"));
}

#[actix_web::test]
async fn claims_without_permissions_are_invalid() {
    let mut verifier = MockVerifier::new();
    verifier
        .expect_verify()
        .returning(|_| Ok(Claims { sub: "auth0|tester".to_string(), permissions: None, exp: 4_102_444_800 }));
    let req = TestRequest::delete().uri("/drinks/1").insert_header(("Authorization", "Bearer t"));
    let (status, body) = send(MockDrinkStore::new(), verifier, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["code"], json!("invalid_claims"));
    assert!(body["message"].as_str().unwrap().contains("Permissions not included"), "was: {body}");
}

#[actix_web::test]
async fn malformed_tokens_are_a_bad_request() {
    let verifier = verifier_rejecting(AuthError::MalformedToken("InvalidToken".to_string()));
    let req = TestRequest::get().uri("/drinks-detail").insert_header(("Authorization", "Bearer ???"));
    let (status, body) = send(MockDrinkStore::new(), verifier, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["code"], json!("invalid_header"));
}

#[actix_web::test]
async fn issuer_or_audience_mismatches_are_unauthorized() {
    let verifier =
        verifier_rejecting(AuthError::InvalidClaims("Incorrect claims. Please check the audience and issuer.".into()));
    let req = TestRequest::get().uri("/drinks-detail").insert_header(("Authorization", "Bearer other-tenant"));
    let (status, body) = send(MockDrinkStore::new(), verifier, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["code"], json!("invalid_claims"));
}
