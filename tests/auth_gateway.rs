use serde_json::json;

use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rollcall::api::AuthClient;
use rollcall::error::{remote_detail, RollcallError, StatusCategory};

mod common;

fn auth_client(server: &MockServer) -> AuthClient {
    AuthClient::new(&common::server_config(&server.uri())).expect("client should build")
}

/// Registration sends PascalCase field names and returns the server message
#[tokio::test]
async fn test_register_sends_pascal_case_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "Username": "ada",
            "Email": "ada@example.edu",
            "Password": "hunter22",
            "ConfirmPassword": "hunter22"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"Message": "User registered successfully"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = auth_client(&server);
    let message = client
        .register("ada", "ada@example.edu", "hunter22", "hunter22")
        .await
        .unwrap();
    assert_eq!(message, "User registered successfully");
}

/// A rejected registration surfaces the server's detail string verbatim
#[tokio::test]
async fn test_register_conflict_surfaces_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Email already registered"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = auth_client(&server);
    let err = client
        .register("ada", "ada@example.edu", "hunter22", "hunter22")
        .await
        .unwrap_err();
    assert_eq!(remote_detail(&err), Some("Email already registered"));
}

/// Validation errors arrive as a detail array; the messages are joined
#[tokio::test]
async fn test_register_validation_array_is_joined() {
    let server = MockServer::start().await;

    let body = json!({
        "detail": [
            {"loc": ["body", "Email"], "msg": "value is not a valid email address"},
            {"loc": ["body", "Password"], "msg": "ensure this value has at least 6 characters"}
        ]
    });
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(422).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = auth_client(&server);
    let err = client
        .register("ada", "bad-address", "x", "x")
        .await
        .unwrap_err();
    assert_eq!(
        remote_detail(&err),
        Some("value is not a valid email address, ensure this value has at least 6 characters")
    );
}

/// Login exchanges credentials for the bearer token in the response
#[tokio::test]
async fn test_login_returns_access_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "Email": "ada@example.edu",
            "Password": "hunter22"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Message": "Login successful",
            "AccessToken": "tok_123",
            "TokenType": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = auth_client(&server);
    let token = client.login("ada@example.edu", "hunter22").await.unwrap();
    assert_eq!(token, "tok_123");
}

/// A success response without a token is still a failure for login
#[tokio::test]
async fn test_login_without_token_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = auth_client(&server);
    let err = client.login("ada@example.edu", "hunter22").await.unwrap_err();
    assert_eq!(
        remote_detail(&err),
        Some("login response did not include a token")
    );
}

/// Bad credentials map to the unauthorized category with the server detail
#[tokio::test]
async fn test_login_unauthorized_category() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = auth_client(&server);
    let err = client.login("ada@example.edu", "wrong").await.unwrap_err();

    match err.downcast_ref::<RollcallError>() {
        Some(RollcallError::Remote { category, detail }) => {
            assert_eq!(*category, StatusCategory::Unauthorized);
            assert_eq!(detail, "Invalid credentials");
        }
        other => panic!("Expected remote error, got {:?}", other),
    }
}

/// Reset requests acknowledge with Message, which callers replace locally
#[tokio::test]
async fn test_request_reset_returns_no_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/reset-password"))
        .and(body_json(json!({"Email": "ada@example.edu"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"Message": "Password reset link has been sent"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = auth_client(&server);
    let detail = client.request_reset("ada@example.edu").await.unwrap();
    assert!(detail.is_none());
}

/// A lowercase detail in the reset acknowledgement is passed through
#[tokio::test]
async fn test_request_reset_passes_detail_through() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/reset-password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detail": "Check your inbox"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = auth_client(&server);
    let detail = client.request_reset("ada@example.edu").await.unwrap();
    assert_eq!(detail.as_deref(), Some("Check your inbox"));
}

/// Confirming a reset sends the token plus both password copies
#[tokio::test]
async fn test_confirm_reset_sends_token_and_passwords() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/confirm-reset"))
        .and(body_json(json!({
            "Token": "reset_tok",
            "NewPassword": "NewPass1!",
            "ConfirmPassword": "NewPass1!"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"Message": "Password has been successfully reset."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = auth_client(&server);
    let message = client.confirm_reset("reset_tok", "NewPass1!").await.unwrap();
    assert_eq!(message.as_deref(), Some("Password has been successfully reset."));
}

/// An expired reset token surfaces the server's rejection
#[tokio::test]
async fn test_confirm_reset_expired_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/confirm-reset"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Invalid or expired token"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = auth_client(&server);
    let err = client.confirm_reset("stale", "NewPass1!").await.unwrap_err();
    assert_eq!(remote_detail(&err), Some("Invalid or expired token"));
}

/// Error bodies that are not JSON fall back to the raw text
#[tokio::test]
async fn test_non_json_error_body_is_kept() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream offline"))
        .expect(1)
        .mount(&server)
        .await;

    let client = auth_client(&server);
    let err = client.login("ada@example.edu", "hunter22").await.unwrap_err();
    assert_eq!(remote_detail(&err), Some("upstream offline"));
}

/// An empty error body falls back to the status line's canonical reason
#[tokio::test]
async fn test_empty_error_body_uses_canonical_reason() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = auth_client(&server);
    let err = client.login("ada@example.edu", "hunter22").await.unwrap_err();
    assert_eq!(remote_detail(&err), Some("Internal Server Error"));
}
