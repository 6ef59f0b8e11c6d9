/// Integration tests for the FCM client against stubbed Google endpoints
///
/// This test module covers:
/// - Token exchange followed by a single send
/// - Gateway rejection passthrough
/// - Token-exchange failures never reaching the gateway
/// - Bounded timeouts
/// - Credential loading from the environment
use fcm_shared::credentials::{ENV_CLIENT_EMAIL, ENV_PRIVATE_KEY, ENV_PROJECT_ID};
use fcm_shared::{FCMClient, FCMError, FcmClientConfig, ServiceAccountKey};
use serial_test::serial;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PRIVATE_KEY: &str = include_str!("fixtures/service_account_key.pem");
const EMAIL: &str = "relay@chat-app.iam.gserviceaccount.com";
const SEND_PATH: &str = "/v1/projects/chat-app/messages:send";

fn client_for(server: &MockServer) -> FCMClient {
    let creds = ServiceAccountKey::new(EMAIL, PRIVATE_KEY, "chat-app").unwrap();
    let config = FcmClientConfig {
        token_uri: format!("{}/token", server.uri()),
        send_base_url: server.uri(),
        request_timeout: Duration::from_millis(500),
        connect_timeout: Duration::from_millis(500),
    };
    FCMClient::new(creds, config).unwrap()
}

async fn mount_token(server: &MockServer, access_token: &str) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": access_token,
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_send_uses_minted_bearer_and_exact_body() {
    let server = MockServer::start().await;
    mount_token(&server, "T1").await;

    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .and(header("authorization", "Bearer T1"))
        .and(body_json(serde_json::json!({
            "message": {
                "token": "abc123",
                "notification": { "title": "Hi", "body": "there" },
                "android": { "priority": "high" }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "projects/chat-app/messages/0:1500415314455276%31bd1c9631bd1c96"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .send("abc123", "Hi", "there")
        .await
        .unwrap();

    assert_eq!(
        result.message_id.as_deref(),
        Some("projects/chat-app/messages/0:1500415314455276%31bd1c9631bd1c96")
    );
}

#[tokio::test]
async fn test_success_without_message_name() {
    let server = MockServer::start().await;
    mount_token(&server, "T1").await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).send("abc123", "Hi", "there").await.unwrap();
    assert!(result.message_id.is_none());
}

#[tokio::test]
async fn test_gateway_rejection_is_passed_through_without_retry() {
    let server = MockServer::start().await;
    mount_token(&server, "T1").await;

    let gateway_body = r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_string(gateway_body))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .send("stale-token", "Hi", "there")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        FCMError::Send {
            status: 404,
            body: gateway_body.to_string()
        }
    );
    assert_eq!(err.caller_detail(), gateway_body);
}

#[tokio::test]
async fn test_missing_access_token_never_reaches_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": "invalid_grant"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .send("abc123", "Hi", "there")
        .await
        .unwrap_err();
    assert_eq!(err.stage(), "token_exchange");
}

#[tokio::test]
async fn test_each_send_mints_a_new_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "T1"
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.send("device-a", "Hi", "one").await.unwrap();
    client.send("device-b", "Hi", "two").await.unwrap();
}

#[tokio::test]
async fn test_slow_gateway_times_out() {
    let server = MockServer::start().await;
    mount_token(&server, "T1").await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .send("abc123", "Hi", "there")
        .await
        .unwrap_err();
    assert_eq!(err, FCMError::Timeout("send"));
}

#[tokio::test]
async fn test_slow_token_endpoint_times_out_before_send() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"access_token": "T1"}))
                .set_delay(Duration::from_secs(3)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .send("abc123", "Hi", "there")
        .await
        .unwrap_err();
    assert_eq!(err, FCMError::Timeout("token exchange"));
    assert_eq!(err.stage(), "timeout");
}

#[test]
#[serial]
fn test_credentials_from_env() {
    std::env::set_var(ENV_CLIENT_EMAIL, EMAIL);
    std::env::set_var(ENV_PRIVATE_KEY, PRIVATE_KEY.replace('\n', "\\n"));
    std::env::set_var(ENV_PROJECT_ID, "chat-app");

    let creds = ServiceAccountKey::from_env().unwrap();
    assert_eq!(creds.client_email, EMAIL);
    assert_eq!(creds.project_id, "chat-app");
    assert!(creds.private_key.contains('\n'));
    assert!(!creds.private_key.contains("\\n"));
    assert!(FCMClient::new(creds, FcmClientConfig::default()).is_ok());

    std::env::remove_var(ENV_CLIENT_EMAIL);
    std::env::remove_var(ENV_PRIVATE_KEY);
    std::env::remove_var(ENV_PROJECT_ID);
}

#[test]
#[serial]
fn test_credentials_from_env_missing_project() {
    std::env::set_var(ENV_CLIENT_EMAIL, EMAIL);
    std::env::set_var(ENV_PRIVATE_KEY, PRIVATE_KEY);
    std::env::remove_var(ENV_PROJECT_ID);

    let err = ServiceAccountKey::from_env().unwrap_err();
    assert_eq!(err, FCMError::Config("FCM_PROJECT_ID is not set".to_string()));

    std::env::remove_var(ENV_CLIENT_EMAIL);
    std::env::remove_var(ENV_PRIVATE_KEY);
}
