use crate::tools::{AppData, Services, PASSWORD};
use nanoid::nanoid;
use reqwest::StatusCode;
use rsvp::utils::auth::errors::AuthError;
use secrecy::SecretString;
use serde_json::json;
use tracing_test::traced_test;


fn password(value: &str) -> SecretString {
    SecretString::new(value.to_string())
}

#[traced_test]
#[tokio::test]
async fn registration_issues_valid_credential() {
    let services = Services::new();
    let authenticated = services
        .identity
        .register("alice", "a@x.com", password(PASSWORD))
        .await
        .unwrap();

    assert_eq!(authenticated.user.username, "alice");
    assert_ne!(authenticated.user.password_hash, PASSWORD);

    let user = services
        .identity
        .validate_credential(&authenticated.token)
        .await
        .unwrap();
    assert_eq!(user.id, authenticated.user.id);
}

#[traced_test]
#[tokio::test]
async fn registration_email_taken() {
    let services = Services::new();
    services.user("alice").await;

    let res = services
        .identity
        .register("alice2", "alice@x.com", password(PASSWORD))
        .await;

    match res {
        Err(AuthError::EmailTaken) => (),
        _ => panic!("Test gives the result {:?}", res),
    }
    assert_eq!(services.store.user_count().await, 1);
}

#[traced_test]
#[tokio::test]
async fn registration_username_taken() {
    let services = Services::new();
    services.user("alice").await;

    let res = services
        .identity
        .register("alice", "other@x.com", password(PASSWORD))
        .await;

    match res {
        Err(AuthError::UsernameTaken) => (),
        _ => panic!("Test gives the result {:?}", res),
    }
    assert_eq!(services.store.user_count().await, 1);
}

#[traced_test]
#[tokio::test]
async fn login_wrong_password_and_unknown_email_look_alike() {
    let services = Services::new();
    services.user("alice").await;

    let wrong_password = services
        .identity
        .authenticate("alice@x.com", password("pw654321"))
        .await
        .unwrap_err();
    let unknown_email = services
        .identity
        .authenticate("nobody@x.com", password(PASSWORD))
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, AuthError::WrongEmailOrPassword));
    assert!(matches!(unknown_email, AuthError::WrongEmailOrPassword));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[traced_test]
#[tokio::test]
async fn login_health_check() {
    let services = Services::new();
    let alice = services.user("alice").await;

    let authenticated = services
        .identity
        .authenticate("alice@x.com", password(PASSWORD))
        .await
        .unwrap();
    assert_eq!(authenticated.user.id, alice.id);
}

#[traced_test]
#[tokio::test]
async fn credential_garbage_is_invalid() {
    let services = Services::new();
    let res = services.identity.validate_credential("not.a.token").await;

    match res {
        Err(AuthError::InvalidToken) => (),
        _ => panic!("Test gives the result {:?}", res),
    }
}

#[traced_test]
#[tokio::test]
async fn api_register_login_profile() {
    let app = AppData::new().await;
    let email = format!("{}@x.com", nanoid!(10));

    let (user_id, token) = app.register("alice", &email).await;

    let res = app
        .post("/auth/login", None)
        .json(&json!({ "email": email, "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res
        .headers()
        .get_all("set-cookie")
        .iter()
        .any(|cookie| cookie.to_str().unwrap_or_default().starts_with("jwt=")));

    let res = app.get("/auth/profile", Some(&token)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = tools::body(res).await;
    assert_eq!(body["user"]["id"], user_id);
    assert_eq!(body["user"]["email"], email.as_str());
    assert!(body["user"].get("password_hash").is_none());
}

#[traced_test]
#[tokio::test]
async fn api_register_rejects_invalid_fields() {
    let app = AppData::new().await;

    for body in [
        json!({ "username": "alice", "email": "not-an-email", "password": PASSWORD }),
        json!({ "username": "alice", "email": "a@x.com", "password": "123" }),
        json!({ "username": "   ", "email": "a@x.com", "password": PASSWORD }),
        json!({ "email": "a@x.com", "password": PASSWORD }),
    ] {
        let res = app
            .post("/auth/register", None)
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert!(tools::body(res).await["error_info"].is_string());
    }
}

#[traced_test]
#[tokio::test]
async fn api_register_duplicate_email() {
    let app = AppData::new().await;
    app.register("alice", "a@x.com").await;

    let res = app
        .post("/auth/register", None)
        .json(&json!({ "username": "alice2", "email": "a@x.com", "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        tools::body(res).await["error_info"],
        "email already registered"
    );
}

#[traced_test]
#[tokio::test]
async fn api_profile_requires_credential() {
    let app = AppData::new().await;

    let res = app.get("/auth/profile", None).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app
        .get("/auth/profile", Some("garbage"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[traced_test]
#[tokio::test]
async fn api_emails_are_trimmed() {
    let app = AppData::new().await;

    let res = app
        .post("/auth/register", None)
        .json(&json!({ "username": " alice ", "email": "  a@x.com ", "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = tools::body(res).await;
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["username"], "alice");

    let res = app
        .post("/auth/login", None)
        .json(&json!({ "email": "a@x.com ", "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
