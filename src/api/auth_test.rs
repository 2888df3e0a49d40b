use super::*;
use crate::session::{SessionStore, Tokens};
use crate::test_support::{Reply, ScriptedBackend, client_for};
use serde_json::{Value, json};

#[tokio::test]
async fn login_persists_exactly_tokens_and_user() {
    let user = json!({ "id": 7, "phone_number": "0240000000", "role": "supervisor" });
    let backend = ScriptedBackend::default();
    backend.reply(
        "POST",
        LOGIN_PATH,
        Reply::json(200, json!({ "tokens": { "access": "acc-9", "refresh": "ref-9" }, "user": user })),
    );
    let base = backend.start().await;
    let (store, client) = client_for(&base);

    let grant = login(&client, "0240000000", "hunter2", Role::Supervisor).await.unwrap();

    assert_eq!(grant.tokens, Some(Tokens { access: "acc-9".into(), refresh: "ref-9".into() }));
    let values = store.snapshot();
    assert_eq!(values.len(), 3);
    assert_eq!(values["access_token"], "acc-9");
    assert_eq!(values["refresh_token"], "ref-9");
    assert_eq!(serde_json::from_str::<Value>(&values["user"]).unwrap(), user);

    let sent = backend.last();
    assert_eq!(
        sent.body,
        Some(json!({ "phone_number": "0240000000", "password": "hunter2", "role": "supervisor" }))
    );
    assert_eq!(sent.header("authorization"), None);
}

#[tokio::test]
async fn login_rejection_surfaces_detail_and_stores_nothing() {
    let backend = ScriptedBackend::default();
    backend.reply("POST", LOGIN_PATH, Reply::json(400, json!({ "detail": "Invalid phone number or password" })));
    let base = backend.start().await;
    let (store, client) = client_for(&base);

    let err = login(&client, "0240000000", "wrong", Role::Admin).await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid phone number or password (status 400)");
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn login_requires_credentials_before_sending() {
    let backend = ScriptedBackend::default();
    let base = backend.start().await;
    let (_store, client) = client_for(&base);

    let err = login(&client, " ", "", Role::Supervisor).await.unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert!(backend.seen().is_empty());
}

#[tokio::test]
async fn logout_sends_tokens_and_clears_session() {
    let backend = ScriptedBackend::default();
    backend.reply("POST", LOGOUT_PATH, Reply::json(200, json!({ "detail": "Logged out" })));
    let base = backend.start().await;
    let (store, client) = client_for(&base);
    client
        .session()
        .persist(
            Some(&Tokens { access: "a1".into(), refresh: "r1".into() }),
            Some(&json!({ "id": 1 })),
            Some(&json!({ "id": 2 })),
        )
        .unwrap();

    logout(&client).await.unwrap();

    assert_eq!(backend.last().body, Some(json!({ "refresh": "r1", "access": "a1" })));
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn logout_clears_session_even_when_backend_fails() {
    let backend = ScriptedBackend::default();
    backend.reply("POST", LOGOUT_PATH, Reply::text(500, "boom"));
    let base = backend.start().await;
    let (store, client) = client_for(&base);
    store.set("access_token", "a1".to_owned()).unwrap();
    store.set("company", r#"{"id":2}"#.to_owned()).unwrap();

    logout(&client).await.unwrap();

    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn rejected_credentials_keep_backend_detail_and_existing_session() {
    let backend = ScriptedBackend::default();
    backend.reply(
        "POST",
        LOGIN_PATH,
        Reply::json(401, json!({ "detail": "No active account found with the given credentials" })),
    );
    let base = backend.start().await;
    let (store, client) = client_for(&base);
    store.set("access_token", "still-valid".to_owned()).unwrap();

    let err = login(&client, "0240000000", "wrong", Role::Supervisor).await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "No active account found with the given credentials (status 401)");
    assert_eq!(crate::routes::redirect_for(&err), None);
    assert_eq!(store.snapshot()["access_token"], "still-valid");
}

#[tokio::test]
async fn corrupt_session_file_does_not_block_login_or_logout() {
    use crate::config::ClientConfig;
    use crate::session::{FileStore, Session};

    let path = std::env::temp_dir()
        .join(format!("borla-auth-{}", uuid::Uuid::new_v4()))
        .join("session.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, br#"{"access_token": "#).unwrap();

    let backend = ScriptedBackend::default();
    backend
        .reply(
            "POST",
            LOGIN_PATH,
            Reply::json(200, json!({ "tokens": { "access": "acc-1", "refresh": "ref-1" }, "user": { "id": 1 } })),
        )
        .reply("POST", LOGOUT_PATH, Reply::json(200, json!({ "detail": "Logged out" })));
    let base = backend.start().await;
    let config = ClientConfig::new(&base, Some(path.clone())).unwrap();
    let client = ApiClient::new(&config, Session::new(FileStore::new(path.clone()))).unwrap();

    login(&client, "0240000000", "hunter2", Role::Admin).await.unwrap();
    assert_eq!(client.session().access_token().unwrap().as_deref(), Some("acc-1"));

    std::fs::write(&path, b"{not json").unwrap();
    logout(&client).await.unwrap();

    assert_eq!(backend.seen().len(), 2);
    assert!(!client.session().is_authenticated());
}
