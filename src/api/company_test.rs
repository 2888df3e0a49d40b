use super::*;
use crate::api::types::WorkingDays;
use crate::api::split_list;
use crate::test_support::{Reply, ScriptedBackend, client_for};
use serde_json::json;

fn registration() -> CompanyRegistration {
    CompanyRegistration {
        company_name: "Clean Accra".into(),
        profile_photo: "https://example.com/logo.png".into(),
        phone_number: "0301234567".into(),
        password: "s3cret".into(),
        gst_number: "GST-001".into(),
        complaint_resolution_sla: Some(48),
        working_days: WorkingDays::all(),
        opening_time: "07:00".into(),
        closing_time: "18:00".into(),
        operational_cities: split_list("Accra, Tema"),
        ..CompanyRegistration::default()
    }
}

#[test]
fn validate_requires_sla() {
    let mut reg = registration();
    reg.complaint_resolution_sla = None;
    let err = reg.validate().unwrap_err();
    assert!(err.to_string().contains("complaint_resolution_sla"));
}

#[test]
fn validate_names_blank_fields() {
    let mut reg = registration();
    reg.gst_number.clear();
    reg.closing_time = " ".into();
    let err = reg.validate().unwrap_err().to_string();
    assert!(err.contains("gst_number, closing_time"), "{err}");
}

#[tokio::test]
async fn register_persists_tokens_user_and_company() {
    let backend = ScriptedBackend::default();
    backend.reply(
        "POST",
        COMPANY_REGISTER_PATH,
        Reply::json(
            201,
            json!({
                "tokens": { "access": "acc-c", "refresh": "ref-c" },
                "user": { "id": 12 },
                "company": { "id": 4, "company_name": "Clean Accra" }
            }),
        ),
    );
    let base = backend.start().await;
    let (store, client) = client_for(&base);

    register(&client, &registration()).await.unwrap();

    assert_eq!(store.snapshot().len(), 4);
    assert_eq!(client.session().company_id(), Some(4));
    let body = backend.last().body.unwrap();
    assert_eq!(body["working_days"]["sunday"], json!(true));
    assert_eq!(body["operational_cities"], json!(["Accra", "Tema"]));
}

#[tokio::test]
async fn register_without_tokens_leaves_session_untouched() {
    let backend = ScriptedBackend::default();
    backend.reply("POST", COMPANY_REGISTER_PATH, Reply::json(201, json!({ "id": 4 })));
    let base = backend.start().await;
    let (store, client) = client_for(&base);

    register(&client, &registration()).await.unwrap();

    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn update_profile_merges_changes_over_current_record() {
    let current = json!({
        "id": 4,
        "company_name": "Clean Accra",
        "email": "old@example.com",
        "working_days": { "monday": true },
        "operational_cities": ["Accra"]
    });
    let mut updated = current.clone();
    updated["email"] = json!("new@example.com");

    let backend = ScriptedBackend::default();
    backend.reply("GET", COMPANY_PROFILE_PATH, Reply::json(200, current));
    backend.reply("PUT", COMPANY_PROFILE_PATH, Reply::json(200, updated));
    let base = backend.start().await;
    let (_store, client) = client_for(&base);

    let change = CompanyProfileUpdate { email: Some("new@example.com".into()), ..CompanyProfileUpdate::default() };
    let profile = update_profile(&client, &change).await.unwrap();

    assert_eq!(profile.email.as_deref(), Some("new@example.com"));
    let sent = backend.last();
    assert_eq!(sent.method, "PUT");
    let body = sent.body.unwrap();
    assert_eq!(body["email"], json!("new@example.com"));
    assert_eq!(body["company_name"], json!("Clean Accra"));
}

#[tokio::test]
async fn profile_not_found_is_an_application_error() {
    let backend = ScriptedBackend::default();
    backend.reply("GET", COMPANY_PROFILE_PATH, Reply::json(404, json!({ "detail": "Company profile not found." })));
    let base = backend.start().await;
    let (_store, client) = client_for(&base);

    let err = profile(&client).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[test]
fn merge_update_rejects_non_object_profile() {
    let err = merge_update(json!([1, 2]), &CompanyProfileUpdate::default()).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn register_rejected_with_401_is_an_application_error() {
    let backend = ScriptedBackend::default();
    backend.reply("POST", COMPANY_REGISTER_PATH, Reply::json(401, json!({ "detail": "Registration is closed." })));
    let base = backend.start().await;
    let (store, client) = client_for(&base);
    client
        .session()
        .persist(None, Some(&json!({ "id": 1 })), None)
        .unwrap();

    let err = register(&client, &registration()).await.unwrap_err();

    assert!(matches!(err, ApiError::Application { status: 401, .. }));
    assert!(store.snapshot().contains_key("user"));
}
