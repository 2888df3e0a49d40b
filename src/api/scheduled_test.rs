use super::*;
use crate::test_support::{Reply, ScriptedBackend, client_for};
use serde_json::json;

#[tokio::test]
async fn list_pending_decodes_pickups() {
    let backend = ScriptedBackend::default();
    backend.reply(
        "GET",
        PENDING_REQUESTS_PATH,
        Reply::json(
            200,
            json!([{
                "id": 15,
                "address_line1": "12 Oxford St",
                "city": "Accra",
                "waste_type": "plastic",
                "pickup_date": "2026-10-21",
                "pickup_time_slot": "08:00-10:00",
                "producer": 3
            }]),
        ),
    );
    let base = backend.start().await;
    let (_store, client) = client_for(&base);

    let pending = list_pending(&client).await.unwrap();

    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, 15);
    assert_eq!(pending[0].pickup_time_slot, "08:00-10:00");
}

#[tokio::test]
async fn assign_posts_collector_id() {
    let backend = ScriptedBackend::default();
    backend.reply("POST", "/api/scheduled-requests/15/assign/", Reply::json(200, json!({ "status": "assigned" })));
    let base = backend.start().await;
    let (_store, client) = client_for(&base);

    let outcome = assign(&client, 15, 42).await.unwrap();

    assert_eq!(outcome["status"], json!("assigned"));
    assert_eq!(backend.last().body, Some(json!({ "collector": 42 })));
}

#[tokio::test]
async fn assign_conflict_reports_field_error() {
    let backend = ScriptedBackend::default();
    backend.reply(
        "POST",
        "/api/scheduled-requests/15/assign/",
        Reply::json(400, json!({ "collector": ["Collector is not active."] })),
    );
    let base = backend.start().await;
    let (_store, client) = client_for(&base);

    let err = assign(&client, 15, 42).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().starts_with("collector: "), "{err}");
}
