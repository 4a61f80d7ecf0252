use crate::tools::{AppData, Services};
use reqwest::StatusCode;
use rsvp::utils::events::errors::EventError;
use rsvp::utils::events::models::EventChanges;
use serde_json::json;
use time::macros::datetime;
use tracing_test::traced_test;


#[traced_test]
#[tokio::test]
async fn create_event_health_check() {
    let services = Services::new();
    let alice = services.user("alice").await;

    let event = services
        .events
        .create(
            "Party".to_string(),
            Some("Bring snacks".to_string()),
            datetime!(2030-05-01 18:00 UTC),
            "Home".to_string(),
            alice.id,
        )
        .await
        .unwrap();

    assert_eq!(event.creator_id, alice.id);
    assert_eq!(event.created_at, event.updated_at);
    assert_eq!(services.events.get_by_id(event.id).await.unwrap(), event);
}

#[traced_test]
#[tokio::test]
async fn get_missing_event() {
    let services = Services::new();
    let res = services.events.get_by_id(404).await;

    match res {
        Err(EventError::NotFound) => (),
        _ => panic!("Test gives the result {:?}", res),
    }
}

#[traced_test]
#[tokio::test]
async fn partial_update_keeps_other_fields() {
    let services = Services::new();
    let alice = services.user("alice").await;
    let event = services.event(&alice, "Party").await;

    let updated = services
        .events
        .update(
            event.id,
            EventChanges {
                location: Some("Office".to_string()),
                ..Default::default()
            },
            alice.id,
        )
        .await
        .unwrap();

    assert_eq!(updated.location, "Office");
    assert_eq!(updated.title, event.title);
    assert_eq!(updated.date, event.date);
    assert_eq!(updated.created_at, event.created_at);
    assert!(updated.updated_at >= event.updated_at);
}

#[traced_test]
#[tokio::test]
async fn only_creator_mutates_event() {
    let services = Services::new();
    let alice = services.user("alice").await;
    let bob = services.user("bob").await;
    let event = services.event(&alice, "Party").await;

    let res = services
        .events
        .update(
            event.id,
            EventChanges {
                title: Some("Hijacked".to_string()),
                ..Default::default()
            },
            bob.id,
        )
        .await;
    match res {
        Err(EventError::NotCreator(_)) => (),
        _ => panic!("Test gives the result {:?}", res),
    }

    let res = services.events.delete(event.id, bob.id).await;
    match res {
        Err(EventError::NotCreator(_)) => (),
        _ => panic!("Test gives the result {:?}", res),
    }

    assert_eq!(services.events.get_by_id(event.id).await.unwrap(), event);
}

#[traced_test]
#[tokio::test]
async fn delete_event_removes_it() {
    let services = Services::new();
    let alice = services.user("alice").await;
    let event = services.event(&alice, "Party").await;

    services.events.delete(event.id, alice.id).await.unwrap();

    assert!(matches!(
        services.events.get_by_id(event.id).await,
        Err(EventError::NotFound)
    ));
    assert!(matches!(
        services.events.delete(event.id, alice.id).await,
        Err(EventError::NotFound)
    ));
}

#[traced_test]
#[tokio::test]
async fn listings_are_newest_first() {
    let services = Services::new();
    let alice = services.user("alice").await;
    let bob = services.user("bob").await;

    let early = services
        .events
        .create(
            "Early".to_string(),
            None,
            datetime!(2030-01-01 10:00 UTC),
            "Home".to_string(),
            alice.id,
        )
        .await
        .unwrap();
    let late = services
        .events
        .create(
            "Late".to_string(),
            None,
            datetime!(2031-01-01 10:00 UTC),
            "Home".to_string(),
            alice.id,
        )
        .await
        .unwrap();
    let other = services.event(&bob, "Bob's").await;

    let mine: Vec<i64> = services
        .events
        .get_by_creator(alice.id)
        .await
        .unwrap()
        .into_iter()
        .map(|event| event.id)
        .collect();
    assert_eq!(mine, vec![late.id, early.id]);

    let all = services.events.get_all().await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().any(|event| event.id == other.id));
    assert!(all.windows(2).all(|pair| pair[0].date >= pair[1].date));
}

#[traced_test]
#[tokio::test]
async fn api_events_status_codes() {
    let app = AppData::new().await;
    let (_, alice) = app.register("alice", "a@x.com").await;
    let (_, bob) = app.register("bob", "b@x.com").await;
    let event_id = app.create_event(&alice, "Party").await;

    let res = app
        .post("/events", None)
        .json(&json!({ "title": "Anon", "date": "2030-05-01T18:00:00Z", "location": "Home" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app
        .post("/events", Some(&alice))
        .json(&json!({ "title": "", "date": "2030-05-01T18:00:00Z", "location": "Home" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.get("/events/999999", None).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app
        .put(&format!("/events/{event_id}"), Some(&bob))
        .json(&json!({ "title": "Hijacked" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app
        .delete(&format!("/events/{event_id}"), Some(&bob))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app
        .put(&format!("/events/{event_id}"), Some(&alice))
        .json(&json!({ "location": "Office" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = tools::body(res).await;
    assert_eq!(body["event"]["location"], "Office");
    assert_eq!(body["event"]["title"], "Party");

    let res = app.get("/events/my", Some(&bob)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(tools::body(res).await["events"], json!([]));

    let res = app.get("/events", None).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(tools::body(res).await["events"][0]["id"], event_id);

    let res = app
        .delete(&format!("/events/{event_id}"), Some(&alice))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .get(&format!("/events/{event_id}"), None)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
