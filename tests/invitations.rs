use crate::tools::{AppData, Services};
use reqwest::StatusCode;
use rsvp::utils::invitations::errors::InvitationError;
use rsvp::utils::invitations::models::{InvitationReply, InvitationStatus};
use serde_json::json;
use tracing_test::traced_test;


#[traced_test]
#[tokio::test]
async fn create_invitation_health_check() {
    let services = Services::new();
    let alice = services.user("alice").await;
    let bob = services.user("bob").await;
    let event = services.event(&alice, "Party").await;

    let invitation = services
        .invitations
        .create(event.id, bob.id, alice.id, Some("Come!".to_string()))
        .await
        .unwrap();

    assert_eq!(invitation.status, InvitationStatus::Pending);
    assert_eq!(invitation.inviter_id, alice.id);
    assert_eq!(invitation.invitee_id, bob.id);
    assert!(invitation.responded_at.is_none());
}

#[traced_test]
#[tokio::test]
async fn create_invitation_failures_in_order() {
    let services = Services::new();
    let alice = services.user("alice").await;
    let bob = services.user("bob").await;
    let event = services.event(&alice, "Party").await;

    // A missing event wins over every other failure.
    let res = services.invitations.create(404, alice.id, bob.id, None).await;
    assert!(matches!(res, Err(InvitationError::EventNotFound)), "{res:?}");

    // Not the creator wins over a missing invitee.
    let res = services.invitations.create(event.id, 404, bob.id, None).await;
    assert!(matches!(res, Err(InvitationError::NotEventCreator)), "{res:?}");

    let res = services.invitations.create(event.id, 404, alice.id, None).await;
    assert!(matches!(res, Err(InvitationError::InviteeNotFound)), "{res:?}");

    let res = services
        .invitations
        .create(event.id, alice.id, alice.id, None)
        .await;
    assert!(matches!(res, Err(InvitationError::SelfInvite)), "{res:?}");

    services
        .invitations
        .create(event.id, bob.id, alice.id, None)
        .await
        .unwrap();
    let res = services
        .invitations
        .create(event.id, bob.id, alice.id, None)
        .await;
    assert!(matches!(res, Err(InvitationError::AlreadySent)), "{res:?}");
}

#[traced_test]
#[tokio::test]
async fn respond_once_only() {
    let services = Services::new();
    let alice = services.user("alice").await;
    let bob = services.user("bob").await;
    let event = services.event(&alice, "Party").await;
    let invitation = services
        .invitations
        .create(event.id, bob.id, alice.id, None)
        .await
        .unwrap();

    let res = services
        .invitations
        .respond(invitation.id, alice.id, InvitationReply::Accepted)
        .await;
    assert!(matches!(res, Err(InvitationError::NotInvitee)), "{res:?}");

    let accepted = services
        .invitations
        .respond(invitation.id, bob.id, InvitationReply::Accepted)
        .await
        .unwrap();
    assert_eq!(accepted.status, InvitationStatus::Accepted);
    assert!(accepted.responded_at.is_some());

    let res = services
        .invitations
        .respond(invitation.id, bob.id, InvitationReply::Declined)
        .await;
    assert!(matches!(res, Err(InvitationError::AlreadyResponded)), "{res:?}");

    let res = services.invitations.cancel(invitation.id, alice.id).await;
    assert!(matches!(res, Err(InvitationError::NotCancellable)), "{res:?}");

    let stored = services.invitations.get_by_id(invitation.id).await.unwrap();
    assert_eq!(stored.status, InvitationStatus::Accepted);
}

#[traced_test]
#[tokio::test]
async fn declined_invitation_is_final() {
    let services = Services::new();
    let alice = services.user("alice").await;
    let bob = services.user("bob").await;
    let event = services.event(&alice, "Party").await;
    let invitation = services
        .invitations
        .create(event.id, bob.id, alice.id, None)
        .await
        .unwrap();

    let declined = services
        .invitations
        .respond(invitation.id, bob.id, InvitationReply::Declined)
        .await
        .unwrap();
    assert_eq!(declined.status, InvitationStatus::Declined);

    for reply in [InvitationReply::Accepted, InvitationReply::Declined] {
        let res = services.invitations.respond(invitation.id, bob.id, reply).await;
        assert!(matches!(res, Err(InvitationError::AlreadyResponded)), "{res:?}");
    }

    let stored = services.invitations.get_by_id(invitation.id).await.unwrap();
    assert_eq!(stored.status, InvitationStatus::Declined);
}

#[traced_test]
#[tokio::test]
async fn cancel_removes_pending_invitation() {
    let services = Services::new();
    let alice = services.user("alice").await;
    let bob = services.user("bob").await;
    let event = services.event(&alice, "Party").await;
    let invitation = services
        .invitations
        .create(event.id, bob.id, alice.id, None)
        .await
        .unwrap();

    let res = services.invitations.cancel(invitation.id, bob.id).await;
    assert!(matches!(res, Err(InvitationError::NotInviter)), "{res:?}");

    services
        .invitations
        .cancel(invitation.id, alice.id)
        .await
        .unwrap();

    let res = services.invitations.get_by_id(invitation.id).await;
    assert!(matches!(res, Err(InvitationError::NotFound)), "{res:?}");

    // The pair is free again once the invitation is gone.
    services
        .invitations
        .create(event.id, bob.id, alice.id, None)
        .await
        .unwrap();
}

#[traced_test]
#[tokio::test]
async fn listings_and_details() {
    let services = Services::new();
    let alice = services.user("alice").await;
    let bob = services.user("bob").await;
    let carol = services.user("carol").await;
    let party = services.event(&alice, "Party").await;
    let dinner = services.event(&alice, "Dinner").await;

    let first = services
        .invitations
        .create(party.id, bob.id, alice.id, None)
        .await
        .unwrap();
    let second = services
        .invitations
        .create(dinner.id, bob.id, alice.id, None)
        .await
        .unwrap();
    services
        .invitations
        .create(party.id, carol.id, alice.id, None)
        .await
        .unwrap();

    let received: Vec<i64> = services
        .invitations
        .get_for_invitee(bob.id)
        .await
        .unwrap()
        .into_iter()
        .map(|invitation| invitation.id)
        .collect();
    assert_eq!(received.len(), 2);
    assert!(received.contains(&first.id) && received.contains(&second.id));

    assert_eq!(services.invitations.get_for_inviter(alice.id).await.unwrap().len(), 3);
    assert_eq!(services.invitations.get_by_event(party.id).await.unwrap().len(), 2);
    assert!(services.invitations.get_for_invitee(alice.id).await.unwrap().is_empty());

    let details = services.invitations.get_with_details(first.id).await.unwrap();
    assert_eq!(details.invitation, first);
    assert_eq!(details.event, party);
    assert_eq!(details.inviter.id, alice.id);
    assert_eq!(details.invitee.id, bob.id);
}

#[traced_test]
#[tokio::test]
async fn deleting_event_drops_its_invitations() {
    let services = Services::new();
    let alice = services.user("alice").await;
    let bob = services.user("bob").await;
    let event = services.event(&alice, "Party").await;
    let invitation = services
        .invitations
        .create(event.id, bob.id, alice.id, None)
        .await
        .unwrap();

    services.events.delete(event.id, alice.id).await.unwrap();

    let res = services.invitations.get_by_id(invitation.id).await;
    assert!(matches!(res, Err(InvitationError::NotFound)), "{res:?}");
    assert!(services.invitations.get_for_invitee(bob.id).await.unwrap().is_empty());
}

#[traced_test]
#[tokio::test]
async fn api_invitations_status_codes() {
    let app = AppData::new().await;
    let (alice_id, alice) = app.register("alice", "a@x.com").await;
    let (bob_id, bob) = app.register("bob", "b@x.com").await;
    let (_, carol) = app.register("carol", "c@x.com").await;
    let event_id = app.create_event(&alice, "Party").await;

    assert_eq!(
        app.invite(&bob, event_id, alice_id).await.status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        app.invite(&alice, 999999, bob_id).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.invite(&alice, event_id, 999999).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.invite(&alice, event_id, alice_id).await.status(),
        StatusCode::BAD_REQUEST
    );

    let res = app.invite(&alice, event_id, bob_id).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let invitation_id = tools::body(res).await["invitation"]["id"].as_i64().unwrap();

    let res = app.invite(&alice, event_id, bob_id).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        tools::body(res).await["error_info"],
        "invitation already sent to this user"
    );

    let uri = format!("/invitations/{invitation_id}");
    let res = app.get(&uri, Some(&carol)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let res = app
        .get(&format!("{uri}/details"), Some(&carol))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app
        .get(&format!("/events/{event_id}/invitations"), Some(&carol))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(tools::body(res).await["invitations"], json!([]));

    let res = app
        .put(&format!("{uri}/respond"), Some(&bob))
        .json(&json!({ "status": "maybe" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app
        .put(&format!("{uri}/respond"), Some(&carol))
        .json(&json!({ "status": "accepted" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.delete(&uri, Some(&bob)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app
        .put(&format!("{uri}/respond"), Some(&bob))
        .json(&json!({ "status": "declined" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(tools::body(res).await["invitation"]["status"], "declined");

    let res = app.delete(&uri, Some(&alice)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
