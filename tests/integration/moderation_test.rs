//! Moderation workflow tests

use assert_matches::assert_matches;
use uuid::Uuid;
use campus_events::models::{EventChanges, EventStatus, NotificationType};
use campus_events::CampusEventsError;

use crate::helpers::TestContext;

#[tokio::test]
async fn test_approve_notifies_organizer() {
    let ctx = TestContext::new();
    let event = ctx.pending_event(10).await;

    let approved = ctx.services.moderation_service.approve(&ctx.admin, event.id).await.unwrap();
    assert_eq!(approved.status, EventStatus::Approved);

    let inbox = ctx.services.notification_service.list_for_user(&ctx.organizer).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind, NotificationType::Approval);
    assert!(inbox[0].message.contains("Robotics Meetup"));

    let pushed = ctx.sink.published_to(ctx.organizer.id);
    assert_eq!(pushed.len(), 1);
    assert_eq!(pushed[0].event, "notification");
    assert_eq!(pushed[0].data, inbox[0]);
}

#[tokio::test]
async fn test_reject_stores_reason() {
    let ctx = TestContext::new();
    let event = ctx.pending_event(10).await;

    let rejected = ctx
        .services
        .moderation_service
        .reject(&ctx.admin, event.id, Some("Venue unavailable".to_string()))
        .await
        .unwrap();

    assert_eq!(rejected.status, EventStatus::Rejected);
    assert_eq!(rejected.rejection_reason.as_deref(), Some("Venue unavailable"));

    let inbox = ctx.services.notification_service.list_for_user(&ctx.organizer).await.unwrap();
    assert_eq!(inbox[0].kind, NotificationType::Rejection);
    assert!(inbox[0].message.contains("Venue unavailable"));
}

#[tokio::test]
async fn test_blank_reason_stored_as_none() {
    let ctx = TestContext::new();
    let event = ctx.pending_event(10).await;

    let rejected = ctx
        .services
        .moderation_service
        .reject(&ctx.admin, event.id, Some("   ".to_string()))
        .await
        .unwrap();
    assert_eq!(rejected.rejection_reason, None);
}

#[tokio::test]
async fn test_non_admin_gets_generic_denial() {
    let ctx = TestContext::new();
    let event = ctx.pending_event(10).await;

    for actor in [ctx.organizer, ctx.student()] {
        let err = ctx.services.moderation_service.approve(&actor, event.id).await.unwrap_err();
        assert_matches!(err, CampusEventsError::PermissionDenied(ref message) if message == "Not authorized");

        let err = ctx.services.moderation_service.reject(&actor, event.id, None).await.unwrap_err();
        assert_eq!(err.kind().as_str(), "authorization");
    }
}

#[tokio::test]
async fn test_decisions_only_from_pending() {
    let ctx = TestContext::new();
    let moderation = &ctx.services.moderation_service;

    let approved = ctx.approved_event(10).await;
    assert_matches!(
        moderation.approve(&ctx.admin, approved.id).await,
        Err(CampusEventsError::InvalidStateTransition { .. })
    );
    assert_matches!(
        moderation.reject(&ctx.admin, approved.id, None).await,
        Err(CampusEventsError::InvalidStateTransition { .. })
    );

    let missing = moderation.approve(&ctx.admin, Uuid::new_v4()).await;
    assert_matches!(missing, Err(CampusEventsError::EventNotFound { .. }));
}

#[tokio::test]
async fn test_racing_decisions_have_one_winner() {
    let ctx = TestContext::new();
    let event_id = ctx.pending_event(10).await.id;
    let moderation = ctx.services.moderation_service.clone();
    let other = moderation.clone();
    let admin = ctx.admin;

    let (approve, reject) = tokio::join!(
        tokio::spawn(async move { moderation.approve(&admin, event_id).await }),
        tokio::spawn(async move { other.reject(&admin, event_id, Some("Duplicate".to_string())).await }),
    );
    let outcomes = [approve.unwrap(), reject.unwrap()];

    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    let loser = outcomes.iter().find_map(|r| r.as_ref().err()).unwrap();
    assert_eq!(loser.kind().as_str(), "invalid_state");
}

#[tokio::test]
async fn test_rejected_event_can_be_resubmitted_and_approved() {
    let ctx = TestContext::new();
    let event = ctx.pending_event(10).await;
    ctx.services
        .moderation_service
        .reject(&ctx.admin, event.id, Some("Missing details".to_string()))
        .await
        .unwrap();

    let resubmitted = ctx
        .services
        .event_service
        .update_event(
            &ctx.organizer,
            event.id,
            EventChanges { description: Some("Now with an agenda".to_string()), ..Default::default() },
        )
        .await
        .unwrap();
    assert_eq!(resubmitted.status, EventStatus::Pending);
    assert_eq!(resubmitted.rejection_reason, None);

    let approved = ctx.services.moderation_service.approve(&ctx.admin, event.id).await.unwrap();
    assert_eq!(approved.status, EventStatus::Approved);
}
