//! Event lifecycle tests

use std::sync::Arc;
use assert_matches::assert_matches;
use uuid::Uuid;
use campus_events::i18n::Language;
use campus_events::models::{Actor, Category, EventChanges, EventStatus, NewEvent};
use campus_events::CampusEventsError;

use crate::helpers::{new_event, new_event_with_seats, TestContext, UnavailableTranslator};

#[tokio::test]
async fn test_create_event_sets_pending_and_translates() {
    let ctx = TestContext::new();

    let event = ctx
        .services
        .event_service
        .create_event(&ctx.organizer, new_event("Robotics Meetup"))
        .await
        .unwrap();

    assert_eq!(event.status, EventStatus::Pending);
    assert_eq!(event.organizer_id, ctx.organizer.id);
    assert_eq!(event.category, Category::Tech);
    assert_eq!(event.total_seats, 100);
    assert_eq!(event.rejection_reason, None);
    assert_eq!(event.title.canonical(), Some("Robotics Meetup"));
    for lang in Language::TARGETS {
        assert_eq!(
            event.title.get(lang),
            Some(format!("[{}] Robotics Meetup", lang.code()).as_str())
        );
    }
    assert_eq!(ctx.translator.calls().len(), 2);
}

#[tokio::test]
async fn test_create_event_validates_before_translating() {
    let ctx = TestContext::new();
    let events = &ctx.services.event_service;

    let cases = vec![
        NewEvent { category: "Music".to_string(), ..new_event("Gig") },
        NewEvent { category: String::new(), ..new_event("Gig") },
        NewEvent { date: String::new(), ..new_event("Gig") },
        NewEvent { time: " ".to_string(), ..new_event("Gig") },
        NewEvent { venue: String::new(), ..new_event("Gig") },
        NewEvent { title: String::new(), ..new_event("Gig") },
        new_event_with_seats("Gig", 0),
    ];

    for input in cases {
        assert_matches!(
            events.create_event(&ctx.organizer, input).await,
            Err(CampusEventsError::Validation(_))
        );
    }
    assert!(ctx.translator.calls().is_empty());
}

#[tokio::test]
async fn test_create_event_requires_organizer() {
    let ctx = TestContext::new();
    let student = ctx.student();

    let result = ctx.services.event_service.create_event(&student, new_event("Gig")).await;
    assert_matches!(result, Err(CampusEventsError::PermissionDenied(_)));
}

#[tokio::test]
async fn test_translation_outage_keeps_canonical_text() {
    let ctx = TestContext::new();
    let events = ctx.event_service_with(Arc::new(UnavailableTranslator));

    let event = events.create_event(&ctx.organizer, new_event("Film Club")).await.unwrap();

    assert_eq!(event.title.canonical(), Some("Film Club"));
    assert_eq!(event.title.resolve("ta"), "Film Club");
    assert_eq!(event.description.resolve("hi"), "Film Club for everyone on campus");
}

#[tokio::test]
async fn test_update_by_non_owner_is_denied() {
    let ctx = TestContext::new();
    let event = ctx.approved_event(10).await;
    let intruder = Actor::organizer(Uuid::new_v4());

    let result = ctx
        .services
        .event_service
        .update_event(&intruder, event.id, EventChanges { venue: Some("Roof".to_string()), ..Default::default() })
        .await;
    assert_matches!(result, Err(CampusEventsError::PermissionDenied(_)));
}

#[tokio::test]
async fn test_update_missing_event() {
    let ctx = TestContext::new();
    let result = ctx
        .services
        .event_service
        .update_event(&ctx.organizer, Uuid::new_v4(), EventChanges::default())
        .await;
    assert_matches!(result, Err(CampusEventsError::EventNotFound { .. }));
}

#[tokio::test]
async fn test_update_pending_event_fails() {
    let ctx = TestContext::new();
    let event = ctx.pending_event(10).await;

    let result = ctx
        .services
        .event_service
        .update_event(&ctx.organizer, event.id, EventChanges::default())
        .await;
    assert_matches!(result, Err(CampusEventsError::InvalidState(_)));
}

#[tokio::test]
async fn test_update_approved_event_returns_to_review() {
    let ctx = TestContext::new();
    let event = ctx.approved_event(10).await;
    let calls_before = ctx.translator.calls().len();

    let updated = ctx
        .services
        .event_service
        .update_event(
            &ctx.organizer,
            event.id,
            EventChanges {
                title: Some("Robotics Meetup".to_string()),
                venue: Some("Lab 7".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, EventStatus::Pending);
    assert_eq!(updated.venue, "Lab 7");
    assert_eq!(updated.title, event.title);
    assert!(updated.version > event.version);
    // Unchanged title is not re-translated
    assert_eq!(ctx.translator.calls().len(), calls_before);
}

#[tokio::test]
async fn test_update_retranslates_changed_title() {
    let ctx = TestContext::new();
    let event = ctx.approved_event(10).await;

    let updated = ctx
        .services
        .event_service
        .update_event(
            &ctx.organizer,
            event.id,
            EventChanges { title: Some("Robotics Finals".to_string()), ..Default::default() },
        )
        .await
        .unwrap();

    assert_eq!(updated.title.canonical(), Some("Robotics Finals"));
    assert_eq!(updated.title.get(Language::Bn), Some("[bn] Robotics Finals"));
    assert_eq!(updated.description, event.description);
    assert_eq!(ctx.translator.calls().last().map(String::as_str), Some("Robotics Finals"));
}

#[tokio::test]
async fn test_localized_view_counts_seats() {
    let ctx = TestContext::new();
    let event = ctx.approved_event(3).await;
    let student = ctx.student();
    ctx.services.registration_service.register(&student, event.id).await.unwrap();

    let view = ctx.services.event_service.get_localized_view(event.id, "gu").await.unwrap();

    assert_eq!(view.title, "[gu] Robotics Meetup");
    assert_eq!(view.registered_count, 1);
    assert_eq!(view.seats_available, 2);

    let missing = ctx.services.event_service.get_localized_view(Uuid::new_v4(), "en").await;
    assert_matches!(missing, Err(CampusEventsError::EventNotFound { .. }));
}

#[tokio::test]
async fn test_listings() {
    let ctx = TestContext::new();
    let approved = ctx.approved_event(10).await;
    let pending = ctx.pending_event(10).await;

    let public = ctx.services.event_service.list_approved("en", None).await.unwrap();
    assert_eq!(public.iter().map(|v| v.id).collect::<Vec<_>>(), vec![approved.id]);

    let sports = ctx
        .services
        .event_service
        .list_approved("en", Some(Category::Sports))
        .await
        .unwrap();
    assert!(sports.is_empty());

    let mine = ctx.services.event_service.list_for_organizer(&ctx.organizer, "en").await.unwrap();
    assert_eq!(mine.iter().map(|v| v.id).collect::<Vec<_>>(), vec![pending.id, approved.id]);

    let queue = ctx.services.event_service.list_pending(&ctx.admin, "en").await.unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].id, pending.id);
}
