//! Behavioural tests for the HTTP event store adapter and the views driven
//! through it, against an in-process JSON store.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "assertions index into fixed-size fixtures"
)]

use std::time::Duration;

use chrono::{FixedOffset, TimeZone, Utc};
use event_board::domain::ports::{EventStore, EventStoreError};
use event_board::domain::{CategoryId, EventId, UserId};
use event_board::outbound::json_store::HttpEventStore;
use event_board::views::{CreateView, DetailView, ListView, Navigation, NoticeKind};
use serde_json::json;
use std::sync::atomic::Ordering;
use url::Url;

mod support;

use support::json_store::{
    JsonStoreServer, seed_categories, seed_events, seed_users, unreachable_base_url,
};

fn client(base_url: &Url) -> HttpEventStore {
    HttpEventStore::new(base_url.clone(), Duration::from_secs(5)).expect("client builds")
}

fn zone() -> FixedOffset {
    FixedOffset::east_opt(2 * 3600).expect("valid offset")
}

#[actix_web::test]
async fn lists_seeded_collections() {
    let server = JsonStoreServer::start();
    let store = client(&server.base_url);

    let users = store.list_users().await.expect("users load");
    let categories = store.list_categories().await.expect("categories load");
    let events = store.list_events().await.expect("events load");

    assert_eq!(users.len(), 2);
    assert_eq!(categories[2].name, "food");
    assert_eq!(events.len(), 3);
    assert_eq!(events[1].category_ids, vec![CategoryId::new(2), CategoryId::new(3)]);
    assert_eq!(events[2].created_by, None, "missing createdBy decodes as unknown");
    assert_eq!(events[2].location, "");

    server.stop().await;
}

#[actix_web::test]
async fn missing_event_maps_to_not_found() {
    let server = JsonStoreServer::start();
    let store = client(&server.base_url);

    let found = store.get_event(EventId::new(2)).await.expect("event loads");
    assert_eq!(found.title, "Choir practice");

    let error = store
        .get_event(EventId::new(99))
        .await
        .expect_err("unknown id");
    assert!(matches!(error, EventStoreError::NotFound { .. }));

    server.stop().await;
}

#[actix_web::test]
async fn create_sends_camel_case_iso_payload() {
    let server = JsonStoreServer::start();
    let store = client(&server.base_url);
    let mut input = store
        .get_event(EventId::new(1))
        .await
        .expect("event loads")
        .to_input();
    input.title = "Second park run".to_owned();

    let created = store.create_event(&input).await.expect("create succeeds");

    assert_eq!(created.id, EventId::new(4));
    let raw = server.state.event(4).expect("stored");
    assert_eq!(raw["startTime"], json!("2024-06-01T08:00:00.000Z"));
    assert_eq!(raw["createdBy"], json!(1));
    assert_eq!(raw["categoryIds"], json!([1]));
    assert_eq!(raw["title"], json!("Second park run"));

    server.stop().await;
}

#[actix_web::test]
async fn replace_overwrites_the_whole_record() {
    let server = JsonStoreServer::start();
    let store = client(&server.base_url);
    let original = store.get_event(EventId::new(2)).await.expect("event loads");
    let mut input = original.to_input();
    input.location = "Village hall".to_owned();
    input.created_by = Some(UserId::new(1));

    let replaced = store
        .replace_event(original.id, &input)
        .await
        .expect("replace succeeds");

    assert_eq!(replaced, input.clone().into_event(original.id));
    let refetched = store.get_event(original.id).await.expect("event loads");
    assert_eq!(refetched.location, "Village hall");
    assert_eq!(refetched.description, original.description);

    server.stop().await;
}

#[actix_web::test]
async fn deleted_event_is_absent_from_next_list() {
    let server = JsonStoreServer::start();
    let store = client(&server.base_url);

    store
        .delete_event(EventId::new(1))
        .await
        .expect("delete succeeds");

    let ids: Vec<_> = store
        .list_events()
        .await
        .expect("events load")
        .into_iter()
        .map(|event| event.id)
        .collect();
    assert_eq!(ids, vec![EventId::new(2), EventId::new(3)]);

    let again = store.delete_event(EventId::new(1)).await;
    assert!(matches!(again, Err(EventStoreError::NotFound { .. })));

    server.stop().await;
}

#[actix_web::test]
async fn non_array_event_collection_is_a_decode_error() {
    let server = JsonStoreServer::start();
    server.state.events_as_object.store(true, Ordering::SeqCst);
    let store = client(&server.base_url);

    let error = store.list_events().await.expect_err("object body");
    assert!(matches!(error, EventStoreError::Decode { .. }));

    let view = ListView::load(&store).await;
    assert!(view.listing().events.is_empty());
    assert!(view.listing().error.is_some());

    server.stop().await;
}

#[actix_web::test]
async fn offsetless_times_from_other_writers_still_list() {
    let mut events = seed_events();
    events[1]["startTime"] = json!("2024-06-02T18:30");
    events[2]["endTime"] = json!("whenever");
    let server = JsonStoreServer::start_with(seed_users(), seed_categories(), events);
    let store = client(&server.base_url);

    let listed = store.list_events().await.expect("events load");

    let ids: Vec<_> = listed.iter().map(|event| event.id).collect();
    assert_eq!(ids, vec![EventId::new(1), EventId::new(2)]);
    assert_eq!(
        listed[1].start_time,
        Utc.with_ymd_and_hms(2024, 6, 2, 18, 30, 0)
            .single()
            .expect("valid time")
    );

    server.stop().await;
}

#[actix_web::test]
async fn server_errors_map_to_rejected_with_status() {
    let server = JsonStoreServer::start();
    server.state.fail_writes.store(true, Ordering::SeqCst);
    let store = client(&server.base_url);

    let error = store
        .delete_event(EventId::new(1))
        .await
        .expect_err("writes fail");
    assert!(
        matches!(error, EventStoreError::Rejected { status: 500, ref message } if message.contains("disk full"))
    );

    server.stop().await;
}

#[actix_web::test]
async fn unreachable_store_is_a_transport_error() {
    let store = client(&unreachable_base_url());
    let error = store.list_users().await.expect_err("nothing listening");
    assert!(matches!(error, EventStoreError::Transport { .. }));
}

#[actix_web::test]
async fn list_view_filters_over_http() {
    let server = JsonStoreServer::start();
    let store = client(&server.base_url);

    let mut view = ListView::load(&store).await;
    view.set_search_term("RUN");
    view.select_category("3");

    let titles: Vec<_> = view
        .listing()
        .events
        .iter()
        .map(|event| event.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Street food run"]);

    server.stop().await;
}

#[actix_web::test]
async fn unchanged_edit_preserves_the_record() {
    let server = JsonStoreServer::start();
    let store = client(&server.base_url);
    let before = store.get_event(EventId::new(2)).await.expect("event loads");

    let mut view = DetailView::load(&store, EventId::new(2), Duration::ZERO).await;
    assert!(view.begin_edit());
    let navigation = view.save(&store, &zone()).await;

    assert_eq!(navigation, Navigation::ReloadAfter(Duration::ZERO));
    let after = store.get_event(EventId::new(2)).await.expect("event loads");
    assert_eq!(after, before);

    server.stop().await;
}

#[actix_web::test]
async fn failed_delete_stays_on_detail() {
    let server = JsonStoreServer::start();
    server.state.fail_writes.store(true, Ordering::SeqCst);
    let store = client(&server.base_url);

    let mut view = DetailView::load(&store, EventId::new(1), Duration::ZERO).await;
    let navigation = view.delete(&store, &|_: &str| true).await;

    assert_eq!(navigation, Navigation::Stay);
    let notices = view.take_notices();
    assert_eq!(notices[0].kind, NoticeKind::Error);
    assert_eq!(notices[0].message, "Failed to delete event");
    assert_eq!(server.state.events().len(), 3);

    server.stop().await;
}

#[actix_web::test]
async fn created_local_times_round_trip_through_the_store() {
    let server = JsonStoreServer::start();
    let store = client(&server.base_url);

    let mut view = CreateView::load(&store).await;
    assert_eq!(view.user_options().len(), 2);
    let form = view.form_mut();
    form.title = "Picnic".to_owned();
    form.start_time = "2024-08-10T12:00".to_owned();
    form.end_time = "2024-08-10T15:30".to_owned();
    form.user = "2".to_owned();
    form.category = "3".to_owned();

    assert_eq!(view.submit(&store, &zone()).await, Navigation::EventList);

    let stored = store.get_event(EventId::new(4)).await.expect("event loads");
    assert_eq!(
        stored.start_time,
        Utc.with_ymd_and_hms(2024, 8, 10, 10, 0, 0)
            .single()
            .expect("valid time")
    );
    assert_eq!(
        server.state.event(4).expect("stored")["endTime"],
        json!("2024-08-10T13:30:00.000Z")
    );

    server.stop().await;
}
