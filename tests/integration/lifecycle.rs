// Conversation lifecycle: listing, display, stale loads, removal, import and
// a store that stops answering.

use pretty_assertions::assert_eq;
use thread_viewer::app::{self, StatusKind};

use crate::helpers::{conversation, local, press_ctrl, pump, test_app};

#[tokio::test]
async fn startup_displays_first_conversation() {
    local(async {
        let mut t = test_app(vec![conversation("b", 10), conversation("a", 10)]);
        app::start_listing(&t.app, None);
        pump(&mut t.app).await;

        assert!(t.app.listed);
        assert_eq!(t.app.conversations, vec!["a".to_owned(), "b".to_owned()]);
        assert_eq!(t.app.current_id(), Some("a"));
        assert_eq!(t.app.scroll_states.current(), Some("a"));
    })
    .await;
}

#[tokio::test]
async fn preferred_conversation_wins() {
    local(async {
        let mut t = test_app(vec![conversation("a", 10), conversation("b", 10)]);
        app::start_listing(&t.app, Some("b".to_owned()));
        pump(&mut t.app).await;
        assert_eq!(t.app.current_id(), Some("b"));
    })
    .await;
}

#[tokio::test]
async fn unknown_preferred_falls_back_to_saved_current() {
    local(async {
        let mut t = test_app(vec![conversation("a", 10), conversation("b", 10)]);
        t.app.scroll_states.set_current(Some("b"));
        app::start_listing(&t.app, Some("zzz".to_owned()));
        pump(&mut t.app).await;
        assert_eq!(t.app.current_id(), Some("b"));
    })
    .await;
}

#[tokio::test]
async fn empty_store_shows_nothing() {
    local(async {
        let mut t = test_app(Vec::new());
        app::start_listing(&t.app, None);
        pump(&mut t.app).await;
        assert!(t.app.listed);
        assert!(t.app.session.is_none());
        assert!(t.app.status.is_none());
    })
    .await;
}

#[tokio::test]
async fn only_the_latest_display_request_lands() {
    local(async {
        let mut t = test_app(vec![conversation("a", 10), conversation("b", 10), conversation("c", 10)]);
        app::display(&mut t.app, "a");
        app::display(&mut t.app, "b");
        app::display(&mut t.app, "c");
        pump(&mut t.app).await;

        assert_eq!(t.app.current_id(), Some("c"));
        assert_eq!(t.app.session.as_ref().unwrap().generation(), t.app.generation);
        assert!(t.app.loading.is_none());
    })
    .await;
}

#[tokio::test]
async fn cycling_wraps_around() {
    local(async {
        let mut t = test_app(vec![conversation("a", 5), conversation("b", 5)]);
        app::start_listing(&t.app, None);
        pump(&mut t.app).await;

        app::cycle(&mut t.app, true);
        pump(&mut t.app).await;
        assert_eq!(t.app.current_id(), Some("b"));

        app::cycle(&mut t.app, true);
        pump(&mut t.app).await;
        assert_eq!(t.app.current_id(), Some("a"));

        app::cycle(&mut t.app, false);
        pump(&mut t.app).await;
        assert_eq!(t.app.current_id(), Some("b"));
    })
    .await;
}

#[tokio::test]
async fn unavailable_store_keeps_current_conversation() {
    local(async {
        let mut t = test_app(vec![conversation("a", 5), conversation("b", 5)]);
        app::start_listing(&t.app, None);
        pump(&mut t.app).await;

        t.store.set_unavailable(true);
        app::cycle(&mut t.app, true);
        pump(&mut t.app).await;

        assert_eq!(t.app.current_id(), Some("a"));
        let status = t.app.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains('b'));
    })
    .await;
}

#[tokio::test]
async fn removing_shows_the_next_conversation() {
    local(async {
        let mut t = test_app(vec![conversation("a", 5), conversation("b", 5)]);
        app::start_listing(&t.app, None);
        pump(&mut t.app).await;
        t.app.scroll_states.set("a", t.app.session.as_ref().unwrap().state());

        press_ctrl(&mut t.app, 'd');
        pump(&mut t.app).await;

        assert_eq!(t.app.conversations, vec!["b".to_owned()]);
        assert_eq!(t.app.current_id(), Some("b"));
        assert!(t.app.scroll_states.get("a").is_none());
    })
    .await;
}

#[tokio::test]
async fn import_stores_and_displays_the_thread() {
    local(async {
        let mut t = test_app(vec![conversation("a", 5)]);
        let part_1 = t.dir.path().join("message_1.json");
        let part_2 = t.dir.path().join("message_2.json");
        std::fs::write(
            &part_1,
            r#"{"title": "Trip", "thread_path": "inbox/trip_1", "participants": [{"name": "Ann"}],
                "messages": [{"sender_name": "Ann", "timestamp_ms": 2000, "content": "newer"}]}"#,
        )
        .unwrap();
        std::fs::write(
            &part_2,
            r#"{"title": "Trip", "thread_path": "inbox/trip_1", "participants": [{"name": "Ann"}],
                "messages": [{"sender_name": "Ann", "timestamp_ms": 1000, "content": "older"}]}"#,
        )
        .unwrap();

        app::start_import(&t.app, vec![part_2, part_1]);
        pump(&mut t.app).await;

        assert_eq!(t.app.current_id(), Some("inbox_trip_1"));
        assert_eq!(t.app.conversations, vec!["a".to_owned(), "inbox_trip_1".to_owned()]);
        let session = t.app.session.as_ref().unwrap();
        assert_eq!(session.window().len(), 2);
        assert_eq!(session.title(), "Trip");
    })
    .await;
}

#[tokio::test]
async fn failed_import_reports_and_keeps_session() {
    local(async {
        let mut t = test_app(vec![conversation("a", 5)]);
        app::start_listing(&t.app, None);
        pump(&mut t.app).await;

        let bad = t.dir.path().join("broken.json");
        std::fs::write(&bad, "{ not json").unwrap();
        app::start_import(&t.app, vec![bad]);
        pump(&mut t.app).await;

        assert_eq!(t.app.current_id(), Some("a"));
        assert_eq!(t.app.status.as_ref().map(|s| s.kind), Some(StatusKind::Error));
    })
    .await;
}
