// Scroll state survives switching conversations and restarting.

use pretty_assertions::assert_eq;
use thread_viewer::app;
use thread_viewer::storage::ScrollStateStore;
use thread_viewer::thread::{StorageIndex, WindowState};

use crate::helpers::{conversation, draw, local, pump, test_app};

#[tokio::test]
async fn shutdown_writes_window_and_current() {
    local(async {
        let mut t = test_app(vec![conversation("a", 100)]);
        app::start_listing(&t.app, None);
        pump(&mut t.app).await;
        draw(&mut t.app, 100, 30);
        let state = t.app.session.as_ref().unwrap().state();

        app::shutdown(&mut t.app).await;

        let reloaded = ScrollStateStore::load(t.dir.path()).await;
        assert_eq!(reloaded.current(), Some("a"));
        assert_eq!(reloaded.get("a"), Some(state));
    })
    .await;
}

#[tokio::test]
async fn saved_window_is_restored_on_open() {
    local(async {
        let mut t = test_app(vec![conversation("a", 100)]);
        let saved = WindowState { start: StorageIndex(60), end: StorageIndex(40), scroll_offset: Some(5) };
        t.app.scroll_states.set("a", saved);
        app::start_listing(&t.app, None);
        pump(&mut t.app).await;
        draw(&mut t.app, 100, 20);

        let session = t.app.session.as_ref().unwrap();
        assert_eq!(session.window().start(), StorageIndex(60));
        assert_eq!(session.window().end(), StorageIndex(40));
        assert_eq!(session.scroll_top(), 5);
    })
    .await;
}

#[tokio::test]
async fn switching_conversations_saves_the_outgoing_window() {
    local(async {
        let mut t = test_app(vec![conversation("a", 100), conversation("b", 100)]);
        app::start_listing(&t.app, None);
        pump(&mut t.app).await;
        draw(&mut t.app, 100, 30);
        t.app.session.as_mut().unwrap().scroll_by(-4);
        let state = t.app.session.as_ref().unwrap().state();

        app::cycle(&mut t.app, true);
        pump(&mut t.app).await;

        assert_eq!(t.app.current_id(), Some("b"));
        assert_eq!(t.app.scroll_states.get("a"), Some(state));
        assert_eq!(t.app.scroll_states.current(), Some("b"));
    })
    .await;
}

#[tokio::test]
async fn out_of_range_saved_window_is_clamped() {
    local(async {
        let mut t = test_app(vec![conversation("a", 10)]);
        let saved = WindowState { start: StorageIndex(500), end: StorageIndex(400), scroll_offset: None };
        t.app.scroll_states.set("a", saved);
        app::start_listing(&t.app, None);
        pump(&mut t.app).await;

        let window = t.app.session.as_ref().unwrap().window();
        assert!(window.start().0 < 10);
        assert!(window.end() <= window.start());
    })
    .await;
}
