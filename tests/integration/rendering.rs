// Whole-frame rendering against a test backend.

use crossterm::event::KeyCode;
use thread_viewer::app;

use crate::helpers::{conversation, draw, local, press, pump, test_app};

#[tokio::test]
async fn frame_shows_header_sidebar_and_newest_message() {
    local(async {
        let mut t = test_app(vec![conversation("a", 200), conversation("b", 3)]);
        app::start_listing(&t.app, None);
        pump(&mut t.app).await;

        let rows = draw(&mut t.app, 100, 30);
        assert!(rows[0].contains("thread-viewer"));
        assert!(rows[0].contains("Chat a"));
        assert!(rows[0].contains("messages 180\u{2013}200 of 200"));
        assert!(rows.iter().any(|row| row.contains("\u{276F} a")));
        assert!(rows.iter().any(|row| row.contains("needle 0")));
    })
    .await;
}

#[tokio::test]
async fn narrow_frame_has_no_sidebar() {
    local(async {
        let mut t = test_app(vec![conversation("a", 5), conversation("b", 5)]);
        app::start_listing(&t.app, None);
        pump(&mut t.app).await;

        let rows = draw(&mut t.app, 60, 20);
        assert!(!rows.iter().any(|row| row.contains("\u{276F} b") || row.contains("\u{276F} a")));
        assert_eq!(t.app.body_area.width, 60);
    })
    .await;
}

#[tokio::test]
async fn empty_library_explains_import() {
    local(async {
        let mut t = test_app(Vec::new());
        app::start_listing(&t.app, None);
        pump(&mut t.app).await;

        let rows = draw(&mut t.app, 100, 20);
        assert!(rows.iter().any(|row| row.contains("No conversations yet")));
        assert!(rows.iter().any(|row| row.contains("--import")));
    })
    .await;
}

#[tokio::test]
async fn help_overlay_toggles() {
    local(async {
        let mut t = test_app(vec![conversation("a", 5)]);
        app::start_listing(&t.app, None);
        pump(&mut t.app).await;

        press(&mut t.app, KeyCode::Char('?'));
        let rows = draw(&mut t.app, 100, 30);
        assert!(rows.iter().any(|row| row.contains("Help")));
        assert!(rows.iter().any(|row| row.contains("Jump to a date")));

        press(&mut t.app, KeyCode::Char('x'));
        let rows = draw(&mut t.app, 100, 30);
        assert!(!rows.iter().any(|row| row.contains("Jump to a date")));
    })
    .await;
}

#[tokio::test]
async fn status_line_shows_errors() {
    local(async {
        let mut t = test_app(vec![conversation("a", 5)]);
        app::start_listing(&t.app, None);
        pump(&mut t.app).await;
        t.app.error("Could not load `x`: boom");

        let rows = draw(&mut t.app, 100, 30);
        assert!(rows.iter().any(|row| row.contains("boom")));
    })
    .await;
}
