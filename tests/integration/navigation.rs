// Keyboard and mouse navigation through a displayed conversation: search,
// date jumps and scrolling.

use crossterm::event::{Event, KeyCode, KeyModifiers, MouseEvent, MouseEventKind};
use pretty_assertions::assert_eq;
use thread_viewer::app::{self, App, InputMode, StatusKind, handle_terminal_event};
use thread_viewer::thread::ChronoIndex;

use crate::helpers::{TestApp, conversation, draw, local, press, press_shift, pump, test_app, type_text};

async fn opened(len: usize) -> TestApp {
    let mut t = test_app(vec![conversation("a", len)]);
    app::start_listing(&t.app, None);
    pump(&mut t.app).await;
    draw(&mut t.app, 100, 30);
    t
}

fn realizes(app: &App, index: ChronoIndex) -> bool {
    let window = app.session.as_ref().unwrap().window();
    !window.is_empty() && window.oldest_realized() <= index && index <= window.newest_realized()
}

fn highlighted(app: &App) -> Option<ChronoIndex> {
    app.session.as_ref().unwrap().renderer().highlight().map(|h| h.index)
}

#[tokio::test]
async fn search_walks_older_then_newer() {
    local(async {
        let mut t = opened(200).await;

        press(&mut t.app, KeyCode::Char('/'));
        assert_eq!(t.app.mode, InputMode::Search);
        type_text(&mut t.app, "NEEDLE");
        press_shift(&mut t.app, KeyCode::Enter);
        draw(&mut t.app, 100, 30);
        assert!(!t.app.not_found);
        assert!(realizes(&t.app, ChronoIndex(174)));
        assert_eq!(highlighted(&t.app), Some(ChronoIndex(174)));

        // Plain Enter resumes from the last hit toward newer messages.
        press(&mut t.app, KeyCode::Enter);
        draw(&mut t.app, 100, 30);
        assert_eq!(highlighted(&t.app), Some(ChronoIndex(199)));

        press(&mut t.app, KeyCode::Esc);
        assert_eq!(t.app.mode, InputMode::Browse);
        press(&mut t.app, KeyCode::Char('N'));
        draw(&mut t.app, 100, 30);
        assert_eq!(highlighted(&t.app), Some(ChronoIndex(174)));
        press(&mut t.app, KeyCode::Char('N'));
        draw(&mut t.app, 100, 30);
        assert_eq!(highlighted(&t.app), Some(ChronoIndex(149)));

        press(&mut t.app, KeyCode::Char('n'));
        draw(&mut t.app, 100, 30);
        assert_eq!(highlighted(&t.app), Some(ChronoIndex(174)));
    })
    .await;
}

#[tokio::test]
async fn search_far_outside_the_window_recenters_it() {
    local(async {
        let mut t = opened(200).await;
        for _ in 0..7 {
            press(&mut t.app, KeyCode::Char('n'));
        }
        // No query yet, so nothing happened.
        assert!(t.app.last_query.is_none());

        app::run_search(&mut t.app, "message 199", thread_viewer::thread::Direction::Older);
        draw(&mut t.app, 100, 30);
        assert!(realizes(&t.app, ChronoIndex(0)));
        assert_eq!(highlighted(&t.app), Some(ChronoIndex(0)));
    })
    .await;
}

#[tokio::test]
async fn missing_term_is_reported_in_the_prompt() {
    local(async {
        let mut t = opened(50).await;
        press(&mut t.app, KeyCode::Char('/'));
        type_text(&mut t.app, "zebra");
        press(&mut t.app, KeyCode::Enter);
        assert!(t.app.not_found);

        let rows = draw(&mut t.app, 100, 30);
        assert!(rows.iter().any(|row| row.contains("not found")));

        // Editing the query clears the marker.
        press(&mut t.app, KeyCode::Backspace);
        assert!(!t.app.not_found);
    })
    .await;
}

#[tokio::test]
async fn metacharacter_query_is_ignored() {
    local(async {
        let mut t = opened(50).await;
        let before = t.app.session.as_ref().unwrap().state();
        app::run_search(&mut t.app, "...", thread_viewer::thread::Direction::Older);
        assert!(!t.app.not_found);
        assert!(t.app.last_query.is_none());
        assert_eq!(t.app.session.as_ref().unwrap().state(), before);
    })
    .await;
}

#[tokio::test]
async fn date_jump_goes_to_first_message_of_the_day() {
    local(async {
        let mut t = opened(200).await;
        press(&mut t.app, KeyCode::Char('d'));
        assert_eq!(t.app.mode, InputMode::Date);
        type_text(&mut t.app, "1960-01-01");
        press(&mut t.app, KeyCode::Enter);
        draw(&mut t.app, 100, 30);

        assert_eq!(t.app.mode, InputMode::Browse);
        assert!(realizes(&t.app, ChronoIndex(0)));
    })
    .await;
}

#[tokio::test]
async fn malformed_date_reports_error() {
    local(async {
        let mut t = opened(20).await;
        press(&mut t.app, KeyCode::Char('d'));
        type_text(&mut t.app, "2019-13-40");
        press(&mut t.app, KeyCode::Enter);
        assert_eq!(t.app.status.as_ref().map(|s| s.kind), Some(StatusKind::Error));
    })
    .await;
}

#[tokio::test]
async fn home_and_end_jump_to_the_thread_edges() {
    local(async {
        let mut t = opened(200).await;
        press(&mut t.app, KeyCode::Home);
        draw(&mut t.app, 100, 30);
        assert!(realizes(&t.app, ChronoIndex(0)));
        assert!(!realizes(&t.app, ChronoIndex(199)));

        press(&mut t.app, KeyCode::End);
        draw(&mut t.app, 100, 30);
        assert!(realizes(&t.app, ChronoIndex(199)));
        let session = t.app.session.as_ref().unwrap();
        assert_eq!(session.scroll_top() + usize::from(t.app.body_area.height), session.total_height());
    })
    .await;
}

#[tokio::test]
async fn wheel_scrolls_only_over_the_body() {
    local(async {
        let mut t = opened(200).await;
        let before = t.app.session.as_ref().unwrap().scroll_top();
        let body = t.app.body_area;

        let wheel = |column, row| {
            Event::Mouse(MouseEvent { kind: MouseEventKind::ScrollUp, column, row, modifiers: KeyModifiers::NONE })
        };
        handle_terminal_event(&mut t.app, wheel(body.x + 1, body.y + 1));
        assert_eq!(t.app.session.as_ref().unwrap().scroll_top(), before - 3);

        // Header row is outside the body.
        handle_terminal_event(&mut t.app, wheel(body.x + 1, 0));
        assert_eq!(t.app.session.as_ref().unwrap().scroll_top(), before - 3);
    })
    .await;
}

#[tokio::test]
async fn scrolling_up_past_the_top_realizes_older_messages() {
    local(async {
        let mut t = opened(200).await;
        let oldest = t.app.session.as_ref().unwrap().window().oldest_realized();
        for _ in 0..200 {
            press(&mut t.app, KeyCode::Up);
            draw(&mut t.app, 100, 30);
        }
        let session = t.app.session.as_ref().unwrap();
        assert!(session.window().oldest_realized() < oldest);
    })
    .await;
}

#[tokio::test]
async fn quit_keys() {
    local(async {
        let mut t = opened(5).await;
        press(&mut t.app, KeyCode::Char('/'));
        press(&mut t.app, KeyCode::Char('q'));
        assert!(!t.app.should_quit, "q is text inside the prompt");
        press(&mut t.app, KeyCode::Esc);
        press(&mut t.app, KeyCode::Char('q'));
        assert!(t.app.should_quit);
    })
    .await;
}
