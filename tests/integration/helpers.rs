use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;
use tempfile::TempDir;
use thread_viewer::app::{App, handle_app_event, handle_terminal_event};
use thread_viewer::storage::{MemoryStore, ScrollStateStore};
use thread_viewer::thread::{Conversation, Message};

/// An `App` over an in-memory store, with scroll state in a temp dir.
/// No terminal -- just state.
pub struct TestApp {
    pub app: App,
    pub store: Rc<MemoryStore>,
    pub dir: TempDir,
}

pub fn test_app(conversations: Vec<Conversation>) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let store = Rc::new(MemoryStore::with_conversations(conversations));
    let scroll_states = ScrollStateStore::empty(dir.path().join("scroll-state.json"));
    let app = App::new(store.clone(), scroll_states);
    TestApp { app, store, dir }
}

/// Build a thread of `len` messages, one minute apart, newest first.
/// Every 25th message (counting from the newest) says "needle".
pub fn conversation(id: &str, len: usize) -> Conversation {
    let messages = (0..len)
        .map(|i| {
            let sender = if (i / 3) % 2 == 0 { "Ann" } else { "Bo" };
            let text = if i % 25 == 0 { format!("needle {i}") } else { format!("message {i}") };
            Message::text(sender, i64::try_from(len - i).unwrap() * 60_000, text)
        })
        .collect();
    Conversation {
        id: id.to_owned(),
        title: format!("Chat {id}"),
        participants: vec!["Ann".into(), "Bo".into()],
        thread_type: None,
        is_still_participant: None,
        media_root: None,
        messages,
    }
}

/// Background work is spawned with `spawn_local`, so tests run inside a
/// `LocalSet`.
pub async fn local<F: Future>(fut: F) -> F::Output {
    tokio::task::LocalSet::new().run_until(fut).await
}

/// Feed every completion that arrives into the app until things go quiet.
pub async fn pump(app: &mut App) {
    while let Ok(Some(event)) = tokio::time::timeout(Duration::from_millis(100), app.event_rx.recv()).await {
        handle_app_event(app, event);
    }
}

pub fn press(app: &mut App, code: KeyCode) {
    handle_terminal_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
}

pub fn press_shift(app: &mut App, code: KeyCode) {
    handle_terminal_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::SHIFT)));
}

pub fn press_ctrl(app: &mut App, c: char) {
    handle_terminal_event(app, Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)));
}

pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Draw one frame and return it as plain text rows.
pub fn draw(app: &mut App, width: u16, height: u16) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| thread_viewer::ui::render(f, app)).unwrap();
    let buffer = terminal.backend().buffer();
    (0..height)
        .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect::<String>().trim_end().to_owned())
        .collect()
}
