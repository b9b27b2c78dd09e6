// thread_viewer — A terminal viewer for exported chat threads
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

mod events;
mod input;
mod keys;
mod library;
mod state;
mod viewer;

pub use events::{handle_app_event, handle_terminal_event};
pub use input::LineInput;
pub use keys::{handle_key, jump_to_date, run_search};
pub use library::{cycle, display, remove_current, schedule_media, start_import, start_listing};
pub use state::{App, AppEvent, ImportError, InputMode, StatusKind, StatusMessage};
pub use viewer::{ScrollFix, SearchOutcome, ViewSession, parse_date};

use crate::Cli;
use crate::error::AppError;
use crate::storage::{ConversationStore, FileStore, ScrollStateStore};
use crossterm::event::EventStream;
use futures::{FutureExt as _, StreamExt};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Build the app over the file store in the data directory. Fails before
/// the terminal is touched when the data directory or an import file is
/// unusable.
pub async fn create_app(cli: &Cli) -> anyhow::Result<App> {
    let data_dir = cli.resolve_data_dir()?;
    if let Ok(meta) = tokio::fs::metadata(&data_dir).await
        && !meta.is_dir()
    {
        return Err(AppError::DataDirUnusable(data_dir).into());
    }
    for path in &cli.import {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(AppError::ImportFileMissing(path.clone()).into());
        }
    }
    tracing::info!(data_dir = %data_dir.display(), "opening data directory");
    let store: Rc<dyn ConversationStore> = Rc::new(FileStore::new(&data_dir));
    let scroll_states = ScrollStateStore::load(&data_dir).await;
    Ok(App::new(store, scroll_states))
}

/// Kick off the startup work requested on the command line.
pub fn start(app: &App, cli: &Cli) {
    if cli.import.is_empty() {
        start_listing(app, cli.open.clone());
    } else {
        start_import(app, cli.import.clone());
    }
}

// ---------------------------------------------------------------------------
// TUI event loop
// ---------------------------------------------------------------------------

pub async fn run_tui(app: &mut App) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Mouse capture for wheel scrolling (ignore error on unsupported terminals)
    let _ = crossterm::execute!(
        std::io::stdout(),
        crossterm::event::EnableBracketedPaste,
        crossterm::event::EnableMouseCapture,
    );

    let mut events = EventStream::new();
    let tick_duration = Duration::from_millis(16);
    let mut last_render = Instant::now();

    let result = loop {
        // Phase 1: wait for at least one event or the next frame tick
        let time_to_next = tick_duration.saturating_sub(last_render.elapsed());
        tokio::select! {
            Some(Ok(event)) = events.next() => {
                handle_terminal_event(app, event);
            }
            Some(event) = app.event_rx.recv() => {
                handle_app_event(app, event);
            }
            () = tokio::time::sleep(time_to_next) => {}
        }

        // Phase 2: drain all remaining queued events (non-blocking)
        loop {
            if let Some(Some(Ok(event))) = events.next().now_or_never() {
                handle_terminal_event(app, event);
                continue;
            }
            match app.event_rx.try_recv() {
                Ok(event) => handle_app_event(app, event),
                Err(_) => break,
            }
        }

        if app.should_quit {
            break Ok(());
        }

        // Phase 3: render once, then fetch media for whatever got realized
        if let Err(err) = terminal.draw(|f| crate::ui::render(f, app)) {
            break Err(err.into());
        }
        schedule_media(app);
        last_render = Instant::now();
    };

    let _ = crossterm::execute!(
        std::io::stdout(),
        crossterm::event::DisableBracketedPaste,
        crossterm::event::DisableMouseCapture,
    );
    ratatui::restore();

    shutdown(app).await;
    result
}

/// Persist the on-screen window and the current conversation.
pub async fn shutdown(app: &mut App) {
    app.remember_session();
    if let Err(err) = app.scroll_states.flush().await {
        tracing::warn!("failed to save scroll state: {err}");
    }
}
