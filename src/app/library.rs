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

//! Conversation lifecycle: listing, display, removal, import and the media
//! prefetch that follows a window change.

use super::state::{App, AppEvent, ImportError};
use super::viewer::ViewSession;
use crate::render::prepare_media;
use std::path::PathBuf;

/// Fetch the stored ids in the background. `preferred` is displayed once the
/// list arrives, if it is part of it.
pub fn start_listing(app: &App, preferred: Option<String>) {
    let store = app.store.clone();
    let event_tx = app.event_tx.clone();
    tokio::task::spawn_local(async move {
        let result = store.conversation_ids().await;
        let _ = event_tx.send(AppEvent::ConversationIds { result, preferred });
    });
}

pub fn handle_ids(app: &mut App, ids: Vec<String>, preferred: Option<String>) {
    app.conversations = ids;
    app.listed = true;
    let target = preferred
        .filter(|id| app.conversations.contains(id))
        .or_else(|| app.current_id().map(str::to_owned).filter(|id| app.conversations.contains(id)))
        .or_else(|| app.scroll_states.current().map(str::to_owned).filter(|id| app.conversations.contains(id)))
        .or_else(|| app.conversations.first().cloned());
    match target {
        Some(id) if app.current_id() != Some(id.as_str()) => display(app, &id),
        Some(_) => {}
        None => {
            app.session = None;
            app.scroll_states.set_current(None);
        }
    }
}

/// Request `id` for display. The current session stays on screen until the
/// fetch succeeds.
pub fn display(app: &mut App, id: &str) {
    app.remember_session();
    app.generation += 1;
    app.loading = Some(id.to_owned());
    let generation = app.generation;
    let store = app.store.clone();
    let event_tx = app.event_tx.clone();
    let id = id.to_owned();
    tracing::debug!(%id, generation, "requesting conversation");
    tokio::task::spawn_local(async move {
        let result = store.get_conversation(&id).await;
        let _ = event_tx.send(AppEvent::ConversationLoaded { generation, id, result });
    });
}

pub fn handle_loaded(
    app: &mut App,
    generation: u64,
    id: &str,
    result: Result<Option<crate::thread::Conversation>, crate::storage::StoreError>,
) {
    if generation != app.generation {
        tracing::debug!(%id, generation, current = app.generation, "dropping stale conversation load");
        return;
    }
    app.loading = None;
    match result {
        Ok(Some(conversation)) => {
            app.remember_session();
            let saved = app.scroll_states.get(id);
            app.session = Some(ViewSession::new(conversation, generation, saved));
            app.scroll_states.set_current(Some(id));
            app.not_found = false;
            app.status = None;
        }
        Ok(None) => app.error(format!("Conversation `{id}` is no longer stored")),
        Err(err) => app.error(format!("Could not load `{id}`: {err}")),
    }
}

/// Show the next (or previous) stored conversation.
pub fn cycle(app: &mut App, forward: bool) {
    let count = app.conversations.len();
    if count == 0 {
        return;
    }
    let anchor = app.loading.as_deref().or_else(|| app.current_id());
    let next = match anchor.and_then(|id| app.conversations.iter().position(|c| c == id)) {
        Some(i) if forward => (i + 1) % count,
        Some(i) => (i + count - 1) % count,
        None => 0,
    };
    let id = app.conversations[next].clone();
    display(app, &id);
}

pub fn remove_current(app: &mut App) {
    let Some(id) = app.current_id().map(str::to_owned) else {
        return;
    };
    let store = app.store.clone();
    let event_tx = app.event_tx.clone();
    tokio::task::spawn_local(async move {
        let result = store.remove_conversation(&id).await;
        let _ = event_tx.send(AppEvent::Removed { id, result });
    });
}

pub fn handle_removed(app: &mut App, id: &str, result: Result<(), crate::storage::StoreError>) {
    if let Err(err) = result {
        app.error(format!("Could not remove `{id}`: {err}"));
        return;
    }
    tracing::info!(%id, "removed conversation");
    app.scroll_states.remove(id);
    app.conversations.retain(|c| c != id);
    if app.current_id() == Some(id) {
        app.session = None;
        // Invalidate any fetch still in flight for the removed conversation.
        app.generation += 1;
        app.loading = None;
    }
    app.notice(format!("Removed {id}"));
    if app.session.is_none()
        && let Some(first) = app.conversations.first().cloned()
    {
        display(app, &first);
    }
}

/// Decode export files and store them. Scroll state of re-imported
/// conversations is discarded once the store confirms.
pub fn start_import(app: &App, paths: Vec<PathBuf>) {
    let store = app.store.clone();
    let event_tx = app.event_tx.clone();
    tokio::task::spawn_local(async move {
        let result = async {
            let conversations = crate::export::parse_files(&paths).await?;
            let mut ids = Vec::with_capacity(conversations.len());
            for conversation in conversations {
                ids.push(conversation.id.clone());
                store.add_conversation(conversation).await?;
            }
            Ok::<_, ImportError>(ids)
        }
        .await;
        let _ = event_tx.send(AppEvent::Imported { result });
    });
}

pub fn handle_imported(app: &mut App, result: Result<Vec<String>, ImportError>) {
    let ids = match result {
        Ok(ids) => ids,
        Err(err) => {
            app.error(format!("Import failed: {err}"));
            return;
        }
    };
    tracing::info!(?ids, "imported conversations");
    if app.current_id().is_some_and(|current| ids.iter().any(|id| id == current)) {
        // The old layout does not describe the new messages.
        app.session = None;
    }
    for id in &ids {
        app.scroll_states.remove(id);
    }
    app.notice(format!("Imported {} conversation(s)", ids.len()));
    start_listing(app, ids.into_iter().next());
}

/// Prepare media for the window the last layout realized.
pub fn schedule_media(app: &mut App) {
    let Some(session) = app.session.as_mut() else {
        return;
    };
    let requests = session.take_media_requests();
    if requests.is_empty() {
        return;
    }
    let generation = session.generation();
    let root = session.media_root().map(PathBuf::from);
    let event_tx = app.event_tx.clone();
    tokio::task::spawn_local(async move {
        let results = prepare_media(root, requests).await;
        let _ = event_tx.send(AppEvent::MediaPrepared { generation, results });
    });
}

pub fn handle_media(app: &mut App, generation: u64, results: Vec<(crate::render::MediaKey, crate::render::MediaState)>) {
    match app.session.as_mut() {
        Some(session) if session.generation() == generation => session.apply_media(results),
        _ => tracing::debug!(generation, "dropping media for a closed session"),
    }
}
