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

use super::input::LineInput;
use super::viewer::ViewSession;
use crate::export::ExportError;
use crate::render::{MediaKey, MediaState};
use crate::storage::{ConversationStore, ScrollStateStore, StoreError};
use crate::thread::Conversation;
use std::rc::Rc;
use tokio::sync::mpsc;

/// Results of background work, delivered back to the event loop.
#[derive(Debug)]
pub enum AppEvent {
    ConversationIds { result: Result<Vec<String>, StoreError>, preferred: Option<String> },
    ConversationLoaded { generation: u64, id: String, result: Result<Option<Conversation>, StoreError> },
    MediaPrepared { generation: u64, results: Vec<(MediaKey, MediaState)> },
    Imported { result: Result<Vec<String>, ImportError> },
    Removed { id: String, result: Result<(), StoreError> },
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    Search,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Notice,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

pub struct App {
    pub store: Rc<dyn ConversationStore>,
    pub scroll_states: ScrollStateStore,
    /// Ids of every stored conversation, in display order.
    pub conversations: Vec<String>,
    /// Whether the conversation list has been fetched at least once.
    pub listed: bool,
    pub session: Option<ViewSession>,
    /// Conversation whose fetch is in flight.
    pub loading: Option<String>,
    /// Bumped by every display request; completions from older requests are
    /// dropped.
    pub generation: u64,
    pub status: Option<StatusMessage>,
    pub not_found: bool,
    pub mode: InputMode,
    pub input: LineInput,
    pub last_query: Option<String>,
    pub show_help: bool,
    pub should_quit: bool,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
    pub event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Last known chat body area, for mouse hit-testing.
    pub body_area: ratatui::layout::Rect,
}

impl App {
    pub fn new(store: Rc<dyn ConversationStore>, scroll_states: ScrollStateStore) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            store,
            scroll_states,
            conversations: Vec::new(),
            listed: false,
            session: None,
            loading: None,
            generation: 0,
            status: None,
            not_found: false,
            mode: InputMode::Browse,
            input: LineInput::new(),
            last_query: None,
            show_help: false,
            should_quit: false,
            event_tx,
            event_rx,
            body_area: ratatui::layout::Rect::default(),
        }
    }

    pub fn notice(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage { kind: StatusKind::Notice, text: text.into() });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::warn!("{text}");
        self.status = Some(StatusMessage { kind: StatusKind::Error, text });
    }

    pub fn current_id(&self) -> Option<&str> {
        self.session.as_ref().map(ViewSession::id)
    }

    /// Write the on-screen window into the scroll state store.
    pub fn remember_session(&mut self) {
        if let Some(session) = &self.session {
            self.scroll_states.set(session.id(), session.state());
            self.scroll_states.set_current(Some(session.id()));
        }
    }
}
