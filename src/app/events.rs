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

use super::state::{App, AppEvent, InputMode};
use super::{keys, library};
use crossterm::event::{Event, KeyEventKind, MouseEventKind};

const MOUSE_SCROLL_ROWS: isize = 3;

pub fn handle_terminal_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => keys::handle_key(app, key),
        Event::Mouse(mouse) => {
            let rows = match mouse.kind {
                MouseEventKind::ScrollUp => -MOUSE_SCROLL_ROWS,
                MouseEventKind::ScrollDown => MOUSE_SCROLL_ROWS,
                _ => return,
            };
            let area = app.body_area;
            let inside = mouse.column >= area.x
                && mouse.column < area.right()
                && mouse.row >= area.y
                && mouse.row < area.bottom();
            if inside && let Some(session) = app.session.as_mut() {
                session.scroll_by(rows);
            }
        }
        Event::Paste(text) if app.mode != InputMode::Browse => app.input.insert_str(&text),
        // Layout is recomputed from the frame size on every draw.
        _ => {}
    }
}

pub fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::ConversationIds { result: Ok(ids), preferred } => library::handle_ids(app, ids, preferred),
        AppEvent::ConversationIds { result: Err(err), .. } => {
            app.listed = true;
            app.error(format!("Could not list conversations: {err}"));
        }
        AppEvent::ConversationLoaded { generation, id, result } => library::handle_loaded(app, generation, &id, result),
        AppEvent::MediaPrepared { generation, results } => library::handle_media(app, generation, results),
        AppEvent::Imported { result } => library::handle_imported(app, result),
        AppEvent::Removed { id, result } => library::handle_removed(app, &id, result),
    }
}
