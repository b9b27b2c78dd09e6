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

use ratatui::layout::{Constraint, Layout, Rect};

/// Frames narrower than this hide the conversation list.
pub const SIDEBAR_MIN_FRAME_WIDTH: u16 = 80;
pub const SIDEBAR_WIDTH: u16 = 24;

pub struct AppLayout {
    pub header: Rect,
    pub header_sep: Rect,
    /// Conversation list (zero-width when the frame is too narrow).
    pub sidebar: Rect,
    pub body: Rect,
    pub input_sep: Rect,
    pub input: Rect,
    pub help: Rect,
    pub footer: Option<Rect>,
}

pub fn compute(area: Rect, help_height: u16) -> AppLayout {
    let zero = Rect::new(area.x, area.y, area.width, 0);

    let (header, header_sep, main, input_sep, input, help, footer) = if area.height < 8 {
        // Compact: body and the prompt line only
        let [main, input, help] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1), Constraint::Length(help_height)])
                .areas(area);
        (zero, zero, main, Rect::new(area.x, input.y, area.width, 0), input, help, None)
    } else {
        let [header, header_sep, main, input_sep, input, help, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(help_height),
            Constraint::Length(1),
        ])
        .areas(area);
        (header, header_sep, main, input_sep, input, help, Some(footer))
    };

    let (sidebar, body) = if area.width >= SIDEBAR_MIN_FRAME_WIDTH {
        let [sidebar, body] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)]).areas(main);
        (sidebar, body)
    } else {
        (Rect::new(main.x, main.y, 0, main.height), main)
    };

    AppLayout { header, header_sep, sidebar, body, input_sep, input, help, footer }
}
