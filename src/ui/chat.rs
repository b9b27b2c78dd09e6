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

use crate::app::App;
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    app.body_area = area;
    if area.width == 0 || area.height == 0 {
        return;
    }

    if app.session.is_none() {
        let lines = placeholder_lines(app);
        frame.render_widget(Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }), area);
        return;
    }
    let Some(session) = app.session.as_mut() else {
        return;
    };

    if session.window().is_empty() {
        let line = Line::from(Span::styled("  This conversation has no messages.", Style::default().fg(theme::DIM)));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let viewport_height = usize::from(area.height);
    session.layout(area.width, viewport_height);

    let paragraph = Paragraph::new(Text::from(session.lines().to_vec())).wrap(Wrap { trim: false });
    let content_height = session.total_height();
    if content_height <= viewport_height {
        // Short threads sit at the bottom, right above the prompt
        let offset = u16::try_from(viewport_height - content_height).unwrap_or(0);
        let render_area = Rect {
            x: area.x,
            y: area.y + offset,
            width: area.width,
            height: area.height - offset,
        };
        frame.render_widget(paragraph, render_area);
    } else {
        let scroll = u16::try_from(session.scroll_top()).unwrap_or(u16::MAX);
        frame.render_widget(paragraph.scroll((scroll, 0)), area);
    }
}

fn placeholder_lines(app: &App) -> Vec<Line<'static>> {
    let pad = "  ";
    let dim = Style::default().fg(theme::DIM);
    let mut lines = vec![Line::default()];

    if let Some(id) = &app.loading {
        lines.push(Line::from(Span::styled(format!("{pad}Loading {id}\u{2026}"), dim)));
        return lines;
    }
    if !app.listed {
        lines.push(Line::from(Span::styled(format!("{pad}Reading conversations\u{2026}"), dim)));
        return lines;
    }
    if !app.conversations.is_empty() {
        lines.push(Line::from(Span::styled(format!("{pad}Press Tab to open a conversation."), dim)));
        return lines;
    }

    lines.push(Line::from(Span::styled(
        format!("{pad}No conversations yet"),
        Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("{pad}Import an export with:  thread-viewer --import path/to/message_1.json"),
        dim,
    )));
    lines.push(Line::from(Span::styled(
        format!("{pad}Several files of the same thread are merged into one conversation."),
        dim,
    )));
    lines
}
