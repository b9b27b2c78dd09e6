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
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const HEADER_PAD: u16 = 2;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let padded = Rect {
        x: area.x + HEADER_PAD,
        y: area.y,
        width: area.width.saturating_sub(HEADER_PAD * 2),
        height: area.height,
    };
    frame.render_widget(Paragraph::new(header_line(app)), padded);
}

fn header_line(app: &App) -> Line<'static> {
    let sep = Span::styled("  \u{2502}  ", Style::default().fg(theme::DIM));
    let mut spans = vec![Span::styled(
        "thread-viewer",
        Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
    )];

    let Some(session) = app.session.as_ref() else {
        return Line::from(spans);
    };

    spans.push(sep.clone());
    spans.push(Span::styled(session.title().to_owned(), Style::default().fg(Color::White)));
    if !session.participants().is_empty() {
        spans.push(sep.clone());
        spans.push(Span::styled(session.participants().join(", "), Style::default().fg(theme::DIM)));
    }

    let window = session.window();
    if !window.is_empty() {
        spans.push(sep);
        spans.push(Span::styled(
            format!(
                "messages {}\u{2013}{} of {}",
                window.oldest_realized().0 + 1,
                window.newest_realized().0 + 1,
                window.len()
            ),
            Style::default().fg(theme::DIM),
        ));
    }
    Line::from(spans)
}
