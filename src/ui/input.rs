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

use crate::app::{App, InputMode, StatusKind};
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const INPUT_PAD: u16 = 1;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }
    let padded = Rect { x: area.x + INPUT_PAD, width: area.width.saturating_sub(INPUT_PAD * 2), ..area };

    let Some(label) = prompt_label(app.mode) else {
        frame.render_widget(Paragraph::new(status_line(app)), padded);
        return;
    };

    let prefix = format!("{} {label} ", theme::PROMPT_CHAR);
    let mut spans = vec![
        Span::styled(prefix.clone(), Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)),
        Span::raw(app.input.text().to_owned()),
    ];
    if app.mode == InputMode::Search && app.not_found {
        spans.push(Span::styled("  not found", Style::default().fg(theme::STATUS_ERROR)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), padded);

    let column = unicode_width::UnicodeWidthStr::width(prefix.as_str()) + app.input.cursor_column();
    let x = padded.x.saturating_add(u16::try_from(column).unwrap_or(u16::MAX));
    if x < padded.right() {
        frame.set_cursor_position(Position::new(x, padded.y));
    }
}

fn prompt_label(mode: InputMode) -> Option<&'static str> {
    match mode {
        InputMode::Browse => None,
        InputMode::Search => Some("search:"),
        InputMode::Date => Some("date (YYYY-MM-DD):"),
    }
}

fn status_line(app: &App) -> Line<'static> {
    if let Some(status) = &app.status {
        let color = match status.kind {
            StatusKind::Notice => theme::STATUS_NOTICE,
            StatusKind::Error => theme::STATUS_ERROR,
        };
        return Line::from(Span::styled(status.text.clone(), Style::default().fg(color)));
    }
    if app.not_found
        && let Some(query) = &app.last_query
    {
        return Line::from(Span::styled(format!("No match for `{query}`"), Style::default().fg(theme::STATUS_ERROR)));
    }
    Line::default()
}
