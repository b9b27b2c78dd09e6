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

mod chat;
mod header;
mod help;
mod input;
mod layout;
mod sidebar;
pub mod theme;

use crate::app::App;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, app: &mut App) {
    let frame_area = frame.area();
    let help_height = help::compute_height(app);
    let areas = layout::compute(frame_area, help_height);

    if areas.header.height > 0 {
        header::render(frame, areas.header, app);
        render_separator(frame, areas.header_sep);
    }

    sidebar::render(frame, areas.sidebar, app);
    chat::render(frame, areas.body, app);

    render_separator(frame, areas.input_sep);
    input::render(frame, areas.input, app);

    if areas.help.height > 0 {
        help::render(frame, areas.help, app);
    }

    if let Some(footer_area) = areas.footer {
        render_footer(frame, footer_area, app);
    }
}

const FOOTER_PAD: u16 = 2;

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let padded = Rect {
        x: area.x + FOOTER_PAD,
        y: area.y,
        width: area.width.saturating_sub(FOOTER_PAD * 2),
        height: area.height,
    };
    let mut spans = vec![
        Span::styled("?", Style::default().fg(ratatui::style::Color::White)),
        Span::styled(" : Shortcuts", Style::default().fg(theme::DIM)),
    ];
    if let Some(query) = &app.last_query {
        spans.push(Span::styled(format!("    search: {query}"), Style::default().fg(theme::DIM)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), padded);
}

fn render_separator(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let line = theme::SEPARATOR_CHAR.repeat(usize::from(area.width));
    frame.render_widget(Paragraph::new(Line::from(Span::styled(line, Style::default().fg(theme::DIM)))), area);
}
