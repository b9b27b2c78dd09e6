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
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    if area.width == 0 {
        return;
    }
    let block = Block::default().borders(Borders::RIGHT).border_style(Style::default().fg(theme::DIM));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let current = app.current_id();
    let loading = app.loading.as_deref();
    let lines: Vec<Line<'static>> = app
        .conversations
        .iter()
        .map(|id| {
            let (marker, style) = if Some(id.as_str()) == current {
                (theme::PROMPT_CHAR, theme::selected_style())
            } else if Some(id.as_str()) == loading {
                ("\u{2026}", Style::default().fg(theme::DIM))
            } else {
                (" ", Style::default())
            };
            Line::from(vec![Span::styled(format!("{marker} "), style), Span::styled(id.clone(), style)])
        })
        .collect();

    // Keep the displayed conversation in view
    let selected = app.conversations.iter().position(|id| Some(id.as_str()) == current).unwrap_or(0);
    let height = usize::from(inner.height);
    let scroll = selected.saturating_sub(height.saturating_sub(1));
    frame.render_widget(Paragraph::new(lines).scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0)), inner);
}
