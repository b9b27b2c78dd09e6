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

use crate::app::{App, InputMode};
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table};

const COLUMN_GAP: u16 = 4;
const KEY_WIDTH: u16 = 14;

pub fn is_active(app: &App) -> bool {
    app.show_help
}

pub fn compute_height(app: &App) -> u16 {
    if !is_active(app) {
        return 0;
    }
    let rows = u16::try_from(help_items(app.mode).len()).unwrap_or(u16::MAX);
    // Border top + bottom.
    rows.saturating_add(2)
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 || area.width == 0 || !is_active(app) {
        return;
    }

    let rows: Vec<Row<'static>> = help_items(app.mode)
        .iter()
        .map(|(key, action)| {
            Row::new(vec![
                Cell::from(Line::from(Span::styled(*key, Style::default().add_modifier(Modifier::BOLD)))),
                Cell::from(Line::from(Span::styled(*action, Style::default().fg(theme::DIM)))),
            ])
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(" Help ", Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let table = Table::new(rows, [Constraint::Length(KEY_WIDTH), Constraint::Min(1)])
        .column_spacing(COLUMN_GAP)
        .block(block);
    frame.render_widget(table, area);
}

fn help_items(mode: InputMode) -> &'static [(&'static str, &'static str)] {
    match mode {
        InputMode::Browse => &[
            ("Up/Down j/k", "Scroll one line"),
            ("PgUp/PgDn", "Scroll one page"),
            ("Home/End g/G", "Oldest / newest messages"),
            ("/", "Search"),
            ("n / N", "Next (newer) / previous (older) match"),
            ("d", "Jump to a date"),
            ("Tab/Shift+Tab", "Next / previous conversation"),
            ("Ctrl+D", "Remove this conversation"),
            ("Esc", "Clear status"),
            ("q / Ctrl+C", "Quit"),
        ],
        InputMode::Search => &[
            ("Enter/Down", "Find newer match"),
            ("Shift+Enter/Up", "Find older match"),
            ("Esc", "Close search"),
        ],
        InputMode::Date => &[("Enter", "Jump to date"), ("Esc", "Cancel")],
    }
}
