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

use ratatui::style::{Color, Modifier, Style};

// Accent
pub const ACCENT: Color = Color::Rgb(0, 132, 255);

// UI chrome
pub const DIM: Color = Color::DarkGray;
pub const PROMPT_CHAR: &str = "\u{276F}";
pub const SEPARATOR_CHAR: &str = "\u{2500}";

// Message content
pub const LINK: Color = Color::Cyan;
pub const BROKEN: Color = Color::Red;
pub const SEARCH_MATCH_BG: Color = Color::Yellow;

// Status line
pub const STATUS_ERROR: Color = Color::Red;
pub const STATUS_NOTICE: Color = Color::Green;

pub fn search_match_style() -> Style {
    Style::default().fg(Color::Black).bg(SEARCH_MATCH_BG).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}
