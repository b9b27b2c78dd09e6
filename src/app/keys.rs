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
use super::library;
use super::state::{App, InputMode};
use super::viewer::{SearchOutcome, parse_date};
use crate::thread::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const LINE_STEP: isize = 1;

fn is_ctrl_shortcut(modifiers: KeyModifiers) -> bool {
    modifiers.contains(KeyModifiers::CONTROL) && !modifiers.contains(KeyModifiers::ALT)
}

fn is_ctrl_char_shortcut(key: KeyEvent, expected: char) -> bool {
    is_ctrl_shortcut(key.modifiers) && matches!(key.code, KeyCode::Char(c) if c.eq_ignore_ascii_case(&expected))
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if is_ctrl_char_shortcut(key, 'q') || is_ctrl_char_shortcut(key, 'c') {
        app.should_quit = true;
        return;
    }
    if app.show_help {
        app.show_help = false;
        return;
    }
    match app.mode {
        InputMode::Browse => handle_browse_key(app, key),
        InputMode::Search | InputMode::Date => handle_prompt_key(app, key),
    }
}

fn handle_browse_key(app: &mut App, key: KeyEvent) {
    if is_ctrl_char_shortcut(key, 'd') {
        library::remove_current(app);
        return;
    }
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Up | KeyCode::Char('k') => scroll(app, -LINE_STEP),
        KeyCode::Down | KeyCode::Char('j') => scroll(app, LINE_STEP),
        KeyCode::PageUp => page(app, false),
        KeyCode::PageDown | KeyCode::Char(' ') => page(app, true),
        KeyCode::Home | KeyCode::Char('g') => {
            if let Some(session) = app.session.as_mut() {
                session.jump_oldest();
            }
        }
        KeyCode::End | KeyCode::Char('G') => {
            if let Some(session) = app.session.as_mut() {
                session.jump_newest();
            }
        }
        KeyCode::Char('/') => open_prompt(app, InputMode::Search),
        KeyCode::Char('d') => open_prompt(app, InputMode::Date),
        KeyCode::Char('n') => repeat_search(app, Direction::Newer),
        KeyCode::Char('N') => repeat_search(app, Direction::Older),
        KeyCode::Tab => library::cycle(app, true),
        KeyCode::BackTab => library::cycle(app, false),
        KeyCode::Esc => {
            app.status = None;
            app.not_found = false;
        }
        _ => {}
    }
}

fn open_prompt(app: &mut App, mode: InputMode) {
    app.mode = mode;
    app.input.clear();
    if mode == InputMode::Search
        && let Some(query) = app.last_query.clone()
    {
        app.input.set_text(&query);
    }
}

fn handle_prompt_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.mode = InputMode::Browse;
            app.input.clear();
        }
        KeyCode::Enter | KeyCode::Up if app.mode == InputMode::Search && key.modifiers.contains(KeyModifiers::SHIFT) => {
            let query = app.input.text().to_owned();
            run_search(app, &query, Direction::Older);
        }
        KeyCode::Up if app.mode == InputMode::Search => {
            let query = app.input.text().to_owned();
            run_search(app, &query, Direction::Older);
        }
        KeyCode::Enter | KeyCode::Down if app.mode == InputMode::Search => {
            let query = app.input.text().to_owned();
            run_search(app, &query, Direction::Newer);
        }
        KeyCode::Enter => {
            let query = app.input.text().to_owned();
            app.mode = InputMode::Browse;
            app.input.clear();
            jump_to_date(app, &query);
        }
        KeyCode::Backspace => edited(app, LineInput::delete_char_before),
        KeyCode::Delete => edited(app, LineInput::delete_char_after),
        KeyCode::Left => app.input.move_left(),
        KeyCode::Right => app.input.move_right(),
        KeyCode::Home => app.input.move_home(),
        KeyCode::End => app.input.move_end(),
        KeyCode::Char(c) if !is_ctrl_shortcut(key.modifiers) => edited(app, |input| input.insert_char(c)),
        _ => {}
    }
}

/// A changed query has not been searched yet.
fn edited(app: &mut App, edit: impl FnOnce(&mut LineInput)) {
    edit(&mut app.input);
    if app.mode == InputMode::Search {
        app.not_found = false;
    }
}

fn scroll(app: &mut App, rows: isize) {
    if let Some(session) = app.session.as_mut() {
        session.scroll_by(rows);
    }
}

fn page(app: &mut App, down: bool) {
    if let Some(session) = app.session.as_mut() {
        session.page(down);
    }
}

fn repeat_search(app: &mut App, direction: Direction) {
    if let Some(query) = app.last_query.clone() {
        run_search(app, &query, direction);
    }
}

pub fn run_search(app: &mut App, query: &str, direction: Direction) {
    let Some(session) = app.session.as_mut() else {
        return;
    };
    match session.search(query, direction) {
        SearchOutcome::Found(_) => {
            app.not_found = false;
            app.last_query = Some(query.to_owned());
        }
        SearchOutcome::NotFound => {
            app.not_found = true;
            app.last_query = Some(query.to_owned());
        }
        SearchOutcome::Ignored => app.not_found = false,
        SearchOutcome::EmptyThread => app.notice("This conversation has no messages"),
    }
}

pub fn jump_to_date(app: &mut App, query: &str) {
    let date = match parse_date(query) {
        Ok(date) => date,
        Err(err) => {
            app.error(format!("Expected a date like 2019-06-30 ({err})"));
            return;
        }
    };
    let Some(session) = app.session.as_mut() else {
        return;
    };
    if session.jump_to_date(date).is_none() {
        app.notice("This conversation has no messages");
    }
}
