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

use crate::render::{MediaKey, MediaState, Renderer};
use crate::thread::{ChronoIndex, Conversation, Direction, MessageWindow, SearchPattern, StorageIndex, WindowState};
use chrono::{Local, NaiveDate, TimeZone};
use ratatui::text::Line;
use std::path::{Path, PathBuf};

/// Scroll correction to apply once the next layout has been measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollFix {
    /// Keep the content on screen where it was.
    Delta,
    Bottom,
    Restore(usize),
    /// Put the article holding this message a quarter of the viewport down.
    Center(ChronoIndex),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(ChronoIndex),
    NotFound,
    /// The query cannot match anything meaningful and was not run.
    Ignored,
    EmptyThread,
}

/// Everything tied to the conversation on screen. Dropped wholesale when
/// another conversation is displayed.
#[derive(Debug)]
pub struct ViewSession {
    id: String,
    title: String,
    participants: Vec<String>,
    media_root: Option<PathBuf>,
    window: MessageWindow,
    renderer: Renderer,
    generation: u64,
    scroll_top: usize,
    viewport_height: usize,
    total_height: usize,
    pending: Option<ScrollFix>,
    pending_highlight: Option<(SearchPattern, ChronoIndex)>,
    media_requests: Vec<MediaKey>,
    dirty: bool,
}

impl ViewSession {
    pub fn new(conversation: Conversation, generation: u64, saved: Option<WindowState>) -> Self {
        let participants = conversation.unique_participants().into_iter().map(str::to_owned).collect();
        let mut window = MessageWindow::new(conversation.messages);
        let pending = match saved {
            Some(state) => {
                window.set_state(state);
                state.scroll_offset.map_or(ScrollFix::Bottom, ScrollFix::Restore)
            }
            None => ScrollFix::Bottom,
        };
        tracing::info!(
            id = %conversation.id,
            messages = window.len(),
            restored = saved.is_some(),
            "displaying conversation"
        );
        Self {
            id: conversation.id,
            title: conversation.title,
            participants,
            media_root: conversation.media_root,
            window,
            renderer: Renderer::new(),
            generation,
            scroll_top: 0,
            viewport_height: 0,
            total_height: 0,
            pending: Some(pending),
            pending_highlight: None,
            media_requests: Vec::new(),
            dirty: true,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn media_root(&self) -> Option<&Path> {
        self.media_root.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn window(&self) -> &MessageWindow {
        &self.window
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn lines(&self) -> &[Line<'static>] {
        self.renderer.lines()
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn total_height(&self) -> usize {
        self.total_height
    }

    pub fn state(&self) -> WindowState {
        self.window.state()
    }

    fn max_scroll(&self) -> usize {
        self.total_height.saturating_sub(self.viewport_height)
    }

    fn set_scroll_top(&mut self, row: usize) {
        self.scroll_top = row.min(self.max_scroll());
        self.window.set_scroll_offset(Some(self.scroll_top));
    }

    /// Measure the current window at `width` and only then apply the pending
    /// scroll correction.
    pub fn layout(&mut self, width: u16, height: usize) {
        self.viewport_height = height;
        if self.dirty || self.renderer.needs_render(width) {
            let window_changed = self.dirty;
            self.dirty = false;
            let mut rendered = self.renderer.render(&self.window, width);
            if let Some((pattern, index)) = self.pending_highlight.take()
                && self.renderer.highlight_match(&pattern, index)
            {
                rendered = self.renderer.render(&self.window, width);
            }
            self.total_height = rendered.total_height;
            if window_changed {
                self.media_requests = self.renderer.media_mut().prepopulate_requests(&self.window);
            }

            match self.pending.take() {
                Some(ScrollFix::Delta) | None => {
                    if let Some(delta) = rendered.delta {
                        self.scroll_top = self.scroll_top.saturating_add_signed(delta);
                    }
                }
                Some(fix) => self.apply_fix(fix),
            }
        } else if let Some(fix) = self.pending.take() {
            self.apply_fix(fix);
        }
        self.set_scroll_top(self.scroll_top);
    }

    fn apply_fix(&mut self, fix: ScrollFix) {
        self.scroll_top = match fix {
            ScrollFix::Delta => self.scroll_top,
            ScrollFix::Bottom => self.max_scroll(),
            ScrollFix::Restore(row) => row,
            ScrollFix::Center(index) => self
                .renderer
                .sizes()
                .scroll_top_from_index(index)
                .unwrap_or(0)
                .saturating_sub(self.viewport_height / 4),
        };
    }

    /// Move the viewport by `rows`. Reaching the top or bottom edge grows the
    /// window in that direction; returns whether it grew.
    ///
    /// At most one growth step happens per measured layout: the delta of a
    /// growth is only known once it has been rendered.
    pub fn scroll_by(&mut self, rows: isize) -> bool {
        self.set_scroll_top(self.scroll_top.saturating_add_signed(rows));
        let max = self.max_scroll();
        let grew = if self.dirty {
            false
        } else if rows < 0 && self.scroll_top == 0 {
            self.window.grow_older()
        } else if rows > 0 && self.scroll_top + 1 >= max {
            self.window.grow_newer()
        } else {
            false
        };
        if grew {
            self.dirty = true;
            self.pending = Some(ScrollFix::Delta);
        }
        grew
    }

    pub fn page(&mut self, down: bool) -> bool {
        let rows = isize::try_from(self.viewport_height.saturating_sub(2).max(1)).unwrap_or(1);
        self.scroll_by(if down { rows } else { -rows })
    }

    /// Message at the top edge of the viewport.
    pub fn top_index(&self) -> Option<ChronoIndex> {
        self.renderer.sizes().index_from_scroll_top(self.scroll_top)
    }

    /// Message at the bottom edge of the viewport.
    pub fn bottom_index(&self) -> Option<ChronoIndex> {
        let bottom = self.scroll_top + self.viewport_height.saturating_sub(1);
        self.renderer.sizes().index_from_scroll_top(bottom)
    }

    /// Find the next match toward newer messages from the top of the
    /// viewport, or toward older ones from its bottom.
    pub fn search(&mut self, query: &str, direction: Direction) -> SearchOutcome {
        let Some(pattern) = SearchPattern::parse(query) else {
            return SearchOutcome::Ignored;
        };
        if self.window.is_empty() {
            return SearchOutcome::EmptyThread;
        }
        let from = match direction {
            Direction::Newer => self.top_index().unwrap_or_else(|| self.window.oldest_realized()),
            Direction::Older => self.bottom_index().unwrap_or_else(|| self.window.newest_realized()),
        };
        let hit = match direction {
            Direction::Newer => self.window.find_next(&pattern, from),
            Direction::Older => self.window.find_prev(&pattern, from),
        };
        let Some(hit) = hit else {
            return SearchOutcome::NotFound;
        };
        tracing::debug!(query, %from, %hit, ?direction, "search hit");
        self.window.jump_to(hit);
        self.pending_highlight = Some((pattern, hit));
        self.pending = Some(ScrollFix::Center(hit));
        self.dirty = true;
        SearchOutcome::Found(hit)
    }

    /// Jump to the first message of `date` (local time), clamped to the
    /// thread's range. Returns `None` for an empty thread.
    pub fn jump_to_date(&mut self, date: NaiveDate) -> Option<ChronoIndex> {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        let timestamp_ms = Local
            .from_local_datetime(&midnight)
            .earliest()
            .map_or_else(|| midnight.and_utc().timestamp_millis(), |dt| dt.timestamp_millis());
        let index = self.window.timestamp_to_chrono_index(timestamp_ms)?;
        self.jump_to(index);
        self.window.reset_search();
        Some(index)
    }

    fn jump_to(&mut self, index: ChronoIndex) {
        self.window.jump_to(index);
        self.renderer.clear_highlight();
        self.pending = Some(ScrollFix::Center(index));
        self.dirty = true;
    }

    pub fn jump_oldest(&mut self) {
        if !self.window.is_empty() {
            self.jump_to(ChronoIndex(0));
        }
    }

    /// Back to the initial window at the bottom.
    pub fn jump_newest(&mut self) {
        if self.window.is_empty() {
            return;
        }
        let start = self.window.policy().initial_span.min(self.window.len() - 1);
        self.window.set_state(WindowState { start: StorageIndex(start), end: StorageIndex(0), scroll_offset: None });
        self.renderer.clear_highlight();
        self.pending = Some(ScrollFix::Bottom);
        self.dirty = true;
    }

    pub fn take_media_requests(&mut self) -> Vec<MediaKey> {
        std::mem::take(&mut self.media_requests)
    }

    pub fn apply_media(&mut self, results: Vec<(MediaKey, MediaState)>) {
        self.renderer.media_mut().apply(results);
        self.renderer.mark_stale();
    }
}

/// Parse a `YYYY-MM-DD` date-jump query.
pub fn parse_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
}
