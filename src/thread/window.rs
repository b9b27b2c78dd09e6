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

use super::index::{ChronoIndex, StorageIndex};
use super::message::Message;
use super::policy::{WindowPolicy, default_window_policy};
use super::search::{self, Direction, SearchCursor, SearchPattern};
use super::state::WindowState;

/// The realized slice of a thread.
///
/// `start` and `end` are storage indices with `end <= start`. Because storage
/// is newest-first, `start` bounds the *oldest* realized message and `end` the
/// newest one. An empty thread keeps the degenerate window `(0, 0)` and
/// realizes nothing.
#[derive(Debug, Clone)]
pub struct MessageWindow {
    messages: Vec<Message>,
    start: StorageIndex,
    end: StorageIndex,
    scroll_offset: Option<usize>,
    search: SearchCursor,
    policy: WindowPolicy,
}

impl MessageWindow {
    pub fn new(messages: Vec<Message>) -> Self {
        Self::with_policy(messages, *default_window_policy())
    }

    pub fn with_policy(messages: Vec<Message>, policy: WindowPolicy) -> Self {
        let start = StorageIndex(policy.initial_span.min(messages.len().saturating_sub(1)));
        Self {
            messages,
            start,
            end: StorageIndex(0),
            scroll_offset: None,
            search: SearchCursor::default(),
            policy,
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn policy(&self) -> &WindowPolicy {
        &self.policy
    }

    pub fn start(&self) -> StorageIndex {
        self.start
    }

    pub fn end(&self) -> StorageIndex {
        self.end
    }

    fn last(&self) -> usize {
        self.messages.len().saturating_sub(1)
    }

    pub fn to_chrono(&self, index: StorageIndex) -> ChronoIndex {
        index.to_chrono(self.len())
    }

    pub fn to_storage(&self, index: ChronoIndex) -> StorageIndex {
        index.to_storage(self.len())
    }

    /// Number of realized messages.
    pub fn realized_len(&self) -> usize {
        if self.is_empty() { 0 } else { self.start.0 - self.end.0 + 1 }
    }

    /// Chronological index of the oldest realized message.
    pub fn oldest_realized(&self) -> ChronoIndex {
        self.to_chrono(self.start)
    }

    /// Chronological index of the newest realized message.
    pub fn newest_realized(&self) -> ChronoIndex {
        self.to_chrono(self.end)
    }

    pub fn message_at(&self, index: ChronoIndex) -> Option<&Message> {
        if index.0 >= self.len() {
            return None;
        }
        self.messages.get(self.to_storage(index).0)
    }

    /// The realized messages, oldest first.
    pub fn visible_slice(&self) -> Vec<&Message> {
        if self.is_empty() {
            return Vec::new();
        }
        self.messages[self.end.0..=self.start.0].iter().rev().collect()
    }

    /// Messages between two chronological positions (inclusive, either
    /// order), oldest first, along with the chronological index of the first.
    /// Both ends are clamped to the thread.
    pub fn slice_between(&self, a: ChronoIndex, b: ChronoIndex) -> (ChronoIndex, Vec<&Message>) {
        if self.is_empty() {
            return (ChronoIndex(0), Vec::new());
        }
        let last = self.last();
        let (lo, hi) = (a.0.min(last), b.0.min(last));
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        let slice = self.messages[last - hi..=last - lo].iter().rev().collect();
        (ChronoIndex(lo), slice)
    }

    /// First message, scanning from the newest, whose timestamp is at or
    /// after `timestamp_ms` while the next older one is before it. Targets
    /// outside the thread clamp to the newest or oldest message.
    pub fn timestamp_to_chrono_index(&self, timestamp_ms: i64) -> Option<ChronoIndex> {
        let newest = self.messages.first()?;
        let oldest = self.messages.last()?;
        if timestamp_ms >= newest.timestamp_ms {
            return Some(self.to_chrono(StorageIndex(0)));
        }
        if timestamp_ms <= oldest.timestamp_ms {
            return Some(ChronoIndex(0));
        }
        // Storage is sorted descending, so the predicate holds for a prefix.
        let boundary = self.messages.partition_point(|m| m.timestamp_ms >= timestamp_ms);
        Some(self.to_chrono(StorageIndex(boundary.saturating_sub(1))))
    }

    /// Reveal older messages. Returns `false` at the oldest boundary.
    pub fn grow_older(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        let previous = self.start;
        self.start = StorageIndex((self.start.0 + self.policy.grow_step).min(self.last()));
        if self.start == previous {
            return false;
        }
        if self.start.0 - self.end.0 > self.policy.max_span {
            self.end = StorageIndex(self.start.0.saturating_sub(self.policy.trim_span));
        }
        tracing::trace!(start = %self.start, end = %self.end, "window grew older");
        true
    }

    /// Reveal newer messages. Returns `false` at the newest boundary.
    pub fn grow_newer(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        let previous = self.end;
        self.end = StorageIndex(self.end.0.saturating_sub(self.policy.grow_step));
        if self.end == previous {
            return false;
        }
        if self.start.0 - self.end.0 > self.policy.max_span {
            self.start = StorageIndex((self.end.0 + self.policy.trim_span).min(self.last()));
        }
        tracing::trace!(start = %self.start, end = %self.end, "window grew newer");
        true
    }

    /// Recenter the window on `index` and put the view at its top.
    pub fn jump_to(&mut self, index: ChronoIndex) {
        if self.is_empty() {
            return;
        }
        let center = self.to_storage(ChronoIndex(index.0.min(self.last())));
        self.start = StorageIndex((center.0 + self.policy.jump_radius).min(self.last()));
        self.end = StorageIndex(center.0.saturating_sub(self.policy.jump_radius));
        self.scroll_offset = Some(0);
    }

    pub fn scroll_offset(&self) -> Option<usize> {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: Option<usize>) {
        self.scroll_offset = offset;
    }

    pub fn search_cursor(&self) -> &SearchCursor {
        &self.search
    }

    pub fn find_next(&mut self, pattern: &SearchPattern, from: ChronoIndex) -> Option<ChronoIndex> {
        let continuity = self.policy.search_continuity;
        search::find(&self.messages, &mut self.search, pattern, from, Direction::Newer, continuity)
    }

    pub fn find_prev(&mut self, pattern: &SearchPattern, from: ChronoIndex) -> Option<ChronoIndex> {
        let continuity = self.policy.search_continuity;
        search::find(&self.messages, &mut self.search, pattern, from, Direction::Older, continuity)
    }

    pub fn reset_search(&mut self) {
        self.search.reset();
    }

    pub fn state(&self) -> WindowState {
        WindowState { start: self.start, end: self.end, scroll_offset: self.scroll_offset }
    }

    /// Restore a persisted state. Indices beyond the thread (e.g. from a
    /// thread that shrank on re-import) are clamped.
    pub fn set_state(&mut self, state: WindowState) {
        let start = state.start.0.min(self.last());
        let end = state.end.0.min(start);
        if (start, end) != (state.start.0, state.end.0) {
            tracing::warn!(?state, len = self.len(), "clamped out-of-range window state");
        }
        self.start = StorageIndex(start);
        self.end = StorageIndex(end);
        self.scroll_offset = state.scroll_offset;
    }
}
