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
use regex::{Regex, RegexBuilder};

/// Characters that have no literal meaning on their own in a search box.
const REGEX_META: &[char] =
    &['-', '/', '\\', '^', '$', '*', '+', '?', '.', '(', ')', '|', '[', ']', '{', '}'];

/// A user query, matched literally and case-insensitively.
#[derive(Debug, Clone)]
pub struct SearchPattern {
    source: String,
    regex: Regex,
}

impl SearchPattern {
    /// Returns `None` for input that should not trigger a search at all:
    /// empty input, or input made only of regex metacharacters.
    pub fn parse(input: &str) -> Option<Self> {
        if input.chars().all(|c| REGEX_META.contains(&c)) {
            return None;
        }
        let regex = RegexBuilder::new(&regex::escape(input)).case_insensitive(true).build().ok()?;
        Some(Self { source: input.to_owned(), regex })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn matches(&self, message: &Message) -> bool {
        message.content().is_some_and(|text| self.regex.is_match(text))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the newest message (increasing chronological index).
    Newer,
    /// Toward the oldest message.
    Older,
}

/// Where the previous successful search landed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCursor {
    last_index: Option<StorageIndex>,
    last_pattern: Option<String>,
}

impl SearchCursor {
    pub fn last_index(&self) -> Option<StorageIndex> {
        self.last_index
    }

    pub fn last_pattern(&self) -> Option<&str> {
        self.last_pattern.as_deref()
    }

    /// Forget the last hit position; the pattern is kept.
    pub fn reset(&mut self) {
        self.last_index = None;
    }

    /// Continuity rule: repeating a pattern resumes from its last hit, and a
    /// hit from any pattern close to `requested` wins over `requested`, so
    /// searches from a barely-scrolled viewport keep their place.
    fn effective_start(&self, pattern: &str, requested: StorageIndex, continuity: usize) -> StorageIndex {
        let Some(last) = self.last_index else {
            return requested;
        };
        if self.last_pattern.as_deref() == Some(pattern) || last.0.abs_diff(requested.0) < continuity {
            last
        } else {
            requested
        }
    }

    fn record(&mut self, index: StorageIndex, pattern: &str) {
        self.last_index = Some(index);
        self.last_pattern = Some(pattern.to_owned());
    }
}

/// Scan `messages` (newest-first) for `pattern`, starting one step past the
/// continuity-adjusted start so the current hit is not matched again.
///
/// A miss leaves the cursor untouched.
pub(crate) fn find(
    messages: &[Message],
    cursor: &mut SearchCursor,
    pattern: &SearchPattern,
    from: ChronoIndex,
    direction: Direction,
    continuity: usize,
) -> Option<ChronoIndex> {
    let len = messages.len();
    if len == 0 {
        return None;
    }
    let requested = ChronoIndex(from.0.min(len - 1)).to_storage(len);
    let start = cursor.effective_start(pattern.as_str(), requested, continuity);

    let is_hit = |i: &usize| pattern.matches(&messages[*i]);
    let hit = match direction {
        Direction::Newer => (0..start.0).rev().find(is_hit),
        Direction::Older => (start.0 + 1..len).find(is_hit),
    };

    let Some(hit) = hit.map(StorageIndex) else {
        tracing::debug!(pattern = pattern.as_str(), ?direction, %from, "search exhausted");
        return None;
    };
    cursor.record(hit, pattern.as_str());
    Some(hit.to_chrono(len))
}
