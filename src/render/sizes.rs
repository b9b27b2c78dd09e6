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

use crate::thread::ChronoIndex;

/// Measured height, in rows, of one rendered article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleSize {
    pub id: ChronoIndex,
    pub height: usize,
}

impl ArticleSize {
    pub fn new(id: usize, height: usize) -> Self {
        Self { id: ChronoIndex(id), height }
    }
}

fn rows(height: usize) -> isize {
    isize::try_from(height).unwrap_or(isize::MAX)
}

/// Rows by which the content above the shared anchor grew between the `old`
/// and `new` layouts. Adding the result to the scroll position keeps any
/// article present in both layouts at the same place on screen.
///
/// The anchor is the oldest article of `old`; with no old layout it sits past
/// every id so the whole new layout counts as growth. Both lists are ordered
/// oldest first.
pub fn resolve_delta(new: &[ArticleSize], old: &[ArticleSize]) -> isize {
    let Some(first) = new.first() else {
        return 0;
    };
    let anchor = old.first().copied();
    let anchor_id = anchor.map(|a| a.id);

    if let Some(anchor_id) = anchor_id
        && first.id > anchor_id
    {
        return -resolve_delta(old, new);
    }

    let covers = |size: &ArticleSize| anchor_id.is_none_or(|id| size.id <= id);
    let mut i = 0;
    let mut sum = 0isize;
    while i + 1 < new.len() && covers(&new[i + 1]) {
        sum += rows(new[i].height);
        i += 1;
    }
    if anchor_id != Some(new[i].id) {
        sum += rows(new[i].height) - rows(anchor.map_or(0, |a| a.height));
    }
    sum
}

/// The last two measured layouts of the chat body.
#[derive(Debug, Clone, Default)]
pub struct SizeTracker {
    current: Vec<ArticleSize>,
    previous: Vec<ArticleSize>,
}

impl SizeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &[ArticleSize] {
        &self.current
    }

    pub fn previous(&self) -> &[ArticleSize] {
        &self.previous
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Make `sizes` the current layout and return the scroll delta from the
    /// layout it replaces.
    pub fn record(&mut self, sizes: Vec<ArticleSize>) -> isize {
        let delta = resolve_delta(&sizes, &self.current);
        self.previous = std::mem::replace(&mut self.current, sizes);
        delta
    }

    pub fn clear(&mut self) {
        self.current.clear();
        self.previous.clear();
    }

    pub fn total_height(&self) -> usize {
        self.current.iter().map(|s| s.height).sum()
    }

    /// Id of the article whose range starts at or before `index`.
    pub fn article_containing(&self, index: ChronoIndex) -> Option<ChronoIndex> {
        self.current.iter().rev().find(|s| s.id <= index).map(|s| s.id)
    }

    /// Rows above the article containing `index`.
    pub fn scroll_top_from_index(&self, index: ChronoIndex) -> Option<usize> {
        let id = self.article_containing(index)?;
        Some(self.current.iter().take_while(|s| s.id < id).map(|s| s.height).sum())
    }

    /// Id of the article covering `row`, clamped to the last article.
    pub fn index_from_scroll_top(&self, row: usize) -> Option<ChronoIndex> {
        let mut top = 0;
        for size in &self.current {
            top += size.height;
            if row < top {
                return Some(size.id);
            }
        }
        self.current.last().map(|s| s.id)
    }
}
