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

//! The two index spaces of a thread.
//!
//! Messages are stored newest-first, so a [`StorageIndex`] of 0 is the most
//! recent message. Scroll positions, article ids and search results are
//! expressed as a [`ChronoIndex`], where 0 is the oldest message. Converting
//! between the two always needs the thread length.

use std::fmt;

/// Position in the stored, newest-first message array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StorageIndex(pub usize);

/// Position counted from the oldest message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChronoIndex(pub usize);

impl StorageIndex {
    /// Saturates at the oldest position when `self` is out of range.
    #[must_use]
    pub fn to_chrono(self, len: usize) -> ChronoIndex {
        ChronoIndex(len.saturating_sub(1).saturating_sub(self.0))
    }

    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }
}

impl ChronoIndex {
    /// Saturates at the newest position when `self` is out of range.
    #[must_use]
    pub fn to_storage(self, len: usize) -> StorageIndex {
        StorageIndex(len.saturating_sub(1).saturating_sub(self.0))
    }

    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }

    #[must_use]
    pub fn saturating_sub(self, n: usize) -> Self {
        Self(self.0.saturating_sub(n))
    }

    #[must_use]
    pub fn saturating_add(self, n: usize) -> Self {
        Self(self.0.saturating_add(n))
    }

    /// Distance from `base` when `self` is at or after it.
    #[must_use]
    pub fn offset_from(self, base: Self) -> Option<usize> {
        self.0.checked_sub(base.0)
    }
}

impl fmt::Display for StorageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

impl fmt::Display for ChronoIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
