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

pub const DEFAULT_INITIAL_SPAN: usize = 20;
pub const DEFAULT_GROW_STEP: usize = 10;
pub const DEFAULT_MAX_SPAN: usize = 100;
pub const DEFAULT_TRIM_SPAN: usize = 50;
pub const DEFAULT_JUMP_RADIUS: usize = 25;
pub const DEFAULT_PREFETCH_RADIUS: usize = 100;
pub const DEFAULT_SEARCH_CONTINUITY: usize = 15;

/// Sizes that drive how the realized window grows, shrinks and recenters.
/// All spans are counted in messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPolicy {
    /// Newest messages realized on first display, in addition to the newest one.
    pub initial_span: usize,
    pub grow_step: usize,
    /// Span above which the far end gets trimmed.
    pub max_span: usize,
    /// Span kept after a trim.
    pub trim_span: usize,
    pub jump_radius: usize,
    /// Media is prepared this many positions beyond each end of the window.
    pub prefetch_radius: usize,
    /// A previous search hit this close to a new start point is resumed from.
    pub search_continuity: usize,
}

impl Default for WindowPolicy {
    fn default() -> Self {
        *default_window_policy()
    }
}

#[must_use]
pub fn default_window_policy() -> &'static WindowPolicy {
    static POLICY: WindowPolicy = WindowPolicy {
        initial_span: DEFAULT_INITIAL_SPAN,
        grow_step: DEFAULT_GROW_STEP,
        max_span: DEFAULT_MAX_SPAN,
        trim_span: DEFAULT_TRIM_SPAN,
        jump_radius: DEFAULT_JUMP_RADIUS,
        prefetch_radius: DEFAULT_PREFETCH_RADIUS,
        search_continuity: DEFAULT_SEARCH_CONTINUITY,
    };
    &POLICY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_static_policy() {
        assert_eq!(WindowPolicy::default(), *default_window_policy());
    }

    #[test]
    fn trim_keeps_room_to_grow() {
        let policy = default_window_policy();
        assert!(policy.trim_span + policy.grow_step <= policy.max_span);
    }
}
