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

use crate::thread::{ChronoIndex, SearchPattern};
use ratatui::style::Style;
use ratatui::text::Span;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'a> {
    Plain(&'a str),
    Match(&'a str),
}

/// Split `text` around every match of `regex`. Empty plain runs are dropped.
pub fn split_matches<'a>(text: &'a str, regex: &Regex) -> Vec<Fragment<'a>> {
    let mut fragments = Vec::new();
    let mut last = 0;
    for found in regex.find_iter(text) {
        if found.is_empty() {
            continue;
        }
        if found.start() > last {
            fragments.push(Fragment::Plain(&text[last..found.start()]));
        }
        fragments.push(Fragment::Match(found.as_str()));
        last = found.end();
    }
    if last < text.len() {
        fragments.push(Fragment::Plain(&text[last..]));
    }
    fragments
}

/// The message currently marked as a search hit.
#[derive(Debug, Clone)]
pub struct Highlight {
    pub index: ChronoIndex,
    pub pattern: SearchPattern,
}

impl Highlight {
    /// Spans for one line of the highlighted message.
    pub fn spans(&self, line: &str, base: Style, marked: Style) -> Vec<Span<'static>> {
        split_matches(line, self.pattern.regex())
            .into_iter()
            .map(|fragment| match fragment {
                Fragment::Plain(text) => Span::styled(text.to_owned(), base),
                Fragment::Match(text) => Span::styled(text.to_owned(), marked),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::style::Modifier;

    #[test]
    fn splits_all_case_insensitive_matches() {
        let pattern = SearchPattern::parse("ab").unwrap();
        assert_eq!(
            split_matches("xAByab", pattern.regex()),
            vec![Fragment::Plain("x"), Fragment::Match("AB"), Fragment::Plain("y"), Fragment::Match("ab")]
        );
    }

    #[test]
    fn no_match_is_single_plain_run() {
        let pattern = SearchPattern::parse("zz").unwrap();
        assert_eq!(split_matches("hello", pattern.regex()), vec![Fragment::Plain("hello")]);
        assert!(split_matches("", pattern.regex()).is_empty());
    }

    #[test]
    fn spans_carry_highlight_style() {
        let highlight = Highlight { index: ChronoIndex(0), pattern: SearchPattern::parse("lo").unwrap() };
        let marked = Style::default().add_modifier(Modifier::REVERSED);
        let spans = highlight.spans("hello", Style::default(), marked);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].content, "lo");
        assert_eq!(spans[1].style, marked);
    }
}
