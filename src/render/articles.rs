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

use super::avatar::Avatar;
use crate::thread::{ChronoIndex, Message};

/// Consecutive messages from one sender stay in the same article while each
/// follows the previous one by less than this.
pub const ARTICLE_GAP_MS: i64 = 3_600_000;

/// Where a message sits inside its article; drives the gutter glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Single,
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone)]
pub struct ArticleElement<'a> {
    pub index: ChronoIndex,
    pub position: Position,
    pub message: &'a Message,
}

/// A block of rows in the chat body. `id` is the chronological index of its
/// first message.
#[derive(Debug, Clone)]
pub struct Article<'a> {
    pub id: ChronoIndex,
    pub sender: &'a str,
    pub timestamp_ms: i64,
    pub elements: Vec<ArticleElement<'a>>,
    pub avatar: Avatar,
}

impl Article<'_> {
    /// Index one past the last element.
    pub fn end(&self) -> ChronoIndex {
        self.id.saturating_add(self.elements.len())
    }
}

fn continues(prev: &Message, next: &Message) -> bool {
    prev.sender_name == next.sender_name && next.timestamp_ms.abs_diff(prev.timestamp_ms) < ARTICLE_GAP_MS.unsigned_abs()
}

/// Group an oldest-first slice into articles in a single forward pass.
/// `first` is the chronological index of `messages[0]`.
pub fn build_articles<'a>(messages: &[&'a Message], first: ChronoIndex) -> Vec<Article<'a>> {
    let mut groups: Vec<(ChronoIndex, Vec<&'a Message>)> = Vec::new();
    for (offset, &message) in messages.iter().enumerate() {
        match groups.last_mut() {
            Some((_, group)) if group.last().is_some_and(|prev| continues(prev, message)) => {
                group.push(message);
            }
            _ => groups.push((first.saturating_add(offset), vec![message])),
        }
    }

    groups
        .into_iter()
        .filter_map(|(id, group)| {
            let head = *group.first()?;
            let tail = *group.last()?;
            let count = group.len();
            let elements = group
                .into_iter()
                .enumerate()
                .map(|(i, message)| ArticleElement {
                    index: id.saturating_add(i),
                    position: position_of(i, count),
                    message,
                })
                .collect();
            Some(Article {
                id,
                sender: &head.sender_name,
                timestamp_ms: head.timestamp_ms,
                elements,
                avatar: Avatar::for_sender(&head.sender_name, tail.has_reactions()),
            })
        })
        .collect()
}

fn position_of(i: usize, count: usize) -> Position {
    match (i, count) {
        (_, 1) => Position::Single,
        (0, _) => Position::Top,
        (i, count) if i + 1 == count => Position::Bottom,
        _ => Position::Middle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thread::Reaction;
    use pretty_assertions::assert_eq;

    fn ids_and_positions(articles: &[Article<'_>]) -> Vec<(usize, Vec<Position>)> {
        articles.iter().map(|a| (a.id.0, a.elements.iter().map(|e| e.position).collect())).collect()
    }

    #[test]
    fn groups_by_sender_runs() {
        // Oldest first: senders B A A A B B B A A B A (the newest-first A,B,A,A,B,B,B,A,A,A,B reversed)
        let senders = ["B", "A", "A", "A", "B", "B", "B", "A", "A", "B", "A"];
        let owned: Vec<Message> =
            senders.iter().enumerate().map(|(i, s)| Message::text(*s, i as i64 * 10, "x")).collect();
        let slice: Vec<&Message> = owned.iter().collect();
        let articles = build_articles(&slice, ChronoIndex(0));
        let ids: Vec<usize> = articles.iter().map(|a| a.id.0).collect();
        assert_eq!(ids, vec![0, 1, 4, 7, 9, 10]);
        assert_eq!(articles[1].elements.len(), 3);
        assert_eq!(articles[1].end(), ChronoIndex(4));
    }

    #[test]
    fn positions_follow_article_shape() {
        let owned = [
            Message::text("A", 0, "a"),
            Message::text("A", 1, "b"),
            Message::text("A", 2, "c"),
            Message::text("B", 3, "d"),
            Message::text("A", 4, "e"),
            Message::text("A", 5, "f"),
        ];
        let slice: Vec<&Message> = owned.iter().collect();
        let articles = build_articles(&slice, ChronoIndex(40));
        assert_eq!(
            ids_and_positions(&articles),
            vec![
                (40, vec![Position::Top, Position::Middle, Position::Bottom]),
                (43, vec![Position::Single]),
                (44, vec![Position::Top, Position::Bottom]),
            ]
        );
        assert_eq!(articles[2].elements[1].index, ChronoIndex(45));
    }

    #[test]
    fn hour_gap_splits_same_sender() {
        let owned = [
            Message::text("A", 0, "a"),
            Message::text("A", ARTICLE_GAP_MS - 1, "b"),
            Message::text("A", 2 * ARTICLE_GAP_MS - 1, "c"),
        ];
        let slice: Vec<&Message> = owned.iter().collect();
        let articles = build_articles(&slice, ChronoIndex(0));
        let ids: Vec<usize> = articles.iter().map(|a| a.id.0).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn avatar_tracks_reactions_on_last_element() {
        let reaction = Reaction { reaction: "+1".into(), actor: "B".into() };
        let owned = [Message::text("A", 0, "a").with_reactions(vec![reaction]), Message::text("A", 1, "b")];
        let slice: Vec<&Message> = owned.iter().collect();
        let articles = build_articles(&slice, ChronoIndex(0));
        assert!(!articles[0].avatar.beside_reaction);

        let slice: Vec<&Message> = owned.iter().take(1).collect();
        assert!(build_articles(&slice, ChronoIndex(0))[0].avatar.beside_reaction);
    }

    #[test]
    fn empty_slice_has_no_articles() {
        assert!(build_articles(&[], ChronoIndex(0)).is_empty());
    }
}
