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

use super::articles::{Article, ArticleElement, Position, build_articles};
use super::highlight::Highlight;
use super::media::{MediaCache, MediaState};
use super::sizes::{ArticleSize, SizeTracker};
use crate::thread::{ChronoIndex, Message, MessageBody, MessageWindow, SearchPattern};
use crate::ui::theme;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};

/// Result of one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rendered {
    /// Rows to add to the scroll position to keep the view anchored. `None`
    /// when there is no comparable previous layout (first render or a width
    /// change).
    pub delta: Option<isize>,
    pub total_height: usize,
}

/// Turns the realized window into styled lines and keeps the size history
/// needed to stabilize scrolling.
#[derive(Debug, Default)]
pub struct Renderer {
    sizes: SizeTracker,
    media: MediaCache,
    highlight: Option<Highlight>,
    lines: Vec<Line<'static>>,
    width: Option<u16>,
    rendered: Option<(ChronoIndex, ChronoIndex)>,
    stale: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    pub fn sizes(&self) -> &SizeTracker {
        &self.sizes
    }

    pub fn media(&self) -> &MediaCache {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut MediaCache {
        &mut self.media
    }

    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    /// Something other than the window changed what the lines look like.
    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    pub fn needs_render(&self, width: u16) -> bool {
        self.stale || self.width != Some(width)
    }

    pub fn render(&mut self, window: &MessageWindow, width: u16) -> Rendered {
        if self.width != Some(width) {
            if self.width.is_some() {
                tracing::debug!(from = ?self.width, to = width, "width changed, dropping size history");
            }
            self.sizes.clear();
            self.width = Some(width);
        }
        self.stale = false;

        let (first, slice) = if window.is_empty() {
            (ChronoIndex(0), Vec::new())
        } else {
            (window.oldest_realized(), window.visible_slice())
        };
        self.rendered = (!slice.is_empty()).then(|| (first, window.newest_realized()));

        let articles = build_articles(&slice, first);
        let mut lines = Vec::new();
        let mut sizes = Vec::with_capacity(articles.len());
        for article in &articles {
            let article_lines = self.article_lines(article);
            let height = Paragraph::new(Text::from(article_lines.clone())).wrap(Wrap { trim: false }).line_count(width);
            sizes.push(ArticleSize { id: article.id, height });
            lines.extend(article_lines);
        }
        self.lines = lines;

        let had_history = !self.sizes.is_empty();
        let delta = self.sizes.record(sizes);
        Rendered { delta: had_history.then_some(delta), total_height: self.sizes.total_height() }
    }

    /// Mark the message at `index` as the current search hit. Returns `false`
    /// when that message is not part of the last render.
    pub fn highlight_match(&mut self, pattern: &SearchPattern, index: ChronoIndex) -> bool {
        let Some((oldest, newest)) = self.rendered else {
            return false;
        };
        if index < oldest || index > newest || self.sizes.article_containing(index).is_none() {
            return false;
        }
        self.highlight = Some(Highlight { index, pattern: pattern.clone() });
        self.stale = true;
        true
    }

    pub fn clear_highlight(&mut self) {
        if self.highlight.take().is_some() {
            self.stale = true;
        }
    }

    fn article_lines(&self, article: &Article<'_>) -> Vec<Line<'static>> {
        let mut out = vec![Line::from(vec![
            Span::styled(
                article.sender.to_owned(),
                Style::default().fg(article.avatar.color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", super::format_timestamp(article.timestamp_ms)), Style::default().fg(theme::DIM)),
        ])];

        for element in &article.elements {
            let mut rows = self.element_rows(element);
            let reactions = reaction_row(element.message);
            let glyph = gutter_glyph(element.position);

            let avatar_on_reaction = article.avatar.beside_reaction && reactions.is_some();
            let is_bottom = matches!(element.position, Position::Bottom | Position::Single);
            let row_count = rows.len();
            for (i, spans) in rows.iter_mut().enumerate() {
                let prefix = if is_bottom && !avatar_on_reaction && i + 1 == row_count {
                    avatar_span(article)
                } else {
                    Span::styled(glyph, Style::default().fg(theme::DIM))
                };
                spans.insert(0, prefix);
            }
            out.extend(rows.into_iter().map(Line::from));

            if let Some(mut spans) = reactions {
                let prefix = if is_bottom && avatar_on_reaction {
                    avatar_span(article)
                } else {
                    Span::styled(glyph, Style::default().fg(theme::DIM))
                };
                spans.insert(0, prefix);
                out.push(Line::from(spans));
            }
        }

        out.push(Line::default());
        out
    }

    /// Content rows of one message, without the gutter.
    fn element_rows(&self, element: &ArticleElement<'_>) -> Vec<Vec<Span<'static>>> {
        let message = element.message;
        let highlight = self.highlight.as_ref().filter(|h| h.index == element.index);
        let mut rows: Vec<Vec<Span<'static>>> = Vec::new();

        if let Some(content) = message.content() {
            for line in content.split('\n') {
                let spans = match highlight {
                    Some(h) => h.spans(line, Style::default(), theme::search_match_style()),
                    None => vec![Span::raw(line.to_owned())],
                };
                rows.push(spans);
            }
        }

        if let MessageBody::Share { share, .. } = &message.body {
            if let Some(text) = &share.share_text {
                rows.push(vec![Span::styled(format!("\u{21AA} {text}"), Style::default().fg(theme::DIM))]);
            }
            if let Some(link) = &share.link {
                rows.push(vec![Span::styled(
                    link.clone(),
                    Style::default().fg(theme::LINK).add_modifier(Modifier::UNDERLINED),
                )]);
            }
        }

        for (kind, media) in message.attachments() {
            let (status, color) = match self.media.get(element.index, &media.uri) {
                Some(MediaState::Ready { bytes }) => (format_bytes(*bytes), theme::DIM),
                Some(MediaState::Broken { .. }) => ("unavailable".to_owned(), theme::BROKEN),
                Some(MediaState::Pending) | None => ("loading".to_owned(), theme::DIM),
            };
            rows.push(vec![
                Span::styled(format!("[{}] ", kind.label()), Style::default().fg(theme::ACCENT)),
                Span::raw(media.uri.clone()),
                Span::styled(format!(" ({status})"), Style::default().fg(color)),
            ]);
        }

        if rows.is_empty() {
            rows.push(vec![Span::styled(
                "(no content)",
                Style::default().fg(theme::DIM).add_modifier(Modifier::ITALIC),
            )]);
        }
        rows
    }
}

fn gutter_glyph(position: Position) -> &'static str {
    match position {
        Position::Single => "\u{2576} ",
        Position::Top => "\u{256D} ",
        Position::Middle => "\u{2502} ",
        Position::Bottom => "\u{2570} ",
    }
}

fn avatar_span(article: &Article<'_>) -> Span<'static> {
    let initial = if article.avatar.initial.is_empty() { "?" } else { article.avatar.initial.as_str() };
    Span::styled(
        format!("{initial} "),
        Style::default().fg(Color::Black).bg(article.avatar.color).add_modifier(Modifier::BOLD),
    )
}

fn reaction_row(message: &Message) -> Option<Vec<Span<'static>>> {
    if !message.has_reactions() {
        return None;
    }
    let text = message
        .reactions
        .iter()
        .map(|r| format!("{} {}", r.reaction, r.actor))
        .collect::<Vec<_>>()
        .join("  ");
    Some(vec![Span::styled(text, Style::default().fg(theme::DIM))])
}

#[allow(clippy::cast_precision_loss)]
fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    match bytes {
        b if b < KIB => format!("{b} B"),
        b if b < KIB * KIB => format!("{:.1} KiB", b as f64 / KIB as f64),
        b => format!("{:.1} MiB", b as f64 / (KIB * KIB) as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::media::MediaKey;
    use crate::thread::{Media, Reaction};
    use pretty_assertions::assert_eq;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn conversation(len: usize) -> Vec<Message> {
        (0..len)
            .map(|i| {
                let sender = if (i / 3) % 2 == 0 { "Ann" } else { "Bo" };
                Message::text(sender, (len - i) as i64 * 1000, format!("message {i}"))
            })
            .collect()
    }

    #[test]
    fn first_render_has_no_delta() {
        let window = MessageWindow::new(conversation(30));
        let mut renderer = Renderer::new();
        let rendered = renderer.render(&window, 40);
        assert_eq!(rendered.delta, None);
        assert_eq!(rendered.total_height, renderer.lines().len());
        assert!(!renderer.needs_render(40));
        assert!(renderer.needs_render(41));
    }

    #[test]
    fn growing_older_reports_added_rows() {
        let mut window = MessageWindow::new(conversation(60));
        let mut renderer = Renderer::new();
        renderer.render(&window, 80);
        let before = renderer.sizes().current().to_vec();
        assert!(window.grow_older());
        let rendered = renderer.render(&window, 80);
        let anchor = before[0].id;
        let above: usize = renderer.sizes().current().iter().take_while(|s| s.id < anchor).map(|s| s.height).sum();
        assert_eq!(rendered.delta, isize::try_from(above).ok());
        assert!(above > 0);
    }

    #[test]
    fn width_change_drops_history() {
        let window = MessageWindow::new(conversation(10));
        let mut renderer = Renderer::new();
        renderer.render(&window, 80);
        assert_eq!(renderer.render(&window, 20).delta, None);
        assert_eq!(renderer.render(&window, 20).delta, Some(0));
    }

    #[test]
    fn narrow_width_wraps_into_more_rows() {
        let window = MessageWindow::new(vec![Message::text("Ann", 0, "a fairly long line of text to wrap")]);
        let mut renderer = Renderer::new();
        let wide = renderer.render(&window, 200).total_height;
        let narrow = renderer.render(&window, 12).total_height;
        assert!(narrow > wide);
    }

    #[test]
    fn article_shows_header_gutter_and_avatar() {
        let window = MessageWindow::new(vec![Message::text("ann", 2000, "second"), Message::text("ann", 1000, "first")]);
        let mut renderer = Renderer::new();
        renderer.render(&window, 80);
        let lines: Vec<String> = renderer.lines().iter().map(plain).collect();
        assert!(lines[0].starts_with("ann  "));
        assert_eq!(lines[1], "\u{256D} first");
        assert_eq!(lines[2], "A second");
        assert_eq!(lines[3], "");
    }

    #[test]
    fn avatar_moves_to_reaction_row() {
        let message = Message::text("Bo", 0, "hi").with_reactions(vec![Reaction { reaction: "+1".into(), actor: "Ann".into() }]);
        let window = MessageWindow::new(vec![message]);
        let mut renderer = Renderer::new();
        renderer.render(&window, 80);
        let lines: Vec<String> = renderer.lines().iter().map(plain).collect();
        assert_eq!(lines[1], "\u{2576} hi");
        assert_eq!(lines[2], "B +1 Ann");
    }

    #[test]
    fn highlight_splits_only_the_hit() {
        let window = MessageWindow::new(vec![Message::text("A", 1, "needle b"), Message::text("A", 0, "needle a")]);
        let mut renderer = Renderer::new();
        renderer.render(&window, 80);
        let pattern = SearchPattern::parse("NEEDLE").unwrap();
        assert!(renderer.highlight_match(&pattern, ChronoIndex(1)));
        assert!(renderer.needs_render(80));
        renderer.render(&window, 80);
        let marked = theme::search_match_style();
        let hit_rows: Vec<usize> = renderer
            .lines()
            .iter()
            .enumerate()
            .filter(|(_, l)| l.spans.iter().any(|s| s.style == marked))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(hit_rows, vec![2]);
        assert_eq!(plain(&renderer.lines()[2]), "A needle b");
    }

    #[test]
    fn highlight_outside_render_is_rejected() {
        let window = MessageWindow::new(conversation(100));
        let mut renderer = Renderer::new();
        let pattern = SearchPattern::parse("message").unwrap();
        assert!(!renderer.highlight_match(&pattern, ChronoIndex(99)));
        renderer.render(&window, 80);
        assert!(!renderer.highlight_match(&pattern, ChronoIndex(3)));
        assert!(renderer.highlight_match(&pattern, ChronoIndex(99)));
    }

    #[test]
    fn attachments_show_media_state() {
        let photo = Message::new("A", 0, MessageBody::Photo { photos: vec![Media::new("p.jpg")], content: None });
        let window = MessageWindow::new(vec![photo]);
        let mut renderer = Renderer::new();
        renderer.render(&window, 80);
        assert!(plain(&renderer.lines()[1]).ends_with("p.jpg (loading)"));

        let requests = renderer.media_mut().prepopulate_requests(&window);
        let key = MediaKey { index: ChronoIndex(0), uri: "p.jpg".into() };
        assert_eq!(requests, vec![key.clone()]);
        renderer.media_mut().apply(vec![(key, MediaState::Broken { reason: "gone".into() })]);
        renderer.render(&window, 80);
        assert!(plain(&renderer.lines()[1]).ends_with("p.jpg (unavailable)"));
    }

    #[test]
    fn empty_window_renders_nothing() {
        let window = MessageWindow::new(Vec::new());
        let mut renderer = Renderer::new();
        let rendered = renderer.render(&window, 80);
        assert_eq!(rendered.total_height, 0);
        assert!(renderer.lines().is_empty());
    }

    #[test]
    fn byte_sizes_are_human_readable() {
        assert_eq!(format_bytes(12), "12 B");
        assert_eq!(format_bytes(2048), "2.0 KiB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MiB");
    }
}
