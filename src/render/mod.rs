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

pub mod articles;
pub mod avatar;
pub mod highlight;
pub mod media;
pub mod renderer;
pub mod sizes;

pub use articles::{ARTICLE_GAP_MS, Article, Position, build_articles};
pub use highlight::{Fragment, Highlight, split_matches};
pub use media::{MediaCache, MediaKey, MediaState, prepare_media};
pub use renderer::{Rendered, Renderer};
pub use sizes::{ArticleSize, SizeTracker, resolve_delta};

use chrono::{Local, TimeZone};

/// `MM/DD/YYYY @ HH:MM:SS` in local time.
pub fn format_timestamp(timestamp_ms: i64) -> String {
    format_timestamp_in(&Local, timestamp_ms)
}

pub fn format_timestamp_in<Tz: TimeZone>(tz: &Tz, timestamp_ms: i64) -> String
where
    Tz::Offset: std::fmt::Display,
{
    tz.timestamp_millis_opt(timestamp_ms)
        .single()
        .map_or_else(|| timestamp_ms.to_string(), |dt| dt.format("%m/%d/%Y @ %H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn formats_month_first_with_seconds() {
        assert_eq!(format_timestamp_in(&Utc, 1_546_398_245_000), "01/02/2019 @ 03:04:05");
    }

    #[test]
    fn out_of_range_falls_back_to_raw() {
        assert_eq!(format_timestamp_in(&Utc, i64::MAX), i64::MAX.to_string());
    }
}
