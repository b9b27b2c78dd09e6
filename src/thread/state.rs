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

use super::index::StorageIndex;
use std::fmt;
use std::str::FromStr;

/// Persisted scroll session of one conversation.
///
/// Encoded as `"<start>:<end>:<offset>"`. An absent offset is the empty
/// string (`"20:0:"`); the legacy literals `undefined` and `NaN` parse as
/// absent too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowState {
    pub start: StorageIndex,
    pub end: StorageIndex,
    pub scroll_offset: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateParseError {
    #[error("expected 3 `:`-separated fields, found {0}")]
    FieldCount(usize),
    #[error("invalid {field} value `{value}`")]
    InvalidField { field: &'static str, value: String },
}

impl fmt::Display for WindowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:", self.start.0, self.end.0)?;
        if let Some(offset) = self.scroll_offset {
            write!(f, "{offset}")?;
        }
        Ok(())
    }
}

impl FromStr for WindowState {
    type Err = StateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim().split(':').collect();
        let [start, end, offset] = fields.as_slice() else {
            return Err(StateParseError::FieldCount(fields.len()));
        };
        Ok(Self {
            start: StorageIndex(parse_index("start", start)?),
            end: StorageIndex(parse_index("end", end)?),
            scroll_offset: parse_offset(offset)?,
        })
    }
}

fn parse_index(field: &'static str, raw: &str) -> Result<usize, StateParseError> {
    raw.trim()
        .parse()
        .map_err(|_| StateParseError::InvalidField { field, value: raw.to_owned() })
}

/// Negative and fractional offsets come from older writers; they clamp to
/// whole rows at or below the top.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_offset(raw: &str) -> Result<Option<usize>, StateParseError> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "undefined" || raw == "NaN" {
        return Ok(None);
    }
    if let Ok(rows) = raw.parse::<i64>() {
        return Ok(Some(usize::try_from(rows).unwrap_or(0)));
    }
    match raw.parse::<f64>() {
        Ok(rows) if rows.is_finite() => Ok(Some(rows.max(0.0).trunc() as usize)),
        _ => Err(StateParseError::InvalidField { field: "scroll offset", value: raw.to_owned() }),
    }
}
