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

use ratatui::style::Color;
use std::fmt::Write as _;

/// A sender badge: capitalized initial on a color derived from the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    pub initial: String,
    pub color: Color,
    /// The element the avatar sits beside carries reactions, so the badge is
    /// drawn on the reaction row instead of the last text row.
    pub beside_reaction: bool,
}

impl Avatar {
    pub fn for_sender(sender: &str, beside_reaction: bool) -> Self {
        let initial = sender.chars().next().map(|c| c.to_uppercase().collect()).unwrap_or_default();
        Self { initial, color: hash_color(sender), beside_reaction }
    }
}

/// Stable color for a name.
///
/// Uses the classic `hash * 31 + c` string hash over UTF-16 code units in
/// wrapping 32-bit arithmetic. Each byte of the hash is printed as unpadded
/// hex, the result is right-padded with zeros and its first six digits are
/// read as RGB. Existing exports keep the colors they always had.
pub fn hash_color(name: &str) -> Color {
    let hash = name
        .encode_utf16()
        .fold(0i32, |hash, unit| i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash)));

    let mut hex = String::with_capacity(14);
    for shift in [24, 16, 8, 0] {
        let _ = write!(hex, "{:x}", (hash >> shift) & 0xFF);
    }
    hex.push_str("000000");

    let channel = |range: std::ops::Range<usize>| {
        hex.get(range).and_then(|digits| u8::from_str_radix(digits, 16).ok()).unwrap_or(0)
    };
    Color::Rgb(channel(0..2), channel(2..4), channel(4..6))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_name_is_black() {
        assert_eq!(hash_color(""), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn unpadded_bytes_shift_digits() {
        // hash("A") = 0x41 -> "0" "0" "0" "41" -> "000410"
        assert_eq!(hash_color("A"), Color::Rgb(0x00, 0x04, 0x10));
    }

    #[test]
    fn color_is_deterministic_and_name_sensitive() {
        assert_eq!(hash_color("Alice Smith"), hash_color("Alice Smith"));
        assert_ne!(hash_color("Alice Smith"), hash_color("Bob Jones"));
    }

    #[test]
    fn initial_is_uppercased() {
        let avatar = Avatar::for_sender("émile", false);
        assert_eq!(avatar.initial, "É");
        assert_eq!(Avatar::for_sender("", true).initial, "");
    }
}
