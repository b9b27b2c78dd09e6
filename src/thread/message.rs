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

use serde::{Deserialize, Serialize};

/// A single attachment reference inside an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<i64>,
}

impl Media {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into(), creation_timestamp: None }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub reaction: String,
    pub actor: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentKind {
    Photo,
    Gif,
    Sticker,
    Video,
    Audio,
    File,
}

impl AttachmentKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Gif => "gif",
            Self::Sticker => "sticker",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::File => "file",
        }
    }
}

/// What a message carries. Reactions are orthogonal and live on [`Message`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageBody {
    Text {
        content: String,
    },
    Photo {
        photos: Vec<Media>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
    Gif {
        gifs: Vec<Media>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
    Sticker {
        sticker: Media,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
    Video {
        videos: Vec<Media>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
    Share {
        share: Share,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
    Audio {
        audio_files: Vec<Media>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
    File {
        files: Vec<Media>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
    /// Nothing displayable, e.g. an unsent message.
    Empty,
}

impl MessageBody {
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Text { content } => Some(content),
            Self::Photo { content, .. }
            | Self::Gif { content, .. }
            | Self::Sticker { content, .. }
            | Self::Video { content, .. }
            | Self::Audio { content, .. }
            | Self::File { content, .. }
            | Self::Share { content, .. } => content.as_deref(),
            Self::Empty => None,
        }
    }

    pub fn attachments(&self) -> Vec<(AttachmentKind, &Media)> {
        fn tag(kind: AttachmentKind, media: &[Media]) -> Vec<(AttachmentKind, &Media)> {
            media.iter().map(|m| (kind, m)).collect()
        }
        match self {
            Self::Photo { photos, .. } => tag(AttachmentKind::Photo, photos),
            Self::Gif { gifs, .. } => tag(AttachmentKind::Gif, gifs),
            Self::Sticker { sticker, .. } => vec![(AttachmentKind::Sticker, sticker)],
            Self::Video { videos, .. } => tag(AttachmentKind::Video, videos),
            Self::Audio { audio_files, .. } => tag(AttachmentKind::Audio, audio_files),
            Self::File { files, .. } => tag(AttachmentKind::File, files),
            Self::Text { .. } | Self::Share { .. } | Self::Empty => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender_name: String,
    pub timestamp_ms: i64,
    pub body: MessageBody,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<Reaction>,
}

impl Message {
    pub fn new(sender_name: impl Into<String>, timestamp_ms: i64, body: MessageBody) -> Self {
        Self { sender_name: sender_name.into(), timestamp_ms, body, reactions: Vec::new() }
    }

    pub fn text(sender_name: impl Into<String>, timestamp_ms: i64, content: impl Into<String>) -> Self {
        Self::new(sender_name, timestamp_ms, MessageBody::Text { content: content.into() })
    }

    #[must_use]
    pub fn with_reactions(mut self, reactions: Vec<Reaction>) -> Self {
        self.reactions = reactions;
        self
    }

    /// Searchable text of the message, if any.
    pub fn content(&self) -> Option<&str> {
        self.body.content()
    }

    pub fn attachments(&self) -> Vec<(AttachmentKind, &Media)> {
        self.body.attachments()
    }

    pub fn has_reactions(&self) -> bool {
        !self.reactions.is_empty()
    }
}

/// A whole thread as held by the store. `messages` is newest-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_still_participant: Option<bool>,
    /// Directory that attachment URIs are relative to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_root: Option<std::path::PathBuf>,
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Restore newest-first order. The sort is stable so equal timestamps keep
    /// their input order.
    pub fn sort_messages(&mut self) {
        self.messages.sort_by(|a, b| b.timestamp_ms.cmp(&a.timestamp_ms));
    }

    /// Unique participant names in first-seen order.
    pub fn unique_participants(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for name in &self.participants {
            if !seen.contains(&name.as_str()) {
                seen.push(name);
            }
        }
        seen
    }
}
