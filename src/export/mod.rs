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

//! Decoding of Messenger-style JSON exports.
//!
//! A long thread is split over several `message_N.json` files. Each file
//! repeats the thread metadata and holds a newest-first run of messages.
//! Text in these files is UTF-8 that was escaped byte by byte (`Ã©`
//! for `é`), so every string is repaired after JSON decoding.

use crate::thread::{Conversation, Media, Message, MessageBody, Reaction, Share};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("export is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no export documents given")]
    Empty,
    #[error("export contains no messages")]
    NoMessages,
    #[error("export has neither a thread path nor a title to derive an id from")]
    MissingId,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    participants: Vec<RawParticipant>,
    #[serde(default)]
    messages: Vec<RawMessage>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    thread_path: Option<String>,
    #[serde(default, alias = "threadType")]
    thread_type: Option<String>,
    #[serde(default, alias = "isStillParticipant")]
    is_still_participant: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawParticipant {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    #[serde(default)]
    sender_name: String,
    timestamp_ms: i64,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    photos: Vec<RawMedia>,
    #[serde(default)]
    gifs: Vec<RawMedia>,
    #[serde(default)]
    videos: Vec<RawMedia>,
    #[serde(default)]
    audio_files: Vec<RawMedia>,
    #[serde(default)]
    files: Vec<RawMedia>,
    #[serde(default)]
    sticker: Option<RawMedia>,
    #[serde(default)]
    share: Option<RawShare>,
    #[serde(default)]
    reactions: Vec<RawReaction>,
}

#[derive(Debug, Deserialize)]
struct RawMedia {
    uri: String,
    #[serde(default)]
    creation_timestamp: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawShare {
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    share_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawReaction {
    reaction: String,
    #[serde(default)]
    actor: String,
}

/// Undo byte-wise escaping: a string whose chars all fit in one byte and
/// whose bytes form valid UTF-8 is replaced by that UTF-8 text.
pub fn repair_text(text: String) -> String {
    if text.is_ascii() {
        return text;
    }
    let bytes: Option<Vec<u8>> = text.chars().map(|c| u8::try_from(c).ok()).collect();
    match bytes.map(String::from_utf8) {
        Some(Ok(repaired)) => repaired,
        _ => text,
    }
}

fn media(raw: Vec<RawMedia>) -> Vec<Media> {
    raw.into_iter().map(|m| Media { uri: m.uri, creation_timestamp: m.creation_timestamp }).collect()
}

impl RawMessage {
    fn into_message(self) -> Message {
        let content = self.content.map(repair_text);
        let body = if let Some(sticker) = self.sticker {
            MessageBody::Sticker {
                sticker: Media { uri: sticker.uri, creation_timestamp: sticker.creation_timestamp },
                content,
            }
        } else if !self.photos.is_empty() {
            MessageBody::Photo { photos: media(self.photos), content }
        } else if !self.gifs.is_empty() {
            MessageBody::Gif { gifs: media(self.gifs), content }
        } else if !self.videos.is_empty() {
            MessageBody::Video { videos: media(self.videos), content }
        } else if !self.audio_files.is_empty() {
            MessageBody::Audio { audio_files: media(self.audio_files), content }
        } else if !self.files.is_empty() {
            MessageBody::File { files: media(self.files), content }
        } else if let Some(share) = self.share {
            MessageBody::Share {
                share: Share { link: share.link, share_text: share.share_text.map(repair_text) },
                content,
            }
        } else if let Some(content) = content {
            MessageBody::Text { content }
        } else {
            MessageBody::Empty
        };
        let reactions = self
            .reactions
            .into_iter()
            .map(|r| Reaction { reaction: repair_text(r.reaction), actor: repair_text(r.actor) })
            .collect();
        Message { sender_name: repair_text(self.sender_name), timestamp_ms: self.timestamp_ms, body, reactions }
    }
}

/// `inbox/alice_x1` becomes `inbox_alice_x1`; anything outside the storable
/// id alphabet becomes `_` too.
pub fn conversation_id(thread_path: &str) -> String {
    thread_path
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '.') { c } else { '_' })
        .collect()
}

fn document_id(doc: &RawDocument) -> Result<String, ExportError> {
    let source = doc.thread_path.as_deref().filter(|p| !p.is_empty()).unwrap_or(doc.title.as_str());
    let id = conversation_id(source.trim_matches('/'));
    if id.is_empty() || id.chars().all(|c| c == '_' || c == '.') { Err(ExportError::MissingId) } else { Ok(id) }
}

fn newest_first_timestamp(doc: &RawDocument) -> i64 {
    doc.messages.first().map_or(i64::MIN, |m| m.timestamp_ms)
}

/// Merge the documents of one thread. Metadata comes from the document
/// holding the newest messages.
fn merge(mut docs: Vec<RawDocument>) -> Result<Conversation, ExportError> {
    docs.sort_by_key(|doc| std::cmp::Reverse(newest_first_timestamp(doc)));
    let mut docs = docs.into_iter();
    let head = docs.next().ok_or(ExportError::Empty)?;
    let id = document_id(&head)?;

    let mut messages: Vec<Message> = head.messages.into_iter().map(RawMessage::into_message).collect();
    for doc in docs {
        messages.extend(doc.messages.into_iter().map(RawMessage::into_message));
    }
    if messages.is_empty() {
        return Err(ExportError::NoMessages);
    }

    let mut conversation = Conversation {
        id,
        title: repair_text(head.title),
        participants: head.participants.into_iter().map(|p| repair_text(p.name)).collect(),
        thread_type: head.thread_type,
        is_still_participant: head.is_still_participant,
        media_root: None,
        messages,
    };
    conversation.sort_messages();
    Ok(conversation)
}

/// Decode the documents of a single thread.
pub fn parse_documents(documents: &[&str]) -> Result<Conversation, ExportError> {
    let docs = documents.iter().map(|doc| serde_json::from_str::<RawDocument>(doc)).collect::<Result<Vec<_>, _>>()?;
    merge(docs)
}

/// Directory that the export's attachment URIs are relative to.
///
/// URIs look like `messages/inbox/<thread>/photos/1.jpg` and are relative to
/// the folder that contains `messages/`. When the file sits inside that same
/// layout, the matching tail of its directory is stripped; otherwise the
/// file's own directory is used.
pub fn media_root_for(file: &Path, uri: &str) -> PathBuf {
    let dir = file.parent().unwrap_or_else(|| Path::new(""));
    let uri = Path::new(uri);
    for root in dir.ancestors().skip(1) {
        if let Ok(rel) = dir.strip_prefix(root)
            && uri.starts_with(rel)
        {
            return root.to_path_buf();
        }
    }
    dir.to_path_buf()
}

/// Read export files from disk. Files are grouped into conversations by
/// their thread, in the order each thread was first seen.
pub async fn parse_files(paths: &[PathBuf]) -> Result<Vec<Conversation>, ExportError> {
    if paths.is_empty() {
        return Err(ExportError::Empty);
    }
    let mut order: Vec<String> = Vec::new();
    let mut groups: BTreeMap<String, (PathBuf, Vec<RawDocument>)> = BTreeMap::new();
    for path in paths {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ExportError::Io { path: path.clone(), source })?;
        let doc: RawDocument = serde_json::from_str(&content)?;
        let id = document_id(&doc)?;
        if !groups.contains_key(&id) {
            order.push(id.clone());
        }
        groups.entry(id).or_insert_with(|| (path.clone(), Vec::new())).1.push(doc);
    }

    let mut conversations = Vec::with_capacity(order.len());
    for id in order {
        let Some((first_path, docs)) = groups.remove(&id) else {
            continue;
        };
        let mut conversation = merge(docs)?;
        let sample_uri = conversation.messages.iter().flat_map(Message::attachments).map(|(_, m)| m.uri.clone()).next();
        conversation.media_root = Some(match sample_uri {
            Some(uri) => media_root_for(&first_path, &uri),
            None => first_path.parent().map(Path::to_path_buf).unwrap_or_default(),
        });
        tracing::info!(
            id = %conversation.id,
            messages = conversation.messages.len(),
            files = paths.len(),
            "decoded export"
        );
        conversations.push(conversation);
    }
    Ok(conversations)
}
