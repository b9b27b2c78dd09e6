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

use super::{ConversationStore, StoreError, validate_id};
use crate::thread::Conversation;
use std::path::{Path, PathBuf};

const CONVERSATIONS_DIR: &str = "conversations";

/// One JSON document per conversation under `<data_dir>/conversations`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: &Path) -> Self {
        Self { root: data_dir.join(CONVERSATIONS_DIR) }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, StoreError> {
        validate_id(id)?;
        Ok(self.root.join(format!("{id}.json")))
    }
}

#[async_trait::async_trait(?Send)]
impl ConversationStore for FileStore {
    async fn get_conversation(&self, id: &str) -> Result<Option<Conversation>, StoreError> {
        let path = self.path_for(id)?;
        let content = match tokio::fs::read(&path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_slice(&content)?))
    }

    async fn conversation_ids(&self) -> Result<Vec<String>, StoreError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && validate_id(stem).is_ok()
            {
                ids.push(stem.to_owned());
            }
        }
        ids.sort();
        Ok(ids)
    }

    async fn add_conversation(&self, conversation: Conversation) -> Result<(), StoreError> {
        let path = self.path_for(&conversation.id)?;
        tokio::fs::create_dir_all(&self.root).await?;
        let content = serde_json::to_vec(&conversation)?;
        // Write-then-rename so a crash never leaves a truncated document.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, &path).await?;
        tracing::debug!(id = %conversation.id, messages = conversation.messages.len(), "stored conversation");
        Ok(())
    }

    async fn remove_conversation(&self, id: &str) -> Result<(), StoreError> {
        let path = self.path_for(id)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thread::{Media, Message, MessageBody, Reaction, Share};
    use pretty_assertions::assert_eq;

    fn sample(id: &str) -> Conversation {
        Conversation {
            id: id.to_owned(),
            title: "Trip".into(),
            participants: vec!["Ann".into(), "Bo".into()],
            thread_type: Some("RegularGroup".into()),
            is_still_participant: Some(true),
            media_root: None,
            messages: vec![
                Message::new(
                    "Ann",
                    30,
                    MessageBody::Share {
                        share: Share { link: Some("https://example.com".into()), share_text: None },
                        content: Some("see".into()),
                    },
                ),
                Message::new(
                    "Bo",
                    20,
                    MessageBody::Video {
                        videos: vec![Media { uri: "v.mp4".into(), creation_timestamp: Some(7) }],
                        content: None,
                    },
                ),
                Message::text("Ann", 10, "hi").with_reactions(vec![Reaction { reaction: "+1".into(), actor: "Bo".into() }]),
            ],
        }
    }

    #[tokio::test]
    async fn round_trips_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.add_conversation(sample("trip_1")).await.unwrap();
        assert_eq!(store.get_conversation("trip_1").await.unwrap(), Some(sample("trip_1")));
    }

    #[tokio::test]
    async fn lists_sorted_ids_and_ignores_strays() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.conversation_ids().await.unwrap().is_empty());
        store.add_conversation(sample("b")).await.unwrap();
        store.add_conversation(sample("a")).await.unwrap();
        std::fs::write(store.root().join("notes.txt"), "x").unwrap();
        assert_eq!(store.conversation_ids().await.unwrap(), vec!["a".to_owned(), "b".to_owned()]);
    }

    #[tokio::test]
    async fn upsert_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.add_conversation(sample("c")).await.unwrap();
        let mut changed = sample("c");
        changed.title = "Renamed".into();
        store.add_conversation(changed).await.unwrap();
        assert_eq!(store.get_conversation("c").await.unwrap().map(|c| c.title), Some("Renamed".into()));
        store.remove_conversation("c").await.unwrap();
        store.remove_conversation("c").await.unwrap();
        assert_eq!(store.get_conversation("c").await.unwrap(), None);
    }

    #[tokio::test]
    async fn rejects_path_like_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(store.get_conversation("../x").await, Err(StoreError::InvalidId(_))));
    }
}
