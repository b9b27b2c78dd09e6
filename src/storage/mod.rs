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

//! Where imported conversations and scroll positions live between runs.

pub mod file_store;
pub mod memory;
pub mod scroll_state;

pub use file_store::FileStore;
pub use memory::MemoryStore;
pub use scroll_state::ScrollStateStore;

use crate::thread::Conversation;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid conversation id `{0}`")]
    InvalidId(String),
    #[error("conversation store unavailable")]
    Unavailable,
}

/// Async access to stored conversations, driven from the local task set.
#[async_trait::async_trait(?Send)]
pub trait ConversationStore {
    async fn get_conversation(&self, id: &str) -> Result<Option<Conversation>, StoreError>;

    /// Ids in a stable order.
    async fn conversation_ids(&self) -> Result<Vec<String>, StoreError>;

    /// Insert or replace by id.
    async fn add_conversation(&self, conversation: Conversation) -> Result<(), StoreError>;

    /// Removing an unknown id is not an error.
    async fn remove_conversation(&self, id: &str) -> Result<(), StoreError>;
}

/// Ids become file names, so only a conservative alphabet is accepted.
pub fn validate_id(id: &str) -> Result<(), StoreError> {
    let valid = !id.is_empty()
        && id.len() <= 200
        && id != "."
        && id != ".."
        && id.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid { Ok(()) } else { Err(StoreError::InvalidId(id.to_owned())) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_validation() {
        assert!(validate_id("inbox_alice_ab12CD").is_ok());
        assert!(validate_id("a-b.c").is_ok());
        assert!(validate_id("").is_err());
        assert!(validate_id("..").is_err());
        assert!(validate_id("a/b").is_err());
        assert!(validate_id("a b").is_err());
    }
}
