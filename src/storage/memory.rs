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

use super::{ConversationStore, StoreError};
use crate::thread::Conversation;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// In-process store. Can be switched to fail every call, which is how the
/// viewer's handling of a broken store is exercised.
#[derive(Debug, Default)]
pub struct MemoryStore {
    conversations: RefCell<BTreeMap<String, Conversation>>,
    unavailable: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conversations(conversations: impl IntoIterator<Item = Conversation>) -> Self {
        let store = Self::new();
        store.conversations.borrow_mut().extend(conversations.into_iter().map(|c| (c.id.clone(), c)));
        store
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable.get() { Err(StoreError::Unavailable) } else { Ok(()) }
    }
}

#[async_trait::async_trait(?Send)]
impl ConversationStore for MemoryStore {
    async fn get_conversation(&self, id: &str) -> Result<Option<Conversation>, StoreError> {
        self.check()?;
        Ok(self.conversations.borrow().get(id).cloned())
    }

    async fn conversation_ids(&self) -> Result<Vec<String>, StoreError> {
        self.check()?;
        Ok(self.conversations.borrow().keys().cloned().collect())
    }

    async fn add_conversation(&self, conversation: Conversation) -> Result<(), StoreError> {
        self.check()?;
        self.conversations.borrow_mut().insert(conversation.id.clone(), conversation);
        Ok(())
    }

    async fn remove_conversation(&self, id: &str) -> Result<(), StoreError> {
        self.check()?;
        self.conversations.borrow_mut().remove(id);
        Ok(())
    }
}
