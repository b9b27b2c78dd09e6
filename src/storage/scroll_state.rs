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

use super::StoreError;
use crate::thread::WindowState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const SCROLL_STATE_FILE: &str = "scroll-state.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct ScrollStateFile {
    #[serde(default)]
    current: Option<String>,
    #[serde(default)]
    windows: HashMap<String, String>,
}

/// Last window per conversation plus the conversation that was on screen.
/// Changes stay in memory until [`ScrollStateStore::flush`].
#[derive(Debug, Clone)]
pub struct ScrollStateStore {
    path: PathBuf,
    data: ScrollStateFile,
    dirty: bool,
}

impl ScrollStateStore {
    pub fn empty(path: PathBuf) -> Self {
        Self { path, data: ScrollStateFile::default(), dirty: false }
    }

    /// A missing file is an empty store; so is an unreadable one, after a
    /// warning.
    pub async fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(SCROLL_STATE_FILE);
        let data = match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), "ignoring malformed scroll state: {err}");
                ScrollStateFile::default()
            }),
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), "cannot read scroll state: {err}");
                }
                ScrollStateFile::default()
            }
        };
        Self { path, data, dirty: false }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn get(&self, id: &str) -> Option<WindowState> {
        let raw = self.data.windows.get(id)?;
        match raw.parse() {
            Ok(state) => Some(state),
            Err(err) => {
                tracing::warn!(id, raw = raw.as_str(), "discarding stored window: {err}");
                None
            }
        }
    }

    pub fn set(&mut self, id: &str, state: WindowState) {
        let encoded = state.to_string();
        if self.data.windows.get(id) != Some(&encoded) {
            self.data.windows.insert(id.to_owned(), encoded);
            self.dirty = true;
        }
    }

    pub fn remove(&mut self, id: &str) {
        if self.data.windows.remove(id).is_some() {
            self.dirty = true;
        }
        if self.data.current.as_deref() == Some(id) {
            self.data.current = None;
            self.dirty = true;
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.data.current.as_deref()
    }

    pub fn set_current(&mut self, id: Option<&str>) {
        if self.data.current.as_deref() != id {
            self.data.current = id.map(str::to_owned);
            self.dirty = true;
        }
    }

    pub async fn flush(&mut self) -> Result<(), StoreError> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_vec_pretty(&self.data)?;
        tokio::fs::write(&self.path, content).await?;
        self.dirty = false;
        tracing::debug!(path = %self.path.display(), windows = self.data.windows.len(), "flushed scroll state");
        Ok(())
    }
}
