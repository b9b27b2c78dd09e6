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

use crate::thread::{ChronoIndex, MessageWindow};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Attachments are cached per position: the same URI at two positions is two
/// entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaKey {
    pub index: ChronoIndex,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaState {
    Pending,
    Ready { bytes: u64 },
    Broken { reason: String },
}

#[derive(Debug, Default)]
pub struct MediaCache {
    entries: HashMap<MediaKey, MediaState>,
}

impl MediaCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: ChronoIndex, uri: &str) -> Option<&MediaState> {
        self.entries.get(&MediaKey { index, uri: uri.to_owned() })
    }

    /// Keys in the prefetch range around the window that still need
    /// preparing. They are marked pending so they are requested once; entries
    /// that fell out of range are dropped.
    pub fn prepopulate_requests(&mut self, window: &MessageWindow) -> Vec<MediaKey> {
        if window.is_empty() {
            self.entries.clear();
            return Vec::new();
        }
        let radius = window.policy().prefetch_radius;
        let low = window.oldest_realized().saturating_sub(radius);
        let high = window.newest_realized().saturating_add(radius);
        let (first, messages) = window.slice_between(low, high);
        let last = first.saturating_add(messages.len().saturating_sub(1));

        self.entries.retain(|key, _| key.index >= first && key.index <= last);

        let mut requests = Vec::new();
        for (offset, message) in messages.iter().enumerate() {
            let index = first.saturating_add(offset);
            for (_, media) in message.attachments() {
                let key = MediaKey { index, uri: media.uri.clone() };
                if !self.entries.contains_key(&key) {
                    self.entries.insert(key.clone(), MediaState::Pending);
                    requests.push(key);
                }
            }
        }
        requests
    }

    pub fn apply(&mut self, results: Vec<(MediaKey, MediaState)>) {
        for (key, state) in results {
            // Results for keys evicted in the meantime are stale.
            if let Some(slot) = self.entries.get_mut(&key) {
                *slot = state;
            }
        }
    }
}

fn resolve(root: Option<&Path>, uri: &str) -> Option<PathBuf> {
    if uri.contains("://") {
        return None;
    }
    Some(root.map_or_else(|| PathBuf::from(uri), |root| root.join(uri)))
}

/// Look each request up on disk. Individual failures become
/// [`MediaState::Broken`]; the batch as a whole never fails.
pub async fn prepare_media(root: Option<PathBuf>, requests: Vec<MediaKey>) -> Vec<(MediaKey, MediaState)> {
    let mut results = Vec::with_capacity(requests.len());
    for key in requests {
        let state = match resolve(root.as_deref(), &key.uri) {
            None => MediaState::Broken { reason: "remote media is not fetched".to_owned() },
            Some(path) => match tokio::fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => MediaState::Ready { bytes: meta.len() },
                Ok(_) => MediaState::Broken { reason: "not a file".to_owned() },
                Err(err) => {
                    tracing::debug!(path = %path.display(), "media unavailable: {err}");
                    MediaState::Broken { reason: err.to_string() }
                }
            },
        };
        results.push((key, state));
    }
    results
}
