use std::collections::HashMap;

use tracing::debug;

use crate::api::{FitsBackend, FrameItem};
use crate::error::Result;

/// Frame lists keyed by file id. Each list is fetched once; failed fetches are
/// not remembered, so the next expand retries.
#[derive(Debug, Default)]
pub struct FrameCache {
    entries: HashMap<String, Vec<FrameItem>>,
}

impl FrameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file_id: &str) -> Option<&[FrameItem]> {
        self.entries.get(file_id).map(Vec::as_slice)
    }

    pub fn contains(&self, file_id: &str) -> bool {
        self.entries.contains_key(file_id)
    }

    /// Store a list fetched elsewhere (e.g. on a worker thread). Frames are
    /// kept in index order.
    pub fn insert(&mut self, file_id: &str, mut items: Vec<FrameItem>) {
        items.sort_by_key(|f| f.index);
        self.entries.insert(file_id.to_string(), items);
    }

    pub fn get_or_fetch<B: FitsBackend>(&mut self, backend: &B, file_id: &str) -> Result<&[FrameItem]> {
        if !self.entries.contains_key(file_id) {
            debug!(file_id, "fetching frame list");
            let response = backend.frames(file_id)?;
            self.insert(file_id, response.items);
        }
        Ok(self.get(file_id).unwrap_or(&[]))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
