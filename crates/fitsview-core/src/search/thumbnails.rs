use std::collections::{HashMap, HashSet};

use tracing::debug;

/// Thumbnail fetches per result card. Each card is requested once. A failed
/// fetch falls back to the placeholder image; when that fails too the card is
/// given up until [`clear`](Self::clear).
#[derive(Debug, Default)]
pub struct ThumbnailRequests {
    placeholder: String,
    /// URL of the fetch in flight or done, by file id.
    requested: HashMap<String, String>,
    failed: HashSet<String>,
}

impl ThumbnailRequests {
    pub fn new(placeholder: &str) -> Self {
        Self {
            placeholder: placeholder.trim().to_string(),
            ..Self::default()
        }
    }

    /// True once `file_id` has been requested or given up.
    pub fn contains(&self, file_id: &str) -> bool {
        self.requested.contains_key(file_id) || self.failed.contains(file_id)
    }

    pub fn has_failed(&self, file_id: &str) -> bool {
        self.failed.contains(file_id)
    }

    /// Mark `url` as requested for `file_id`. Returns the URL to fetch, or
    /// `None` when there is nothing to do.
    pub fn request(&mut self, file_id: &str, url: &str) -> Option<String> {
        let url = url.trim();
        if url.is_empty() || self.contains(file_id) {
            return None;
        }
        self.requested.insert(file_id.to_string(), url.to_string());
        Some(url.to_string())
    }

    /// Record a failed fetch. Returns the fallback URL to fetch next, if any.
    pub fn fail(&mut self, file_id: &str) -> Option<String> {
        let use_placeholder = match self.requested.get(file_id) {
            None => return None,
            Some(url) => !self.placeholder.is_empty() && *url != self.placeholder,
        };
        if use_placeholder {
            debug!(file_id, "thumbnail failed, using placeholder");
            self.requested.insert(file_id.to_string(), self.placeholder.clone());
            return Some(self.placeholder.clone());
        }
        debug!(file_id, "thumbnail given up");
        self.requested.remove(file_id);
        self.failed.insert(file_id.to_string());
        None
    }

    pub fn clear(&mut self) {
        self.requested.clear();
        self.failed.clear();
    }
}
