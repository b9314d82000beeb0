//! Serialized project representation.
//!
//! The project document is the persistence boundary: a plain structural copy
//! of every page that round-trips through JSON without loss.

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{EditorError, EditorResult};
use crate::page::{PageDocument, PageId};

/// Current project document format version.
pub const FORMAT_VERSION: u32 = 1;

/// A whole project as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    /// Format version.
    #[serde(default = "ProjectDocument::default_version")]
    pub version: u32,
    /// Pages in display order.
    pub pages: Vec<PageDocument>,
    /// Page that was active when saved.
    #[serde(default)]
    pub active_page_id: Option<PageId>,
    /// Save time in milliseconds since the Unix epoch.
    #[serde(default)]
    pub saved_at: u64,
}

impl ProjectDocument {
    const fn default_version() -> u32 {
        FORMAT_VERSION
    }

    /// Build a document stamped with the current time.
    #[must_use]
    pub fn new(pages: Vec<PageDocument>, active_page_id: Option<PageId>) -> Self {
        Self {
            version: FORMAT_VERSION,
            pages,
            active_page_id,
            saved_at: current_timestamp_ms(),
        }
    }

    /// Check the invariants a loaded project must hold.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidDocument`] for an unsupported version, an
    /// empty page list, a repeated page or element ID, children on a leaf
    /// kind, or an active page ID that names no page.
    pub fn validate(&self) -> EditorResult<()> {
        if self.version > FORMAT_VERSION {
            return Err(EditorError::InvalidDocument(format!(
                "unsupported format version {}",
                self.version
            )));
        }
        if self.pages.is_empty() {
            return Err(EditorError::InvalidDocument("project has no pages".into()));
        }

        let mut page_ids = HashSet::new();
        let mut element_ids = HashSet::new();
        for page in &self.pages {
            if !page_ids.insert(page.id) {
                return Err(EditorError::InvalidDocument(format!(
                    "duplicate page id {}",
                    page.id
                )));
            }
            page.elements.validate(&mut element_ids)?;
        }

        if let Some(active) = self.active_page_id {
            if !page_ids.contains(&active) {
                return Err(EditorError::InvalidDocument(format!(
                    "active page {active} is not in the project"
                )));
            }
        }
        Ok(())
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Serialization`] if serialization fails.
    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a document.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Serialization`] for malformed JSON and
    /// [`EditorError::InvalidDocument`] if validation fails.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let document: Self = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }
}

/// Get the current Unix timestamp in milliseconds.
pub(crate) fn current_timestamp_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| {
        #[allow(clippy::cast_possible_truncation)]
        {
            d.as_millis() as u64
        }
    })
}
