//! A reading session over one stored document.

use tracing::warn;

use reader_types::{ContentStore, DocumentMeta, DocumentPatch, ReadingIndex, StoreError};

use crate::local::LocalStore;

/// Split content into pages on blank-line boundaries, discarding empty
/// fragments.
pub fn paginate(content: &str) -> Vec<String> {
    content
        .split("\n\n")
        .filter(|page| !page.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug)]
pub struct ReaderSession {
    meta: DocumentMeta,
    index: ReadingIndex,
    content: String,
    pages: Vec<String>,
    cursor: usize,
}

impl ReaderSession {
    /// Open a document: metadata and reading index from the local store,
    /// content preferring the remote store with a local fallback. A
    /// successful open stamps the document's last access time.
    pub async fn open(
        remote: &dyn ContentStore,
        local: &LocalStore,
        id: u64,
    ) -> Result<Self, StoreError> {
        local.get_meta(id).await?;
        let index = local.get_index(id).await;

        let content = match remote.get_content(id).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to load content from server, trying local copy: {}", e);
                local.get_content(id).await?
            }
        };

        let pages = paginate(&content);
        let meta = local.set_meta(id, DocumentPatch::default()).await?;

        Ok(Self {
            meta,
            index,
            content,
            pages,
            cursor: 0,
        })
    }

    pub fn meta(&self) -> &DocumentMeta {
        &self.meta
    }

    pub fn index(&self) -> &ReadingIndex {
        &self.index
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Clamp into `[0, pages.len() - 1]` before assignment.
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.pages.len().saturating_sub(1));
    }

    pub fn current_page(&self) -> Option<&str> {
        self.pages.get(self.cursor).map(String::as_str)
    }

    /// Fraction of pages read, for the listing's percent display.
    pub fn progress(&self) -> f64 {
        if self.pages.is_empty() {
            return 0.0;
        }
        (self.cursor + 1) as f64 / self.pages.len() as f64
    }

    /// Export the content for download: BOM-prefixed, CRLF line endings.
    pub fn download_text(&self) -> String {
        let unified = self.content.replace("\r\n", "\n").replace('\r', "\n");
        format!("\u{feff}{}", unified.replace('\n', "\r\n"))
    }
}
