//! File ingestion pipeline: read, detect the rewrite directive, optionally
//! adjust complexity, normalize, persist, refresh the listing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info};

use lexile_engine::Rewriter;
use reader_types::{text, ContentStore, DocumentMeta, NewDocument};

use crate::local::LocalStore;

const DIRECTIVE_MARKER: &str = "LEXILE_ADJUST:";
const PASSAGE_MARKER: &str = "PASSAGE:";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Could not read file: {0}")]
    Read(String),

    #[error("Invalid Lexile adjustment format")]
    MalformedDirective,

    #[error("Failed to adjust Lexile level: {0}")]
    Rewrite(String),

    #[error("Failed to save file to server: {0}")]
    Persist(String),
}

impl ImportError {
    pub fn reason(&self) -> &'static str {
        match self {
            ImportError::Read(_) => "read",
            ImportError::MalformedDirective => "malformed-directive",
            ImportError::Rewrite(_) => "rewrite-failed",
            ImportError::Persist(_) => "persist-failed",
        }
    }
}

/// In-band rewrite request found in an imported file.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub target_level: i32,
    pub passage: String,
}

/// Scan for a `LEXILE_ADJUST:<level>` line followed by a `PASSAGE:` line;
/// the passage is everything after, to end of input. A present marker with
/// an unparsable level or a blank passage is malformed.
pub fn detect_directive(content: &str) -> Result<Option<Directive>, ImportError> {
    if !content.contains(DIRECTIVE_MARKER) {
        return Ok(None);
    }

    let mut target_level = None;
    let mut passage = String::new();
    let mut in_passage = false;
    for line in content.lines() {
        if let Some(rest) = line.strip_prefix(DIRECTIVE_MARKER) {
            let level = rest
                .trim()
                .parse::<i32>()
                .map_err(|_| ImportError::MalformedDirective)?;
            target_level = Some(level);
        } else if line.starts_with(PASSAGE_MARKER) {
            in_passage = true;
        } else if in_passage {
            passage.push_str(line);
            passage.push('\n');
        }
    }

    let target_level = target_level.ok_or(ImportError::MalformedDirective)?;
    let passage = passage.trim();
    if passage.is_empty() {
        return Err(ImportError::MalformedDirective);
    }
    Ok(Some(Directive {
        target_level,
        passage: passage.to_string(),
    }))
}

/// External collaborator: the visible file listing.
pub trait ListingView: Send + Sync {
    fn clear_filter(&self);
    fn render(&self, documents: Vec<DocumentMeta>);
    fn notify_import_failed(&self, error: &ImportError);
    fn scroll_to_latest(&self);
}

/// One importer per client. Overlapping imports run independently; the
/// listing refresh token makes the refreshes last-writer-wins by issuance
/// order.
pub struct Importer<S, R, V> {
    remote: S,
    local: Arc<LocalStore>,
    rewriter: R,
    view: V,
    refresh_token: AtomicU64,
}

impl<S, R, V> Importer<S, R, V>
where
    S: ContentStore,
    R: Rewriter,
    V: ListingView,
{
    pub fn new(remote: S, local: Arc<LocalStore>, rewriter: R, view: V) -> Self {
        Self {
            remote,
            local,
            rewriter,
            view,
            refresh_token: AtomicU64::new(0),
        }
    }

    /// Import one file. Failures surface through the listing view; the
    /// listing is refreshed in every case so it can never be left stale.
    pub async fn import(&self, filename: &str, raw: &[u8]) -> Option<DocumentMeta> {
        let imported = match self.run_pipeline(filename, raw).await {
            Ok(meta) => {
                info!("Imported \"{}\" as file {}", meta.title, meta.id);
                Some(meta)
            }
            Err(e) => {
                error!("Import error ({}): {}", e.reason(), e);
                self.view.notify_import_failed(&e);
                None
            }
        };
        self.finalize().await;
        imported
    }

    async fn run_pipeline(&self, filename: &str, raw: &[u8]) -> Result<DocumentMeta, ImportError> {
        let content =
            std::str::from_utf8(raw).map_err(|e| ImportError::Read(e.to_string()))?;

        let (title, body) = match detect_directive(content)? {
            Some(directive) => {
                let outcome = self
                    .rewriter
                    .rewrite(&directive.passage, directive.target_level)
                    .await
                    .map_err(|e| ImportError::Rewrite(e.to_string()))?;
                let title = format!(
                    "{} (Lexile {}L)",
                    text::parse_filename(filename),
                    outcome.adjusted_level
                );
                (title, outcome.adjusted_passage)
            }
            None => (text::parse_filename(filename), content.to_string()),
        };

        let title = text::preprocess(&title);
        let body = text::preprocess(&body);
        let now = Utc::now();
        let meta = self
            .remote
            .create(NewDocument {
                title,
                content: body.clone(),
                create_time: Some(now),
                last_access_time: Some(now),
                length: Some(body.chars().count()),
            })
            .await
            .map_err(|e| ImportError::Persist(e.to_string()))?;

        // Canonical body stays server-side; the local mirror keeps metadata
        // only.
        let mut mirrored = meta.clone();
        mirrored.server_stored = true;
        self.local.add(mirrored, "").await;

        Ok(meta)
    }

    async fn finalize(&self) {
        let token = self.refresh_token.fetch_add(1, Ordering::SeqCst) + 1;
        self.view.clear_filter();
        let documents = self.local.list().await.unwrap_or_default();
        // A newer refresh was issued while this one gathered its snapshot.
        if self.refresh_token.load(Ordering::SeqCst) != token {
            return;
        }
        self.view.render(documents);
        self.view.scroll_to_latest();
    }
}
