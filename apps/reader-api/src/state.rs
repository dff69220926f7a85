//! Application state for the reader API.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use lexile_engine::{DeepSeekClient, HeuristicRewriter, LlmRewriter, MemoryCredentials, Rewriter};
use reader_store::{FileStore, StorePolicy};

pub struct AppState {
    pub store: FileStore,
    pub rewriter: Box<dyn Rewriter>,
}

impl AppState {
    pub async fn new() -> Result<Self> {
        let data_dir = std::env::var("READER_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        info!("Opening file store at {}", data_dir.display());
        let store = FileStore::open(&data_dir, StorePolicy::default()).await?;

        Ok(Self {
            store,
            rewriter: Self::select_rewriter().await,
        })
    }

    /// DeepSeek-backed rewriting when a credential resolves, the heuristic
    /// word substituter otherwise.
    async fn select_rewriter() -> Box<dyn Rewriter> {
        let client = DeepSeekClient::new(Box::<MemoryCredentials>::default());
        match client.api_key().await {
            Ok(_) => {
                info!("Using DeepSeek-backed rewriter");
                Box::new(LlmRewriter::new(client))
            }
            Err(_) => {
                info!("No rewrite credential found, using heuristic rewriter");
                Box::new(HeuristicRewriter)
            }
        }
    }
}
