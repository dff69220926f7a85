//! The rewrite contract and the LLM-backed chunked implementation.

use async_trait::async_trait;
use tracing::warn;

use reader_types::RewriteOutcome;

use crate::chunk::split_into_chunks;
use crate::error::EngineError;
use crate::level::{estimate_level, Complexity};
use crate::provider::DeepSeekClient;

/// Rewrite a passage to a target complexity level. Implemented by the
/// heuristic substituter, the LLM rewriter, and the client-side remote
/// store (which delegates to the server endpoint).
#[async_trait]
pub trait Rewriter: Send + Sync {
    async fn rewrite(
        &self,
        passage: &str,
        target_level: i32,
    ) -> Result<RewriteOutcome, EngineError>;
}

/// One rewrite call over a bounded chunk.
#[async_trait]
pub(crate) trait ChunkRephraser: Sync {
    async fn rephrase_chunk(
        &self,
        chunk: &str,
        complexity: Complexity,
        target_level: i32,
    ) -> Result<String, EngineError>;
}

/// Rewrite every chunk sequentially, in document order. A failed chunk
/// keeps its original text instead of failing the whole passage.
pub(crate) async fn rephrase_passage<R: ChunkRephraser>(
    rephraser: &R,
    passage: &str,
    target_level: i32,
) -> String {
    let complexity = Complexity::for_level(target_level);
    let chunks = split_into_chunks(passage);
    let mut rewritten = Vec::with_capacity(chunks.len());
    for chunk in &chunks {
        match rephraser
            .rephrase_chunk(chunk, complexity, target_level)
            .await
        {
            Ok(text) => rewritten.push(text),
            Err(e) => {
                warn!("Chunk rewrite failed, keeping original text: {}", e);
                rewritten.push(chunk.clone());
            }
        }
    }
    rewritten.join("\n\n")
}

/// DeepSeek-backed rewriter.
pub struct LlmRewriter {
    client: DeepSeekClient,
}

impl LlmRewriter {
    pub fn new(client: DeepSeekClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &DeepSeekClient {
        &self.client
    }
}

#[async_trait]
impl ChunkRephraser for LlmRewriter {
    async fn rephrase_chunk(
        &self,
        chunk: &str,
        complexity: Complexity,
        target_level: i32,
    ) -> Result<String, EngineError> {
        let prompt = format!(
            "Rephrase the following text to match a Lexile level of approximately {}.\n\
             Use {} vocabulary and sentence structures appropriate for this reading level.\n\
             Maintain the original meaning and key information, but adjust the complexity of language.\n\
             Do not add explanatory notes or change the content's message.\n\
             Only return the rephrased text without any additional comments:\n\n{}",
            target_level, complexity, chunk
        );
        self.client.chat(&prompt).await
    }
}

#[async_trait]
impl Rewriter for LlmRewriter {
    async fn rewrite(
        &self,
        passage: &str,
        target_level: i32,
    ) -> Result<RewriteOutcome, EngineError> {
        // A missing credential fails the whole passage up front instead of
        // silently keeping every chunk.
        self.client.api_key().await?;

        let adjusted_passage = rephrase_passage(self, passage, target_level).await;
        Ok(RewriteOutcome {
            original_level: estimate_level(passage),
            adjusted_level: target_level,
            adjusted_passage,
        })
    }
}
