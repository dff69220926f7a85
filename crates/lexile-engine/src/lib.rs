//! Reading-complexity rewrite engine.
//!
//! Two rewriters satisfy the same contract:
//! - `HeuristicRewriter`: fixed complex-to-simple word substitution
//! - `LlmRewriter`: chunked rewriting through the DeepSeek chat API
//!
//! Companion operations generate a short document title and extract a list
//! of challenging words with level-appropriate definitions.

pub mod chunk;
pub mod error;
pub mod heuristic;
pub mod level;
pub mod provider;
pub mod rewrite;
pub mod words;

pub use error::EngineError;
pub use heuristic::HeuristicRewriter;
pub use level::{estimate_level, Complexity};
pub use provider::{CredentialStore, DeepSeekClient, MemoryCredentials};
pub use rewrite::{LlmRewriter, Rewriter};
pub use words::WordListReply;
