//! DeepSeek chat-completion client and credential resolution.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::warn;

use reader_types::HardWord;

use crate::error::EngineError;
use crate::words::{parse_loose_lines, parse_word_list, WordListReply};

pub const API_ENDPOINT: &str = "https://api.deepseek.com/v1/chat/completions";

const API_KEY_CONFIG: &str = "deepseek_api_key";
const API_KEY_ENV: &str = "DEEPSEEK_API_KEY";

const TITLE_INPUT_LIMIT: usize = 3000;
const WORD_LIST_INPUT_LIMIT: usize = 4000;

/// External collaborator: persisted configuration values.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: &str);
}

/// In-process credential store, also used in tests.
#[derive(Default)]
pub struct MemoryCredentials {
    values: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl CredentialStore for MemoryCredentials {
    async fn get(&self, key: &str) -> Option<String> {
        self.values.lock().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
    }
}

pub struct DeepSeekClient {
    http: reqwest::Client,
    endpoint: String,
    credentials: Box<dyn CredentialStore>,
}

impl DeepSeekClient {
    pub fn new(credentials: Box<dyn CredentialStore>) -> Self {
        Self::with_endpoint(credentials, API_ENDPOINT)
    }

    pub fn with_endpoint(credentials: Box<dyn CredentialStore>, endpoint: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
            credentials,
        }
    }

    /// Resolve the API key: persisted config first, then the environment,
    /// persisting an environment hit so later calls skip the fallback.
    pub async fn api_key(&self) -> Result<String, EngineError> {
        if let Some(key) = self.credentials.get(API_KEY_CONFIG).await {
            return Ok(key);
        }
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                self.credentials.set(API_KEY_CONFIG, &key).await;
                return Ok(key);
            }
        }
        Err(EngineError::CredentialMissing)
    }

    /// One user-prompt chat completion; returns the reply text.
    pub async fn chat(&self, prompt: &str) -> Result<String, EngineError> {
        let api_key = self.api_key().await?;

        let body = json!({
            "model": "deepseek-chat",
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": 0.7,
            "max_tokens": 2000,
        });

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
                .unwrap_or_else(|| status.to_string());
            return Err(EngineError::Provider(detail));
        }

        let data: Value = response.json().await?;
        data["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| EngineError::MalformedResponse("missing message content".to_string()))
    }

    /// Short descriptive title for the content; falls back to a fixed title
    /// on any failure.
    pub async fn generate_title(&self, content: &str) -> String {
        let prompt = format!(
            "Generate a concise and descriptive title for the following text. \
             The title should be no more than 5-7 words and capture the main \
             topic or theme of the content:\n\n{}",
            truncate_chars(content, TITLE_INPUT_LIMIT)
        );

        match self.chat(&prompt).await {
            Ok(title) => strip_wrapping_quotes(title.trim()).trim().to_string(),
            Err(e) => {
                warn!("Error generating title: {}", e);
                "Untitled Document".to_string()
            }
        }
    }

    /// 5-10 challenging words with level-appropriate definitions. Provider
    /// output is untrusted; parsing failures yield an empty list.
    pub async fn extract_hard_words(&self, content: &str, target_level: i32) -> Vec<HardWord> {
        let prompt = format!(
            "Analyze the following text and identify 5-10 words that would be \
             challenging for a reader at Lexile level {}.\n\
             For each word, provide a simple definition that would be \
             understandable at this reading level.\n\
             Format the response as a JSON array with objects containing \
             'word' and 'definition' properties.\n\
             Example format: [{{\"word\": \"example\", \"definition\": \"a simple explanation\"}}]\n\n\
             Text to analyze:\n{}",
            target_level,
            truncate_chars(content, WORD_LIST_INPUT_LIMIT)
        );

        match self.chat(&prompt).await {
            Ok(reply) => match parse_word_list(&reply) {
                WordListReply::Structured(words) => words,
                WordListReply::Unparsable(text) => parse_loose_lines(&text),
            },
            Err(e) => {
                warn!("Error generating hard word list: {}", e);
                Vec::new()
            }
        }
    }
}

fn truncate_chars(content: &str, limit: usize) -> String {
    if content.chars().count() <= limit {
        return content.to_string();
    }
    let mut truncated: String = content.chars().take(limit).collect();
    truncated.push_str("...");
    truncated
}

fn strip_wrapping_quotes(text: &str) -> &str {
    text.trim_start_matches(['"', '\''])
        .trim_end_matches(['"', '\''])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
        assert_eq!(truncate_chars("ééééé", 2), "éé...");
    }

    #[test]
    fn test_strip_wrapping_quotes() {
        assert_eq!(strip_wrapping_quotes("\"A Title\""), "A Title");
        assert_eq!(strip_wrapping_quotes("'Single'"), "Single");
        assert_eq!(strip_wrapping_quotes("No quotes"), "No quotes");
    }

    #[tokio::test]
    async fn test_api_key_missing_everywhere() {
        std::env::remove_var(API_KEY_ENV);
        let client = DeepSeekClient::new(Box::<MemoryCredentials>::default());
        assert!(matches!(
            client.api_key().await.unwrap_err(),
            EngineError::CredentialMissing
        ));
    }

    #[tokio::test]
    async fn test_api_key_prefers_persisted_config() {
        let credentials = MemoryCredentials::default();
        credentials.set(API_KEY_CONFIG, "persisted-key").await;
        let client = DeepSeekClient::new(Box::new(credentials));
        assert_eq!(client.api_key().await.unwrap(), "persisted-key");
    }
}
