use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("DeepSeek API key not found. Set DEEPSEEK_API_KEY or persist deepseek_api_key.")]
    CredentialMissing,

    #[error("Rewrite provider error: {0}")]
    Provider(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
