use async_trait::async_trait;
use chatio_core::{EMBEDDING_DIMENSION, Embedding, env_non_empty, env_parse_with_default};
use serde::{Deserialize, Serialize};

use crate::error::EmbeddingError;
use crate::provider::EmbeddingProvider;

/// Default OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
/// Default embedding model.
pub const DEFAULT_MODEL: &str = "text-embedding-3-small";

const MAX_RETRIES: usize = 3;
const RETRY_DELAYS_MS: [u64; 4] = [0, 250, 500, 1000];

/// Connection settings for [`HttpEmbeddingClient`].
#[derive(Clone, PartialEq, Eq)]
pub struct EmbeddingConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub dimensions: usize,
}

impl std::fmt::Debug for EmbeddingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("dimensions", &self.dimensions)
            .finish()
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            model: DEFAULT_MODEL.to_owned(),
            dimensions: EMBEDDING_DIMENSION,
        }
    }
}

impl EmbeddingConfig {
    /// Reads `CHATIO_EMBEDDING_URL`, `CHATIO_EMBEDDING_API_KEY`,
    /// `CHATIO_EMBEDDING_MODEL` and `CHATIO_EMBEDDING_DIMENSIONS`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env_non_empty("CHATIO_EMBEDDING_URL").unwrap_or(defaults.base_url),
            api_key: env_non_empty("CHATIO_EMBEDDING_API_KEY"),
            model: env_non_empty("CHATIO_EMBEDDING_MODEL").unwrap_or(defaults.model),
            dimensions: env_parse_with_default("CHATIO_EMBEDDING_DIMENSIONS", defaults.dimensions),
        }
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
    dimensions: usize,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f64>,
}

/// Embedding client for `POST {base_url}/v1/embeddings`.
pub struct HttpEmbeddingClient {
    client: reqwest::Client,
    config: EmbeddingConfig,
}

impl std::fmt::Debug for HttpEmbeddingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpEmbeddingClient").field("config", &self.config).finish()
    }
}

impl HttpEmbeddingClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(mut config: EmbeddingConfig) -> Result<Self, EmbeddingError> {
        config.base_url = config.base_url.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| EmbeddingError::ClientInit(e.to_string()))?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    async fn request_once(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let request = EmbeddingRequest {
            model: &self.config.model,
            input: text,
            dimensions: self.config.dimensions,
        };
        let mut builder =
            self.client.post(format!("{}/v1/embeddings", self.config.base_url)).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
            return Err(EmbeddingError::HttpStatus { code: status.as_u16(), body });
        }

        let body = response.text().await?;
        let parsed: EmbeddingResponse =
            serde_json::from_str(&body).map_err(|source| EmbeddingError::JsonParse {
                context: "embedding response".to_owned(),
                source,
            })?;
        let embedding =
            parsed.data.into_iter().next().map(|d| d.embedding).ok_or(EmbeddingError::EmptyResult)?;
        self.validate(embedding)
    }

    fn validate(&self, embedding: Embedding) -> Result<Embedding, EmbeddingError> {
        if embedding.is_empty() {
            return Err(EmbeddingError::EmptyResult);
        }
        if embedding.len() != self.config.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.config.dimensions,
                actual: embedding.len(),
            });
        }
        if let Some(index) = embedding.iter().position(|v| !v.is_finite()) {
            return Err(EmbeddingError::NonFinite(index));
        }
        Ok(embedding)
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }

        let mut last_error: Option<EmbeddingError> = None;
        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let delay_ms = RETRY_DELAYS_MS.get(attempt).copied().unwrap_or(1000);
                let delay = std::time::Duration::from_millis(delay_ms);
                tokio::time::sleep(delay).await;
                tracing::warn!(attempt, max = MAX_RETRIES, ?delay, "embedding retry");
            }

            match self.request_once(text).await {
                Ok(embedding) => {
                    tracing::debug!(dimensions = embedding.len(), "generated embedding");
                    return Ok(embedding);
                },
                Err(err) if err.is_transient() => last_error = Some(err),
                Err(err) => return Err(err),
            }
        }

        Err(EmbeddingError::RetriesExhausted(Box::new(
            last_error.unwrap_or(EmbeddingError::EmptyResult),
        )))
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }
}
