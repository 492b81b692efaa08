use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::error::Error;
use std::fmt;

const EMBED_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/embedding-001:embedContent";
const EMBED_MODEL: &str = "models/embedding-001";

#[derive(Debug, Serialize)]
struct EmbedContentRequest {
    model: String,
    content: EmbedContent,
}

#[derive(Debug, Serialize)]
struct EmbedContent {
    parts: Vec<EmbedPart>,
}

#[derive(Debug, Serialize)]
struct EmbedPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: EmbeddingValues,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

#[derive(Debug)]
pub enum EmbeddingError {
    EnvironmentError(String),
    HttpError(reqwest::Error),
    ResponseError(String),
}

impl fmt::Display for EmbeddingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingError::EnvironmentError(msg) => write!(f, "Environment error: {}", msg),
            EmbeddingError::HttpError(err) => write!(f, "HTTP error: {}", err),
            EmbeddingError::ResponseError(msg) => write!(f, "Response error: {}", msg),
        }
    }
}

impl Error for EmbeddingError {}

impl From<reqwest::Error> for EmbeddingError {
    fn from(err: reqwest::Error) -> Self {
        EmbeddingError::HttpError(err)
    }
}

/// Client for the Gemini `embedding-001` text embedding endpoint. Returns
/// 768-dimensional vectors.
#[derive(Clone)]
pub struct EmbeddingService {
    client: Client,
    api_key: String,
}

impl EmbeddingService {
    pub fn new() -> Result<Self, EmbeddingError> {
        let api_key = env::var("GEMINI_API_KEY").map_err(|_| {
            EmbeddingError::EnvironmentError("GEMINI_API_KEY is not set".to_string())
        })?;

        Ok(Self {
            client: Client::new(),
            api_key,
        })
    }

    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let request = EmbedContentRequest {
            model: EMBED_MODEL.to_string(),
            content: EmbedContent {
                parts: vec![EmbedPart {
                    text: text.to_string(),
                }],
            },
        };

        let url = format!("{}?key={}", EMBED_API_URL, self.api_key);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(EmbeddingError::ResponseError(format!(
                "Embedding request failed with status {}: {}",
                status, error_text
            )));
        }

        let embed_response: EmbedContentResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::ResponseError(format!("Failed to parse response: {}", e)))?;

        if embed_response.embedding.values.is_empty() {
            return Err(EmbeddingError::ResponseError(
                "Embedding response contained no values".to_string(),
            ));
        }

        Ok(embed_response.embedding.values)
    }
}
