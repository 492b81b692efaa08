use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::error::Error;
use std::fmt;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

#[derive(Debug, Serialize, Clone)]
pub struct ApiMessage {
    pub role: String,
    pub content: String,
}

impl ApiMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ApiMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[derive(Debug)]
pub enum GroqError {
    EnvironmentError(String),
    HttpError(reqwest::Error),
    ResponseError(String),
}

impl fmt::Display for GroqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroqError::EnvironmentError(msg) => write!(f, "Environment error: {}", msg),
            GroqError::HttpError(err) => write!(f, "HTTP error: {}", err),
            GroqError::ResponseError(msg) => write!(f, "Response error: {}", msg),
        }
    }
}

impl Error for GroqError {}

impl From<reqwest::Error> for GroqError {
    fn from(err: reqwest::Error) -> Self {
        GroqError::HttpError(err)
    }
}

/// Thin client for the Groq OpenAI-compatible chat completion API.
#[derive(Clone)]
pub struct GroqService {
    client: Client,
    api_key: String,
    model: String,
}

impl GroqService {
    pub fn new() -> Result<Self, GroqError> {
        let api_key = env::var("GROQ_API_KEY")
            .map_err(|_| GroqError::EnvironmentError("GROQ_API_KEY is not set".to_string()))?;

        let model = env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            client: Client::new(),
            api_key,
            model,
        })
    }

    /// Plain chat completion. Returns the first choice's message text.
    pub async fn chat(
        &self,
        messages: Vec<ApiMessage>,
        temperature: f32,
    ) -> Result<String, GroqError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature,
            max_tokens: None,
            response_format: None,
        };

        self.execute(request).await
    }

    /// Chat completion in strict-JSON mode, used for itinerary generation
    /// and other structured outputs.
    pub async fn chat_json(
        &self,
        messages: Vec<ApiMessage>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, GroqError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature,
            max_tokens: Some(max_tokens),
            response_format: Some(ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        };

        self.execute(request).await
    }

    async fn execute(&self, request: ChatCompletionRequest) -> Result<String, GroqError> {
        let response = self
            .client
            .post(GROQ_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // The API reports failures as {"error": {"message": ...}}
            let detail = response
                .json::<ApiErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.error)
                .map(|e| e.message)
                .unwrap_or_else(|| status.to_string());
            return Err(GroqError::ResponseError(format!(
                "Groq API Error: {}",
                detail
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GroqError::ResponseError(format!("Failed to parse response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GroqError::ResponseError("Completion contained no choices".to_string()))
    }
}
