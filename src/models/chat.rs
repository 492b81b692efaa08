use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatResponse {
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GemsRequest {
    pub destination: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct HiddenGem {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GemsResponse {
    pub gems: Vec<HiddenGem>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TranslationResponse {
    pub translation: String,
}
