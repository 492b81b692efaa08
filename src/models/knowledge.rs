use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A passage in the destination knowledge base, stored alongside its
/// embedding for similarity lookup at generation time.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct KnowledgeDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub content: String,
    pub embedding: Vec<f32>,
    pub metadata: KnowledgeMetadata,
    pub verification_level: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct KnowledgeMetadata {
    pub source: String,
    pub url: String,
    pub city: String,
    pub title: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SeedRequest {
    pub city: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SeedResponse {
    pub success: bool,
    pub city: String,
    pub content_length: usize,
}
