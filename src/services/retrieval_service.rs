use crate::models::knowledge::KnowledgeDocument;
use crate::services::embedding_service::{EmbeddingError, EmbeddingService};
use futures::TryStreamExt;
use mongodb::{Client, Collection};
use rayon::prelude::*;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

const DEFAULT_MATCH_THRESHOLD: f32 = 0.5;
const DEFAULT_MATCH_COUNT: usize = 3;

#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// Minimum cosine similarity for a passage to count as relevant
    pub match_threshold: f32,
    /// Maximum number of passages returned
    pub match_count: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            match_count: DEFAULT_MATCH_COUNT,
        }
    }
}

impl RetrievalConfig {
    /// Create config from environment variables or use defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            match_threshold: std::env::var("RAG_MATCH_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.match_threshold),
            match_count: std::env::var("RAG_MATCH_COUNT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.match_count),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPassage {
    pub content: String,
    pub score: f32,
}

#[derive(Debug)]
pub enum RetrievalError {
    Embedding(EmbeddingError),
    Database(mongodb::error::Error),
}

impl fmt::Display for RetrievalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetrievalError::Embedding(err) => write!(f, "Embedding error: {}", err),
            RetrievalError::Database(err) => write!(f, "Database error: {}", err),
        }
    }
}

impl Error for RetrievalError {}

impl From<EmbeddingError> for RetrievalError {
    fn from(err: EmbeddingError) -> Self {
        RetrievalError::Embedding(err)
    }
}

impl From<mongodb::error::Error> for RetrievalError {
    fn from(err: mongodb::error::Error) -> Self {
        RetrievalError::Database(err)
    }
}

/// Similarity lookup over the knowledge base: embed the query, rank stored
/// passages by cosine similarity, keep the best matches.
pub struct RetrievalService {
    client: Arc<Client>,
    embeddings: EmbeddingService,
    config: RetrievalConfig,
}

impl RetrievalService {
    pub fn new(client: Arc<Client>) -> Result<Self, EmbeddingError> {
        Ok(Self {
            client,
            embeddings: EmbeddingService::new()?,
            config: RetrievalConfig::from_env(),
        })
    }

    pub fn with_config(
        client: Arc<Client>,
        config: RetrievalConfig,
    ) -> Result<Self, EmbeddingError> {
        Ok(Self {
            client,
            embeddings: EmbeddingService::new()?,
            config,
        })
    }

    fn collection(&self) -> Collection<KnowledgeDocument> {
        self.client.database("Knowledge").collection("Passages")
    }

    /// Retrieve the passages most relevant to `query`, best first. An empty
    /// result is a normal outcome, not an error.
    pub async fn retrieve_context(&self, query: &str) -> Result<Vec<ScoredPassage>, RetrievalError> {
        let query_embedding = self.embeddings.embed(query).await?;

        let cursor = self.collection().find(mongodb::bson::doc! {}).await?;
        let documents: Vec<KnowledgeDocument> = cursor.try_collect().await?;

        if documents.is_empty() {
            log::info!("Knowledge base is empty, retrieval returns no context");
            return Ok(Vec::new());
        }

        let passages = rank_passages(&documents, &query_embedding, &self.config);
        log::info!(
            "Retrieved {} relevant passages for '{}' out of {} candidates",
            passages.len(),
            query,
            documents.len()
        );

        Ok(passages)
    }
}

/// Score all candidate documents against the query embedding and return the
/// top matches above the threshold, best first. Documents whose embedding
/// dimension does not match the query are skipped.
pub fn rank_passages(
    documents: &[KnowledgeDocument],
    query_embedding: &[f32],
    config: &RetrievalConfig,
) -> Vec<ScoredPassage> {
    let mut scored: Vec<ScoredPassage> = documents
        .par_iter()
        .filter(|doc| doc.embedding.len() == query_embedding.len())
        .map(|doc| ScoredPassage {
            content: doc.content.clone(),
            score: cosine_similarity(&doc.embedding, query_embedding),
        })
        .filter(|passage| passage.score >= config.match_threshold)
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(config.match_count);
    scored
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += (*x as f64) * (*y as f64);
        norm_a += (*x as f64) * (*x as f64);
        norm_b += (*y as f64) * (*y as f64);
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return 0.0;
    }

    (dot / denom) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::knowledge::KnowledgeMetadata;

    fn doc(content: &str, embedding: Vec<f32>) -> KnowledgeDocument {
        KnowledgeDocument {
            id: None,
            content: content.to_string(),
            embedding,
            metadata: KnowledgeMetadata {
                source: "wikipedia".to_string(),
                url: "https://en.wikipedia.org/wiki/Test".to_string(),
                city: "Test".to_string(),
                title: "Test".to_string(),
            },
            verification_level: "verified_source".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_cosine_similarity_identical_vectors() {
        let v = vec![0.5, 0.1, -0.3];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal_vectors() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_zero_vector_is_zero() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 2.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_rank_passages_orders_and_filters() {
        let query = vec![1.0, 0.0];
        let documents = vec![
            doc("orthogonal", vec![0.0, 1.0]),
            doc("exact", vec![1.0, 0.0]),
            doc("close", vec![0.9, 0.2]),
        ];

        let config = RetrievalConfig {
            match_threshold: 0.5,
            match_count: 3,
        };

        let passages = rank_passages(&documents, &query, &config);

        assert_eq!(passages.len(), 2);
        assert_eq!(passages[0].content, "exact");
        assert_eq!(passages[1].content, "close");
    }

    #[test]
    fn test_rank_passages_respects_match_count() {
        let query = vec![1.0, 0.0];
        let documents = vec![
            doc("a", vec![1.0, 0.0]),
            doc("b", vec![0.99, 0.01]),
            doc("c", vec![0.98, 0.02]),
            doc("d", vec![0.97, 0.03]),
        ];

        let config = RetrievalConfig {
            match_threshold: 0.5,
            match_count: 3,
        };

        let passages = rank_passages(&documents, &query, &config);
        assert_eq!(passages.len(), 3);
    }

    #[test]
    fn test_rank_passages_skips_dimension_mismatch() {
        let query = vec![1.0, 0.0];
        let documents = vec![doc("wrong dims", vec![1.0, 0.0, 0.0])];

        let passages = rank_passages(&documents, &query, &RetrievalConfig::default());
        assert!(passages.is_empty());
    }
}
