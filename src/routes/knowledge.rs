use crate::models::knowledge::{KnowledgeDocument, KnowledgeMetadata, SeedRequest, SeedResponse};
use crate::services::embedding_service::EmbeddingService;
use crate::services::wiki_service::{WikiError, WikiService};
use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use mongodb::Client;
use serde_json::json;
use std::sync::Arc;

/*
    /api/knowledge/seed

    One-shot ingestion: Wikipedia summary -> embedding -> knowledge base.
*/
pub async fn seed(data: web::Data<Arc<Client>>, input: web::Json<SeedRequest>) -> impl Responder {
    let client = data.into_inner();
    let city = input.into_inner().city;

    let wiki = WikiService::new();
    let summary = match wiki.fetch_summary(&city).await {
        Ok(summary) => summary,
        Err(WikiError::InvalidCity(msg)) => {
            return HttpResponse::BadRequest().json(json!({ "error": msg }));
        }
        Err(err) => {
            log::error!("Wikipedia fetch failed for '{}': {}", city, err);
            return HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }));
        }
    };

    let content = summary.passage_content();

    let embeddings = match EmbeddingService::new() {
        Ok(service) => service,
        Err(err) => {
            log::error!("Embedding service unavailable: {}", err);
            return HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }));
        }
    };

    let embedding = match embeddings.embed(&content).await {
        Ok(embedding) => embedding,
        Err(err) => {
            log::error!("Embedding failed for '{}': {}", city, err);
            return HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }));
        }
    };

    let document = KnowledgeDocument {
        id: None,
        content: content.clone(),
        embedding,
        metadata: KnowledgeMetadata {
            source: "wikipedia".to_string(),
            url: summary.content_urls.desktop.page.clone(),
            city: city.clone(),
            title: summary.title.clone(),
        },
        verification_level: "verified_source".to_string(),
        created_at: Some(Utc::now()),
    };

    let collection: mongodb::Collection<KnowledgeDocument> =
        client.database("Knowledge").collection("Passages");

    match collection.insert_one(&document).await {
        Ok(_) => {
            log::info!("Seeded knowledge base with '{}'", summary.title);
            HttpResponse::Ok().json(SeedResponse {
                success: true,
                city,
                content_length: content.len(),
            })
        }
        Err(err) => {
            log::error!("Failed to insert knowledge document: {:?}", err);
            HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }))
        }
    }
}
