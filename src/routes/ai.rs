use crate::models::budget::{BudgetRequest, BudgetResponse};
use crate::models::chat::{
    ChatRequest, ChatResponse, GemsRequest, GemsResponse, TranslationRequest, TranslationResponse,
};
use crate::models::plan::{GeneratedPlan, PlanRequest};
use crate::services::budget_cache_service::BudgetCacheService;
use crate::services::groq_service::{ApiMessage, GroqService};
use crate::services::prompt_service;
use crate::services::retrieval_service::RetrievalService;
use actix_web::{web, HttpResponse, Responder};
use mongodb::Client;
use serde_json::json;
use std::sync::Arc;

const CHAT_TEMPERATURE: f32 = 0.7;
const ITINERARY_TEMPERATURE: f32 = 0.7;
const ITINERARY_MAX_TOKENS: u32 = 4096;
const BUDGET_TEMPERATURE: f32 = 0.1;

/*
    /api/ai/chat
*/
pub async fn chat(input: web::Json<ChatRequest>) -> impl Responder {
    let service = match GroqService::new() {
        Ok(service) => service,
        Err(err) => {
            log::error!("Chat completion unavailable: {}", err);
            return HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }));
        }
    };

    // Fixed system prompt lives server-side; anything not from the assistant
    // is forwarded as a user turn.
    let mut messages = vec![ApiMessage::system(prompt_service::CHAT_SYSTEM_PROMPT)];
    for msg in &input.messages {
        if msg.role == "assistant" {
            messages.push(ApiMessage::assistant(msg.content.clone()));
        } else {
            messages.push(ApiMessage::user(msg.content.clone()));
        }
    }

    match service.chat(messages, CHAT_TEMPERATURE).await {
        Ok(text) => HttpResponse::Ok().json(ChatResponse { message: text }),
        Err(err) => {
            log::error!("Chat completion failed: {}", err);
            HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }))
        }
    }
}

/*
    /api/ai/itinerary
*/
pub async fn generate_itinerary(
    data: web::Data<Arc<Client>>,
    input: web::Json<PlanRequest>,
) -> impl Responder {
    let client = data.get_ref().clone();
    let request = input.into_inner();

    let service = match GroqService::new() {
        Ok(service) => service,
        Err(err) => {
            log::error!("Itinerary generation unavailable: {}", err);
            return HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }));
        }
    };

    // Retrieval is best effort: a missing embedding key, an upstream failure,
    // or an empty knowledge base all degrade to generating without context.
    let mut context_data = String::new();
    if !request.destination.is_empty() {
        match RetrievalService::new(client.clone()) {
            Ok(retrieval) => match retrieval.retrieve_context(&request.destination).await {
                Ok(passages) if !passages.is_empty() => {
                    context_data = passages
                        .iter()
                        .map(|p| p.content.as_str())
                        .collect::<Vec<_>>()
                        .join("\n\n");
                }
                Ok(_) => {}
                Err(err) => {
                    log::warn!("Retrieval failed, proceeding without context: {}", err);
                }
            },
            Err(err) => {
                log::warn!("Retrieval unavailable, proceeding without context: {}", err);
            }
        }
    }

    let prompt = prompt_service::build_itinerary_prompt(&request, &context_data);
    let messages = vec![
        ApiMessage::system(prompt_service::JSON_SYSTEM_PROMPT),
        ApiMessage::user(prompt),
    ];

    let content = match service
        .chat_json(messages, ITINERARY_TEMPERATURE, ITINERARY_MAX_TOKENS)
        .await
    {
        Ok(content) => content,
        Err(err) => {
            log::error!("Itinerary generation failed: {}", err);
            return HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }));
        }
    };

    match serde_json::from_str::<GeneratedPlan>(&content) {
        Ok(plan) => HttpResponse::Ok().json(plan),
        Err(err) => {
            log::error!("Model returned malformed itinerary JSON: {}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Model returned malformed itinerary JSON" }))
        }
    }
}

/*
    /api/ai/budget

    Always answers 200: failures come back as {"error": ...} so the client
    sees the actual message instead of a generic transport error.
*/
pub async fn validate_budget(
    data: web::Data<Arc<Client>>,
    input: web::Json<BudgetRequest>,
) -> impl Responder {
    let client = data.get_ref().clone();
    let request = input.into_inner();
    let cache = BudgetCacheService::new(client);

    match cache.lookup(&request).await {
        Ok(Some(report)) => {
            log::info!("Budget cache hit for {}", request.destination);
            return HttpResponse::Ok().json(BudgetResponse { report });
        }
        Ok(None) => {}
        Err(err) => {
            // A cache read failure is not fatal; fall through to generation
            log::warn!("Budget cache lookup failed: {}", err);
        }
    }

    let service = match GroqService::new() {
        Ok(service) => service,
        Err(err) => {
            log::error!("Budget validation unavailable: {}", err);
            return HttpResponse::Ok().json(json!({ "error": err.to_string() }));
        }
    };

    let messages = vec![
        ApiMessage::system(prompt_service::build_budget_system_prompt(&request)),
        ApiMessage::user(prompt_service::build_budget_user_prompt(&request)),
    ];

    let report = match service.chat(messages, BUDGET_TEMPERATURE).await {
        Ok(report) => report,
        Err(err) => {
            log::error!("Budget validation failed: {}", err);
            return HttpResponse::Ok().json(json!({ "error": err.to_string() }));
        }
    };

    // Save to cache best-effort; the response never waits on a retry
    if let Err(err) = cache.store(&request, &report).await {
        log::warn!("Budget cache insert failed: {}", err);
    }

    HttpResponse::Ok().json(BudgetResponse { report })
}

/*
    /api/ai/gems
*/
pub async fn hidden_gems(input: web::Json<GemsRequest>) -> impl Responder {
    let service = match GroqService::new() {
        Ok(service) => service,
        Err(err) => {
            log::error!("Hidden gems unavailable: {}", err);
            return HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }));
        }
    };

    let messages = vec![
        ApiMessage::system(prompt_service::JSON_SYSTEM_PROMPT),
        ApiMessage::user(prompt_service::build_gems_prompt(&input.destination)),
    ];

    let content = match service
        .chat_json(messages, CHAT_TEMPERATURE, ITINERARY_MAX_TOKENS)
        .await
    {
        Ok(content) => content,
        Err(err) => {
            log::error!("Hidden gems request failed: {}", err);
            return HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }));
        }
    };

    match serde_json::from_str::<GemsResponse>(&content) {
        Ok(gems) => HttpResponse::Ok().json(gems),
        Err(err) => {
            log::error!("Model returned malformed gems JSON: {}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Model returned malformed gems JSON" }))
        }
    }
}

/*
    /api/ai/translate
*/
pub async fn translate(input: web::Json<TranslationRequest>) -> impl Responder {
    let service = match GroqService::new() {
        Ok(service) => service,
        Err(err) => {
            log::error!("Translation unavailable: {}", err);
            return HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }));
        }
    };

    let messages = vec![
        ApiMessage::system(prompt_service::TRANSLATION_SYSTEM_PROMPT),
        ApiMessage::user(prompt_service::build_translation_prompt(
            &input.text,
            &input.source_lang,
            &input.target_lang,
        )),
    ];

    match service.chat(messages, CHAT_TEMPERATURE).await {
        Ok(text) => HttpResponse::Ok().json(TranslationResponse {
            translation: text.trim().to_string(),
        }),
        Err(err) => {
            log::error!("Translation failed: {}", err);
            HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }))
        }
    }
}
