use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BudgetRequest {
    pub destination: String,
    pub days: u32,
    pub travelers: u32,
    pub budget: f64,
    pub currency: String,
}

/// Cached budget analysis, keyed by the exact request tuple.
#[derive(Debug, Deserialize, Serialize)]
pub struct BudgetCacheEntry {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub destination: String,
    pub days: u32,
    pub travelers: u32,
    pub budget: f64,
    pub currency: String,
    pub report: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BudgetResponse {
    pub report: String,
}
