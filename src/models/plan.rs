use serde::{Deserialize, Serialize};

/// Request body for AI itinerary generation. Field names match what the
/// web client sends (`tripDays`, `budgetTier`).
#[derive(Debug, Deserialize, Serialize)]
pub struct PlanRequest {
    pub destination: String,
    pub days: u32,
    pub budget: f64,
    pub travelers: u32,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(rename = "tripDays", default)]
    pub trip_days: Vec<PlanDayContext>,
    #[serde(rename = "budgetTier")]
    pub budget_tier: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// One already-scheduled day of the trip, used to pin generated activities
/// to the right location on multi-leg trips.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PlanDayContext {
    #[serde(rename = "dayNumber")]
    pub day_number: u32,
    pub location: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GeneratedPlan {
    pub days: Vec<GeneratedDay>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GeneratedDay {
    #[serde(rename = "dayNumber")]
    pub day_number: u32,
    pub activities: Vec<GeneratedActivity>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GeneratedActivity {
    pub title: String,
    pub time: String,
    pub location: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub safety_warning: Option<String>,
    pub notes: Option<String>,
}
