use crate::models::budget::BudgetRequest;
use crate::models::plan::{PlanDayContext, PlanRequest};

/// System prompt for the conversational assistant. Kept server-side so the
/// client cannot tamper with the assistant's instructions.
pub const CHAT_SYSTEM_PROMPT: &str = "\
You are TravelAI, an expert, friendly, and enthusiastic travel assistant.
Your goal is to help users plan perfect trips, discover hidden gems, and get practical travel advice.

Tone: Professional yet warm, encouraging, practical.
Format: Use Markdown.";

/// System prompt for endpoints that must answer with machine-readable JSON.
pub const JSON_SYSTEM_PROMPT: &str = "You are a travel API that outputs strict JSON.";

const LUXURY_GUIDANCE: &str = "\
===== LUXURY TIER REQUIREMENTS =====
YOU MUST RECOMMEND ONLY PREMIUM/LUXURY OPTIONS. DO NOT suggest budget or mid-range alternatives.
ACCOMMODATION: Only 5-star hotels, luxury resorts, or boutique hotels.
DINING: Fine dining, Michelin-starred, upscale rooftop bars.
TRANSPORTATION: Private chauffeur, luxury car service, first-class train.
ACTIVITIES: VIP experiences, private tours, yacht cruises.
STYLE: Exclusivity, privacy, personalized service.";

const MID_RANGE_GUIDANCE: &str = "\
===== MID-RANGE TIER REQUIREMENTS =====
Balance quality and value.
ACCOMMODATION: 3-4 star hotels, boutique hotels.
DINING: Popular local restaurants, cafes.
TRANSPORTATION: Public transport + taxis.
ACTIVITIES: Paid attractions + free experiences.
STYLE: Good quality, authentic local experiences.";

const BUDGET_GUIDANCE: &str = "\
===== BUDGET TIER REQUIREMENTS =====
YOU MUST PRIORITIZE FREE OR LOW-COST OPTIONS.
ACCOMMODATION: Hostels, budget hotels.
DINING: Street food, local markets.
TRANSPORTATION: Public buses, walking.
ACTIVITIES: Free walking tours, parks, beaches.
STYLE: Backpacker-friendly, minimize costs.";

/// Tier wording block for the itinerary prompt. Anything unrecognized falls
/// back to mid-range.
pub fn budget_tier_guidance(tier: &str) -> &'static str {
    match tier {
        "luxury" => LUXURY_GUIDANCE,
        "budget" => BUDGET_GUIDANCE,
        _ => MID_RANGE_GUIDANCE,
    }
}

/// Per-day location schedule injected into the itinerary prompt, so multi-leg
/// trips get activities for the right city on the right day.
pub fn schedule_context(destination: &str, trip_days: &[PlanDayContext]) -> String {
    if trip_days.is_empty() {
        return format!("Trip to: {}", destination);
    }

    let structure = trip_days
        .iter()
        .map(|d| format!("Day {}: {}", d.day_number, d.location))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "ITINERARY SCHEDULE:\n{}\nGenerate activities SPECIFIC to the location mentioned for each day.",
        structure
    )
}

pub fn build_itinerary_prompt(request: &PlanRequest, context_data: &str) -> String {
    let tier = request.budget_tier.as_deref().unwrap_or("mid-range");
    let guidance = budget_tier_guidance(tier);
    let schedule = schedule_context(&request.destination, &request.trip_days);

    let grounding = if context_data.is_empty() {
        "No specific verified data found in knowledge base. Rely on general knowledge."
    } else {
        context_data
    };

    format!(
        "Generate a comprehensive, fully detailed {days}-day itinerary for {travelers} travelers.
Total budget: {budget} {currency}.
{schedule}

{guidance}

REAL-WORLD CONTEXT (Use this to ground your detailed recommendations):
{grounding}

ABSOLUTE REQUIREMENT: Your recommendations MUST strictly adhere to the {tier_upper} tier guidelines above.

CRITICAL: You must provide a FULL day's schedule for EVERY day.
Each day MUST include at least 5-6 activities covering Morning, Afternoon, and Evening.

PRICING: Include realistic estimated costs in {currency} for EVERY activity.

Return ONLY valid JSON in the following format:
{{
  \"days\": [
    {{
      \"dayNumber\": 1,
      \"activities\": [
        {{
          \"title\": \"Activity Name\",
          \"time\": \"09:00\",
          \"location\": \"Specific location name\",
          \"type\": \"sightseeing\",
          \"safety_warning\": \"Warning text or null\",
          \"notes\": \"Detailed description. Cost: [amount]\"
        }}
      ]
    }}
  ]
}}",
        days = request.days,
        travelers = request.travelers,
        budget = request.budget,
        currency = request.currency,
        schedule = schedule,
        guidance = guidance,
        grounding = grounding,
        tier_upper = tier.to_uppercase(),
    )
}

pub fn build_budget_system_prompt(request: &BudgetRequest) -> String {
    let total = request.budget * request.travelers as f64;
    let nights = request.days.saturating_sub(1);

    format!(
        "You are a savvy, friendly, and expert Travel Budget Consultant.
Your goal is to provide a clear, helpful, and \"human\" analysis of the user's travel budget.

CONTEXT:
- Destination: {destination}
- Duration: {days} days
- Travelers: {travelers} people
- Budget (Per Person): {budget} {currency}

YOUR ANALYSIS STYLE:
1.  **Friendly & Direct:** Start with a warm, personalized opening.
2.  **Visual:** Use emojis to make sections pop.
3.  **Honest:** If the budget is low, say it gently but clearly. If it's great, cheer them on!
4.  **Structured:** Use clear headings (#, ##, ###) that map to the frontend design.

STRICT OUTPUT FORMAT (Markdown):

# 📊 Trip Budget Breakdown for {destination}

### 💰 Your Budget Snapshot
*   **Budget per person:** {currency} {budget}
*   **Total for {travelers} traveler(s):** **{currency} {total}**
*   **Status:** [✅ SUFFICIENT / ⚠️ TIGHT / ❌ INSUFFICIENT]

### 📝 Estimated Costs (Per Person)
*   **Accommodations ({nights} nights):** {currency} [Cost]
*   **Food & Dining:** {currency} [Cost]
*   **Transports:** {currency} [Cost]
*   **Activities:** {currency} [Cost]
*   **Buffer:** {currency} [Cost]

**👉 Estimated Total:** **{currency} [Total]**

### 💡 AI Verdict & Tips
[Write a warm, human paragraph here. Explain clearly WHY the budget works or doesn't. Give 1-2 specific actionable money-saving tips for {destination} if the budget is tight, or suggestion for a splurge if the budget is high.]

### 🌟 Hidden Gems to Visit
*   [Gem 1]
*   [Gem 2]",
        destination = request.destination,
        days = request.days,
        travelers = request.travelers,
        budget = request.budget,
        currency = request.currency,
        total = total,
        nights = nights,
    )
}

pub fn build_budget_user_prompt(request: &BudgetRequest) -> String {
    format!(
        "Analyze budget for a trip to {} for {} days for {} people with a budget of {} {} per person.",
        request.destination, request.days, request.travelers, request.budget, request.currency
    )
}

pub fn build_gems_prompt(destination: &str) -> String {
    format!(
        "Suggest 5 \"hidden gem\" activities or unique spots in {} that most tourists miss.
Return ONLY valid JSON in the following format:
{{ \"gems\": [ {{ \"title\": \"Spot Name\", \"description\": \"Why it's unique\" }} ] }}",
        destination
    )
}

pub fn build_translation_prompt(text: &str, source_lang: &str, target_lang: &str) -> String {
    format!(
        "Translate the following text from {} to {}: \"{}\"
Return ONLY the translated text.",
        source_lang, target_lang, text
    )
}

pub const TRANSLATION_SYSTEM_PROMPT: &str =
    "You are a professional translator. Output only the translated text.";
