use crate::models::budget::{BudgetCacheEntry, BudgetRequest};
use chrono::Utc;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection};
use std::sync::Arc;

/// Response cache for budget analyses, keyed by the exact request tuple
/// (destination, days, travelers, budget, currency). There is no TTL or
/// eviction; reports stay valid until the collection is cleared.
pub struct BudgetCacheService {
    client: Arc<Client>,
}

impl BudgetCacheService {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    fn collection(&self) -> Collection<BudgetCacheEntry> {
        self.client.database("Knowledge").collection("BudgetCache")
    }

    fn key_filter(request: &BudgetRequest) -> Document {
        // Mongo matches numerics across integer widths, so i64 is safe here
        doc! {
            "destination": &request.destination,
            "days": request.days as i64,
            "travelers": request.travelers as i64,
            "budget": request.budget,
            "currency": &request.currency,
        }
    }

    pub async fn lookup(
        &self,
        request: &BudgetRequest,
    ) -> Result<Option<String>, mongodb::error::Error> {
        let entry = self.collection().find_one(Self::key_filter(request)).await?;
        Ok(entry.map(|e| e.report))
    }

    /// Store a report under the request tuple. An upsert on the key filter
    /// keeps concurrent identical requests from producing duplicate rows.
    pub async fn store(
        &self,
        request: &BudgetRequest,
        report: &str,
    ) -> Result<(), mongodb::error::Error> {
        let entry = BudgetCacheEntry {
            id: None,
            destination: request.destination.clone(),
            days: request.days,
            travelers: request.travelers,
            budget: request.budget,
            currency: request.currency.clone(),
            report: report.to_string(),
            created_at: Some(Utc::now()),
        };

        self.collection()
            .replace_one(Self::key_filter(request), &entry)
            .upsert(true)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_filter_carries_full_tuple() {
        let request = BudgetRequest {
            destination: "Bangkok".to_string(),
            days: 7,
            travelers: 2,
            budget: 900.0,
            currency: "USD".to_string(),
        };

        let filter = BudgetCacheService::key_filter(&request);
        assert_eq!(filter.get_str("destination").unwrap(), "Bangkok");
        assert_eq!(filter.get_i64("days").unwrap(), 7);
        assert_eq!(filter.get_i64("travelers").unwrap(), 2);
        assert_eq!(filter.get_f64("budget").unwrap(), 900.0);
        assert_eq!(filter.get_str("currency").unwrap(), "USD");
    }
}
