use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One leg of a multi-destination trip: stay `days` days in `location`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TripSegment {
    pub location: String,
    pub days: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TripActivity {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default = "default_activity_time")]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type", default = "default_activity_type")]
    pub activity_type: String,
    #[serde(rename = "isCompleted", default)]
    pub is_completed: bool,
    #[serde(default)]
    pub rating: u8,
    pub safety_warning: Option<String>,
    pub notes: Option<String>,
    pub estimated_cost: Option<f64>,
}

fn default_activity_time() -> String {
    "09:00".to_string()
}

fn default_activity_type() -> String {
    "sightseeing".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TripDay {
    pub id: String,
    #[serde(rename = "dayNumber")]
    pub day_number: u32,
    pub location: String,
    pub activities: Vec<TripActivity>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Trip {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: Option<ObjectId>,
    pub title: String,
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: f64,
    pub currency: String,
    pub travelers: u32,
    pub pinned: bool,
    pub segments: Vec<TripSegment>,
    pub days: Vec<TripDay>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Incoming payload for trip creation. A plain single-destination request
/// carries `destination` + `duration`; multi-leg requests send `segments`.
#[derive(Debug, Deserialize, Serialize)]
pub struct TripSubmission {
    pub title: String,
    pub destination: Option<String>,
    pub duration: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub currency: Option<String>,
    pub travelers: Option<u32>,
    pub segments: Option<Vec<TripSegment>>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TripUpdate {
    pub title: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub currency: Option<String>,
    pub travelers: Option<u32>,
    pub pinned: Option<bool>,
}

impl TripSubmission {
    /// Resolve the segment list, falling back to a single segment built from
    /// `destination`/`duration` when none is given.
    pub fn resolved_segments(&self) -> Vec<TripSegment> {
        match &self.segments {
            Some(segments) if !segments.is_empty() => segments.clone(),
            _ => vec![TripSegment {
                location: self.destination.clone().unwrap_or_default(),
                days: self.duration.unwrap_or(1).max(1),
            }],
        }
    }
}

/// Expand trip segments into consecutively numbered days, each carrying its
/// segment's location and an empty activity list.
pub fn expand_segments(segments: &[TripSegment]) -> Vec<TripDay> {
    let mut days = Vec::new();
    let mut day_count = 0;

    for segment in segments {
        for _ in 0..segment.days {
            day_count += 1;
            days.push(TripDay {
                id: format!("day-{}", day_count),
                day_number: day_count,
                location: segment.location.clone(),
                activities: Vec::new(),
            });
        }
    }

    days
}

/// Restore the day-ordering invariant on a client-supplied `days` array and
/// make sure every activity has a stable id.
pub fn normalize_days(days: &mut [TripDay]) {
    days.sort_by_key(|d| d.day_number);

    for day in days.iter_mut() {
        for activity in day.activities.iter_mut() {
            if activity.id.is_empty() {
                activity.id = Uuid::new_v4().to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_segments_numbers_days_across_legs() {
        let segments = vec![
            TripSegment {
                location: "Tokyo".to_string(),
                days: 2,
            },
            TripSegment {
                location: "Kyoto".to_string(),
                days: 3,
            },
        ];

        let days = expand_segments(&segments);

        assert_eq!(days.len(), 5);
        assert_eq!(days[0].id, "day-1");
        assert_eq!(days[0].location, "Tokyo");
        assert_eq!(days[2].day_number, 3);
        assert_eq!(days[2].location, "Kyoto");
        assert_eq!(days[4].id, "day-5");
        assert!(days.iter().all(|d| d.activities.is_empty()));
    }

    #[test]
    fn test_resolved_segments_falls_back_to_destination() {
        let submission = TripSubmission {
            title: "Weekend away".to_string(),
            destination: Some("Lisbon".to_string()),
            duration: Some(3),
            start_date: None,
            end_date: None,
            budget: None,
            currency: None,
            travelers: None,
            segments: None,
        };

        let segments = submission.resolved_segments();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].location, "Lisbon");
        assert_eq!(segments[0].days, 3);
    }

    #[test]
    fn test_normalize_days_sorts_and_assigns_activity_ids() {
        let mut days = vec![
            TripDay {
                id: "day-2".to_string(),
                day_number: 2,
                location: "Rome".to_string(),
                activities: vec![],
            },
            TripDay {
                id: "day-1".to_string(),
                day_number: 1,
                location: "Rome".to_string(),
                activities: vec![TripActivity {
                    id: String::new(),
                    title: "Colosseum".to_string(),
                    time: "09:00".to_string(),
                    location: "Rome".to_string(),
                    activity_type: "sightseeing".to_string(),
                    is_completed: false,
                    rating: 0,
                    safety_warning: None,
                    notes: None,
                    estimated_cost: None,
                }],
            },
        ];

        normalize_days(&mut days);

        assert_eq!(days[0].day_number, 1);
        assert_eq!(days[1].day_number, 2);
        assert!(!days[0].activities[0].id.is_empty());
    }
}
