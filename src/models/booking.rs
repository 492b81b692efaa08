use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub enum BookingType {
    #[serde(rename = "flight")]
    Flight,
    #[serde(rename = "hotel")]
    Hotel,
    #[serde(rename = "car")]
    Car,
    #[serde(rename = "other")]
    Other,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub enum BookingStatus {
    #[serde(rename = "reserved")]
    Reserved,
    #[serde(rename = "confirmed")]
    Confirmed,
    #[serde(rename = "cancelled")]
    Cancelled,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Booking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: Option<ObjectId>,
    #[serde(rename = "type")]
    pub booking_type: BookingType,
    /// Route for flights ("LHR -> JFK"), location for everything else.
    pub route: Option<String>,
    pub location: Option<String>,
    pub provider: Option<String>,
    pub price: f64,
    pub currency: String,
    pub status: BookingStatus,
    pub reference: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BookingStatusUpdate {
    pub status: BookingStatus,
}
