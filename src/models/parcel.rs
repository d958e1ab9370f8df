use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParcelStatus {
    Pending,
    Dispatched,
    InTransit,
    Delivered,
    Cancelled,
    Returned,
}

impl fmt::Display for ParcelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParcelStatus::Pending => "PENDING",
            ParcelStatus::Dispatched => "DISPATCHED",
            ParcelStatus::InTransit => "IN_TRANSIT",
            ParcelStatus::Delivered => "DELIVERED",
            ParcelStatus::Cancelled => "CANCELLED",
            ParcelStatus::Returned => "RETURNED",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    pub id: i64,
    pub tracking_id: String,
    pub sender_name: String,
    pub sender_address: String,
    pub recipient_name: String,
    pub recipient_address: String,
    pub recipient_email: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: ParcelStatus,
    #[serde(default)]
    pub current_location: Option<String>,
    pub user_id: i64,
    pub username: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Parcel {
    /// Feedback can be submitted once the parcel has been delivered.
    pub fn feedback_open(&self) -> bool {
        self.status == ParcelStatus::Delivered
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelRequest {
    pub sender_name: String,
    pub sender_address: String,
    pub recipient_name: String,
    pub recipient_address: String,
    pub recipient_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ParcelStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
    pub user_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARCEL_JSON: &str = r#"{
        "id": 3,
        "trackingId": "TRK-1",
        "senderName": "Depot",
        "senderAddress": "1 Dock Rd",
        "recipientName": "Sam",
        "recipientAddress": "2 Hill St",
        "recipientEmail": "sam@x.com",
        "description": null,
        "status": "IN_TRANSIT",
        "currentLocation": "Hub 4",
        "userId": 9,
        "username": "sam",
        "createdAt": "2025-06-01T10:15:30",
        "updatedAt": "2025-06-02T08:00:00"
    }"#;

    #[test]
    fn decodes_backend_camel_case() {
        let parcel: Parcel = serde_json::from_str(PARCEL_JSON).unwrap();
        assert_eq!(parcel.tracking_id, "TRK-1");
        assert_eq!(parcel.status, ParcelStatus::InTransit);
        assert_eq!(parcel.current_location.as_deref(), Some("Hub 4"));
        assert!(!parcel.feedback_open());
    }

    #[test]
    fn feedback_opens_on_delivery() {
        let mut parcel: Parcel = serde_json::from_str(PARCEL_JSON).unwrap();
        parcel.status = ParcelStatus::Delivered;
        assert!(parcel.feedback_open());
    }
}
