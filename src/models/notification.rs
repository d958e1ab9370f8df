use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub parcel_id: i64,
    pub parcel_tracking_id: String,
    pub message: String,
    // Jackson serializes the `isRead` flag as `read`; accept either.
    #[serde(alias = "isRead")]
    pub read: bool,
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_read_flag_spellings() {
        let base = r#"{"id":1,"userId":2,"parcelId":3,"parcelTrackingId":"TRK-9",
            "message":"Parcel DELIVERED: TRK-9","createdAt":"2025-06-01T09:00:00","#;

        let with_read: Notification =
            serde_json::from_str(&format!("{base}\"read\":true}}")).unwrap();
        assert!(with_read.read);

        let with_is_read: Notification =
            serde_json::from_str(&format!("{base}\"isRead\":false}}")).unwrap();
        assert!(!with_is_read.read);
    }
}
