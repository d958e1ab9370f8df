use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: i64,
    pub feedback_text: String,
    pub rating: i32,
    pub user_id: i64,
    pub username: String,
    pub parcel_id: i64,
    pub parcel_tracking_id: String,
    pub submitted_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub parcel_id: i64,
    pub feedback_text: String,
    pub rating: i32,
}

impl FeedbackRequest {
    /// Star ratings are 1-5 and the text is required; both are checked
    /// before any request goes out.
    pub fn validate(&self) -> Result<(), ApiError> {
        if !(1..=5).contains(&self.rating) {
            return Err(ApiError::Validation(format!(
                "rating must be between 1 and 5, got {}",
                self.rating
            )));
        }
        if self.feedback_text.trim().is_empty() {
            return Err(ApiError::Validation("feedback text is required".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_rating_and_empty_text() {
        let mut request = FeedbackRequest {
            parcel_id: 1,
            feedback_text: "great".to_string(),
            rating: 5,
        };
        assert!(request.validate().is_ok());

        request.rating = 0;
        assert!(matches!(request.validate(), Err(ApiError::Validation(_))));

        request.rating = 3;
        request.feedback_text = "  ".to_string();
        assert!(matches!(request.validate(), Err(ApiError::Validation(_))));
    }
}
