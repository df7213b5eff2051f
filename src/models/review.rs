use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, FieldError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub rating: i32,
    pub title: String,
    pub comment: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Review row annotated with the product name, for the admin panel listing.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdminReview {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub rating: i32,
    pub title: String,
    pub comment: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub product_name: String,
}

/// Visitor-submitted review payload. The honeypot field is hidden on the
/// form; bots fill it in, humans never do.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub name: Option<String>,
    pub rating: Option<i32>,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub honeypot: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRequest {
    pub is_approved: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsResponse {
    pub reviews: Vec<Review>,
    pub average_rating: f64,
    pub total_reviews: usize,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

impl ReviewRequest {
    pub fn is_spam(&self) -> bool {
        self.honeypot.as_deref().is_some_and(|h| !h.is_empty())
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("name", &self.name),
            ("title", &self.title),
            ("comment", &self.comment),
        ] {
            if is_blank(value) {
                errors.push(FieldError::new(field, "is required"));
            }
        }

        match self.rating {
            None => errors.push(FieldError::new("rating", "is required")),
            Some(r) if !(1..=5).contains(&r) => {
                errors.push(FieldError::new("rating", "must be between 1 and 5"));
            }
            _ => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> ReviewRequest {
        ReviewRequest {
            name: Some("Priya".to_string()),
            rating: Some(5),
            title: Some("Beautiful".to_string()),
            comment: Some("Exactly as pictured".to_string()),
            honeypot: None,
        }
    }

    #[test]
    fn accepts_valid_review() {
        assert!(valid_request().validate().is_ok());
        assert!(!valid_request().is_spam());
    }

    #[test]
    fn rejects_out_of_range_rating() {
        for rating in [0, 6, -1] {
            let mut req = valid_request();
            req.rating = Some(rating);
            assert!(req.validate().is_err(), "rating {} should fail", rating);
        }
    }

    #[test]
    fn rejects_missing_fields() {
        let req = ReviewRequest {
            name: None,
            rating: None,
            title: None,
            comment: None,
            honeypot: None,
        };
        match req.validate().unwrap_err() {
            AppError::Validation(errors) => assert_eq!(errors.len(), 4),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn filled_honeypot_is_spam() {
        let mut req = valid_request();
        req.honeypot = Some("http://spam.example".to_string());
        assert!(req.is_spam());
    }

    #[test]
    fn empty_honeypot_is_not_spam() {
        let mut req = valid_request();
        req.honeypot = Some(String::new());
        assert!(!req.is_spam());
    }
}
