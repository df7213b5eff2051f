use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, FieldError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub category: String,
    pub metal_type: String,
    pub purity: String,
    pub weight: String,
    pub price: i32,
    pub original_price: Option<i32>,
    pub currency: String,
    pub image: String,
    pub images: Vec<String>,
    pub gallery: Vec<String>,
    pub videos: Vec<String>,
    pub stock_status: String,
    pub short_description: Option<String>,
    pub description: String,
    pub specifications: Option<serde_json::Value>,
    pub shipping_info: Option<String>,
    pub is_featured: bool,
    pub is_new: bool,
    pub tags: Vec<String>,
    pub festival_offer: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for product create and partial update. On create the required
/// fields are enforced by `validate_for_create`; on update every field is
/// optional and only supplied fields are checked.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub metal_type: Option<String>,
    pub purity: Option<String>,
    pub weight: Option<String>,
    pub price: Option<i32>,
    pub original_price: Option<i32>,
    pub currency: Option<String>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub gallery: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
    pub stock_status: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub specifications: Option<serde_json::Value>,
    pub shipping_info: Option<String>,
    pub is_featured: Option<bool>,
    pub is_new: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub festival_offer: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub category: Option<String>,
    pub metal_type: Option<String>,
    pub min_price: Option<i32>,
    pub max_price: Option<i32>,
    pub featured: Option<bool>,
    pub search: Option<String>,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

impl ProductRequest {
    pub fn validate_for_create(&self) -> Result<()> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("name", &self.name),
            ("category", &self.category),
            ("metalType", &self.metal_type),
            ("purity", &self.purity),
            ("weight", &self.weight),
            ("image", &self.image),
            ("description", &self.description),
        ] {
            if is_blank(value) {
                errors.push(FieldError::new(field, "is required"));
            }
        }

        match self.price {
            None => errors.push(FieldError::new("price", "is required")),
            Some(p) if p <= 0 => errors.push(FieldError::new("price", "must be greater than 0")),
            _ => {}
        }

        if let Some(op) = self.original_price {
            if op <= 0 {
                errors.push(FieldError::new("originalPrice", "must be greater than 0"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }

    pub fn validate_for_update(&self) -> Result<()> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("name", &self.name),
            ("category", &self.category),
            ("metalType", &self.metal_type),
            ("purity", &self.purity),
            ("weight", &self.weight),
            ("image", &self.image),
            ("description", &self.description),
        ] {
            if value.is_some() && is_blank(value) {
                errors.push(FieldError::new(field, "must not be empty"));
            }
        }

        if let Some(p) = self.price {
            if p <= 0 {
                errors.push(FieldError::new("price", "must be greater than 0"));
            }
        }

        if let Some(op) = self.original_price {
            if op <= 0 {
                errors.push(FieldError::new("originalPrice", "must be greater than 0"));
            }
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

    fn empty_request() -> ProductRequest {
        ProductRequest {
            name: None,
            category: None,
            metal_type: None,
            purity: None,
            weight: None,
            price: None,
            original_price: None,
            currency: None,
            image: None,
            images: None,
            gallery: None,
            videos: None,
            stock_status: None,
            short_description: None,
            description: None,
            specifications: None,
            shipping_info: None,
            is_featured: None,
            is_new: None,
            tags: None,
            festival_offer: None,
        }
    }

    fn full_request() -> ProductRequest {
        ProductRequest {
            name: Some("Gold Ring".to_string()),
            category: Some("Rings".to_string()),
            metal_type: Some("Gold".to_string()),
            purity: Some("22K".to_string()),
            weight: Some("4.2g".to_string()),
            price: Some(25000),
            image: Some("https://cdn.example.com/ring.jpg".to_string()),
            description: Some("A handcrafted gold ring".to_string()),
            ..empty_request()
        }
    }

    #[test]
    fn create_accepts_complete_payload() {
        assert!(full_request().validate_for_create().is_ok());
    }

    #[test]
    fn create_reports_every_missing_field() {
        let err = empty_request().validate_for_create().unwrap_err();
        match err {
            AppError::Validation(errors) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert!(fields.contains(&"name"));
                assert!(fields.contains(&"metalType"));
                assert!(fields.contains(&"price"));
                assert_eq!(fields.len(), 8);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn create_rejects_non_positive_price() {
        let mut req = full_request();
        req.price = Some(0);
        let err = req.validate_for_create().unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "price");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn update_allows_omitted_fields() {
        let mut req = empty_request();
        req.price = Some(18000);
        assert!(req.validate_for_update().is_ok());
    }

    #[test]
    fn update_rejects_blank_supplied_name() {
        let mut req = empty_request();
        req.name = Some("   ".to_string());
        assert!(req.validate_for_update().is_err());
    }
}
