use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{AdminReview, ApprovalRequest, Review, ReviewRequest, ReviewsResponse},
    queries::{product_queries, review_queries},
};

/// Mean of the ratings rounded to one decimal place; 0.0 when there are
/// no reviews.
fn average_rating(ratings: &[i32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }

    let sum: i32 = ratings.iter().sum();
    let avg = f64::from(sum) / ratings.len() as f64;
    (avg * 10.0).round() / 10.0
}

pub async fn list_product_reviews(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReviewsResponse>> {
    let reviews = review_queries::list_for_product(&state.db, id).await?;

    let ratings: Vec<i32> = reviews.iter().map(|r| r.rating).collect();

    Ok(Json(ReviewsResponse {
        average_rating: average_rating(&ratings),
        total_reviews: reviews.len(),
        reviews,
    }))
}

pub async fn create_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReviewRequest>,
) -> Result<(StatusCode, Json<Review>)> {
    if payload.is_spam() {
        return Err(AppError::BadRequest("Invalid submission".to_string()));
    }

    if product_queries::find_by_id(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound("Product not found".to_string()));
    }

    payload.validate()?;

    let review = review_queries::create_review(&state.db, id, &payload).await?;

    Ok((StatusCode::CREATED, Json(review)))
}

pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let deleted = review_queries::delete_review(&state.db, id).await?;

    if deleted == 0 {
        return Err(AppError::NotFound("Review not found".to_string()));
    }

    Ok(Json(json!({ "success": true })))
}

pub async fn set_review_approval(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ApprovalRequest>,
) -> Result<Json<Review>> {
    let review = review_queries::set_approval(&state.db, id, payload.is_approved)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

    Ok(Json(review))
}

pub async fn list_all_reviews(State(state): State<AppState>) -> Result<Json<Vec<AdminReview>>> {
    let reviews = review_queries::list_all_with_product(&state.db).await?;

    Ok(Json(reviews))
}

#[cfg(test)]
mod tests {
    use super::average_rating;

    #[test]
    fn averages_and_rounds_to_one_decimal() {
        assert_eq!(average_rating(&[5, 4, 3]), 4.0);
        assert_eq!(average_rating(&[5, 4]), 4.5);
        assert_eq!(average_rating(&[3, 3, 4]), 3.3);
        assert_eq!(average_rating(&[5, 5, 5, 4]), 4.8);
    }

    #[test]
    fn no_reviews_means_zero() {
        assert_eq!(average_rating(&[]), 0.0);
    }
}
