use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{Product, ProductQuery, ProductRequest},
    queries::product_queries,
};

pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = product_queries::list_products(&state.db, params).await?;

    Ok(Json(products))
}

/// Resolves by slug first, then falls back to UUID lookup.
pub async fn get_product(
    State(state): State<AppState>,
    Path(slug_or_id): Path<String>,
) -> Result<Json<Product>> {
    let mut product = product_queries::find_by_slug(&state.db, &slug_or_id).await?;

    if product.is_none() {
        if let Ok(id) = Uuid::parse_str(&slug_or_id) {
            product = product_queries::find_by_id(&state.db, id).await?;
        }
    }

    let product = product.ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    payload.validate_for_create()?;

    // validate_for_create guarantees name is present
    let name = payload.name.as_deref().unwrap_or_default();
    let slug = product_queries::ensure_unique_slug(&state.db, name, None).await?;

    let product = product_queries::create_product(&state.db, &payload, &slug).await?;

    tracing::info!("Created product {} ({})", product.id, product.slug);

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductRequest>,
) -> Result<Json<Product>> {
    payload.validate_for_update()?;

    let slug = match payload.name.as_deref() {
        Some(name) => Some(product_queries::ensure_unique_slug(&state.db, name, Some(id)).await?),
        None => None,
    };

    let product = product_queries::update_product(&state.db, id, &payload, slug.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let deleted = product_queries::delete_product(&state.db, id).await?;

    if deleted == 0 {
        return Err(AppError::NotFound("Product not found".to_string()));
    }

    tracing::info!("Deleted product {}", id);

    Ok(Json(json!({ "success": true })))
}
