use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::Result,
    models::{AdminReview, Review, ReviewRequest},
};

pub async fn list_for_product(pool: &PgPool, product_id: Uuid) -> Result<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews WHERE product_id = $1 ORDER BY created_at DESC",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Review>> {
    let review = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(review)
}

pub async fn create_review(pool: &PgPool, product_id: Uuid, req: &ReviewRequest) -> Result<Review> {
    let review = sqlx::query_as::<_, Review>(
        r#"
        INSERT INTO reviews (id, product_id, name, rating, title, comment)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(product_id)
    .bind(&req.name)
    .bind(req.rating)
    .bind(&req.title)
    .bind(&req.comment)
    .fetch_one(pool)
    .await?;

    Ok(review)
}

pub async fn delete_review(pool: &PgPool, id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn set_approval(pool: &PgPool, id: Uuid, is_approved: bool) -> Result<Option<Review>> {
    let review = sqlx::query_as::<_, Review>(
        "UPDATE reviews SET is_approved = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(is_approved)
    .fetch_optional(pool)
    .await?;

    Ok(review)
}

/// Every review across the catalog, newest first, annotated with the
/// product name for the admin panel.
pub async fn list_all_with_product(pool: &PgPool) -> Result<Vec<AdminReview>> {
    let reviews = sqlx::query_as::<_, AdminReview>(
        r#"
        SELECT r.*, p.name AS product_name
        FROM reviews r
        JOIN products p ON p.id = r.product_id
        ORDER BY r.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}
