use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{Product, ProductQuery, ProductRequest},
    utils::slug::slugify,
};

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

/// All supplied filters AND together; results come back newest first.
pub async fn list_products(pool: &PgPool, params: ProductQuery) -> Result<Vec<Product>> {
    let mut query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM products WHERE 1=1");

    if let Some(ref category) = params.category {
        query.push(" AND category = ");
        query.push_bind(category);
    }

    if let Some(ref metal_type) = params.metal_type {
        query.push(" AND metal_type = ");
        query.push_bind(metal_type);
    }

    if let Some(min_price) = params.min_price {
        query.push(" AND price >= ");
        query.push_bind(min_price);
    }

    if let Some(max_price) = params.max_price {
        query.push(" AND price <= ");
        query.push_bind(max_price);
    }

    if let Some(featured) = params.featured {
        query.push(" AND is_featured = ");
        query.push_bind(featured);
    }

    if let Some(ref search) = params.search {
        query.push(" AND name ILIKE ");
        query.push_bind(format!("%{}%", search));
    }

    query.push(" ORDER BY created_at DESC");

    let products = query.build_query_as::<Product>().fetch_all(pool).await?;

    Ok(products)
}

const MAX_SLUG_ATTEMPTS: u32 = 50;

/// Resolve a unique slug for `name`, suffixing `-2`, `-3`, ... on collision.
/// `exclude` skips the row being updated so renaming back is not a collision.
pub async fn ensure_unique_slug(
    pool: &PgPool,
    name: &str,
    exclude: Option<Uuid>,
) -> Result<String> {
    let base = slugify(name);

    for attempt in 1..=MAX_SLUG_ATTEMPTS {
        let candidate = if attempt == 1 {
            base.clone()
        } else {
            format!("{}-{}", base, attempt)
        };

        let taken = match exclude {
            Some(id) => {
                sqlx::query_scalar::<_, Uuid>(
                    "SELECT id FROM products WHERE slug = $1 AND id <> $2",
                )
                .bind(&candidate)
                .bind(id)
                .fetch_optional(pool)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, Uuid>("SELECT id FROM products WHERE slug = $1")
                    .bind(&candidate)
                    .fetch_optional(pool)
                    .await?
            }
        };

        if taken.is_none() {
            return Ok(candidate);
        }
    }

    Err(AppError::Conflict(format!(
        "Could not allocate a unique slug for '{}'",
        name
    )))
}

pub async fn create_product(pool: &PgPool, req: &ProductRequest, slug: &str) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (
            id, slug, name, category, metal_type, purity, weight,
            price, original_price, currency, image, images, gallery, videos,
            stock_status, short_description, description, specifications,
            shipping_info, is_featured, is_new, tags, festival_offer
        )
        VALUES (
            $1, $2, $3, $4, $5, $6, $7,
            $8, $9, $10, $11, $12, $13, $14,
            $15, $16, $17, $18,
            $19, $20, $21, $22, $23
        )
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(slug)
    .bind(&req.name)
    .bind(&req.category)
    .bind(&req.metal_type)
    .bind(&req.purity)
    .bind(&req.weight)
    .bind(req.price)
    .bind(req.original_price)
    .bind(req.currency.as_deref().unwrap_or("INR"))
    .bind(&req.image)
    .bind(req.images.clone().unwrap_or_default())
    .bind(req.gallery.clone().unwrap_or_default())
    .bind(req.videos.clone().unwrap_or_default())
    .bind(req.stock_status.as_deref().unwrap_or("In Stock"))
    .bind(&req.short_description)
    .bind(&req.description)
    .bind(&req.specifications)
    .bind(&req.shipping_info)
    .bind(req.is_featured.unwrap_or(false))
    .bind(req.is_new.unwrap_or(false))
    .bind(req.tags.clone().unwrap_or_default())
    .bind(&req.festival_offer)
    .fetch_one(pool)
    .await?;

    Ok(product)
}

/// Partial update: absent fields keep their current value. The slug is only
/// touched when the caller re-derived it from a new name.
pub async fn update_product(
    pool: &PgPool,
    id: Uuid,
    req: &ProductRequest,
    slug: Option<&str>,
) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        UPDATE products SET
            slug = COALESCE($2, slug),
            name = COALESCE($3, name),
            category = COALESCE($4, category),
            metal_type = COALESCE($5, metal_type),
            purity = COALESCE($6, purity),
            weight = COALESCE($7, weight),
            price = COALESCE($8, price),
            original_price = COALESCE($9, original_price),
            currency = COALESCE($10, currency),
            image = COALESCE($11, image),
            images = COALESCE($12, images),
            gallery = COALESCE($13, gallery),
            videos = COALESCE($14, videos),
            stock_status = COALESCE($15, stock_status),
            short_description = COALESCE($16, short_description),
            description = COALESCE($17, description),
            specifications = COALESCE($18, specifications),
            shipping_info = COALESCE($19, shipping_info),
            is_featured = COALESCE($20, is_featured),
            is_new = COALESCE($21, is_new),
            tags = COALESCE($22, tags),
            festival_offer = COALESCE($23, festival_offer),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(slug)
    .bind(&req.name)
    .bind(&req.category)
    .bind(&req.metal_type)
    .bind(&req.purity)
    .bind(&req.weight)
    .bind(req.price)
    .bind(req.original_price)
    .bind(&req.currency)
    .bind(&req.image)
    .bind(&req.images)
    .bind(&req.gallery)
    .bind(&req.videos)
    .bind(&req.stock_status)
    .bind(&req.short_description)
    .bind(&req.description)
    .bind(&req.specifications)
    .bind(&req.shipping_info)
    .bind(req.is_featured)
    .bind(req.is_new)
    .bind(&req.tags)
    .bind(&req.festival_offer)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

pub async fn delete_product(pool: &PgPool, id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
