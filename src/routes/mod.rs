mod admin;
mod health;
mod products;
mod reviews;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post, put},
};

use crate::{AppState, middleware::require_admin};

pub fn create_router(state: AppState) -> Router {
    let public_api = Router::new()
        .route("/products", get(products::list_products))
        .route("/products/{id}", get(products::get_product))
        .route(
            "/products/{id}/reviews",
            get(reviews::list_product_reviews).post(reviews::create_review),
        )
        .route("/admin/login", post(admin::login))
        .route("/admin/session", get(admin::session_status));

    let admin_api = Router::new()
        .route("/products", post(products::create_product))
        .route(
            "/products/{id}",
            put(products::update_product).delete(products::delete_product),
        )
        .route("/reviews/{id}", delete(reviews::delete_review))
        .route("/reviews/{id}/approval", patch(reviews::set_review_approval))
        .route("/admin/reviews", get(reviews::list_all_reviews))
        .route("/admin/logout", post(admin::logout))
        .route_layer(from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .nest("/api", public_api.merge(admin_api))
        .with_state(state)
}
