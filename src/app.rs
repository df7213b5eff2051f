use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;

use crate::{
    config::{AdminSeedConfig, AppConfig, SessionConfig},
    database,
    error::{AppError, Result},
    queries::admin_queries,
    routes,
};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub session: SessionConfig,
}

pub async fn build(config: &AppConfig) -> Result<Router> {
    let pool = database::create_pool(&config.database).await?;

    seed_admin(&pool, &config.admin).await?;

    let state = AppState {
        db: pool,
        session: config.session.clone(),
    };

    let allowed_origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|_| {
                AppError::ConfigError(format!("Invalid CORS origin: {}", origin))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // Credentials must be allowed for the session cookie to travel.
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_credentials(true)
        .allow_origin(allowed_origins);

    let app = routes::create_router(state)
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(cors);

    Ok(app)
}

/// Create the admin account on first boot so the panel is reachable.
async fn seed_admin(pool: &PgPool, config: &AdminSeedConfig) -> Result<()> {
    if admin_queries::find_by_email(pool, &config.email).await?.is_some() {
        return Ok(());
    }

    let password_hash = bcrypt::hash(&config.password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))?;

    admin_queries::create_admin(pool, &config.email, &password_hash).await?;

    tracing::info!("Seeded admin account {}", config.email);

    Ok(())
}
