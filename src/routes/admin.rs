use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
    response::AppendHeaders,
};
use serde_json::json;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{LoginRequest, LoginResponse, SessionStatus},
    queries::admin_queries,
    utils::cookies,
};

type SetCookie = AppendHeaders<[(header::HeaderName, String); 1]>;

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(SetCookie, Json<LoginResponse>)> {
    let admin = admin_queries::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let is_valid = bcrypt::verify(&payload.password, &admin.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {}", e)))?;

    if !is_valid {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    // Opportunistic cleanup; stale rows are harmless but pile up.
    admin_queries::delete_expired_sessions(&state.db).await?;

    let token = admin_queries::create_session(&state.db, admin.id, state.session.ttl_hours).await?;

    tracing::info!("Admin {} logged in", admin.email);

    let cookie = cookies::session_cookie(
        &token,
        state.session.ttl_hours,
        state.session.cookie_secure,
    );

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(LoginResponse {
            success: true,
            email: admin.email,
        }),
    ))
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(SetCookie, Json<serde_json::Value>)> {
    if let Some(token) = cookies::session_token(&headers) {
        admin_queries::delete_session(&state.db, &token).await?;
    }

    let cookie = cookies::clear_session_cookie(state.session.cookie_secure);

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(json!({ "success": true })),
    ))
}

pub async fn session_status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SessionStatus>> {
    let authenticated = match cookies::session_token(&headers) {
        Some(token) => admin_queries::find_session(&state.db, &token).await?.is_some(),
        None => false,
    };

    Ok(Json(SessionStatus { authenticated }))
}
