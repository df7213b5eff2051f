use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{error::AppError, queries::admin_queries, utils::cookies, AppState};

/// Admin identity resolved from the session cookie, inserted into request
/// extensions for downstream handlers.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub admin_id: Uuid,
}

/// Gate for mutation endpoints: the session cookie must resolve to a live
/// admin session, otherwise 401 before the handler runs.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = cookies::session_token(req.headers())
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    let session = admin_queries::find_session(&state.db, &token)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    req.extensions_mut().insert(AdminContext {
        admin_id: session.admin_id,
    });

    Ok(next.run(req).await)
}
