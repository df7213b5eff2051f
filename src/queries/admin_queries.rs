use chrono::{Duration, Utc};
use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::Result,
    models::{AdminSession, AdminUser},
};

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<AdminUser>> {
    let admin = sqlx::query_as::<_, AdminUser>("SELECT * FROM admin_users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(admin)
}

pub async fn create_admin(pool: &PgPool, email: &str, password_hash: &str) -> Result<AdminUser> {
    let admin = sqlx::query_as::<_, AdminUser>(
        r#"
        INSERT INTO admin_users (id, email, password_hash)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(admin)
}

/// Open a new session for an admin. Returns the session token the cookie
/// will carry.
pub async fn create_session(pool: &PgPool, admin_id: Uuid, ttl_hours: i64) -> Result<String> {
    let token = generate_token();
    let expires_at = Utc::now() + Duration::hours(ttl_hours);

    sqlx::query(
        r#"
        INSERT INTO admin_sessions (id, admin_id, token, expires_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(admin_id)
    .bind(&token)
    .bind(expires_at)
    .execute(pool)
    .await?;

    Ok(token)
}

/// Look up a session by token; expired sessions are treated as absent.
pub async fn find_session(pool: &PgPool, token: &str) -> Result<Option<AdminSession>> {
    let session = sqlx::query_as::<_, AdminSession>(
        "SELECT * FROM admin_sessions WHERE token = $1 AND expires_at > NOW()",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

pub async fn delete_session(pool: &PgPool, token: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM admin_sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete_expired_sessions(pool: &PgPool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM admin_sessions WHERE expires_at <= NOW()")
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Cryptographically random 32-byte hex token.
fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_token_is_64_hex_chars() {
        let token = generate_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generate_token_is_unique() {
        let t1 = generate_token();
        let t2 = generate_token();
        assert_ne!(t1, t2);
    }
}
