//! Token verification port and the `PostgreSQL` session table backend.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tracing::Instrument;

use super::models::Identity;

/// Resolves raw session tokens to identities.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// `Ok(None)` for unknown or expired tokens; `Err` only for infrastructure faults.
    async fn verify(&self, token: &str) -> Result<Option<Identity>>;

    /// Invalidate the session behind `token`.
    ///
    /// Verifiers that do not own session state keep the default no-op.
    async fn revoke(&self, _token: &str) -> Result<()> {
        Ok(())
    }
}

/// Hash a session token so raw values never touch the database.
/// The hash is used for lookups when the cookie is presented.
#[must_use]
pub fn hash_session_token(token: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().to_vec()
}

#[derive(Clone, Debug)]
pub struct PgSessionRepo {
    pool: PgPool,
}

impl PgSessionRepo {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenVerifier for PgSessionRepo {
    async fn verify(&self, token: &str) -> Result<Option<Identity>> {
        let query = r"
            SELECT u.id, u.email, u.name, u.role::text AS role
            FROM user_sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.session_hash = $1
              AND s.expires_at > NOW()
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        sqlx::query_as::<_, Identity>(query)
            .bind(hash_session_token(token))
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to lookup session")
    }

    async fn revoke(&self, token: &str) -> Result<()> {
        let query = "DELETE FROM user_sessions WHERE session_hash = $1";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "DELETE",
            db.statement = query
        );
        sqlx::query(query)
            .bind(hash_session_token(token))
            .execute(&self.pool)
            .instrument(span)
            .await
            .context("failed to delete session")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::hash_session_token;

    #[test]
    fn hash_session_token_stable() {
        let first = hash_session_token("token");
        let second = hash_session_token("token");
        let different = hash_session_token("other");
        assert_eq!(first, second);
        assert_ne!(first, different);
        assert_eq!(first.len(), 32);
    }
}
