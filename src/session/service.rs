use anyhow::Result;
use std::sync::Arc;
use tracing::{error, instrument};

use super::{
    error::AuthError,
    models::{Identity, Role},
    repo::TokenVerifier,
};

/// Turns an optional raw token into an [`Identity`], enforcing an optional role.
#[derive(Clone)]
pub struct SessionGate {
    verifier: Arc<dyn TokenVerifier>,
}

impl SessionGate {
    #[must_use]
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }

    /// Authorize the caller behind `token`.
    ///
    /// With `required_role = None` any live session passes.
    ///
    /// # Errors
    /// `Unauthenticated` for a missing, empty, or unknown token, `Forbidden` on a
    /// role mismatch, `VerificationFailure` when the verifier faults.
    #[instrument(skip(self, token))]
    pub async fn authorize(
        &self,
        token: Option<&str>,
        required_role: Option<Role>,
    ) -> Result<Identity, AuthError> {
        let Some(token) = token.filter(|token| !token.trim().is_empty()) else {
            return Err(AuthError::Unauthenticated);
        };

        let identity = match self.verifier.verify(token).await {
            Ok(Some(identity)) => identity,
            Ok(None) => return Err(AuthError::Unauthenticated),
            Err(err) => {
                error!("Failed to verify session: {err:#}");
                return Err(AuthError::VerificationFailure);
            }
        };

        if required_role.is_some_and(|role| role != identity.role) {
            return Err(AuthError::Forbidden);
        }

        Ok(identity)
    }

    /// Invalidate the session behind `token` in the underlying verifier.
    ///
    /// # Errors
    /// Returns an error if the verifier fails to revoke the session.
    pub async fn revoke(&self, token: &str) -> Result<()> {
        self.verifier.revoke(token).await
    }
}
