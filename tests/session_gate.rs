//! Role gating through the public session API.

use anyhow::Result;
use async_trait::async_trait;
use solarent::session::{AuthError, Identity, Role, SessionGate, TokenVerifier};
use std::sync::Arc;
use uuid::Uuid;

struct TwoSessions {
    user: Identity,
    admin: Identity,
}

#[async_trait]
impl TokenVerifier for TwoSessions {
    async fn verify(&self, token: &str) -> Result<Option<Identity>> {
        Ok(match token {
            "u-123" => Some(self.user.clone()),
            "a-456" => Some(self.admin.clone()),
            _ => None,
        })
    }
}

fn identity(name: &str, role: Role) -> Identity {
    Identity {
        id: Uuid::new_v4(),
        email: format!("{}@solarent.dev", name.to_lowercase()),
        name: name.to_string(),
        role,
    }
}

fn gate() -> (SessionGate, Identity) {
    let admin = identity("Ops", Role::Admin);
    let verifier = TwoSessions {
        user: identity("Renter", Role::User),
        admin: admin.clone(),
    };
    (SessionGate::new(Arc::new(verifier)), admin)
}

#[tokio::test]
async fn no_token_is_unauthenticated() {
    let (gate, _) = gate();
    assert_eq!(
        gate.authorize(None, Some(Role::Admin)).await,
        Err(AuthError::Unauthenticated)
    );
}

#[tokio::test]
async fn user_is_forbidden_from_admin_routes() {
    let (gate, _) = gate();
    assert_eq!(
        gate.authorize(Some("u-123"), Some(Role::Admin)).await,
        Err(AuthError::Forbidden)
    );
    assert!(gate.authorize(Some("u-123"), None).await.is_ok());
}

#[tokio::test]
async fn admin_passes_admin_routes() {
    let (gate, admin) = gate();
    assert_eq!(
        gate.authorize(Some("a-456"), Some(Role::Admin)).await,
        Ok(admin)
    );
}
