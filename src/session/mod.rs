//! Session resolution and role gating.
//!
//! Flow Overview: the request layer extracts the raw token (bearer header or
//! cookie), hands it to [`SessionGate::authorize`] together with the role the
//! route needs, and threads the returned [`Identity`] through the handler.
//! Verification is delegated to a [`TokenVerifier`]: the `PostgreSQL` session table
//! by default, or a remote session service when one is configured.

pub mod error;
pub mod models;
pub mod remote;
pub mod repo;
pub mod service;

pub use error::AuthError;
pub use models::{Identity, Role};
pub use remote::RemoteTokenVerifier;
pub use repo::{PgSessionRepo, TokenVerifier, hash_session_token};
pub use service::SessionGate;
