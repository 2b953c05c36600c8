//! # Solarent (Storefront API)
//!
//! `solarent` is the backend of a rental storefront for renewable-energy equipment.
//! Most of the storefront is plain CRUD against `PostgreSQL`; this crate owns the two
//! pieces with real decision logic and the HTTP surface around them.
//!
//! ## Coupons
//!
//! Coupon codes are case-insensitive. Codes are stored uppercase and every lookup
//! normalizes the user input the same way. A coupon is checked in a fixed order
//! (existence, active flag, expiry, minimum cart total, maximum cart total) and the
//! first failing rule is the one reported to the shopper. Validation never writes
//! to the coupon record.
//!
//! ## Sessions
//!
//! Sessions are created by the login flow and carried as an opaque token in the
//! `Authorization: Bearer` header or the session cookie. Only the SHA-256 hash of a
//! token is stored. Each request resolves its identity once through the
//! [`session::SessionGate`] and passes it explicitly to whatever runs next.
//!
//! - **401** when no valid session is presented.
//! - **403** when the session is valid but the route needs the `ADMIN` role.

pub mod api;
pub mod cli;
pub mod coupon;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
