//! Shared request state and HTTP-facing configuration.

use std::sync::Arc;

use crate::{
    coupon::{CouponCatalog, CouponValidator},
    session::SessionGate,
};

pub const DEFAULT_SESSION_COOKIE_NAME: &str = "solarent_session";

#[derive(Clone, Debug)]
pub struct ShopConfig {
    frontend_base_url: String,
    session_cookie_name: String,
}

impl ShopConfig {
    #[must_use]
    pub fn new(frontend_base_url: String) -> Self {
        Self {
            frontend_base_url,
            session_cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_string(),
        }
    }

    #[must_use]
    pub fn with_session_cookie_name(mut self, name: String) -> Self {
        self.session_cookie_name = name;
        self
    }

    #[must_use]
    pub fn frontend_base_url(&self) -> &str {
        &self.frontend_base_url
    }

    #[must_use]
    pub fn session_cookie_name(&self) -> &str {
        &self.session_cookie_name
    }

    /// Only mark cookies secure when the frontend is served over HTTPS.
    #[must_use]
    pub fn session_cookie_secure(&self) -> bool {
        self.frontend_base_url.starts_with("https://")
    }
}

/// Everything a handler needs, shared behind an `Arc` extension.
#[derive(Clone)]
pub struct ShopState {
    config: ShopConfig,
    gate: SessionGate,
    coupons: CouponValidator,
    catalog: Arc<dyn CouponCatalog>,
}

impl ShopState {
    #[must_use]
    pub fn new(
        config: ShopConfig,
        gate: SessionGate,
        coupons: CouponValidator,
        catalog: Arc<dyn CouponCatalog>,
    ) -> Self {
        Self {
            config,
            gate,
            coupons,
            catalog,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    #[must_use]
    pub fn gate(&self) -> &SessionGate {
        &self.gate
    }

    #[must_use]
    pub fn coupons(&self) -> &CouponValidator {
        &self.coupons
    }

    #[must_use]
    pub fn catalog(&self) -> &dyn CouponCatalog {
        self.catalog.as_ref()
    }
}
