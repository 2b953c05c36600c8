use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, instrument};

use super::{
    error::CouponError,
    models::{Coupon, DiscountDescriptor},
    repo::CouponLookup,
};

/// Normalize a user supplied code for lookup: trim and uppercase.
#[must_use]
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Decides whether a coupon code applies to a cart total.
///
/// Rules run in a fixed order and the first failure is returned:
/// existence, active flag, expiry, minimum total, maximum total.
/// Validation is read-only; nothing is redeemed or counted.
#[derive(Clone)]
pub struct CouponValidator {
    lookup: Arc<dyn CouponLookup>,
}

impl CouponValidator {
    #[must_use]
    pub fn new(lookup: Arc<dyn CouponLookup>) -> Self {
        Self { lookup }
    }

    /// Validate `code` against `cart_total` at the current time.
    ///
    /// # Errors
    /// Returns the first [`CouponError`] rule the coupon violates, or
    /// `LookupFailure` when the store cannot be reached.
    pub async fn validate(
        &self,
        code: &str,
        cart_total: f64,
    ) -> Result<DiscountDescriptor, CouponError> {
        self.validate_at(code, cart_total, Utc::now()).await
    }

    /// Same as [`Self::validate`] with an explicit clock.
    ///
    /// # Errors
    /// See [`Self::validate`].
    #[instrument(skip(self, code), fields(code = %code.trim()))]
    pub async fn validate_at(
        &self,
        code: &str,
        cart_total: f64,
        now: DateTime<Utc>,
    ) -> Result<DiscountDescriptor, CouponError> {
        let normalized = normalize_code(code);
        if normalized.is_empty() {
            return Err(CouponError::NotFound);
        }

        let coupon = match self.lookup.find_by_code(&normalized).await {
            Ok(Some(coupon)) => coupon,
            Ok(None) => return Err(CouponError::NotFound),
            Err(err) => {
                error!("Failed to lookup coupon {normalized}: {err:#}");
                return Err(CouponError::LookupFailure);
            }
        };

        check_rules(&coupon, cart_total, now).inspect_err(|reason| {
            debug!(code = %coupon.code, %reason, "coupon rejected");
        })?;

        Ok(DiscountDescriptor::from(&coupon))
    }
}

fn check_rules(coupon: &Coupon, cart_total: f64, now: DateTime<Utc>) -> Result<(), CouponError> {
    if !coupon.is_active {
        return Err(CouponError::Inactive);
    }

    if coupon.expiry.is_some_and(|expiry| expiry < now) {
        return Err(CouponError::Expired);
    }

    // A NaN total satisfies neither bound.
    if let Some(min_price) = coupon.min_price
        && (cart_total.is_nan() || cart_total < min_price)
    {
        return Err(CouponError::BelowMinimum(min_price));
    }

    if let Some(max_price) = coupon.max_price
        && (cart_total.is_nan() || cart_total > max_price)
    {
        return Err(CouponError::AboveMaximum(max_price));
    }

    Ok(())
}
