use thiserror::Error;

/// Why a coupon could not be applied.
///
/// `Display` is the shopper-facing reason. `LookupFailure` is an infrastructure
/// fault and carries no detail; the cause is logged where it is translated.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CouponError {
    #[error("Invalid coupon code")]
    NotFound,
    #[error("This coupon is not active")]
    Inactive,
    #[error("This coupon has expired")]
    Expired,
    #[error("Cart total must be at least {0:.2} to use this coupon")]
    BelowMinimum(f64),
    #[error("Cart total must not exceed {0:.2} to use this coupon")]
    AboveMaximum(f64),
    #[error("Unable to validate coupon right now")]
    LookupFailure,
}

impl CouponError {
    /// `true` for failures caused by the coupon rules rather than infrastructure.
    #[must_use]
    pub const fn is_business_rule(&self) -> bool {
        !matches!(self, Self::LookupFailure)
    }
}
