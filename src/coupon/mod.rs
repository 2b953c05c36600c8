//! Coupon lookup and validation.
//!
//! [`CouponValidator`] is the single place that decides whether a code can be
//! applied to a cart. Storage is reached through the [`repo::CouponLookup`] trait so
//! checkout handlers and tests share the same rules.

pub mod error;
pub mod models;
pub mod repo;
pub mod service;

pub use error::CouponError;
pub use models::{Coupon, DiscountDescriptor, DiscountScope, DiscountType, NewCoupon};
pub use repo::{CouponCatalog, CouponLookup, CreateOutcome, PgCouponRepo};
pub use service::{CouponValidator, normalize_code};
