//! API handlers for Solarent.
//!
//! Coupon and admin handlers resolve the caller through the session gate before
//! touching any coupon state; session and health handlers stand alone.

pub mod admin_coupons;
pub mod coupons;
pub mod health;
pub mod root;
pub mod session;
pub mod types;
