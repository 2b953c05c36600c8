//! Checkout-facing coupon behavior through the public API.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use solarent::coupon::{
    Coupon, CouponError, CouponLookup, CouponValidator, DiscountDescriptor, DiscountScope,
    DiscountType,
};
use std::sync::Arc;
use uuid::Uuid;

struct Catalog(Vec<Coupon>);

#[async_trait]
impl CouponLookup for Catalog {
    async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>> {
        Ok(self.0.iter().find(|coupon| coupon.code == code).cloned())
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn coupon(code: &str) -> Coupon {
    Coupon {
        id: Uuid::new_v4(),
        code: code.to_string(),
        is_active: true,
        expiry: Some(now() + Duration::days(7)),
        min_price: None,
        max_price: None,
        discount_type: DiscountType::Percentage,
        discount_value: 10.0,
        scope: DiscountScope::Cart,
        created_at: now() - Duration::days(30),
    }
}

fn validator() -> CouponValidator {
    let save10 = Coupon {
        min_price: Some(50.0),
        ..coupon("SAVE10")
    };
    let paused = Coupon {
        is_active: false,
        ..coupon("PAUSED")
    };
    let lapsed = Coupon {
        expiry: Some(now() - Duration::hours(1)),
        min_price: Some(10.0),
        max_price: Some(1_000.0),
        ..coupon("LAPSED")
    };
    let retired = Coupon {
        is_active: false,
        expiry: Some(now() - Duration::days(365)),
        ..coupon("RETIRED")
    };
    let capped = Coupon {
        max_price: Some(200.0),
        discount_type: DiscountType::Fixed,
        discount_value: 15.0,
        scope: DiscountScope::Item,
        ..coupon("CAPPED")
    };
    CouponValidator::new(Arc::new(Catalog(vec![
        save10, paused, lapsed, retired, capped,
    ])))
}

#[tokio::test]
async fn inactive_coupon_is_rejected_for_any_total() {
    let validator = validator();
    for total in [0.0, 60.0, 10_000.0] {
        assert_eq!(
            validator.validate_at("PAUSED", total, now()).await,
            Err(CouponError::Inactive)
        );
    }
}

#[tokio::test]
async fn expired_coupon_is_rejected_even_within_bounds() {
    assert_eq!(
        validator().validate_at("LAPSED", 100.0, now()).await,
        Err(CouponError::Expired)
    );
}

#[tokio::test]
async fn totals_outside_bounds_are_rejected() {
    let validator = validator();
    assert_eq!(
        validator.validate_at("SAVE10", 49.99, now()).await,
        Err(CouponError::BelowMinimum(50.0))
    );
    assert_eq!(
        validator.validate_at("CAPPED", 200.01, now()).await,
        Err(CouponError::AboveMaximum(200.0))
    );
}

#[tokio::test]
async fn codes_are_case_insensitive() {
    let validator = validator();
    let lower = validator.validate_at("save10", 75.0, now()).await;
    let upper = validator.validate_at("SAVE10", 75.0, now()).await;
    assert!(lower.is_ok());
    assert_eq!(lower, upper);
}

#[tokio::test]
async fn inactive_wins_over_expired() {
    assert_eq!(
        validator().validate_at("RETIRED", 60.0, now()).await,
        Err(CouponError::Inactive)
    );
}

#[tokio::test]
async fn validation_is_idempotent() {
    let validator = validator();
    let first = validator.validate_at("CAPPED", 120.0, now()).await;
    let second = validator.validate_at("CAPPED", 120.0, now()).await;
    assert!(first.is_ok());
    assert_eq!(first, second);
}

#[tokio::test]
async fn save10_checkout_scenario() {
    let validator = validator();
    assert_eq!(
        validator.validate_at("SAVE10", 40.0, now()).await,
        Err(CouponError::BelowMinimum(50.0))
    );

    let descriptor = validator.validate_at("SAVE10", 60.0, now()).await;
    assert_eq!(
        descriptor,
        Ok(DiscountDescriptor {
            code: "SAVE10".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: 10.0,
            scope: DiscountScope::Cart,
        })
    );
    assert!(descriptor.is_ok_and(|descriptor| (descriptor.amount_off(60.0) - 6.0).abs() < f64::EPSILON));
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    assert_eq!(
        validator().validate_at("NOPE", 60.0, now()).await,
        Err(CouponError::NotFound)
    );
}

#[tokio::test]
async fn non_numeric_total_never_satisfies_bounds() {
    let validator = validator();
    assert_eq!(
        validator.validate_at("save10", f64::NAN, now()).await,
        Err(CouponError::BelowMinimum(50.0))
    );
    assert_eq!(
        validator.validate_at("CAPPED", f64::NAN, now()).await,
        Err(CouponError::AboveMaximum(200.0))
    );
}
