//! Coupon storage: the lookup port used by validation and the `PostgreSQL` repo.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::Instrument;

use super::models::{Coupon, NewCoupon};

/// Exact-match lookup on an already normalized (uppercase) code.
#[async_trait]
pub trait CouponLookup: Send + Sync {
    async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>>;
}

/// Admin back-office access to the coupon table.
#[async_trait]
pub trait CouponCatalog: Send + Sync {
    /// All coupons, newest first.
    async fn list(&self) -> Result<Vec<Coupon>>;
    async fn create(&self, coupon: &NewCoupon) -> Result<CreateOutcome>;
}

#[derive(Debug)]
pub enum CreateOutcome {
    Created(Coupon),
    /// Another coupon already uses this code.
    Conflict,
}

#[derive(Clone, Debug)]
pub struct PgCouponRepo {
    pool: PgPool,
}

impl PgCouponRepo {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CouponLookup for PgCouponRepo {
    async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>> {
        let query = r"
            SELECT id, code, is_active, expiry, min_price, max_price,
                discount_type::text AS discount_type, discount_value,
                scope::text AS scope, created_at
            FROM coupons
            WHERE code = $1
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        sqlx::query_as::<_, Coupon>(query)
            .bind(code)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to lookup coupon")
    }
}

#[async_trait]
impl CouponCatalog for PgCouponRepo {
    async fn list(&self) -> Result<Vec<Coupon>> {
        let query = r"
            SELECT id, code, is_active, expiry, min_price, max_price,
                discount_type::text AS discount_type, discount_value,
                scope::text AS scope, created_at
            FROM coupons
            ORDER BY created_at DESC
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        sqlx::query_as::<_, Coupon>(query)
            .fetch_all(&self.pool)
            .instrument(span)
            .await
            .context("failed to list coupons")
    }

    async fn create(&self, coupon: &NewCoupon) -> Result<CreateOutcome> {
        let query = r"
            INSERT INTO coupons
                (code, is_active, expiry, min_price, max_price,
                 discount_type, discount_value, scope)
            VALUES ($1, $2, $3, $4, $5, $6::discount_type, $7, $8::discount_scope)
            RETURNING id, code, is_active, expiry, min_price, max_price,
                discount_type::text AS discount_type, discount_value,
                scope::text AS scope, created_at
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        let result = sqlx::query_as::<_, Coupon>(query)
            .bind(&coupon.code)
            .bind(coupon.is_active)
            .bind(coupon.expiry)
            .bind(coupon.min_price)
            .bind(coupon.max_price)
            .bind(coupon.discount_type.as_str())
            .bind(coupon.discount_value)
            .bind(coupon.scope.as_str())
            .fetch_one(&self.pool)
            .instrument(span)
            .await;

        match result {
            Ok(created) => Ok(CreateOutcome::Created(created)),
            Err(err) if is_unique_violation(&err) => Ok(CreateOutcome::Conflict),
            Err(err) => Err(err).context("failed to insert coupon"),
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}
