use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Row, postgres::PgRow};
use utoipa::ToSchema;
use uuid::Uuid;

/// How `discount_value` is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// `discount_value` is a percentage of the base amount.
    Percentage,
    /// `discount_value` is an absolute amount.
    Fixed,
}

impl DiscountType {
    /// Canonical value, matching the `discount_type` enum in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "PERCENTAGE",
            Self::Fixed => "FIXED",
        }
    }

    fn from_db(value: &str) -> Result<Self, sqlx::Error> {
        match value {
            "PERCENTAGE" => Ok(Self::Percentage),
            "FIXED" => Ok(Self::Fixed),
            _ => Err(invalid_column("coupons.discount_type", value)),
        }
    }
}

/// Whether a discount targets a single line item or the whole cart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountScope {
    Item,
    #[default]
    Cart,
}

impl DiscountScope {
    /// Canonical value, matching the `discount_scope` enum in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Item => "ITEM",
            Self::Cart => "CART",
        }
    }

    fn from_db(value: &str) -> Result<Self, sqlx::Error> {
        match value {
            "ITEM" => Ok(Self::Item),
            "CART" => Ok(Self::Cart),
            _ => Err(invalid_column("coupons.scope", value)),
        }
    }
}

fn invalid_column(column: &str, value: &str) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        format!("invalid {column} value: {value}"),
    )))
}

/// A coupon row as stored in `coupons`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coupon {
    pub id: Uuid,
    /// Stored uppercase.
    pub code: String,
    pub is_active: bool,
    pub expiry: Option<DateTime<Utc>>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub scope: DiscountScope,
    pub created_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for Coupon {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let discount_type: String = row.try_get("discount_type")?;
        let scope: String = row.try_get("scope")?;
        Ok(Self {
            id: row.try_get("id")?,
            code: row.try_get("code")?,
            is_active: row.try_get("is_active")?,
            expiry: row.try_get("expiry")?,
            min_price: row.try_get("min_price")?,
            max_price: row.try_get("max_price")?,
            discount_type: DiscountType::from_db(&discount_type)?,
            discount_value: row.try_get("discount_value")?,
            scope: DiscountScope::from_db(&scope)?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Validated input for inserting a coupon from the admin back office.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCoupon {
    pub code: String,
    pub is_active: bool,
    pub expiry: Option<DateTime<Utc>>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub scope: DiscountScope,
}

/// Outcome of a successful coupon validation.
///
/// Carries enough for a caller to compute the reduction; `code` is the stored
/// spelling, not the user's input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiscountDescriptor {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub scope: DiscountScope,
}

impl DiscountDescriptor {
    /// Amount to subtract from `base`, clamped to `[0, base]`.
    #[must_use]
    pub fn amount_off(&self, base: f64) -> f64 {
        let base = base.max(0.0);
        let raw = match self.discount_type {
            DiscountType::Percentage => base * self.discount_value / 100.0,
            DiscountType::Fixed => self.discount_value,
        };
        raw.clamp(0.0, base)
    }
}

impl From<&Coupon> for DiscountDescriptor {
    fn from(coupon: &Coupon) -> Self {
        Self {
            code: coupon.code.clone(),
            discount_type: coupon.discount_type,
            discount_value: coupon.discount_value,
            scope: coupon.scope,
        }
    }
}
