//! Request/response types for the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    coupon::{DiscountDescriptor, DiscountScope, DiscountType},
    session::{Identity, Role},
};

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SessionResponse {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl From<Identity> for SessionResponse {
    fn from(identity: Identity) -> Self {
        Self {
            user_id: identity.id.to_string(),
            email: identity.email,
            name: identity.name,
            role: identity.role,
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ValidateCouponRequest {
    pub code: String,
    pub cart_total: f64,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ValidateCouponResponse {
    #[serde(flatten)]
    pub discount: DiscountDescriptor,
    /// Amount taken off the cart total; only present for cart-wide coupons.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_discount: Option<f64>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct CreateCouponRequest {
    pub code: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    #[serde(default)]
    pub scope: DiscountScope,
}

const fn default_active() -> bool {
    true
}
