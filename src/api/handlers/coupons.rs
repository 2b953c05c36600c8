use axum::{
    Json,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{
    session::require_identity,
    types::{ValidateCouponRequest, ValidateCouponResponse},
};
use crate::{
    api::state::ShopState,
    coupon::{CouponError, DiscountScope},
};

impl IntoResponse for CouponError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Inactive | Self::Expired | Self::BelowMinimum(_) | Self::AboveMaximum(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            // Already logged by the validator.
            Self::LookupFailure => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

#[utoipa::path(
    post,
    path = "/v1/coupons/validate",
    request_body = ValidateCouponRequest,
    responses(
        (status = 200, description = "Coupon applies to this cart", body = ValidateCouponResponse),
        (status = 400, description = "Invalid cart total"),
        (status = 401, description = "Missing or invalid session"),
        (status = 404, description = "Unknown coupon code"),
        (status = 422, description = "Coupon rules not met"),
        (status = 500, description = "Coupon lookup unavailable")
    ),
    tag = "coupons"
)]
pub async fn validate_coupon(
    headers: HeaderMap,
    state: Extension<Arc<ShopState>>,
    Json(request): Json<ValidateCouponRequest>,
) -> impl IntoResponse {
    if let Err(err) = require_identity(&headers, &state, None).await {
        return err.into_response();
    }

    if !request.cart_total.is_finite() || request.cart_total < 0.0 {
        return (
            StatusCode::BAD_REQUEST,
            "Cart total must be a non-negative number.",
        )
            .into_response();
    }

    match state.coupons().validate(&request.code, request.cart_total).await {
        Ok(discount) => {
            let cart_discount = (discount.scope == DiscountScope::Cart)
                .then(|| discount.amount_off(request.cart_total));
            let response = ValidateCouponResponse {
                discount,
                cart_discount,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
