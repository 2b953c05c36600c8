//! Back-office coupon management, restricted to `ADMIN` sessions.

use axum::{
    Json,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use regex::Regex;
use std::sync::Arc;
use tracing::{error, info};

use super::{session::require_identity, types::CreateCouponRequest};
use crate::{
    api::state::ShopState,
    coupon::{Coupon, CreateOutcome, DiscountType, NewCoupon, normalize_code},
    session::Role,
};

#[derive(Debug)]
enum AdminCouponError {
    BadRequest(&'static str),
    Conflict(&'static str),
    Storage(anyhow::Error),
}

impl IntoResponse for AdminCouponError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            Self::Conflict(message) => (StatusCode::CONFLICT, message).into_response(),
            Self::Storage(err) => {
                error!("Coupon storage error: {err:#}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

#[utoipa::path(
    get,
    path = "/v1/admin/coupons",
    responses(
        (status = 200, description = "All coupons, newest first", body = [Coupon]),
        (status = 401, description = "Missing or invalid session"),
        (status = 403, description = "Admin role required"),
        (status = 500, description = "Storage or session failure")
    ),
    tag = "admin"
)]
pub async fn list_coupons(headers: HeaderMap, state: Extension<Arc<ShopState>>) -> impl IntoResponse {
    if let Err(err) = require_identity(&headers, &state, Some(Role::Admin)).await {
        return err.into_response();
    }

    match state.catalog().list().await {
        Ok(coupons) => (StatusCode::OK, Json(coupons)).into_response(),
        Err(err) => AdminCouponError::Storage(err).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/v1/admin/coupons",
    request_body = CreateCouponRequest,
    responses(
        (status = 201, description = "Coupon created", body = Coupon),
        (status = 400, description = "Invalid coupon definition"),
        (status = 401, description = "Missing or invalid session"),
        (status = 403, description = "Admin role required"),
        (status = 409, description = "Coupon code already exists"),
        (status = 500, description = "Storage or session failure")
    ),
    tag = "admin"
)]
pub async fn create_coupon(
    headers: HeaderMap,
    state: Extension<Arc<ShopState>>,
    Json(request): Json<CreateCouponRequest>,
) -> impl IntoResponse {
    let admin = match require_identity(&headers, &state, Some(Role::Admin)).await {
        Ok(identity) => identity,
        Err(err) => return err.into_response(),
    };

    let coupon = match new_coupon_from_request(request) {
        Ok(coupon) => coupon,
        Err(err) => return err.into_response(),
    };

    match state.catalog().create(&coupon).await {
        Ok(CreateOutcome::Created(created)) => {
            info!(code = %created.code, admin = %admin.id, "Coupon created");
            (StatusCode::CREATED, Json(created)).into_response()
        }
        Ok(CreateOutcome::Conflict) => {
            AdminCouponError::Conflict("Coupon code already exists.").into_response()
        }
        Err(err) => AdminCouponError::Storage(err).into_response(),
    }
}

fn valid_code(code: &str) -> bool {
    Regex::new(r"^[A-Z0-9_-]{3,32}$").is_ok_and(|regex| regex.is_match(code))
}

fn valid_bound(bound: Option<f64>) -> bool {
    bound.is_none_or(|value| value.is_finite() && value >= 0.0)
}

fn new_coupon_from_request(request: CreateCouponRequest) -> Result<NewCoupon, AdminCouponError> {
    let code = normalize_code(&request.code);
    if !valid_code(&code) {
        return Err(AdminCouponError::BadRequest(
            "Coupon code must be 3-32 characters of A-Z, 0-9, '_' or '-'.",
        ));
    }

    let value = request.discount_value;
    if !value.is_finite() || value <= 0.0 {
        return Err(AdminCouponError::BadRequest(
            "Discount value must be greater than zero.",
        ));
    }
    if request.discount_type == DiscountType::Percentage && value > 100.0 {
        return Err(AdminCouponError::BadRequest(
            "Percentage discounts cannot exceed 100.",
        ));
    }

    if !valid_bound(request.min_price) || !valid_bound(request.max_price) {
        return Err(AdminCouponError::BadRequest(
            "Price bounds must be non-negative numbers.",
        ));
    }
    if let (Some(min), Some(max)) = (request.min_price, request.max_price)
        && min > max
    {
        return Err(AdminCouponError::BadRequest(
            "Minimum price cannot exceed maximum price.",
        ));
    }

    Ok(NewCoupon {
        code,
        is_active: request.is_active,
        expiry: request.expiry,
        min_price: request.min_price,
        max_price: request.max_price,
        discount_type: request.discount_type,
        discount_value: value,
        scope: request.scope,
    })
}
