//! 체크아웃 HTTP 핸들러 (액세스 토큰 필요)
use actix_web::{post, web, HttpResponse};
use validator::Validate;
use crate::{
    domain::dto::checkout::request::ConfirmCheckoutRequest,
    domain::models::auth::authenticated_user::AuthenticatedUser,
    services::checkout::CheckoutService,
};
use crate::errors::errors::AppError;

/// 장바구니로 주문과 결제를 만들고 결제 링크를 반환합니다.
///
/// # Endpoint
/// `POST /api/v1/checkout`
#[post("")]
pub async fn create_checkout(
    checkout: web::Data<CheckoutService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = checkout.create_checkout(&user).await?;
    Ok(HttpResponse::Created().json(response))
}

#[post("/confirm")]
pub async fn confirm_checkout(
    checkout: web::Data<CheckoutService>,
    user: AuthenticatedUser,
    payload: web::Json<ConfirmCheckoutRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let status = checkout.confirm_checkout(&user, &payload.order_id).await?;
    Ok(HttpResponse::Ok().json(status))
}
