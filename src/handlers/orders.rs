//! 주문 조회 HTTP 핸들러 (액세스 토큰 필요)
use actix_web::{get, web, HttpResponse};
use crate::{
    domain::models::auth::authenticated_user::AuthenticatedUser,
    services::checkout::CheckoutService,
};
use crate::errors::errors::AppError;

#[get("")]
pub async fn list_orders(
    checkout: web::Data<CheckoutService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(checkout.list_orders(&user).await?))
}

#[get("/{order_id}")]
pub async fn get_order(
    checkout: web::Data<CheckoutService>,
    user: AuthenticatedUser,
    order_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(checkout.get_order(&user, &order_id).await?))
}
