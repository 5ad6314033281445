//! 결제 HTTP 핸들러
//!
//! - `POST /api/v1/payments/webhook` - Flutterwave 웹훅 (`verif-hash` 헤더로 인증)
//! - `POST /api/v1/payments/verify?txId=...` - 게이트웨이 거래 검증 (액세스 토큰 필요)
//! - `GET /api/v1/payments`, `GET /api/v1/payments/{id}` - 액세스 토큰 필요
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use crate::{
    domain::dto::payments::request::{FlutterwaveWebhook, VerifyTransactionQuery},
    domain::models::auth::authenticated_user::AuthenticatedUser,
    middlewares::AuthMiddleware,
    services::{checkout::CheckoutService, payments::PaymentService},
};
use crate::errors::errors::AppError;

const WEBHOOK_HASH_HEADER: &str = "verif-hash";

/// 결제 웹훅 수신
///
/// 본문 파싱 전에 서명 헤더를 먼저 확인합니다.
#[post("/webhook")]
pub async fn webhook(
    req: HttpRequest,
    checkout: web::Data<CheckoutService>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let presented = req.headers()
        .get(WEBHOOK_HASH_HEADER)
        .and_then(|h| h.to_str().ok());
    checkout.verify_webhook_signature(presented)?;

    let payload: FlutterwaveWebhook = serde_json::from_slice(&body)
        .map_err(|e| AppError::ValidationError(format!("웹훅 본문 형식 오류: {}", e)))?;

    let ack = checkout.handle_webhook(payload).await?;
    Ok(HttpResponse::Ok().json(ack))
}

/// 웹훅이 오지 않은 결제를 게이트웨이 거래 ID로 확인합니다.
#[post("/verify", wrap = "AuthMiddleware::required()")]
pub async fn verify_transaction(
    checkout: web::Data<CheckoutService>,
    user: AuthenticatedUser,
    query: web::Query<VerifyTransactionQuery>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(checkout.verify_transaction(&user, &query.tx_id).await?))
}

#[get("", wrap = "AuthMiddleware::required()")]
pub async fn list_payments(
    payments: web::Data<PaymentService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(payments.list_payments(&user).await?))
}

#[get("/{payment_id}", wrap = "AuthMiddleware::required()")]
pub async fn get_payment(
    payments: web::Data<PaymentService>,
    user: AuthenticatedUser,
    payment_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(payments.get_payment(&user, &payment_id).await?))
}
