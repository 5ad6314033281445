use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::domain::dto::to_utc;
use crate::domain::entities::orders::order::OrderStatus;
use crate::domain::entities::payments::payment::{Payment, PaymentProvider, PaymentStatus};

/// 결제 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub id: String,
    pub order_id: String,
    pub provider: PaymentProvider,
    pub provider_ref: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id.map(|id| id.to_hex()).unwrap_or_default(),
            order_id: payment.order_id.to_hex(),
            provider: payment.provider,
            provider_ref: payment.provider_ref,
            amount: payment.amount,
            currency: payment.currency,
            status: payment.status,
            transaction_id: payment.transaction_id,
            created_at: to_utc(&payment.created_at),
            updated_at: to_utc(&payment.updated_at),
        }
    }
}

/// 웹훅 처리 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookAck {
    pub payment_id: String,
    pub payment_status: PaymentStatus,
    pub order_status: Option<OrderStatus>,
}

/// 거래 검증 결과
///
/// 게이트웨이가 확인한 거래 정보와, 반영 후의 결제/주문 상태를 함께 돌려줍니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentVerificationResponse {
    pub transaction_id: String,
    pub tx_ref: String,
    pub gateway_status: String,
    pub amount: Decimal,
    pub currency: String,
    pub payment_status: PaymentStatus,
    pub order_status: Option<OrderStatus>,
}
