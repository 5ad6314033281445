use serde::{Deserialize, Serialize};
use crate::domain::entities::orders::order::OrderStatus;
use crate::domain::entities::payments::payment::PaymentStatus;

/// 체크아웃 생성 응답 DTO
///
/// 클라이언트는 `payment_link`로 이동해 결제를 진행합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub order_id: String,
    pub payment_id: String,
    pub payment_link: String,
}

/// 주문 상태 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusResponse {
    pub order_id: String,
    pub status: OrderStatus,
    /// 가장 최근 결제의 상태
    pub payment_status: Option<PaymentStatus>,
}
