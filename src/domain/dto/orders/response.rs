use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::domain::dto::payments::PaymentResponse;
use crate::domain::dto::to_utc;
use crate::domain::entities::orders::order::{OrderDetails, OrderItem, OrderStatus};

/// 주문 항목 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemResponse {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        // 주문 생성 시 합계 검증을 통과한 항목이므로 범위를 넘지 않습니다
        let line_total = item.line_total().unwrap_or_default();
        Self {
            product_id: item.product_id.to_hex(),
            product_name: item.product_name,
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total,
        }
    }
}

/// 주문 상세 응답 DTO (항목 + 결제 포함)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub currency: String,
    pub items: Vec<OrderItemResponse>,
    pub payments: Vec<PaymentResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrderDetails> for OrderResponse {
    fn from(details: OrderDetails) -> Self {
        let OrderDetails { order, payments } = details;

        Self {
            id: order.id.map(|id| id.to_hex()).unwrap_or_default(),
            status: order.status,
            total_amount: order.total_amount,
            currency: order.currency,
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            payments: payments.into_iter().map(PaymentResponse::from).collect(),
            created_at: to_utc(&order.created_at),
            updated_at: to_utc(&order.updated_at),
        }
    }
}
