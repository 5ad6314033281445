//! Order Entity Implementation

use mongodb::bson::{oid::ObjectId, DateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::domain::entities::payments::payment::Payment;
use crate::errors::errors::AppError;

/// 주문 상태
///
/// `PENDING`에서 `PAID` 또는 `FAILED`로 한 번만 전이됩니다.
/// 전이는 결제 웹훅 처리에서만 일어납니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Paid,
    Failed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Failed => "FAILED",
        }
    }
}

/// 주문 항목 (체크아웃 시점의 상품 정보 스냅샷)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ObjectId,
    pub product_name: String,
    pub quantity: u32,
    /// 체크아웃 시점의 단가
    pub unit_price: Decimal,
}

impl OrderItem {
    /// `quantity × unit_price`. 표현 범위를 넘으면 None.
    pub fn line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }
}

/// 금액 목록의 합계. 항목 하나라도 없거나 합이 범위를 넘으면 None.
pub fn checked_sum<I>(amounts: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Option<Decimal>>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount?))
}

/// 주문 엔티티 (`orders` 컬렉션)
///
/// `total_amount`는 항상 `Σ quantity × unit_price`입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    pub currency: String,
    pub status: OrderStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Order {
    /// 항목으로부터 합계를 계산해 `PENDING` 주문을 만듭니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 합계가 금액 표현 범위를 넘음
    pub fn pending(user_id: ObjectId, items: Vec<OrderItem>, currency: String) -> Result<Self, AppError> {
        let now = DateTime::now();
        let total_amount = checked_sum(items.iter().map(OrderItem::line_total))
            .ok_or_else(|| AppError::ValidationError("주문 금액이 허용 범위를 넘었습니다".to_string()))?;

        Ok(Self {
            id: Some(ObjectId::new()),
            user_id,
            items,
            total_amount,
            currency,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }
}

/// 주문과 그 주문에 연결된 결제 목록
///
/// 리포지토리가 명시적으로 조립해서 반환합니다.
#[derive(Debug, Clone)]
pub struct OrderDetails {
    pub order: Order,
    pub payments: Vec<Payment>,
}
