//! Payment Entity Implementation

use mongodb::bson::{oid::ObjectId, DateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 결제 상태
///
/// `PENDING`에서 `SUCCESS` 또는 `FAILED`로 한 번만 전이됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Success => "SUCCESS",
            PaymentStatus::Failed => "FAILED",
        }
    }
}

/// 결제 제공자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentProvider {
    Flutterwave,
}

/// 결제 엔티티 (`payments` 컬렉션)
///
/// `provider_ref`는 게이트웨이에 `tx_ref`로 전달되는 값이며 결제 ID의 hex 문자열과 같습니다.
/// 웹훅은 이 값으로 결제를 찾습니다. `order_id`는 생성 후 바뀌지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub order_id: ObjectId,
    pub user_id: ObjectId,
    pub provider: PaymentProvider,
    pub provider_ref: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: PaymentStatus,
    /// 게이트웨이가 부여한 거래 ID (웹훅 수신 후 기록)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Payment {
    /// 주문에 대한 `PENDING` Flutterwave 결제를 만듭니다.
    pub fn pending(order_id: ObjectId, user_id: ObjectId, amount: Decimal, currency: String) -> Self {
        let id = ObjectId::new();
        let now = DateTime::now();

        Self {
            id: Some(id),
            order_id,
            user_id,
            provider: PaymentProvider::Flutterwave,
            provider_ref: id.to_hex(),
            amount,
            currency,
            status: PaymentStatus::Pending,
            transaction_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_ref_is_own_id() {
        let payment = Payment::pending(ObjectId::new(), ObjectId::new(), Decimal::ONE, "USD".to_string());

        assert_eq!(Some(payment.provider_ref.clone()), payment.id.map(|id| id.to_hex()));
        assert_eq!(payment.status, PaymentStatus::Pending);
    }
}
