//! Product Entity Implementation

use mongodb::bson::{oid::ObjectId, DateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 상품 단가 상한 (1조)
pub const MAX_PRICE: i64 = 1_000_000_000_000;

/// 상품 노출 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
    Draft,
}

/// 상품 엔티티 (`products` 컬렉션)
///
/// 가격은 현재 판매가입니다. 이미 생성된 주문은 체크아웃 시점의 가격을
/// 주문 항목에 복사해 두므로, 이후 가격 변경의 영향을 받지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 등록한 판매자
    pub seller_id: ObjectId,
    pub name: String,
    /// URL 식별자 (unique)
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Decimal,
    pub currency: String,
    #[serde(default)]
    pub status: ProductStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Product {
    pub fn new(
        seller_id: ObjectId,
        name: String,
        slug: String,
        description: Option<String>,
        price: Decimal,
        currency: String,
        status: ProductStatus,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: Some(ObjectId::new()),
            seller_id,
            name,
            slug,
            description,
            price,
            currency,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// 장바구니에 담을 수 있는 상태인지 확인
    pub fn is_purchasable(&self) -> bool {
        self.status == ProductStatus::Active
    }
}
