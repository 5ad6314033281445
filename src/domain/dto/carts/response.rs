use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 장바구니 라인에 표시할 상품 요약
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartProductSummary {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub price: Decimal,
    pub currency: String,
}

/// 장바구니 라인 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineResponse {
    pub product: CartProductSummary,
    pub quantity: u32,
    pub line_total: Decimal,
}

/// 장바구니 응답 DTO (현재 가격 기준 합계)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartResponse {
    pub items: Vec<CartLineResponse>,
    pub total: Decimal,
}
