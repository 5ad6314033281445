use serde::{Deserialize, Serialize};
use validator::Validate;

/// 장바구니 항목 추가 요청 DTO
///
/// 이미 담긴 상품이면 수량이 더해집니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddCartItemRequest {
    #[validate(length(equal = 24, message = "유효하지 않은 상품 ID입니다"))]
    pub product_id: String,

    #[validate(range(min = 1, max = 999, message = "수량은 1-999 사이여야 합니다"))]
    pub quantity: u32,
}

/// 장바구니 항목 수량 변경 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCartItemRequest {
    #[validate(range(min = 1, max = 999, message = "수량은 1-999 사이여야 합니다"))]
    pub quantity: u32,
}
