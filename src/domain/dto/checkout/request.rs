use serde::{Deserialize, Serialize};
use validator::Validate;

/// 체크아웃 상태 확인 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConfirmCheckoutRequest {
    #[validate(length(min = 1, message = "주문 ID를 입력해주세요"))]
    pub order_id: String,
}
