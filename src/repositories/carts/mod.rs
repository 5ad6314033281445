//! 장바구니 데이터 액세스 계층

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use crate::domain::entities::carts::cart::Cart;
use crate::errors::errors::AppError;

pub mod cart_repo;

/// 장바구니 저장소 인터페이스
///
/// 사용자당 장바구니는 하나이며, 서비스가 수정한 장바구니 전체를 저장합니다.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn find_by_user(&self, user_id: &ObjectId) -> Result<Option<Cart>, AppError>;

    /// 사용자의 장바구니를 통째로 저장합니다 (없으면 생성).
    async fn save(&self, cart: &Cart) -> Result<(), AppError>;
}
