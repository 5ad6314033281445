//! 주문 데이터 액세스 계층

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use crate::domain::entities::orders::order::{Order, OrderDetails, OrderStatus};
use crate::errors::errors::AppError;

pub mod order_repo;

/// 주문 저장소 인터페이스
///
/// 조회 메서드는 모두 사용자 ID로 범위가 제한됩니다.
/// 다른 사용자의 주문은 존재하지 않는 것과 같게 `None`으로 보입니다.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert(&self, order: Order) -> Result<Order, AppError>;

    async fn find_for_user(&self, order_id: &ObjectId, user_id: &ObjectId) -> Result<Option<Order>, AppError>;

    /// 사용자의 주문을 결제 정보와 함께 최신순으로 조회합니다.
    async fn list_details_for_user(&self, user_id: &ObjectId) -> Result<Vec<OrderDetails>, AppError>;

    async fn find_details_for_user(
        &self,
        order_id: &ObjectId,
        user_id: &ObjectId,
    ) -> Result<Option<OrderDetails>, AppError>;

    /// 현재 상태가 `from`일 때만 `to`로 전이합니다. 전이했으면 true.
    async fn transition_status(
        &self,
        order_id: &ObjectId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<bool, AppError>;
}
