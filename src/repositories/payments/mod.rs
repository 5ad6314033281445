//! 결제 데이터 액세스 계층

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use crate::domain::entities::payments::payment::{Payment, PaymentStatus};
use crate::errors::errors::AppError;

pub mod payment_repo;

/// 결제 저장소 인터페이스
#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn insert(&self, payment: Payment) -> Result<Payment, AppError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Payment>, AppError>;

    /// 게이트웨이 `tx_ref`로 결제를 찾습니다.
    async fn find_by_provider_ref(&self, provider_ref: &str) -> Result<Option<Payment>, AppError>;

    async fn find_for_user(&self, id: &ObjectId, user_id: &ObjectId) -> Result<Option<Payment>, AppError>;

    /// 사용자의 결제를 최신순으로 조회합니다.
    async fn list_for_user(&self, user_id: &ObjectId) -> Result<Vec<Payment>, AppError>;

    /// `PENDING` 상태일 때만 결제를 확정합니다. 확정했으면 true.
    async fn settle(
        &self,
        id: &ObjectId,
        status: PaymentStatus,
        transaction_id: Option<&str>,
    ) -> Result<bool, AppError>;
}
