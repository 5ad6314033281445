//! 결제 리포지토리 MongoDB 구현

use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    options::IndexOptions,
    Collection, IndexModel,
};
use crate::{
    db::Database,
    domain::entities::payments::payment::{Payment, PaymentStatus},
    repositories::payments::PaymentStore,
};
use crate::errors::errors::AppError;

const COLLECTION: &str = "payments";

/// 결제 리포지토리
///
/// - **컬렉션명**: `payments`
/// - **인덱스**: provider_ref(unique), order_id, (user_id, created_at desc)
pub struct PaymentRepository {
    db: Arc<Database>,
}

impl PaymentRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Payment> {
        self.db.collection::<Payment>(COLLECTION)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let provider_ref_index = IndexModel::builder()
            .keys(doc! { "provider_ref": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("provider_ref_unique".to_string())
                .build())
            .build();

        let order_index = IndexModel::builder()
            .keys(doc! { "order_id": 1 })
            .options(IndexOptions::builder()
                .name("order_id".to_string())
                .build())
            .build();

        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("user_id_created_at".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([provider_ref_index, order_index, user_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl PaymentStore for PaymentRepository {
    async fn insert(&self, payment: Payment) -> Result<Payment, AppError> {
        self.collection()
            .insert_one(&payment)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(payment)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Payment>, AppError> {
        self.collection()
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_provider_ref(&self, provider_ref: &str) -> Result<Option<Payment>, AppError> {
        self.collection()
            .find_one(doc! { "provider_ref": provider_ref })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_for_user(&self, id: &ObjectId, user_id: &ObjectId) -> Result<Option<Payment>, AppError> {
        self.collection()
            .find_one(doc! { "_id": id, "user_id": user_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn list_for_user(&self, user_id: &ObjectId) -> Result<Vec<Payment>, AppError> {
        self.collection()
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 조건부 상태 전이
    ///
    /// 필터에 `status: PENDING`을 포함하므로 이미 확정된 결제는 바뀌지 않습니다.
    async fn settle(
        &self,
        id: &ObjectId,
        status: PaymentStatus,
        transaction_id: Option<&str>,
    ) -> Result<bool, AppError> {
        let mut set = doc! { "status": status.as_str(), "updated_at": DateTime::now() };
        if let Some(transaction_id) = transaction_id {
            set.insert("transaction_id", transaction_id);
        }

        let result = self.collection()
            .update_one(
                doc! { "_id": id, "status": PaymentStatus::Pending.as_str() },
                doc! { "$set": set },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.modified_count > 0)
    }
}
