//! 주문 리포지토리 MongoDB 구현

use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, from_document, oid::ObjectId, DateTime, Document},
    options::IndexOptions,
    Collection, IndexModel,
};
use serde::Deserialize;
use crate::{
    db::Database,
    domain::entities::orders::order::{Order, OrderDetails, OrderStatus},
    domain::entities::payments::payment::Payment,
    repositories::orders::OrderStore,
};
use crate::errors::errors::AppError;

const COLLECTION: &str = "orders";
const PAYMENTS_COLLECTION: &str = "payments";

/// `$lookup` 결과에서 결제 배열만 꺼내기 위한 보조 구조체
#[derive(Deserialize)]
struct JoinedPayments {
    #[serde(default)]
    payments: Vec<Payment>,
}

/// 주문 리포지토리
///
/// - **컬렉션명**: `orders`
/// - **인덱스**: (user_id, created_at desc)
///
/// 상세 조회는 `$lookup`으로 `payments` 컬렉션을 한 번에 결합합니다.
pub struct OrderRepository {
    db: Arc<Database>,
}

impl OrderRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Order> {
        self.db.collection::<Order>(COLLECTION)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("user_id_created_at".to_string())
                .build())
            .build();

        self.collection()
            .create_index(user_index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// `$match` 조건으로 주문을 찾고 결제 목록을 결합합니다.
    async fn aggregate_details(&self, filter: Document) -> Result<Vec<OrderDetails>, AppError> {
        let pipeline = vec![
            doc! { "$match": filter },
            doc! { "$sort": { "created_at": -1 } },
            doc! { "$lookup": {
                "from": PAYMENTS_COLLECTION,
                "localField": "_id",
                "foreignField": "order_id",
                "as": "payments",
            } },
        ];

        let documents: Vec<Document> = self.collection()
            .aggregate(pipeline)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        documents
            .into_iter()
            .map(|document| {
                let joined: JoinedPayments = from_document(document.clone())
                    .map_err(|e| AppError::DatabaseError(e.to_string()))?;
                let order: Order = from_document(document)
                    .map_err(|e| AppError::DatabaseError(e.to_string()))?;
                Ok(OrderDetails { order, payments: joined.payments })
            })
            .collect()
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn insert(&self, order: Order) -> Result<Order, AppError> {
        self.collection()
            .insert_one(&order)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(order)
    }

    async fn find_for_user(&self, order_id: &ObjectId, user_id: &ObjectId) -> Result<Option<Order>, AppError> {
        self.collection()
            .find_one(doc! { "_id": order_id, "user_id": user_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn list_details_for_user(&self, user_id: &ObjectId) -> Result<Vec<OrderDetails>, AppError> {
        self.aggregate_details(doc! { "user_id": user_id }).await
    }

    async fn find_details_for_user(
        &self,
        order_id: &ObjectId,
        user_id: &ObjectId,
    ) -> Result<Option<OrderDetails>, AppError> {
        let mut details = self
            .aggregate_details(doc! { "_id": order_id, "user_id": user_id })
            .await?;

        Ok(details.pop())
    }

    async fn transition_status(
        &self,
        order_id: &ObjectId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<bool, AppError> {
        let result = self.collection()
            .update_one(
                doc! { "_id": order_id, "status": from.as_str() },
                doc! { "$set": { "status": to.as_str(), "updated_at": DateTime::now() } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.modified_count > 0)
    }
}
