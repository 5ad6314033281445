//! 장바구니 리포지토리 MongoDB 구현

use std::sync::Arc;
use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    Collection, IndexModel,
};
use crate::{
    db::Database,
    domain::entities::carts::cart::Cart,
    repositories::carts::CartStore,
};
use crate::errors::errors::AppError;

const COLLECTION: &str = "carts";

/// 장바구니 리포지토리
///
/// - **컬렉션명**: `carts`
/// - **인덱스**: user_id(unique)
pub struct CartRepository {
    db: Arc<Database>,
}

impl CartRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Cart> {
        self.db.collection::<Cart>(COLLECTION)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("user_id_unique".to_string())
                .build())
            .build();

        self.collection()
            .create_index(user_index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl CartStore for CartRepository {
    async fn find_by_user(&self, user_id: &ObjectId) -> Result<Option<Cart>, AppError> {
        self.collection()
            .find_one(doc! { "user_id": user_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn save(&self, cart: &Cart) -> Result<(), AppError> {
        self.collection()
            .replace_one(doc! { "user_id": cart.user_id }, cart)
            .upsert(true)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
