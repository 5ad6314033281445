//! 상품 리포지토리 MongoDB 구현

use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, to_bson, DateTime, Document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use crate::{
    db::Database,
    domain::entities::products::product::Product,
    repositories::products::{ProductSearch, ProductStore, ProductUpdate},
};
use crate::errors::errors::{is_duplicate_key, AppError};

const COLLECTION: &str = "products";

/// 상품 리포지토리
///
/// - **컬렉션명**: `products`
/// - **인덱스**: slug(unique), (status, created_at desc)
pub struct ProductRepository {
    db: Arc<Database>,
}

impl ProductRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Product> {
        self.db.collection::<Product>(COLLECTION)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let slug_index = IndexModel::builder()
            .keys(doc! { "slug": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("slug_unique".to_string())
                .build())
            .build();

        let listing_index = IndexModel::builder()
            .keys(doc! { "status": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("status_created_at".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([slug_index, listing_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

/// 사용자 입력을 정규식 리터럴로 쓰기 위해 메타 문자를 이스케이프합니다.
fn escape_regex(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if "\\.^$|?*+()[]{}/-".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 검색 조건을 MongoDB 필터로 변환합니다.
///
/// 가격은 문자열로 저장되므로 `$toDecimal`로 변환해서 비교합니다.
fn search_filter(search: &ProductSearch) -> Document {
    let mut filter = doc! { "status": "ACTIVE" };

    if let Some(ref keyword) = search.keyword {
        let pattern = escape_regex(keyword);
        filter.insert("$or", vec![
            doc! { "name": { "$regex": &pattern, "$options": "i" } },
            doc! { "description": { "$regex": &pattern, "$options": "i" } },
        ]);
    }

    let mut bounds = Vec::new();
    if let Some(min) = search.min_price {
        bounds.push(doc! { "$gte": [{ "$toDecimal": "$price" }, { "$toDecimal": min.to_string() }] });
    }
    if let Some(max) = search.max_price {
        bounds.push(doc! { "$lte": [{ "$toDecimal": "$price" }, { "$toDecimal": max.to_string() }] });
    }
    if !bounds.is_empty() {
        filter.insert("$expr", doc! { "$and": bounds });
    }

    filter
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn insert(&self, product: Product) -> Result<Product, AppError> {
        self.collection()
            .insert_one(&product)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError("이미 사용 중인 slug입니다".to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        Ok(product)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Product>, AppError> {
        self.collection()
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_many(&self, ids: &[ObjectId]) -> Result<Vec<Product>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.collection()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn list_active(&self) -> Result<Vec<Product>, AppError> {
        self.collection()
            .find(doc! { "status": "ACTIVE" })
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn search(&self, search: &ProductSearch) -> Result<(Vec<Product>, u64), AppError> {
        let filter = search_filter(search);

        let total = self.collection()
            .count_documents(filter.clone())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let limit = i64::try_from(search.limit).unwrap_or(i64::MAX);
        let products = self.collection()
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .skip(search.skip)
            .limit(limit)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok((products, total))
    }

    async fn update(&self, id: &ObjectId, update: &ProductUpdate) -> Result<Option<Product>, AppError> {
        let mut set = doc! { "updated_at": DateTime::now() };
        if let Some(ref name) = update.name {
            set.insert("name", name);
        }
        if let Some(ref description) = update.description {
            set.insert("description", description);
        }
        if let Some(price) = update.price {
            set.insert("price", to_bson(&price).map_err(|e| AppError::InternalError(e.to_string()))?);
        }
        if let Some(status) = update.status {
            set.insert("status", to_bson(&status).map_err(|e| AppError::InternalError(e.to_string()))?);
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection()
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection()
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use rust_decimal::Decimal;

    #[test]
    fn test_escape_regex() {
        assert_eq!(escape_regex("a.b*(c)"), "a\\.b\\*\\(c\\)");
        assert_eq!(escape_regex("plain"), "plain");
    }

    #[test]
    fn test_search_filter_only_active_with_bounds() {
        let filter = search_filter(&ProductSearch {
            keyword: Some("mug".to_string()),
            min_price: Some(Decimal::from_str("5.00").unwrap()),
            max_price: None,
            skip: 0,
            limit: 10,
        });

        assert_eq!(filter.get_str("status").unwrap(), "ACTIVE");
        assert_eq!(filter.get_array("$or").unwrap().len(), 2);
        assert_eq!(filter.get_document("$expr").unwrap().get_array("$and").unwrap().len(), 1);

        let plain = search_filter(&ProductSearch::default());
        assert!(!plain.contains_key("$or"));
        assert!(!plain.contains_key("$expr"));
    }
}
