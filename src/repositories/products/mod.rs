//! 상품 데이터 액세스 계층

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use rust_decimal::Decimal;
use crate::domain::entities::products::product::{Product, ProductStatus};
use crate::errors::errors::AppError;

pub mod product_repo;

/// 상품 변경 필드 (None은 변경하지 않음)
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub status: Option<ProductStatus>,
}

/// 판매 중(`ACTIVE`) 상품 검색 조건
#[derive(Debug, Clone, Default)]
pub struct ProductSearch {
    /// 이름 또는 설명에 포함된 문자열 (대소문자 무시)
    pub keyword: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub skip: u64,
    pub limit: u64,
}

impl ProductSearch {
    /// 메모리 내 필터링용 조건 검사
    pub fn matches(&self, product: &Product) -> bool {
        if product.status != ProductStatus::Active {
            return false;
        }
        if let Some(ref keyword) = self.keyword {
            let keyword = keyword.to_lowercase();
            let in_name = product.name.to_lowercase().contains(&keyword);
            let in_description = product.description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&keyword));
            if !in_name && !in_description {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        true
    }
}

/// 상품 저장소 인터페이스
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// slug가 중복되면 `ConflictError`.
    async fn insert(&self, product: Product) -> Result<Product, AppError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Product>, AppError>;

    /// 여러 상품을 한 번에 조회합니다. 존재하지 않는 ID는 결과에서 빠집니다.
    async fn find_many(&self, ids: &[ObjectId]) -> Result<Vec<Product>, AppError>;

    /// `ACTIVE` 상품을 최신순으로 조회합니다.
    async fn list_active(&self) -> Result<Vec<Product>, AppError>;

    /// 조건에 맞는 상품을 최신순으로 `skip`/`limit`만큼 조회하고, 전체 개수를 함께 반환합니다.
    async fn search(&self, search: &ProductSearch) -> Result<(Vec<Product>, u64), AppError>;

    async fn update(&self, id: &ObjectId, update: &ProductUpdate) -> Result<Option<Product>, AppError>;

    /// 상품을 삭제합니다. 삭제된 문서가 없으면 false.
    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError>;
}
