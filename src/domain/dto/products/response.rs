use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::domain::dto::to_utc;
use crate::domain::entities::products::product::{Product, ProductStatus};

/// 상품 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: String,
    pub seller_id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub currency: String,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.map(|id| id.to_hex()).unwrap_or_default(),
            seller_id: product.seller_id.to_hex(),
            name: product.name,
            slug: product.slug,
            description: product.description,
            price: product.price,
            currency: product.currency,
            status: product.status,
            created_at: to_utc(&product.created_at),
            updated_at: to_utc(&product.updated_at),
        }
    }
}

/// 상품 검색 결과 페이지
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub items: Vec<ProductResponse>,
    /// 조건에 맞는 전체 상품 수
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}
