use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::domain::entities::products::product::{ProductStatus, MAX_PRICE};

/// 상품 등록 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "상품명은 1-200자 사이여야 합니다"))]
    pub name: String,

    #[validate(length(min = 1, max = 200, message = "slug는 1-200자 사이여야 합니다"))]
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,

    #[validate(length(max = 5000, message = "설명은 5000자를 넘을 수 없습니다"))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,

    /// ISO 4217 통화 코드 (생략 시 `FLW_CURRENCY`)
    #[validate(length(equal = 3, message = "통화 코드는 3자리여야 합니다"))]
    pub currency: Option<String>,

    pub status: Option<ProductStatus>,
}

/// 상품 수정 요청 DTO (전달된 필드만 변경)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200, message = "상품명은 1-200자 사이여야 합니다"))]
    pub name: Option<String>,

    #[validate(length(max = 5000, message = "설명은 5000자를 넘을 수 없습니다"))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,

    pub status: Option<ProductStatus>,
}

/// 상품 검색 쿼리 DTO (`GET /api/v1/products/search`)
///
/// 판매 중인 상품만 대상으로 합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SearchProductsQuery {
    /// 이름 또는 설명 검색어
    #[validate(length(min = 1, max = 100, message = "검색어는 1-100자 사이여야 합니다"))]
    pub search: Option<String>,

    #[validate(custom(function = "validate_price_bound"))]
    pub min_price: Option<Decimal>,

    #[validate(custom(function = "validate_price_bound"))]
    pub max_price: Option<Decimal>,

    /// 1부터 시작 (기본 1)
    #[validate(range(min = 1, message = "page는 1 이상이어야 합니다"))]
    pub page: Option<u64>,

    /// 페이지 크기 (기본 10, 최대 100)
    #[validate(range(min = 1, max = 100, message = "limit은 1-100 사이여야 합니다"))]
    pub limit: Option<u64>,
}

impl SearchProductsQuery {
    pub const DEFAULT_LIMIT: u64 = 10;

    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT).clamp(1, 100)
    }
}

/// slug 형식 검증 (소문자, 숫자, 하이픈만 허용)
fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let valid = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if !valid || slug.starts_with('-') || slug.ends_with('-') {
        return Err(ValidationError::new("invalid_slug")
            .with_message("slug는 소문자, 숫자, 하이픈만 사용할 수 있습니다".into()));
    }
    Ok(())
}

/// 가격 검증 (0보다 크고 [`MAX_PRICE`] 이하, 소수점 둘째 자리까지)
fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() || price.is_zero() {
        return Err(ValidationError::new("invalid_price")
            .with_message("가격은 0보다 커야 합니다".into()));
    }
    if *price > Decimal::from(MAX_PRICE) {
        return Err(ValidationError::new("invalid_price")
            .with_message("가격이 허용 범위를 넘었습니다".into()));
    }
    if price.normalize().scale() > 2 {
        return Err(ValidationError::new("invalid_price")
            .with_message("가격은 소수점 둘째 자리까지만 허용됩니다".into()));
    }
    Ok(())
}

/// 검색 가격 조건 검증 (음수 불가)
fn validate_price_bound(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        return Err(ValidationError::new("invalid_price")
            .with_message("가격 조건은 0 이상이어야 합니다".into()));
    }
    Ok(())
}
