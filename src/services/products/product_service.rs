//! 상품 카탈로그 서비스
//!
//! 판매자(SELLER)와 관리자(ADMIN)가 상품을 등록/수정/삭제하고,
//! 누구나 판매 중(`ACTIVE`)인 상품을 조회하고 검색할 수 있습니다.
//! 판매 중이 아닌 상품은 소유 판매자와 관리자에게만 보입니다.
//! 가격 변경은 이미 생성된 주문에 영향을 주지 않습니다 (주문은 가격을 복사해 둡니다).

use std::sync::Arc;
use crate::{
    domain::dto::products::{
        request::{CreateProductRequest, SearchProductsQuery, UpdateProductRequest},
        response::{ProductPage, ProductResponse},
    },
    domain::entities::{products::product::Product, users::user::Role},
    domain::models::auth::authenticated_user::AuthenticatedUser,
    repositories::{
        parse_object_id,
        products::{ProductSearch, ProductStore, ProductUpdate},
    },
};
use crate::errors::errors::AppError;

pub struct ProductService {
    products: Arc<dyn ProductStore>,
    /// 요청에 통화가 없을 때 사용할 기본 통화
    default_currency: String,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductStore>, default_currency: String) -> Self {
        Self { products, default_currency }
    }

    /// 상품 등록 (판매자는 요청한 사용자 자신)
    pub async fn create_product(
        &self,
        seller: &AuthenticatedUser,
        request: CreateProductRequest,
    ) -> Result<ProductResponse, AppError> {
        if !matches!(seller.role, Role::Seller | Role::Admin) {
            return Err(AppError::AuthorizationError("판매자만 상품을 등록할 수 있습니다".to_string()));
        }

        let product = Product::new(
            seller.object_id()?,
            request.name,
            request.slug,
            request.description,
            request.price,
            request.currency.unwrap_or_else(|| self.default_currency.clone()).to_uppercase(),
            request.status.unwrap_or_default(),
        );

        let created = self.products.insert(product).await?;
        log::info!("상품 등록: {} (판매자 {})", created.slug, seller.user_id);

        Ok(ProductResponse::from(created))
    }

    /// 상품 단건 조회
    ///
    /// `ACTIVE`가 아닌 상품은 소유 판매자나 관리자가 아니면 `NotFound`입니다.
    pub async fn get_product(
        &self,
        viewer: Option<&AuthenticatedUser>,
        product_id: &str,
    ) -> Result<ProductResponse, AppError> {
        let id = parse_object_id(product_id).ok_or_else(product_not_found)?;
        let product = self.products.find_by_id(&id).await?.ok_or_else(product_not_found)?;

        if !product.is_purchasable() && !viewer.is_some_and(|v| can_manage(v, &product)) {
            return Err(product_not_found());
        }

        Ok(ProductResponse::from(product))
    }

    /// 판매 중인 상품 검색 (최신순, 페이지 단위)
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 최소 가격이 최대 가격보다 큼
    pub async fn search_products(&self, query: SearchProductsQuery) -> Result<ProductPage, AppError> {
        if let (Some(min), Some(max)) = (query.min_price, query.max_price) {
            if min > max {
                return Err(AppError::ValidationError("최소 가격이 최대 가격보다 큽니다".to_string()));
            }
        }

        let page = query.page();
        let limit = query.limit();
        let search = ProductSearch {
            keyword: query.search.as_deref().map(str::trim).filter(|k| !k.is_empty()).map(str::to_string),
            min_price: query.min_price,
            max_price: query.max_price,
            skip: (page - 1).saturating_mul(limit),
            limit,
        };

        let (products, total) = self.products.search(&search).await?;

        Ok(ProductPage {
            items: products.into_iter().map(ProductResponse::from).collect(),
            total,
            page,
            limit,
        })
    }

    pub async fn list_products(&self) -> Result<Vec<ProductResponse>, AppError> {
        let products = self.products.list_active().await?;
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }

    /// 상품 수정
    ///
    /// 소유 판매자 또는 관리자만 수정할 수 있습니다.
    pub async fn update_product(
        &self,
        actor: &AuthenticatedUser,
        product_id: &str,
        request: UpdateProductRequest,
    ) -> Result<ProductResponse, AppError> {
        let id = parse_object_id(product_id).ok_or_else(product_not_found)?;
        let product = self.products.find_by_id(&id).await?.ok_or_else(product_not_found)?;

        if !can_manage(actor, &product) {
            return Err(AppError::AuthorizationError("상품을 수정할 권한이 없습니다".to_string()));
        }

        let update = ProductUpdate {
            name: request.name,
            description: request.description,
            price: request.price,
            status: request.status,
        };

        self.products
            .update(&id, &update)
            .await?
            .map(ProductResponse::from)
            .ok_or_else(product_not_found)
    }

    /// 상품 삭제 (소유 판매자 또는 관리자)
    ///
    /// 기존 주문은 상품 정보를 복사해 두었으므로 영향을 받지 않고,
    /// 장바구니의 해당 라인은 조회 시 건너뜁니다.
    pub async fn delete_product(&self, actor: &AuthenticatedUser, product_id: &str) -> Result<(), AppError> {
        let id = parse_object_id(product_id).ok_or_else(product_not_found)?;
        let product = self.products.find_by_id(&id).await?.ok_or_else(product_not_found)?;

        if !can_manage(actor, &product) {
            return Err(AppError::AuthorizationError("상품을 삭제할 권한이 없습니다".to_string()));
        }

        if !self.products.delete(&id).await? {
            return Err(product_not_found());
        }
        log::info!("상품 삭제: {} (요청자 {})", product.slug, actor.user_id);

        Ok(())
    }
}

/// 관리자이거나 상품을 등록한 판매자인지 확인
fn can_manage(actor: &AuthenticatedUser, product: &Product) -> bool {
    actor.is_admin()
        || actor.object_id().is_ok_and(|id| id == product.seller_id)
}

fn product_not_found() -> AppError {
    AppError::NotFound("상품을 찾을 수 없습니다".to_string())
}
