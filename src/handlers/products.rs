//! 상품 카탈로그 HTTP 핸들러
//!
//! 조회와 검색은 공개, 등록/수정/삭제는 SELLER 또는 ADMIN 역할이 필요합니다.
use actix_web::{delete, get, patch, post, web, HttpResponse};
use validator::Validate;
use crate::{
    domain::dto::products::request::{CreateProductRequest, SearchProductsQuery, UpdateProductRequest},
    domain::entities::users::user::Role,
    domain::models::auth::authenticated_user::AuthenticatedUser,
    middlewares::AuthMiddleware,
    services::products::ProductService,
};
use crate::errors::errors::AppError;

/// 판매 중인 상품 목록
#[get("")]
pub async fn list_products(products: web::Data<ProductService>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(products.list_products().await?))
}

/// 상품 검색
///
/// `?search=mug&min_price=5&max_price=20&page=1&limit=10`
#[get("/search")]
pub async fn search_products(
    products: web::Data<ProductService>,
    query: web::Query<SearchProductsQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(products.search_products(query.into_inner()).await?))
}

/// 판매 중이 아닌 상품은 소유 판매자와 관리자에게만 보입니다.
#[get("/{product_id}", wrap = "AuthMiddleware::optional()")]
pub async fn get_product(
    products: web::Data<ProductService>,
    user: Option<AuthenticatedUser>,
    product_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(products.get_product(user.as_ref(), &product_id).await?))
}

#[post("", wrap = "AuthMiddleware::required_with_roles(&[Role::Seller, Role::Admin])")]
pub async fn create_product(
    products: web::Data<ProductService>,
    user: AuthenticatedUser,
    payload: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let product = products.create_product(&user, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(product))
}

#[patch("/{product_id}", wrap = "AuthMiddleware::required_with_roles(&[Role::Seller, Role::Admin])")]
pub async fn update_product(
    products: web::Data<ProductService>,
    user: AuthenticatedUser,
    product_id: web::Path<String>,
    payload: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let product = products.update_product(&user, &product_id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

#[delete("/{product_id}", wrap = "AuthMiddleware::required_with_roles(&[Role::Seller, Role::Admin])")]
pub async fn delete_product(
    products: web::Data<ProductService>,
    user: AuthenticatedUser,
    product_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    products.delete_product(&user, &product_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
