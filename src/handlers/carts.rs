//! 장바구니 HTTP 핸들러 (모두 액세스 토큰 필요)
use actix_web::{delete, get, patch, post, web, HttpResponse};
use validator::Validate;
use crate::{
    domain::dto::carts::request::{AddCartItemRequest, UpdateCartItemRequest},
    domain::dto::users::response::MessageResponse,
    domain::models::auth::authenticated_user::AuthenticatedUser,
    services::carts::CartService,
};
use crate::errors::errors::AppError;

#[get("")]
pub async fn get_cart(
    carts: web::Data<CartService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let cart = carts.get_cart(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(cart))
}

#[delete("")]
pub async fn clear_cart(
    carts: web::Data<CartService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    carts.clear_cart(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("장바구니를 비웠습니다")))
}

#[post("/items")]
pub async fn add_item(
    carts: web::Data<CartService>,
    user: AuthenticatedUser,
    payload: web::Json<AddCartItemRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let cart = carts.add_item(&user.object_id()?, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(cart))
}

#[patch("/items/{product_id}")]
pub async fn update_item(
    carts: web::Data<CartService>,
    user: AuthenticatedUser,
    product_id: web::Path<String>,
    payload: web::Json<UpdateCartItemRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let cart = carts.update_item(&user.object_id()?, &product_id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(cart))
}

#[delete("/items/{product_id}")]
pub async fn remove_item(
    carts: web::Data<CartService>,
    user: AuthenticatedUser,
    product_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let cart = carts.remove_item(&user.object_id()?, &product_id).await?;
    Ok(HttpResponse::Ok().json(cart))
}
