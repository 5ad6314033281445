//! API 라우트 설정 모듈
//!
//! RESTful API 엔드포인트들을 기능별로 그룹화하여 제공합니다.
//!
//! # Auth Middleware Usage
//!
//! 라우트에 따라 다른 인증 레벨을 적용합니다.
//!
//! ## 공개 라우트와 보호 라우트가 섞인 스코프
//! 핸들러 단위로 `wrap`을 지정합니다.
//! ```rust,ignore
//! #[get("/me", wrap = "AuthMiddleware::required()")]
//! pub async fn me(...) -> Result<HttpResponse, AppError> { ... }
//! ```
//!
//! ## 전체가 보호되는 스코프
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/api/v1/cart")
//!         .wrap(AuthMiddleware::required())
//!         .service(handlers::carts::get_cart)
//! );
//! ```
//!
//! ## 역할 기반 라우트
//! ```rust,ignore
//! #[post("", wrap = "AuthMiddleware::required_with_roles(&[Role::Seller, Role::Admin])")]
//! pub async fn create_product(...) -> Result<HttpResponse, AppError> { ... }
//! ```

use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::web;
use chrono;
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// 서비스 데이터는 [`AppContext::register`](crate::core::AppContext::register)로
/// 먼저 등록되어 있어야 합니다.
///
/// ```rust,ignore
/// let app = App::new()
///     .configure(|cfg| context.register(cfg))
///     .configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_auth_routes(cfg);
    configure_catalog_routes(cfg);
    configure_shopping_routes(cfg);
    configure_payment_routes(cfg);
}

/// 인증 라우트
///
/// ## Public
/// - `POST /api/v1/auth/register` - 회원가입
/// - `POST /api/v1/auth/login` - 이메일/비밀번호 로그인
/// - `POST /api/v1/auth/refresh` - 토큰 쌍 교체 (리프레시 토큰 필요)
///
/// ## Protected (액세스 토큰)
/// - `POST /api/v1/auth/logout`
/// - `GET /api/v1/auth/me`
/// - `PUT /api/v1/auth/update-profile`
/// - `PUT /api/v1/auth/change-password`
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/auth/login \
///   -H "Content-Type: application/json" \
///   -d '{"email":"user@example.com","password":"password123"}'
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(handlers::auth::register)
            .service(handlers::auth::login)
            .service(handlers::auth::refresh)
            .service(handlers::auth::logout)
            .service(handlers::auth::me)
            .service(handlers::auth::update_profile)
            .service(handlers::auth::change_password)
    );
}

/// 상품 카탈로그 라우트
///
/// 조회와 검색은 공개, 등록/수정/삭제는 SELLER/ADMIN 역할이 필요합니다.
/// `/search`는 `/{product_id}`보다 먼저 등록합니다.
fn configure_catalog_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/products")
            .service(handlers::products::list_products)
            .service(handlers::products::create_product)
            .service(handlers::products::search_products)
            .service(handlers::products::get_product)
            .service(handlers::products::update_product)
            .service(handlers::products::delete_product)
    );
}

/// 장바구니, 체크아웃, 주문 라우트 (모두 액세스 토큰 필요)
fn configure_shopping_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/cart")
            .wrap(AuthMiddleware::required())
            .service(handlers::carts::get_cart)
            .service(handlers::carts::clear_cart)
            .service(handlers::carts::add_item)
            .service(handlers::carts::update_item)
            .service(handlers::carts::remove_item)
    );

    cfg.service(
        web::scope("/api/v1/checkout")
            .wrap(AuthMiddleware::required())
            .service(handlers::checkout::create_checkout)
            .service(handlers::checkout::confirm_checkout)
    );

    cfg.service(
        web::scope("/api/v1/orders")
            .wrap(AuthMiddleware::required())
            .service(handlers::orders::list_orders)
            .service(handlers::orders::get_order)
    );
}

/// 결제 라우트
///
/// 웹훅은 토큰 대신 `verif-hash` 헤더로 인증합니다.
/// `/webhook`과 `/verify`는 `/{payment_id}`보다 먼저 등록합니다.
fn configure_payment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/payments")
            .service(handlers::payments::webhook)
            .service(handlers::payments::verify_transaction)
            .service(handlers::payments::list_payments)
            .service(handlers::payments::get_payment)
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "marketplace_backend",
///   "version": "0.1.0",
///   "timestamp": "2026-01-01T00:00:00Z",
///   "features": {
///     "database": "MongoDB",
///     "cache": "Redis",
///     "payments": "Flutterwave"
///   }
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "marketplace_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "payments": "Flutterwave"
        }
    }))
}
