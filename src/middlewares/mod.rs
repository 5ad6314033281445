//! 미들웨어 모듈
//!
//! ActixWeb 요청 처리 파이프라인에서 사용되는 미들웨어를 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - `Authorization: Bearer <access token>` 추출 및 검증
//! - 사용자 정보를 request extension에 저장 ([`AuthenticatedUser`] 추출자로 꺼냄)
//! - 역할 요구사항 검증 (403)
//!
//! [`AuthenticatedUser`]: crate::domain::models::auth::authenticated_user::AuthenticatedUser
//!
//! # 사용 방법
//!
//! ## 스코프 전체에 적용
//! ```rust,ignore
//! web::scope("/api/v1/cart")
//!     .wrap(AuthMiddleware::required())
//!     .service(get_cart)
//! ```
//!
//! ## 핸들러 단위로 적용
//!
//! 공개 라우트와 보호 라우트가 같은 스코프에 있을 때 사용합니다.
//!
//! ```rust,ignore
//! #[post("", wrap = "AuthMiddleware::required_with_roles(&[Role::Seller, Role::Admin])")]
//! async fn create_product(/* ... */) -> Result<HttpResponse, AppError> { /* ... */ }
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
