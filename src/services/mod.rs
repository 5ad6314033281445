//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 저장소 trait(`Arc<dyn UserStore>` 등)과 다른 서비스를 생성자로 받습니다.
//! 실제 조립은 [`crate::core::context::AppContext`]에서 한 번 이루어집니다.
//!
//! # Features
//!
//! - 인증: 가입, 로그인, 토큰 교체, 비밀번호/프로필 관리
//! - 카탈로그와 장바구니
//! - 체크아웃과 웹훅 기반 결제 정산
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{carts::CartService, checkout::CheckoutService};
//!
//! let carts = Arc::new(CartService::new(cart_store, product_store));
//! let checkout = CheckoutService::new(orders, payments, users, carts, gateway, webhook_hash);
//! ```

pub mod auth;
pub mod products;
pub mod carts;
pub mod payments;
pub mod checkout;
