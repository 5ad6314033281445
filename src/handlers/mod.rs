//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 입력을 검증(`validator`)하고 서비스 하나를 호출한 뒤 응답 형태만 정합니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리       ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직                        ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 데이터 접근                     ← Repository Layer
//! ├─────────────────────────────────────────────┤
//!   Entities/Models - 도메인 모델                  ← Domain Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! 서비스는 `web::Data<T>`로 주입됩니다 ([`crate::core::context::AppContext`] 참고).
//! 인증이 필요한 핸들러는 [`AuthenticatedUser`] 추출자로 사용자 정보를 받습니다.
//!
//! [`AuthenticatedUser`]: crate::domain::models::auth::authenticated_user::AuthenticatedUser
//!
//! ## 모듈 구성
//!
//! - **`auth`**: 가입, 로그인, 토큰 갱신, 프로필
//! - **`products`**: 상품 카탈로그
//! - **`carts`**: 장바구니
//! - **`checkout`**: 체크아웃 생성/확인
//! - **`orders`**: 주문 조회
//! - **`payments`**: 결제 조회와 웹훅

pub mod auth;
pub mod products;
pub mod carts;
pub mod checkout;
pub mod orders;
pub mod payments;
