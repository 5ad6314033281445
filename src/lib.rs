//! 마켓플레이스 백엔드
//!
//! 상품 카탈로그, 장바구니, 체크아웃과 결제 정산을 제공하는 REST API 서비스입니다.
//!
//! # Features
//!
//! - **계정 관리**: 회원가입, 로그인, 프로필 수정, 비밀번호 변경
//! - **JWT 인증**: 액세스/리프레시 토큰 쌍, 리프레시 토큰 교체(rotation)
//! - **카탈로그**: 판매자/관리자 상품 등록 및 수정
//! - **장바구니와 체크아웃**: 가격 스냅샷을 담은 주문 생성, Flutterwave 결제 링크 발급
//! - **결제 정산**: 멱등적인 웹훅 처리와 주문 상태 전이
//! - **MongoDB**: 영구 저장, **Redis**: 사용자 조회 캐싱
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + AuthMiddleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직 (AppContext가 조립)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 저장소 trait + MongoDB 구현
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use marketplace_backend::core::AppContext;
//! use marketplace_backend::routes::configure_all_routes;
//!
//! let context = AppContext::connect(database, redis).await?;
//! let app = App::new()
//!     .configure(|cfg| context.register(cfg))
//!     .configure(configure_all_routes);
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
