//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 핵심 모듈로, 영속 엔티티와 API 계약, 인증 모델을 담습니다.
//!
//! ## 아키텍처 개요
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - MongoDB 문서와 매핑되는 엔티티
//! ├── dto       - 요청/응답 데이터 전송 객체
//! └── models    - 인증 컨텍스트, 토큰 클레임
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, DB)
//! ```
//!
//! ## 변환 규칙
//!
//! 엔티티는 핸들러 밖으로 직접 나가지 않습니다. 응답 DTO로 변환하면서
//! 비밀번호 해시, 리프레시 토큰 해시 같은 민감한 필드가 제거됩니다.
//!
//! ```rust,ignore
//! let user: User = user_store.find_by_id(&id).await?.ok_or(...)?;
//! let response = UserResponse::from(user); // password_hash 제외
//! ```

pub mod entities;
pub mod dto;
pub mod models;
