//! Users Entity Module
//!
//! 사용자 도메인의 핵심 엔티티를 정의하는 모듈입니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::user::{User, Role};
//!
//! let user = User::new(
//!     "user@example.com".to_string(),
//!     hashed_password,
//!     Some("Jane".to_string()),
//!     None,
//! );
//! assert_eq!(user.role, Role::Buyer);
//! ```

pub mod user;
