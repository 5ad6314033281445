//! 인증 및 보안 서비스 모듈
//!
//! JWT 토큰 발급/검증과 계정 인증 흐름을 담당합니다.
//!
//! # Features
//!
//! - 액세스/리프레시 토큰 분리 (비밀키, 수명, `token_type` 클레임)
//! - 리프레시 토큰 해시 저장과 compare-and-swap 교체
//! - bcrypt 비밀번호 해싱
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{AuthService, TokenService};
//!
//! let token_service = TokenService::new(JwtSettings::from_env());
//! let auth_service = AuthService::new(users, token_service.clone(), cost, false)?;
//! let response = auth_service.login(request).await?;
//! ```

pub mod token_service;
pub mod auth_service;

pub use token_service::*;
pub use auth_service::*;
