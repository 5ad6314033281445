//! # Domain Models Module
//!
//! 영속되지 않는 도메인 모델을 정의합니다.
//!
//! - [`auth`] - 인증 미들웨어가 요청 확장(extensions)에 넣는 사용자 컨텍스트, 역할 요구사항
//! - [`token`] - JWT 클레임과 토큰 쌍

pub mod auth;
pub mod token;
