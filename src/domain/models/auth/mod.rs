//! 인증 컨텍스트 모델

pub mod authenticated_user;
pub mod authentication_request;
