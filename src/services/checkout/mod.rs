//! 체크아웃과 결제 정산 서비스 모듈

pub mod checkout_service;

pub use checkout_service::*;
