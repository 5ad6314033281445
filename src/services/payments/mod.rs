//! 결제 서비스 모듈
//!
//! - [`gateway`]: 결제 게이트웨이 trait과 Flutterwave 클라이언트
//! - [`payment_service`]: 사용자 결제 내역 조회

pub mod gateway;
pub mod payment_service;

pub use gateway::*;
pub use payment_service::*;
