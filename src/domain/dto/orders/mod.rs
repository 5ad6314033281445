//! 주문 조회 DTO

pub mod response;

pub use response::*;
