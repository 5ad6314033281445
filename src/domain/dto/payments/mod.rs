//! 결제 조회 및 웹훅 DTO

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
