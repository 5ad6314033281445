//! 에러 처리 모듈
//!
//! [`errors::AppError`]와 `AppResult` 별칭을 제공합니다.
//! 모든 계층(리포지토리, 서비스, 핸들러)이 같은 에러 타입을 공유하며,
//! 핸들러에서는 그대로 반환하면 HTTP 응답으로 변환됩니다.

pub mod errors;

pub use errors::{AppError, AppResult};
