//! # Data Transfer Objects Module
//!
//! HTTP API 계약을 정의하는 요청/응답 DTO 모음입니다.
//!
//! - 요청 DTO는 `validator::Validate`를 구현하며, 핸들러가 서비스 호출 전에
//!   `validate()`를 호출해 `AppError::ValidationError`(400)로 변환합니다.
//! - 응답 DTO는 엔티티에서 `From`으로 변환되며 ObjectId는 hex 문자열,
//!   시간은 RFC 3339 문자열, 금액은 10진 문자열로 직렬화됩니다.
//!
//! ```rust,ignore
//! payload.validate()
//!     .map_err(|e| AppError::ValidationError(e.to_string()))?;
//! ```

use chrono::{DateTime, Utc};

pub mod users;
pub mod products;
pub mod carts;
pub mod checkout;
pub mod orders;
pub mod payments;

/// BSON 시간을 응답용 UTC 시간으로 변환합니다.
pub fn to_utc(dt: &mongodb::bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(dt.timestamp_millis()).unwrap_or_default()
}
