//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 각 하위 모듈은 저장소 trait(`UserStore`, `OrderStore` 등)과
//! 그 MongoDB 구현(`UserRepository`, `OrderRepository` 등)을 제공합니다.
//! 서비스는 `Arc<dyn ...Store>`만 알고 있으므로, 테스트에서는
//! 메모리 구현으로 교체할 수 있습니다.
//!
//! # Features
//!
//! - MongoDB 주 저장소, 사용자 조회는 Redis 캐싱
//! - 상태 전이와 리프레시 토큰 교체는 조건부 update 한 번으로 처리 (compare-and-swap)
//! - 유니크 인덱스 위반은 `AppError::ConflictError`로 변환
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::repositories::users::{UserStore, user_repo::UserRepository};
//!
//! let users: Arc<dyn UserStore> = Arc::new(UserRepository::new(database, redis));
//! let user = users.find_by_email("user@example.com").await?;
//! ```

use mongodb::bson::oid::ObjectId;

pub mod users;
pub mod products;
pub mod carts;
pub mod orders;
pub mod payments;

#[cfg(test)]
pub mod memory;

/// 경로 파라미터 등 외부 입력의 ID 문자열을 ObjectId로 변환합니다.
///
/// 형식이 잘못된 ID는 존재하지 않는 리소스와 같게 취급하도록 `None`을 반환합니다.
pub fn parse_object_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id() {
        let id = ObjectId::new();

        assert_eq!(parse_object_id(&id.to_hex()), Some(id));
        assert_eq!(parse_object_id("not-an-id"), None);
        assert_eq!(parse_object_id(""), None);
    }
}
