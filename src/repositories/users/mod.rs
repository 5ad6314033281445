//! 사용자 데이터 액세스 계층
//!
//! [`UserStore`] trait과 MongoDB + Redis 캐싱 구현인
//! [`UserRepository`](user_repo::UserRepository)를 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! let user_repo = UserRepository::new(database.clone(), redis.clone());
//! let user = user_repo.find_by_email("user@example.com").await?;
//! ```

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use crate::domain::entities::users::user::User;
use crate::errors::errors::AppError;

pub mod user_repo;

/// 프로필 변경 필드 (None은 변경하지 않음)
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// 사용자 저장소 인터페이스
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError>;

    /// 새 사용자를 저장합니다. 이메일이 중복되면 `ConflictError`.
    async fn insert(&self, user: User) -> Result<User, AppError>;

    /// 프로필 필드를 변경하고 변경된 사용자를 반환합니다. 사용자가 없으면 `None`.
    async fn update_profile(&self, id: &ObjectId, update: &ProfileUpdate) -> Result<Option<User>, AppError>;

    /// 비밀번호 해시를 교체합니다. 사용자가 없으면 false.
    async fn set_password_hash(&self, id: &ObjectId, password_hash: &str) -> Result<bool, AppError>;

    /// 저장된 리프레시 토큰 해시를 무조건 덮어씁니다 (로그인, 로그아웃).
    async fn set_refresh_token_hash(&self, id: &ObjectId, hash: Option<&str>) -> Result<bool, AppError>;

    /// 저장된 해시가 `expected`와 같을 때만 `replacement`로 교체합니다.
    ///
    /// 교체에 성공하면 true. 동시에 들어온 두 갱신 요청 중 하나만 성공합니다.
    async fn rotate_refresh_token_hash(
        &self,
        id: &ObjectId,
        expected: &str,
        replacement: &str,
    ) -> Result<bool, AppError>;
}
