//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//! MongoDB를 주 저장소로 사용하고, Redis를 통한 캐싱을 지원합니다.
//!
//! ## 특징
//!
//! - **하이브리드 스토리지**: MongoDB + Redis 캐싱
//! - **원자적 토큰 교체**: 리프레시 토큰 해시는 조건부 update로만 교체
//! - **데이터 무결성**: 이메일 유니크 인덱스

use std::sync::Arc;
use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use crate::{
    caching::redis::RedisClient,
    db::Database,
    domain::entities::users::user::User,
    repositories::users::{ProfileUpdate, UserStore},
};
use crate::errors::errors::{is_duplicate_key, AppError};

const COLLECTION: &str = "users";
const CACHE_TTL_SECONDS: u64 = 600;

/// 사용자 데이터 액세스 리포지토리
///
/// ## 캐싱 전략
///
/// ### L1 Cache (Redis)
/// - **TTL**: 10분 (600초)
/// - **키 패턴**:
///   - 개별 사용자: `user:{user_id}`
///   - 이메일 조회: `user:email:{email}`
///
/// ### L2 Storage (MongoDB)
/// - **컬렉션명**: `users`
/// - **인덱스**: email(unique), created_at(desc)
///
/// 모든 쓰기 연산은 변경된 문서를 받아 두 캐시 키를 함께 무효화합니다.
/// 리프레시 토큰 검증은 캐시를 거치지 않고 MongoDB 조건부 update로만 판단합니다.
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let repo = UserRepository::new(database.clone(), redis.clone());
///
/// let created = repo.insert(User::new(email, hash, None, None)).await?;
/// let found = repo.find_by_email("john@example.com").await?;
/// ```
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,

    /// Redis 캐시 클라이언트
    redis: Arc<RedisClient>,
}

impl UserRepository {
    pub fn new(db: Arc<Database>, redis: Arc<RedisClient>) -> Self {
        Self { db, redis }
    }

    fn collection(&self) -> Collection<User> {
        self.db.collection::<User>(COLLECTION)
    }

    fn id_cache_key(id: &ObjectId) -> String {
        format!("user:{}", id.to_hex())
    }

    fn email_cache_key(email: &str) -> String {
        format!("user:email:{}", email)
    }

    /// 사용자 관련 캐시 키를 모두 제거합니다. 실패는 무시합니다.
    async fn invalidate_cache(&self, user: &User) {
        let mut keys = vec![Self::email_cache_key(&user.email)];
        if let Some(id) = user.id.as_ref() {
            keys.push(Self::id_cache_key(id));
        }
        let _ = self.redis.del_multiple(&keys).await;
    }

    /// `$set` 업데이트를 적용하고 변경 후 문서를 반환합니다.
    async fn update_returning(&self, filter: Document, set: Document) -> Result<Option<User>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self.collection()
            .find_one_and_update(filter, doc! { "$set": set })
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = updated {
            self.invalidate_cache(user).await;
        }

        Ok(updated)
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 1. **이메일 유니크 인덱스** - 동시 가입 시 중복 계정 방지
    /// 2. **생성일 인덱스** - 최근 가입자 조회
    ///
    /// 애플리케이션 초기화 시점에 한 번 호출합니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([email_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for UserRepository {
    /// 이메일 주소로 사용자 조회
    ///
    /// # 캐싱 정책
    ///
    /// - **캐시 키**: `user:email:{email}`
    /// - **캐시 미스**: MongoDB에서 조회 후 캐시에 저장
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let cache_key = Self::email_cache_key(email);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, CACHE_TTL_SECONDS)
                .await;
        }

        Ok(user)
    }

    /// ID로 사용자 조회 (`user:{id}` 캐시 우선)
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        let cache_key = Self::id_cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection()
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, CACHE_TTL_SECONDS)
                .await;
        }

        Ok(user)
    }

    /// 새 사용자 생성
    ///
    /// 서비스 계층이 사전에 중복을 확인하지만, 동시 가입은 유니크 인덱스가 막습니다.
    /// 이때 발생하는 E11000 에러는 `ConflictError`로 변환됩니다.
    async fn insert(&self, mut user: User) -> Result<User, AppError> {
        if user.id.is_none() {
            user.id = Some(ObjectId::new());
        }

        self.collection()
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError("이미 사용 중인 이메일입니다".to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        // 가입 전 조회로 남았을 수 있는 캐시 제거
        self.invalidate_cache(&user).await;

        Ok(user)
    }

    async fn update_profile(&self, id: &ObjectId, update: &ProfileUpdate) -> Result<Option<User>, AppError> {
        let mut set = doc! { "updated_at": DateTime::now() };
        if let Some(ref first_name) = update.first_name {
            set.insert("first_name", first_name);
        }
        if let Some(ref last_name) = update.last_name {
            set.insert("last_name", last_name);
        }

        self.update_returning(doc! { "_id": id }, set).await
    }

    async fn set_password_hash(&self, id: &ObjectId, password_hash: &str) -> Result<bool, AppError> {
        let updated = self.update_returning(
            doc! { "_id": id },
            doc! { "password_hash": password_hash, "updated_at": DateTime::now() },
        ).await?;

        Ok(updated.is_some())
    }

    async fn set_refresh_token_hash(&self, id: &ObjectId, hash: Option<&str>) -> Result<bool, AppError> {
        let updated = self.update_returning(
            doc! { "_id": id },
            doc! { "refresh_token_hash": hash, "updated_at": DateTime::now() },
        ).await?;

        Ok(updated.is_some())
    }

    /// 리프레시 토큰 해시 compare-and-swap
    ///
    /// 필터에 현재 해시를 포함하므로 같은 토큰으로 동시에 들어온 요청 중
    /// 하나만 문서를 찾아 갱신하고, 나머지는 `false`를 받습니다.
    async fn rotate_refresh_token_hash(
        &self,
        id: &ObjectId,
        expected: &str,
        replacement: &str,
    ) -> Result<bool, AppError> {
        let updated = self.update_returning(
            doc! { "_id": id, "refresh_token_hash": expected },
            doc! { "refresh_token_hash": replacement, "updated_at": DateTime::now() },
        ).await?;

        Ok(updated.is_some())
    }
}
