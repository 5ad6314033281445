//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 분산 캐시와 JSON 기반 객체 직렬화를 제공합니다.
//! 현재는 사용자 리포지토리가 이메일/ID 조회 결과를 10분 동안 캐싱합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new().await?;
//! cache.set_with_expiry("user:email:a@b.c", &user, 600).await?;
//! let cached_user: Option<User> = cache.get("user:email:a@b.c").await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
