//! # Authentication Configuration Module
//!
//! JWT 토큰 쌍과 세션 정책 등 인증 관련 설정을 관리하는 모듈입니다.
//!
//! 액세스 토큰과 리프레시 토큰은 서로 다른 비밀키와 만료 시간을 사용합니다.
//! 한쪽 키가 노출되더라도 다른 종류의 토큰을 위조할 수 없고,
//! 각 검증기는 자기 종류의 토큰만 받아들입니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### JWT 토큰 설정
//! ```bash
//! export JWT_ACCESS_SECRET="your-access-token-secret"
//! export JWT_REFRESH_SECRET="your-refresh-token-secret"
//! export JWT_ACCESS_EXPIRATION_MINUTES="15"
//! export JWT_REFRESH_EXPIRATION_DAYS="7"
//! ```
//!
//! ### 세션 정책
//! ```bash
//! # 비밀번호 변경 시 기존 리프레시 토큰 폐기 여부 (기본값: false)
//! export AUTH_REVOKE_SESSIONS_ON_PASSWORD_CHANGE="true"
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{JwtConfig, JwtSettings};
//!
//! let access_ttl = JwtConfig::access_expiration_minutes();
//! let settings = JwtSettings::from_env();
//! let token_service = TokenService::new(settings);
//! ```

use std::env;

/// JWT 토큰 관련 환경 변수 접근자
pub struct JwtConfig;

impl JwtConfig {
    /// 액세스 토큰 서명에 사용할 비밀키를 반환합니다.
    ///
    /// # 보안 요구사항
    ///
    /// - 최소 256비트 (32바이트) 길이
    /// - 리프레시 토큰 비밀키와 다른 값
    ///
    /// # 기본값
    ///
    /// 환경 변수가 설정되지 않은 경우 개발용 기본값을 사용하고 경고 로그를 남깁니다.
    ///
    /// # 키 생성 예제
    ///
    /// ```bash
    /// openssl rand -base64 32
    /// ```
    pub fn access_secret() -> String {
        env::var("JWT_ACCESS_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_ACCESS_SECRET not set, using default (not secure for production!)");
                "dev-access-secret".to_string()
            })
    }

    /// 리프레시 토큰 서명에 사용할 비밀키를 반환합니다.
    ///
    /// 액세스 토큰 비밀키와 반드시 달라야 합니다.
    pub fn refresh_secret() -> String {
        env::var("JWT_REFRESH_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_REFRESH_SECRET not set, using default (not secure for production!)");
                "dev-refresh-secret".to_string()
            })
    }

    /// 액세스 토큰의 만료 시간을 분 단위로 반환합니다.
    ///
    /// # 기본값
    ///
    /// 15분
    ///
    /// # 예제
    ///
    /// ```rust,ignore
    /// use chrono::{Utc, Duration};
    ///
    /// let expires_at = Utc::now() + Duration::minutes(JwtConfig::access_expiration_minutes());
    /// ```
    pub fn access_expiration_minutes() -> i64 {
        env::var("JWT_ACCESS_EXPIRATION_MINUTES")
            .unwrap_or_else(|_| "15".to_string())
            .parse()
            .unwrap_or(15)
    }

    /// 리프레시 토큰의 만료 시간을 일 단위로 반환합니다.
    ///
    /// # 기본값
    ///
    /// 7일
    ///
    /// # 보안 고려사항
    ///
    /// - 리프레시 토큰은 사용될 때마다 교체(rotation)됩니다
    /// - 교체된 토큰을 다시 제시하면 거부됩니다
    pub fn refresh_expiration_days() -> i64 {
        env::var("JWT_REFRESH_EXPIRATION_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .unwrap_or(7)
    }
}

/// `TokenService`가 생성 시점에 고정하는 JWT 설정 묶음
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_days: i64,
}

impl JwtSettings {
    /// 환경 변수에서 설정을 읽어옵니다.
    pub fn from_env() -> Self {
        Self {
            access_secret: JwtConfig::access_secret(),
            refresh_secret: JwtConfig::refresh_secret(),
            access_ttl_minutes: JwtConfig::access_expiration_minutes(),
            refresh_ttl_days: JwtConfig::refresh_expiration_days(),
        }
    }
}

/// 계정 및 세션 정책 설정
pub struct AuthConfig;

impl AuthConfig {
    /// 비밀번호 변경 시 저장된 리프레시 토큰을 폐기할지 여부
    ///
    /// # 기본값
    ///
    /// `false` - 비밀번호를 바꿔도 기존 세션은 유지됩니다.
    pub fn revoke_sessions_on_password_change() -> bool {
        env::var("AUTH_REVOKE_SESSIONS_ON_PASSWORD_CHANGE")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false)
    }
}
