//! JWT 인증 토큰 구조체 및 페어링 된 세트
//!
//! RFC 7519 표준 클레임과 토큰 종류(액세스/리프레시)를 구분하는 클레임을 정의합니다.
use serde::{Deserialize, Serialize};
use crate::domain::entities::users::user::Role;

/// 토큰 종류
///
/// 액세스 토큰을 리프레시 엔드포인트에 제시하거나 그 반대의 경우를 거부하기 위해
/// 서명 키와 별개로 클레임에도 기록합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT 토큰의 클레임(Payload) 구조체
///
/// ## 클레임 구성
///
/// - `sub`: 토큰의 주체 (사용자 ID)
/// - `email`, `role`: 발급 시점의 사용자 정보
/// - `token_type`: `access` 또는 `refresh`
/// - `jti`: 토큰 고유 ID (같은 초에 발급된 토큰도 서로 다른 값을 가짐)
/// - `iat`, `exp`: 발급/만료 시간 (Unix timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub token_type: TokenType,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// JWT 토큰 쌍 구조체
///
/// 클라이언트에게 전달되는 토큰 집합을 나타냅니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// 액세스 토큰 (API 접근용 단기 토큰)
    pub access_token: String,
    /// 리프레시 토큰 (토큰 갱신용 장기 토큰)
    pub refresh_token: String,
    /// 항상 "Bearer"
    pub token_type: String,
    /// 액세스 토큰 만료 시간 (초)
    pub expires_in: i64,
}
