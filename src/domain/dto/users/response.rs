use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::dto::to_utc;
use crate::domain::entities::users::user::{Role, User};
use crate::domain::models::token::token::TokenPair;

/// 사용자 응답 DTO
///
/// 비밀번호 해시와 리프레시 토큰 해시는 포함하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            email,
            first_name,
            last_name,
            role,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            email,
            first_name,
            last_name,
            role,
            created_at: to_utc(&created_at),
            updated_at: to_utc(&updated_at),
        }
    }
}

/// 회원가입/로그인 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub tokens: TokenPair,
}

/// 단순 메시지 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_strips_secrets() {
        let mut user = User::new("jane@example.com".to_string(), "$2b$04$hash".to_string(), None, None);
        user.refresh_token_hash = Some("deadbeef".to_string());

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();

        assert!(!json.contains("password"));
        assert!(!json.contains("refresh_token"));
        assert!(!json.contains("deadbeef"));
        assert!(json.contains("\"role\":\"BUYER\""));
    }
}
