//! User Entity Implementation
//!
//! 마켓플레이스 계정을 표현하는 사용자 엔티티입니다.
//! 비밀번호 해시와 현재 유효한 리프레시 토큰의 해시를 함께 보관합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 사용자 역할
///
/// 저장 및 토큰 클레임에서는 `BUYER`, `SELLER`, `ADMIN` 문자열로 표현됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Buyer,
    Seller,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "BUYER",
            Role::Seller => "SELLER",
            Role::Admin => "ADMIN",
        }
    }
}

/// 사용자 엔티티
///
/// `users` 컬렉션의 문서 하나에 대응합니다.
///
/// ## 불변 조건
///
/// - `email`은 시스템 전체에서 유일합니다 (유니크 인덱스)
/// - `refresh_token_hash`는 비어 있거나, 마지막으로 발급된 리프레시 토큰의
///   SHA-256 해시와 정확히 일치합니다
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자 이메일 (unique, 소문자 정규화)
    pub email: String,
    /// bcrypt 비밀번호 해시
    pub password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Role,
    /// 현재 리프레시 토큰의 SHA-256 hex (로그아웃 상태에서는 None)
    #[serde(default)]
    pub refresh_token_hash: Option<String>,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 구매자 계정을 생성합니다.
    ///
    /// ID는 클라이언트 측에서 미리 할당하므로 저장 전에도 토큰 발급에 사용할 수 있습니다.
    pub fn new(
        email: String,
        password_hash: String,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: Some(ObjectId::new()),
            email,
            password_hash,
            first_name,
            last_name,
            role: Role::Buyer,
            refresh_token_hash: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 결제 페이지에 표시할 이름 (이름이 없으면 이메일)
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if full.is_empty() { self.email.clone() } else { full }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_as_screaming_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Seller).unwrap(), "\"SELLER\"");
        assert_eq!(serde_json::from_str::<Role>("\"ADMIN\"").unwrap(), Role::Admin);
        assert_eq!(Role::Buyer.as_str(), "BUYER");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let mut user = User::new("jane@example.com".to_string(), "hash".to_string(), None, None);
        assert_eq!(user.display_name(), "jane@example.com");

        user.first_name = Some("Jane".to_string());
        user.last_name = Some("Doe".to_string());
        assert_eq!(user.display_name(), "Jane Doe");
    }

    #[test]
    fn test_new_user_is_buyer_without_session() {
        let user = User::new("a@b.c".to_string(), "hash".to_string(), None, None);

        assert!(user.id.is_some());
        assert_eq!(user.role, Role::Buyer);
        assert!(user.refresh_token_hash.is_none());
    }
}
