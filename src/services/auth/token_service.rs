//! JWT 토큰 관리 서비스 구현
//!
//! 액세스 토큰과 리프레시 토큰의 발급과 검증을 담당합니다.
//! 두 토큰은 서로 다른 비밀키로 서명되고, 클레임의 `token_type`으로도 구분되므로
//! 한 종류의 토큰을 다른 용도로 쓸 수 없습니다.
//!
//! 리프레시 토큰 원문은 저장하지 않습니다. [`TokenService::hash_refresh_token`]의
//! SHA-256 hex 값만 사용자 문서에 보관합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};
use uuid::Uuid;
use crate::{
    config::JwtSettings,
    domain::entities::users::user::User,
    domain::models::token::token::{TokenClaims, TokenPair, TokenType},
};
use crate::errors::errors::AppError;

/// JWT 토큰 관리 서비스
///
/// HMAC-SHA256 서명을 사용합니다. 기본 수명은 액세스 토큰 15분, 리프레시 토큰 7일입니다.
///
/// ```rust,ignore
/// let token_service = TokenService::new(JwtSettings::from_env());
/// let pair = token_service.issue_pair(&user)?;
/// let claims = token_service.verify_access_token(&pair.access_token)?;
/// ```
#[derive(Clone)]
pub struct TokenService {
    settings: JwtSettings,
}

impl TokenService {
    pub fn new(settings: JwtSettings) -> Self {
        Self { settings }
    }

    /// 액세스 토큰 수명 (초)
    pub fn access_ttl_seconds(&self) -> i64 {
        self.settings.access_ttl_minutes * 60
    }

    fn secret_for(&self, token_type: TokenType) -> &[u8] {
        match token_type {
            TokenType::Access => self.settings.access_secret.as_bytes(),
            TokenType::Refresh => self.settings.refresh_secret.as_bytes(),
        }
    }

    fn sign(&self, user: &User, token_type: TokenType, lifetime: Duration) -> Result<String, AppError> {
        let now = Utc::now();

        let claims = TokenClaims {
            sub: user.id_string().ok_or_else(|| {
                AppError::InternalError("사용자 ID가 없습니다".to_string())
            })?,
            email: user.email.clone(),
            role: user.role,
            token_type,
            // 같은 초에 발급된 토큰도 서로 달라지도록 고유 ID를 넣습니다
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        };

        self.encode_claims(&claims)
    }

    fn encode_claims(&self, claims: &TokenClaims) -> Result<String, AppError> {
        let encoding_key = EncodingKey::from_secret(self.secret_for(claims.token_type));

        encode(&Header::default(), claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 토큰 쌍 생성 (액세스 + 리프레시)
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 사용자 ID가 없거나 서명에 실패한 경우
    pub fn issue_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        let access_token = self.sign(user, TokenType::Access, Duration::minutes(self.settings.access_ttl_minutes))?;
        let refresh_token = self.sign(user, TokenType::Refresh, Duration::days(self.settings.refresh_ttl_days))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_ttl_seconds(),
        })
    }

    pub fn verify_access_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        self.verify(token, TokenType::Access)
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        self.verify(token, TokenType::Refresh)
    }

    /// 서명, 만료, 토큰 종류를 검증하고 클레임을 반환합니다.
    ///
    /// 어떤 이유로 실패하든 `AuthenticationError`이며, 만료만 별도 메시지를 씁니다.
    fn verify(&self, token: &str, expected: TokenType) -> Result<TokenClaims, AppError> {
        let decoding_key = DecodingKey::from_secret(self.secret_for(expected));
        let mut validation = Validation::default();
        validation.leeway = 0;

        let claims = decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
                }
                _ => {
                    log::debug!("토큰 검증 실패: {}", e);
                    AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string())
                }
            })?;

        if claims.token_type != expected {
            return Err(AppError::AuthenticationError("유효하지 않은 토큰 종류입니다".to_string()));
        }

        Ok(claims)
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// ```rust,ignore
    /// let token = token_service.extract_bearer_token("Bearer eyJhbGciOi...")?;
    /// ```
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string())),
        }
    }

    /// 리프레시 토큰의 SHA-256 hex 해시
    pub fn hash_refresh_token(token: &str) -> String {
        let digest = Sha256::digest(token.as_bytes());
        digest.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(JwtSettings {
            access_secret: "test-access".to_string(),
            refresh_secret: "test-refresh".to_string(),
            access_ttl_minutes: 15,
            refresh_ttl_days: 7,
        })
    }

    fn user() -> User {
        User::new("jane@example.com".to_string(), "hash".to_string(), None, None)
    }

    #[test]
    fn test_issue_pair_round_trips_claims() {
        let service = service();
        let user = user();

        let pair = service.issue_pair(&user).unwrap();
        let claims = service.verify_access_token(&pair.access_token).unwrap();

        assert_eq!(Some(claims.sub), user.id_string());
        assert_eq!(claims.email, "jane@example.com");
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(pair.expires_in, 900);
        assert_eq!(pair.token_type, "Bearer");
    }

    #[test]
    fn test_tokens_are_not_interchangeable() {
        let service = service();
        let pair = service.issue_pair(&user()).unwrap();

        assert!(matches!(
            service.verify_access_token(&pair.refresh_token),
            Err(AppError::AuthenticationError(_))
        ));
        assert!(matches!(
            service.verify_refresh_token(&pair.access_token),
            Err(AppError::AuthenticationError(_))
        ));
        assert!(service.verify_refresh_token(&pair.refresh_token).is_ok());
    }

    #[test]
    fn test_consecutive_pairs_differ() {
        let service = service();
        let user = user();

        let first = service.issue_pair(&user).unwrap();
        let second = service.issue_pair(&user).unwrap();

        assert_ne!(first.refresh_token, second.refresh_token);
        assert_ne!(
            TokenService::hash_refresh_token(&first.refresh_token),
            TokenService::hash_refresh_token(&second.refresh_token)
        );
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = service();
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: mongodb::bson::oid::ObjectId::new().to_hex(),
            email: "jane@example.com".to_string(),
            role: Default::default(),
            token_type: TokenType::Access,
            jti: Uuid::new_v4().to_string(),
            iat: now - 120,
            exp: now - 60,
        };
        let token = service.encode_claims(&claims).unwrap();

        match service.verify_access_token(&token) {
            Err(AppError::AuthenticationError(msg)) => assert!(msg.contains("만료")),
            other => panic!("expected expiry error, got {:?}", other.map(|c| c.sub)),
        }
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let service = service();
        let pair = service.issue_pair(&user()).unwrap();
        let tampered = format!("{}x", pair.access_token);

        assert!(matches!(
            service.verify_access_token(&tampered),
            Err(AppError::AuthenticationError(_))
        ));
        assert!(service.verify_access_token("garbage").is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        let service = service();

        assert_eq!(service.extract_bearer_token("Bearer abc.def").unwrap(), "abc.def");
        assert!(service.extract_bearer_token("Basic abc").is_err());
        assert!(service.extract_bearer_token("Bearer ").is_err());
    }

    #[test]
    fn test_hash_refresh_token_is_sha256_hex() {
        let hash = TokenService::hash_refresh_token("abc");

        assert_eq!(hash, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
    }
}
