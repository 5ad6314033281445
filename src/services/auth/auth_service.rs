//! # 인증 서비스 구현
//!
//! 가입, 로그인, 토큰 갱신, 로그아웃, 비밀번호 변경, 프로필 조회/수정을 담당합니다.
//!
//! ## 리프레시 토큰 수명주기
//!
//! ```text
//! login ──▶ hash(R1) 저장
//! refresh(R1) ──▶ CAS(hash(R1) → hash(R2)) ──▶ R2 반환
//! refresh(R1) 재사용 ──▶ CAS 불일치 ──▶ 401
//! logout ──▶ hash 제거 ──▶ 이후 모든 refresh 401
//! ```
//!
//! ## 보안
//!
//! - 존재하지 않는 이메일로 로그인해도 더미 해시로 bcrypt 검증을 한 번 수행하므로
//!   응답 시간과 에러 메시지로 계정 존재 여부를 구분할 수 없습니다
//! - 응답 DTO에는 비밀번호 해시와 리프레시 토큰 해시가 포함되지 않습니다

use std::sync::Arc;
use bcrypt::{hash, verify};
use crate::{
    domain::dto::users::{
        request::{ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateProfileRequest},
        response::{AuthResponse, UserResponse},
    },
    domain::entities::users::user::User,
    domain::models::token::token::TokenPair,
    repositories::{
        parse_object_id,
        users::{ProfileUpdate, UserStore},
    },
    services::auth::token_service::TokenService,
};
use crate::errors::errors::AppError;

const INVALID_CREDENTIALS: &str = "이메일 또는 비밀번호가 올바르지 않습니다";
const ACCESS_DENIED: &str = "접근이 거부되었습니다";

/// 로그인/가입 시 이메일 정규화 (앞뒤 공백 제거, 소문자)
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 인증 비즈니스 로직 서비스
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let auth = AuthService::new(users, token_service, PasswordConfig::bcrypt_cost(), false)?;
///
/// let registered = auth.register(request).await?;
/// let rotated = auth.refresh(&registered.user.id, &registered.tokens.refresh_token).await?;
/// ```
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenService,
    bcrypt_cost: u32,
    revoke_sessions_on_password_change: bool,
    /// 존재하지 않는 계정 로그인 시 비교용 해시
    dummy_hash: String,
}

impl AuthService {
    /// 서비스 생성
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 더미 해시 생성 실패
    pub fn new(
        users: Arc<dyn UserStore>,
        tokens: TokenService,
        bcrypt_cost: u32,
        revoke_sessions_on_password_change: bool,
    ) -> Result<Self, AppError> {
        let dummy_hash = hash("timing-equalizer", bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;

        Ok(Self {
            users,
            tokens,
            bcrypt_cost,
            revoke_sessions_on_password_change,
            dummy_hash,
        })
    }

    fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let hash_start = std::time::Instant::now();
        let password_hash = hash(password, self.bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        Ok(password_hash)
    }

    fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
        verify(password, password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))
    }

    /// 새 토큰 쌍을 발급하고 리프레시 토큰 해시를 저장합니다.
    async fn start_session(&self, user: &User) -> Result<TokenPair, AppError> {
        let user_id = user.id.ok_or_else(|| {
            AppError::InternalError("사용자 ID가 없습니다".to_string())
        })?;

        let tokens = self.tokens.issue_pair(user)?;
        let refresh_hash = TokenService::hash_refresh_token(&tokens.refresh_token);
        self.users.set_refresh_token_hash(&user_id, Some(&refresh_hash)).await?;

        Ok(tokens)
    }

    /// 회원가입
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 이미 가입된 이메일 (동시 가입 포함)
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        let email = normalize_email(&request.email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        let password_hash = self.hash_password(&request.password)?;
        let user = self.users
            .insert(User::new(email, password_hash, request.first_name, request.last_name))
            .await?;

        let tokens = self.start_session(&user).await?;
        log::info!("신규 사용자 가입: {}", user.email);

        Ok(AuthResponse { user: UserResponse::from(user), tokens })
    }

    /// 로그인
    ///
    /// 알 수 없는 이메일과 틀린 비밀번호는 같은 `AuthenticationError`를 반환합니다.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        let email = normalize_email(&request.email);

        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                let _ = Self::verify_password(&request.password, &self.dummy_hash);
                log::warn!("로그인 실패 (알 수 없는 계정)");
                return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
            }
        };

        if !Self::verify_password(&request.password, &user.password_hash)? {
            log::warn!("로그인 실패: {}", user.email);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        let tokens = self.start_session(&user).await?;
        log::info!("로그인 성공: {}", user.email);

        Ok(AuthResponse { user: UserResponse::from(user), tokens })
    }

    /// 리프레시 토큰 교체
    ///
    /// 토큰 서명, 주체, 저장된 해시를 모두 확인한 뒤 조건부 update로 새 해시를 씁니다.
    /// 실패 사유와 관계없이 같은 `AuthenticationError`를 반환합니다.
    pub async fn refresh(&self, user_id: &str, refresh_token: &str) -> Result<TokenPair, AppError> {
        let denied = || AppError::AuthenticationError(ACCESS_DENIED.to_string());

        let claims = self.tokens.verify_refresh_token(refresh_token).map_err(|_| denied())?;
        if claims.sub != user_id {
            return Err(denied());
        }

        let id = parse_object_id(user_id).ok_or_else(denied)?;
        let user = self.users.find_by_id(&id).await?.ok_or_else(denied)?;

        let presented_hash = TokenService::hash_refresh_token(refresh_token);
        if user.refresh_token_hash.is_none() {
            return Err(denied());
        }

        let tokens = self.tokens.issue_pair(&user)?;
        let replacement = TokenService::hash_refresh_token(&tokens.refresh_token);

        // 캐시된 사용자 문서의 해시는 오래됐을 수 있으므로 판정은 CAS 결과로만 합니다
        if !self.users.rotate_refresh_token_hash(&id, &presented_hash, &replacement).await? {
            log::warn!("리프레시 토큰 재사용 또는 동시 갱신 감지: {}", user_id);
            return Err(denied());
        }

        Ok(tokens)
    }

    /// 제시된 리프레시 토큰의 주체로 [`refresh`](Self::refresh)를 수행합니다.
    ///
    /// 만료, 서명 오류 등 토큰 검증 실패도 같은 `AuthenticationError`로 응답합니다.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.tokens
            .verify_refresh_token(refresh_token)
            .map_err(|_| AppError::AuthenticationError(ACCESS_DENIED.to_string()))?;

        self.refresh(&claims.sub, refresh_token).await
    }

    /// 로그아웃: 저장된 리프레시 토큰 해시를 제거합니다.
    pub async fn logout(&self, user_id: &str) -> Result<(), AppError> {
        let id = parse_object_id(user_id)
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        if !self.users.set_refresh_token_hash(&id, None).await? {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
        }

        log::info!("로그아웃: {}", user_id);
        Ok(())
    }

    /// 비밀번호 변경
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 사용자가 없음
    /// * `AppError::AuthenticationError` - 현재 비밀번호 불일치
    pub async fn change_password(&self, user_id: &str, request: ChangePasswordRequest) -> Result<(), AppError> {
        let (id, user) = self.load_user(user_id).await?;

        if !Self::verify_password(&request.old_password, &user.password_hash)? {
            return Err(AppError::AuthenticationError("현재 비밀번호가 올바르지 않습니다".to_string()));
        }

        let password_hash = self.hash_password(&request.new_password)?;
        self.users.set_password_hash(&id, &password_hash).await?;

        if self.revoke_sessions_on_password_change {
            self.users.set_refresh_token_hash(&id, None).await?;
        }

        log::info!("비밀번호 변경: {}", user.email);
        Ok(())
    }

    pub async fn me(&self, user_id: &str) -> Result<UserResponse, AppError> {
        let (_, user) = self.load_user(user_id).await?;
        Ok(UserResponse::from(user))
    }

    pub async fn update_profile(&self, user_id: &str, request: UpdateProfileRequest) -> Result<UserResponse, AppError> {
        let (id, user) = self.load_user(user_id).await?;

        if request.is_empty() {
            return Ok(UserResponse::from(user));
        }

        let update = ProfileUpdate {
            first_name: request.first_name,
            last_name: request.last_name,
        };

        self.users
            .update_profile(&id, &update)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
    }

    async fn load_user(&self, user_id: &str) -> Result<(mongodb::bson::oid::ObjectId, User), AppError> {
        let not_found = || AppError::NotFound("사용자를 찾을 수 없습니다".to_string());

        let id = parse_object_id(user_id).ok_or_else(not_found)?;
        let user = self.users.find_by_id(&id).await?.ok_or_else(not_found)?;

        Ok((id, user))
    }
}
