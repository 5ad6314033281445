//! Authentication HTTP Handlers
//!
//! 가입, 로그인, 토큰 갱신과 현재 사용자 관련 엔드포인트입니다.
//!
//! # Endpoints
//!
//! - `POST /api/v1/auth/register` - 회원가입 (공개)
//! - `POST /api/v1/auth/login` - 로그인 (공개)
//! - `POST /api/v1/auth/refresh` - 리프레시 토큰 교체 (리프레시 토큰으로 인증)
//! - `POST /api/v1/auth/logout`, `GET /me`, `PUT /update-profile`, `PUT /change-password` - 액세스 토큰 필요
use actix_web::{get, post, put, web, HttpRequest, HttpResponse};
use validator::Validate;
use crate::{
    domain::dto::users::{
        request::{ChangePasswordRequest, LoginRequest, RefreshTokenRequest, RegisterRequest, UpdateProfileRequest},
        response::MessageResponse,
    },
    domain::models::auth::authenticated_user::AuthenticatedUser,
    middlewares::AuthMiddleware,
    services::auth::{AuthService, TokenService},
};
use crate::errors::errors::AppError;

/// 회원가입
///
/// # Endpoint
/// `POST /api/v1/auth/register`
#[post("/register")]
pub async fn register(
    auth: web::Data<AuthService>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = auth.register(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

/// 로컬 로그인
///
/// # Endpoint
/// `POST /api/v1/auth/login`
#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = auth.login(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 토큰 갱신
///
/// 리프레시 토큰은 `Authorization: Bearer` 헤더 또는 본문의 `refresh_token`으로 받습니다.
/// 헤더가 우선합니다.
///
/// # Endpoint
/// `POST /api/v1/auth/refresh`
#[post("/refresh")]
pub async fn refresh(
    req: HttpRequest,
    auth: web::Data<AuthService>,
    tokens: web::Data<TokenService>,
    payload: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, AppError> {
    let from_header = req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| tokens.extract_bearer_token(h).ok())
        .map(str::to_string);

    let refresh_token = from_header
        .or_else(|| payload.map(|p| p.into_inner().refresh_token))
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::AuthenticationError("리프레시 토큰이 필요합니다".to_string()))?;

    let pair = auth.refresh_session(&refresh_token).await?;

    Ok(HttpResponse::Ok().json(pair))
}

/// 로그아웃 (모든 리프레시 토큰 무효화)
#[post("/logout", wrap = "AuthMiddleware::required()")]
pub async fn logout(
    auth: web::Data<AuthService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    auth.logout(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("로그아웃되었습니다")))
}

/// 현재 사용자 정보 조회
#[get("/me", wrap = "AuthMiddleware::required()")]
pub async fn me(
    auth: web::Data<AuthService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = auth.me(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[put("/update-profile", wrap = "AuthMiddleware::required()")]
pub async fn update_profile(
    auth: web::Data<AuthService>,
    user: AuthenticatedUser,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let profile = auth.update_profile(&user.user_id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[put("/change-password", wrap = "AuthMiddleware::required()")]
pub async fn change_password(
    auth: web::Data<AuthService>,
    user: AuthenticatedUser,
    payload: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    auth.change_password(&user.user_id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("비밀번호가 변경되었습니다")))
}
