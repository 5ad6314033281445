//! # Configuration Module
//!
//! 마켓플레이스 백엔드의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 패스워드 해싱, 서버, 요청 제한 설정
//! - [`auth_config`] - JWT 토큰 쌍, 세션 정책 설정
//! - [`payment_config`] - 결제 게이트웨이(Flutterwave) 설정
//!
//! ## 설계 원칙
//!
//! ### 1. 환경 분리 (Environment Separation)
//!
//! 개발, 테스트, 스테이징, 프로덕션 환경별로 다른 설정값을 제공합니다.
//! `PROFILE` 값에 따라 `.env.dev` / `.env.prod` 파일이 먼저 로드됩니다.
//!
//! ### 2. 보안 우선 (Security First)
//!
//! - 민감한 정보는 환경 변수로만 제공
//! - 기본값은 개발 환경에서만 안전하며, 사용 시 경고 로그 출력
//!
//! ### 3. 생성 시점 고정
//!
//! 서비스는 `JwtSettings`, `FlutterwaveSettings` 같은 설정 묶음을 생성자로 받습니다.
//! 테스트에서는 환경 변수 없이 설정 묶음을 직접 만들어 주입합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{Environment, ServerConfig, JwtSettings};
//!
//! let env = Environment::current();
//! let host = ServerConfig::host();
//! let port = ServerConfig::port();
//! let jwt = JwtSettings::from_env();
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # 환경 설정
//! export ENVIRONMENT="production"  # development, test, staging, production
//!
//! # 보안 설정
//! export BCRYPT_COST="12"          # 4-15 범위
//! export JWT_ACCESS_SECRET="..."
//! export JWT_REFRESH_SECRET="..."
//!
//! # 결제
//! export FLW_SECRET_KEY="..."
//! export FLW_REDIRECT_URL="https://shop.example.com/checkout/complete"
//! ```

pub mod data_config;
pub mod auth_config;
pub mod payment_config;

pub use data_config::*;
pub use auth_config::*;
pub use payment_config::*;
