//! 결제 게이트웨이(Flutterwave) 설정 관리 모듈
//!
//! ```bash
//! export FLW_SECRET_KEY="FLWSECK-xxxxxxxx"
//! export FLW_BASE_URL="https://api.flutterwave.com"
//! export FLW_REDIRECT_URL="https://shop.example.com/checkout/complete"
//! export FLW_CURRENCY="USD"
//! export FLW_WEBHOOK_HASH="dashboard-secret-hash"
//! export FLW_TIMEOUT_SECS="10"
//! ```

use std::env;

/// Flutterwave 환경 변수 접근자
pub struct FlutterwaveConfig;

impl FlutterwaveConfig {
    /// API 호출에 사용하는 시크릿 키 (`Authorization: Bearer ...`)
    pub fn secret_key() -> String {
        env::var("FLW_SECRET_KEY")
            .unwrap_or_else(|_| {
                log::warn!("FLW_SECRET_KEY not set, payment initialization will be rejected by the gateway");
                String::new()
            })
    }

    /// API 기본 URL. 기본값: `https://api.flutterwave.com`
    pub fn base_url() -> String {
        env::var("FLW_BASE_URL")
            .unwrap_or_else(|_| "https://api.flutterwave.com".to_string())
    }

    /// 결제 완료 후 사용자가 돌아올 주소
    pub fn redirect_url() -> String {
        env::var("FLW_REDIRECT_URL")
            .unwrap_or_else(|_| "http://localhost:3000/checkout/complete".to_string())
    }

    /// 장바구니에 통화 정보가 없을 때 사용할 기본 통화. 기본값: `USD`
    pub fn currency() -> String {
        env::var("FLW_CURRENCY")
            .map(|c| c.to_uppercase())
            .unwrap_or_else(|_| "USD".to_string())
    }

    /// 웹훅 `verif-hash` 헤더와 비교할 값
    ///
    /// 설정되지 않은 경우 웹훅 헤더 검증을 건너뜁니다.
    pub fn webhook_hash() -> Option<String> {
        env::var("FLW_WEBHOOK_HASH")
            .ok()
            .filter(|v| !v.trim().is_empty())
    }

    /// 게이트웨이 호출 타임아웃(초). 기본값: 10
    pub fn timeout_secs() -> u64 {
        env::var("FLW_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10)
    }
}

/// 결제 클라이언트와 체크아웃 서비스가 생성 시점에 고정하는 설정 묶음
#[derive(Debug, Clone)]
pub struct FlutterwaveSettings {
    pub secret_key: String,
    pub base_url: String,
    pub redirect_url: String,
    pub currency: String,
    pub webhook_hash: Option<String>,
    pub timeout_secs: u64,
}

impl FlutterwaveSettings {
    pub fn from_env() -> Self {
        Self {
            secret_key: FlutterwaveConfig::secret_key(),
            base_url: FlutterwaveConfig::base_url(),
            redirect_url: FlutterwaveConfig::redirect_url(),
            currency: FlutterwaveConfig::currency(),
            webhook_hash: FlutterwaveConfig::webhook_hash(),
            timeout_secs: FlutterwaveConfig::timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flutterwave_defaults() {
        if env::var("FLW_CURRENCY").is_err() {
            assert_eq!(FlutterwaveConfig::currency(), "USD");
        }

        if env::var("FLW_TIMEOUT_SECS").is_err() {
            assert_eq!(FlutterwaveConfig::timeout_secs(), 10);
        }

        if env::var("FLW_BASE_URL").is_err() {
            assert_eq!(FlutterwaveConfig::base_url(), "https://api.flutterwave.com");
        }
    }
}
