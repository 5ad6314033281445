//! 결제 게이트웨이 클라이언트
//!
//! 호스팅 결제 페이지 링크 발급과 거래 검증을 담당하는 [`PaymentGateway`] trait과
//! Flutterwave v3 REST API 구현인 [`FlutterwaveClient`]를 제공합니다.
//!
//! - `POST /v3/payments` - 결제 링크 발급
//! - `GET /v3/transactions/{id}/verify` - 거래 검증
//!
//! ## 에러 매핑
//!
//! | 상황 | AppError |
//! |---|---|
//! | 타임아웃, 연결 실패 | `GatewayUnavailable` (503) |
//! | 2xx 이외 응답, 링크/거래 정보 누락, 응답 파싱 실패 | `ExternalServiceError` (500) |

use std::time::Duration;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::config::FlutterwaveSettings;
use crate::domain::dto::payments::request::TransactionId;
use crate::errors::errors::AppError;

/// 결제 페이지에 표시할 구매자 정보
#[derive(Debug, Clone, Serialize)]
pub struct PaymentCustomer {
    pub email: String,
    pub name: String,
}

/// 결제 초기화 요청
#[derive(Debug, Clone)]
pub struct PaymentInitRequest {
    /// 게이트웨이에 전달하는 참조값 (결제 ID)
    pub tx_ref: String,
    pub amount: Decimal,
    pub currency: String,
    pub customer: PaymentCustomer,
}

/// 게이트웨이가 확인한 거래 정보
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionVerification {
    pub transaction_id: String,
    /// 결제 초기화 때 전달한 참조값
    pub tx_ref: String,
    /// `successful`, `failed`, `pending` 등 게이트웨이 원문 상태
    pub status: String,
    pub amount: Decimal,
    pub currency: String,
}

impl TransactionVerification {
    pub fn is_successful(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case("successful")
    }

    /// 최종 상태 여부 (`pending` 등 진행 중인 거래는 false)
    pub fn is_final(&self) -> bool {
        let status = self.status.trim();
        ["successful", "failed", "cancelled"].iter().any(|s| status.eq_ignore_ascii_case(s))
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// 호스팅 결제 페이지 링크를 생성합니다.
    async fn initialize_payment(&self, request: &PaymentInitRequest) -> Result<String, AppError>;

    /// 게이트웨이 거래 ID로 거래 결과를 조회합니다.
    async fn verify_transaction(&self, transaction_id: &str) -> Result<TransactionVerification, AppError>;
}

#[derive(Debug, Serialize)]
struct InitializePaymentBody<'a> {
    tx_ref: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    currency: &'a str,
    redirect_url: &'a str,
    payment_options: &'a str,
    customer: &'a PaymentCustomer,
}

#[derive(Debug, Deserialize)]
struct InitializePaymentResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<PaymentLinkData>,
}

#[derive(Debug, Deserialize)]
struct PaymentLinkData {
    link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VerifyTransactionResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<VerifiedTransactionData>,
}

#[derive(Debug, Deserialize)]
struct VerifiedTransactionData {
    id: TransactionId,
    tx_ref: String,
    status: String,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    currency: String,
}

impl From<VerifiedTransactionData> for TransactionVerification {
    fn from(data: VerifiedTransactionData) -> Self {
        Self {
            transaction_id: data.id.to_string(),
            tx_ref: data.tx_ref,
            status: data.status,
            amount: data.amount,
            currency: data.currency,
        }
    }
}

/// Flutterwave v3 클라이언트
///
/// ```rust,ignore
/// let gateway = FlutterwaveClient::new(FlutterwaveSettings::from_env())?;
/// let link = gateway.initialize_payment(&request).await?;
/// ```
pub struct FlutterwaveClient {
    http: reqwest::Client,
    settings: FlutterwaveSettings,
}

impl FlutterwaveClient {
    pub fn new(settings: FlutterwaveSettings) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| AppError::InternalError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { http, settings })
    }

    fn payments_url(&self) -> String {
        format!("{}/v3/payments", self.settings.base_url.trim_end_matches('/'))
    }

    fn verify_url(&self, transaction_id: &str) -> String {
        format!(
            "{}/v3/transactions/{}/verify",
            self.settings.base_url.trim_end_matches('/'),
            transaction_id
        )
    }
}

fn map_transport_error(e: reqwest::Error) -> AppError {
    if e.is_timeout() || e.is_connect() {
        log::warn!("결제 게이트웨이 응답 없음: {}", e);
        AppError::GatewayUnavailable("결제 게이트웨이에 연결할 수 없습니다".to_string())
    } else {
        AppError::ExternalServiceError(format!("결제 게이트웨이 요청 실패: {}", e))
    }
}

#[async_trait]
impl PaymentGateway for FlutterwaveClient {
    async fn initialize_payment(&self, request: &PaymentInitRequest) -> Result<String, AppError> {
        let body = InitializePaymentBody {
            tx_ref: &request.tx_ref,
            amount: request.amount,
            currency: &request.currency,
            redirect_url: &self.settings.redirect_url,
            payment_options: "card,banktransfer,ussd",
            customer: &request.customer,
        };

        let response = self.http
            .post(self.payments_url())
            .bearer_auth(&self.settings.secret_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            log::error!("결제 초기화 실패 tx_ref={} status={} body={}", request.tx_ref, status, text);
            return Err(AppError::ExternalServiceError(format!(
                "결제 게이트웨이 오류 (status {})", status.as_u16()
            )));
        }

        let parsed: InitializePaymentResponse = serde_json::from_str(&text)
            .map_err(|e| AppError::ExternalServiceError(format!("결제 게이트웨이 응답 파싱 실패: {}", e)))?;

        if parsed.status != "success" {
            return Err(AppError::ExternalServiceError(format!(
                "결제 초기화 거절: {}", parsed.message.unwrap_or_default()
            )));
        }

        parsed.data
            .and_then(|data| data.link)
            .ok_or_else(|| AppError::ExternalServiceError("결제 링크가 응답에 없습니다".to_string()))
    }

    async fn verify_transaction(&self, transaction_id: &str) -> Result<TransactionVerification, AppError> {
        let response = self.http
            .get(self.verify_url(transaction_id))
            .bearer_auth(&self.settings.secret_key)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            log::error!("거래 검증 실패 transaction={} status={} body={}", transaction_id, status, text);
            return Err(AppError::ExternalServiceError(format!(
                "결제 게이트웨이 오류 (status {})", status.as_u16()
            )));
        }

        parse_verification(&text)
    }
}

fn parse_verification(text: &str) -> Result<TransactionVerification, AppError> {
    let parsed: VerifyTransactionResponse = serde_json::from_str(text)
        .map_err(|e| AppError::ExternalServiceError(format!("결제 게이트웨이 응답 파싱 실패: {}", e)))?;

    if parsed.status != "success" {
        return Err(AppError::ExternalServiceError(format!(
            "거래 검증 거절: {}", parsed.message.unwrap_or_default()
        )));
    }

    parsed.data
        .map(TransactionVerification::from)
        .ok_or_else(|| AppError::ExternalServiceError("거래 정보가 응답에 없습니다".to_string()))
}

#[cfg(test)]
pub mod testing {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use super::*;

    /// 게이트웨이 호출을 기록하고 미리 정한 결과를 돌려주는 테스트 더블
    pub struct StubGateway {
        pub fail_with_unavailable: bool,
        pub requests: Mutex<Vec<PaymentInitRequest>>,
        /// 거래 ID별 검증 결과
        pub transactions: Mutex<HashMap<String, TransactionVerification>>,
    }

    impl StubGateway {
        pub fn ok() -> Self {
            Self {
                fail_with_unavailable: false,
                requests: Mutex::new(Vec::new()),
                transactions: Mutex::new(HashMap::new()),
            }
        }

        pub fn unavailable() -> Self {
            Self { fail_with_unavailable: true, ..Self::ok() }
        }

        pub fn record_transaction(&self, verification: TransactionVerification) {
            self.transactions
                .lock()
                .unwrap()
                .insert(verification.transaction_id.clone(), verification);
        }
    }

    #[async_trait]
    impl PaymentGateway for StubGateway {
        async fn initialize_payment(&self, request: &PaymentInitRequest) -> Result<String, AppError> {
            self.requests.lock().unwrap().push(request.clone());

            if self.fail_with_unavailable {
                return Err(AppError::GatewayUnavailable("timeout".to_string()));
            }
            Ok(format!("https://checkout.example.com/pay/{}", request.tx_ref))
        }

        async fn verify_transaction(&self, transaction_id: &str) -> Result<TransactionVerification, AppError> {
            if self.fail_with_unavailable {
                return Err(AppError::GatewayUnavailable("timeout".to_string()));
            }
            self.transactions
                .lock()
                .unwrap()
                .get(transaction_id)
                .cloned()
                .ok_or_else(|| AppError::ExternalServiceError("No transaction was found for this id".to_string()))
        }
    }
}
