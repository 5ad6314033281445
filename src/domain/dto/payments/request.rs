//! Flutterwave 웹훅 페이로드
//!
//! ```json
//! {
//!   "event": "charge.completed",
//!   "data": { "id": 285959875, "tx_ref": "65a1f0c2e4b0a1b2c3d4e5f6", "status": "successful" }
//! }
//! ```
use serde::{Deserialize, Serialize};

/// 게이트웨이 거래 ID (숫자 또는 문자열로 전달됨)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransactionId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionId::Number(n) => write!(f, "{}", n),
            TransactionId::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlutterwaveWebhookData {
    #[serde(default)]
    pub id: Option<TransactionId>,
    pub tx_ref: String,
    pub status: String,
}

/// 웹훅 요청 본문
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlutterwaveWebhook {
    #[serde(default)]
    pub event: Option<String>,
    pub data: FlutterwaveWebhookData,
}

impl FlutterwaveWebhook {
    /// 게이트웨이가 결제 성공을 알렸는지 여부 (`successful`, 대소문자 무시)
    pub fn is_successful(&self) -> bool {
        self.data.status.trim().eq_ignore_ascii_case("successful")
    }

    pub fn transaction_id(&self) -> Option<String> {
        self.data.id.as_ref().map(|id| id.to_string())
    }
}

/// 거래 검증 쿼리 (`?txId=285959875`)
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyTransactionQuery {
    #[serde(rename = "txId", alias = "tx_id")]
    pub tx_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_transaction_ids() {
        let numeric: FlutterwaveWebhook = serde_json::from_str(
            r#"{"event":"charge.completed","data":{"id":285959875,"tx_ref":"P1","status":"successful"}}"#
        ).unwrap();
        let text: FlutterwaveWebhook = serde_json::from_str(
            r#"{"data":{"id":"T1","tx_ref":"P1","status":"failed"}}"#
        ).unwrap();

        assert_eq!(numeric.transaction_id().as_deref(), Some("285959875"));
        assert!(numeric.is_successful());
        assert_eq!(text.transaction_id().as_deref(), Some("T1"));
        assert!(!text.is_successful());
    }

    #[test]
    fn test_missing_transaction_id_is_allowed() {
        let webhook: FlutterwaveWebhook = serde_json::from_str(
            r#"{"data":{"tx_ref":"P1","status":"SUCCESSFUL"}}"#
        ).unwrap();

        assert!(webhook.transaction_id().is_none());
        assert!(webhook.is_successful());
    }
}
