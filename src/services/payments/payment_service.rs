//! 결제 내역 조회 서비스

use std::sync::Arc;
use crate::{
    domain::dto::payments::response::PaymentResponse,
    domain::models::auth::authenticated_user::AuthenticatedUser,
    repositories::{parse_object_id, payments::PaymentStore},
};
use crate::errors::errors::AppError;

pub struct PaymentService {
    payments: Arc<dyn PaymentStore>,
}

impl PaymentService {
    pub fn new(payments: Arc<dyn PaymentStore>) -> Self {
        Self { payments }
    }

    /// 사용자의 결제 내역 (최신순)
    pub async fn list_payments(&self, user: &AuthenticatedUser) -> Result<Vec<PaymentResponse>, AppError> {
        let payments = self.payments.list_for_user(&user.object_id()?).await?;
        Ok(payments.into_iter().map(PaymentResponse::from).collect())
    }

    /// 결제 단건 조회. 다른 사용자의 결제는 `NotFound`입니다.
    pub async fn get_payment(&self, user: &AuthenticatedUser, payment_id: &str) -> Result<PaymentResponse, AppError> {
        let not_found = || AppError::NotFound("결제를 찾을 수 없습니다".to_string());
        let id = parse_object_id(payment_id).ok_or_else(not_found)?;

        self.payments
            .find_for_user(&id, &user.object_id()?)
            .await?
            .map(PaymentResponse::from)
            .ok_or_else(not_found)
    }
}
