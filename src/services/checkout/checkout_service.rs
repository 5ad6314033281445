//! # 체크아웃 및 결제 정산 서비스
//!
//! 장바구니로부터 주문 스냅샷과 결제 레코드를 만들고, 게이트웨이 웹훅으로
//! 두 레코드의 최종 상태를 확정합니다.
//!
//! ## 상태 전이
//!
//! ```text
//! Payment: PENDING ──successful──▶ SUCCESS
//!                  └──그 외─────▶ FAILED
//! Order:   PENDING ──────────────▶ PAID | FAILED
//! ```
//!
//! 모든 전이는 `status = PENDING` 조건부 update로만 일어나므로
//! 한 번 확정된 상태는 되돌아가지 않습니다.
//!
//! ## 웹훅 재전송
//!
//! 같은 결과의 웹훅이 다시 오면 성공으로 응답하고 아무것도 바꾸지 않습니다.
//! 이때도 주문 전이를 다시 시도하므로, 결제만 확정되고 주문 갱신 전에 실패한
//! 이전 처리는 재전송으로 복구됩니다. 이미 확정된 결제와 다른 결과가 오면
//! `ConflictError`로 거절하고 에러 로그를 남깁니다.
//!
//! ## 거래 검증
//!
//! 웹훅이 유실된 경우 사용자가 게이트웨이 거래 ID로 검증을 요청할 수 있습니다.
//! 최종 상태인 거래는 웹훅과 같은 경로로 반영하고, 진행 중인 거래는 아무것도 바꾸지 않습니다.

use std::collections::BTreeSet;
use std::sync::Arc;
use crate::{
    domain::dto::{
        checkout::response::{CheckoutResponse, OrderStatusResponse},
        orders::response::OrderResponse,
        payments::{
            request::FlutterwaveWebhook,
            response::{PaymentVerificationResponse, WebhookAck},
        },
    },
    domain::entities::{
        orders::order::{Order, OrderItem, OrderStatus},
        payments::payment::{Payment, PaymentStatus},
    },
    domain::models::auth::authenticated_user::AuthenticatedUser,
    repositories::{
        orders::OrderStore, parse_object_id, payments::PaymentStore, users::UserStore,
    },
    services::carts::CartService,
    services::payments::gateway::{PaymentCustomer, PaymentGateway, PaymentInitRequest, TransactionVerification},
};
use crate::errors::errors::AppError;

pub struct CheckoutService {
    orders: Arc<dyn OrderStore>,
    payments: Arc<dyn PaymentStore>,
    users: Arc<dyn UserStore>,
    carts: Arc<CartService>,
    gateway: Arc<dyn PaymentGateway>,
    /// 설정되어 있으면 웹훅의 `verif-hash` 헤더와 비교합니다
    webhook_hash: Option<String>,
}

impl CheckoutService {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        payments: Arc<dyn PaymentStore>,
        users: Arc<dyn UserStore>,
        carts: Arc<CartService>,
        gateway: Arc<dyn PaymentGateway>,
        webhook_hash: Option<String>,
    ) -> Self {
        Self { orders, payments, users, carts, gateway, webhook_hash }
    }

    /// 체크아웃 생성
    ///
    /// 현재 상품 가격으로 주문 라인을 복사하고, 주문(PENDING)과 결제(PENDING)를 저장한 뒤
    /// 게이트웨이에서 결제 링크를 발급받습니다. 장바구니는 비우지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 장바구니가 비어 있음
    /// * `AppError::ValidationError` - 판매 중이 아닌 상품 또는 통화가 섞인 장바구니
    /// * `AppError::GatewayUnavailable` - 게이트웨이 타임아웃/연결 실패 (레코드는 PENDING 유지)
    pub async fn create_checkout(&self, user: &AuthenticatedUser) -> Result<CheckoutResponse, AppError> {
        let user_id = user.object_id()?;

        let lines = self.carts.load_lines(&user_id).await?;
        if lines.is_empty() {
            return Err(AppError::NotFound("장바구니가 비어 있습니다".to_string()));
        }

        if let Some(line) = lines.iter().find(|line| !line.product.is_purchasable()) {
            return Err(AppError::ValidationError(format!(
                "판매 중인 상품이 아닙니다: {}", line.product.name
            )));
        }

        let currencies: BTreeSet<&str> = lines.iter().map(|line| line.product.currency.as_str()).collect();
        if currencies.len() > 1 {
            return Err(AppError::ValidationError("통화가 다른 상품은 함께 결제할 수 없습니다".to_string()));
        }
        let currency = lines[0].product.currency.clone();

        let items = lines
            .iter()
            .filter_map(|line| {
                line.product.id.map(|product_id| OrderItem {
                    product_id,
                    product_name: line.product.name.clone(),
                    quantity: line.quantity,
                    unit_price: line.product.price,
                })
            })
            .collect();

        let order = self.orders.insert(Order::pending(user_id, items, currency.clone())?).await?;
        let order_id = order.id.ok_or_else(|| AppError::InternalError("주문 ID가 없습니다".to_string()))?;

        let payment = self.payments
            .insert(Payment::pending(order_id, user_id, order.total_amount, currency.clone()))
            .await?;

        log::info!(
            "체크아웃 생성: order={} payment={} amount={} {}",
            order_id, payment.provider_ref, order.total_amount, currency
        );

        let customer = match self.users.find_by_id(&user_id).await? {
            Some(account) => PaymentCustomer { name: account.display_name(), email: account.email },
            None => PaymentCustomer { name: user.email.clone(), email: user.email.clone() },
        };

        let request = PaymentInitRequest {
            tx_ref: payment.provider_ref.clone(),
            amount: order.total_amount,
            currency,
            customer,
        };

        let payment_link = self.gateway.initialize_payment(&request).await.map_err(|e| {
            log::warn!("결제 링크 발급 실패 (주문 {}은 PENDING 유지): {}", order_id, e);
            e
        })?;

        Ok(CheckoutResponse {
            order_id: order_id.to_hex(),
            payment_id: payment.provider_ref,
            payment_link,
        })
    }

    /// 주문 상태 확인
    ///
    /// 실제 확정은 웹훅이 담당하므로 현재 상태를 그대로 보여줍니다.
    pub async fn confirm_checkout(&self, user: &AuthenticatedUser, order_id: &str) -> Result<OrderStatusResponse, AppError> {
        let id = parse_object_id(order_id).ok_or_else(order_not_found)?;
        let details = self.orders
            .find_details_for_user(&id, &user.object_id()?)
            .await?
            .ok_or_else(order_not_found)?;

        let payment_status = details.payments
            .iter()
            .max_by_key(|payment| payment.created_at)
            .map(|payment| payment.status);

        Ok(OrderStatusResponse {
            order_id: id.to_hex(),
            status: details.order.status,
            payment_status,
        })
    }

    /// 웹훅 헤더 검증
    ///
    /// `FLW_WEBHOOK_HASH`가 설정되지 않았으면 검증하지 않습니다.
    pub fn verify_webhook_signature(&self, presented: Option<&str>) -> Result<(), AppError> {
        match self.webhook_hash.as_deref() {
            None => Ok(()),
            Some(expected) if presented == Some(expected) => Ok(()),
            Some(_) => {
                log::warn!("웹훅 서명 불일치");
                Err(AppError::AuthenticationError("유효하지 않은 웹훅 서명입니다".to_string()))
            }
        }
    }

    /// 결제 웹훅 처리
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - `tx_ref`에 해당하는 결제가 없음 (아무것도 변경하지 않음)
    /// * `AppError::ConflictError` - 이미 다른 상태로 확정된 결제
    pub async fn handle_webhook(&self, payload: FlutterwaveWebhook) -> Result<WebhookAck, AppError> {
        let payment = self.payments
            .find_by_provider_ref(payload.data.tx_ref.trim())
            .await?
            .ok_or_else(payment_not_found)?;

        self.settle(payment, payload.is_successful(), payload.transaction_id()).await
    }

    /// 게이트웨이 거래 검증
    ///
    /// 검증된 거래의 `tx_ref`가 요청한 사용자의 결제여야 합니다.
    /// 성공 거래라도 금액이 모자라거나 통화가 다르면 실패로 반영합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 비어 있거나 형식이 잘못된 거래 ID
    /// * `AppError::NotFound` - 사용자의 결제가 아님
    /// * `AppError::ConflictError` - 이미 다른 상태로 확정된 결제
    /// * `AppError::GatewayUnavailable` - 게이트웨이 타임아웃/연결 실패
    pub async fn verify_transaction(
        &self,
        user: &AuthenticatedUser,
        transaction_id: &str,
    ) -> Result<PaymentVerificationResponse, AppError> {
        let transaction_id = transaction_id.trim();
        if transaction_id.is_empty() || !transaction_id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AppError::ValidationError("유효하지 않은 거래 ID입니다".to_string()));
        }
        let user_id = user.object_id()?;

        let verification = self.gateway.verify_transaction(transaction_id).await?;

        let payment = self.payments
            .find_by_provider_ref(verification.tx_ref.trim())
            .await?
            .filter(|payment| payment.user_id == user_id)
            .ok_or_else(payment_not_found)?;

        let (payment_status, order_status) = if verification.is_final() {
            let successful = verification.is_successful() && covers_payment(&verification, &payment);
            let ack = self.settle(payment, successful, Some(verification.transaction_id.clone())).await?;
            (ack.payment_status, ack.order_status)
        } else {
            log::info!("진행 중인 거래: transaction={} status={}", transaction_id, verification.status);
            let order = self.orders.find_for_user(&payment.order_id, &user_id).await?;
            (payment.status, order.map(|order| order.status))
        };

        Ok(PaymentVerificationResponse {
            transaction_id: verification.transaction_id,
            tx_ref: verification.tx_ref,
            gateway_status: verification.status,
            amount: verification.amount,
            currency: verification.currency,
            payment_status,
            order_status,
        })
    }

    /// 결제와 주문을 최종 상태로 전이합니다. 웹훅과 거래 검증이 함께 사용합니다.
    async fn settle(
        &self,
        payment: Payment,
        successful: bool,
        transaction_id: Option<String>,
    ) -> Result<WebhookAck, AppError> {
        let payment_id = payment.id
            .ok_or_else(|| AppError::InternalError("결제 ID가 없습니다".to_string()))?;

        let (payment_status, order_status) = if successful {
            (PaymentStatus::Success, OrderStatus::Paid)
        } else {
            (PaymentStatus::Failed, OrderStatus::Failed)
        };

        let settled = self.payments
            .settle(&payment_id, payment_status, transaction_id.as_deref())
            .await?;

        if !settled {
            let current = self.payments
                .find_by_id(&payment_id)
                .await?
                .ok_or_else(payment_not_found)?;

            if current.status != payment_status {
                log::error!(
                    "결제 상태 충돌: payment={} 확정={} 수신={}",
                    payment_id, current.status.as_str(), payment_status.as_str()
                );
                return Err(AppError::ConflictError("이미 다른 상태로 확정된 결제입니다".to_string()));
            }

            log::info!("중복 확정 요청: payment={} status={}", payment_id, payment_status.as_str());
        } else {
            log::info!(
                "결제 확정: payment={} status={} transaction={}",
                payment_id, payment_status.as_str(), transaction_id.as_deref().unwrap_or("-")
            );
        }

        if self.orders.transition_status(&payment.order_id, OrderStatus::Pending, order_status).await? {
            log::info!("주문 상태 변경: order={} status={}", payment.order_id, order_status.as_str());
        }

        let order = self.orders.find_for_user(&payment.order_id, &payment.user_id).await?;

        Ok(WebhookAck {
            payment_id: payment_id.to_hex(),
            payment_status,
            order_status: order.map(|order| order.status),
        })
    }

    /// 사용자의 주문 목록 (최신순, 결제 포함)
    pub async fn list_orders(&self, user: &AuthenticatedUser) -> Result<Vec<OrderResponse>, AppError> {
        let details = self.orders.list_details_for_user(&user.object_id()?).await?;
        Ok(details.into_iter().map(OrderResponse::from).collect())
    }

    /// 주문 단건 조회. 다른 사용자의 주문과 잘못된 ID는 `NotFound`입니다.
    pub async fn get_order(&self, user: &AuthenticatedUser, order_id: &str) -> Result<OrderResponse, AppError> {
        let id = parse_object_id(order_id).ok_or_else(order_not_found)?;

        self.orders
            .find_details_for_user(&id, &user.object_id()?)
            .await?
            .map(OrderResponse::from)
            .ok_or_else(order_not_found)
    }
}

/// 성공 거래의 금액과 통화가 결제를 충족하는지 확인
fn covers_payment(verification: &TransactionVerification, payment: &Payment) -> bool {
    let covered = verification.amount >= payment.amount
        && verification.currency.trim().eq_ignore_ascii_case(&payment.currency);
    if !covered {
        log::error!(
            "거래 금액/통화 불일치: tx_ref={} 결제={} {} 거래={} {}",
            verification.tx_ref, payment.amount, payment.currency, verification.amount, verification.currency
        );
    }
    covered
}

fn order_not_found() -> AppError {
    AppError::NotFound("주문을 찾을 수 없습니다".to_string())
}

fn payment_not_found() -> AppError {
    AppError::NotFound("결제를 찾을 수 없습니다".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use mongodb::bson::oid::ObjectId;
    use rust_decimal::Decimal;
    use crate::domain::dto::carts::request::AddCartItemRequest;
    use crate::domain::entities::products::product::{Product, ProductStatus};
    use crate::domain::entities::users::user::Role;
    use crate::repositories::memory::MemoryStore;
    use crate::repositories::products::{ProductStore, ProductUpdate};
    use crate::services::payments::gateway::testing::StubGateway;

    struct Fixture {
        store: Arc<MemoryStore>,
        carts: Arc<CartService>,
        gateway: Arc<StubGateway>,
        service: CheckoutService,
    }

    fn fixture_with(gateway: StubGateway, webhook_hash: Option<&str>) -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let carts = Arc::new(CartService::new(store.clone(), store.clone()));
        let gateway = Arc::new(gateway);
        let service = CheckoutService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            carts.clone(),
            gateway.clone(),
            webhook_hash.map(str::to_string),
        );
        Fixture { store, carts, gateway, service }
    }

    fn fixture() -> Fixture {
        fixture_with(StubGateway::ok(), None)
    }

    fn buyer() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: ObjectId::new().to_hex(),
            email: "buyer@example.com".to_string(),
            role: Role::Buyer,
        }
    }

    fn decimal(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    async fn seed_product(store: &MemoryStore, slug: &str, price: &str, currency: &str) -> ObjectId {
        let product = Product::new(
            ObjectId::new(),
            slug.to_string(),
            slug.to_string(),
            None,
            decimal(price),
            currency.to_string(),
            ProductStatus::Active,
        );
        let id = product.id.unwrap();
        ProductStore::insert(store, product).await.unwrap();
        id
    }

    async fn add_to_cart(fixture: &Fixture, user: &AuthenticatedUser, product_id: ObjectId, quantity: u32) {
        fixture.carts
            .add_item(&user.object_id().unwrap(), AddCartItemRequest { product_id: product_id.to_hex(), quantity })
            .await
            .unwrap();
    }

    /// 10.00 × 2 + 5.00 × 1 장바구니로 체크아웃
    async fn checkout(fixture: &Fixture, user: &AuthenticatedUser) -> CheckoutResponse {
        let a = seed_product(&fixture.store, "a", "10.00", "USD").await;
        let b = seed_product(&fixture.store, "b", "5.00", "USD").await;
        add_to_cart(fixture, user, a, 2).await;
        add_to_cart(fixture, user, b, 1).await;

        fixture.service.create_checkout(user).await.unwrap()
    }

    fn webhook(tx_ref: &str, status: &str, id: &str) -> FlutterwaveWebhook {
        serde_json::from_value(serde_json::json!({
            "event": "charge.completed",
            "data": { "id": id, "tx_ref": tx_ref, "status": status }
        })).unwrap()
    }

    #[actix_web::test]
    async fn test_checkout_snapshots_cart_into_pending_records() {
        let fixture = fixture();
        let user = buyer();

        let response = checkout(&fixture, &user).await;

        let order = fixture.store.order(&ObjectId::parse_str(&response.order_id).unwrap()).unwrap();
        let payment = fixture.store.payment(&ObjectId::parse_str(&response.payment_id).unwrap()).unwrap();

        assert_eq!(order.total_amount, decimal("25.00"));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.amount, decimal("25.00"));
        assert_eq!(payment.provider_ref, response.payment_id);
        assert!(response.payment_link.ends_with(&response.payment_id));

        let requests = fixture.gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].tx_ref, response.payment_id);
        assert_eq!(requests[0].amount, decimal("25.00"));
        assert_eq!(requests[0].customer.email, "buyer@example.com");
    }

    #[actix_web::test]
    async fn test_checkout_does_not_clear_cart() {
        let fixture = fixture();
        let user = buyer();

        checkout(&fixture, &user).await;

        let lines = fixture.carts.load_lines(&user.object_id().unwrap()).await.unwrap();
        assert_eq!(lines.len(), 2);
    }

    #[actix_web::test]
    async fn test_empty_cart_is_not_found() {
        let fixture = fixture();

        let result = fixture.service.create_checkout(&buyer()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(fixture.store.order_count(), 0);
    }

    #[actix_web::test]
    async fn test_mixed_currency_cart_is_rejected() {
        let fixture = fixture();
        let user = buyer();
        let usd = seed_product(&fixture.store, "usd", "1.00", "USD").await;
        let ngn = seed_product(&fixture.store, "ngn", "1.00", "NGN").await;
        add_to_cart(&fixture, &user, usd, 1).await;
        add_to_cart(&fixture, &user, ngn, 1).await;

        let result = fixture.service.create_checkout(&user).await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(fixture.store.order_count(), 0);
    }

    #[actix_web::test]
    async fn test_later_price_change_does_not_alter_order() {
        let fixture = fixture();
        let user = buyer();
        let product = seed_product(&fixture.store, "a", "10.00", "USD").await;
        add_to_cart(&fixture, &user, product, 1).await;

        let response = fixture.service.create_checkout(&user).await.unwrap();
        let update = ProductUpdate { price: Some(decimal("99.00")), ..Default::default() };
        ProductStore::update(fixture.store.as_ref(), &product, &update).await.unwrap();

        let order = fixture.service.get_order(&user, &response.order_id).await.unwrap();
        assert_eq!(order.items[0].unit_price, decimal("10.00"));
        assert_eq!(order.total_amount, decimal("10.00"));
    }

    #[actix_web::test]
    async fn test_gateway_failure_keeps_records_pending() {
        let fixture = fixture_with(StubGateway::unavailable(), None);
        let user = buyer();
        let product = seed_product(&fixture.store, "a", "10.00", "USD").await;
        add_to_cart(&fixture, &user, product, 1).await;

        let result = fixture.service.create_checkout(&user).await;

        assert!(matches!(result, Err(AppError::GatewayUnavailable(_))));
        assert_eq!(fixture.store.order_count(), 1);
        assert_eq!(fixture.store.payment_count(), 1);
        let orders = fixture.service.list_orders(&user).await.unwrap();
        assert_eq!(orders[0].status, OrderStatus::Pending);
        assert_eq!(orders[0].payments[0].status, PaymentStatus::Pending);
    }

    #[actix_web::test]
    async fn test_successful_webhook_settles_payment_and_order() {
        let fixture = fixture();
        let user = buyer();
        let response = checkout(&fixture, &user).await;

        let ack = fixture.service
            .handle_webhook(webhook(&response.payment_id, "successful", "T1"))
            .await
            .unwrap();

        assert_eq!(ack.payment_status, PaymentStatus::Success);
        assert_eq!(ack.order_status, Some(OrderStatus::Paid));

        let payment = fixture.store.payment(&ObjectId::parse_str(&response.payment_id).unwrap()).unwrap();
        assert_eq!(payment.status, PaymentStatus::Success);
        assert_eq!(payment.transaction_id.as_deref(), Some("T1"));

        let status = fixture.service.confirm_checkout(&user, &response.order_id).await.unwrap();
        assert_eq!(status.status, OrderStatus::Paid);
        assert_eq!(status.payment_status, Some(PaymentStatus::Success));
    }

    #[actix_web::test]
    async fn test_non_successful_webhook_fails_both() {
        let fixture = fixture();
        let user = buyer();
        let response = checkout(&fixture, &user).await;

        let ack = fixture.service
            .handle_webhook(webhook(&response.payment_id, "cancelled", "T2"))
            .await
            .unwrap();

        assert_eq!(ack.payment_status, PaymentStatus::Failed);
        assert_eq!(ack.order_status, Some(OrderStatus::Failed));
    }

    #[actix_web::test]
    async fn test_duplicate_webhook_is_idempotent() {
        let fixture = fixture();
        let user = buyer();
        let response = checkout(&fixture, &user).await;

        let first = fixture.service.handle_webhook(webhook(&response.payment_id, "successful", "T1")).await.unwrap();
        let second = fixture.service.handle_webhook(webhook(&response.payment_id, "successful", "T9")).await.unwrap();

        assert_eq!(first, second);
        let payment = fixture.store.payment(&ObjectId::parse_str(&response.payment_id).unwrap()).unwrap();
        assert_eq!(payment.transaction_id.as_deref(), Some("T1"));
    }

    #[actix_web::test]
    async fn test_conflicting_webhook_is_rejected() {
        let fixture = fixture();
        let user = buyer();
        let response = checkout(&fixture, &user).await;

        fixture.service.handle_webhook(webhook(&response.payment_id, "successful", "T1")).await.unwrap();
        let result = fixture.service.handle_webhook(webhook(&response.payment_id, "failed", "T1")).await;

        assert!(matches!(result, Err(AppError::ConflictError(_))));
        let order = fixture.store.order(&ObjectId::parse_str(&response.order_id).unwrap()).unwrap();
        assert_eq!(order.status, OrderStatus::Paid);
    }

    #[actix_web::test]
    async fn test_redelivery_heals_half_applied_settlement() {
        let fixture = fixture();
        let user = buyer();
        let response = checkout(&fixture, &user).await;
        let payment_id = ObjectId::parse_str(&response.payment_id).unwrap();

        // 결제만 확정되고 주문 갱신 전에 중단된 상황
        PaymentStore::settle(fixture.store.as_ref(), &payment_id, PaymentStatus::Success, Some("T1")).await.unwrap();

        let ack = fixture.service.handle_webhook(webhook(&response.payment_id, "successful", "T1")).await.unwrap();

        assert_eq!(ack.order_status, Some(OrderStatus::Paid));
    }

    #[actix_web::test]
    async fn test_unknown_reference_mutates_nothing() {
        let fixture = fixture();
        let user = buyer();
        let response = checkout(&fixture, &user).await;

        let result = fixture.service
            .handle_webhook(webhook(&ObjectId::new().to_hex(), "successful", "T1"))
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        let order = fixture.store.order(&ObjectId::parse_str(&response.order_id).unwrap()).unwrap();
        let payment = fixture.store.payment(&ObjectId::parse_str(&response.payment_id).unwrap()).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(payment.status, PaymentStatus::Pending);
    }

    #[actix_web::test]
    async fn test_orders_are_scoped_to_owner() {
        let fixture = fixture();
        let owner = buyer();
        let response = checkout(&fixture, &owner).await;
        let stranger = buyer();

        assert!(fixture.service.get_order(&owner, &response.order_id).await.is_ok());
        assert!(matches!(
            fixture.service.get_order(&stranger, &response.order_id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            fixture.service.get_order(&owner, "not-an-id").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            fixture.service.confirm_checkout(&stranger, &response.order_id).await,
            Err(AppError::NotFound(_))
        ));

        assert_eq!(fixture.service.list_orders(&owner).await.unwrap().len(), 1);
        assert!(fixture.service.list_orders(&stranger).await.unwrap().is_empty());
    }

    #[test]
    fn test_webhook_signature() {
        let open = fixture();
        assert!(open.service.verify_webhook_signature(None).is_ok());

        let guarded = fixture_with(StubGateway::ok(), Some("secret-hash"));
        assert!(guarded.service.verify_webhook_signature(Some("secret-hash")).is_ok());
        assert!(matches!(
            guarded.service.verify_webhook_signature(Some("wrong")),
            Err(AppError::AuthenticationError(_))
        ));
        assert!(guarded.service.verify_webhook_signature(None).is_err());
    }

    fn verification(tx_ref: &str, status: &str, amount: &str, currency: &str) -> TransactionVerification {
        TransactionVerification {
            transaction_id: "285959875".to_string(),
            tx_ref: tx_ref.to_string(),
            status: status.to_string(),
            amount: decimal(amount),
            currency: currency.to_string(),
        }
    }

    #[actix_web::test]
    async fn test_verified_transaction_settles_payment_and_order() {
        let fixture = fixture();
        let user = buyer();
        let response = checkout(&fixture, &user).await;
        fixture.gateway.record_transaction(verification(&response.payment_id, "successful", "25.00", "USD"));

        let verified = fixture.service.verify_transaction(&user, " 285959875 ").await.unwrap();

        assert_eq!(verified.tx_ref, response.payment_id);
        assert_eq!(verified.gateway_status, "successful");
        assert_eq!(verified.payment_status, PaymentStatus::Success);
        assert_eq!(verified.order_status, Some(OrderStatus::Paid));

        let payment = fixture.store.payment(&ObjectId::parse_str(&response.payment_id).unwrap()).unwrap();
        assert_eq!(payment.transaction_id.as_deref(), Some("285959875"));

        // 이후 같은 결과의 웹훅은 중복으로 처리됩니다
        let ack = fixture.service
            .handle_webhook(webhook(&response.payment_id, "successful", "285959875"))
            .await
            .unwrap();
        assert_eq!(ack.payment_status, PaymentStatus::Success);
    }

    #[actix_web::test]
    async fn test_pending_transaction_changes_nothing() {
        let fixture = fixture();
        let user = buyer();
        let response = checkout(&fixture, &user).await;
        fixture.gateway.record_transaction(verification(&response.payment_id, "pending", "25.00", "USD"));

        let verified = fixture.service.verify_transaction(&user, "285959875").await.unwrap();

        assert_eq!(verified.payment_status, PaymentStatus::Pending);
        assert_eq!(verified.order_status, Some(OrderStatus::Pending));
        let payment = fixture.store.payment(&ObjectId::parse_str(&response.payment_id).unwrap()).unwrap();
        assert_eq!(payment.status, PaymentStatus::Pending);
    }

    #[actix_web::test]
    async fn test_underpaid_transaction_fails_payment() {
        let fixture = fixture();
        let user = buyer();
        let response = checkout(&fixture, &user).await;
        fixture.gateway.record_transaction(verification(&response.payment_id, "successful", "1.00", "USD"));

        let verified = fixture.service.verify_transaction(&user, "285959875").await.unwrap();

        assert_eq!(verified.payment_status, PaymentStatus::Failed);
        assert_eq!(verified.order_status, Some(OrderStatus::Failed));
    }

    #[actix_web::test]
    async fn test_other_users_transaction_is_not_found() {
        let fixture = fixture();
        let owner = buyer();
        let response = checkout(&fixture, &owner).await;
        fixture.gateway.record_transaction(verification(&response.payment_id, "successful", "25.00", "USD"));

        let result = fixture.service.verify_transaction(&buyer(), "285959875").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        let payment = fixture.store.payment(&ObjectId::parse_str(&response.payment_id).unwrap()).unwrap();
        assert_eq!(payment.status, PaymentStatus::Pending);
    }

    #[actix_web::test]
    async fn test_verify_rejects_malformed_id_and_reports_outage() {
        let fixture = fixture();
        let user = buyer();

        for id in ["", "  ", "../payments", "12 34"] {
            let result = fixture.service.verify_transaction(&user, id).await;
            assert!(matches!(result, Err(AppError::ValidationError(_))), "{:?}", id);
        }

        let down = fixture_with(StubGateway::unavailable(), None);
        let result = down.service.verify_transaction(&user, "285959875").await;
        assert!(matches!(result, Err(AppError::GatewayUnavailable(_))));
    }
}
