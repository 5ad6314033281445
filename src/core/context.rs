//! # Application Context - 명시적 조립 루트
//!
//! 저장소, 게이트웨이, 서비스를 생성자로 한 번에 조립하고
//! actix-web에 `web::Data`로 등록합니다.
//!
//! ## 의존성 그래프
//!
//! ```text
//! UserStore ─────┬──▶ AuthService ◀── TokenService
//!                │
//! ProductStore ──┼──▶ ProductService
//!                ├──▶ CartService ──┐
//! CartStore ─────┘                  ▼
//! OrderStore ─────────────────▶ CheckoutService ◀── PaymentGateway
//! PaymentStore ──┬────────────▶      ▲
//!                └──▶ PaymentService  └── UserStore
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let context = AppContext::connect(database, redis).await?;
//!
//! HttpServer::new(move || {
//!     App::new()
//!         .configure(|cfg| context.register(cfg))
//!         .configure(configure_all_routes)
//! })
//! ```

use std::sync::Arc;
use actix_web::web;
use crate::{
    caching::redis::RedisClient,
    config::{AuthConfig, FlutterwaveSettings, JwtSettings, PasswordConfig},
    db::Database,
    repositories::{
        carts::{cart_repo::CartRepository, CartStore},
        orders::{order_repo::OrderRepository, OrderStore},
        payments::{payment_repo::PaymentRepository, PaymentStore},
        products::{product_repo::ProductRepository, ProductStore},
        users::{user_repo::UserRepository, UserStore},
    },
    services::{
        auth::{AuthService, TokenService},
        carts::CartService,
        checkout::CheckoutService,
        payments::{FlutterwaveClient, PaymentGateway, PaymentService},
        products::ProductService,
    },
};
use crate::errors::errors::AppError;

/// 서비스가 사용하는 저장소 묶음
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub products: Arc<dyn ProductStore>,
    pub carts: Arc<dyn CartStore>,
    pub orders: Arc<dyn OrderStore>,
    pub payments: Arc<dyn PaymentStore>,
}

/// 환경 변수에서 읽은 서비스 설정
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub jwt: JwtSettings,
    pub bcrypt_cost: u32,
    pub revoke_sessions_on_password_change: bool,
    pub default_currency: String,
    pub webhook_hash: Option<String>,
}

impl AppSettings {
    pub fn from_env(flutterwave: &FlutterwaveSettings) -> Self {
        Self {
            jwt: JwtSettings::from_env(),
            bcrypt_cost: PasswordConfig::bcrypt_cost(),
            revoke_sessions_on_password_change: AuthConfig::revoke_sessions_on_password_change(),
            default_currency: flutterwave.currency.clone(),
            webhook_hash: flutterwave.webhook_hash.clone(),
        }
    }
}

/// 조립된 서비스 묶음
///
/// 모든 필드가 `web::Data`(Arc)이므로 워커마다 복제해도 같은 인스턴스를 공유합니다.
#[derive(Clone)]
pub struct AppContext {
    pub tokens: web::Data<TokenService>,
    pub auth: web::Data<AuthService>,
    pub products: web::Data<ProductService>,
    pub carts: web::Data<CartService>,
    pub payments: web::Data<PaymentService>,
    pub checkout: web::Data<CheckoutService>,
}

impl AppContext {
    /// 저장소와 게이트웨이로부터 서비스를 조립합니다.
    pub fn build(stores: Stores, gateway: Arc<dyn PaymentGateway>, settings: AppSettings) -> Result<Self, AppError> {
        let tokens = TokenService::new(settings.jwt);

        let auth = AuthService::new(
            stores.users.clone(),
            tokens.clone(),
            settings.bcrypt_cost,
            settings.revoke_sessions_on_password_change,
        )?;

        let carts = Arc::new(CartService::new(stores.carts.clone(), stores.products.clone()));

        let checkout = CheckoutService::new(
            stores.orders.clone(),
            stores.payments.clone(),
            stores.users.clone(),
            carts.clone(),
            gateway,
            settings.webhook_hash,
        );

        Ok(Self {
            tokens: web::Data::new(tokens),
            auth: web::Data::new(auth),
            products: web::Data::new(ProductService::new(stores.products.clone(), settings.default_currency)),
            carts: web::Data::from(carts),
            payments: web::Data::new(PaymentService::new(stores.payments)),
            checkout: web::Data::new(checkout),
        })
    }

    /// MongoDB/Redis 기반 저장소를 만들고 인덱스를 준비한 뒤 서비스를 조립합니다.
    pub async fn connect(database: Arc<Database>, redis: Arc<RedisClient>) -> Result<Self, AppError> {
        let users = Arc::new(UserRepository::new(database.clone(), redis));
        let products = Arc::new(ProductRepository::new(database.clone()));
        let carts = Arc::new(CartRepository::new(database.clone()));
        let orders = Arc::new(OrderRepository::new(database.clone()));
        let payments = Arc::new(PaymentRepository::new(database));

        users.create_indexes().await?;
        products.create_indexes().await?;
        carts.create_indexes().await?;
        orders.create_indexes().await?;
        payments.create_indexes().await?;
        log::info!("✅ 컬렉션 인덱스 준비 완료");

        let flutterwave = FlutterwaveSettings::from_env();
        let settings = AppSettings::from_env(&flutterwave);
        let gateway = Arc::new(FlutterwaveClient::new(flutterwave)?);

        let stores = Stores { users, products, carts, orders, payments };

        Self::build(stores, gateway, settings)
    }

    /// 서비스를 actix-web 애플리케이션 데이터로 등록합니다.
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.tokens.clone())
            .app_data(self.auth.clone())
            .app_data(self.products.clone())
            .app_data(self.carts.clone())
            .app_data(self.payments.clone())
            .app_data(self.checkout.clone());
    }
}
