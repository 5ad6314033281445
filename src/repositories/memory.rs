//! 테스트용 메모리 저장소
//!
//! 모든 저장소 trait을 `Mutex<HashMap>` 위에 구현합니다.
//! 조건부 갱신은 잠금 안에서 비교와 변경을 함께 수행하므로
//! MongoDB의 조건부 update와 같은 원자성을 가집니다.

use std::collections::HashMap;
use std::sync::Mutex;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime};
use crate::domain::entities::{
    carts::cart::Cart,
    orders::order::{Order, OrderDetails, OrderStatus},
    payments::payment::{Payment, PaymentStatus},
    products::product::{Product, ProductStatus},
    users::user::User,
};
use crate::errors::errors::AppError;
use crate::repositories::{
    carts::CartStore,
    orders::OrderStore,
    payments::PaymentStore,
    products::{ProductSearch, ProductStore, ProductUpdate},
    users::{ProfileUpdate, UserStore},
};

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<ObjectId, User>>,
    products: Mutex<HashMap<ObjectId, Product>>,
    carts: Mutex<HashMap<ObjectId, Cart>>,
    orders: Mutex<HashMap<ObjectId, Order>>,
    payments: Mutex<HashMap<ObjectId, Payment>>,
}

fn poisoned<T>(_: T) -> AppError {
    AppError::InternalError("memory store lock poisoned".to_string())
}

fn require_id(id: Option<ObjectId>) -> Result<ObjectId, AppError> {
    id.ok_or_else(|| AppError::InternalError("document without _id".to_string()))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order(&self, id: &ObjectId) -> Option<Order> {
        self.orders.lock().ok()?.get(id).cloned()
    }

    pub fn payment(&self, id: &ObjectId) -> Option<Payment> {
        self.payments.lock().ok()?.get(id).cloned()
    }

    pub fn order_count(&self) -> usize {
        self.orders.lock().map(|o| o.len()).unwrap_or_default()
    }

    pub fn payment_count(&self) -> usize {
        self.payments.lock().map(|p| p.len()).unwrap_or_default()
    }

    fn payments_for_order(&self, order_id: &ObjectId) -> Result<Vec<Payment>, AppError> {
        let payments = self.payments.lock().map_err(poisoned)?;
        Ok(payments.values().filter(|p| &p.order_id == order_id).cloned().collect())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.get(id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, AppError> {
        let mut users = self.users.lock().map_err(poisoned)?;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }
        users.insert(require_id(user.id)?, user.clone());
        Ok(user)
    }

    async fn update_profile(&self, id: &ObjectId, update: &ProfileUpdate) -> Result<Option<User>, AppError> {
        let mut users = self.users.lock().map_err(poisoned)?;
        Ok(users.get_mut(id).map(|user| {
            if let Some(ref first_name) = update.first_name {
                user.first_name = Some(first_name.clone());
            }
            if let Some(ref last_name) = update.last_name {
                user.last_name = Some(last_name.clone());
            }
            user.updated_at = DateTime::now();
            user.clone()
        }))
    }

    async fn set_password_hash(&self, id: &ObjectId, password_hash: &str) -> Result<bool, AppError> {
        let mut users = self.users.lock().map_err(poisoned)?;
        Ok(users.get_mut(id).map(|user| user.password_hash = password_hash.to_string()).is_some())
    }

    async fn set_refresh_token_hash(&self, id: &ObjectId, hash: Option<&str>) -> Result<bool, AppError> {
        let mut users = self.users.lock().map_err(poisoned)?;
        Ok(users.get_mut(id).map(|user| user.refresh_token_hash = hash.map(str::to_string)).is_some())
    }

    async fn rotate_refresh_token_hash(
        &self,
        id: &ObjectId,
        expected: &str,
        replacement: &str,
    ) -> Result<bool, AppError> {
        let mut users = self.users.lock().map_err(poisoned)?;
        match users.get_mut(id) {
            Some(user) if user.refresh_token_hash.as_deref() == Some(expected) => {
                user.refresh_token_hash = Some(replacement.to_string());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn insert(&self, product: Product) -> Result<Product, AppError> {
        let mut products = self.products.lock().map_err(poisoned)?;
        if products.values().any(|p| p.slug == product.slug) {
            return Err(AppError::ConflictError("이미 사용 중인 slug입니다".to_string()));
        }
        products.insert(require_id(product.id)?, product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Product>, AppError> {
        let products = self.products.lock().map_err(poisoned)?;
        Ok(products.get(id).cloned())
    }

    async fn find_many(&self, ids: &[ObjectId]) -> Result<Vec<Product>, AppError> {
        let products = self.products.lock().map_err(poisoned)?;
        Ok(ids.iter().filter_map(|id| products.get(id).cloned()).collect())
    }

    async fn list_active(&self) -> Result<Vec<Product>, AppError> {
        let products = self.products.lock().map_err(poisoned)?;
        let mut active: Vec<Product> = products
            .values()
            .filter(|p| p.status == ProductStatus::Active)
            .cloned()
            .collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(active)
    }

    async fn search(&self, search: &ProductSearch) -> Result<(Vec<Product>, u64), AppError> {
        let products = self.products.lock().map_err(poisoned)?;
        let mut matched: Vec<Product> = products
            .values()
            .filter(|p| search.matches(p))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matched.len() as u64;
        let page = matched
            .into_iter()
            .skip(search.skip as usize)
            .take(search.limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let mut products = self.products.lock().map_err(poisoned)?;
        Ok(products.remove(id).is_some())
    }

    async fn update(&self, id: &ObjectId, update: &ProductUpdate) -> Result<Option<Product>, AppError> {
        let mut products = self.products.lock().map_err(poisoned)?;
        Ok(products.get_mut(id).map(|product| {
            if let Some(ref name) = update.name {
                product.name = name.clone();
            }
            if let Some(ref description) = update.description {
                product.description = Some(description.clone());
            }
            if let Some(price) = update.price {
                product.price = price;
            }
            if let Some(status) = update.status {
                product.status = status;
            }
            product.updated_at = DateTime::now();
            product.clone()
        }))
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn find_by_user(&self, user_id: &ObjectId) -> Result<Option<Cart>, AppError> {
        let carts = self.carts.lock().map_err(poisoned)?;
        Ok(carts.get(user_id).cloned())
    }

    async fn save(&self, cart: &Cart) -> Result<(), AppError> {
        let mut carts = self.carts.lock().map_err(poisoned)?;
        carts.insert(cart.user_id, cart.clone());
        Ok(())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn insert(&self, order: Order) -> Result<Order, AppError> {
        let mut orders = self.orders.lock().map_err(poisoned)?;
        orders.insert(require_id(order.id)?, order.clone());
        Ok(order)
    }

    async fn find_for_user(&self, order_id: &ObjectId, user_id: &ObjectId) -> Result<Option<Order>, AppError> {
        let orders = self.orders.lock().map_err(poisoned)?;
        Ok(orders.get(order_id).filter(|o| &o.user_id == user_id).cloned())
    }

    async fn list_details_for_user(&self, user_id: &ObjectId) -> Result<Vec<OrderDetails>, AppError> {
        let mut owned: Vec<Order> = {
            let orders = self.orders.lock().map_err(poisoned)?;
            orders.values().filter(|o| &o.user_id == user_id).cloned().collect()
        };
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        owned
            .into_iter()
            .map(|order| {
                let payments = self.payments_for_order(&require_id(order.id)?)?;
                Ok(OrderDetails { order, payments })
            })
            .collect()
    }

    async fn find_details_for_user(
        &self,
        order_id: &ObjectId,
        user_id: &ObjectId,
    ) -> Result<Option<OrderDetails>, AppError> {
        match OrderStore::find_for_user(self, order_id, user_id).await? {
            Some(order) => {
                let payments = self.payments_for_order(order_id)?;
                Ok(Some(OrderDetails { order, payments }))
            }
            None => Ok(None),
        }
    }

    async fn transition_status(
        &self,
        order_id: &ObjectId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<bool, AppError> {
        let mut orders = self.orders.lock().map_err(poisoned)?;
        match orders.get_mut(order_id) {
            Some(order) if order.status == from => {
                order.status = to;
                order.updated_at = DateTime::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl PaymentStore for MemoryStore {
    async fn insert(&self, payment: Payment) -> Result<Payment, AppError> {
        let mut payments = self.payments.lock().map_err(poisoned)?;
        payments.insert(require_id(payment.id)?, payment.clone());
        Ok(payment)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Payment>, AppError> {
        let payments = self.payments.lock().map_err(poisoned)?;
        Ok(payments.get(id).cloned())
    }

    async fn find_by_provider_ref(&self, provider_ref: &str) -> Result<Option<Payment>, AppError> {
        let payments = self.payments.lock().map_err(poisoned)?;
        Ok(payments.values().find(|p| p.provider_ref == provider_ref).cloned())
    }

    async fn find_for_user(&self, id: &ObjectId, user_id: &ObjectId) -> Result<Option<Payment>, AppError> {
        let payments = self.payments.lock().map_err(poisoned)?;
        Ok(payments.get(id).filter(|p| &p.user_id == user_id).cloned())
    }

    async fn list_for_user(&self, user_id: &ObjectId) -> Result<Vec<Payment>, AppError> {
        let payments = self.payments.lock().map_err(poisoned)?;
        let mut owned: Vec<Payment> = payments.values().filter(|p| &p.user_id == user_id).cloned().collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn settle(
        &self,
        id: &ObjectId,
        status: PaymentStatus,
        transaction_id: Option<&str>,
    ) -> Result<bool, AppError> {
        let mut payments = self.payments.lock().map_err(poisoned)?;
        match payments.get_mut(id) {
            Some(payment) if payment.status == PaymentStatus::Pending => {
                payment.status = status;
                if let Some(transaction_id) = transaction_id {
                    payment.transaction_id = Some(transaction_id.to_string());
                }
                payment.updated_at = DateTime::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
