//! 장바구니 서비스
//!
//! 사용자당 하나의 장바구니를 관리하고, 체크아웃이 사용할 장바구니 라인
//! (상품 + 수량)을 조립합니다. 장바구니에는 상품 ID와 수량만 저장되며
//! 가격은 조회 시점의 상품 가격을 사용합니다.

use std::collections::HashMap;
use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use rust_decimal::Decimal;
use crate::{
    domain::dto::carts::{
        request::{AddCartItemRequest, UpdateCartItemRequest},
        response::{CartLineResponse, CartProductSummary, CartResponse},
    },
    domain::entities::{
        carts::cart::{Cart, MAX_ITEM_QUANTITY},
        orders::order::checked_sum,
        products::product::Product,
    },
    repositories::{carts::CartStore, parse_object_id, products::ProductStore},
};
use crate::errors::errors::AppError;

/// 상품 정보가 채워진 장바구니 한 줄
#[derive(Debug, Clone)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// 현재 가격 기준 라인 합계. 표현 범위를 넘으면 None.
    pub fn line_total(&self) -> Option<Decimal> {
        self.product.price.checked_mul(Decimal::from(self.quantity))
    }
}

pub struct CartService {
    carts: Arc<dyn CartStore>,
    products: Arc<dyn ProductStore>,
}

impl CartService {
    pub fn new(carts: Arc<dyn CartStore>, products: Arc<dyn ProductStore>) -> Self {
        Self { carts, products }
    }

    async fn load_cart(&self, user_id: &ObjectId) -> Result<Cart, AppError> {
        Ok(self.carts
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| Cart::empty(*user_id)))
    }

    /// 장바구니 라인을 상품 정보와 함께 조회합니다.
    ///
    /// 그 사이 삭제된 상품의 라인은 건너뜁니다.
    pub async fn load_lines(&self, user_id: &ObjectId) -> Result<Vec<CartLine>, AppError> {
        let cart = self.load_cart(user_id).await?;
        self.lines_for(&cart).await
    }

    async fn lines_for(&self, cart: &Cart) -> Result<Vec<CartLine>, AppError> {
        if cart.items.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<ObjectId> = cart.items.iter().map(|item| item.product_id).collect();
        let mut products: HashMap<ObjectId, Product> = self.products
            .find_many(&ids)
            .await?
            .into_iter()
            .filter_map(|product| product.id.map(|id| (id, product)))
            .collect();

        Ok(cart.items
            .iter()
            .filter_map(|item| {
                products.remove(&item.product_id).map(|product| CartLine {
                    product,
                    quantity: item.quantity,
                })
            })
            .collect())
    }

    pub async fn get_cart(&self, user_id: &ObjectId) -> Result<CartResponse, AppError> {
        let lines = self.load_lines(user_id).await?;
        to_response(lines)
    }

    /// 변경된 장바구니의 응답을 먼저 계산하고, 성공한 경우에만 저장합니다.
    async fn save_and_respond(&self, cart: &Cart) -> Result<CartResponse, AppError> {
        let response = to_response(self.lines_for(cart).await?)?;
        self.carts.save(cart).await?;
        Ok(response)
    }

    /// 상품 추가 (이미 담긴 상품이면 수량 증가)
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 상품이 없음
    /// * `AppError::ValidationError` - 판매 중이 아닌 상품, 최대 수량 초과, 합계가 금액 범위 초과
    pub async fn add_item(&self, user_id: &ObjectId, request: AddCartItemRequest) -> Result<CartResponse, AppError> {
        if request.quantity == 0 {
            return Err(AppError::ValidationError("수량은 1 이상이어야 합니다".to_string()));
        }

        let product_id = parse_object_id(&request.product_id).ok_or_else(product_not_found)?;
        let product = self.products.find_by_id(&product_id).await?.ok_or_else(product_not_found)?;
        if !product.is_purchasable() {
            return Err(AppError::ValidationError("판매 중인 상품이 아닙니다".to_string()));
        }

        let mut cart = self.load_cart(user_id).await?;
        if !cart.add(product_id, request.quantity) {
            return Err(quantity_exceeded());
        }

        self.save_and_respond(&cart).await
    }

    /// 수량 변경 (절대값)
    pub async fn update_item(
        &self,
        user_id: &ObjectId,
        product_id: &str,
        request: UpdateCartItemRequest,
    ) -> Result<CartResponse, AppError> {
        if request.quantity == 0 {
            return Err(AppError::ValidationError("수량은 1 이상이어야 합니다".to_string()));
        }
        if request.quantity > MAX_ITEM_QUANTITY {
            return Err(quantity_exceeded());
        }

        let product_id = parse_object_id(product_id).ok_or_else(item_not_found)?;
        let mut cart = self.load_cart(user_id).await?;
        if !cart.set_quantity(&product_id, request.quantity) {
            return Err(item_not_found());
        }

        self.save_and_respond(&cart).await
    }

    pub async fn remove_item(&self, user_id: &ObjectId, product_id: &str) -> Result<CartResponse, AppError> {
        let product_id = parse_object_id(product_id).ok_or_else(item_not_found)?;
        let mut cart = self.load_cart(user_id).await?;
        if !cart.remove(&product_id) {
            return Err(item_not_found());
        }

        self.save_and_respond(&cart).await
    }

    pub async fn clear_cart(&self, user_id: &ObjectId) -> Result<(), AppError> {
        let mut cart = self.load_cart(user_id).await?;
        cart.clear();
        self.carts.save(&cart).await
    }
}

fn to_response(lines: Vec<CartLine>) -> Result<CartResponse, AppError> {
    let total = checked_sum(lines.iter().map(CartLine::line_total)).ok_or_else(amount_exceeded)?;
    let items = lines
        .into_iter()
        .map(|line| {
            let line_total = line.line_total().ok_or_else(amount_exceeded)?;
            let product = line.product;
            Ok(CartLineResponse {
                product: CartProductSummary {
                    id: product.id.map(|id| id.to_hex()).unwrap_or_default(),
                    name: product.name,
                    slug: product.slug,
                    price: product.price,
                    currency: product.currency,
                },
                quantity: line.quantity,
                line_total,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(CartResponse { items, total })
}

fn product_not_found() -> AppError {
    AppError::NotFound("상품을 찾을 수 없습니다".to_string())
}

fn quantity_exceeded() -> AppError {
    AppError::ValidationError(format!("상품당 수량은 {}개를 넘을 수 없습니다", MAX_ITEM_QUANTITY))
}

fn amount_exceeded() -> AppError {
    AppError::ValidationError("장바구니 금액이 허용 범위를 넘었습니다".to_string())
}

fn item_not_found() -> AppError {
    AppError::NotFound("장바구니에 없는 상품입니다".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use crate::domain::entities::products::product::ProductStatus;
    use crate::repositories::memory::MemoryStore;

    async fn seed_product(store: &MemoryStore, slug: &str, price: &str, status: ProductStatus) -> ObjectId {
        let product = Product::new(
            ObjectId::new(),
            slug.to_string(),
            slug.to_string(),
            None,
            Decimal::from_str(price).unwrap(),
            "USD".to_string(),
            status,
        );
        let id = product.id.unwrap();
        ProductStore::insert(store, product).await.unwrap();
        id
    }

    fn add(product_id: ObjectId, quantity: u32) -> AddCartItemRequest {
        AddCartItemRequest { product_id: product_id.to_hex(), quantity }
    }

    #[actix_web::test]
    async fn test_add_items_and_totals() {
        let store = Arc::new(MemoryStore::new());
        let service = CartService::new(store.clone(), store.clone());
        let user = ObjectId::new();
        let a = seed_product(&store, "a", "10.00", ProductStatus::Active).await;
        let b = seed_product(&store, "b", "5.00", ProductStatus::Active).await;

        service.add_item(&user, add(a, 1)).await.unwrap();
        service.add_item(&user, add(a, 1)).await.unwrap();
        let cart = service.add_item(&user, add(b, 1)).await.unwrap();

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.total, Decimal::from_str("25.00").unwrap());
    }

    #[actix_web::test]
    async fn test_add_rejects_missing_or_inactive_product() {
        let store = Arc::new(MemoryStore::new());
        let service = CartService::new(store.clone(), store.clone());
        let user = ObjectId::new();
        let draft = seed_product(&store, "draft", "1.00", ProductStatus::Draft).await;

        assert!(matches!(
            service.add_item(&user, add(ObjectId::new(), 1)).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.add_item(&user, add(draft, 1)).await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[actix_web::test]
    async fn test_update_remove_and_clear() {
        let store = Arc::new(MemoryStore::new());
        let service = CartService::new(store.clone(), store.clone());
        let user = ObjectId::new();
        let a = seed_product(&store, "a", "2.50", ProductStatus::Active).await;

        service.add_item(&user, add(a, 1)).await.unwrap();
        let cart = service
            .update_item(&user, &a.to_hex(), UpdateCartItemRequest { quantity: 4 })
            .await
            .unwrap();
        assert_eq!(cart.total, Decimal::from_str("10.00").unwrap());

        let missing = service
            .update_item(&user, &ObjectId::new().to_hex(), UpdateCartItemRequest { quantity: 1 })
            .await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        let cart = service.remove_item(&user, &a.to_hex()).await.unwrap();
        assert!(cart.items.is_empty());

        service.add_item(&user, add(a, 1)).await.unwrap();
        service.clear_cart(&user).await.unwrap();
        assert!(service.load_lines(&user).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_add_rejects_quantity_over_cap_without_saving() {
        let store = Arc::new(MemoryStore::new());
        let service = CartService::new(store.clone(), store.clone());
        let user = ObjectId::new();
        let a = seed_product(&store, "a", "1.00", ProductStatus::Active).await;

        service.add_item(&user, add(a, 990)).await.unwrap();
        let result = service.add_item(&user, add(a, 10)).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));

        let cart = service.get_cart(&user).await.unwrap();
        assert_eq!(cart.items[0].quantity, 990);

        let result = service
            .update_item(&user, &a.to_hex(), UpdateCartItemRequest { quantity: MAX_ITEM_QUANTITY + 1 })
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_overflowing_cart_total_is_rejected_and_not_saved() {
        let store = Arc::new(MemoryStore::new());
        let service = CartService::new(store.clone(), store.clone());
        let user = ObjectId::new();
        // 검증을 거치지 않고 저장된 비정상 가격
        let huge = seed_product(&store, "huge", "700000000000000000000000000", ProductStatus::Active).await;

        let result = service.add_item(&user, add(huge, 200)).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));

        let cart = service.get_cart(&user).await.unwrap();
        assert!(cart.items.is_empty());
    }
}
