//! Cart Entity Implementation

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 한 항목에 담을 수 있는 최대 수량
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// 장바구니 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ObjectId,
    /// 1 이상 [`MAX_ITEM_QUANTITY`] 이하
    pub quantity: u32,
}

/// 사용자별 장바구니 (`carts` 컬렉션, `user_id` unique)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub updated_at: DateTime,
}

impl Cart {
    /// 빈 장바구니 생성
    ///
    /// `_id`는 저장 시 upsert가 할당하도록 비워 둡니다.
    pub fn empty(user_id: ObjectId) -> Self {
        Self {
            id: None,
            user_id,
            items: Vec::new(),
            updated_at: DateTime::now(),
        }
    }

    /// 같은 상품이 있으면 수량을 더하고, 없으면 새 항목을 추가합니다.
    ///
    /// 합친 수량이 [`MAX_ITEM_QUANTITY`]를 넘으면 장바구니를 바꾸지 않고 false.
    pub fn add(&mut self, product_id: ObjectId, quantity: u32) -> bool {
        let existing = self.items.iter().position(|i| i.product_id == product_id);
        let current = existing.map(|idx| self.items[idx].quantity).unwrap_or(0);

        let total = match current.checked_add(quantity) {
            Some(total) if total <= MAX_ITEM_QUANTITY => total,
            _ => return false,
        };

        match existing {
            Some(idx) => self.items[idx].quantity = total,
            None => self.items.push(CartItem { product_id, quantity }),
        }
        self.updated_at = DateTime::now();
        true
    }

    /// 항목의 수량을 지정한 값으로 바꿉니다. 항목이 없으면 false.
    pub fn set_quantity(&mut self, product_id: &ObjectId, quantity: u32) -> bool {
        match self.items.iter_mut().find(|i| &i.product_id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                self.updated_at = DateTime::now();
                true
            }
            None => false,
        }
    }

    /// 항목을 제거합니다. 항목이 없으면 false.
    pub fn remove(&mut self, product_id: &ObjectId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| &i.product_id != product_id);
        self.updated_at = DateTime::now();
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.updated_at = DateTime::now();
    }
}
