//! # Domain Entities Module
//!
//! MongoDB 컬렉션과 1:1로 대응되는 도메인 엔티티들을 정의합니다.
//!
//! ## 컬렉션 구성
//!
//! | 엔티티 | 컬렉션 | 유니크 키 |
//! |--------|--------|-----------|
//! | [`users::user::User`] | `users` | `email` |
//! | [`products::product::Product`] | `products` | `slug` |
//! | [`carts::cart::Cart`] | `carts` | `user_id` |
//! | [`orders::order::Order`] | `orders` | - |
//! | [`payments::payment::Payment`] | `payments` | `provider_ref` |
//!
//! ## 공통 규칙
//!
//! - `_id`는 `ObjectId::new()`로 저장 전에 미리 할당합니다
//! - 시간 필드는 `bson::DateTime`을 사용합니다
//! - 금액은 `rust_decimal::Decimal`로 표현하며 문자열로 저장됩니다
//! - 상태 값은 `SCREAMING_SNAKE_CASE` 문자열로 저장됩니다
//!
//! ```text
//! User 1 ──── 1 Cart ──── * CartItem ──── 1 Product
//!   │
//!   └── * Order ──── * OrderItem (가격 스냅샷)
//!           │
//!           └── * Payment (provider_ref = tx_ref)
//! ```

pub mod users;
pub mod products;
pub mod carts;
pub mod orders;
pub mod payments;
