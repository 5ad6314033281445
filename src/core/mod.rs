//! # Core Module
//!
//! 애플리케이션 조립을 담당합니다.
//!
//! ### [`context`] - 명시적 의존성 조립
//! - **Stores**: 저장소 trait 객체 묶음 (MongoDB 구현 또는 테스트용 메모리 구현)
//! - **AppContext**: 서비스 생성과 `web::Data` 등록
//!
//! 전역 레지스트리 없이 `main`에서 한 번 생성자를 호출해 그래프를 만듭니다.
//! 테스트는 같은 [`AppContext::build`](context::AppContext::build)에 메모리 저장소를 넣어 사용합니다.

pub mod context;

pub use context::{AppContext, AppSettings, Stores};
