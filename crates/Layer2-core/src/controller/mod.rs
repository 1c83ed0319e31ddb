//! Controller - Mediator 계약과 레지스트리
//!
//! - `traits.rs` - Mediator trait
//! - `registry.rs` - ControllerRegistry (이름 → Mediator)

mod registry;
mod traits;

pub use registry::ControllerRegistry;
pub use traits::Mediator;
