//! Model - Proxy 계약과 레지스트리
//!
//! - `proxy.rs` - Proxy trait, DataProxy<T>
//! - `registry.rs` - ModelRegistry (이름 → Proxy)

mod proxy;
mod registry;

pub use proxy::{DataProxy, Proxy};
pub use registry::ModelRegistry;
