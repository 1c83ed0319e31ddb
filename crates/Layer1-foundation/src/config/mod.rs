//! Config - 설정 관리
//!
//! - `bus.rs` - BusConfig 최종 설정과 병합/로드/저장
//! - `layer.rs` - 파일 하나 단위의 부분 설정과 파일 위치

mod bus;
mod layer;

pub use bus::{BusConfig, StressSettings};
pub use layer::{BusConfigLayer, ConfigScope, StressLayer, BUS_CONFIG_FILE};
