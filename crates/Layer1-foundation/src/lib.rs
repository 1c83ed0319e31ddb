//! # gridbus-foundation
//!
//! Foundation layer for GridBus:
//! - Event: Notification / Observer / Dispatcher (스냅샷 기반 전달)
//! - Config: 통합 설정 (BusConfig)
//! - Error: 공통 에러 타입
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Notification { code, name?, type?, body? }             │
//! │                     │                                   │
//! │                     ▼                                   │
//! │  Dispatcher ── code → [Observer, Observer, ...]         │
//! │                     │                                   │
//! │          ┌─────────┴─────────┐                         │
//! │          ▼                   ▼                         │
//! │   Mediator handler     Command handler                 │
//! │   (gridbus-core)       (gridbus-core)                  │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod event;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Event (알림 시스템)
// ============================================================================
pub use event::{
    Dispatcher, Notification, NotificationBody, NotificationCode, NotificationHandler, Observer,
    ObserverContext,
};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{
    BusConfig, BusConfigLayer, ConfigScope, StressLayer, StressSettings, BUS_CONFIG_FILE,
};
