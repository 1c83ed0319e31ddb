//! gridbus-core: Mediator / Proxy / Command runtime
//!
//! Layer2 - 레지스트리와 Facade 레이어
//!
//! # 주요 모듈
//!
//! - `controller`: Mediator 계약과 레지스트리 (Dispatcher 구독)
//! - `model`: Proxy 계약과 레지스트리 (발행만, 구독 없음)
//! - `command`: Command / MacroCommand 와 레지스트리 (코드당 Observer 하나)
//! - `facade`: 단일 진입점 (`Facade`, `Notifier`)
//!
//! # 사용 예시
//!
//! ```ignore
//! use gridbus_core::{Facade, DataProxy, MacroCommand};
//!
//! let facade = Facade::new();
//!
//! facade.register_model(Arc::new(DataProxy::new("rows", rows)));
//! facade.register_controller(Arc::new(SortHeader::new("Age", facade.notifier())))?;
//!
//! facade.register_command(SORT_REQUESTED, || {
//!     MacroCommand::new(|subs| {
//!         subs.add_sub_command(|| ResolveColumn).add_sub_command(|| SortRows);
//!     })
//! });
//!
//! facade.send_notification_with(SORT_REQUESTED, "Age".to_string())?;
//! ```
//!
//! # 동시성
//!
//! 모든 연산은 호출 스레드에서 동기로 끝납니다. 각 레지스트리는 자체 잠금을 가지며,
//! 핸들러/훅은 어떤 잠금도 잡지 않은 상태에서 호출됩니다.

pub mod command;
pub mod component;
pub mod controller;
pub mod facade;
pub mod model;

// Re-exports: Facade
pub use facade::{Facade, Notifier};

// Re-exports: Controller
pub use controller::{ControllerRegistry, Mediator};

// Re-exports: Model
pub use model::{DataProxy, ModelRegistry, Proxy};

// Re-exports: Command
pub use command::{
    command_factory, Command, CommandFactory, CommandRegistry, MacroCommand, SimpleCommand,
    SubCommands,
};

// Re-exports: Component helpers
pub use component::{AsAnyArc, ViewComponent};

// Re-exports: Layer1
pub use gridbus_foundation::{
    BusConfig, Dispatcher, Error, Notification, NotificationCode, Observer, ObserverContext,
    Result,
};
