//! Event System - 알림 발행/구독 시스템
//!
//! 모든 Mediator / Command 는 결국 Dispatcher 에 등록된 Observer 입니다.
//! 둘의 차이는 핸들러가 하는 일뿐입니다.
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Dispatcher                            │
//! │  ┌─────────────────────────────────────────────────────┐    │
//! │  │  notify(n) ── lock → clone list[n.code] → unlock    │    │
//! │  └─────────────────────────────────────────────────────┘    │
//! │         │ (snapshot, 잠금 밖에서 순회)                       │
//! │         ▼                                                   │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐      │
//! │  │  Observer 1  │  │  Observer 2  │  │  Observer N  │      │
//! │  │  (Mediator)  │  │  (Mediator)  │  │  (Command)   │      │
//! │  └──────────────┘  └──────────────┘  └──────────────┘      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 사용법
//!
//! ```ignore
//! use gridbus_foundation::event::{Dispatcher, Notification, Observer, ObserverContext};
//!
//! let dispatcher = Dispatcher::new();
//! let context = ObserverContext::new("status-bar");
//!
//! dispatcher.subscribe(Observer::new(ROWS_CHANGED, context.clone(), |n| {
//!     println!("rows changed: {:?}", n.body::<usize>());
//!     Ok(())
//! }));
//!
//! dispatcher.notify(&Notification::with_payload(ROWS_CHANGED, 12usize))?;
//! dispatcher.unsubscribe(ROWS_CHANGED.into(), &context);
//! ```

pub mod dispatcher;
pub mod notification;
pub mod observer;

// Re-exports
pub use dispatcher::Dispatcher;
pub use notification::{Notification, NotificationBody, NotificationCode};
pub use observer::{NotificationHandler, Observer, ObserverContext};
