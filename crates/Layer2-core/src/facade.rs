//! Facade - 외부에 노출되는 단일 진입점
//!
//! Dispatcher 와 세 레지스트리를 묶어 위임만 합니다. 별도 상태나 정책은 없습니다.
//! 전역 싱글턴 대신 `Facade::new()` 로 만든 인스턴스를 각 컴포넌트에 넘겨 사용합니다.
//!
//! ```ignore
//! let facade = Facade::new();
//!
//! facade.register_model(Arc::new(DataProxy::new("rows", rows)));
//! facade.register_controller(Arc::new(SortHeader::new("LastName", facade.notifier())))?;
//! facade.register_command(SORT_REQUESTED, || SortRows::new(facade.notifier()));
//!
//! facade.notify_observers(&Notification::new(SORT_REQUESTED).with_name("LastName"))?;
//! ```

use crate::command::{command_factory, Command, CommandFactory, CommandRegistry};
use crate::controller::{ControllerRegistry, Mediator};
use crate::model::{ModelRegistry, Proxy};
use gridbus_foundation::{BusConfig, Dispatcher, Notification, NotificationCode, Result};
use std::any::Any;
use std::sync::{Arc, Weak};
use tracing::debug;

/// 컴포지션 루트
pub struct Facade {
    config: BusConfig,
    dispatcher: Arc<Dispatcher>,
    controllers: ControllerRegistry,
    models: ModelRegistry,
    commands: CommandRegistry,
}

impl Facade {
    /// 기본 설정으로 생성
    pub fn new() -> Arc<Self> {
        Self::with_config(BusConfig::default())
    }

    /// 설정을 지정해 생성
    pub fn with_config(config: BusConfig) -> Arc<Self> {
        let dispatcher = Arc::new(Dispatcher::with_debug_mode(config.debug_mode));
        let warn = config.warn_on_replace;

        Arc::new(Self {
            controllers: ControllerRegistry::new(Arc::clone(&dispatcher))
                .with_warn_on_replace(warn),
            models: ModelRegistry::new().with_warn_on_replace(warn),
            commands: CommandRegistry::new(Arc::clone(&dispatcher))
                .with_warn_on_replace(warn),
            dispatcher,
            config,
        })
    }

    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// 이 Facade 로 발행하는 약한 핸들
    pub fn notifier(self: &Arc<Self>) -> Notifier {
        Notifier {
            facade: Arc::downgrade(self),
        }
    }

    // ========================================================================
    // Controller (Mediator)
    // ========================================================================

    pub fn register_controller(&self, mediator: Arc<dyn Mediator>) -> Result<()> {
        self.controllers.register(mediator)
    }

    pub fn remove_controller(&self, name: &str) -> Option<Arc<dyn Mediator>> {
        self.controllers.remove(name)
    }

    pub fn retrieve_controller(&self, name: &str) -> Option<Arc<dyn Mediator>> {
        self.controllers.retrieve(name)
    }

    pub fn retrieve_controller_as<M: Mediator>(&self, name: &str) -> Option<Arc<M>> {
        self.controllers.retrieve_as(name)
    }

    pub fn has_controller(&self, name: &str) -> bool {
        self.controllers.has(name)
    }

    pub fn controllers(&self) -> &ControllerRegistry {
        &self.controllers
    }

    // ========================================================================
    // Model (Proxy)
    // ========================================================================

    pub fn register_model(&self, proxy: Arc<dyn Proxy>) {
        self.models.register(proxy)
    }

    pub fn remove_model(&self, name: &str) -> Option<Arc<dyn Proxy>> {
        self.models.remove(name)
    }

    pub fn retrieve_model(&self, name: &str) -> Option<Arc<dyn Proxy>> {
        self.models.retrieve(name)
    }

    pub fn retrieve_model_as<P: Proxy>(&self, name: &str) -> Option<Arc<P>> {
        self.models.retrieve_as(name)
    }

    pub fn has_model(&self, name: &str) -> bool {
        self.models.has(name)
    }

    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    // ========================================================================
    // Command
    // ========================================================================

    /// 커맨드 등록
    ///
    /// `factory` 는 알림마다 호출되어 새 커맨드를 만듭니다.
    pub fn register_command<C, F>(&self, code: impl Into<NotificationCode>, factory: F)
    where
        C: Command + 'static,
        F: Fn() -> C + Send + Sync + 'static,
    {
        self.commands.register(code.into(), command_factory(factory))
    }

    pub fn register_command_factory(
        &self,
        code: impl Into<NotificationCode>,
        factory: CommandFactory,
    ) {
        self.commands.register(code.into(), factory)
    }

    pub fn remove_command(&self, code: impl Into<NotificationCode>) -> bool {
        self.commands.remove(code.into())
    }

    pub fn has_command(&self, code: impl Into<NotificationCode>) -> bool {
        self.commands.has(code.into())
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    // ========================================================================
    // Notification
    // ========================================================================

    /// 코드만으로 발행
    pub fn send_notification(&self, code: impl Into<NotificationCode>) -> Result<()> {
        self.notify_observers(&Notification::new(code))
    }

    /// 코드 + body 로 발행
    pub fn send_notification_with<T: Any + Send + Sync>(
        &self,
        code: impl Into<NotificationCode>,
        body: T,
    ) -> Result<()> {
        self.notify_observers(&Notification::with_payload(code, body))
    }

    /// 코드 + body + type 으로 발행
    pub fn send_notification_typed<T: Any + Send + Sync>(
        &self,
        code: impl Into<NotificationCode>,
        body: T,
        kind: impl Into<String>,
    ) -> Result<()> {
        self.notify_observers(&Notification::with_payload_and_type(code, body, kind))
    }

    /// 이미 만든 알림 발행 (name 지정 등)
    pub fn notify_observers(&self, notification: &Notification) -> Result<()> {
        self.dispatcher.notify(notification)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// 모든 Controller / Model / Command 제거
    ///
    /// Facade 를 붙잡고 있는 컴포넌트와의 참조 순환도 여기서 끊어집니다.
    pub fn clear(&self) {
        self.controllers.clear();
        self.commands.clear();
        self.models.clear();
        debug!("Facade cleared");
    }
}

// ============================================================================
// Notifier - Facade 에 대한 약한 발행 핸들
// ============================================================================

/// Mediator / Proxy / Command 가 보관하는 발행 핸들
///
/// Facade 를 약하게 참조하므로 등록된 컴포넌트가 Facade 를 살려두지 않습니다.
/// Facade 가 이미 사라졌다면 발행은 아무 일도 하지 않습니다.
#[derive(Clone)]
pub struct Notifier {
    facade: Weak<Facade>,
}

impl Notifier {
    pub fn facade(&self) -> Option<Arc<Facade>> {
        self.facade.upgrade()
    }

    pub fn send_notification(&self, code: impl Into<NotificationCode>) -> Result<()> {
        self.notify_observers(&Notification::new(code))
    }

    pub fn send_notification_with<T: Any + Send + Sync>(
        &self,
        code: impl Into<NotificationCode>,
        body: T,
    ) -> Result<()> {
        self.notify_observers(&Notification::with_payload(code, body))
    }

    pub fn notify_observers(&self, notification: &Notification) -> Result<()> {
        match self.facade.upgrade() {
            Some(facade) => facade.notify_observers(notification),
            None => {
                debug!(code = %notification.code(), "Facade dropped, notification discarded");
                Ok(())
            }
        }
    }
}
