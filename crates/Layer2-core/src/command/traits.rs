//! Command traits - 알림 하나당 새로 만들어지는 작업 단위

use gridbus_foundation::{Notification, Result};
use std::sync::Arc;

/// 커맨드 trait
///
/// 알림마다 팩토리로 새 인스턴스를 만들어 한 번 실행합니다.
/// 실행 사이에 상태가 남지 않습니다.
pub trait Command {
    fn execute(&self, notification: &Notification) -> Result<()>;
}

/// 커맨드 팩토리 (리플렉션 대신 클로저)
pub type CommandFactory = Arc<dyn Fn() -> Box<dyn Command> + Send + Sync>;

/// 구체 커맨드를 만드는 클로저를 `CommandFactory` 로 변환
pub fn command_factory<C, F>(factory: F) -> CommandFactory
where
    C: Command + 'static,
    F: Fn() -> C + Send + Sync + 'static,
{
    Arc::new(move || Box::new(factory()) as Box<dyn Command>)
}

// ============================================================================
// SimpleCommand - 클로저 기반 커맨드
// ============================================================================

/// 동기 비즈니스 로직 하나를 실행하는 커맨드
///
/// ```ignore
/// let rows = facade.notifier();
/// facade.register_command(REFRESH, move || {
///     let rows = rows.clone();
///     SimpleCommand::new(move |n| rows.send_notification(ROWS_CHANGED))
/// });
/// ```
pub struct SimpleCommand<F> {
    body: F,
}

impl<F> SimpleCommand<F>
where
    F: Fn(&Notification) -> Result<()>,
{
    pub fn new(body: F) -> Self {
        Self { body }
    }
}

impl<F> Command for SimpleCommand<F>
where
    F: Fn(&Notification) -> Result<()>,
{
    fn execute(&self, notification: &Notification) -> Result<()> {
        (self.body)(notification)
    }
}
