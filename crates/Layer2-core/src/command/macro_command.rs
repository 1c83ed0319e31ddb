//! MacroCommand - 하위 커맨드를 순서대로 실행하는 복합 커맨드
//!
//! 하위 커맨드 목록은 생성 시 초기화 클로저에서 한 번만 채워집니다.
//! 각 하위 커맨드는 같은 알림 객체로 순서대로 새로 생성/실행됩니다.
//! 실패하면 그 자리에서 멈추고 에러를 반환합니다. 앞선 하위 커맨드의 효과는 되돌리지 않습니다.

use super::traits::{command_factory, Command, CommandFactory};
use gridbus_foundation::{Notification, Result};
use tracing::trace;

/// 초기화 단계에서만 접근 가능한 하위 커맨드 목록
#[derive(Default)]
pub struct SubCommands {
    factories: Vec<CommandFactory>,
}

impl SubCommands {
    /// 하위 커맨드 추가 (실행 순서 = 추가 순서)
    pub fn add_sub_command<C, F>(&mut self, factory: F) -> &mut Self
    where
        C: Command + 'static,
        F: Fn() -> C + Send + Sync + 'static,
    {
        self.factories.push(command_factory(factory));
        self
    }

    /// 이미 만들어진 팩토리 추가
    pub fn add_factory(&mut self, factory: CommandFactory) -> &mut Self {
        self.factories.push(factory);
        self
    }
}

/// 복합 커맨드
///
/// ```ignore
/// facade.register_command(SORT_REQUESTED, || {
///     MacroCommand::new(|subs| {
///         subs.add_sub_command(|| ResolveSortColumn)
///             .add_sub_command(|| SortRows);
///     })
/// });
/// ```
pub struct MacroCommand {
    sub_commands: Vec<CommandFactory>,
}

impl MacroCommand {
    pub fn new(initialize: impl FnOnce(&mut SubCommands)) -> Self {
        let mut subs = SubCommands::default();
        initialize(&mut subs);
        Self {
            sub_commands: subs.factories,
        }
    }

    pub fn sub_command_count(&self) -> usize {
        self.sub_commands.len()
    }
}

impl Command for MacroCommand {
    fn execute(&self, notification: &Notification) -> Result<()> {
        for (index, factory) in self.sub_commands.iter().enumerate() {
            trace!(code = %notification.code(), index, "Executing sub-command");
            factory().execute(notification)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::SimpleCommand;
    use gridbus_foundation::Error;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct Logged {
        log: Arc<Mutex<Vec<String>>>,
        label: &'static str,
    }

    impl Command for Logged {
        fn execute(&self, notification: &Notification) -> Result<()> {
            self.log
                .lock()
                .push(format!("{}:{}", self.label, notification.code()));
            Ok(())
        }
    }

    fn logging(
        log: &Arc<Mutex<Vec<String>>>,
        label: &'static str,
    ) -> impl Fn() -> Logged + Send + Sync + 'static {
        let log = Arc::clone(log);
        move || Logged {
            log: Arc::clone(&log),
            label,
        }
    }

    #[test]
    fn test_sub_commands_run_in_order_with_same_notification() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let command = MacroCommand::new(|subs| {
            subs.add_sub_command(logging(&log, "a"))
                .add_sub_command(logging(&log, "b"));
        });

        assert_eq!(command.sub_command_count(), 2);
        command.execute(&Notification::new(4)).unwrap();
        assert_eq!(*log.lock(), vec!["a:4".to_string(), "b:4".to_string()]);
    }

    #[test]
    fn test_nested_macro_commands() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let inner_log = Arc::clone(&log);

        let command = MacroCommand::new(|subs| {
            subs.add_sub_command(logging(&log, "first"));
            subs.add_sub_command(move || {
                let log = Arc::clone(&inner_log);
                MacroCommand::new(move |inner| {
                    inner
                        .add_sub_command(logging(&log, "inner-1"))
                        .add_sub_command(logging(&log, "inner-2"));
                })
            });
            subs.add_sub_command(logging(&log, "last"));
        });

        command.execute(&Notification::new(1)).unwrap();
        assert_eq!(
            *log.lock(),
            vec!["first:1", "inner-1:1", "inner-2:1", "last:1"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_failure_stops_without_rollback() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let command = MacroCommand::new(|subs| {
            subs.add_sub_command(logging(&log, "a"));
            subs.add_sub_command(|| {
                SimpleCommand::new(|_: &Notification| Err(Error::command(9, "boom")))
            });
            subs.add_sub_command(logging(&log, "c"));
        });

        let err = command.execute(&Notification::new(9)).unwrap_err();
        assert!(matches!(err, Error::Command { code: 9, .. }));
        assert_eq!(*log.lock(), vec!["a:9".to_string()]);
    }
}
