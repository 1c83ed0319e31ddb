//! Command Registry - 알림 코드 → 커맨드 팩토리
//!
//! 등록하면 해당 코드에 Observer 하나가 설치됩니다. 핸들러는 팩토리로
//! 새 커맨드를 만들어 실행합니다. 그래서 Facade 를 거치지 않은
//! `Dispatcher::notify` 로도 커맨드가 실행됩니다.

use super::traits::CommandFactory;
use gridbus_foundation::{
    Dispatcher, Notification, NotificationCode, Observer, ObserverContext, Result,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

struct CommandEntry {
    factory: CommandFactory,
    context: ObserverContext,
}

/// 커맨드 레지스트리
pub struct CommandRegistry {
    dispatcher: Arc<Dispatcher>,
    commands: Mutex<HashMap<NotificationCode, CommandEntry>>,
    warn_on_replace: bool,
}

impl CommandRegistry {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            commands: Mutex::new(HashMap::new()),
            warn_on_replace: true,
        }
    }

    pub fn with_warn_on_replace(mut self, enabled: bool) -> Self {
        self.warn_on_replace = enabled;
        self
    }

    /// 커맨드 등록 (같은 코드가 있으면 Observer 교체)
    pub fn register(&self, code: NotificationCode, factory: CommandFactory) {
        let context = ObserverContext::new(format!("command:{}", code));

        let handler_factory = Arc::clone(&factory);
        let observer = Observer::new(code, context.clone(), move |n| {
            trace!(code = %n.code(), "Executing command");
            handler_factory().execute(n)
        });

        let replaced = {
            let mut commands = self.commands.lock();
            let previous = commands.remove(&code);
            if let Some(old) = &previous {
                self.dispatcher.unsubscribe(code, &old.context);
            }
            self.dispatcher.subscribe(observer);
            commands.insert(code, CommandEntry { factory, context });
            previous.is_some()
        };

        if replaced && self.warn_on_replace {
            warn!("Command for notification {} already registered, replacing", code);
        }
        debug!("Registered command for notification {}", code);
    }

    /// 커맨드 제거 (제거했으면 true)
    pub fn remove(&self, code: NotificationCode) -> bool {
        let mut commands = self.commands.lock();
        match commands.remove(&code) {
            Some(entry) => {
                self.dispatcher.unsubscribe(code, &entry.context);
                debug!("Removed command for notification {}", code);
                true
            }
            None => false,
        }
    }

    pub fn has(&self, code: NotificationCode) -> bool {
        self.commands.lock().contains_key(&code)
    }

    /// 등록된 팩토리로 직접 실행 (없으면 no-op)
    pub fn execute(&self, notification: &Notification) -> Result<()> {
        let factory = self
            .commands
            .lock()
            .get(&notification.code())
            .map(|entry| Arc::clone(&entry.factory));

        match factory {
            Some(factory) => factory().execute(notification),
            None => Ok(()),
        }
    }

    pub fn codes(&self) -> Vec<NotificationCode> {
        let mut codes: Vec<_> = self.commands.lock().keys().copied().collect();
        codes.sort();
        codes
    }

    pub fn len(&self) -> usize {
        self.commands.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.lock().is_empty()
    }

    /// 모든 커맨드 제거
    pub fn clear(&self) {
        let mut commands = self.commands.lock();
        let count = commands.len();
        for (code, entry) in commands.drain() {
            self.dispatcher.unsubscribe(code, &entry.context);
        }

        if count > 0 {
            info!("Cleared {} commands", count);
        }
    }
}
