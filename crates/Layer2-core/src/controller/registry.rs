//! Controller Registry - 이름 → Mediator 저장소
//!
//! 등록: 기존 항목 제거(전체 teardown) → 삽입 + 관심 코드 구독 → `on_register`
//! 제거: 구독 해제 → 삭제 → `on_remove`
//!
//! 삽입/구독 해제는 레지스트리 잠금 안에서 한 번에 처리하고,
//! 생명주기 훅은 잠금 밖에서 호출합니다. 훅 안에서 레지스트리를 다시 호출해도 안전합니다.

use super::traits::Mediator;
use gridbus_foundation::{Dispatcher, NotificationCode, Observer, ObserverContext, Result};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 등록된 Mediator 정보
struct ControllerEntry {
    mediator: Arc<dyn Mediator>,

    /// 등록 시점의 관심 코드
    interests: Vec<NotificationCode>,

    /// 이 등록의 구독 소유자
    context: ObserverContext,
}

/// Mediator 레지스트리
pub struct ControllerRegistry {
    dispatcher: Arc<Dispatcher>,
    entries: Mutex<HashMap<String, ControllerEntry>>,
    warn_on_replace: bool,
}

impl ControllerRegistry {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            entries: Mutex::new(HashMap::new()),
            warn_on_replace: true,
        }
    }

    pub fn with_warn_on_replace(mut self, enabled: bool) -> Self {
        self.warn_on_replace = enabled;
        self
    }

    // ========================================================================
    // 등록 / 해제
    // ========================================================================

    /// Mediator 등록 (같은 이름이 있으면 교체)
    ///
    /// `on_register` 의 에러는 그대로 반환됩니다. 이때 Mediator 는 이미 등록된 상태입니다.
    pub fn register(&self, mediator: Arc<dyn Mediator>) -> Result<()> {
        let name = mediator.name().to_string();

        if self.remove(&name).is_some() {
            if self.warn_on_replace {
                warn!("Controller '{}' already registered, replacing", name);
            } else {
                debug!("Controller '{}' replaced", name);
            }
        }

        // 같은 코드를 여러 번 선언해도 Observer 는 하나 (선언 순서 유지)
        let mut seen = HashSet::new();
        let interests: Vec<_> = mediator
            .list_notification_interests()
            .into_iter()
            .filter(|code| seen.insert(*code))
            .collect();
        let context = ObserverContext::new(name.as_str());

        // 다른 스레드가 그 사이 같은 이름을 등록했을 수 있음
        let displaced = {
            let mut entries = self.entries.lock();
            let displaced = entries.remove(&name);
            if let Some(old) = &displaced {
                self.unsubscribe_entry(old);
            }

            for &code in &interests {
                let target = Arc::clone(&mediator);
                self.dispatcher.subscribe(Observer::new(code, context.clone(), move |n| {
                    target.handle_notification(n)
                }));
            }

            entries.insert(
                name.clone(),
                ControllerEntry {
                    mediator: Arc::clone(&mediator),
                    interests,
                    context,
                },
            );
            displaced
        };

        if let Some(old) = displaced {
            old.mediator.on_remove();
        }

        debug!("Registered controller: {}", name);
        mediator.on_register()
    }

    /// Mediator 제거 (없으면 None)
    pub fn remove(&self, name: &str) -> Option<Arc<dyn Mediator>> {
        let entry = {
            let mut entries = self.entries.lock();
            let entry = entries.remove(name)?;
            self.unsubscribe_entry(&entry);
            entry
        };

        entry.mediator.on_remove();
        debug!("Removed controller: {}", name);

        Some(entry.mediator)
    }

    fn unsubscribe_entry(&self, entry: &ControllerEntry) {
        for &code in &entry.interests {
            self.dispatcher.unsubscribe(code, &entry.context);
        }
    }

    /// 모든 Mediator 제거
    pub fn clear(&self) {
        let drained: Vec<ControllerEntry> = {
            let mut entries = self.entries.lock();
            let drained: Vec<_> = entries.drain().map(|(_, entry)| entry).collect();
            for entry in &drained {
                self.unsubscribe_entry(entry);
            }
            drained
        };

        let count = drained.len();
        for entry in drained {
            entry.mediator.on_remove();
        }

        if count > 0 {
            info!("Cleared {} controllers", count);
        }
    }

    // ========================================================================
    // 조회
    // ========================================================================

    pub fn retrieve(&self, name: &str) -> Option<Arc<dyn Mediator>> {
        self.entries
            .lock()
            .get(name)
            .map(|entry| Arc::clone(&entry.mediator))
    }

    /// 구체 타입으로 조회
    pub fn retrieve_as<M: Mediator>(&self, name: &str) -> Option<Arc<M>> {
        self.retrieve(name)?.into_any_arc().downcast::<M>().ok()
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.lock().contains_key(name)
    }

    /// 등록된 이름 목록 (정렬)
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.entries.lock().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ViewComponent;
    use gridbus_foundation::{Error, Notification};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const SORT_CHANGED: NotificationCode = NotificationCode(1);
    const ROWS_CHANGED: NotificationCode = NotificationCode(2);

    struct Header {
        column: &'static str,
    }

    struct TestMediator {
        name: String,
        interests: Vec<NotificationCode>,
        view: ViewComponent<Header>,
        handled: AtomicUsize,
        registered: AtomicUsize,
        removed: AtomicUsize,
    }

    impl TestMediator {
        fn new(name: &str, interests: &[NotificationCode]) -> Arc<Self> {
            Self::with_view(name, interests, ViewComponent::default())
        }

        fn with_view(
            name: &str,
            interests: &[NotificationCode],
            view: ViewComponent<Header>,
        ) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                interests: interests.to_vec(),
                view,
                handled: AtomicUsize::new(0),
                registered: AtomicUsize::new(0),
                removed: AtomicUsize::new(0),
            })
        }

        fn handled(&self) -> usize {
            self.handled.load(Ordering::SeqCst)
        }

        fn removed(&self) -> usize {
            self.removed.load(Ordering::SeqCst)
        }
    }

    impl Mediator for TestMediator {
        fn name(&self) -> &str {
            &self.name
        }

        fn view_component(&self) -> Option<Arc<dyn std::any::Any + Send + Sync>> {
            self.view.as_any()
        }

        fn list_notification_interests(&self) -> Vec<NotificationCode> {
            self.interests.clone()
        }

        fn handle_notification(&self, _notification: &Notification) -> Result<()> {
            self.handled.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_register(&self) -> Result<()> {
            self.registered.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_remove(&self) {
            self.removed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn registry() -> (Arc<Dispatcher>, ControllerRegistry) {
        let dispatcher = Arc::new(Dispatcher::new());
        let registry = ControllerRegistry::new(Arc::clone(&dispatcher));
        (dispatcher, registry)
    }

    #[test]
    fn test_register_subscribes_interests() {
        let (dispatcher, registry) = registry();
        let m = TestMediator::new("header", &[SORT_CHANGED, ROWS_CHANGED]);

        registry.register(m.clone()).unwrap();

        assert!(registry.has("header"));
        assert_eq!(m.registered.load(Ordering::SeqCst), 1);
        assert_eq!(dispatcher.observer_count(SORT_CHANGED), 1);
        assert_eq!(dispatcher.observer_count(ROWS_CHANGED), 1);

        dispatcher.notify(&Notification::new(SORT_CHANGED)).unwrap();
        assert_eq!(m.handled(), 1);
    }

    #[test]
    fn test_repeated_interest_delivers_once() {
        let (dispatcher, registry) = registry();
        let m = TestMediator::new("header", &[SORT_CHANGED, ROWS_CHANGED, SORT_CHANGED]);

        registry.register(m.clone()).unwrap();
        assert_eq!(dispatcher.observer_count(SORT_CHANGED), 1);

        dispatcher.notify(&Notification::new(SORT_CHANGED)).unwrap();
        assert_eq!(m.handled(), 1);

        registry.remove("header");
        assert!(dispatcher.codes().is_empty());
    }

    #[test]
    fn test_reregister_replaces() {
        let (dispatcher, registry) = registry();
        let first = TestMediator::new("header", &[SORT_CHANGED]);
        let second = TestMediator::new("header", &[SORT_CHANGED]);

        registry.register(first.clone()).unwrap();
        registry.register(second.clone()).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(first.removed(), 1);
        assert_eq!(dispatcher.observer_count(SORT_CHANGED), 1);

        let current = registry.retrieve_as::<TestMediator>("header").unwrap();
        assert!(Arc::ptr_eq(&current, &second));

        dispatcher.notify(&Notification::new(SORT_CHANGED)).unwrap();
        assert_eq!(first.handled(), 0);
        assert_eq!(second.handled(), 1);
    }

    #[test]
    fn test_same_instance_twice_delivers_once() {
        let (dispatcher, registry) = registry();
        let m = TestMediator::new("header", &[SORT_CHANGED]);

        registry.register(m.clone()).unwrap();
        registry.register(m.clone()).unwrap();

        dispatcher.notify(&Notification::new(SORT_CHANGED)).unwrap();
        assert_eq!(m.handled(), 1);
        assert_eq!(m.removed(), 1);
    }

    #[test]
    fn test_remove_twice_is_noop() {
        let (dispatcher, registry) = registry();
        let m = TestMediator::new("header", &[SORT_CHANGED]);
        registry.register(m.clone()).unwrap();

        assert!(registry.remove("header").is_some());
        assert!(registry.remove("header").is_none());
        assert!(registry.remove("never").is_none());

        assert_eq!(m.removed(), 1);
        assert!(!dispatcher.has_observers(SORT_CHANGED));
    }

    #[test]
    fn test_on_register_error_propagates() {
        struct Failing;

        impl Mediator for Failing {
            fn name(&self) -> &str {
                "failing"
            }

            fn on_register(&self) -> Result<()> {
                Err(Error::handler("failing", "view not ready"))
            }
        }

        let (_, registry) = registry();
        let err = registry.register(Arc::new(Failing)).unwrap_err();
        assert!(matches!(err, Error::Handler { .. }));
        assert!(registry.has("failing"));
    }

    #[test]
    fn test_typed_view_accessor() {
        let header = Arc::new(Header { column: "Name" });
        let m = TestMediator::with_view("header", &[], ViewComponent::new(&header));

        let (_, registry) = registry();
        registry.register(m).unwrap();

        let mediator = registry.retrieve("header").unwrap();
        assert_eq!(mediator.view::<Header>().unwrap().column, "Name");
        assert!(mediator.view::<String>().is_none());
    }

    #[test]
    fn test_clear_tears_down_everything() {
        let (dispatcher, registry) = registry();
        let a = TestMediator::new("a", &[SORT_CHANGED]);
        let b = TestMediator::new("b", &[ROWS_CHANGED]);
        registry.register(a.clone()).unwrap();
        registry.register(b.clone()).unwrap();

        assert_eq!(registry.names(), vec!["a".to_string(), "b".to_string()]);

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(a.removed(), 1);
        assert_eq!(b.removed(), 1);
        assert!(dispatcher.codes().is_empty());
    }
}
