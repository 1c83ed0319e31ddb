//! Component helpers - 등록된 trait 객체를 구체 타입으로 되돌리기

use std::any::Any;
use std::sync::{Arc, Weak};

/// `Arc<dyn Trait>` → `Arc<dyn Any>` 변환
///
/// 모든 `'static + Send + Sync` 타입에 자동 구현되므로
/// Mediator / Proxy 구현체가 직접 구현할 필요가 없습니다.
pub trait AsAnyArc: Any + Send + Sync {
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAnyArc for T {
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

// ============================================================================
// ViewComponent<V> - UI 요소에 대한 약한 참조
// ============================================================================

/// Mediator 가 소유한 UI 요소에 대한 약한 참조
///
/// 코어는 뷰의 수명을 관리하지 않습니다. 뷰가 먼저 사라지면 `get()` 은 None.
#[derive(Debug)]
pub struct ViewComponent<V> {
    view: Weak<V>,
}

impl<V> Clone for ViewComponent<V> {
    fn clone(&self) -> Self {
        Self {
            view: Weak::clone(&self.view),
        }
    }
}

impl<V> Default for ViewComponent<V> {
    fn default() -> Self {
        Self { view: Weak::new() }
    }
}

impl<V: Any + Send + Sync> ViewComponent<V> {
    pub fn new(view: &Arc<V>) -> Self {
        Self {
            view: Arc::downgrade(view),
        }
    }

    /// 살아 있는 뷰
    pub fn get(&self) -> Option<Arc<V>> {
        self.view.upgrade()
    }

    /// `Mediator::view_component` 구현용
    pub fn as_any(&self) -> Option<Arc<dyn Any + Send + Sync>> {
        self.get().map(|v| v as Arc<dyn Any + Send + Sync>)
    }
}
