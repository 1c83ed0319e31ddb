//! Proxy - 버스에 등록되는 도메인 데이터 보관자
//!
//! Proxy 는 구독하지 않습니다. 생성 시 받은 `Notifier` 로 발행만 합니다.

use crate::component::AsAnyArc;
use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Proxy trait
pub trait Proxy: AsAnyArc {
    /// 고유 이름 (레지스트리 키)
    fn name(&self) -> &str;

    /// 자유 형식 데이터
    fn data(&self) -> Option<Arc<dyn Any + Send + Sync>> {
        None
    }

    fn on_register(&self) {}

    fn on_remove(&self) {}
}

// ============================================================================
// DataProxy<T> - 기본 Proxy 구현
// ============================================================================

/// 값 하나를 보관하는 기본 Proxy
///
/// ```ignore
/// let rows = Arc::new(DataProxy::new("rows", vec![row_a, row_b]));
/// facade.register_model(rows.clone());
///
/// rows.update(|rows| rows.sort_by_key(|r| r.age));
/// ```
pub struct DataProxy<T> {
    name: String,
    data: RwLock<Arc<T>>,
}

impl<T: Send + Sync + 'static> DataProxy<T> {
    pub fn new(name: impl Into<String>, data: T) -> Self {
        Self {
            name: name.into(),
            data: RwLock::new(Arc::new(data)),
        }
    }

    /// 현재 값 (스냅샷)
    pub fn get(&self) -> Arc<T> {
        Arc::clone(&self.data.read())
    }

    /// 값 교체
    pub fn set(&self, data: T) {
        *self.data.write() = Arc::new(data);
    }

    /// 현재 값을 복제해 수정한 뒤 교체
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R
    where
        T: Clone,
    {
        let mut guard = self.data.write();
        f(Arc::make_mut(&mut guard))
    }
}

impl<T: Send + Sync + 'static> Proxy for DataProxy<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn data(&self) -> Option<Arc<dyn Any + Send + Sync>> {
        Some(self.get() as Arc<dyn Any + Send + Sync>)
    }
}

impl<T: fmt::Debug> fmt::Debug for DataProxy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataProxy")
            .field("name", &self.name)
            .field("data", &*self.data.read())
            .finish()
    }
}

impl dyn Proxy {
    /// 데이터를 구체 타입으로 조회
    pub fn data_as<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.data()?.downcast::<T>().ok()
    }
}
