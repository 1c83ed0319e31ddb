//! Model Registry - 이름 → Proxy 저장소
//!
//! Controller 레지스트리와 같은 생명주기지만 Dispatcher 와는 상호작용하지 않습니다.

use super::proxy::Proxy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Proxy 레지스트리
pub struct ModelRegistry {
    proxies: Mutex<HashMap<String, Arc<dyn Proxy>>>,
    warn_on_replace: bool,
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self {
            proxies: Mutex::new(HashMap::new()),
            warn_on_replace: true,
        }
    }

    pub fn with_warn_on_replace(mut self, enabled: bool) -> Self {
        self.warn_on_replace = enabled;
        self
    }

    /// Proxy 등록 (같은 이름이 있으면 교체)
    pub fn register(&self, proxy: Arc<dyn Proxy>) {
        let name = proxy.name().to_string();

        if self.remove(&name).is_some() {
            if self.warn_on_replace {
                warn!("Model '{}' already registered, replacing", name);
            } else {
                debug!("Model '{}' replaced", name);
            }
        }

        let displaced = self.proxies.lock().insert(name.clone(), Arc::clone(&proxy));
        if let Some(old) = displaced {
            old.on_remove();
        }

        debug!("Registered model: {}", name);
        proxy.on_register();
    }

    /// Proxy 제거 (없으면 None)
    pub fn remove(&self, name: &str) -> Option<Arc<dyn Proxy>> {
        let proxy = self.proxies.lock().remove(name)?;
        proxy.on_remove();
        debug!("Removed model: {}", name);
        Some(proxy)
    }

    /// 모든 Proxy 제거
    pub fn clear(&self) {
        let drained: Vec<_> = self.proxies.lock().drain().map(|(_, p)| p).collect();
        let count = drained.len();
        for proxy in drained {
            proxy.on_remove();
        }

        if count > 0 {
            info!("Cleared {} models", count);
        }
    }

    pub fn retrieve(&self, name: &str) -> Option<Arc<dyn Proxy>> {
        self.proxies.lock().get(name).cloned()
    }

    /// 구체 타입으로 조회
    pub fn retrieve_as<P: Proxy>(&self, name: &str) -> Option<Arc<P>> {
        self.retrieve(name)?.into_any_arc().downcast::<P>().ok()
    }

    pub fn has(&self, name: &str) -> bool {
        self.proxies.lock().contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.proxies.lock().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.proxies.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.lock().is_empty()
    }
}
