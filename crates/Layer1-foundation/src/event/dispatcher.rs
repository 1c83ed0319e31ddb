//! Dispatcher - 코드별 Observer 목록 관리 및 알림 전달
//!
//! `notify` 는 잠금 안에서 목록을 복사한 뒤 잠금을 풀고 복사본을 순회합니다.
//! 따라서 핸들러가 전달 도중 구독/해제(자기 자신 포함)를 해도
//! 교착이 없고 진행 중인 전달이 건너뛰거나 중복되지 않습니다.
//!
//! - 시작 시점에 있던 Observer 는 (앞선 핸들러가 제거했더라도) 정확히 한 번 호출
//! - 전달 도중 추가된 Observer 는 다음 `notify` 부터 호출

use super::notification::{Notification, NotificationCode};
use super::observer::{Observer, ObserverContext};
use crate::Result;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// 알림 디스패처
#[derive(Default)]
pub struct Dispatcher {
    /// 코드별 Observer 목록 (등록 순서 유지)
    observers: Mutex<HashMap<NotificationCode, Vec<Observer>>>,

    /// 전달 단위 trace 로깅
    debug_mode: bool,

    /// 전달된 알림 수
    notify_count: AtomicU64,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug_mode(debug_mode: bool) -> Self {
        Self {
            debug_mode,
            ..Self::default()
        }
    }

    /// Observer 구독
    pub fn subscribe(&self, observer: Observer) {
        let mut observers = self.observers.lock();
        observers.entry(observer.code()).or_default().push(observer);
    }

    /// `context` 소유의 Observer 를 모두 제거하고 제거 개수를 반환
    pub fn unsubscribe(&self, code: NotificationCode, context: &ObserverContext) -> usize {
        let mut observers = self.observers.lock();
        let Some(list) = observers.get_mut(&code) else {
            return 0;
        };

        let before = list.len();
        list.retain(|o| !o.is_owned_by(context));
        let removed = before - list.len();

        if list.is_empty() {
            observers.remove(&code);
        }

        removed
    }

    /// 알림 전달
    ///
    /// 핸들러 에러는 잡지 않습니다. 첫 에러에서 전달을 멈추고 그대로 반환합니다.
    pub fn notify(&self, notification: &Notification) -> Result<()> {
        let snapshot = {
            let observers = self.observers.lock();
            match observers.get(&notification.code()) {
                Some(list) => list.clone(),
                None => return Ok(()),
            }
        };

        let seq = self.notify_count.fetch_add(1, Ordering::Relaxed) + 1;

        for observer in &snapshot {
            if self.debug_mode {
                trace!(
                    code = %notification.code(),
                    context = %observer.context(),
                    "Delivering notification #{}", seq
                );
            }
            observer.notify(notification)?;
        }

        Ok(())
    }

    /// 코드에 등록된 Observer 수
    pub fn observer_count(&self, code: NotificationCode) -> usize {
        self.observers.lock().get(&code).map_or(0, Vec::len)
    }

    pub fn has_observers(&self, code: NotificationCode) -> bool {
        self.observer_count(code) > 0
    }

    /// Observer 가 있는 코드 목록
    pub fn codes(&self) -> Vec<NotificationCode> {
        let mut codes: Vec<_> = self.observers.lock().keys().copied().collect();
        codes.sort();
        codes
    }

    /// 실제 전달이 일어난 notify 호출 수
    pub fn notify_count(&self) -> u64 {
        self.notify_count.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.observers.lock().clear();
    }
}
