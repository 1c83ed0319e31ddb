//! Mediator trait - 뷰 쪽 어댑터 인터페이스

use crate::component::AsAnyArc;
use gridbus_foundation::{Notification, NotificationCode, Result};
use std::any::Any;
use std::sync::Arc;

/// 하나의 UI 컴포넌트를 대신해 알림을 구독/처리하는 어댑터
///
/// 등록되는 순간부터 버스 트래픽을 받고, 제거되는 순간 멈춥니다.
pub trait Mediator: AsAnyArc {
    /// 고유 이름 (레지스트리 키)
    fn name(&self) -> &str;

    /// 소유 UI 요소 (약한 참조). 타입 지정 조회는 `<dyn Mediator>::view`
    fn view_component(&self) -> Option<Arc<dyn Any + Send + Sync>> {
        None
    }

    /// 관심 알림 코드. 등록 시 한 번만 평가됩니다.
    fn list_notification_interests(&self) -> Vec<NotificationCode> {
        Vec::new()
    }

    /// 알림 처리
    fn handle_notification(&self, _notification: &Notification) -> Result<()> {
        Ok(())
    }

    /// 등록 완료 후 (구독 설치 이후) 호출
    fn on_register(&self) -> Result<()> {
        Ok(())
    }

    /// 구독 해제 후 호출
    fn on_remove(&self) {}
}

impl dyn Mediator {
    /// 뷰 컴포넌트를 구체 타입으로 조회
    pub fn view<V: Any + Send + Sync>(&self) -> Option<Arc<V>> {
        self.view_component()?.downcast::<V>().ok()
    }
}
