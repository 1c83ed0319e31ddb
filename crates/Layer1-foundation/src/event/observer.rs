//! Observer - "알림 코드 → 핸들러" 구독 레코드

use super::notification::{Notification, NotificationCode};
use crate::Result;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// 알림 핸들러
pub type NotificationHandler = Arc<dyn Fn(&Notification) -> Result<()> + Send + Sync>;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

// ============================================================================
// ObserverContext
// ============================================================================

/// 구독 소유자 식별자
///
/// 같은 이름으로 재등록되더라도 등록마다 token 이 달라서,
/// 이전 인스턴스의 구독 해제가 새 인스턴스의 구독을 지우지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObserverContext {
    owner: Arc<str>,
    token: u64,
}

impl ObserverContext {
    /// 새 token 으로 컨텍스트 생성
    pub fn new(owner: impl Into<Arc<str>>) -> Self {
        Self {
            owner: owner.into(),
            token: NEXT_TOKEN.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn token(&self) -> u64 {
        self.token
    }
}

impl fmt::Display for ObserverContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.owner, self.token)
    }
}

// ============================================================================
// Observer
// ============================================================================

/// 구독 레코드
#[derive(Clone)]
pub struct Observer {
    code: NotificationCode,
    handler: NotificationHandler,
    context: ObserverContext,
}

impl Observer {
    pub fn new(
        code: impl Into<NotificationCode>,
        context: ObserverContext,
        handler: impl Fn(&Notification) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self::from_handler(code, context, Arc::new(handler))
    }

    /// 이미 공유 중인 핸들러로 생성
    pub fn from_handler(
        code: impl Into<NotificationCode>,
        context: ObserverContext,
        handler: NotificationHandler,
    ) -> Self {
        Self {
            code: code.into(),
            handler,
            context,
        }
    }

    pub fn code(&self) -> NotificationCode {
        self.code
    }

    pub fn context(&self) -> &ObserverContext {
        &self.context
    }

    pub fn is_owned_by(&self, context: &ObserverContext) -> bool {
        &self.context == context
    }

    /// 핸들러 호출
    pub fn notify(&self, notification: &Notification) -> Result<()> {
        (self.handler)(notification)
    }
}

impl fmt::Debug for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("code", &self.code)
            .field("context", &self.context)
            .finish()
    }
}
