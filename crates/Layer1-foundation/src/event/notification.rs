//! Notification - 버스를 통해 전달되는 메시지
//!
//! 정수 코드가 1차 디스패치 키이고, `name`/`type` 은 일부 핸들러가
//! 추가로 걸러낼 때 사용하는 보조 키입니다.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// NotificationCode
// ============================================================================

/// 알림 코드 (디스패치 키)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationCode(pub i32);

impl NotificationCode {
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    pub const fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for NotificationCode {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

impl From<NotificationCode> for i32 {
    fn from(code: NotificationCode) -> Self {
        code.0
    }
}

impl fmt::Display for NotificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 공유 가능한 불투명 페이로드
pub type NotificationBody = Arc<dyn Any + Send + Sync>;

// ============================================================================
// Notification
// ============================================================================

/// 버스 메시지
///
/// 생성 이후에는 변경되지 않습니다. Clone 은 body 를 `Arc` 로 공유합니다.
///
/// ```ignore
/// let n = Notification::new(SORT_CHANGED)
///     .with_name("LastName")
///     .with_body(SortDirection::Ascending);
///
/// if n.name() == Some("LastName") {
///     let dir = n.body::<SortDirection>();
/// }
/// ```
#[derive(Clone)]
pub struct Notification {
    code: NotificationCode,
    name: Option<String>,
    kind: Option<String>,
    body: Option<NotificationBody>,
}

impl Notification {
    /// 코드만으로 생성
    pub fn new(code: impl Into<NotificationCode>) -> Self {
        Self {
            code: code.into(),
            name: None,
            kind: None,
            body: None,
        }
    }

    /// 코드 + body 로 생성
    pub fn with_payload<T: Any + Send + Sync>(code: impl Into<NotificationCode>, body: T) -> Self {
        Self::new(code).with_body(body)
    }

    /// 코드 + body + type 으로 생성
    pub fn with_payload_and_type<T: Any + Send + Sync>(
        code: impl Into<NotificationCode>,
        body: T,
        kind: impl Into<String>,
    ) -> Self {
        Self::new(code).with_body(body).with_type(kind)
    }

    /// body 설정
    pub fn with_body<T: Any + Send + Sync>(mut self, body: T) -> Self {
        self.body = Some(Arc::new(body));
        self
    }

    /// 이미 공유 중인 body 설정
    pub fn with_shared_body(mut self, body: NotificationBody) -> Self {
        self.body = Some(body);
        self
    }

    /// type 설정
    pub fn with_type(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// name 설정
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn code(&self) -> NotificationCode {
        self.code
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// body 를 `T` 로 해석 (타입이 다르면 None)
    pub fn body<T: Any>(&self) -> Option<&T> {
        self.body.as_deref()?.downcast_ref::<T>()
    }

    /// 공유 body 복제
    pub fn body_arc(&self) -> Option<NotificationBody> {
        self.body.clone()
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

impl fmt::Debug for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notification")
            .field("code", &self.code)
            .field("name", &self.name)
            .field("type", &self.kind)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}
