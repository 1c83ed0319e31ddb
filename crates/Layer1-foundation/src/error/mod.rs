//! Error types for GridBus
//!
//! 모든 에러를 중앙에서 관리
//!
//! 조회/삭제 대상이 없는 경우는 에러가 아니라 `None`/`false` 로 표현합니다.
//! 여기 정의된 에러는 핸들러/커맨드가 실패했을 때 호출자에게 그대로 전달됩니다.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// GridBus 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 디스패치 관련
    // ========================================================================
    #[error("Handler failed: {context} - {message}")]
    Handler { context: String, message: String },

    #[error("Command failed for notification {code}: {message}")]
    Command { code: i32, message: String },

    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // 일반
    // ========================================================================
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // 기타
    // ========================================================================
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// 사용자에게 보여줄 수 있는 에러인지 확인
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::Config(_) | Error::NotFound(_) | Error::InvalidInput(_)
        )
    }

    /// Mediator 핸들러 에러 생성 헬퍼
    pub fn handler(context: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Handler {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Command 실행 에러 생성 헬퍼
    pub fn command(code: impl Into<i32>, message: impl Into<String>) -> Self {
        Error::Command {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// From 구현 (추가 변환)
// ============================================================================

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Internal(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Internal(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers_format() {
        let err = Error::handler("sort-header:Name", "column missing");
        assert_eq!(
            err.to_string(),
            "Handler failed: sort-header:Name - column missing"
        );

        let err = Error::command(7, "no rows");
        assert_eq!(err.to_string(), "Command failed for notification 7: no rows");
    }

    #[test]
    fn test_user_facing() {
        assert!(Error::Config("bad".into()).is_user_facing());
        assert!(!Error::from("boom").is_user_facing());
        assert!(!Error::command(1, "x").is_user_facing());
    }
}
