//! Config Layer - 설정 파일 한 개의 내용
//!
//! 파일에 적힌 키만 `Some` 이 됩니다. 병합할 때는 `Some` 인 값만 덮어쓰므로
//! 프로젝트 파일에 없는 키는 글로벌 값이 유지됩니다.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 설정 파일명
pub const BUS_CONFIG_FILE: &str = "bus.json";

// ============================================================================
// ConfigScope
// ============================================================================

/// 설정 파일 위치
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigScope {
    /// `<config_dir>/gridbus/bus.json`
    Global,
    /// `<root>/.gridbus/bus.json`
    Project(PathBuf),
}

impl ConfigScope {
    /// 현재 디렉토리 프로젝트
    pub fn current_project() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| Error::Config(format!("Cannot get current directory: {}", e)))?;
        Ok(ConfigScope::Project(cwd))
    }

    /// 설정 파일 경로
    pub fn file_path(&self) -> Result<PathBuf> {
        let dir = match self {
            ConfigScope::Global => dirs::config_dir()
                .ok_or_else(|| Error::Config("Cannot find config directory".to_string()))?
                .join("gridbus"),
            ConfigScope::Project(root) => root.join(".gridbus"),
        };
        Ok(dir.join(BUS_CONFIG_FILE))
    }
}

// ============================================================================
// BusConfigLayer
// ============================================================================

/// 파일 하나에서 읽은 부분 설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusConfigLayer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_mode: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warn_on_replace: Option<bool>,

    #[serde(default)]
    pub stress: StressLayer,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressLayer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<usize>,
}

impl BusConfigLayer {
    /// 파일이 없으면 None, 파싱 실패는 `Error::Config`
    pub fn read_optional(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        Self::read(path).map(Some)
    }

    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// 상위 디렉토리를 만들고 JSON 으로 기록
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| Error::Config(format!("Failed to create directory: {}", e)))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write {}: {}", path.display(), e)))
    }
}
