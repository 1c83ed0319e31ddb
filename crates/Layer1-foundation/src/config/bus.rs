//! Bus Config - 버스 설정
//!
//! 글로벌(`<config_dir>/gridbus/bus.json`) 과 프로젝트(`.gridbus/bus.json`)
//! 파일을 순서대로 기본값 위에 겹칩니다. 파일에 적힌 키만 덮어씁니다.

use super::layer::{BusConfigLayer, ConfigScope, StressLayer};
use crate::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

fn default_version() -> u32 {
    1
}

// ============================================================================
// BusConfig
// ============================================================================

/// GridBus 설정 (모든 값이 채워진 최종 결과)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusConfig {
    /// 버전 (마이그레이션용)
    pub version: u32,

    /// 디버그 모드 (모든 전달을 trace 로깅)
    pub debug_mode: bool,

    /// 같은 이름/코드로 재등록할 때 warn 레벨로 로깅
    pub warn_on_replace: bool,

    /// stress 명령 기본값
    pub stress: StressSettings,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            debug_mode: false,
            warn_on_replace: true,
            stress: StressSettings::default(),
        }
    }
}

impl BusConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load / Save
    // ========================================================================

    /// 글로벌 + 현재 프로젝트 병합 로드
    pub fn load() -> Result<Self> {
        let mut paths = Vec::new();
        if let Ok(global) = ConfigScope::Global.file_path() {
            paths.push(global);
        }
        paths.push(ConfigScope::current_project()?.file_path()?);

        Self::load_layers(&paths)
    }

    /// 주어진 파일들을 순서대로 병합 (없는 파일은 건너뜀)
    pub fn load_layers(paths: &[PathBuf]) -> Result<Self> {
        let mut config = Self::new();
        for path in paths {
            if let Some(layer) = BusConfigLayer::read_optional(path)? {
                debug!("Applying config layer: {}", path.display());
                config.merge(layer);
            }
        }
        Ok(config)
    }

    /// 지정한 파일에서 로드 (파일이 반드시 있어야 함)
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::new();
        config.merge(BusConfigLayer::read(path)?);
        Ok(config)
    }

    /// 현재 값을 해당 위치의 파일로 저장하고 경로를 반환
    pub fn save(&self, scope: &ConfigScope) -> Result<PathBuf> {
        let path = scope.file_path()?;
        self.to_layer().write(&path)?;
        Ok(path)
    }

    /// 파일 한 개 병합 (적힌 키만 덮어씀)
    pub fn merge(&mut self, layer: BusConfigLayer) {
        if let Some(version) = layer.version {
            self.version = version;
        }
        if let Some(debug_mode) = layer.debug_mode {
            self.debug_mode = debug_mode;
        }
        if let Some(warn_on_replace) = layer.warn_on_replace {
            self.warn_on_replace = warn_on_replace;
        }
        self.stress.merge(layer.stress);
    }

    fn to_layer(&self) -> BusConfigLayer {
        BusConfigLayer {
            version: Some(self.version),
            debug_mode: Some(self.debug_mode),
            warn_on_replace: Some(self.warn_on_replace),
            stress: StressLayer {
                threads: Some(self.stress.threads),
                iterations: Some(self.stress.iterations),
            },
        }
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn debug_mode(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }

    pub fn warn_on_replace(mut self, enabled: bool) -> Self {
        self.warn_on_replace = enabled;
        self
    }
}

// ============================================================================
// StressSettings
// ============================================================================

/// 동시성 soak 테스트 기본값
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StressSettings {
    pub threads: usize,
    pub iterations: usize,
}

impl Default for StressSettings {
    fn default() -> Self {
        Self {
            threads: 16,
            iterations: 2_000,
        }
    }
}

impl StressSettings {
    /// 0 은 "설정 안 함" 으로 취급
    fn merge(&mut self, layer: StressLayer) {
        if let Some(threads) = layer.threads.filter(|&t| t > 0) {
            self.threads = threads;
        }
        if let Some(iterations) = layer.iterations.filter(|&i| i > 0) {
            self.iterations = iterations;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(path: &Path, json: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, json).unwrap();
    }

    #[test]
    fn test_empty_layer_keeps_defaults() {
        let mut config = BusConfig::default();
        config.merge(serde_json::from_str("{}").unwrap());

        assert_eq!(config, BusConfig::default());
        assert!(config.warn_on_replace);
        assert_eq!(config.stress.threads, 16);
    }

    #[test]
    fn test_project_overrides_only_its_own_keys() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global/bus.json");
        let project = dir.path().join("project/.gridbus/bus.json");
        write(
            &global,
            r#"{"debugMode": true, "warnOnReplace": false, "stress": {"threads": 4}}"#,
        );
        write(&project, r#"{"stress": {"iterations": 10}}"#);

        let config = BusConfig::load_layers(&[global, project]).unwrap();

        assert!(config.debug_mode);
        assert!(!config.warn_on_replace);
        assert_eq!(config.stress.threads, 4);
        assert_eq!(config.stress.iterations, 10);
    }

    #[test]
    fn test_later_layer_wins_and_missing_files_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.json");
        let project = dir.path().join("project.json");
        write(&global, r#"{"debugMode": true, "stress": {"threads": 4}}"#);
        write(&project, r#"{"debugMode": false, "stress": {"threads": 0}}"#);

        let config = BusConfig::load_layers(&[
            dir.path().join("missing.json"),
            global,
            project,
        ])
        .unwrap();

        assert!(!config.debug_mode);
        assert_eq!(config.stress.threads, 4);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        fs::write(&path, r#"{"warnOnReplace": false}"#).unwrap();

        let config = BusConfig::load_from(&path).unwrap();
        assert!(!config.warn_on_replace);
        assert_eq!(config.version, 1);

        assert!(BusConfig::load_from(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_save_project_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let scope = ConfigScope::Project(dir.path().to_path_buf());
        let mut config = BusConfig::default().debug_mode(true);
        config.stress.iterations = 50;

        let path = config.save(&scope).unwrap();
        assert_eq!(path, dir.path().join(".gridbus/bus.json"));

        let loaded = BusConfig::load_layers(&[path]).unwrap();
        assert_eq!(loaded, config);
    }
}
