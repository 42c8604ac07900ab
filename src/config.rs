use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cvd::{ControlReadings, PressurePolicy};
use crate::simulator::SimulatorSettings;
use crate::view::SliderRanges;

/// 기본 설정 파일 이름
pub const DEFAULT_CONFIG_FILE: &str = "cvd_simulator.toml";

/// 슬라이더 한 개의 범위.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeBound {
    pub min: f64,
    pub max: f64,
}

impl RangeBound {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn as_tuple(self) -> (f64, f64) {
        (self.min, self.max)
    }
}

/// 각 슬라이더의 범위 설정.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlBounds {
    pub c2h2_flow: RangeBound,
    pub ar_flow: RangeBound,
    pub total_pressure: RangeBound,
    pub contaminant_pp: RangeBound,
}

impl Default for ControlBounds {
    fn default() -> Self {
        Self {
            c2h2_flow: RangeBound::new(0.0, 100.0),
            ar_flow: RangeBound::new(0.0, 200.0),
            total_pressure: RangeBound::new(0.0, 10.0),
            contaminant_pp: RangeBound::new(0.0, 0.5),
        }
    }
}

impl ControlBounds {
    pub fn slider_ranges(&self) -> SliderRanges {
        SliderRanges {
            c2h2_flow: self.c2h2_flow.as_tuple(),
            ar_flow: self.ar_flow.as_tuple(),
            total_pressure: self.total_pressure.as_tuple(),
            contaminant_pp: self.contaminant_pp.as_tuple(),
        }
    }
}

/// 표시용 단위 라벨. 값 환산은 하지 않는다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayUnits {
    pub flow: String,
    pub pressure: String,
}

impl Default for DisplayUnits {
    fn default() -> Self {
        Self {
            flow: "sccm".into(),
            pressure: "Torr".into(),
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (auto, ko, en-us ...)
    pub language: String,
    /// 외부 언어팩 디렉터리
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_pack_dir: Option<String>,
    pub window_alpha: f32,
    pub curve_samples: usize,
    pub pressure_policy: PressurePolicy,
    /// 시작 시 컨트롤 초기값
    pub initial: ControlReadings,
    pub bounds: ControlBounds,
    pub units: DisplayUnits,
    #[serde(skip)]
    path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            language_pack_dir: None,
            window_alpha: 1.0,
            curve_samples: crate::cvd::curve::DEFAULT_CURVE_SAMPLES,
            pressure_policy: PressurePolicy::Permissive,
            initial: ControlReadings::default(),
            bounds: ControlBounds::default(),
            units: DisplayUnits::default(),
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 현재 디렉터리의 기본 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_default_at(DEFAULT_CONFIG_FILE)
}

/// 지정한 경로의 설정을 로드한다. 파일이 없으면 기본값을 저장한 뒤 반환한다.
pub fn load_or_default_at(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let mut cfg = if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        log::info!("loaded config from {}", path.display());
        cfg
    } else {
        log::info!("config {} not found, writing defaults", path.display());
        let cfg = Config::default();
        save_config(&cfg, path)?;
        cfg
    };
    cfg.path = path.to_path_buf();
    if cfg.curve_samples == 0 {
        log::warn!("curve_samples=0 is invalid, using 1");
        cfg.curve_samples = 1;
    }
    Ok(cfg)
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 로드했던 경로에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        save_config(self, &self.path)?;
        log::info!("saved config to {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 설정값으로 시뮬레이터 옵션을 만든다. 곡선 제목 템플릿은 호출자가 정한다.
    pub fn simulator_settings(&self, title_template: &str) -> SimulatorSettings {
        SimulatorSettings {
            policy: self.pressure_policy,
            curve_samples: self.curve_samples,
            title_template: title_template.to_string(),
            pressure_unit: self.units.pressure.clone(),
        }
    }
}
