//! CVD 공정 시뮬레이터의 계산 로직. CLI와 GUI가 같은 모델을 공유한다.

pub mod analysis;
pub mod app;
pub mod config;
pub mod cvd;
pub mod i18n;
pub mod simulator;
pub mod ui_cli;
pub mod view;
