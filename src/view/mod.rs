//! 위젯과 시뮬레이터 사이의 어댑터. 물리 계산은 하지 않는다.

pub mod controls;
pub mod dispatch;
pub mod plot;

pub use controls::{
    read_controls, write_controls, ControlAdapter, ControlHandle, ControlId, ControlPanel,
    SliderRanges, DEFAULT_TARGET_C2H2_PP,
};
pub use dispatch::{dispatch, EventKind, Trigger};
pub use plot::{CurveRenderer, PlotModel};
