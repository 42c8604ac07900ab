//! CVD 공정 계산 모듈 모음.

pub mod curve;
pub mod physics;
pub mod state;

pub use curve::{CurvePoint, CurveProjector, CurveSweep, ProcessCurve};
pub use state::{
    CalculatedParam, ControlReadings, PressurePolicy, ProcessState, SolveTarget, UnknownParam,
};
