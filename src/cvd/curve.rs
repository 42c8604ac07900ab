//! 공정 곡선(아르곤 유량 vs 목표 분압 유지에 필요한 총압) 생성.

use super::physics;
use super::state::ProcessState;

/// 아르곤 유량 스윕의 최소 하한. 슬라이더 최소값이 이보다 작아도 여기서 시작한다.
pub const MIN_SWEEP_AR_FLOW: f64 = 1.0;
/// 기본 샘플 수
pub const DEFAULT_CURVE_SAMPLES: usize = 50;

/// 곡선 위의 한 점.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub ar_flow: f64,
    pub total_pressure: f64,
}

impl CurvePoint {
    pub fn as_array(&self) -> [f64; 2] {
        [self.ar_flow, self.total_pressure]
    }
}

/// 아르곤 유량을 선형으로 훑으며 필요한 총압을 계산하는 지연 시퀀스.
///
/// `Clone`으로 복제하면 처음부터 다시 순회할 수 있다.
#[derive(Debug, Clone)]
pub struct CurveSweep {
    c2h2_flow: f64,
    contaminant_pp: f64,
    target_c2h2_pp: f64,
    start: f64,
    end: f64,
    samples: usize,
    next: usize,
}

impl CurveSweep {
    fn sample_at(&self, i: usize) -> CurvePoint {
        let ar_flow = if self.samples <= 1 {
            self.start
        } else {
            self.start + (self.end - self.start) * i as f64 / (self.samples - 1) as f64
        };
        CurvePoint {
            ar_flow,
            total_pressure: physics::solve_total_pressure(
                self.c2h2_flow,
                ar_flow,
                self.contaminant_pp,
                self.target_c2h2_pp,
            ),
        }
    }

    /// 스윕 구간 `(시작, 끝)`.
    pub fn range(&self) -> (f64, f64) {
        (self.start, self.end)
    }
}

impl Iterator for CurveSweep {
    type Item = CurvePoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.samples {
            return None;
        }
        let point = self.sample_at(self.next);
        self.next += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.samples - self.next.min(self.samples);
        (left, Some(left))
    }
}

impl ExactSizeIterator for CurveSweep {}

/// 현재 상태로부터 만든 곡선 한 벌과 강조점.
#[derive(Debug, Clone)]
pub struct ProcessCurve {
    pub sweep: CurveSweep,
    /// 현재 상태 (ar_flow, total_pressure)
    pub highlight: CurvePoint,
    pub target_c2h2_pp: f64,
}

/// 공정 곡선 생성기.
#[derive(Debug, Clone, Copy)]
pub struct CurveProjector {
    samples: usize,
}

impl Default for CurveProjector {
    fn default() -> Self {
        Self::new(DEFAULT_CURVE_SAMPLES)
    }
}

impl CurveProjector {
    pub fn new(samples: usize) -> Self {
        Self {
            samples: samples.max(1),
        }
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// 아르곤 슬라이더 범위 `[max(min, 1), max]`를 훑는 곡선을 만든다.
    /// 최대값이 시작점보다 작으면 시작점 한 곳만 반복된다.
    /// 계산 대상과 무관하게 항상 목표 분압(`target_c2h2_pp`)을 기준으로 한다.
    pub fn project(&self, state: &ProcessState, ar_min: f64, ar_max: f64) -> ProcessCurve {
        let start = ar_min.max(MIN_SWEEP_AR_FLOW);
        let sweep = CurveSweep {
            c2h2_flow: state.c2h2_flow,
            contaminant_pp: state.contaminant_pp,
            target_c2h2_pp: state.target_c2h2_pp,
            start,
            end: ar_max.max(start),
            samples: self.samples,
            next: 0,
        };
        ProcessCurve {
            sweep,
            highlight: CurvePoint {
                ar_flow: state.ar_flow,
                total_pressure: state.total_pressure,
            },
            target_c2h2_pp: state.target_c2h2_pp,
        }
    }
}
