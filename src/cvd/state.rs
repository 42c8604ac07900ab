use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::physics;

/// 사용자가 "계산 대상"으로 고른 파라미터(라디오 그룹 값).
///
/// `C2h2PartialPressure`는 아세틸렌 분압을 목표값으로 고정한다는 뜻이며,
/// 실제로 계산되는 값은 총압이다. [`CalculatedParam::solve_target`] 참고.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculatedParam {
    #[serde(rename = "c2h2_flow")]
    C2h2Flow,
    #[serde(rename = "ar_flow")]
    ArFlow,
    #[serde(rename = "total_pressure")]
    TotalPressure,
    #[serde(rename = "c2h2_pp")]
    C2h2PartialPressure,
}

/// 지배식을 실제로 풀어 덮어쓰는 물리량.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveTarget {
    C2h2Flow,
    ArFlow,
    TotalPressure,
}

impl CalculatedParam {
    pub const ALL: [CalculatedParam; 4] = [
        CalculatedParam::C2h2Flow,
        CalculatedParam::ArFlow,
        CalculatedParam::TotalPressure,
        CalculatedParam::C2h2PartialPressure,
    ];

    /// 라디오 값이 가리키는 미지수를 돌려준다. 분압 고정은 총압 계산으로 해석한다.
    pub fn solve_target(self) -> SolveTarget {
        match self {
            CalculatedParam::C2h2Flow => SolveTarget::C2h2Flow,
            CalculatedParam::ArFlow => SolveTarget::ArFlow,
            CalculatedParam::TotalPressure | CalculatedParam::C2h2PartialPressure => {
                SolveTarget::TotalPressure
            }
        }
    }

    /// 컨트롤에 쓰이는 문자열 값.
    pub fn as_str(self) -> &'static str {
        match self {
            CalculatedParam::C2h2Flow => "c2h2_flow",
            CalculatedParam::ArFlow => "ar_flow",
            CalculatedParam::TotalPressure => "total_pressure",
            CalculatedParam::C2h2PartialPressure => "c2h2_pp",
        }
    }
}

impl fmt::Display for CalculatedParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 알 수 없는 계산 대상 문자열.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("알 수 없는 계산 대상: {0}")]
pub struct UnknownParam(pub String);

impl FromStr for CalculatedParam {
    type Err = UnknownParam;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "c2h2_flow" => Ok(CalculatedParam::C2h2Flow),
            "ar_flow" => Ok(CalculatedParam::ArFlow),
            "total_pressure" => Ok(CalculatedParam::TotalPressure),
            "c2h2_pp" => Ok(CalculatedParam::C2h2PartialPressure),
            other => Err(UnknownParam(other.to_string())),
        }
    }
}

/// 총압이 오염물 분압보다 낮을 때의 처리 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressurePolicy {
    /// 입력을 그대로 사용한다(음의 공정 압력 허용).
    #[default]
    Permissive,
    /// 풀기 전에 총압을 오염물 분압까지 끌어올린다.
    Clamp,
}

/// 한 번의 update에서 컨트롤로부터 읽은 입력 묶음.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlReadings {
    pub c2h2_flow: f64,
    pub ar_flow: f64,
    pub total_pressure: f64,
    pub contaminant_pp: f64,
    pub target_c2h2_pp: f64,
    pub calculated_param: CalculatedParam,
}

impl Default for ControlReadings {
    fn default() -> Self {
        Self {
            c2h2_flow: 5.0,
            ar_flow: 45.0,
            total_pressure: 1.0,
            contaminant_pp: 0.01,
            target_c2h2_pp: 0.25,
            calculated_param: CalculatedParam::C2h2PartialPressure,
        }
    }
}

/// 시뮬레이터의 현재 공정 상태 스냅샷.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessState {
    pub c2h2_flow: f64,
    pub ar_flow: f64,
    pub total_pressure: f64,
    pub contaminant_pp: f64,
    pub target_c2h2_pp: f64,
    pub calculated_param: CalculatedParam,
    /// 지배식으로 다시 계산한 실제 아세틸렌 분압(표시용)
    pub c2h2_pp: f64,
}

impl ProcessState {
    /// 초기 컨트롤 값으로 상태를 만들고 한 번 풀어 일관성을 맞춘다.
    pub fn new(initial: &ControlReadings, policy: PressurePolicy) -> Self {
        let mut state = Self {
            c2h2_flow: initial.c2h2_flow,
            ar_flow: initial.ar_flow,
            total_pressure: initial.total_pressure,
            contaminant_pp: initial.contaminant_pp,
            target_c2h2_pp: initial.target_c2h2_pp,
            calculated_param: initial.calculated_param,
            c2h2_pp: 0.0,
        };
        state.update(initial, policy);
        state
    }

    pub fn process_pressure(&self) -> f64 {
        physics::process_pressure(self.total_pressure, self.contaminant_pp)
    }

    /// 입력을 통째로 다시 읽고 선택된 미지수를 처음부터 다시 푼다.
    /// 이전 상태에 의존하지 않으므로 같은 입력이면 같은 결과가 나온다.
    pub fn update(&mut self, readings: &ControlReadings, policy: PressurePolicy) -> SolveTarget {
        self.c2h2_flow = readings.c2h2_flow;
        self.ar_flow = readings.ar_flow;
        self.total_pressure = readings.total_pressure;
        self.contaminant_pp = readings.contaminant_pp;
        self.target_c2h2_pp = readings.target_c2h2_pp;
        self.calculated_param = readings.calculated_param;

        let target = self.calculated_param.solve_target();
        if target != SolveTarget::TotalPressure && self.total_pressure < self.contaminant_pp {
            log::warn!(
                "total pressure {:.4} is below contaminant pp {:.4} (policy {:?})",
                self.total_pressure,
                self.contaminant_pp,
                policy
            );
            if policy == PressurePolicy::Clamp {
                self.total_pressure = self.contaminant_pp;
            }
        }

        match target {
            SolveTarget::TotalPressure => {
                self.total_pressure = physics::solve_total_pressure(
                    self.c2h2_flow,
                    self.ar_flow,
                    self.contaminant_pp,
                    self.target_c2h2_pp,
                );
            }
            SolveTarget::C2h2Flow => {
                self.c2h2_flow = physics::solve_c2h2_flow(
                    self.total_pressure,
                    self.contaminant_pp,
                    self.ar_flow,
                    self.target_c2h2_pp,
                );
            }
            SolveTarget::ArFlow => {
                self.ar_flow = physics::solve_ar_flow(
                    self.c2h2_flow,
                    self.total_pressure,
                    self.contaminant_pp,
                    self.target_c2h2_pp,
                );
            }
        }

        self.c2h2_pp = physics::compute_c2h2_pp(
            self.c2h2_flow,
            self.ar_flow,
            self.total_pressure,
            self.contaminant_pp,
        );
        target
    }

    /// 현재 상태를 다음 update의 입력으로 쓸 수 있는 형태로 돌려준다.
    pub fn readings(&self) -> ControlReadings {
        ControlReadings {
            c2h2_flow: self.c2h2_flow,
            ar_flow: self.ar_flow,
            total_pressure: self.total_pressure,
            contaminant_pp: self.contaminant_pp,
            target_c2h2_pp: self.target_c2h2_pp,
            calculated_param: self.calculated_param,
        }
    }
}
