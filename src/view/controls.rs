//! 입력 컨트롤 추상화와 상태 ↔ 컨트롤 변환.
//!
//! 위젯 라이브러리와 무관하게 값 읽기/쓰기, 활성/비활성만 노출하는 좁은 인터페이스를 둔다.

use crate::cvd::{CalculatedParam, ControlReadings, ProcessState, SolveTarget};

/// 빈칸이거나 숫자가 아닌 목표 분압 입력을 대체하는 기본값.
pub const DEFAULT_TARGET_C2H2_PP: f64 = 0.25;

/// 화면의 각 컨트롤 식별자.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    C2h2Flow,
    ArFlow,
    TotalPressure,
    ContaminantPp,
    TargetC2h2Pp,
    /// 계산된 아세틸렌 분압 표시(읽기 전용)
    C2h2Pp,
    /// 계산 대상 라디오 그룹
    CalculatedParam,
}

impl ControlId {
    /// 슬라이더 컨트롤 목록.
    pub const SLIDERS: [ControlId; 4] = [
        ControlId::C2h2Flow,
        ControlId::ArFlow,
        ControlId::TotalPressure,
        ControlId::ContaminantPp,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ControlId::C2h2Flow => "c2h2_flow",
            ControlId::ArFlow => "ar_flow",
            ControlId::TotalPressure => "total_pressure",
            ControlId::ContaminantPp => "contaminant_pp",
            ControlId::TargetC2h2Pp => "target_c2h2_pp",
            ControlId::C2h2Pp => "c2h2_pp",
            ControlId::CalculatedParam => "calculated_param",
        }
    }
}

/// 위젯 구현체가 제공해야 하는 최소 인터페이스.
pub trait ControlAdapter {
    /// 컨트롤의 원시 값(문자열).
    fn value(&self, id: ControlId) -> String;
    /// 원시 값을 덮어쓴다. 계산된 값을 되돌려 줄 때만 쓴다.
    fn set_value(&mut self, id: ControlId, value: String);
    /// 사용자에게 보이는 표시 문자열을 쓴다.
    fn set_display(&mut self, id: ControlId, text: String);
    fn set_enabled(&mut self, id: ControlId, enabled: bool);
    /// 슬라이더 범위 `(min, max)`.
    fn bounds(&self, id: ControlId) -> (f64, f64);
}

/// 컨트롤 하나의 상태.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlHandle {
    pub raw: String,
    pub display: String,
    pub enabled: bool,
    pub min: f64,
    pub max: f64,
}

impl ControlHandle {
    pub fn slider(value: f64, min: f64, max: f64) -> Self {
        Self {
            raw: value.to_string(),
            display: String::new(),
            enabled: true,
            min,
            max,
        }
    }

    pub fn text(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            display: String::new(),
            enabled: true,
            min: 0.0,
            max: 0.0,
        }
    }

    /// 원시 값을 숫자로 해석한다. 유한한 값이 아니면 None.
    pub fn number(&self) -> Option<f64> {
        parse_number(&self.raw)
    }
}

/// 슬라이더 범위 묶음.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRanges {
    pub c2h2_flow: (f64, f64),
    pub ar_flow: (f64, f64),
    pub total_pressure: (f64, f64),
    pub contaminant_pp: (f64, f64),
}

/// 이름 붙은 컨트롤 핸들 묶음. GUI와 CLI가 같은 모델을 공유한다.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPanel {
    pub c2h2_flow: ControlHandle,
    pub ar_flow: ControlHandle,
    pub total_pressure: ControlHandle,
    pub contaminant_pp: ControlHandle,
    pub target_c2h2_pp: ControlHandle,
    pub c2h2_pp: ControlHandle,
    pub calculated_param: ControlHandle,
}

impl ControlPanel {
    pub fn new(initial: &ControlReadings, ranges: &SliderRanges) -> Self {
        let slider = |v: f64, r: (f64, f64)| ControlHandle::slider(v, r.0, r.1);
        let mut c2h2_pp = ControlHandle::text("0");
        c2h2_pp.enabled = false;
        Self {
            c2h2_flow: slider(initial.c2h2_flow, ranges.c2h2_flow),
            ar_flow: slider(initial.ar_flow, ranges.ar_flow),
            total_pressure: slider(initial.total_pressure, ranges.total_pressure),
            contaminant_pp: slider(initial.contaminant_pp, ranges.contaminant_pp),
            target_c2h2_pp: ControlHandle::text(initial.target_c2h2_pp.to_string()),
            c2h2_pp,
            calculated_param: ControlHandle::text(initial.calculated_param.as_str()),
        }
    }

    pub fn handle(&self, id: ControlId) -> &ControlHandle {
        match id {
            ControlId::C2h2Flow => &self.c2h2_flow,
            ControlId::ArFlow => &self.ar_flow,
            ControlId::TotalPressure => &self.total_pressure,
            ControlId::ContaminantPp => &self.contaminant_pp,
            ControlId::TargetC2h2Pp => &self.target_c2h2_pp,
            ControlId::C2h2Pp => &self.c2h2_pp,
            ControlId::CalculatedParam => &self.calculated_param,
        }
    }

    pub fn handle_mut(&mut self, id: ControlId) -> &mut ControlHandle {
        match id {
            ControlId::C2h2Flow => &mut self.c2h2_flow,
            ControlId::ArFlow => &mut self.ar_flow,
            ControlId::TotalPressure => &mut self.total_pressure,
            ControlId::ContaminantPp => &mut self.contaminant_pp,
            ControlId::TargetC2h2Pp => &mut self.target_c2h2_pp,
            ControlId::C2h2Pp => &mut self.c2h2_pp,
            ControlId::CalculatedParam => &mut self.calculated_param,
        }
    }
}

impl ControlAdapter for ControlPanel {
    fn value(&self, id: ControlId) -> String {
        self.handle(id).raw.clone()
    }

    fn set_value(&mut self, id: ControlId, value: String) {
        self.handle_mut(id).raw = value;
    }

    fn set_display(&mut self, id: ControlId, text: String) {
        self.handle_mut(id).display = text;
    }

    fn set_enabled(&mut self, id: ControlId, enabled: bool) {
        self.handle_mut(id).enabled = enabled;
    }

    fn bounds(&self, id: ControlId) -> (f64, f64) {
        let h = self.handle(id);
        (h.min, h.max)
    }
}

/// 숫자 문자열을 해석한다. 음수는 0으로 올리고 NaN/무한대는 거부한다.
pub fn parse_number(raw: &str) -> Option<f64> {
    let v = raw.trim().parse::<f64>().ok()?;
    if v.is_finite() {
        Some(v.max(0.0))
    } else {
        None
    }
}

/// 모든 컨트롤을 읽어 update 입력을 만든다.
///
/// 슬라이더와 라디오 값이 해석되지 않으면 직전 상태 값을 유지하고,
/// 목표 분압만 [`DEFAULT_TARGET_C2H2_PP`]로 대체한다.
pub fn read_controls<C: ControlAdapter + ?Sized>(
    controls: &C,
    previous: &ProcessState,
) -> ControlReadings {
    let number_or = |id: ControlId, fallback: f64| parse_number(&controls.value(id)).unwrap_or(fallback);
    let calculated_param = controls
        .value(ControlId::CalculatedParam)
        .parse::<CalculatedParam>()
        .unwrap_or_else(|e| {
            log::warn!("{e}; keeping {}", previous.calculated_param);
            previous.calculated_param
        });
    ControlReadings {
        c2h2_flow: number_or(ControlId::C2h2Flow, previous.c2h2_flow),
        ar_flow: number_or(ControlId::ArFlow, previous.ar_flow),
        total_pressure: number_or(ControlId::TotalPressure, previous.total_pressure),
        contaminant_pp: number_or(ControlId::ContaminantPp, previous.contaminant_pp),
        target_c2h2_pp: number_or(ControlId::TargetC2h2Pp, DEFAULT_TARGET_C2H2_PP),
        calculated_param,
    }
}

pub fn format_flow(v: f64) -> String {
    format!("{v:.1}")
}

pub fn format_pressure(v: f64) -> String {
    format!("{v:.2}")
}

pub fn format_partial_pressure(v: f64) -> String {
    format!("{v:.3}")
}

/// 계산된 값이 쓰이는 컨트롤.
pub fn solved_control(target: SolveTarget) -> ControlId {
    match target {
        SolveTarget::C2h2Flow => ControlId::C2h2Flow,
        SolveTarget::ArFlow => ControlId::ArFlow,
        SolveTarget::TotalPressure => ControlId::TotalPressure,
    }
}

/// 상태를 컨트롤에 반영한다.
///
/// 계산된 컨트롤에는 정밀한 원시 값을 되돌려 주고, 나머지는 표시 문자열만 갱신한다.
/// 입력 컨트롤의 원시 값은 건드리지 않으므로 반복 update가 누적 오차를 만들지 않는다.
pub fn write_controls<C: ControlAdapter + ?Sized>(controls: &mut C, state: &ProcessState) {
    let target = state.calculated_param.solve_target();
    let solved = solved_control(target);
    let solved_value = match target {
        SolveTarget::C2h2Flow => state.c2h2_flow,
        SolveTarget::ArFlow => state.ar_flow,
        SolveTarget::TotalPressure => state.total_pressure,
    };
    controls.set_value(solved, solved_value.to_string());
    controls.set_value(ControlId::C2h2Pp, state.c2h2_pp.to_string());

    controls.set_display(ControlId::C2h2Flow, format_flow(state.c2h2_flow));
    controls.set_display(ControlId::ArFlow, format_flow(state.ar_flow));
    controls.set_display(ControlId::TotalPressure, format_pressure(state.total_pressure));
    controls.set_display(
        ControlId::ContaminantPp,
        format_partial_pressure(state.contaminant_pp),
    );
    controls.set_display(
        ControlId::TargetC2h2Pp,
        format_partial_pressure(state.target_c2h2_pp),
    );
    controls.set_display(ControlId::C2h2Pp, format_partial_pressure(state.c2h2_pp));
    controls.set_display(
        ControlId::CalculatedParam,
        state.calculated_param.as_str().to_string(),
    );

    let param = state.calculated_param;
    controls.set_enabled(ControlId::C2h2Flow, param != CalculatedParam::C2h2Flow);
    controls.set_enabled(ControlId::ArFlow, param != CalculatedParam::ArFlow);
    controls.set_enabled(
        ControlId::TotalPressure,
        !matches!(
            param,
            CalculatedParam::TotalPressure | CalculatedParam::C2h2PartialPressure
        ),
    );
}
