//! 읽기 → 풀기 → 재계산 → 게시로 이어지는 update 사이클.

use crate::cvd::{
    ControlReadings, CurveProjector, PressurePolicy, ProcessCurve, ProcessState, SolveTarget,
};
use crate::view::controls::{format_partial_pressure, read_controls, write_controls};
use crate::view::plot::fill_template;
use crate::view::{
    dispatch, ControlAdapter, ControlId, ControlPanel, CurveRenderer, EventKind, PlotModel,
    SliderRanges, Trigger,
};

/// 곡선 제목 기본 템플릿. `{target}`, `{unit}`이 치환된다.
pub const DEFAULT_TITLE_TEMPLATE: &str = "Total pressure for C2H2 PP = {target} {unit}";

/// 시뮬레이터 동작 옵션.
#[derive(Debug, Clone)]
pub struct SimulatorSettings {
    pub policy: PressurePolicy,
    pub curve_samples: usize,
    pub title_template: String,
    pub pressure_unit: String,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            policy: PressurePolicy::default(),
            curve_samples: crate::cvd::curve::DEFAULT_CURVE_SAMPLES,
            title_template: DEFAULT_TITLE_TEMPLATE.to_string(),
            pressure_unit: "Torr".to_string(),
        }
    }
}

/// 공정 상태를 소유하고 컨트롤/그래프와 연결한다. 프로그램 시작 시 한 번 만든다.
#[derive(Debug, Clone)]
pub struct Simulator {
    state: ProcessState,
    projector: CurveProjector,
    settings: SimulatorSettings,
}

impl Simulator {
    pub fn new(initial: &ControlReadings, settings: SimulatorSettings) -> Self {
        Self {
            state: ProcessState::new(initial, settings.policy),
            projector: CurveProjector::new(settings.curve_samples),
            settings,
        }
    }

    pub fn state(&self) -> &ProcessState {
        &self.state
    }

    pub fn settings(&self) -> &SimulatorSettings {
        &self.settings
    }

    /// 위젯 이벤트를 트리거로 바꿔 update를 실행한다. 등록되지 않은 이벤트는 무시한다.
    pub fn handle_event<C, R>(
        &mut self,
        id: ControlId,
        kind: EventKind,
        controls: &mut C,
        renderer: &mut R,
    ) -> Option<SolveTarget>
    where
        C: ControlAdapter + ?Sized,
        R: CurveRenderer + ?Sized,
    {
        let trigger = dispatch(id, kind)?;
        Some(self.update(trigger, controls, renderer))
    }

    /// 컨트롤을 모두 다시 읽고 선택된 미지수를 풀어 컨트롤과 그래프에 반영한다.
    pub fn update<C, R>(&mut self, trigger: Trigger, controls: &mut C, renderer: &mut R) -> SolveTarget
    where
        C: ControlAdapter + ?Sized,
        R: CurveRenderer + ?Sized,
    {
        let readings = read_controls(controls, &self.state);
        let solved = self.state.update(&readings, self.settings.policy);
        log::debug!(
            "update {:?}: mode={} solved={:?} c2h2_pp={:.6}",
            trigger,
            self.state.calculated_param,
            solved,
            self.state.c2h2_pp
        );
        write_controls(controls, &self.state);

        let (ar_min, ar_max) = controls.bounds(ControlId::ArFlow);
        let curve = self.curve(ar_min, ar_max);
        let title = self.curve_title();
        renderer.render_curve(curve.sweep, curve.highlight, &title);
        solved
    }

    /// 현재 상태 기준 공정 곡선.
    pub fn curve(&self, ar_min: f64, ar_max: f64) -> ProcessCurve {
        self.projector.project(&self.state, ar_min, ar_max)
    }

    pub fn curve_title(&self) -> String {
        fill_template(
            &self.settings.title_template,
            &[
                ("target", format_partial_pressure(self.state.target_c2h2_pp)),
                ("unit", self.settings.pressure_unit.clone()),
            ],
        )
    }
}

/// 시뮬레이터와 그에 연결된 컨트롤/그래프 모델 한 벌. GUI와 CLI가 각자 하나씩 소유한다.
#[derive(Debug, Clone)]
pub struct Session {
    pub simulator: Simulator,
    pub controls: ControlPanel,
    pub plot: PlotModel,
}

impl Session {
    /// 초기값으로 컨트롤을 만들고 최초 update를 실행한다.
    pub fn new(initial: &ControlReadings, ranges: &SliderRanges, settings: SimulatorSettings) -> Self {
        let mut session = Self {
            simulator: Simulator::new(initial, settings),
            controls: ControlPanel::new(initial, ranges),
            plot: PlotModel::default(),
        };
        session.refresh(Trigger::Startup);
        session
    }

    pub fn state(&self) -> &ProcessState {
        self.simulator.state()
    }

    /// 위젯 이벤트 하나를 처리한다.
    pub fn handle_event(&mut self, id: ControlId, kind: EventKind) -> Option<SolveTarget> {
        self.simulator
            .handle_event(id, kind, &mut self.controls, &mut self.plot)
    }

    pub fn refresh(&mut self, trigger: Trigger) -> SolveTarget {
        self.simulator
            .update(trigger, &mut self.controls, &mut self.plot)
    }
}
