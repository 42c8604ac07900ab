//! 위젯 이벤트 → 타입이 있는 트리거 변환 테이블.

use super::controls::ControlId;

/// 위젯이 내보내는 이벤트 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// 슬라이더 드래그 중(on_input)
    Input,
    /// 텍스트 입력/라디오 선택 확정(on_change)
    Change,
}

/// update 한 번을 일으킨 원인.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// 프로그램 시작 시 최초 계산
    Startup,
    /// 슬라이더 이동. 어떤 슬라이더인지 함께 전달된다.
    SliderMoved(ControlId),
    /// 목표 분압 텍스트 변경
    TargetEdited,
    /// 계산 대상 라디오 변경
    ModeSelected,
}

const DISPATCH_TABLE: [(ControlId, EventKind, Trigger); 6] = [
    (ControlId::C2h2Flow, EventKind::Input, Trigger::SliderMoved(ControlId::C2h2Flow)),
    (ControlId::ArFlow, EventKind::Input, Trigger::SliderMoved(ControlId::ArFlow)),
    (
        ControlId::TotalPressure,
        EventKind::Input,
        Trigger::SliderMoved(ControlId::TotalPressure),
    ),
    (
        ControlId::ContaminantPp,
        EventKind::Input,
        Trigger::SliderMoved(ControlId::ContaminantPp),
    ),
    (ControlId::TargetC2h2Pp, EventKind::Change, Trigger::TargetEdited),
    (ControlId::CalculatedParam, EventKind::Change, Trigger::ModeSelected),
];

/// 컨트롤 이벤트에 대응하는 트리거를 찾는다. 등록되지 않은 조합이면 None.
pub fn dispatch(id: ControlId, kind: EventKind) -> Option<Trigger> {
    DISPATCH_TABLE
        .iter()
        .find(|(c, k, _)| *c == id && *k == kind)
        .map(|(_, _, t)| *t)
}
