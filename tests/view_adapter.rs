use cvd_process_simulator::cvd::{
    CalculatedParam, ControlReadings, CurveProjector, PressurePolicy, ProcessState,
};
use cvd_process_simulator::simulator::{Session, SimulatorSettings};
use cvd_process_simulator::view::controls::{format_flow, format_partial_pressure, format_pressure};
use cvd_process_simulator::view::{
    dispatch, read_controls, ControlAdapter, ControlId, EventKind, SliderRanges, Trigger,
    DEFAULT_TARGET_C2H2_PP,
};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "actual={actual} expected={expected} tol={tol}"
    );
}

fn ranges() -> SliderRanges {
    SliderRanges {
        c2h2_flow: (0.0, 100.0),
        ar_flow: (0.0, 200.0),
        total_pressure: (0.0, 10.0),
        contaminant_pp: (0.0, 0.5),
    }
}

fn session(param: CalculatedParam) -> Session {
    let initial = ControlReadings {
        calculated_param: param,
        ..ControlReadings::default()
    };
    Session::new(&initial, &ranges(), SimulatorSettings::default())
}

#[test]
fn display_precision_per_quantity() {
    assert_eq!(format_flow(15.20270), "15.2");
    assert_eq!(format_pressure(2.5149), "2.51");
    assert_eq!(format_partial_pressure(0.24999), "0.250");
}

#[test]
fn startup_renders_state_and_curve() {
    let s = session(CalculatedParam::C2h2PartialPressure);
    assert_eq!(s.controls.total_pressure.display, "2.51");
    assert_eq!(s.controls.c2h2_pp.display, "0.250");
    assert_eq!(s.controls.c2h2_flow.display, "5.0");
    assert_eq!(s.plot.points.len(), 50);
    assert_eq!(s.plot.revision, 1);
    assert_eq!(s.plot.highlight, Some([45.0, s.state().total_pressure]));
    assert_eq!(s.plot.title, "Total pressure for C2H2 PP = 0.250 Torr");
}

#[test]
fn enabled_flags_follow_calculated_param() {
    let cases = [
        (CalculatedParam::C2h2Flow, [false, true, true]),
        (CalculatedParam::ArFlow, [true, false, true]),
        (CalculatedParam::TotalPressure, [true, true, false]),
        (CalculatedParam::C2h2PartialPressure, [true, true, false]),
    ];
    for (param, [c2h2, ar, total]) in cases {
        let s = session(param);
        assert_eq!(s.controls.c2h2_flow.enabled, c2h2, "{param}");
        assert_eq!(s.controls.ar_flow.enabled, ar, "{param}");
        assert_eq!(s.controls.total_pressure.enabled, total, "{param}");
        assert!(s.controls.contaminant_pp.enabled);
        assert!(s.controls.target_c2h2_pp.enabled);
        assert!(!s.controls.c2h2_pp.enabled);
    }
}

#[test]
fn mode_change_through_radio_event() {
    let mut s = session(CalculatedParam::C2h2PartialPressure);
    s.controls.calculated_param.raw = "c2h2_flow".into();
    s.controls.total_pressure.raw = "1.0".into();
    s.handle_event(ControlId::CalculatedParam, EventKind::Change);
    assert_eq!(s.state().calculated_param, CalculatedParam::C2h2Flow);
    assert_close(s.state().c2h2_flow, 15.2027, 1e-4);
    assert_eq!(s.controls.c2h2_flow.display, "15.2");
    assert!(!s.controls.c2h2_flow.enabled);
    assert!(s.controls.total_pressure.enabled);
}

#[test]
fn unparsable_target_uses_default() {
    let mut s = session(CalculatedParam::TotalPressure);
    s.controls.target_c2h2_pp.raw = "abc".into();
    s.handle_event(ControlId::TargetC2h2Pp, EventKind::Change);
    assert_eq!(s.state().target_c2h2_pp, DEFAULT_TARGET_C2H2_PP);

    s.controls.target_c2h2_pp.raw = "".into();
    s.handle_event(ControlId::TargetC2h2Pp, EventKind::Change);
    assert_eq!(s.state().target_c2h2_pp, 0.25);
}

#[test]
fn unparsable_slider_keeps_previous_value() {
    let s = session(CalculatedParam::TotalPressure);
    let mut controls = s.controls.clone();
    controls.set_value(ControlId::ArFlow, "nan".into());
    controls.set_value(ControlId::C2h2Flow, "-3".into());
    controls.set_value(ControlId::CalculatedParam, "bogus".into());
    let r = read_controls(&controls, s.state());
    assert_eq!(r.ar_flow, s.state().ar_flow);
    assert_eq!(r.c2h2_flow, 0.0);
    assert_eq!(r.calculated_param, CalculatedParam::TotalPressure);
}

#[test]
fn repeated_events_do_not_drift() {
    let mut s = session(CalculatedParam::ArFlow);
    let first = *s.state();
    let raw_c2h2 = s.controls.c2h2_flow.raw.clone();
    for _ in 0..20 {
        s.handle_event(ControlId::ContaminantPp, EventKind::Input);
    }
    assert_eq!(*s.state(), first);
    assert_eq!(s.controls.c2h2_flow.raw, raw_c2h2);
    assert_eq!(s.plot.revision, 21);
}

#[test]
fn dispatch_table_routes_events() {
    for id in ControlId::SLIDERS {
        assert_eq!(dispatch(id, EventKind::Input), Some(Trigger::SliderMoved(id)));
        assert_eq!(dispatch(id, EventKind::Change), None);
    }
    assert_eq!(
        dispatch(ControlId::TargetC2h2Pp, EventKind::Change),
        Some(Trigger::TargetEdited)
    );
    assert_eq!(
        dispatch(ControlId::CalculatedParam, EventKind::Change),
        Some(Trigger::ModeSelected)
    );
    assert_eq!(dispatch(ControlId::C2h2Pp, EventKind::Change), None);
}

#[test]
fn unregistered_event_does_not_update() {
    let mut s = session(CalculatedParam::TotalPressure);
    assert_eq!(s.handle_event(ControlId::C2h2Pp, EventKind::Input), None);
    assert_eq!(s.plot.revision, 1);
}

#[test]
fn curve_sweeps_ar_slider_range_from_one() {
    let state = ProcessState::new(&ControlReadings::default(), PressurePolicy::Permissive);
    let curve = CurveProjector::default().project(&state, 0.0, 200.0);
    assert_eq!(curve.sweep.range(), (1.0, 200.0));
    assert_eq!(curve.sweep.len(), 50);

    let points: Vec<_> = curve.sweep.clone().collect();
    assert_eq!(points.first().map(|p| p.ar_flow), Some(1.0));
    assert_eq!(points.last().map(|p| p.ar_flow), Some(200.0));
    // 0.25 * (5 + 1) / 5 + 0.01
    assert_close(points[0].total_pressure, 0.31, 1e-12);
    for w in points.windows(2) {
        assert!(w[1].total_pressure > w[0].total_pressure);
    }

    // 복제본은 처음부터 다시 순회한다.
    let again: Vec<_> = curve.sweep.clone().collect();
    assert_eq!(points, again);
    assert_eq!(curve.highlight.ar_flow, 45.0);
}

#[test]
fn curve_uses_target_regardless_of_mode() {
    let initial = ControlReadings {
        calculated_param: CalculatedParam::C2h2Flow,
        ..ControlReadings::default()
    };
    let state = ProcessState::new(&initial, PressurePolicy::Permissive);
    let curve = CurveProjector::new(3).project(&state, 10.0, 20.0);
    let pts: Vec<_> = curve.sweep.map(|p| p.as_array()).collect();
    assert_eq!(pts.len(), 3);
    assert_eq!(pts[1][0], 15.0);
    let expected = 0.25 * (state.c2h2_flow + 15.0) / state.c2h2_flow + 0.01;
    assert_close(pts[1][1], expected, 1e-12);
}

#[test]
fn curve_never_sweeps_backwards() {
    let state = ProcessState::new(&ControlReadings::default(), PressurePolicy::Permissive);
    let curve = CurveProjector::new(5).project(&state, 0.0, 0.5);
    assert_eq!(curve.sweep.range(), (1.0, 1.0));
    assert!(curve.sweep.map(|p| p.ar_flow).all(|ar| ar == 1.0));
}
