use cvd_process_simulator::cvd::{
    CalculatedParam, ControlReadings, PressurePolicy, ProcessState, SolveTarget,
};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "actual={actual} expected={expected} tol={tol}"
    );
}

fn readings(param: CalculatedParam) -> ControlReadings {
    ControlReadings {
        c2h2_flow: 5.0,
        ar_flow: 45.0,
        total_pressure: 1.0,
        contaminant_pp: 0.01,
        target_c2h2_pp: 0.25,
        calculated_param: param,
    }
}

#[test]
fn solves_c2h2_flow_for_target() {
    let state = ProcessState::new(&readings(CalculatedParam::C2h2Flow), PressurePolicy::Permissive);
    assert_close(state.process_pressure(), 0.99, 1e-12);
    assert_close(state.c2h2_flow, 0.25 * 45.0 / (0.99 - 0.25), 1e-9);
    assert_close(state.c2h2_pp, 0.25, 1e-9);
    assert_eq!(state.ar_flow, 45.0);
    assert_eq!(state.total_pressure, 1.0);
}

#[test]
fn ar_flow_zero_without_acetylene() {
    let mut input = readings(CalculatedParam::ArFlow);
    input.c2h2_flow = 0.0;
    input.ar_flow = 50.0;
    let state = ProcessState::new(&input, PressurePolicy::Permissive);
    assert_eq!(state.ar_flow, 0.0);
    assert_eq!(state.c2h2_pp, 0.0);
}

#[test]
fn total_pressure_falls_to_contaminant_floor() {
    let mut input = readings(CalculatedParam::TotalPressure);
    input.c2h2_flow = 0.0;
    input.contaminant_pp = 0.02;
    let state = ProcessState::new(&input, PressurePolicy::Permissive);
    assert_eq!(state.total_pressure, 0.02);
}

#[test]
fn partial_pressure_mode_solves_total_pressure() {
    assert_eq!(
        CalculatedParam::C2h2PartialPressure.solve_target(),
        SolveTarget::TotalPressure
    );
    let alias = ProcessState::new(
        &readings(CalculatedParam::C2h2PartialPressure),
        PressurePolicy::Permissive,
    );
    let direct = ProcessState::new(&readings(CalculatedParam::TotalPressure), PressurePolicy::Permissive);
    assert_eq!(alias.total_pressure, direct.total_pressure);
    assert_close(alias.total_pressure, 2.51, 1e-12);
    assert_close(alias.c2h2_pp, 0.25, 1e-12);
    assert_eq!(alias.calculated_param, CalculatedParam::C2h2PartialPressure);
    assert_eq!(alias.c2h2_flow, 5.0);
    assert_eq!(alias.ar_flow, 45.0);
}

#[test]
fn update_returns_solved_unknown() {
    let mut state = ProcessState::new(&readings(CalculatedParam::TotalPressure), PressurePolicy::Permissive);
    for (param, target) in [
        (CalculatedParam::C2h2Flow, SolveTarget::C2h2Flow),
        (CalculatedParam::ArFlow, SolveTarget::ArFlow),
        (CalculatedParam::TotalPressure, SolveTarget::TotalPressure),
        (CalculatedParam::C2h2PartialPressure, SolveTarget::TotalPressure),
    ] {
        assert_eq!(state.update(&readings(param), PressurePolicy::Permissive), target);
    }
}

#[test]
fn repeated_update_is_idempotent() {
    let mut state = ProcessState::new(&readings(CalculatedParam::ArFlow), PressurePolicy::Permissive);
    let first = state;
    let again = state.readings();
    // 계산된 값을 다시 입력으로 넣어도 결과가 같아야 한다.
    state.update(&again, PressurePolicy::Permissive);
    assert_close(state.ar_flow, first.ar_flow, 1e-9);
    assert_close(state.c2h2_pp, first.c2h2_pp, 1e-9);
}

#[test]
fn low_total_pressure_kept_when_permissive() {
    let mut input = readings(CalculatedParam::C2h2Flow);
    input.total_pressure = 0.005;
    let state = ProcessState::new(&input, PressurePolicy::Permissive);
    assert_eq!(state.total_pressure, 0.005);
    assert_eq!(state.c2h2_flow, 0.0);
    assert_eq!(state.c2h2_pp, 0.0);
}

#[test]
fn low_total_pressure_clamped_when_requested() {
    let mut input = readings(CalculatedParam::ArFlow);
    input.total_pressure = 0.005;
    let state = ProcessState::new(&input, PressurePolicy::Clamp);
    assert_eq!(state.total_pressure, 0.01);
    assert_eq!(state.ar_flow, 0.0);
}

#[test]
fn calculated_param_parses_wire_names() {
    for param in CalculatedParam::ALL {
        assert_eq!(param.as_str().parse::<CalculatedParam>(), Ok(param));
    }
    assert_eq!(" C2H2_PP ".parse::<CalculatedParam>(), Ok(CalculatedParam::C2h2PartialPressure));
    assert!("pressure".parse::<CalculatedParam>().is_err());
}
