use std::fs;
use std::io::{self, BufRead, Write};

use crate::analysis::{AnalysisReport, AnalysisWorker};
use crate::app::AppError;
use crate::config::Config;
use crate::cvd::{CalculatedParam, PressurePolicy, ProcessState, SolveTarget};
use crate::i18n::{keys, Translator};
use crate::simulator::Session;
use crate::view::controls::{format_flow, format_partial_pressure, format_pressure};
use crate::view::plot::fill_template;
use crate::view::{ControlId, EventKind};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    SetInputs,
    SelectMode,
    ShowState,
    ShowCurve,
    CsvAnalysis,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    main_menu_from(tr, &mut io::stdin().lock())
}

/// 주어진 입력에서 메뉴 선택을 읽는다. 입력이 끝나면 종료로 본다.
pub fn main_menu_from(tr: &Translator, input: &mut dyn BufRead) -> Result<MenuChoice, AppError> {
    println!("\n{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_SET_INPUTS,
        keys::MAIN_MENU_SELECT_MODE,
        keys::MAIN_MENU_SHOW_STATE,
        keys::MAIN_MENU_SHOW_CURVE,
        keys::MAIN_MENU_CSV_ANALYSIS,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = match read_line_from(input, &tr.t(keys::PROMPT_MENU_SELECT)) {
            Err(AppError::InputClosed) => return Ok(MenuChoice::Exit),
            other => other?,
        };
        match sel.trim() {
            "1" => return Ok(MenuChoice::SetInputs),
            "2" => return Ok(MenuChoice::SelectMode),
            "3" => return Ok(MenuChoice::ShowState),
            "4" => return Ok(MenuChoice::ShowCurve),
            "5" => return Ok(MenuChoice::CsvAnalysis),
            "6" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn control_label(tr: &Translator, id: ControlId) -> String {
    let key = match id {
        ControlId::C2h2Flow => keys::CONTROL_C2H2_FLOW,
        ControlId::ArFlow => keys::CONTROL_AR_FLOW,
        ControlId::TotalPressure => keys::CONTROL_TOTAL_PRESSURE,
        ControlId::ContaminantPp => keys::CONTROL_CONTAMINANT_PP,
        ControlId::TargetC2h2Pp => keys::CONTROL_TARGET_C2H2_PP,
        ControlId::C2h2Pp => keys::CONTROL_C2H2_PP,
        ControlId::CalculatedParam => keys::MODE_HEADING,
    };
    tr.t(key)
}

fn control_unit(cfg: &Config, id: ControlId) -> &str {
    match id {
        ControlId::C2h2Flow | ControlId::ArFlow => &cfg.units.flow,
        ControlId::CalculatedParam => "",
        _ => &cfg.units.pressure,
    }
}

/// 입력값 설정 메뉴. 값 하나를 바꿀 때마다 update가 한 번 실행된다.
pub fn handle_set_inputs(
    tr: &Translator,
    cfg: &Config,
    session: &mut Session,
) -> Result<(), AppError> {
    println!("\n{}", tr.t(keys::INPUTS_HEADING));
    println!("{}", tr.t(keys::INPUTS_KEEP_HINT));
    let inputs = ControlId::SLIDERS
        .into_iter()
        .map(|id| (id, EventKind::Input))
        .chain([(ControlId::TargetC2h2Pp, EventKind::Change)]);
    for (id, kind) in inputs {
        let handle = session.controls.handle(id);
        let label = control_label(tr, id);
        let unit = control_unit(cfg, id);
        if !handle.enabled {
            println!(
                "{label}: {} {unit} {}",
                handle.display,
                tr.t(keys::INPUTS_LOCKED)
            );
            continue;
        }
        let prompt = format!("{label} [{} {unit}]: ", handle.display);
        let entered = read_line(&prompt)?;
        if entered.trim().is_empty() {
            continue;
        }
        session.controls.handle_mut(id).raw = entered.trim().to_string();
        session.handle_event(id, kind);
    }
    print_state(tr, cfg, session.state());
    Ok(())
}

/// 계산 대상 선택 메뉴.
pub fn handle_select_mode(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    println!("\n{}", tr.t(keys::MODE_HEADING));
    println!("{}", tr.t(keys::MODE_OPTIONS));
    let sel = read_line(&tr.t(keys::PROMPT_SELECT))?;
    let param = match sel.trim() {
        "1" => CalculatedParam::C2h2Flow,
        "2" => CalculatedParam::ArFlow,
        "3" => CalculatedParam::TotalPressure,
        "4" => CalculatedParam::C2h2PartialPressure,
        _ => {
            println!("{}", tr.t(keys::INVALID_SELECTION));
            return Ok(());
        }
    };
    session.controls.calculated_param.raw = param.as_str().to_string();
    session.handle_event(ControlId::CalculatedParam, EventKind::Change);
    println!(
        "{}",
        fill_template(
            &tr.t(keys::MODE_SELECTED),
            &[("mode", param.as_str().to_string())]
        )
    );
    Ok(())
}

/// 현재 공정 상태를 출력한다. 계산된 값에는 표시를 붙인다.
pub fn print_state(tr: &Translator, cfg: &Config, state: &ProcessState) {
    let solved = state.calculated_param.solve_target();
    let marker = |target: SolveTarget| {
        if solved == target {
            tr.t(keys::STATE_CALCULATED)
        } else {
            String::new()
        }
    };
    println!("\n{}", tr.t(keys::STATE_HEADING));
    println!(
        "{}: {} {}{}",
        tr.t(keys::CONTROL_C2H2_FLOW),
        format_flow(state.c2h2_flow),
        cfg.units.flow,
        marker(SolveTarget::C2h2Flow)
    );
    println!(
        "{}: {} {}{}",
        tr.t(keys::CONTROL_AR_FLOW),
        format_flow(state.ar_flow),
        cfg.units.flow,
        marker(SolveTarget::ArFlow)
    );
    println!(
        "{}: {} {}{}",
        tr.t(keys::CONTROL_TOTAL_PRESSURE),
        format_pressure(state.total_pressure),
        cfg.units.pressure,
        marker(SolveTarget::TotalPressure)
    );
    println!(
        "{}: {} {}",
        tr.t(keys::CONTROL_CONTAMINANT_PP),
        format_partial_pressure(state.contaminant_pp),
        cfg.units.pressure
    );
    println!(
        "{}: {} {}",
        tr.t(keys::STATE_PROCESS_PRESSURE),
        format_pressure(state.process_pressure()),
        cfg.units.pressure
    );
    println!(
        "{}: {} {}",
        tr.t(keys::CONTROL_TARGET_C2H2_PP),
        format_partial_pressure(state.target_c2h2_pp),
        cfg.units.pressure
    );
    println!(
        "{}: {} {}",
        tr.t(keys::CONTROL_C2H2_PP),
        format_partial_pressure(state.c2h2_pp),
        cfg.units.pressure
    );
}

/// 마지막으로 그려진 공정 곡선을 표 형태로 출력한다.
pub fn print_curve(tr: &Translator, cfg: &Config, session: &Session) {
    let plot = &session.plot;
    println!("\n{}", tr.t(keys::CURVE_HEADING));
    println!("{}", plot.title);
    println!(
        "{:>12} | {:>12}",
        format!("Ar [{}]", cfg.units.flow),
        format!("P [{}]", cfg.units.pressure)
    );
    for [ar, p] in &plot.points {
        println!("{:>12} | {:>12}", format_flow(*ar), format_pressure(*p));
    }
    if let Some([ar, p]) = plot.highlight {
        println!(
            "{}: Ar={} {}, P={} {}",
            tr.t(keys::CURVE_CURRENT),
            format_flow(ar),
            cfg.units.flow,
            format_pressure(p),
            cfg.units.pressure
        );
    }
}

/// CSV 분석 메뉴. 별도 스레드에서 분석하고 진행률을 출력한다.
pub fn handle_csv_analysis(tr: &Translator) -> Result<(), AppError> {
    println!("\n{}", tr.t(keys::ANALYSIS_HEADING));
    let path = read_line(&tr.t(keys::ANALYSIS_PROMPT_PATH))?;
    run_csv_analysis(tr, path.trim())
}

/// 파일을 읽어 분석 작업 스레드에 넘기고 결과를 출력한다.
pub fn run_csv_analysis(tr: &Translator, path: &str) -> Result<(), AppError> {
    let csv_data = fs::read_to_string(path)?;
    let worker = AnalysisWorker::spawn();
    let progress_label = tr.t(keys::ANALYSIS_PROGRESS);
    let report = worker.run_blocking(csv_data, &mut |p| {
        println!("{progress_label}: {:>3.0}%", p * 100.0);
    })?;
    print_report(tr, &report);
    Ok(())
}

fn print_report(tr: &Translator, report: &AnalysisReport) {
    println!("{}: {}", tr.t(keys::ANALYSIS_ROWS), report.row_count);
    println!("{}", report.headers.join(" | "));
    for row in &report.preview {
        println!("{}", row.join(" | "));
    }
}

/// 설정 메뉴를 처리한다. 시뮬레이터를 다시 만들어야 하면 true.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("\n{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{}",
        fill_template(
            &tr.t(keys::SETTINGS_CURRENT_POLICY),
            &[("policy", format!("{:?}", cfg.pressure_policy))]
        )
    );
    println!("{}", tr.t(keys::SETTINGS_POLICY_OPTIONS));
    let sel = read_line(&tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    if sel.trim().is_empty() {
        return Ok(false);
    }
    let policy = match sel.trim() {
        "1" => PressurePolicy::Permissive,
        "2" => PressurePolicy::Clamp,
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(false);
        }
    };
    let changed = policy != cfg.pressure_policy;
    cfg.pressure_policy = policy;
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(changed)
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    read_line_from(&mut io::stdin().lock(), prompt)
}

fn read_line_from(input: &mut dyn BufRead, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        log::info!("input closed");
        return Err(AppError::InputClosed);
    }
    Ok(buf)
}
