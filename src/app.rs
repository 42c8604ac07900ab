use crate::analysis::AnalysisError;
use crate::config::{Config, ConfigError};
use crate::cvd::ControlReadings;
use crate::i18n::{self, Translator};
use crate::simulator::Session;
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 표준 입력이 닫힘
    #[error("입력이 닫혔습니다.")]
    InputClosed,
    /// CSV 분석 오류
    #[error("분석 오류: {0}")]
    Analysis(#[from] AnalysisError),
}

/// 설정값과 언어에 맞춘 시뮬레이터 세션을 만든다.
pub fn build_session(config: &Config, tr: &Translator, initial: &ControlReadings) -> Session {
    let settings = config.simulator_settings(&tr.t(i18n::keys::CURVE_TITLE_TEMPLATE));
    Session::new(initial, &config.bounds.slider_ranges(), settings)
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &mut Config, tr: &Translator) -> Result<(), AppError> {
    let mut session = build_session(config, tr, &config.initial);
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::SetInputs => ui_cli::handle_set_inputs(tr, config, &mut session)?,
            MenuChoice::SelectMode => ui_cli::handle_select_mode(tr, &mut session)?,
            MenuChoice::ShowState => ui_cli::print_state(tr, config, session.state()),
            MenuChoice::ShowCurve => ui_cli::print_curve(tr, config, &session),
            MenuChoice::CsvAnalysis => ui_cli::handle_csv_analysis(tr)?,
            MenuChoice::Settings => {
                if ui_cli::handle_settings(tr, config)? {
                    let current = session.state().readings();
                    session = build_session(config, tr, &current);
                }
                config.save()?;
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
