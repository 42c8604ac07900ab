use clap::{Parser, Subcommand};
use cvd_process_simulator::cvd::{CalculatedParam, ControlReadings};
use cvd_process_simulator::{app, config, i18n, ui_cli};

/// CVD 공정 시뮬레이터 CLI.
#[derive(Debug, Parser)]
#[command(name = "cvd_process_simulator_cli", version, about)]
struct Cli {
    /// 설정 파일 경로
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE)]
    config: String,
    /// 언어 (auto, ko, en-us ...)
    #[arg(short = 'L', long, default_value = "auto")]
    lang: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 대화형 메뉴 (기본값)
    Interactive,
    /// 입력값으로 한 번 계산해 상태를 출력한다
    Solve(SolveArgs),
    /// 공정 곡선을 출력한다
    Curve(SolveArgs),
    /// CSV 파일을 분석한다
    Analyze { file: String },
}

/// 설정 파일의 초기값을 덮어쓰는 입력.
#[derive(Debug, clap::Args)]
struct SolveArgs {
    #[arg(long)]
    c2h2_flow: Option<f64>,
    #[arg(long)]
    ar_flow: Option<f64>,
    #[arg(long)]
    total_pressure: Option<f64>,
    #[arg(long)]
    contaminant_pp: Option<f64>,
    #[arg(long)]
    target: Option<f64>,
    /// c2h2_flow, ar_flow, total_pressure, c2h2_pp
    #[arg(long)]
    mode: Option<CalculatedParam>,
}

impl SolveArgs {
    fn apply(&self, base: &ControlReadings) -> ControlReadings {
        ControlReadings {
            c2h2_flow: self.c2h2_flow.unwrap_or(base.c2h2_flow),
            ar_flow: self.ar_flow.unwrap_or(base.ar_flow),
            total_pressure: self.total_pressure.unwrap_or(base.total_pressure),
            contaminant_pp: self.contaminant_pp.unwrap_or(base.contaminant_pp),
            target_c2h2_pp: self.target.unwrap_or(base.target_c2h2_pp),
            calculated_param: self.mode.unwrap_or(base.calculated_param),
        }
    }
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    if let Err(err) = try_run(cli) {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = config::load_or_default_at(&cli.config)?;
    let lang_code = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang_code, cfg.language_pack_dir.as_deref());
    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => app::run(&mut cfg, &tr)?,
        Command::Solve(args) => {
            let session = app::build_session(&cfg, &tr, &args.apply(&cfg.initial));
            ui_cli::print_state(&tr, &cfg, session.state());
        }
        Command::Curve(args) => {
            let session = app::build_session(&cfg, &tr, &args.apply(&cfg.initial));
            ui_cli::print_curve(&tr, &cfg, &session);
        }
        Command::Analyze { file } => ui_cli::run_csv_analysis(&tr, &file)?,
    }
    Ok(())
}
