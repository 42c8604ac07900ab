#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use cvd_process_simulator::{
    analysis::{AnalysisReport, AnalysisRequest, AnalysisResponse, AnalysisWorker},
    app,
    config,
    cvd::{CalculatedParam, PressurePolicy},
    i18n,
    simulator::Session,
    view::{ControlId, EventKind},
};
use eframe::{egui, App, Frame};
use egui_plot::{Corner, Legend, Line, MarkerShape, Plot, Points};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path};

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en-us/ko-kr/ko)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(1100.0, 720.0))
        .with_transparent(true);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_else(|e| {
        log::warn!("config load failed, using defaults: {e}");
        config::Config::default()
    });
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    eframe::run_native(
        "CVD Process Simulator",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                log::warn!("font setup: {e}");
            }
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글을 표시하기 위해 폰트를 찾아 적용한다.
/// 1) assets/fonts/malgun.ttf
/// 2) Windows 시스템 폰트
/// 3) 리눅스 Noto CJK
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let asset_path = Path::new("assets/fonts/malgun.ttf");
    if asset_path.exists() {
        let bytes = fs::read(asset_path).map_err(|e| format!("Failed to read font file: {e}"))?;
        apply_font_bytes(ctx, bytes, "korean_font");
        return Ok(());
    }

    let mut candidates = Vec::new();
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for name in ["malgun.ttf", "gulim.ttc", "batang.ttc"] {
            candidates.push(fonts.join(name));
        }
    }
    candidates.push("/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc".into());
    candidates.push("/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc".into());

    for p in candidates {
        if p.exists() {
            let bytes = fs::read(&p)
                .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
            apply_font_bytes(ctx, bytes, "korean_font");
            return Ok(());
        }
    }
    Err("Korean font not found; using egui defaults.".into())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Simulator,
    Analysis,
}

/// CSV 분석 탭 상태.
#[derive(Default)]
struct AnalysisTab {
    worker: Option<AnalysisWorker>,
    file_name: Option<String>,
    progress: Option<f64>,
    running: bool,
    report: Option<AnalysisReport>,
    error: Option<String>,
}

impl AnalysisTab {
    fn start(&mut self, path: &Path) {
        self.error = None;
        self.report = None;
        self.file_name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        let csv_data = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                self.error = Some(e.to_string());
                return;
            }
        };
        let worker = self.worker.get_or_insert_with(AnalysisWorker::spawn);
        match worker.send(AnalysisRequest::Run { csv_data }) {
            Ok(()) => {
                self.running = true;
                self.progress = Some(0.0);
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// 작업 스레드의 응답을 모두 소비한다.
    fn poll(&mut self) {
        let Some(worker) = &self.worker else {
            return;
        };
        while let Some(resp) = worker.try_recv() {
            match resp {
                AnalysisResponse::Progress(p) => self.progress = Some(p),
                AnalysisResponse::Finished(report) => {
                    self.progress = Some(1.0);
                    self.report = Some(report);
                    self.running = false;
                }
                AnalysisResponse::Failed(e) => {
                    self.error = Some(e.to_string());
                    self.running = false;
                }
            }
        }
    }
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    session: Session,
    tab: Tab,
    lang_input: String,
    policy_input: PressurePolicy,
    save_status: Option<String>,
    window_alpha: f32,
    show_settings_modal: bool,
    show_help_modal: bool,
    analysis: AnalysisTab,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        let session = app::build_session(&config, &tr, &config.initial);
        Self {
            lang_input: config.language.clone(),
            policy_input: config.pressure_policy,
            window_alpha: config.window_alpha,
            config,
            tr,
            session,
            tab: Tab::Simulator,
            save_status: None,
            show_settings_modal: false,
            show_help_modal: false,
            analysis: AnalysisTab::default(),
        }
    }

    fn txt(&self, key: &str, default: &str) -> String {
        self.tr.lookup(key).unwrap_or_else(|| default.to_string())
    }

    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading(self.txt("gui.nav.heading", "Menu"));
            ui.add_space(8.0);
        });
        for (tab, label) in [
            (Tab::Simulator, self.txt("gui.tab.simulator", "Process Simulator")),
            (Tab::Analysis, self.txt("gui.tab.analysis", "CSV Analysis")),
        ] {
            let selected = self.tab == tab;
            let button = egui::Button::new(label)
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            if ui.add(button).clicked() {
                self.tab = tab;
            }
            ui.add_space(4.0);
        }
    }

    /// 슬라이더 한 줄. 값이 바뀌면 Input 이벤트를 보낸다.
    fn slider_row(&mut self, ui: &mut egui::Ui, id: ControlId, label: &str, unit: &str) {
        let handle = self.session.controls.handle(id);
        let enabled = handle.enabled;
        let (min, max) = (handle.min, handle.max);
        let mut value = handle.number().unwrap_or(min);
        let display = handle.display.clone();

        ui.label(label);
        let resp = ui.add_enabled(
            enabled,
            egui::Slider::new(&mut value, min..=max).show_value(false),
        );
        ui.monospace(format!("{display} {unit}"));
        ui.end_row();

        if resp.changed() {
            self.session.controls.handle_mut(id).raw = value.to_string();
            self.session.handle_event(id, EventKind::Input);
        }
    }

    fn ui_simulator(&mut self, ui: &mut egui::Ui) {
        ui.heading(self.txt("gui.sim.heading", "Gas flow / pressure"));
        ui.separator();

        let flow_unit = self.config.units.flow.clone();
        let pressure_unit = self.config.units.pressure.clone();
        let sliders = [
            (ControlId::C2h2Flow, i18n::keys::CONTROL_C2H2_FLOW, &flow_unit),
            (ControlId::ArFlow, i18n::keys::CONTROL_AR_FLOW, &flow_unit),
            (ControlId::TotalPressure, i18n::keys::CONTROL_TOTAL_PRESSURE, &pressure_unit),
            (ControlId::ContaminantPp, i18n::keys::CONTROL_CONTAMINANT_PP, &pressure_unit),
        ];
        egui::Grid::new("process_controls")
            .num_columns(3)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for (id, key, unit) in sliders {
                    let label = self.tr.t(key);
                    self.slider_row(ui, id, &label, unit);
                }

                ui.label(self.tr.t(i18n::keys::CONTROL_TARGET_C2H2_PP));
                let resp = ui.add(
                    egui::TextEdit::singleline(&mut self.session.controls.target_c2h2_pp.raw)
                        .desired_width(120.0),
                );
                ui.monospace(format!(
                    "{} {pressure_unit}",
                    self.session.controls.target_c2h2_pp.display
                ));
                ui.end_row();
                if resp.lost_focus() {
                    self.session
                        .handle_event(ControlId::TargetC2h2Pp, EventKind::Change);
                }

                ui.label(self.tr.t(i18n::keys::CONTROL_C2H2_PP));
                ui.add_enabled(
                    false,
                    egui::Label::new(egui::RichText::new(self.session.controls.c2h2_pp.display.as_str()).strong()),
                );
                ui.label(pressure_unit.as_str());
                ui.end_row();
            });

        ui.separator();
        ui.label(self.tr.t(i18n::keys::MODE_HEADING));
        let mut selected = self.session.state().calculated_param;
        ui.horizontal(|ui| {
            for param in CalculatedParam::ALL {
                ui.radio_value(&mut selected, param, self.param_label(param));
            }
        });
        if selected != self.session.state().calculated_param {
            self.session.controls.calculated_param.raw = selected.as_str().to_string();
            self.session
                .handle_event(ControlId::CalculatedParam, EventKind::Change);
        }

        ui.separator();
        self.ui_curve(ui);
    }

    fn param_label(&self, param: CalculatedParam) -> String {
        match param {
            CalculatedParam::C2h2Flow => self.tr.t(i18n::keys::CONTROL_C2H2_FLOW),
            CalculatedParam::ArFlow => self.tr.t(i18n::keys::CONTROL_AR_FLOW),
            CalculatedParam::TotalPressure => self.tr.t(i18n::keys::CONTROL_TOTAL_PRESSURE),
            CalculatedParam::C2h2PartialPressure => self.tr.t(i18n::keys::CONTROL_C2H2_PP),
        }
    }

    fn ui_curve(&self, ui: &mut egui::Ui) {
        let plot = &self.session.plot;
        ui.strong(plot.title.as_str());
        let x_label = format!("Ar [{}]", self.config.units.flow);
        let y_label = format!("P [{}]", self.config.units.pressure);
        let current = self.tr.t(i18n::keys::CURVE_CURRENT);
        Plot::new("process_curve")
            .height(320.0)
            .x_axis_label(x_label)
            .y_axis_label(y_label)
            .legend(Legend::default().position(Corner::LeftTop))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(plot.points.clone())
                        .width(2.0)
                        .name(self.tr.t(i18n::keys::CONTROL_TOTAL_PRESSURE)),
                );
                if let Some(h) = plot.highlight {
                    plot_ui.points(
                        Points::new(vec![h])
                            .radius(6.0)
                            .shape(MarkerShape::Circle)
                            .color(egui::Color32::from_rgb(230, 70, 70))
                            .name(current),
                    );
                }
            });
    }

    fn ui_analysis(&mut self, ui: &mut egui::Ui) {
        ui.heading(self.tr.t(i18n::keys::ANALYSIS_HEADING));
        ui.separator();
        ui.horizontal(|ui| {
            let open = ui.add_enabled(
                !self.analysis.running,
                egui::Button::new(self.txt("gui.analysis.open", "Open CSV...")),
            );
            if open.clicked() {
                if let Some(path) = FileDialog::new().add_filter("CSV", &["csv"]).pick_file() {
                    self.analysis.start(&path);
                }
            }
            if let Some(name) = &self.analysis.file_name {
                ui.label(name.as_str());
            }
        });
        if let Some(p) = self.analysis.progress {
            ui.add(egui::ProgressBar::new(p as f32).show_percentage());
        }
        if let Some(err) = &self.analysis.error {
            ui.colored_label(egui::Color32::RED, format!("{}: {err}", self.tr.t(i18n::keys::ERROR_PREFIX)));
        }
        let Some(report) = &self.analysis.report else {
            return;
        };

        ui.label(format!("{}: {}", self.tr.t(i18n::keys::ANALYSIS_ROWS), report.row_count));
        egui::Grid::new("analysis_preview")
            .striped(true)
            .num_columns(report.headers.len())
            .show(ui, |ui| {
                for h in &report.headers {
                    ui.strong(h.as_str());
                }
                ui.end_row();
                for row in &report.preview {
                    for cell in row {
                        ui.monospace(cell.as_str());
                    }
                    ui.end_row();
                }
            });
        ui.separator();
        Plot::new("analysis_plot")
            .height(280.0)
            .legend(Legend::default().position(Corner::RightTop))
            .show(ui, |plot_ui| {
                for s in &report.series {
                    plot_ui.line(Line::new(s.points.clone()).name(&s.name));
                }
            });
    }

    fn ui_settings(&mut self, ctx: &egui::Context) {
        let mut open = self.show_settings_modal;
        let mut save_clicked = false;
        egui::Window::new(self.txt("gui.settings.title", "Settings"))
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(self.txt("gui.settings.alpha", "Window transparency"));
                ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                ui.separator();
                ui.label(self.txt("gui.settings.lang", "Language"));
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(&self.lang_input)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.lang_input, "auto".into(), "System");
                        ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                        ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                    });
                ui.separator();
                ui.label(self.txt("gui.settings.policy", "Total pressure below contaminant PP"));
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut self.policy_input, PressurePolicy::Permissive, "Permissive");
                    ui.selectable_value(&mut self.policy_input, PressurePolicy::Clamp, "Clamp");
                });
                ui.separator();
                if ui.button(self.txt("gui.settings.save", "Save settings")).clicked() {
                    save_clicked = true;
                }
                if let Some(msg) = &self.save_status {
                    ui.label(msg.as_str());
                }
            });
        self.show_settings_modal = open;
        if save_clicked {
            self.apply_settings();
        }
    }

    fn apply_settings(&mut self) {
        self.config.language = self.lang_input.clone();
        self.config.window_alpha = self.window_alpha;
        self.config.pressure_policy = self.policy_input;
        let resolved = i18n::resolve_language(&self.config.language, None);
        self.tr = i18n::Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
        let current = self.session.state().readings();
        self.session = app::build_session(&self.config, &self.tr, &current);
        self.save_status = Some(match self.config.save() {
            Ok(()) => self.tr.t(i18n::keys::SETTINGS_SAVED),
            Err(e) => format!("{}: {e}", self.tr.t(i18n::keys::ERROR_PREFIX)),
        });
    }

    fn ui_help(&mut self, ctx: &egui::Context) {
        let mut open = self.show_help_modal;
        egui::Window::new(self.txt("gui.about.title", "Help / About"))
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.heading(self.txt("gui.about.app", "CVD acetylene/argon process simulator"));
                ui.label(format!("Version: {}", env!("CARGO_PKG_VERSION")));
                ui.separator();
                ui.monospace("P_C2H2 = F_C2H2 / (F_C2H2 + F_Ar) * (P_total - P_contam)");
                ui.label(self.txt(
                    "gui.about.modes",
                    "The selected parameter is solved so the C2H2 partial pressure matches the target.",
                ));
                ui.label(self.txt(
                    "gui.about.curve",
                    "The curve shows the total pressure needed to hold the target across the Ar flow range.",
                ));
            });
        self.show_help_modal = open;
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.analysis.poll();
        if self.analysis.running {
            ctx.request_repaint();
        }

        // 투명도 적용
        let mut style = (*ctx.style()).clone();
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.txt("gui.nav.app_title", "CVD Process Simulator"));
                ui.separator();
                if ui.button(self.txt("gui.settings.title", "Settings")).clicked() {
                    self.show_settings_modal = true;
                }
                if ui.button(self.txt("gui.about.title", "Help / About")).clicked() {
                    self.show_help_modal = true;
                }
            });
        });

        if self.show_settings_modal {
            self.ui_settings(ctx);
        }
        if self.show_help_modal {
            self.ui_help(ctx);
        }

        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(140.0)
            .default_width(180.0)
            .show(ctx, |ui| self.ui_nav(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.tab {
                    Tab::Simulator => self.ui_simulator(ui),
                    Tab::Analysis => self.ui_analysis(ui),
                });
        });
    }
}
