use cvd_process_simulator::config::{self, Config, RangeBound};
use cvd_process_simulator::cvd::{CalculatedParam, PressurePolicy};

#[test]
fn missing_file_writes_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cvd.toml");
    let cfg = config::load_or_default_at(&path).expect("load");
    assert!(path.exists());
    assert_eq!(cfg.path(), path.as_path());
    assert_eq!(cfg.curve_samples, 50);
    assert_eq!(cfg.pressure_policy, PressurePolicy::Permissive);
    assert_eq!(cfg.bounds.ar_flow, RangeBound::new(0.0, 200.0));
    assert_eq!(cfg.units.pressure, "Torr");
    assert_eq!(cfg.initial.calculated_param, CalculatedParam::C2h2PartialPressure);
}

#[test]
fn saved_values_are_loaded_back() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cvd.toml");
    let mut cfg = config::load_or_default_at(&path).expect("load");
    cfg.pressure_policy = PressurePolicy::Clamp;
    cfg.initial.calculated_param = CalculatedParam::ArFlow;
    cfg.initial.target_c2h2_pp = 0.4;
    cfg.language = "ko".into();
    cfg.save().expect("save");

    let loaded = config::load_or_default_at(&path).expect("reload");
    assert_eq!(loaded.pressure_policy, PressurePolicy::Clamp);
    assert_eq!(loaded.initial.calculated_param, CalculatedParam::ArFlow);
    assert_eq!(loaded.initial.target_c2h2_pp, 0.4);
    assert_eq!(loaded.language, "ko");
}

#[test]
fn partial_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cvd.toml");
    std::fs::write(&path, "pressure_policy = \"clamp\"\ncurve_samples = 0\n").expect("write");
    let cfg = config::load_or_default_at(&path).expect("load");
    assert_eq!(cfg.pressure_policy, PressurePolicy::Clamp);
    assert_eq!(cfg.curve_samples, 1);
    assert_eq!(cfg.window_alpha, Config::default().window_alpha);

    let settings = cfg.simulator_settings("{target}");
    assert_eq!(settings.curve_samples, 1);
    assert_eq!(settings.policy, PressurePolicy::Clamp);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cvd.toml");
    std::fs::write(&path, "curve_samples = \"many\"").expect("write");
    assert!(matches!(
        config::load_or_default_at(&path),
        Err(config::ConfigError::Serde(_))
    ));
}

#[test]
fn partial_tables_keep_missing_fields_at_default() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cvd.toml");
    std::fs::write(
        &path,
        "[initial]\ntarget_c2h2_pp = 0.4\n\n[bounds.ar_flow]\nmin = 0.0\nmax = 150.0\n",
    )
    .expect("write");
    let cfg = config::load_or_default_at(&path).expect("load");
    assert_eq!(cfg.initial.target_c2h2_pp, 0.4);
    assert_eq!(cfg.initial.c2h2_flow, 5.0);
    assert_eq!(cfg.initial.calculated_param, CalculatedParam::C2h2PartialPressure);
    assert_eq!(cfg.bounds.ar_flow, RangeBound::new(0.0, 150.0));
    assert_eq!(cfg.bounds.c2h2_flow, RangeBound::new(0.0, 100.0));
}
