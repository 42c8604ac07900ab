use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_SET_INPUTS: &str = "main_menu.set_inputs";
    pub const MAIN_MENU_SELECT_MODE: &str = "main_menu.select_mode";
    pub const MAIN_MENU_SHOW_STATE: &str = "main_menu.show_state";
    pub const MAIN_MENU_SHOW_CURVE: &str = "main_menu.show_curve";
    pub const MAIN_MENU_CSV_ANALYSIS: &str = "main_menu.csv_analysis";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const INVALID_SELECTION: &str = "error.invalid_selection";

    pub const INPUTS_HEADING: &str = "inputs.heading";
    pub const INPUTS_KEEP_HINT: &str = "inputs.keep_hint";
    pub const INPUTS_LOCKED: &str = "inputs.locked";

    pub const CONTROL_C2H2_FLOW: &str = "control.c2h2_flow";
    pub const CONTROL_AR_FLOW: &str = "control.ar_flow";
    pub const CONTROL_TOTAL_PRESSURE: &str = "control.total_pressure";
    pub const CONTROL_CONTAMINANT_PP: &str = "control.contaminant_pp";
    pub const CONTROL_TARGET_C2H2_PP: &str = "control.target_c2h2_pp";
    pub const CONTROL_C2H2_PP: &str = "control.c2h2_pp";

    pub const MODE_HEADING: &str = "mode.heading";
    pub const MODE_OPTIONS: &str = "mode.options";
    pub const MODE_SELECTED: &str = "mode.selected";

    pub const STATE_HEADING: &str = "state.heading";
    pub const STATE_CALCULATED: &str = "state.calculated";
    pub const STATE_PROCESS_PRESSURE: &str = "state.process_pressure";

    pub const CURVE_HEADING: &str = "curve.heading";
    pub const CURVE_TITLE_TEMPLATE: &str = "curve.title_template";
    pub const CURVE_CURRENT: &str = "curve.current";

    pub const ANALYSIS_HEADING: &str = "analysis.heading";
    pub const ANALYSIS_PROMPT_PATH: &str = "analysis.prompt_path";
    pub const ANALYSIS_PROGRESS: &str = "analysis.progress";
    pub const ANALYSIS_ROWS: &str = "analysis.rows";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_POLICY: &str = "settings.current_policy";
    pub const SETTINGS_POLICY_OPTIONS: &str = "settings.policy_options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
    built_in: HashMap<String, String>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self::new_with_pack(lang_code, None)
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let lang = Language::from_code(lang_code);
        let overrides = pack_dir.and_then(|dir| load_overrides(dir, lang_code));
        Self {
            lang,
            overrides,
            built_in: built_in_pack(lang),
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 외부 언어팩 → 내장 언어팩 순으로 찾는다.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides
            .as_ref()
            .and_then(|m| m.get(key))
            .or_else(|| self.built_in.get(key))
            .cloned()
    }

    /// 번역을 가져온다. 어디에도 없으면 키 자체를 돌려준다.
    pub fn t(&self, key: &str) -> String {
        self.lookup(key).unwrap_or_else(|| key.to_string())
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" | "ko-kr" => Some("ko-kr".into()),
        "en" | "en-us" | "en-uk" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko-kr".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko-kr".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵 또는 중첩 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    let (base, _) = lang.split_once(['-', '_'])?;
    try_load(base)
}

/// 중첩 테이블을 `a.b.c` 형태의 키로 평탄화한다.
pub fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: Language) -> HashMap<String, String> {
    let src = match lang {
        Language::Ko => include_str!("../locales/ko-kr.toml"),
        Language::En => include_str!("../locales/en-us.toml"),
    };
    parse_toml_to_map(src).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_codes_normalize() {
        assert_eq!(normalize_lang("KO").as_deref(), Some("ko-kr"));
        assert_eq!(normalize_lang("en-uk").as_deref(), Some("en-us"));
        assert_eq!(normalize_lang("auto"), None);
        assert_eq!(normalize_locale_string("ko_KR.UTF-8").as_deref(), Some("ko-kr"));
        assert_eq!(resolve_language("ko", Some("en")), "ko-kr");
        assert_eq!(resolve_language("auto", Some("en")), "en-us");
    }

    #[test]
    fn built_in_packs_cover_every_key() {
        let all = [
            keys::APP_EXIT,
            keys::MAIN_MENU_TITLE,
            keys::MAIN_MENU_CSV_ANALYSIS,
            keys::INPUTS_LOCKED,
            keys::CONTROL_C2H2_PP,
            keys::MODE_OPTIONS,
            keys::STATE_PROCESS_PRESSURE,
            keys::CURVE_TITLE_TEMPLATE,
            keys::ANALYSIS_PROGRESS,
            keys::SETTINGS_SAVED,
        ];
        for code in ["ko", "en"] {
            let tr = Translator::new(code);
            for key in all {
                assert!(tr.lookup(key).is_some(), "{code}: {key}");
            }
        }
    }

    #[test]
    fn title_template_has_placeholders() {
        for code in ["ko", "en"] {
            let t = Translator::new(code).t(keys::CURVE_TITLE_TEMPLATE);
            assert!(t.contains("{target}") && t.contains("{unit}"), "{t}");
        }
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        assert_eq!(Translator::new("en").t("no.such.key"), "no.such.key");
    }

    #[test]
    fn nested_tables_flatten() {
        let map = parse_toml_to_map("[a]\nb = \"x\"\n[a.c]\nd = \"y\"\n").unwrap_or_default();
        assert_eq!(map.get("a.b").map(String::as_str), Some("x"));
        assert_eq!(map.get("a.c.d").map(String::as_str), Some("y"));
    }
}
