use crate::cvd::{CurvePoint, CurveSweep};

/// 곡선을 그리는 쪽이 구현하는 인터페이스.
pub trait CurveRenderer {
    fn render_curve(&mut self, series: CurveSweep, highlight: CurvePoint, title: &str);
}

/// 그리기 직전의 곡선 데이터. GUI는 이 값을 egui_plot으로, CLI는 표로 출력한다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotModel {
    pub points: Vec<[f64; 2]>,
    pub highlight: Option<[f64; 2]>,
    pub title: String,
    /// render_curve가 호출된 횟수
    pub revision: u64,
}

impl CurveRenderer for PlotModel {
    fn render_curve(&mut self, series: CurveSweep, highlight: CurvePoint, title: &str) {
        self.points.clear();
        self.points.extend(series.map(|p| p.as_array()));
        self.highlight = Some(highlight.as_array());
        self.title = title.to_string();
        self.revision += 1;
    }
}

/// `{key}` 자리표시자를 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}
