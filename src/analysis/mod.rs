//! CSV 데이터 분석 작업.
//!
//! CSV 텍스트를 읽어 숫자 열마다 `sin(행 번호 / 10)`을 곱한 뒤
//! 미리보기 표와 열별 그래프 시리즈를 만든다. 진행률은 콜백으로 보고한다.

pub mod worker;

pub use worker::{AnalysisRequest, AnalysisResponse, AnalysisWorker};

/// 미리보기 표에 담는 행 수
pub const PREVIEW_ROWS: usize = 5;

/// 분석 중 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// 헤더가 없거나 비어 있는 입력
    #[error("CSV 입력이 비어 있습니다.")]
    Empty,
    /// 헤더는 있으나 데이터 행이 없음
    #[error("데이터 행이 없습니다.")]
    NoRows,
    /// 열 개수가 헤더와 다른 행
    #[error("{line}행의 열 개수({found})가 헤더({expected})와 다릅니다.")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// 따옴표 짝이 맞지 않는 등 CSV로 읽을 수 없는 입력
    #[error("CSV 형식 오류: {0}")]
    Malformed(String),
    /// 작업 스레드와의 연결이 끊김
    #[error("분석 작업 스레드가 종료되었습니다.")]
    WorkerDisconnected,
}

#[derive(Debug, Clone, PartialEq)]
enum Column {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl Column {
    fn cell(&self, row: usize) -> String {
        match self {
            Column::Numeric(v) if v[row].is_nan() => "NaN".to_string(),
            Column::Numeric(v) => format!("{:.4}", v[row]),
            Column::Text(v) => v[row].clone(),
        }
    }
}

/// 숫자 열 하나의 그래프 시리즈 (행 번호, 변환 값).
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

/// 분석 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub headers: Vec<String>,
    /// 앞쪽 [`PREVIEW_ROWS`]개 행을 문자열로 정리한 표
    pub preview: Vec<Vec<String>>,
    pub series: Vec<AnalysisSeries>,
    pub row_count: usize,
}

/// 셀 하나를 숫자로 읽는다. 빈 셀은 결측값(NaN)이다.
fn parse_cell(cell: &str) -> Option<f64> {
    if cell.is_empty() {
        Some(f64::NAN)
    } else {
        cell.parse::<f64>().ok()
    }
}

fn read_error(err: csv::Error) -> AnalysisError {
    match err.kind() {
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => AnalysisError::RaggedRow {
            line: pos.as_ref().map_or(0, |p| p.line() as usize),
            expected: *expected_len as usize,
            found: *len as usize,
        },
        _ => AnalysisError::Malformed(err.to_string()),
    }
}

/// CSV를 분석한다. `progress`는 0.0~1.0 사이 값으로 여러 번 호출된다.
///
/// 따옴표로 감싼 필드는 쉼표를 포함할 수 있다. 빈 셀은 결측값으로 보고
/// 나머지 셀이 모두 숫자이면 그 열은 숫자 열로 남는다.
pub fn perform_analysis(
    csv_data: &str,
    progress: &mut dyn FnMut(f64),
) -> Result<AnalysisReport, AnalysisError> {
    progress(0.1);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(csv_data.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .map_err(read_error)?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(AnalysisError::Empty);
    }

    let mut records: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(read_error)?;
        records.push(record.iter().map(str::to_string).collect());
    }
    if records.is_empty() {
        return Err(AnalysisError::NoRows);
    }

    progress(0.3);
    let num_cols = headers.len();
    let mut columns = Vec::with_capacity(num_cols);
    for col in 0..num_cols {
        let raw: Vec<&str> = records.iter().map(|r| r[col].as_str()).collect();
        let parsed: Option<Vec<f64>> = raw.iter().map(|s| parse_cell(s)).collect();
        let column = match parsed {
            Some(values) => Column::Numeric(
                values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| v * (i as f64 / 10.0).sin())
                    .collect(),
            ),
            None => Column::Text(raw.iter().map(|s| s.to_string()).collect()),
        };
        columns.push(column);
        progress(0.3 + 0.5 * (col + 1) as f64 / num_cols as f64);
    }

    let row_count = records.len();
    let preview = (0..row_count.min(PREVIEW_ROWS))
        .map(|row| columns.iter().map(|c| c.cell(row)).collect())
        .collect();
    let series = headers
        .iter()
        .zip(columns.iter())
        .filter_map(|(name, col)| match col {
            Column::Numeric(v) => Some(AnalysisSeries {
                name: name.clone(),
                points: v
                    .iter()
                    .enumerate()
                    .filter(|(_, y)| !y.is_nan())
                    .map(|(i, y)| [i as f64, *y])
                    .collect(),
            }),
            Column::Text(_) => None,
        })
        .collect();

    progress(1.0);
    log::info!("analysis finished: {row_count} rows, {num_cols} columns");
    Ok(AnalysisReport {
        headers,
        preview,
        series,
        row_count,
    })
}
