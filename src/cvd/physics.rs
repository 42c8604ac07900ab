//! 아세틸렌 분압 지배식과 그 역산 함수 모음.
//!
//! 지배식: `P_c2h2 = F_c2h2 / (F_c2h2 + F_ar) * (P_total - P_contaminant)`
//!
//! 모든 함수는 순수 함수이며 실패하지 않는다. 물리적으로 정의되지 않는 영역에서는
//! 0 또는 오염물 분압(압력 하한)을 돌려준다.

/// 공정 압력(총압 - 오염물 분압)을 계산한다.
pub fn process_pressure(p_total: f64, p_contam: f64) -> f64 {
    p_total - p_contam
}

/// 유량과 압력으로 아세틸렌 분압을 계산한다.
/// 총 유량 또는 공정 압력이 0 이하이면 0을 반환한다.
pub fn compute_c2h2_pp(flow_c2h2: f64, flow_ar: f64, p_total: f64, p_contam: f64) -> f64 {
    let total_flow = flow_c2h2 + flow_ar;
    let p_process = process_pressure(p_total, p_contam);
    if total_flow <= 0.0 || p_process <= 0.0 {
        return 0.0;
    }
    flow_c2h2 / total_flow * p_process
}

/// 목표 아세틸렌 분압을 만족하는 총압을 역산한다.
/// 아세틸렌 유량이나 목표 분압이 0 이하이면 오염물 분압(하한)을 그대로 돌려준다.
pub fn solve_total_pressure(flow_c2h2: f64, flow_ar: f64, p_contam: f64, target_pp: f64) -> f64 {
    if flow_c2h2 <= 0.0 || target_pp <= 0.0 {
        return p_contam;
    }
    target_pp * (flow_c2h2 + flow_ar) / flow_c2h2 + p_contam
}

/// 목표 아세틸렌 분압을 만족하는 아세틸렌 유량을 역산한다.
///
/// `process_pressure == target_pp`에서 분모가 0이 되므로 공정 압력이 목표 분압보다
/// 클 때만 값을 계산하고, 그 외에는 0을 반환한다.
pub fn solve_c2h2_flow(p_total: f64, p_contam: f64, flow_ar: f64, target_pp: f64) -> f64 {
    let p_process = process_pressure(p_total, p_contam);
    if target_pp <= 0.0 || p_process <= target_pp {
        return 0.0;
    }
    target_pp * flow_ar / (p_process - target_pp)
}

/// 목표 아세틸렌 분압을 만족하는 아르곤 유량을 역산한다.
pub fn solve_ar_flow(flow_c2h2: f64, p_total: f64, p_contam: f64, target_pp: f64) -> f64 {
    let p_process = process_pressure(p_total, p_contam);
    if flow_c2h2 <= 0.0 || target_pp <= 0.0 || p_process <= target_pp {
        return 0.0;
    }
    flow_c2h2 * (p_process / target_pp - 1.0)
}
