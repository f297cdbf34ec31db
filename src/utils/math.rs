//! 수학 관련 유틸리티
//!
//! 윈도우 통계, 변화율 계산 함수 제공

use statrs::statistics::Statistics;

/// 평균 계산
pub fn average(values: &[f64]) -> Option<f64> {
  if values.is_empty() {
    return None;
  }
  
  Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// 표본 표준 편차 계산 (n - 1로 나눔)
pub fn sample_standard_deviation(values: &[f64]) -> Option<f64> {
  if values.len() < 2 {
    return None;
  }
  
  // 모든 값이 같으면 부동소수 오차 없이 0
  if values.iter().all(|v| *v == values[0]) {
    return Some(0.0);
  }
  
  Some(values.std_dev())
}

/// 수익률 계산 (백분율)
pub fn calculate_return(entry_price: f64, exit_price: f64) -> f64 {
  (exit_price - entry_price) / entry_price * 100.0
}

/// 두 값 사이의 절대 변화율 (백분율). 기준값이 0이면 None
pub fn absolute_percent_change(previous: f64, current: f64) -> Option<f64> {
  if previous == 0.0 {
    return None;
  }
  
  Some((current - previous).abs() / previous.abs() * 100.0)
}

/// 소수점 자리수 반올림
pub fn round_to(value: f64, decimals: u32) -> f64 {
  let factor = 10f64.powi(decimals as i32);
  (value * factor).round() / factor
}
