/**
* filename : series
* author : HAMA
* date: 2025. 5. 11.
* description: 
**/

use serde::Serialize;

use crate::error::AnalysisError;
use crate::utils::math;

/// 롤링 윈도우로 계산된 시계열.
///
/// `values[i]`는 가격 시계열의 `i + window - 1` 번째 값(윈도우의 오른쪽 끝)에 대응한다.
/// 정렬 계산은 모두 이 타입을 통해 이루어진다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowedSeries {
  window: usize,
  values: Vec<f64>,
}

/// 이동평균 시계열
pub type MovingAverageSeries = WindowedSeries;

/// 변동성(표본 표준편차) 시계열
pub type VolatilitySeries = WindowedSeries;

impl WindowedSeries {
  pub fn new(window: usize, values: Vec<f64>) -> Result<Self, AnalysisError> {
    if window == 0 {
      return Err(AnalysisError::InvalidWindow { window, minimum: 1 });
    }
    
    Ok(WindowedSeries { window, values })
  }
  
  pub fn window(&self) -> usize {
    self.window
  }
  
  /// 첫 번째 값이 대응하는 가격 인덱스
  pub fn start_offset(&self) -> usize {
    self.window - 1
  }
  
  pub fn values(&self) -> &[f64] {
    &self.values
  }
  
  pub fn len(&self) -> usize {
    self.values.len()
  }
  
  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
  
  pub fn get(&self, index: usize) -> Option<f64> {
    self.values.get(index).copied()
  }
  
  pub fn last(&self) -> Option<f64> {
    self.values.last().copied()
  }
  
  /// 시계열 인덱스 -> 가격 인덱스
  pub fn price_index(&self, index: usize) -> usize {
    index + self.start_offset()
  }
  
  /// 가격 인덱스 시점의 값. 윈도우가 아직 채워지지 않았으면 None
  pub fn at_price_index(&self, price_index: usize) -> Option<f64> {
    price_index
      .checked_sub(self.start_offset())
      .and_then(|i| self.get(i))
  }
  
  /// 가격 시계열 길이에 맞춘 값 목록 (앞부분은 None)
  pub fn aligned(&self, price_len: usize) -> Vec<Option<f64>> {
    (0..price_len).map(|i| self.at_price_index(i)).collect()
  }
}

fn rolling<F>(prices: &[f64], window: usize, stat: F) -> Vec<f64>
where
  F: Fn(&[f64]) -> f64,
{
  if window > prices.len() {
    return Vec::new();
  }
  
  prices.windows(window).map(stat).collect()
}

/// 단순 이동평균. 윈도우가 가격 수보다 크면 빈 시계열
pub fn moving_average(prices: &[f64], window: usize) -> Result<MovingAverageSeries, AnalysisError> {
  if window == 0 {
    return Err(AnalysisError::InvalidWindow { window, minimum: 1 });
  }
  
  let values = rolling(prices, window, |w| math::average(w).unwrap_or(f64::NAN));
  WindowedSeries::new(window, values)
}

/// 롤링 표본 표준편차
pub fn volatility(prices: &[f64], window: usize) -> Result<VolatilitySeries, AnalysisError> {
  if window < 2 {
    return Err(AnalysisError::InvalidWindow { window, minimum: 2 });
  }
  
  let values = rolling(prices, window, |w| {
    math::sample_standard_deviation(w).unwrap_or(f64::NAN)
  });
  WindowedSeries::new(window, values)
}
