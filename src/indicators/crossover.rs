/**
* filename : crossover
* author : HAMA
* date: 2025. 5. 11.
* description: 
**/

use std::fmt;
use serde::Serialize;

use crate::error::AnalysisError;
use super::series::MovingAverageSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CrossoverKind {
  Buy,   // 골든 크로스: 단기선이 장기선을 상향 돌파
  Sell,  // 데드 크로스: 단기선이 장기선을 하향 돌파
}

impl fmt::Display for CrossoverKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CrossoverKind::Buy => write!(f, "BUY"),
      CrossoverKind::Sell => write!(f, "SELL"),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrossoverEvent {
  /// 단기 이동평균 시계열 기준 인덱스
  pub index: usize,
  /// 가격 시계열 기준 인덱스 (index + short_window - 1)
  pub price_index: usize,
  pub kind: CrossoverKind,
}

/// 감지된 크로스오버 이벤트 (인덱스 오름차순)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Crossovers {
  events: Vec<CrossoverEvent>,
}

impl Crossovers {
  pub fn events(&self) -> &[CrossoverEvent] {
    &self.events
  }
  
  pub fn len(&self) -> usize {
    self.events.len()
  }
  
  pub fn is_empty(&self) -> bool {
    self.events.is_empty()
  }
  
  fn indices(&self, kind: CrossoverKind, price_axis: bool) -> Vec<usize> {
    self.events
      .iter()
      .filter(|e| e.kind == kind)
      .map(|e| if price_axis { e.price_index } else { e.index })
      .collect()
  }
  
  /// 매수 이벤트의 단기 시계열 인덱스
  pub fn buys(&self) -> Vec<usize> {
    self.indices(CrossoverKind::Buy, false)
  }
  
  /// 매도 이벤트의 단기 시계열 인덱스
  pub fn sells(&self) -> Vec<usize> {
    self.indices(CrossoverKind::Sell, false)
  }
  
  pub fn buy_price_indices(&self) -> Vec<usize> {
    self.indices(CrossoverKind::Buy, true)
  }
  
  pub fn sell_price_indices(&self) -> Vec<usize> {
    self.indices(CrossoverKind::Sell, true)
  }
}

/// 단기/장기 이동평균의 교차 지점 탐지.
///
/// 장기 시계열은 단기 시계열보다 `long_window - short_window` 만큼 늦게 시작하므로
/// 같은 시점을 비교하려면 그만큼 인덱스를 당겨서 읽는다.
pub fn buy_sell(
  short_ma: &MovingAverageSeries,
  long_ma: &MovingAverageSeries,
) -> Result<Crossovers, AnalysisError> {
  let short_window = short_ma.window();
  let long_window = long_ma.window();
  
  if short_window > long_window {
    return Err(AnalysisError::InvalidWindowOrdering {
      short: short_window,
      long: long_window,
    });
  }
  
  let offset = long_window - short_window;
  if short_ma.len().saturating_sub(offset) != long_ma.len() {
    return Err(AnalysisError::InvalidParameter(format!(
      "moving averages do not share a price axis (short len {}, long len {})",
      short_ma.len(),
      long_ma.len()
    )));
  }
  
  let short = short_ma.values();
  let long = long_ma.values();
  
  // 직전/현재 쌍이 모두 정렬되어 존재하는 지점부터 시작
  let start = (long_window - 1).max(offset + 1);
  let mut events = Vec::new();
  
  for i in start..short.len() {
    let prev_short = short[i - 1];
    let prev_long = long[i - 1 - offset];
    let curr_short = short[i];
    let curr_long = long[i - offset];
    
    let kind = if prev_short <= prev_long && curr_short > curr_long {
      CrossoverKind::Buy
    } else if prev_short >= prev_long && curr_short < curr_long {
      CrossoverKind::Sell
    } else {
      continue;
    };
    
    log::debug!("{} crossover at short index {} (price index {})", kind, i, short_ma.price_index(i));
    events.push(CrossoverEvent {
      index: i,
      price_index: short_ma.price_index(i),
      kind,
    });
  }
  
  Ok(Crossovers { events })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::indicators::series::{moving_average, WindowedSeries};
  
  #[test]
  fn test_no_crossing_yields_no_events() {
    let prices: Vec<f64> = (1..=30).map(|v| v as f64).collect();
    let short = moving_average(&prices, 3).unwrap();
    let long = moving_average(&prices, 8).unwrap();
    
    let crossovers = buy_sell(&short, &long).unwrap();
    assert!(crossovers.buys().is_empty());
    assert!(crossovers.sells().is_empty());
  }
  
  #[test]
  fn test_single_overtake_of_flat_long_series() {
    // 단기(창 2) 9개, 장기(창 3) 8개 -> 오프셋 1
    let short = WindowedSeries::new(2, vec![4.0, 4.0, 4.0, 4.0, 6.0, 6.0, 6.0, 6.0, 6.0]).unwrap();
    let long = WindowedSeries::new(3, vec![5.0; 8]).unwrap();
    
    let crossovers = buy_sell(&short, &long).unwrap();
    assert_eq!(crossovers.buys(), vec![4]);
    assert!(crossovers.sells().is_empty());
    assert_eq!(crossovers.buy_price_indices(), vec![5]);
  }
  
  #[test]
  fn test_buy_then_sell() {
    let short = WindowedSeries::new(2, vec![4.0, 4.0, 4.0, 6.0, 6.0, 3.0, 3.0]).unwrap();
    let long = WindowedSeries::new(2, vec![5.0; 7]).unwrap();
    
    let crossovers = buy_sell(&short, &long).unwrap();
    assert_eq!(crossovers.buys(), vec![3]);
    assert_eq!(crossovers.sells(), vec![5]);
    
    let kinds: Vec<CrossoverKind> = crossovers.events().iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![CrossoverKind::Buy, CrossoverKind::Sell]);
  }
  
  #[test]
  fn test_touching_then_leaving_counts_once() {
    // 같아졌다가(<=) 위로 벗어나는 경우 한 번만 매수
    let short = WindowedSeries::new(1, vec![4.0, 5.0, 6.0, 7.0]).unwrap();
    let long = WindowedSeries::new(1, vec![5.0; 4]).unwrap();
    
    let crossovers = buy_sell(&short, &long).unwrap();
    assert_eq!(crossovers.buys(), vec![2]);
    assert!(crossovers.sells().is_empty());
  }
  
  #[test]
  fn test_short_window_of_one_does_not_underflow() {
    let prices = [5.0, 4.0, 3.0, 4.0, 6.0, 8.0, 9.0];
    let short = moving_average(&prices, 1).unwrap();
    let long = moving_average(&prices, 3).unwrap();
    
    let crossovers = buy_sell(&short, &long).unwrap();
    assert_eq!(crossovers.buys(), vec![3]);
  }
  
  #[test]
  fn test_short_longer_than_long_is_rejected() {
    let prices: Vec<f64> = (1..=20).map(|v| v as f64).collect();
    let short = moving_average(&prices, 10).unwrap();
    let long = moving_average(&prices, 5).unwrap();
    
    assert!(matches!(
      buy_sell(&short, &long),
      Err(AnalysisError::InvalidWindowOrdering { short: 10, long: 5 })
    ));
  }
  
  #[test]
  fn test_mismatched_series_are_rejected() {
    let short = WindowedSeries::new(2, vec![1.0, 2.0, 3.0]).unwrap();
    let long = WindowedSeries::new(3, vec![1.0, 2.0, 3.0]).unwrap();
    assert!(matches!(buy_sell(&short, &long), Err(AnalysisError::InvalidParameter(_))));
  }
  
  #[test]
  fn test_empty_series() {
    let short = moving_average(&[1.0, 2.0], 3).unwrap();
    let long = moving_average(&[1.0, 2.0], 5).unwrap();
    assert!(buy_sell(&short, &long).unwrap().is_empty());
  }
}
