/**
* filename : accuracy
* author : HAMA
* date: 2025. 5. 11.
* description: 
**/

use std::fmt;
use serde::Serialize;

use crate::indicators::CrossoverKind;
use crate::utils::math;

/// 신호 판정에 사용하는 기본 선행 구간 (스텝 수)
pub const DEFAULT_LOOKAHEAD: usize = 3;

/// 이벤트 하나에 대한 사후 평가
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventOutcome {
  /// 가격 시계열 인덱스
  pub index: usize,
  pub kind: CrossoverKind,
  pub entry_price: f64,
  pub exit_price: f64,
  pub return_pct: f64,
  pub correct: bool,
}

/// 적중률 집계
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SignalAccuracy {
  pub correct: usize,
  pub evaluated: usize,
  /// 선행 구간이 가격 범위를 벗어나 평가하지 못한 이벤트 수
  pub skipped: usize,
}

impl SignalAccuracy {
  /// 평가 결과 집계. `total`은 평가 대상 이벤트 수 (건너뛴 이벤트 포함)
  pub fn from_outcomes(outcomes: &[EventOutcome], total: usize) -> Self {
    SignalAccuracy {
      correct: outcomes.iter().filter(|o| o.correct).count(),
      evaluated: outcomes.len(),
      skipped: total.saturating_sub(outcomes.len()),
    }
  }
  
  /// 적중률(%). 평가된 이벤트가 없으면 None
  pub fn percentage(&self) -> Option<f64> {
    if self.evaluated == 0 {
      return None;
    }
    
    Some(self.correct as f64 / self.evaluated as f64 * 100.0)
  }
}

impl fmt::Display for SignalAccuracy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.percentage() {
      Some(pct) => write!(f, "{:.2}%", pct),
      None => write!(f, "n/a"),
    }
  }
}

fn evaluate(prices: &[f64], index: usize, kind: CrossoverKind, lookahead: usize) -> Option<EventOutcome> {
  let target = index.checked_add(lookahead)?;
  if target >= prices.len() {
    return None;
  }
  
  let entry_price = prices[index];
  let exit_price = prices[target];
  let correct = match kind {
    CrossoverKind::Buy => exit_price > entry_price,
    CrossoverKind::Sell => exit_price < entry_price,
  };
  
  Some(EventOutcome {
    index,
    kind,
    entry_price,
    exit_price,
    return_pct: math::calculate_return(entry_price, exit_price),
    correct,
  })
}

/// 각 매수/매도 이벤트를 `lookahead` 스텝 뒤 가격으로 평가.
/// 매수는 가격이 올랐을 때, 매도는 내렸을 때 적중이다.
pub fn evaluate_events(
  prices: &[f64],
  buy_events: &[usize],
  sell_events: &[usize],
  lookahead: usize,
) -> Vec<EventOutcome> {
  let buys = buy_events.iter().map(|i| (*i, CrossoverKind::Buy));
  let sells = sell_events.iter().map(|i| (*i, CrossoverKind::Sell));
  
  buys
    .chain(sells)
    .filter_map(|(index, kind)| evaluate(prices, index, kind, lookahead))
    .collect()
}

/// 이벤트 적중률 백테스트
pub fn signal_accuracy(
  prices: &[f64],
  buy_events: &[usize],
  sell_events: &[usize],
  lookahead: usize,
) -> SignalAccuracy {
  let outcomes = evaluate_events(prices, buy_events, sell_events, lookahead);
  SignalAccuracy::from_outcomes(&outcomes, buy_events.len() + sell_events.len())
}
