/**
* filename : pipeline
* author : HAMA
* date: 2025. 5. 12.
* description: 
**/

use serde::Serialize;

use crate::backtest::{evaluate_events, signal_accuracy, EventOutcome, SignalAccuracy};
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::indicators::{
  buy_sell, detect_trend, moving_average, percent_change, volatility, CrossoverEvent,
  MovingAverageSeries, Trend, TrendStrength, VolatilitySeries,
};
use crate::signals::{compose_signal, TradingSignal};
use crate::utils::math;

/// 한 가격 시계열에 대한 분석 결과
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
  pub params: AnalysisConfig,
  pub price_count: usize,
  pub latest_price: Option<f64>,
  /// 장기 이동평균 기준 추세. 데이터가 부족하면 None
  pub trend: Option<Trend>,
  pub strength: Option<TrendStrength>,
  pub percent_change: Option<f64>,
  pub latest_volatility: f64,
  pub signal: TradingSignal,
  pub events: Vec<CrossoverEvent>,
  /// 단기 이동평균 인덱스를 가격 인덱스로 보고 평가한 결과
  pub outcomes: Vec<EventOutcome>,
  pub accuracy: SignalAccuracy,
  /// 교차가 실제로 일어난 가격 시점(`price_index`) 기준 평가
  pub aligned_outcomes: Vec<EventOutcome>,
  pub aligned_accuracy: SignalAccuracy,
  pub short_ma: MovingAverageSeries,
  pub long_ma: MovingAverageSeries,
  pub volatility: VolatilitySeries,
}

/// 가격 시계열 -> 이동평균, 변동성, 추세, 신호, 크로스오버, 적중률.
///
/// 윈도우 설정이 잘못된 경우에만 실패하고, 데이터 부족은 보고서 안의 값으로 표현한다.
pub fn analyze(prices: &[f64], params: &AnalysisConfig) -> Result<AnalysisReport, AnalysisError> {
  if params.short_window > params.long_window {
    return Err(AnalysisError::InvalidWindowOrdering {
      short: params.short_window,
      long: params.long_window,
    });
  }
  
  let short_ma = moving_average(prices, params.short_window)?;
  let long_ma = moving_average(prices, params.long_window)?;
  let volatility = volatility(prices, params.volatility_window)?;
  log::debug!("series lengths: prices={} short={} long={} volatility={}",
              prices.len(), short_ma.len(), long_ma.len(), volatility.len());
  
  let latest_volatility = volatility.last().unwrap_or(0.0);
  
  let trend = detect_trend(long_ma.values())
    .map_err(|e| log::debug!("trend unavailable: {}", e))
    .ok();
  let percent_change = percent_change(long_ma.values())
    .map_err(|e| log::debug!("trend strength unavailable: {}", e))
    .ok();
  let strength = percent_change.map(TrendStrength::from_percent_change);
  
  let signal = compose_signal(
    short_ma.values(),
    long_ma.values(),
    trend,
    latest_volatility,
    strength,
    params.min_volatility,
  );
  
  let crossovers = buy_sell(&short_ma, &long_ma)?;
  
  let (buys, sells) = (crossovers.buys(), crossovers.sells());
  let outcomes = evaluate_events(prices, &buys, &sells, params.lookahead);
  let accuracy = signal_accuracy(prices, &buys, &sells, params.lookahead);
  
  let aligned_outcomes = evaluate_events(
    prices,
    &crossovers.buy_price_indices(),
    &crossovers.sell_price_indices(),
    params.lookahead,
  );
  let aligned_accuracy = SignalAccuracy::from_outcomes(&aligned_outcomes, crossovers.len());
  
  Ok(AnalysisReport {
    params: *params,
    price_count: prices.len(),
    latest_price: prices.last().copied(),
    trend,
    strength,
    percent_change,
    latest_volatility,
    signal,
    events: crossovers.events().to_vec(),
    outcomes,
    accuracy,
    aligned_outcomes,
    aligned_accuracy,
    short_ma,
    long_ma,
    volatility,
  })
}

impl AnalysisReport {
  pub fn buy_events(&self) -> impl Iterator<Item = &CrossoverEvent> {
    self.events.iter().filter(|e| e.kind == crate::indicators::CrossoverKind::Buy)
  }
  
  pub fn sell_events(&self) -> impl Iterator<Item = &CrossoverEvent> {
    self.events.iter().filter(|e| e.kind == crate::indicators::CrossoverKind::Sell)
  }
  
  /// 콘솔 출력용 요약
  pub fn summary(&self) -> String {
    let trend = self.trend
      .map(|t| t.to_string())
      .unwrap_or_else(|| "Not enough data to determine trend".to_string());
    let strength = self.strength
      .map(|s| s.to_string())
      .unwrap_or_else(|| "Not enough data to determine trend strength".to_string());
    
    let mut lines = vec![
      format!("Market Trend: {}", trend),
      format!("Trend Strength: {}", strength),
      format!("Latest Volatility: {:.2}", math::round_to(self.latest_volatility, 2)),
      format!("Trading Signal: {}", self.signal),
      format!("Signal Accuracy (%): {}", self.accuracy),
    ];
    
    if let Some(price) = self.latest_price {
      lines.insert(0, format!("Current Price: {:.2}", price));
    }
    
    lines.join("\n")
  }
}
