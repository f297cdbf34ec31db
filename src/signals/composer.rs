/**
* filename : composer
* author : HAMA
* date: 2025. 5. 11.
* description: 
**/

use std::cmp::Ordering;

use crate::indicators::{Trend, TrendStrength};
use super::signal_types::TradingSignal;

/// 변동성이 이 값보다 작으면 거래하지 않음
pub const DEFAULT_MIN_VOLATILITY: f64 = 1.0;

/// 최신 이동평균 관계, 추세, 강도, 변동성을 하나의 매매 신호로 결합.
///
/// 우선순위: 데이터 부족 > 저변동성 > 아래 결정표.
///
/// | 단기 vs 장기 | 추세     | 강도   | 신호        |
/// |-------------|----------|--------|-------------|
/// | 위          | Upward   | Strong | STRONG BUY  |
/// | 위          | Upward   | 그 외  | WEAK BUY    |
/// | 아래        | Downward | Strong | STRONG SELL |
/// | 아래        | Downward | 그 외  | WEAK SELL   |
/// | 그 외 조합  |          |        | HOLD        |
///
/// 추세나 강도를 구할 수 없으면 `None`으로 넘긴다.
pub fn compose_signal(
  short_ma: &[f64],
  long_ma: &[f64],
  trend: Option<Trend>,
  volatility: f64,
  strength: Option<TrendStrength>,
  min_volatility: f64,
) -> TradingSignal {
  let (short, long) = match (short_ma.last(), long_ma.last()) {
    (Some(short), Some(long)) => (*short, *long),
    _ => return TradingSignal::InsufficientData,
  };
  
  if volatility < min_volatility {
    return TradingSignal::NoTrade;
  }
  
  let strong = strength == Some(TrendStrength::Strong);
  
  match (short.partial_cmp(&long), trend, strong) {
    (Some(Ordering::Greater), Some(Trend::Upward), true) => TradingSignal::StrongBuy,
    (Some(Ordering::Greater), Some(Trend::Upward), false) => TradingSignal::WeakBuy,
    (Some(Ordering::Less), Some(Trend::Downward), true) => TradingSignal::StrongSell,
    (Some(Ordering::Less), Some(Trend::Downward), false) => TradingSignal::WeakSell,
    _ => TradingSignal::Hold,
  }
}
