/**
* filename : signal_types
* author : HAMA
* date: 2025. 5. 11.
* description: 
**/

use std::fmt;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradingSignal {
  StrongBuy,         // 상승 추세 + 강한 강도
  WeakBuy,           // 상승 추세 + 약하거나 보통 강도
  StrongSell,        // 하락 추세 + 강한 강도
  WeakSell,          // 하락 추세 + 약하거나 보통 강도
  Hold,              // 이동평균 관계와 추세가 엇갈림
  NoTrade,           // 변동성이 최소 기준 미만
  InsufficientData,  // 이동평균이 비어 있음
}

impl TradingSignal {
  pub fn label(&self) -> &'static str {
    match self {
      TradingSignal::StrongBuy => "STRONG BUY",
      TradingSignal::WeakBuy => "WEAK BUY",
      TradingSignal::StrongSell => "STRONG SELL",
      TradingSignal::WeakSell => "WEAK SELL",
      TradingSignal::Hold => "HOLD",
      TradingSignal::NoTrade => "NO TRADE (Low Volatility)",
      TradingSignal::InsufficientData => "Not enough data for signal",
    }
  }
  
  // 신호가 매수 방향인지 확인
  pub fn is_buy(&self) -> bool {
    matches!(self, TradingSignal::StrongBuy | TradingSignal::WeakBuy)
  }
  
  // 신호가 매도 방향인지 확인
  pub fn is_sell(&self) -> bool {
    matches!(self, TradingSignal::StrongSell | TradingSignal::WeakSell)
  }
  
  pub fn is_actionable(&self) -> bool {
    self.is_buy() || self.is_sell()
  }
}

impl fmt::Display for TradingSignal {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.label())
  }
}

impl Serialize for TradingSignal {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.label())
  }
}
