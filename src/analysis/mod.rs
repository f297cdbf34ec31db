/**
* filename : mod
* author : HAMA
* date: 2025. 5. 12.
* description: 
**/

pub mod pipeline;
pub mod chart;
pub mod export;

pub use pipeline::{analyze, AnalysisReport};
pub use chart::{ChartMarker, ChartOverlay, LinePoint, MaLine};
pub use export::export_csv;

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::models::{closes, Candle};

/// 심볼 단위 분석 결과 (지표 + 차트 데이터)
#[derive(Debug, Clone, Serialize)]
pub struct MarketAnalysis {
  pub symbol: String,
  pub report: AnalysisReport,
  pub chart: ChartOverlay,
}

/// 캔들 데이터의 종가로 분석하고 차트 오버레이까지 구성
pub fn analyze_candles(
  symbol: &str,
  candles: &[Candle],
  params: &AnalysisConfig,
) -> Result<MarketAnalysis, AnalysisError> {
  let prices = closes(candles);
  let report = analyze(&prices, params)?;
  let chart = ChartOverlay::build(candles, &report.short_ma, &report.long_ma, &report.events);

  Ok(MarketAnalysis {
    symbol: symbol.to_string(),
    report,
    chart,
  })
}
