use std::time::Duration;
use async_trait::async_trait;

use crate::error::AnalysisError;
use crate::models::Candle;
use super::provider::{value_as_f64, PriceProvider};

/// Binance spot klines REST connector
pub struct BinanceKlineProvider {
  pub base_url: String,
  pub limit: u32,
  http: reqwest::Client,
}

impl BinanceKlineProvider {
  pub fn new(base_url: impl Into<String>, limit: u32, timeout_ms: u64) -> Result<Self, AnalysisError> {
    let http = reqwest::Client::builder()
      .timeout(Duration::from_millis(timeout_ms))
      .build()
      .map_err(|e| AnalysisError::FetchError(format!("http client error: {}", e)))?;
    
    Ok(BinanceKlineProvider {
      base_url: base_url.into().trim_end_matches('/').to_string(),
      limit,
      http,
    })
  }
}

/// klines 응답 파싱: `[[open_time, "open", "high", "low", "close", ...], ...]`
pub fn parse_klines(body: &serde_json::Value) -> Result<Vec<Candle>, AnalysisError> {
  let rows = body
    .as_array()
    .ok_or_else(|| AnalysisError::ParseError("klines response is not an array".to_string()))?;
  
  rows
    .iter()
    .enumerate()
    .map(|(i, row)| {
      let cols = row
        .as_array()
        .filter(|cols| cols.len() >= 5)
        .ok_or_else(|| AnalysisError::ParseError(format!("kline row {} is malformed", i)))?;
      
      let timestamp = cols[0]
        .as_i64()
        .ok_or_else(|| AnalysisError::ParseError(format!("kline row {} has no open time", i)))?;
      let price = |idx: usize| {
        value_as_f64(&cols[idx])
          .ok_or_else(|| AnalysisError::ParseError(format!("kline row {} column {} is not a number", i, idx)))
      };
      
      Ok(Candle::new(timestamp, price(1)?, price(2)?, price(3)?, price(4)?))
    })
    .collect()
}

#[async_trait]
impl PriceProvider for BinanceKlineProvider {
  async fn fetch_candles(&self, symbol: &str, interval: &str) -> Result<Vec<Candle>, AnalysisError> {
    let url = format!("{}/api/v3/klines", self.base_url);
    let limit = self.limit.to_string();
    let res = self.http
      .get(url)
      .query(&[("symbol", symbol), ("interval", interval), ("limit", limit.as_str())])
      .send().await
      .map_err(|e| AnalysisError::FetchError(format!("klines http error: {}", e)))?;
    
    let status = res.status();
    if !status.is_success() {
      return Err(AnalysisError::FetchError(format!("klines request for {} failed: {}", symbol, status)));
    }
    
    let json = res.json::<serde_json::Value>().await
      .map_err(|e| AnalysisError::ParseError(format!("klines parse error: {}", e)))?;
    parse_klines(&json)
  }
}
