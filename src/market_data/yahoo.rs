use std::time::Duration;
use async_trait::async_trait;
use serde::Deserialize;

use crate::error::AnalysisError;
use crate::models::Candle;
use super::provider::PriceProvider;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; trendscope/0.1)";

/// Yahoo Finance chart API connector (주식, PSX)
pub struct YahooChartProvider {
  pub base_url: String,
  pub range: String,
  http: reqwest::Client,
}

impl YahooChartProvider {
  pub fn new(base_url: impl Into<String>, range: impl Into<String>, timeout_ms: u64) -> Result<Self, AnalysisError> {
    let http = reqwest::Client::builder()
      .timeout(Duration::from_millis(timeout_ms))
      .user_agent(USER_AGENT)
      .build()
      .map_err(|e| AnalysisError::FetchError(format!("http client error: {}", e)))?;
    
    Ok(YahooChartProvider {
      base_url: base_url.into().trim_end_matches('/').to_string(),
      range: range.into(),
      http,
    })
  }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
  chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
  result: Option<Vec<ChartResult>>,
  error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
  code: String,
  description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
  #[serde(default)]
  timestamp: Vec<i64>,
  indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
  quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
  #[serde(default)]
  open: Vec<Option<f64>>,
  #[serde(default)]
  high: Vec<Option<f64>>,
  #[serde(default)]
  low: Vec<Option<f64>>,
  #[serde(default)]
  close: Vec<Option<f64>>,
}

/// chart 응답 파싱. 타임스탬프는 초 단위 -> 밀리초로 변환하고
/// OHLC 중 하나라도 비어 있는 행은 버린다
pub fn parse_chart(body: &str) -> Result<Vec<Candle>, AnalysisError> {
  let response: ChartResponse = serde_json::from_str(body)
    .map_err(|e| AnalysisError::ParseError(format!("chart parse error: {}", e)))?;
  
  if let Some(err) = response.chart.error {
    return Err(AnalysisError::FetchError(format!("{}: {}", err.code, err.description)));
  }
  
  let result = response
    .chart
    .result
    .and_then(|mut r| if r.is_empty() { None } else { Some(r.swap_remove(0)) })
    .ok_or_else(|| AnalysisError::ParseError("chart response has no result".to_string()))?;
  
  let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
  
  fn at(column: &[Option<f64>], i: usize) -> Option<f64> {
    column.get(i).copied().flatten()
  }
  
  let candles = result
    .timestamp
    .iter()
    .enumerate()
    .filter_map(|(i, ts)| {
      Some(Candle::new(
        ts * 1000,
        at(&quote.open, i)?,
        at(&quote.high, i)?,
        at(&quote.low, i)?,
        at(&quote.close, i)?,
      ))
    })
    .collect();
  
  Ok(candles)
}

#[async_trait]
impl PriceProvider for YahooChartProvider {
  async fn fetch_candles(&self, symbol: &str, interval: &str) -> Result<Vec<Candle>, AnalysisError> {
    let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
    let res = self.http
      .get(url)
      .query(&[("range", self.range.as_str()), ("interval", interval)])
      .send().await
      .map_err(|e| AnalysisError::FetchError(format!("chart http error: {}", e)))?;
    
    let status = res.status();
    let body = res.text().await
      .map_err(|e| AnalysisError::FetchError(format!("chart body error: {}", e)))?;
    
    // 404 등에서도 error 필드가 채워져 오므로 먼저 파싱 시도
    match parse_chart(&body) {
      Ok(candles) if status.is_success() => Ok(candles),
      Ok(_) => Err(AnalysisError::FetchError(format!("chart request for {} failed: {}", symbol, status))),
      Err(e) => Err(e),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  
  #[test]
  fn test_parse_chart_drops_incomplete_rows() {
    let body = r#"{
      "chart": {
        "result": [{
          "meta": { "symbol": "TSLA" },
          "timestamp": [1700000000, 1700086400, 1700172800],
          "indicators": {
            "quote": [{
              "open":  [200.0, null, 210.0],
              "high":  [205.0, 209.0, 215.0],
              "low":   [198.0, 201.0, 207.5],
              "close": [204.0, 207.0, 214.0],
              "volume": [1, 2, 3]
            }]
          }
        }],
        "error": null
      }
    }"#;
    
    let candles = parse_chart(body).unwrap();
    assert_eq!(candles.len(), 2);
    assert_eq!(candles[0], Candle::new(1_700_000_000_000, 200.0, 205.0, 198.0, 204.0));
    assert_eq!(candles[1].timestamp, 1_700_172_800_000);
  }
  
  #[test]
  fn test_parse_chart_error_field() {
    let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
    assert!(matches!(parse_chart(body), Err(AnalysisError::FetchError(_))));
  }
  
  #[test]
  fn test_parse_chart_garbage() {
    assert!(matches!(parse_chart("<html>"), Err(AnalysisError::ParseError(_))));
    assert!(matches!(
      parse_chart(r#"{"chart":{"result":[],"error":null}}"#),
      Err(AnalysisError::ParseError(_))
    ));
  }
}
