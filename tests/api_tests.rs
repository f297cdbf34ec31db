//! HTTP API 통합 테스트
//!
//! warp 테스트 클라이언트와 모의 가격 제공자로 라우트 검증

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use serde_json::{json, Value};
use warp::http::StatusCode;

use trendscope::api::{create_routes, AppState};
use trendscope::config::Config;
use trendscope::error::AnalysisError;
use trendscope::market_data::{MarketDataService, PriceProvider};
use trendscope::models::{Candle, Market};

mock! {
  pub Provider {}
  
  #[async_trait]
  impl PriceProvider for Provider {
    async fn fetch_candles(&self, symbol: &str, interval: &str) -> Result<Vec<Candle>, AnalysisError>;
  }
}

fn v_shaped_candles() -> Vec<Candle> {
  [10.0, 9.0, 8.0, 7.0, 6.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0]
    .iter()
    .enumerate()
    .map(|(i, p)| Candle::from_close(i as i64 * 86_400_000, *p))
    .collect()
}

fn state_with(market: Market, provider: MockProvider) -> AppState {
  let service = MarketDataService::new().with_provider(market, Arc::new(provider));
  AppState::new(Config::default(), service)
}

fn empty_state() -> AppState {
  AppState::new(Config::default(), MarketDataService::new())
}

fn body_json(body: &[u8]) -> Value {
  serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn test_health() {
  let routes = create_routes(empty_state());
  
  let res = warp::test::request().method("GET").path("/health").reply(&routes).await;
  
  assert_eq!(res.status(), StatusCode::OK);
  assert_eq!(body_json(res.body())["status"], "ok");
}

#[tokio::test]
async fn test_symbols_lists_catalog_and_intervals() {
  let routes = create_routes(empty_state());
  
  let res = warp::test::request().method("GET").path("/symbols").reply(&routes).await;
  
  assert_eq!(res.status(), StatusCode::OK);
  let body = body_json(res.body());
  assert_eq!(body["symbols"]["crypto"][0]["symbol"], "BTCUSDT");
  assert_eq!(body["markets"][0]["market"], "crypto");
  assert_eq!(body["defaults"]["short_window"], 7);
}

#[tokio::test]
async fn test_analyze_market_uses_provider() {
  let mut provider = MockProvider::new();
  provider
    .expect_fetch_candles()
    .withf(|symbol, interval| symbol == "BTCUSDT" && interval == "1d")
    .times(1)
    .returning(|_, _| Ok(v_shaped_candles()));
  
  let routes = create_routes(state_with(Market::Crypto, provider));
  
  let res = warp::test::request()
    .method("GET")
    .path("/analyze/crypto/btcusdt?short=3&long=10")
    .reply(&routes)
    .await;
  
  assert_eq!(res.status(), StatusCode::OK);
  let body = body_json(res.body());
  assert_eq!(body["symbol"], "BTCUSDT");
  assert_eq!(body["report"]["params"]["short_window"], 3);
  assert_eq!(body["report"]["price_count"], 13);
  assert_eq!(body["chart"]["candles"].as_array().map(Vec::len), Some(13));
}

#[tokio::test]
async fn test_analyze_market_rejects_unknown_market() {
  let routes = create_routes(empty_state());
  
  let res = warp::test::request().method("GET").path("/analyze/forex/EURUSD").reply(&routes).await;
  
  assert_eq!(res.status(), StatusCode::BAD_REQUEST);
  assert!(body_json(res.body())["error"].as_str().unwrap().contains("forex"));
}

#[tokio::test]
async fn test_analyze_market_rejects_out_of_range_window() {
  let mut provider = MockProvider::new();
  provider.expect_fetch_candles().times(0);
  
  let routes = create_routes(state_with(Market::Crypto, provider));
  
  let res = warp::test::request()
    .method("GET")
    .path("/analyze/crypto/BTCUSDT?short=25")
    .reply(&routes)
    .await;
  
  assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upstream_failure_maps_to_bad_gateway() {
  let mut provider = MockProvider::new();
  provider
    .expect_fetch_candles()
    .returning(|_, _| Err(AnalysisError::FetchError("connection refused".to_string())));
  
  let routes = create_routes(state_with(Market::Stock, provider));
  
  let res = warp::test::request().method("GET").path("/analyze/stock/AAPL").reply(&routes).await;
  
  assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
  assert!(body_json(res.body())["error"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn test_analyze_prices() {
  let routes = create_routes(empty_state());
  let prices: Vec<f64> = (1..=12).map(|p| p as f64).collect();
  
  let res = warp::test::request()
    .method("POST")
    .path("/analyze")
    .json(&json!({ "prices": prices, "short_window": 3, "long_window": 10 }))
    .reply(&routes)
    .await;
  
  assert_eq!(res.status(), StatusCode::OK);
  let body = body_json(res.body());
  assert_eq!(body["trend"], "Upward");
  assert_eq!(body["signal"], "STRONG BUY");
  assert_eq!(body["events"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_analyze_prices_rejects_bad_input() {
  let routes = create_routes(empty_state());
  
  let res = warp::test::request()
    .method("POST")
    .path("/analyze")
    .json(&json!({ "prices": [1.0, -2.0, 3.0] }))
    .reply(&routes)
    .await;
  assert_eq!(res.status(), StatusCode::BAD_REQUEST);
  
  let res = warp::test::request()
    .method("POST")
    .path("/analyze")
    .json(&json!({ "prices": [1.0, 2.0], "short_window": 15, "long_window": 12 }))
    .reply(&routes)
    .await;
  assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
