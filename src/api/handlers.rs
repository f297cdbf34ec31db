// 분석 API 핸들러들

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use warp::http::StatusCode;
use warp::reply::{json, with_status, Json, Reply, WithStatus};

use crate::analysis::{analyze, analyze_candles, MarketAnalysis};
use crate::config::{AnalysisConfig, Config, SymbolCatalog};
use crate::error::AnalysisError;
use crate::market_data::MarketDataService;
use crate::models::Market;
use crate::utils::logging;

/// 핸들러가 공유하는 읽기 전용 상태
#[derive(Clone)]
pub struct AppState {
  pub config: Arc<Config>,
  pub market_data: Arc<MarketDataService>,
}

impl AppState {
  pub fn new(config: Config, market_data: MarketDataService) -> Self {
    AppState {
      config: Arc::new(config),
      market_data: Arc::new(market_data),
    }
  }
}

#[derive(Debug, Serialize)]
struct Health {
  status: &'static str,
  version: &'static str,
}

#[derive(Debug, Serialize)]
struct MarketIntervals {
  market: Market,
  intervals: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct SymbolsResponse<'a> {
  symbols: &'a SymbolCatalog,
  markets: Vec<MarketIntervals>,
  defaults: AnalysisConfig,
}

/// 심볼 분석 쿼리 (`?interval=1d&short=7&long=14`)
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeQuery {
  pub interval: Option<String>,
  pub short: Option<usize>,
  pub long: Option<usize>,
}

/// 가격 배열 직접 분석 요청 모델
#[derive(Debug, Deserialize)]
pub struct AnalyzePricesRequest {
  pub prices: Vec<f64>,
  pub short_window: Option<usize>,
  pub long_window: Option<usize>,
  pub volatility_window: Option<usize>,
  pub lookahead: Option<usize>,
  pub min_volatility: Option<f64>,
}

impl AnalyzePricesRequest {
  fn params(&self, defaults: AnalysisConfig) -> AnalysisConfig {
    let mut params = defaults.with_windows(self.short_window, self.long_window);
    if let Some(window) = self.volatility_window {
      params.volatility_window = window;
    }
    if let Some(lookahead) = self.lookahead {
      params.lookahead = lookahead;
    }
    if let Some(min_volatility) = self.min_volatility {
      params.min_volatility = min_volatility;
    }
    params
  }
}

/// 오류 -> HTTP 상태 코드
fn status_for(error: &AnalysisError) -> StatusCode {
  if error.is_client_error() {
    StatusCode::BAD_REQUEST
  } else if error.is_upstream_error() {
    StatusCode::BAD_GATEWAY
  } else {
    StatusCode::INTERNAL_SERVER_ERROR
  }
}

fn error_reply(context: &str, error: &AnalysisError) -> WithStatus<Json> {
  let status = status_for(error);
  if status.is_server_error() {
    logging::log_error(context, error);
  } else {
    log::warn!("요청 거부 - {}: {}", context, error);
  }
  
  let body = serde_json::json!({ "error": error.to_string() });
  with_status(json(&body), status)
}

/// 헬스체크 핸들러
pub async fn health_handler() -> Result<impl Reply, warp::Rejection> {
  Ok(json(&Health { status: "ok", version: crate::VERSION }))
}

/// 기본 심볼 목록 및 시장별 간격 조회 핸들러
pub async fn list_symbols(state: AppState) -> Result<impl Reply, warp::Rejection> {
  let markets = [Market::Crypto, Market::Stock, Market::Psx]
    .iter()
    .map(|m| MarketIntervals {
      market: *m,
      intervals: m.supported_intervals().iter().map(|i| i.code(*m)).collect(),
    })
    .collect();
  
  let response = SymbolsResponse {
    symbols: &state.config.symbols,
    markets,
    defaults: state.config.analysis,
  };
  
  Ok(with_status(json(&response), StatusCode::OK))
}

async fn run_market_analysis(
  market: &str,
  symbol: &str,
  query: &AnalyzeQuery,
  state: &AppState,
) -> Result<MarketAnalysis, AnalysisError> {
  let market: Market = market.parse()?;
  let params = state.config.analysis.with_windows(query.short, query.long);
  params.validate()?;
  
  let fetched = state
    .market_data
    .fetch(market, symbol, query.interval.as_deref())
    .await?;
  
  let analysis = analyze_candles(&fetched.symbol, &fetched.candles, &params)?;
  logging::log_analysis_summary(&fetched.symbol, &analysis.report);
  Ok(analysis)
}

/// 시장 데이터를 조회해 분석하는 핸들러
pub async fn analyze_market(
  market: String,
  symbol: String,
  query: AnalyzeQuery,
  state: AppState,
) -> Result<impl Reply, warp::Rejection> {
  match run_market_analysis(&market, &symbol, &query, &state).await {
    Ok(analysis) => Ok(with_status(json(&analysis), StatusCode::OK)),
    Err(e) => Ok(error_reply(&format!("analyze {}/{}", market, symbol), &e)),
  }
}

fn validate_prices(prices: &[f64]) -> Result<(), AnalysisError> {
  match prices.iter().position(|p| !p.is_finite() || *p <= 0.0) {
    Some(i) => Err(AnalysisError::InvalidParameter(format!(
      "price at index {} must be a positive number",
      i
    ))),
    None => Ok(()),
  }
}

/// 가격 배열을 직접 분석하는 핸들러
pub async fn analyze_prices(
  req: AnalyzePricesRequest,
  state: AppState,
) -> Result<impl Reply, warp::Rejection> {
  let params = req.params(state.config.analysis);
  
  let result = params
    .validate()
    .and_then(|_| validate_prices(&req.prices))
    .and_then(|_| analyze(&req.prices, &params));
  
  match result {
    Ok(report) => Ok(with_status(json(&report), StatusCode::OK)),
    Err(e) => Ok(error_reply("analyze prices", &e)),
  }
}
