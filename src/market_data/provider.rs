use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;

use crate::config::DataSourceConfig;
use crate::error::AnalysisError;
use crate::models::{Candle, Interval, Market};
use super::binance::BinanceKlineProvider;
use super::csv_file::CsvPriceProvider;
use super::yahoo::YahooChartProvider;

/// 가격 데이터 제공자 인터페이스
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// 시간순으로 정렬된 캔들 조회. `interval`은 제공자 고유 표기
    async fn fetch_candles(&self, symbol: &str, interval: &str) -> Result<Vec<Candle>, AnalysisError>;
}

/// 정규화된 조회 결과
#[derive(Debug, Clone)]
pub struct FetchedSeries {
    pub market: Market,
    pub symbol: String,
    pub interval: Interval,
    pub candles: Vec<Candle>,
}

/// 시장별 데이터 제공자 관리자
#[derive(Clone, Default)]
pub struct MarketDataService {
    providers: HashMap<Market, Arc<dyn PriceProvider>>,
}

impl MarketDataService {
    pub fn new() -> Self {
        MarketDataService {
            providers: HashMap::new(),
        }
    }

    /// 설정에 따라 기본 제공자 구성: 암호화폐 -> Binance, 주식/PSX -> Yahoo.
    /// `csv_dir`가 있으면 모든 시장을 CSV 파일로 대체
    pub fn from_config(config: &DataSourceConfig) -> Result<Self, AnalysisError> {
        if let Some(dir) = &config.csv_dir {
            log::info!("CSV 데이터 디렉터리 사용: {}", dir);
            let csv: Arc<dyn PriceProvider> = Arc::new(CsvPriceProvider::new(dir));
            return Ok(MarketDataService::new()
                .with_provider(Market::Crypto, csv.clone())
                .with_provider(Market::Stock, csv.clone())
                .with_provider(Market::Psx, csv));
        }

        let binance = Arc::new(BinanceKlineProvider::new(
            &config.binance_base_url,
            config.kline_limit,
            config.request_timeout_ms,
        )?);
        let yahoo: Arc<dyn PriceProvider> = Arc::new(YahooChartProvider::new(
            &config.yahoo_base_url,
            &config.yahoo_range,
            config.request_timeout_ms,
        )?);

        Ok(MarketDataService::new()
            .with_provider(Market::Crypto, binance)
            .with_provider(Market::Stock, yahoo.clone())
            .with_provider(Market::Psx, yahoo))
    }

    /// 데이터 제공자 추가
    pub fn with_provider(mut self, market: Market, provider: Arc<dyn PriceProvider>) -> Self {
        self.providers.insert(market, provider);
        self
    }

    /// 심볼/간격을 검증한 뒤 캔들 조회
    pub async fn fetch(
        &self,
        market: Market,
        raw_symbol: &str,
        raw_interval: Option<&str>,
    ) -> Result<FetchedSeries, AnalysisError> {
        let symbol = market.normalize_symbol(raw_symbol)?;
        let interval = match raw_interval {
            Some(raw) => market.parse_interval(raw)?,
            None => market.default_interval(),
        };

        let provider = self
            .providers
            .get(&market)
            .ok_or_else(|| AnalysisError::UnsupportedMarket(market.to_string()))?;

        log::info!("가격 데이터 요청: {} {} ({})", market, symbol, interval.code(market));
        let mut candles = provider
            .fetch_candles(&symbol, interval.code(market))
            .await
            .map_err(|e| {
                log::warn!("가격 데이터 조회 실패 - {}: {}", symbol, e);
                e
            })?;

        let before = candles.len();
        candles.retain(|c| c.close.is_finite() && c.close > 0.0);
        if candles.len() < before {
            log::warn!("{}: 유효하지 않은 종가 {}개 제외", symbol, before - candles.len());
        }
        candles.sort_by_key(|c| c.timestamp);

        Ok(FetchedSeries {
            market,
            symbol,
            interval,
            candles,
        })
    }
}

/// JSON 값에서 숫자 추출 (문자열 숫자 포함)
pub(crate) fn value_as_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::String(s) => s.parse::<f64>().ok(),
        other => other.as_f64(),
    }
}
