/**
* filename : config
* author : HAMA
* date: 2025. 5. 8.
* description: 
**/

use std::ops::RangeInclusive;
use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::backtest::DEFAULT_LOOKAHEAD;
use crate::error::AnalysisError;
use crate::signals::DEFAULT_MIN_VOLATILITY;

/// 단기 이동평균으로 허용하는 윈도우 범위
pub const SHORT_WINDOW_RANGE: RangeInclusive<usize> = 3..=20;
/// 장기 이동평균으로 허용하는 윈도우 범위
pub const LONG_WINDOW_RANGE: RangeInclusive<usize> = 10..=50;

const ENV_PREFIX: &str = "TRENDSCOPE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub analysis: AnalysisConfig,
    pub data_sources: DataSourceConfig,
    pub symbols: SymbolCatalog,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

/// 분석 파이프라인 파라미터
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub short_window: usize,
    pub long_window: usize,
    pub volatility_window: usize,
    pub lookahead: usize,
    pub min_volatility: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSourceConfig {
    pub binance_base_url: String,
    pub yahoo_base_url: String,
    pub kline_limit: u32,
    pub yahoo_range: String,
    /// 설정되면 모든 시장을 `{csv_dir}/{SYMBOL}_Prices.csv` 파일에서 읽음
    pub csv_dir: Option<String>,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoSymbol {
    pub name: String,
    pub symbol: String,
}

/// 화면에 기본으로 노출할 심볼 목록
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolCatalog {
    pub crypto: Vec<CryptoSymbol>,
    pub stock: Vec<String>,
    pub psx: Vec<String>,
}

impl Config {
    /// 작업 디렉터리의 `config.{json,toml,yaml}` (선택)과 `TRENDSCOPE__*` 환경변수로 설정 로드
    pub fn load() -> Result<Self, AnalysisError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false));
        Self::build(builder)
    }

    /// 지정한 파일에서 설정 로드 (환경변수가 파일 값을 덮어씀)
    pub fn load_from(path: &Path) -> Result<Self, AnalysisError> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path).required(true));
        Self::build(builder)
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, AnalysisError> {
        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AnalysisError::ConfigError(format!("Failed to read configuration: {}", e)))?;

        let cfg: Config = settings
            .try_deserialize()
            .map_err(|e| AnalysisError::ConfigError(format!("Failed to parse configuration: {}", e)))?;

        cfg.analysis.validate()?;
        Ok(cfg)
    }
}

impl AnalysisConfig {
    /// 허용 범위 검사
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !SHORT_WINDOW_RANGE.contains(&self.short_window) {
            return Err(AnalysisError::InvalidParameter(format!(
                "short_window {} is outside {}..={}",
                self.short_window,
                SHORT_WINDOW_RANGE.start(),
                SHORT_WINDOW_RANGE.end()
            )));
        }
        if !LONG_WINDOW_RANGE.contains(&self.long_window) {
            return Err(AnalysisError::InvalidParameter(format!(
                "long_window {} is outside {}..={}",
                self.long_window,
                LONG_WINDOW_RANGE.start(),
                LONG_WINDOW_RANGE.end()
            )));
        }
        if self.short_window > self.long_window {
            return Err(AnalysisError::InvalidWindowOrdering {
                short: self.short_window,
                long: self.long_window,
            });
        }
        if self.volatility_window < 2 {
            return Err(AnalysisError::InvalidWindow {
                window: self.volatility_window,
                minimum: 2,
            });
        }
        if self.lookahead == 0 {
            return Err(AnalysisError::InvalidParameter("lookahead must be at least 1".to_string()));
        }
        if !self.min_volatility.is_finite() || self.min_volatility < 0.0 {
            return Err(AnalysisError::InvalidParameter(format!(
                "min_volatility {} must be a non-negative number",
                self.min_volatility
            )));
        }

        Ok(())
    }

    /// 요청별 윈도우 값 적용
    pub fn with_windows(mut self, short_window: Option<usize>, long_window: Option<usize>) -> Self {
        if let Some(short) = short_window {
            self.short_window = short;
        }
        if let Some(long) = long_window {
            self.long_window = long;
        }
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3030,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            short_window: 7,
            long_window: 14,
            volatility_window: 5,
            lookahead: DEFAULT_LOOKAHEAD,
            min_volatility: DEFAULT_MIN_VOLATILITY,
        }
    }
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        DataSourceConfig {
            binance_base_url: "https://api.binance.com".to_string(),
            yahoo_base_url: "https://query1.finance.yahoo.com".to_string(),
            kline_limit: 1000,
            yahoo_range: "max".to_string(),
            csv_dir: None,
            request_timeout_ms: 10_000,
        }
    }
}

impl Default for SymbolCatalog {
    fn default() -> Self {
        let crypto = [
            ("Bitcoin (BTC)", "BTCUSDT"),
            ("Ethereum (ETH)", "ETHUSDT"),
            ("Binance Coin (BNB)", "BNBUSDT"),
            ("Solana (SOL)", "SOLUSDT"),
        ]
        .iter()
        .map(|(name, symbol)| CryptoSymbol {
            name: name.to_string(),
            symbol: symbol.to_string(),
        })
        .collect();

        let to_vec = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        SymbolCatalog {
            crypto,
            stock: to_vec(&["TSLA", "AAPL", "MSFT", "GOOGL", "NVDA"]),
            psx: to_vec(&["PPL.KA", "HUBC.KA", "HBL.KA", "UBL.KA", "ENGRO.KA"]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_analysis_config_is_valid() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.short_window, 7);
        assert_eq!(cfg.long_window, 14);
        assert_eq!(cfg.volatility_window, 5);
        assert_eq!(cfg.lookahead, 3);
        assert_eq!(cfg.min_volatility, 1.0);
        assert!(cfg.validate().is_ok());
    }

    #[rstest]
    #[case(2, 14)]
    #[case(21, 30)]
    #[case(7, 9)]
    #[case(7, 51)]
    fn test_windows_outside_range_are_rejected(#[case] short: usize, #[case] long: usize) {
        let cfg = AnalysisConfig::default().with_windows(Some(short), Some(long));
        assert!(matches!(cfg.validate(), Err(AnalysisError::InvalidParameter(_))));
    }

    #[test]
    fn test_short_above_long_is_rejected() {
        let cfg = AnalysisConfig::default().with_windows(Some(20), Some(12));
        assert!(matches!(cfg.validate(), Err(AnalysisError::InvalidWindowOrdering { .. })));
    }

    #[test]
    fn test_other_parameters_are_checked() {
        let cfg = AnalysisConfig { volatility_window: 1, ..AnalysisConfig::default() };
        assert!(matches!(cfg.validate(), Err(AnalysisError::InvalidWindow { .. })));

        let cfg = AnalysisConfig { lookahead: 0, ..AnalysisConfig::default() };
        assert!(cfg.validate().is_err());

        let cfg = AnalysisConfig { min_volatility: -1.0, ..AnalysisConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_load_from_file_keeps_defaults_for_missing_keys() {
        let path = std::env::temp_dir().join(format!("trendscope-config-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{ "server": { "port": 8088 }, "analysis": { "short_window": 5 } }"#,
        )
        .unwrap();

        let cfg = Config::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(cfg.server.port, 8088);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.analysis.short_window, 5);
        assert_eq!(cfg.analysis.long_window, 14);
        assert_eq!(cfg.symbols.stock.len(), 5);
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let path = std::env::temp_dir().join("trendscope-does-not-exist.json");
        assert!(matches!(Config::load_from(&path), Err(AnalysisError::ConfigError(_))));
    }
}
