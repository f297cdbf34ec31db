//! 이동평균 기반 추세 분석 라이브러리
//!
//! 가격 시계열에서 이동평균, 변동성, 추세 강도, 교차 신호를 계산하고
//! 신호 정확도를 사후 검증합니다.

pub mod analysis;
pub mod api;
pub mod backtest;
pub mod config;
pub mod error;
pub mod indicators;
pub mod market_data;
pub mod models;
pub mod signals;
pub mod utils;

// 핵심 타입 재노출
pub use crate::analysis::{analyze, analyze_candles, AnalysisReport, MarketAnalysis};
pub use crate::config::{AnalysisConfig, Config};
pub use crate::error::AnalysisError;
pub use crate::indicators::{CrossoverKind, Trend, TrendStrength};
pub use crate::models::{Candle, Market};
pub use crate::signals::TradingSignal;

/// 버전 정보
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 결과 타입 별칭
pub type Result<T> = std::result::Result<T, AnalysisError>;
