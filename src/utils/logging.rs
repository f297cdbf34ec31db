//! 로깅 유틸리티
//!
//! 로그 초기화 및 유틸리티 함수 제공

use env_logger::Builder;
use log::{Level, LevelFilter};
use std::env;

use crate::analysis::AnalysisReport;
use crate::error::AnalysisError;

/// 로깅 시스템 초기화. `RUST_LOG`가 있으면 설정 파일 레벨보다 우선
pub fn init(default_level: &str) -> Result<(), AnalysisError> {
    let mut builder = Builder::from_default_env();
    
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());
    
    // 로그 레벨 파싱
    let level_filter = match log_level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    };
    
    builder
      .filter_level(level_filter)
      .format_timestamp_millis()
      .try_init()
      .map_err(|e| AnalysisError::ConfigError(format!("Failed to initialise logger: {}", e)))?;
    
    log::info!("로깅 시스템 초기화 완료: 레벨 = {}", log_level);
    
    Ok(())
}

/// 분석 결과 요약 로그. 매매 신호가 없으면 debug 레벨
pub fn log_analysis_summary(symbol: &str, report: &AnalysisReport) {
    log::log!(summary_level(report), "분석 완료: {} - 신호: {} - 크로스오버: {} - 적중률: {}",
              symbol, report.signal, report.events.len(), report.accuracy);
}

fn summary_level(report: &AnalysisReport) -> Level {
    if report.signal.is_actionable() {
        Level::Info
    } else {
        Level::Debug
    }
}

/// 오류 로그
pub fn log_error(context: &str, error: &AnalysisError) {
    log::error!("오류 발생 - {}: {}", context, error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::config::AnalysisConfig;

    #[test]
    fn test_summary_level_follows_signal() {
        let params = AnalysisConfig { short_window: 3, long_window: 5, ..AnalysisConfig::default() };

        let rising: Vec<f64> = (1..=10).map(|p| p as f64).collect();
        let report = analyze(&rising, &params).unwrap();
        assert!(report.signal.is_buy());
        assert_eq!(summary_level(&report), Level::Info);

        let flat = analyze(&[50.0; 10], &params).unwrap();
        assert!(!flat.signal.is_actionable());
        assert_eq!(summary_level(&flat), Level::Debug);
    }
}
