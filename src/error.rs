/**
* filename : error
* author : HAMA
* date: 2025. 5. 8.
* description: 
**/

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid window size {window}: must be at least {minimum}")]
    InvalidWindow { window: usize, minimum: usize },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid window ordering: short window {short} exceeds long window {long}")]
    InvalidWindowOrdering { short: usize, long: usize },

    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unsupported market: {0}")]
    UnsupportedMarket(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Fetch error: {0}")]
    FetchError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl AnalysisError {
    /// 호출자 입력 문제인지 (HTTP 400으로 응답할 오류인지) 확인
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::InvalidWindow { .. }
                | AnalysisError::InvalidWindowOrdering { .. }
                | AnalysisError::InvalidParameter(_)
                | AnalysisError::UnsupportedMarket(_)
        )
    }

    /// 외부 데이터 소스에서 발생한 오류인지 확인
    pub fn is_upstream_error(&self) -> bool {
        matches!(self, AnalysisError::FetchError(_) | AnalysisError::ParseError(_))
    }
}
