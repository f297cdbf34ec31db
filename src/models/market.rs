use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// 분석 대상 시장 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    Crypto,
    Stock,
    Psx,
}

impl Market {
    /// 시장별로 허용되는 캔들 간격
    pub fn supported_intervals(&self) -> &'static [Interval] {
        match self {
            Market::Crypto => &[Interval::FourHours, Interval::OneDay, Interval::OneWeek, Interval::OneMonth],
            Market::Stock | Market::Psx => &[Interval::OneDay, Interval::FiveDays, Interval::OneWeek, Interval::OneMonth],
        }
    }

    pub fn default_interval(&self) -> Interval {
        Interval::OneDay
    }

    /// 문자열 간격을 이 시장 기준으로 해석
    pub fn parse_interval(&self, raw: &str) -> Result<Interval, AnalysisError> {
        self.supported_intervals()
            .iter()
            .copied()
            .find(|i| i.code(*self) == raw)
            .ok_or_else(|| AnalysisError::InvalidParameter(format!(
                "interval '{}' is not supported for {} market",
                raw, self
            )))
    }

    /// 심볼 정규화: 공백 제거, 대문자, PSX는 `.KA` 접미사
    pub fn normalize_symbol(&self, raw: &str) -> Result<String, AnalysisError> {
        let symbol = raw.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(AnalysisError::InvalidParameter("symbol must not be empty".to_string()));
        }

        match self {
            Market::Psx if !symbol.ends_with(".KA") => Ok(format!("{}.KA", symbol)),
            _ => Ok(symbol),
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Market::Crypto => write!(f, "crypto"),
            Market::Stock => write!(f, "stock"),
            Market::Psx => write!(f, "psx"),
        }
    }
}

impl FromStr for Market {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "crypto" => Ok(Market::Crypto),
            "stock" | "stocks" => Ok(Market::Stock),
            "psx" => Ok(Market::Psx),
            other => Err(AnalysisError::UnsupportedMarket(other.to_string())),
        }
    }
}

/// 캔들 간격. 거래소마다 표기가 달라 `code`로 변환한다
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    FourHours,
    OneDay,
    FiveDays,
    OneWeek,
    OneMonth,
}

impl Interval {
    /// 데이터 소스 API에서 쓰는 표기
    pub fn code(&self, market: Market) -> &'static str {
        match (self, market) {
            (Interval::FourHours, _) => "4h",
            (Interval::OneDay, _) => "1d",
            (Interval::FiveDays, _) => "5d",
            (Interval::OneWeek, Market::Crypto) => "1w",
            (Interval::OneWeek, _) => "1wk",
            (Interval::OneMonth, Market::Crypto) => "1M",
            (Interval::OneMonth, _) => "1mo",
        }
    }
}
