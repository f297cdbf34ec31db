use serde::{Deserialize, Serialize};

/// OHLC 캔들. `timestamp`는 밀리초 단위 epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Candle {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }

    /// 종가만 있는 데이터용 (시가/고가/저가 = 종가)
    pub fn from_close(timestamp: i64, close: f64) -> Self {
        Candle::new(timestamp, close, close, close, close)
    }
}

/// 캔들 목록에서 종가 시계열 추출
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}
