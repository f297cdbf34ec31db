//! 시간 관련 유틸리티
//!
//! 시간 변환, 포맷팅 함수 제공

pub mod logging;
pub mod math;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// 타임스탬프(밀리초)를 DateTime<Utc>로 변환
pub fn timestamp_to_datetime(timestamp_ms: i64) -> DateTime<Utc> {
  Utc.timestamp_millis_opt(timestamp_ms).single().unwrap_or_default()
}

/// 타임스탬프(밀리초)를 포맷팅된 문자열로 변환
pub fn format_timestamp(timestamp_ms: i64, format: &str) -> String {
  let dt = timestamp_to_datetime(timestamp_ms);
  dt.format(format).to_string()
}

/// `YYYY-MM-DD` 날짜를 해당일 00:00 UTC 타임스탬프(밀리초)로 변환
pub fn date_to_timestamp_ms(date: &str) -> Option<i64> {
  let naive = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
  let midnight = naive.and_hms_opt(0, 0, 0)?;
  Some(Utc.from_utc_datetime(&midnight).timestamp_millis())
}

#[cfg(test)]
mod tests {
  use super::*;
  
  #[test]
  fn test_timestamp_conversion() {
    let ts = 1_700_000_000_123;
    let dt = timestamp_to_datetime(ts);
    assert_eq!(dt.timestamp_millis(), ts);
    assert_eq!(format_timestamp(0, "%Y-%m-%d"), "1970-01-01");
  }
  
  #[test]
  fn test_date_parsing() {
    assert_eq!(date_to_timestamp_ms("1970-01-02"), Some(86_400_000));
    assert_eq!(date_to_timestamp_ms("2024-02-30"), None);
    assert_eq!(date_to_timestamp_ms("not a date"), None);
  }
}
