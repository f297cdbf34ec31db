/**
* filename : trend
* author : HAMA
* date: 2025. 5. 11.
* description: 
**/

use std::fmt;
use serde::Serialize;

use crate::error::AnalysisError;
use crate::utils::math;

/// 변화율이 이 값(%) 미만이면 약한 추세
pub const WEAK_TREND_THRESHOLD: f64 = 0.3;
/// 변화율이 이 값(%) 미만이면 보통 추세, 이상이면 강한 추세
pub const STRONG_TREND_THRESHOLD: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
  Upward,
  Downward,
  Sideways,
}

impl fmt::Display for Trend {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      Trend::Upward => "Upward Trend",
      Trend::Downward => "Downward Trend",
      Trend::Sideways => "Sideways",
    };
    write!(f, "{}", label)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendStrength {
  Weak,
  Moderate,
  Strong,
}

impl TrendStrength {
  /// 변화율(%)을 강도 구간으로 분류
  pub fn from_percent_change(change_percent: f64) -> Self {
    match change_percent {
      c if c < WEAK_TREND_THRESHOLD => TrendStrength::Weak,
      c if c < STRONG_TREND_THRESHOLD => TrendStrength::Moderate,
      _ => TrendStrength::Strong,
    }
  }
}

impl fmt::Display for TrendStrength {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      TrendStrength::Weak => "Weak Trend",
      TrendStrength::Moderate => "Moderate Trend",
      TrendStrength::Strong => "Strong Trend",
    };
    write!(f, "{}", label)
  }
}

fn last_two(averages: &[f64], what: &str) -> Result<(f64, f64), AnalysisError> {
  match averages {
    [.., previous, last] => Ok((*previous, *last)),
    _ => Err(AnalysisError::InsufficientData(format!(
      "{} needs at least 2 averages, got {}",
      what,
      averages.len()
    ))),
  }
}

/// 마지막 두 이동평균 값을 비교해 추세 방향 판정
pub fn detect_trend(averages: &[f64]) -> Result<Trend, AnalysisError> {
  let (previous, last) = last_two(averages, "trend")?;
  
  let trend = if last > previous {
    Trend::Upward
  } else if last < previous {
    Trend::Downward
  } else {
    Trend::Sideways
  };
  
  Ok(trend)
}

/// 마지막 두 이동평균 값 사이의 절대 변화율(%)
pub fn percent_change(averages: &[f64]) -> Result<f64, AnalysisError> {
  let (previous, last) = last_two(averages, "trend strength")?;
  
  math::absolute_percent_change(previous, last).ok_or_else(|| {
    AnalysisError::DivisionByZero("previous moving average is zero".to_string())
  })
}

/// 추세 강도 분류: < 0.3% 약함, < 1.0% 보통, 그 이상 강함
pub fn trend_strength(averages: &[f64]) -> Result<TrendStrength, AnalysisError> {
  percent_change(averages).map(TrendStrength::from_percent_change)
}

#[cfg(test)]
mod tests {
  use super::*;
  use rstest::rstest;
  
  #[rstest]
  #[case(&[1.0, 2.0, 3.0], Trend::Upward)]
  #[case(&[3.0, 2.0, 1.0], Trend::Downward)]
  #[case(&[2.0, 2.0], Trend::Sideways)]
  #[case(&[5.0, 1.0, 1.5], Trend::Upward)]
  fn test_detect_trend(#[case] averages: &[f64], #[case] expected: Trend) {
    assert_eq!(detect_trend(averages).unwrap(), expected);
    // 같은 입력이면 같은 결과
    assert_eq!(detect_trend(averages).unwrap(), expected);
  }
  
  #[test]
  fn test_detect_trend_needs_two_points() {
    assert!(matches!(detect_trend(&[]), Err(AnalysisError::InsufficientData(_))));
    assert!(matches!(detect_trend(&[1.0]), Err(AnalysisError::InsufficientData(_))));
  }
  
  #[rstest]
  #[case(&[100.0, 100.2], TrendStrength::Weak)]
  #[case(&[100.0, 99.75], TrendStrength::Weak)]
  #[case(&[100.0, 100.5], TrendStrength::Moderate)]
  #[case(&[100.0, 98.0], TrendStrength::Strong)]
  #[case(&[100.0, 103.0], TrendStrength::Strong)]
  fn test_trend_strength(#[case] averages: &[f64], #[case] expected: TrendStrength) {
    assert_eq!(trend_strength(averages).unwrap(), expected);
  }
  
  #[test]
  fn test_strength_thresholds_are_half_open() {
    assert_eq!(TrendStrength::from_percent_change(0.29), TrendStrength::Weak);
    assert_eq!(TrendStrength::from_percent_change(0.3), TrendStrength::Moderate);
    assert_eq!(TrendStrength::from_percent_change(0.99), TrendStrength::Moderate);
    assert_eq!(TrendStrength::from_percent_change(1.0), TrendStrength::Strong);
  }
  
  #[test]
  fn test_trend_strength_guards() {
    assert!(matches!(trend_strength(&[3.0]), Err(AnalysisError::InsufficientData(_))));
    assert!(matches!(
      trend_strength(&[1.0, 0.0, 2.0]),
      Err(AnalysisError::DivisionByZero(_))
    ));
  }
  
  #[test]
  fn test_labels() {
    assert_eq!(Trend::Upward.to_string(), "Upward Trend");
    assert_eq!(TrendStrength::Moderate.to_string(), "Moderate Trend");
  }
}
