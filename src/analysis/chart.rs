/**
* filename : chart
* author : HAMA
* date: 2025. 5. 12.
* description: 
**/

use serde::Serialize;

use crate::indicators::{CrossoverEvent, CrossoverKind, MovingAverageSeries};
use crate::models::Candle;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePoint {
  pub timestamp: i64,
  pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartMarker {
  pub timestamp: i64,
  /// 매수는 캔들 저가, 매도는 캔들 고가에 표시
  pub price: f64,
  pub kind: CrossoverKind,
  pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaLine {
  pub label: String,
  pub points: Vec<LinePoint>,
}

/// 캔들 차트 위에 그릴 이동평균선과 매수/매도 표시
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOverlay {
  pub candles: Vec<Candle>,
  pub short_ma: MaLine,
  pub long_ma: MaLine,
  pub markers: Vec<ChartMarker>,
}

fn ma_line(label: String, series: &MovingAverageSeries, candles: &[Candle]) -> MaLine {
  let points = series
    .values()
    .iter()
    .enumerate()
    .filter_map(|(i, value)| {
      candles.get(series.price_index(i)).map(|c| LinePoint {
        timestamp: c.timestamp,
        value: *value,
      })
    })
    .collect();
  
  MaLine { label, points }
}

// 표시 위치는 정확도 평가와 같은 축(단기 이동평균 인덱스)을 사용
fn marker(event: &CrossoverEvent, candles: &[Candle]) -> Option<ChartMarker> {
  let candle = candles.get(event.index)?;
  let price = match event.kind {
    CrossoverKind::Buy => candle.low,
    CrossoverKind::Sell => candle.high,
  };
  
  Some(ChartMarker {
    timestamp: candle.timestamp,
    price,
    kind: event.kind,
    label: event.kind.to_string(),
  })
}

impl ChartOverlay {
  pub fn build(
    candles: &[Candle],
    short_ma: &MovingAverageSeries,
    long_ma: &MovingAverageSeries,
    events: &[CrossoverEvent],
  ) -> Self {
    let markers: Vec<ChartMarker> = events.iter().filter_map(|e| marker(e, candles)).collect();
    if markers.len() < events.len() {
      log::warn!("{} crossover markers fall outside the candle range", events.len() - markers.len());
    }
    
    ChartOverlay {
      candles: candles.to_vec(),
      short_ma: ma_line(format!("Short MA ({})", short_ma.window()), short_ma, candles),
      long_ma: ma_line(format!("Long MA ({})", long_ma.window()), long_ma, candles),
      markers,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::indicators::moving_average;
  
  fn candles(closes: &[f64]) -> Vec<Candle> {
    closes
      .iter()
      .enumerate()
      .map(|(i, c)| Candle::new(i as i64 * 1000, *c, c + 1.0, c - 1.0, *c))
      .collect()
  }
  
  #[test]
  fn test_lines_are_aligned_to_candle_time() {
    let candles = candles(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let short = moving_average(&closes, 2).unwrap();
    let long = moving_average(&closes, 4).unwrap();
    
    let overlay = ChartOverlay::build(&candles, &short, &long, &[]);
    assert_eq!(overlay.short_ma.points[0], LinePoint { timestamp: 1000, value: 1.5 });
    assert_eq!(overlay.long_ma.points.len(), 2);
    assert_eq!(overlay.long_ma.points[0].timestamp, 3000);
    assert_eq!(overlay.long_ma.label, "Long MA (4)");
  }
  
  #[test]
  fn test_markers_anchor_to_low_and_high() {
    let candles = candles(&[10.0, 11.0, 12.0]);
    let short = moving_average(&[10.0, 11.0, 12.0], 1).unwrap();
    let long = moving_average(&[10.0, 11.0, 12.0], 1).unwrap();
    let events = [
      CrossoverEvent { index: 1, price_index: 2, kind: CrossoverKind::Buy },
      CrossoverEvent { index: 2, price_index: 3, kind: CrossoverKind::Sell },
      CrossoverEvent { index: 9, price_index: 10, kind: CrossoverKind::Sell },
    ];
    
    // 마커는 이벤트 인덱스의 캔들에 놓임
    let overlay = ChartOverlay::build(&candles, &short, &long, &events);
    assert_eq!(overlay.markers.len(), 2);
    assert_eq!(overlay.markers[0].timestamp, 1000);
    assert_eq!(overlay.markers[0].price, 10.0);
    assert_eq!(overlay.markers[0].label, "BUY");
    assert_eq!(overlay.markers[1].price, 13.0);
    assert_eq!(overlay.markers[1].timestamp, 2000);
  }
}
