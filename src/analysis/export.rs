/**
* filename : export
* author : HAMA
* date: 2025. 5. 12.
* description: 분석 결과 CSV 내보내기
**/

use std::io;

use crate::error::AnalysisError;
use crate::indicators::MovingAverageSeries;

/// `Day, Price, Short_MA, Long_MA` 형식으로 기록. 이동평균이 아직 없는 날은 빈 칸
pub fn export_csv<W: io::Write>(
  writer: W,
  prices: &[f64],
  short_ma: &MovingAverageSeries,
  long_ma: &MovingAverageSeries,
) -> Result<(), AnalysisError> {
  let mut wtr = csv::Writer::from_writer(writer);
  wtr.write_record(["Day", "Price", "Short_MA", "Long_MA"])?;
  
  let cell = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
  
  for (day, price) in prices.iter().enumerate() {
    wtr.write_record([
      day.to_string(),
      price.to_string(),
      cell(short_ma.at_price_index(day)),
      cell(long_ma.at_price_index(day)),
    ])?;
  }
  
  wtr.flush()?;
  Ok(())
}
