use std::io;
use std::path::{Path, PathBuf};
use async_trait::async_trait;

use crate::error::AnalysisError;
use crate::models::Candle;
use crate::utils;
use super::provider::PriceProvider;

const FILE_SUFFIX: &str = "_Prices.csv";

/// `{dir}/{SYMBOL}_Prices.csv` 파일에서 가격을 읽는 제공자.
/// 첫 행은 헤더, 0번 열은 날짜, 1번 열은 종가
pub struct CsvPriceProvider {
    dir: PathBuf,
}

impl CsvPriceProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        CsvPriceProvider {
            dir: dir.into(),
        }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}{}", symbol, FILE_SUFFIX))
    }
}

/// 파일 이름에서 자산 이름 추론 (`TSLA_Prices.csv` -> `TSLA`)
pub fn asset_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    match file_name.strip_suffix(FILE_SUFFIX) {
        Some(name) => name.to_string(),
        None => path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string(),
    }
}

/// 날짜 -> 밀리초. 날짜 형식이 아니면 정수 타임스탬프, 그것도 아니면 행 번호
fn parse_timestamp(raw: &str, row: usize) -> i64 {
    utils::date_to_timestamp_ms(raw)
        .or_else(|| raw.trim().parse::<i64>().ok())
        .unwrap_or(row as i64)
}

/// CSV 본문 파싱
pub fn parse_price_csv<R: io::Read>(reader: R, delimiter: u8) -> Result<Vec<Candle>, AnalysisError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut result = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let close_raw = rec
            .get(1)
            .ok_or_else(|| AnalysisError::ParseError(format!("row {} has no price column", row + 1)))?;
        let close = close_raw.trim().parse::<f64>().map_err(|e| {
            AnalysisError::ParseError(format!("row {}: invalid price '{}': {}", row + 1, close_raw, e))
        })?;
        let timestamp = parse_timestamp(rec.get(0).unwrap_or_default(), row);

        result.push(Candle::from_close(timestamp, close));
    }

    Ok(result)
}

/// 단일 CSV 파일 로드. (자산 이름, 캔들)
pub fn load_price_file(path: &Path) -> Result<(String, Vec<Candle>), AnalysisError> {
    let file = std::fs::File::open(path)?;
    let candles = parse_price_csv(file, b',')?;
    Ok((asset_name(path), candles))
}

#[async_trait]
impl PriceProvider for CsvPriceProvider {
    async fn fetch_candles(&self, symbol: &str, _interval: &str) -> Result<Vec<Candle>, AnalysisError> {
        let path = self.path_for(symbol);
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            AnalysisError::FetchError(format!("cannot read {}: {}", path.display(), e))
        })?;

        parse_price_csv(bytes.as_slice(), b',')
    }
}
