pub mod provider;
pub mod binance;
pub mod yahoo;
pub mod csv_file;

pub use provider::{FetchedSeries, MarketDataService, PriceProvider};
pub use binance::BinanceKlineProvider;
pub use yahoo::YahooChartProvider;
pub use csv_file::{load_price_file, CsvPriceProvider};
