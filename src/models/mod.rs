pub mod market;
pub mod market_data;

pub use market::{Interval, Market};
pub use market_data::{closes, Candle};
