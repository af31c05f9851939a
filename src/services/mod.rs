//! External collaborators that supply candles to the pipeline.

pub mod market_data;

pub use market_data::{InMemoryMarketDataProvider, JsonFileMarketDataProvider, MarketDataProvider};
