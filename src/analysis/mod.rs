pub mod aggregator;
pub mod export;
