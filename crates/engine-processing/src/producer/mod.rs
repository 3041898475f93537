pub mod components;
pub mod config;
pub mod fetcher;

#[cfg(test)]
pub(crate) mod testing;

pub use config::FetchConfig;
pub use fetcher::OrderFetcher;
