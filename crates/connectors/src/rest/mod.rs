pub mod auth;
pub mod client;
pub mod link;
pub mod request;
pub mod source;

pub use auth::ApiCredential;
pub use client::{HttpPageSource, HttpSourceConfig};
pub use request::{OrdersQuery, PageRequest};
pub use reqwest::Url;
pub use source::{Page, PageSource};
