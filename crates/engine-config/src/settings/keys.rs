//! Environment keys understood by [`Settings::from_env`](super::Settings::from_env).

pub const API_ENDPOINT: &str = "ORDERS_API_ENDPOINT";
pub const API_TOKEN: &str = "ORDERS_API_TOKEN";
pub const API_AUTH_HEADER: &str = "ORDERS_API_AUTH_HEADER";
pub const PAGE_SIZE: &str = "ORDERS_PAGE_SIZE";
pub const STATUS_FILTER: &str = "ORDERS_STATUS_FILTER";

pub const MAX_ATTEMPTS: &str = "FETCH_MAX_ATTEMPTS";
pub const BACKOFF_BASE_MS: &str = "FETCH_BACKOFF_BASE_MS";
pub const BACKOFF_MAX_MS: &str = "FETCH_BACKOFF_MAX_MS";
pub const REQUEST_TIMEOUT_SECS: &str = "FETCH_REQUEST_TIMEOUT_SECS";
pub const DEADLINE_SECS: &str = "FETCH_DEADLINE_SECS";
pub const MAX_PAGES: &str = "FETCH_MAX_PAGES";

pub const CITIES: &str = "REPORT_CITIES";
pub const VARIANT: &str = "REPORT_VARIANT";
pub const STRICT_CITIES: &str = "REPORT_STRICT_CITIES";

pub const ALL: [&str; 14] = [
    API_ENDPOINT,
    API_TOKEN,
    API_AUTH_HEADER,
    PAGE_SIZE,
    STATUS_FILTER,
    MAX_ATTEMPTS,
    BACKOFF_BASE_MS,
    BACKOFF_MAX_MS,
    REQUEST_TIMEOUT_SECS,
    DEADLINE_SECS,
    MAX_PAGES,
    CITIES,
    VARIANT,
    STRICT_CITIES,
];
