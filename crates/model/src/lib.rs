pub mod core;
pub mod filter;
pub mod pagination;
pub mod records;
