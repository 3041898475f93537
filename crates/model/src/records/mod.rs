pub mod order;
pub mod raw;
pub mod row;
