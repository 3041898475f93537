pub mod utils;
pub mod window;
