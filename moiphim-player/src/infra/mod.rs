pub mod config;
pub mod constants;
pub mod runtime_config;
pub mod testing;
pub mod time;
