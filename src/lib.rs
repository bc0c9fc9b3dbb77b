pub mod api;
pub mod config;
pub mod state;
pub mod storage;
pub mod utils;
