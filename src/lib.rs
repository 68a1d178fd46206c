pub mod api;
pub mod config;
pub mod error;
pub mod fs_store;
pub mod h2h;
pub mod memory_store;
pub mod models;
pub mod normalize;
pub mod store;
