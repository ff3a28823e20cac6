pub mod config;
pub mod plugin;
pub mod registry;
pub mod utils;
