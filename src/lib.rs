pub mod api_football;
pub mod app;
pub mod config;
pub mod http_client;
pub mod offline;
pub mod prompt;
pub mod render;
pub mod sort;
pub mod startup;
pub mod viz;
