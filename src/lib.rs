pub mod commands;
pub mod config;
pub mod display;
pub mod http;
pub mod prompt;
pub mod services;
pub mod status;
