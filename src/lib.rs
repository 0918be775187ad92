pub mod api;
pub mod app;
pub mod config;
pub mod grid;
pub mod report;
pub mod services;
pub mod shell;
