pub mod grid_service;

pub use grid_service::GridService;
