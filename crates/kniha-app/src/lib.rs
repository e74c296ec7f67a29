//! Application service layer - use cases, config, export

pub mod config;
pub mod export;
pub mod generation_service;
pub mod repository;

pub use generation_service::GenerationService;
