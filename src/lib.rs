pub mod config;
pub mod infra;
pub mod model;
pub mod service;
