//! Campaign records and pipeline configuration.

pub mod campaign;
pub mod config;
