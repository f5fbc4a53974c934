// src/types/mod.rs
//! Validated domain newtypes shared across the service.

use thiserror::Error;

mod domain_types;
mod ids;

pub use domain_types::*;
pub use ids::*;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid Notion ID format: {0}")]
    InvalidId(String),

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Invalid Notion token format: {reason}")]
    InvalidToken { reason: String },

    #[error("Invalid value for {name}: {value}")]
    InvalidSetting { name: &'static str, value: String },
}
