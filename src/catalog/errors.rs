//! Error types for catalog loading

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Duplicate course id: {0}")]
    DuplicateId(String),

    #[error("Course {id}: {attribute} = {value} is outside {min}..={max}")]
    OutOfDomain {
        id: String,
        attribute: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

pub type CatalogResult<T> = Result<T, CatalogError>;
