//! Errors raised while loading, building or querying reference tables
//!
//! The numeric routines never fail; they return sentinels instead
//! (empty schedules, `None` rates, `NaN` compounded rates).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid number {value:?} in {context}")]
    Parse { value: String, context: String },

    #[error("invalid table shape: {0}")]
    Shape(String),

    #[error("breakpoints for {axis} must be strictly ascending")]
    Unordered { axis: &'static str },

    #[error("duplicate region {0:?} in tax table")]
    DuplicateRegion(String),

    #[error("no tax rates for region {0:?}")]
    UnknownRegion(String),
}
