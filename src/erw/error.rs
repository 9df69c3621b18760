use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while loading data or rendering figures
#[derive(Debug, Error)]
pub enum FigureError {
    /// Failed to read or parse an input CSV
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    /// An input table lacks a column the figure expects
    #[error("{}: missing column '{column}'", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// An input table parsed but holds no data rows
    #[error("{}: no data rows", .path.display())]
    Empty { path: PathBuf },

    /// Dataframe operation error
    #[error("dataframe error: {0}")]
    Polars(#[from] PolarsError),

    /// Chart backend failure while drawing or encoding the PNG
    #[error("draw error: {0}")]
    Draw(String),

    /// Invalid command line or environment configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem error (results directory, output file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results using FigureError
pub type Result<T> = std::result::Result<T, FigureError>;

/// Map a plotters backend error into a [`FigureError::Draw`].
///
/// The plotters error types are generic over the backend, so they are
/// flattened to their display form at the boundary.
pub fn draw_err<E: std::fmt::Display>(err: E) -> FigureError {
    FigureError::Draw(err.to_string())
}
