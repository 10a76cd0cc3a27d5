//! Error types for the PDF renderer

use thiserror::Error;

/// Renderer error types
#[derive(Debug, Error)]
pub enum PdfError {
    /// The document declares no columns
    #[error("Table has no columns")]
    NoColumns,

    /// A body row does not have one cell per column
    #[error("Row {row} has {cells} cells, expected {columns}")]
    ColumnMismatch {
        row: usize,
        cells: usize,
        columns: usize,
    },

    /// Column widths do not fit between the page margins
    #[error("Table is {width:.1}mm wide, page allows {available:.1}mm")]
    TooWide { width: f32, available: f32 },

    /// Font registration failed
    #[error("Font error: {0}")]
    Font(String),

    /// Serializing the document failed
    #[error("Write error: {0}")]
    Write(String),
}

/// Result type for renderer operations
pub type PdfResult<T> = Result<T, PdfError>;
