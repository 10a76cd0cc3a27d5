//! # trombetas-pdf
//!
//! Tabular PDF renderer - low-level layout and drawing only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - Text measuring and wrapping for the built-in Helvetica faces
//! - Row sizing and pagination on A4 portrait
//! - Themed header row, grid lines, page footer
//!
//! Business logic (WHAT to print) stays in application code:
//! - Visitors / missing-members reports → trombetas-server
//!
//! ## Example
//!
//! ```no_run
//! use trombetas_pdf::{Column, TableDocument, render};
//!
//! let doc = TableDocument::new(
//!     "Relatório de Visitantes - Todos os Grupos",
//!     vec![Column::new("Membro", 60.0), Column::new("Visitantes", 110.0)],
//! )
//! .subtitle("Gerado em: 10/03/2024")
//! .row(vec!["Ana".into(), "João ((11) 91234-5678)".into()]);
//!
//! let bytes = render(&doc)?;
//! std::fs::write("relatorio.pdf", bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod document;
mod error;
mod layout;
mod metrics;
mod render;

// Re-exports
pub use document::{Column, Rgb8, TableDocument, Theme};
pub use error::{PdfError, PdfResult};
pub use layout::{PageGeometry, PageLayout, PlacedRow, TableLayout, paginate};
pub use metrics::{Weight, text_width, wrap_text};
pub use render::render;
