//! Table document model

use crate::error::{PdfError, PdfResult};

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8(pub u8, pub u8, pub u8);

impl Rgb8 {
    pub const WHITE: Rgb8 = Rgb8(255, 255, 255);
    pub const BLACK: Rgb8 = Rgb8(0, 0, 0);
}

/// Visual settings of a table
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub header_fill: Rgb8,
    pub header_text: Rgb8,
    pub body_text: Rgb8,
    pub grid: Rgb8,
    /// Points
    pub font_size: f32,
    /// Millimetres, applied on every side of a cell
    pub cell_padding: f32,
    pub title_size: f32,
    pub subtitle_size: f32,
    /// Footer text is `"{page_label} {n}"`
    pub page_label: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header_fill: Rgb8(220, 38, 38),
            header_text: Rgb8::WHITE,
            body_text: Rgb8::BLACK,
            grid: Rgb8(120, 120, 120),
            font_size: 8.0,
            cell_padding: 2.0,
            title_size: 16.0,
            subtitle_size: 10.0,
            page_label: "Página".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: String,
    /// Millimetres
    pub width: f32,
}

impl Column {
    pub fn new(header: impl Into<String>, width: f32) -> Self {
        Self {
            header: header.into(),
            width,
        }
    }
}

/// A titled table, ready to render
///
/// Cells may contain `'\n'` for explicit line breaks; long lines are wrapped
/// to the column width.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDocument {
    pub title: String,
    pub subtitle: Option<String>,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub theme: Theme,
}

impl TableDocument {
    pub fn new(title: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            columns,
            rows: Vec::new(),
            theme: Theme::default(),
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn row(mut self, cells: Vec<String>) -> Self {
        self.rows.push(cells);
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Vec<String>>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn table_width(&self) -> f32 {
        self.columns.iter().map(|c| c.width).sum()
    }

    pub(crate) fn check(&self, available_width: f32) -> PdfResult<()> {
        if self.columns.is_empty() {
            return Err(PdfError::NoColumns);
        }
        let width = self.table_width();
        if width > available_width + f32::EPSILON {
            return Err(PdfError::TooWide {
                width,
                available: available_width,
            });
        }
        if let Some((row, cells)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != self.columns.len())
        {
            return Err(PdfError::ColumnMismatch {
                row,
                cells: cells.len(),
                columns: self.columns.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_columns() -> Vec<Column> {
        vec![Column::new("A", 50.0), Column::new("B", 50.0)]
    }

    #[test]
    fn test_check_rejects_ragged_rows() {
        let doc = TableDocument::new("t", two_columns())
            .row(vec!["1".into(), "2".into()])
            .row(vec!["only one".into()]);
        let err = doc.check(180.0).unwrap_err();
        assert!(matches!(
            err,
            PdfError::ColumnMismatch {
                row: 1,
                cells: 1,
                columns: 2
            }
        ));
    }

    #[test]
    fn test_check_rejects_empty_and_wide_tables() {
        assert!(matches!(
            TableDocument::new("t", vec![]).check(180.0),
            Err(PdfError::NoColumns)
        ));
        assert!(matches!(
            TableDocument::new("t", two_columns()).check(90.0),
            Err(PdfError::TooWide { .. })
        ));
    }

    #[test]
    fn test_default_theme() {
        let theme = Theme::default();
        assert_eq!(theme.header_fill, Rgb8(220, 38, 38));
        assert_eq!(theme.header_text, Rgb8::WHITE);
        assert_eq!(theme.font_size, 8.0);
        assert_eq!(theme.cell_padding, 2.0);
    }
}
