//! Row sizing and pagination
//!
//! All vertical positions are millimetres measured from the top edge of the
//! page; the renderer flips them into PDF coordinates.

use crate::document::TableDocument;
use crate::metrics::{MM_PER_PT, Weight, text_width, wrap_text};

/// Line height as a multiple of the font size
const LINE_SPACING: f32 = 1.2;

/// A4 portrait page geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    /// Title baseline
    pub title_y: f32,
    /// Subtitle baseline
    pub subtitle_y: f32,
    /// Table top on the first page
    pub first_table_top: f32,
    /// Table top on continuation pages
    pub next_table_top: f32,
    /// Space kept free below the table for the footer
    pub bottom_margin: f32,
    /// Footer baseline, from the bottom edge
    pub footer_y: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            margin_left: 14.0,
            margin_right: 14.0,
            title_y: 15.0,
            subtitle_y: 25.0,
            first_table_top: 35.0,
            next_table_top: 15.0,
            bottom_margin: 20.0,
            footer_y: 10.0,
        }
    }
}

impl PageGeometry {
    pub fn available_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    fn usable_bottom(&self) -> f32 {
        self.height - self.bottom_margin
    }
}

/// One row, or one slice of a row that continues on the next page
///
/// A row split across pages yields several `PlacedRow`s with the same
/// `index`; `first_line` tells where this slice starts in the wrapped cells.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRow {
    /// Index into `TableDocument::rows`
    pub index: usize,
    pub first_line: usize,
    pub top: f32,
    pub height: f32,
    /// Wrapped lines per cell
    pub cells: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    /// 1-based
    pub number: usize,
    /// Top of the repeated header row
    pub table_top: f32,
    pub rows: Vec<PlacedRow>,
    /// Footer text, e.g. `Página 2`
    pub footer: String,
    /// Left edge of the centered footer
    pub footer_x: f32,
}

impl PageLayout {
    fn new(number: usize, table_top: f32, doc: &TableDocument, geometry: &PageGeometry) -> Self {
        let footer = format!("{} {}", doc.theme.page_label, number);
        let footer_x =
            (geometry.width - text_width(&footer, doc.theme.font_size, Weight::Normal)) / 2.0;
        Self {
            number,
            table_top,
            rows: Vec::new(),
            footer,
            footer_x,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub line_height: f32,
    pub header: Vec<Vec<String>>,
    pub header_height: f32,
    pub pages: Vec<PageLayout>,
}

fn wrap_cells<'a>(
    cells: impl Iterator<Item = &'a str>,
    doc: &TableDocument,
    weight: Weight,
) -> Vec<Vec<String>> {
    let padding = doc.theme.cell_padding;
    cells
        .zip(&doc.columns)
        .map(|(text, column)| {
            wrap_text(
                text,
                (column.width - 2.0 * padding).max(1.0),
                doc.theme.font_size,
                weight,
            )
        })
        .collect()
}

fn line_count(cells: &[Vec<String>]) -> usize {
    cells.iter().map(Vec::len).max().unwrap_or(1).max(1)
}

fn block_height(lines: usize, line_height: f32, padding: f32) -> f32 {
    lines as f32 * line_height + 2.0 * padding
}

/// Lines `start..end` of every cell
fn slice_cells(cells: &[Vec<String>], start: usize, end: usize) -> Vec<Vec<String>> {
    cells
        .iter()
        .map(|lines| lines.iter().skip(start).take(end - start).cloned().collect())
        .collect()
}

/// Lay out every row of `doc`, breaking pages so nothing crosses the bottom
/// margin. The header row is repeated at the top of every page.
///
/// A row that does not fit in the space left moves to a fresh page. A row
/// taller than a fresh page is split by lines over as many pages as it needs.
pub fn paginate(doc: &TableDocument, geometry: &PageGeometry) -> TableLayout {
    let padding = doc.theme.cell_padding;
    let line_height = doc.theme.font_size * MM_PER_PT * LINE_SPACING;
    let bottom = geometry.usable_bottom();

    let header = wrap_cells(
        doc.columns.iter().map(|c| c.header.as_str()),
        doc,
        Weight::Bold,
    );
    let header_height = block_height(line_count(&header), line_height, padding);
    let fresh_top = geometry.next_table_top + header_height;

    // Whole lines that fit between `top` and the bottom margin
    let capacity = |top: f32| -> usize {
        let room = bottom - top - 2.0 * padding;
        if room < line_height {
            0
        } else {
            ((room + 1e-4) / line_height).floor() as usize
        }
    };

    let mut pages = vec![PageLayout::new(1, geometry.first_table_top, doc, geometry)];
    let mut cursor = geometry.first_table_top + header_height;

    let new_page = |pages: &mut Vec<PageLayout>| {
        let number = pages.len() + 1;
        pages.push(PageLayout::new(number, geometry.next_table_top, doc, geometry));
    };

    for (index, row) in doc.rows.iter().enumerate() {
        let cells = wrap_cells(row.iter().map(String::as_str), doc, Weight::Normal);
        let total = line_count(&cells);
        let height = block_height(total, line_height, padding);

        let page_has_rows = pages.last().is_some_and(|p| !p.rows.is_empty());
        if cursor + height > bottom && page_has_rows && fresh_top + height <= bottom {
            new_page(&mut pages);
            cursor = fresh_top;
        }

        let mut start = 0;
        while start < total {
            let page_has_rows = pages.last().is_some_and(|p| !p.rows.is_empty());
            let fit = capacity(cursor);
            if fit == 0 && page_has_rows {
                new_page(&mut pages);
                cursor = fresh_top;
                continue;
            }

            // at least one line per slice, even on a degenerate geometry
            let end = start + fit.max(1).min(total - start);
            let slice_height = block_height(end - start, line_height, padding);
            let placed = PlacedRow {
                index,
                first_line: start,
                top: cursor,
                height: slice_height,
                cells: slice_cells(&cells, start, end),
            };
            if let Some(page) = pages.last_mut() {
                page.rows.push(placed);
            }
            cursor += slice_height;
            start = end;

            if start < total {
                new_page(&mut pages);
                cursor = fresh_top;
            }
        }
    }

    TableLayout {
        line_height,
        header,
        header_height,
        pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Column;

    fn doc_with_rows(count: usize) -> TableDocument {
        TableDocument::new(
            "Relatório",
            vec![Column::new("Membro", 80.0), Column::new("Grupo", 30.0)],
        )
        .rows((0..count).map(|i| vec![format!("Membro {i}"), "GRUPO 01".to_string()]))
    }

    #[test]
    fn test_single_page_when_rows_fit() {
        let layout = paginate(&doc_with_rows(5), &PageGeometry::default());
        assert_eq!(layout.pages.len(), 1);
        assert_eq!(layout.pages[0].rows.len(), 5);
        assert_eq!(layout.pages[0].table_top, 35.0);
    }

    #[test]
    fn test_empty_table_still_has_one_page() {
        let layout = paginate(&doc_with_rows(0), &PageGeometry::default());
        assert_eq!(layout.pages.len(), 1);
        assert!(layout.pages[0].rows.is_empty());
    }

    #[test]
    fn test_many_rows_break_pages_without_crossing_margin() {
        let geometry = PageGeometry::default();
        let layout = paginate(&doc_with_rows(200), &geometry);

        assert!(layout.pages.len() > 1);

        let placed: Vec<usize> = layout
            .pages
            .iter()
            .flat_map(|p| p.rows.iter().map(|r| r.index))
            .collect();
        assert_eq!(placed, (0..200).collect::<Vec<_>>());

        for page in &layout.pages {
            for row in &page.rows {
                assert!(row.top + row.height <= geometry.height - geometry.bottom_margin + 1e-3);
            }
        }
        for (i, page) in layout.pages.iter().enumerate() {
            assert_eq!(page.number, i + 1);
        }
        assert_eq!(layout.pages[1].table_top, geometry.next_table_top);
    }

    #[test]
    fn test_multiline_cells_grow_row_height() {
        let doc = TableDocument::new(
            "t",
            vec![Column::new("Visitantes", 85.0), Column::new("Data", 25.0)],
        )
        .row(vec!["João".into(), "10/03/2024".into()])
        .row(vec!["João\nMaria\nPedro".into(), "10/03/2024".into()]);

        let layout = paginate(&doc, &PageGeometry::default());
        let rows = &layout.pages[0].rows;
        assert_eq!(rows[1].cells[0].len(), 3);
        assert!((rows[1].height - rows[0].height - 2.0 * layout.line_height).abs() < 1e-3);
        assert!((rows[1].top - rows[0].top - rows[0].height).abs() < 1e-3);
    }

    fn dates(count: usize) -> String {
        (0..count)
            .map(|i| format!("{:02}/03/2024", i % 28 + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn visitors_doc() -> TableDocument {
        TableDocument::new(
            "Relatório de Visitantes - Todos os Grupos",
            vec![
                Column::new("Membro", 40.0),
                Column::new("Grupo", 25.0),
                Column::new("Visitantes", 85.0),
                Column::new("Data", 25.0),
            ],
        )
    }

    #[test]
    fn test_tall_row_is_split_across_pages() {
        let geometry = PageGeometry::default();
        let data = dates(120);
        let doc = visitors_doc().row(vec![
            "Ana".into(),
            "GRUPO 01".into(),
            "João ((11) 91234-5678)".into(),
            data.clone(),
        ]);

        let layout = paginate(&doc, &geometry);
        assert!(layout.pages.len() > 1);

        let mut printed = Vec::new();
        for (i, page) in layout.pages.iter().enumerate() {
            let expected_top = if i == 0 { geometry.first_table_top } else { geometry.next_table_top };
            assert_eq!(page.table_top, expected_top);
            assert_eq!(page.rows.len(), 1);

            let row = &page.rows[0];
            assert_eq!(row.index, 0);
            assert_eq!(row.first_line, printed.len());
            assert!(row.top >= page.table_top + layout.header_height - 1e-3);
            assert!(row.top + row.height <= geometry.height - geometry.bottom_margin + 1e-3);
            printed.extend(row.cells[3].iter().cloned());
        }
        assert_eq!(printed.join("\n"), data);

        // member and visitor stay on the first slice
        assert_eq!(layout.pages[0].rows[0].cells[0], ["Ana"]);
        assert!(layout.pages[1].rows[0].cells[0].is_empty());
    }

    #[test]
    fn test_row_that_fits_a_fresh_page_is_moved_whole() {
        let geometry = PageGeometry::default();
        let filler = (0..40).map(|i| vec![format!("Membro {i}"), "G".into(), "V".into(), "01/03/2024".into()]);
        let doc = visitors_doc()
            .rows(filler)
            .row(vec!["Bruno".into(), "G".into(), "V".into(), dates(60)]);

        let layout = paginate(&doc, &geometry);
        let slices: Vec<&PlacedRow> = layout
            .pages
            .iter()
            .flat_map(|p| p.rows.iter())
            .filter(|r| r.index == 40)
            .collect();
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].cells[3].len(), 60);
        assert!(slices[0].top + slices[0].height <= geometry.height - geometry.bottom_margin + 1e-3);
    }

    #[test]
    fn test_every_page_has_a_centered_footer() {
        let geometry = PageGeometry::default();
        let layout = paginate(&doc_with_rows(200), &geometry);

        let footers: Vec<&str> = layout.pages.iter().map(|p| p.footer.as_str()).collect();
        let expected: Vec<String> = (1..=layout.pages.len()).map(|n| format!("Página {n}")).collect();
        assert_eq!(footers, expected);

        for page in &layout.pages {
            let width = text_width(&page.footer, 8.0, Weight::Normal);
            assert!((page.footer_x + width / 2.0 - geometry.width / 2.0).abs() < 1e-3);
        }
    }
}
