//! printpdf drawing

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon, Rgb,
};

use crate::document::{Rgb8, TableDocument, Theme};
use crate::error::{PdfError, PdfResult};
use crate::layout::{PageGeometry, PageLayout, TableLayout, paginate};
use crate::metrics::{MM_PER_PT, Weight};

/// Grid stroke width in points
const GRID_THICKNESS: f32 = 0.3;

struct Fonts {
    normal: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn load(pdf: &PdfDocumentReference) -> PdfResult<Self> {
        let load = |font: BuiltinFont| {
            pdf.add_builtin_font(font)
                .map_err(|e| PdfError::Font(e.to_string()))
        };
        Ok(Self {
            normal: load(BuiltinFont::Helvetica)?,
            bold: load(BuiltinFont::HelveticaBold)?,
        })
    }

    fn get(&self, weight: Weight) -> &IndirectFontRef {
        match weight {
            Weight::Normal => &self.normal,
            Weight::Bold => &self.bold,
        }
    }
}

fn color(c: Rgb8) -> Color {
    Color::Rgb(Rgb::new(
        c.0 as f32 / 255.0,
        c.1 as f32 / 255.0,
        c.2 as f32 / 255.0,
        None,
    ))
}

/// One page worth of drawing state
struct Painter<'a> {
    layer: PdfLayerReference,
    geometry: &'a PageGeometry,
    theme: &'a Theme,
    fonts: &'a Fonts,
}

impl Painter<'_> {
    /// Flip a top-based y into PDF space
    fn y(&self, from_top: f32) -> Mm {
        Mm(self.geometry.height - from_top)
    }

    fn point(&self, x: f32, from_top: f32) -> (Point, bool) {
        (Point::new(Mm(x), self.y(from_top)), false)
    }

    fn text(&self, text: &str, size: f32, x: f32, baseline: f32, weight: Weight) {
        if text.is_empty() {
            return;
        }
        self.layer
            .use_text(text, size, Mm(x), self.y(baseline), self.fonts.get(weight));
    }

    fn fill_rect(&self, x: f32, top: f32, width: f32, height: f32, fill: Rgb8) {
        self.layer.set_fill_color(color(fill));
        self.layer.add_polygon(Polygon {
            rings: vec![vec![
                self.point(x, top),
                self.point(x + width, top),
                self.point(x + width, top + height),
                self.point(x, top + height),
            ]],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn line(&self, x1: f32, top1: f32, x2: f32, top2: f32) {
        self.layer.add_line(Line {
            points: vec![self.point(x1, top1), self.point(x2, top2)],
            is_closed: false,
        });
    }

    fn titles(&self, doc: &TableDocument) {
        self.layer.set_fill_color(color(Rgb8::BLACK));
        self.text(
            &doc.title,
            self.theme.title_size,
            self.geometry.margin_left,
            self.geometry.title_y,
            Weight::Bold,
        );
        if let Some(subtitle) = &doc.subtitle {
            self.text(
                subtitle,
                self.theme.subtitle_size,
                self.geometry.margin_left,
                self.geometry.subtitle_y,
                Weight::Normal,
            );
        }
    }

    /// Text lines of one row, top-aligned inside the padded cell
    fn cells(&self, doc: &TableDocument, cells: &[Vec<String>], top: f32, line_height: f32, weight: Weight) {
        let ascent = self.theme.font_size * MM_PER_PT;
        let mut x = self.geometry.margin_left;
        for (lines, column) in cells.iter().zip(&doc.columns) {
            for (i, line) in lines.iter().enumerate() {
                let baseline = top + self.theme.cell_padding + ascent + i as f32 * line_height;
                self.text(line, self.theme.font_size, x + self.theme.cell_padding, baseline, weight);
            }
            x += column.width;
        }
    }

    fn table(&self, doc: &TableDocument, layout: &TableLayout, page: &PageLayout) {
        let left = self.geometry.margin_left;
        let width = doc.table_width();
        let top = page.table_top;
        let header_bottom = top + layout.header_height;

        self.fill_rect(left, top, width, layout.header_height, self.theme.header_fill);
        self.layer.set_fill_color(color(self.theme.header_text));
        self.cells(doc, &layout.header, top, layout.line_height, Weight::Bold);

        self.layer.set_fill_color(color(self.theme.body_text));
        for row in &page.rows {
            self.cells(doc, &row.cells, row.top, layout.line_height, Weight::Normal);
        }

        let bottom = page
            .rows
            .last()
            .map(|r| r.top + r.height)
            .unwrap_or(header_bottom);

        self.layer.set_outline_color(color(self.theme.grid));
        self.layer.set_outline_thickness(GRID_THICKNESS);
        self.line(left, top, left + width, top);
        self.line(left, header_bottom, left + width, header_bottom);
        for row in &page.rows {
            let row_bottom = row.top + row.height;
            self.line(left, row_bottom, left + width, row_bottom);
        }
        let mut x = left;
        self.line(x, top, x, bottom);
        for column in &doc.columns {
            x += column.width;
            self.line(x, top, x, bottom);
        }
    }

    fn footer(&self, page: &PageLayout) {
        self.layer.set_fill_color(color(Rgb8::BLACK));
        self.text(
            &page.footer,
            self.theme.font_size,
            page.footer_x,
            self.geometry.height - self.geometry.footer_y,
            Weight::Normal,
        );
    }
}

/// Render `doc` on A4 portrait pages and return the PDF bytes
pub fn render(doc: &TableDocument) -> PdfResult<Vec<u8>> {
    let geometry = PageGeometry::default();
    doc.check(geometry.available_width())?;

    let layout = paginate(doc, &geometry);
    let (pdf, first_page, first_layer) = PdfDocument::new(
        &doc.title,
        Mm(geometry.width),
        Mm(geometry.height),
        "Tabela",
    );
    let fonts = Fonts::load(&pdf)?;

    for page in &layout.pages {
        let layer = if page.number == 1 {
            pdf.get_page(first_page).get_layer(first_layer)
        } else {
            let (index, layer) = pdf.add_page(Mm(geometry.width), Mm(geometry.height), "Tabela");
            pdf.get_page(index).get_layer(layer)
        };

        let painter = Painter {
            layer,
            geometry: &geometry,
            theme: &doc.theme,
            fonts: &fonts,
        };
        if page.number == 1 {
            painter.titles(doc);
        }
        painter.table(doc, &layout, page);
        painter.footer(page);
    }

    tracing::debug!(
        title = %doc.title,
        rows = doc.rows.len(),
        pages = layout.pages.len(),
        "Rendered table document"
    );

    pdf.save_to_bytes()
        .map_err(|e| PdfError::Write(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Column;

    #[test]
    fn test_render_produces_pdf_bytes() {
        let doc = TableDocument::new(
            "Relatório de Visitantes - Todos os Grupos",
            vec![
                Column::new("Membro", 40.0),
                Column::new("Grupo", 25.0),
                Column::new("Visitantes", 85.0),
                Column::new("Data", 25.0),
            ],
        )
        .subtitle("Gerado em: 10/03/2024")
        .row(vec![
            "Ana".into(),
            "GRUPO 01".into(),
            "João ((11) 91234-5678)\nMaria ((11) 95555-5555)".into(),
            "10/03/2024\n03/03/2024".into(),
        ]);

        let bytes = render(&doc).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_rejects_ragged_rows() {
        let doc = TableDocument::new("t", vec![Column::new("A", 50.0)])
            .row(vec!["1".into(), "2".into()]);
        assert!(matches!(render(&doc), Err(PdfError::ColumnMismatch { .. })));
    }
}
