use pdf_writer::{Content, Name, Pdf, Rect, Ref};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Minimal tabular PDF builder on top of pdf-writer.
///
/// Object ids are managed by hand: catalog, page tree and font get fixed
/// ids, every page/content pair takes the next free ones. Flagged rows may
/// carry a secondary annotation line rendered under the row in a smaller
/// face.
pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,
    note_h: f32,

    next_id: i32,
    font_id: Ref,

    font_size: f32,
    note_font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let next_id = 4;

        // single global font
        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,

            page_w: 595.0,
            page_h: 842.0,
            margin: 50.0,
            row_h: 18.0,
            note_h: 12.0,

            next_id,
            font_id,

            font_size: 8.5,
            note_font_size: 7.0,
            header_font_size: 9.5,
            title_font_size: 14.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);

        page.resources().fonts().pair(Name(b"F1"), self.font_id);

        self.current_content_id = Some(content_id);

        Content::new()
    }

    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        content.begin_text();
        content.set_font(Name(b"F1"), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(pdf_writer::Str(text.as_bytes()));
        content.end_text();
    }

    fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(0.7, 0.7, 0.7);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    fn draw_row(
        &self,
        content: &mut Content,
        y: f32,
        col_widths: &[f32],
        row: &[String],
        font_size: f32,
    ) {
        let mut x = self.margin;

        for (i, text) in row.iter().enumerate() {
            let w = col_widths[i];
            // clip overlong cell text to the column width
            let max_chars = (w / (font_size * 0.52)).max(1.0) as usize;
            let clipped: String = text.chars().take(max_chars).collect();
            self.draw_text(content, x + 3.0, y + 5.0, font_size, &clipped);
            self.draw_cell_borders(content, x, y, w, self.row_h);
            x += w;
        }
    }

    fn draw_annotation(&self, content: &mut Content, y: f32, width: f32, note: &str) {
        content.save_state();
        content.set_fill_rgb(1.0, 0.95, 0.88);
        content.rect(self.margin, y, width, self.note_h);
        content.fill_nonzero();
        content.restore_state();

        content.save_state();
        content.set_fill_rgb(0.55, 0.25, 0.1);
        self.draw_text(
            content,
            self.margin + 10.0,
            y + 3.0,
            self.note_font_size,
            note,
        );
        content.restore_state();
    }

    fn compute_col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers.iter().map(|h| h.len() as f32 * 6.0).collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                // the narrative column dominates otherwise; cap its vote
                let len = cell.len().min(48) as f32;
                widths[i] = widths[i].max(len * 4.8);
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;

        let scale = max / total;
        for w in &mut widths {
            *w *= scale;
        }

        widths
    }

    fn draw_page_header(&self, content: &mut Content, title: &str, page: usize) {
        self.draw_text(
            content,
            self.margin,
            self.page_h - self.margin + 15.0,
            self.title_font_size,
            title,
        );

        let pg = format!("Page {}", page);
        self.draw_text(
            content,
            self.page_w - self.margin - 60.0,
            self.margin - 35.0,
            self.font_size,
            &pg,
        );
    }

    fn draw_table_header(&self, content: &mut Content, y: f32, col_widths: &[f32], headers: &[&str]) {
        let width: f32 = col_widths.iter().sum();
        content.save_state();
        content.set_fill_rgb(0.85, 0.87, 0.90);
        content.rect(self.margin, y, width, self.row_h);
        content.fill_nonzero();
        content.restore_state();

        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        self.draw_row(content, y, col_widths, &header_row, self.header_font_size);
    }

    /// Multi-page table with a title and optional per-row annotation lines
    /// (flag summaries rendered under flagged rows).
    pub fn write_report(
        &mut self,
        title: &str,
        headers: &[&str],
        rows: &[Vec<String>],
        annotations: &[Option<String>],
    ) {
        let col_widths = self.compute_col_widths(headers, rows);
        let table_width: f32 = col_widths.iter().sum();

        if rows.is_empty() {
            let mut content = self.new_page();
            self.draw_page_header(&mut content, title, 1);
            let y = self.page_h - self.margin - 30.0;
            self.draw_table_header(&mut content, y, &col_widths, headers);
            self.finalize_page(content);
            return;
        }

        let mut index = 0;
        let mut page_idx = 1;

        while index < rows.len() {
            let mut content = self.new_page();
            self.draw_page_header(&mut content, title, page_idx);

            let mut y = self.page_h - self.margin - 30.0;
            self.draw_table_header(&mut content, y, &col_widths, headers);
            y -= self.row_h;

            while index < rows.len() {
                let note = annotations.get(index).and_then(Option::as_deref);
                let note_extra = if note.is_some() { self.note_h } else { 0.0 };
                if y - note_extra < self.margin {
                    break;
                }

                self.draw_row(&mut content, y, &col_widths, &rows[index], self.font_size);

                // annotation sits flush under its row
                if let Some(note) = note {
                    self.draw_annotation(&mut content, y - self.note_h, table_width, note);
                    y -= self.note_h;
                }

                y -= self.row_h;
                index += 1;
            }

            self.finalize_page(content);
            page_idx += 1;
        }
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}
