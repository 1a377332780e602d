// render: Quote layout and pagination
//
// Lays the quote out top to bottom with a running cursor (`y`, mm from the
// page top). Before each block the renderer checks that the block fits above
// the footer reserve and starts a new page otherwise.

use ::image::DynamicImage;
use chrono::NaiveDate;
use tracing::debug;

use crate::canvas::{Canvas, Rect, RgbColor, TextStyle};
use crate::config::CompanyInfo;
use crate::format::format_quote_date;
use crate::logo::fit_within;
use crate::quote::QuoteForm;
use crate::text::{text_width_mm, wrap_text, FontStyle};

// ============================================================================
// Constants
// ============================================================================

/// Left/right margin
const MARGIN_MM: f32 = 20.0;

/// Header band on the first page
const HEADER_HEIGHT_MM: f32 = 32.0;
const LOGO_TOP_MM: f32 = 4.0;
const LOGO_MAX_WIDTH_MM: f32 = 32.0;
const LOGO_MAX_HEIGHT_MM: f32 = 25.0;

/// Footer band on the last page
const FOOTER_HEIGHT_MM: f32 = 20.0;

/// Space kept free at the bottom of every page for the footer
const FOOTER_RESERVE_MM: f32 = 40.0;

/// Cursor position at the top of a continuation page
const CONTINUATION_TOP_MM: f32 = 30.0;

/// Cursor position below the header band
const BODY_TOP_MM: f32 = 38.0;

/// Line advance for 9pt body text
const BODY_LINE_MM: f32 = 4.0;

/// Line advance for 8pt terms text
const TERMS_LINE_MM: f32 = 3.5;

/// Panel border above the cursor and below the last baseline
const PANEL_TOP_PADDING_MM: f32 = 3.0;
const CLIENT_PANEL_BOTTOM_PADDING_MM: f32 = 3.0;
const TERMS_PANEL_BOTTOM_PADDING_MM: f32 = 4.0;

/// Space between a panel's last baseline and the next section
const AFTER_PANEL_MM: f32 = 22.0;

/// Item table
const ITEM_DESCRIPTION_WIDTH_FROM_RIGHT_MM: f32 = 150.0;
const QTY_COL_FROM_RIGHT_MM: f32 = 110.0;
const PRICE_COL_FROM_RIGHT_MM: f32 = 80.0;
const AMOUNT_COL_FROM_RIGHT_MM: f32 = 35.0;
const MIN_ROW_HEIGHT_MM: f32 = 8.0;

/// Font sizes in points
const COMPANY_FONT_SIZE: f32 = 18.0;
const TITLE_FONT_SIZE: f32 = 16.0;
const SECTION_FONT_SIZE: f32 = 12.0;
const NORMAL_FONT_SIZE: f32 = 9.0;
const TERMS_FONT_SIZE: f32 = 8.0;

/// Palette
pub const BAND_COLOR: RgbColor = RgbColor(21, 37, 52);
pub const ZEBRA_COLOR: RgbColor = RgbColor(248, 249, 250);
const PANEL_COLOR: RgbColor = RgbColor(250, 250, 250);
const DATE_BORDER_COLOR: RgbColor = RgbColor(200, 200, 200);

// ============================================================================
// Renderer
// ============================================================================

/// One text line of a boxed panel. `advance` is the distance from the
/// previous baseline (or from the cursor, for the first row).
struct PanelRow {
    advance: f32,
    cells: Vec<PanelCell>,
}

struct PanelCell {
    x: f32,
    text: String,
    font: FontStyle,
    size: f32,
}

impl PanelRow {
    fn new(advance: f32) -> Self {
        Self {
            advance,
            cells: Vec::new(),
        }
    }

    fn cell(mut self, x: f32, text: impl Into<String>, font: FontStyle, size: f32) -> Self {
        self.cells.push(PanelCell {
            x,
            text: text.into(),
            font,
            size,
        });
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub pages: usize,
}

pub struct QuoteRenderer<'a, C: Canvas> {
    canvas: &'a mut C,
    company: &'a CompanyInfo,
    logo: Option<&'a DynamicImage>,
    date: NaiveDate,
    page_width: f32,
    page_height: f32,
    y: f32,
}

/// Renders `form` onto `canvas`, starting on the canvas's current page.
pub fn render_quote<C: Canvas>(
    canvas: &mut C,
    form: &QuoteForm,
    company: &CompanyInfo,
    logo: Option<&DynamicImage>,
    date: NaiveDate,
) -> RenderSummary {
    QuoteRenderer::new(canvas, company, logo, date).render(form)
}

impl<'a, C: Canvas> QuoteRenderer<'a, C> {
    pub fn new(
        canvas: &'a mut C,
        company: &'a CompanyInfo,
        logo: Option<&'a DynamicImage>,
        date: NaiveDate,
    ) -> Self {
        let (page_width, page_height) = canvas.page_size();
        Self {
            canvas,
            company,
            logo,
            date,
            page_width,
            page_height,
            y: 0.0,
        }
    }

    pub fn render(mut self, form: &QuoteForm) -> RenderSummary {
        self.draw_header();
        self.draw_title();
        self.draw_client_info(form);
        self.draw_project_description(form);
        self.draw_items(form);
        self.draw_total(form);
        self.draw_terms();
        self.draw_signatures();
        self.draw_footer();

        let pages = self.canvas.page_count();
        debug!(pages, items = form.items.len(), "quote laid out");
        RenderSummary { pages }
    }

    fn content_width(&self) -> f32 {
        self.page_width - 2.0 * MARGIN_MM
    }

    /// Starts a new page when `required` mm do not fit above the footer
    /// reserve. Returns whether a break happened.
    fn ensure_space(&mut self, required: f32) -> bool {
        if self.y + required > self.body_bottom() {
            debug!(page = self.canvas.page_count() + 1, at = self.y, required, "page break");
            self.new_page();
            true
        } else {
            false
        }
    }

    fn new_page(&mut self) {
        self.canvas.add_page();
        self.y = CONTINUATION_TOP_MM;
    }

    /// Lowest point body content may reach on any page
    fn body_bottom(&self) -> f32 {
        self.page_height - FOOTER_RESERVE_MM
    }

    /// Draws `rows` inside a bordered panel, moving to a new page whenever
    /// the next row would cross the footer reserve. Each page gets its own
    /// panel around the rows it holds. A panel that fits on one page is kept
    /// together, with `keep_below` mm of room left under it. Returns the
    /// baseline of the last row.
    fn draw_panel(&mut self, rows: &[PanelRow], bottom_padding: f32, keep_below: f32) -> f32 {
        let Some(first) = rows.first() else {
            return self.y;
        };
        let total: f32 = PANEL_TOP_PADDING_MM + rows.iter().map(|r| r.advance).sum::<f32>() + bottom_padding;
        let usable = self.body_bottom() - CONTINUATION_TOP_MM;
        if total + keep_below <= usable {
            self.ensure_space(total + keep_below);
        } else {
            let head: f32 = rows.iter().take(2).map(|r| r.advance).sum();
            self.ensure_space(PANEL_TOP_PADDING_MM + head + bottom_padding);
        }

        let mut start = 0;
        loop {
            // Rows that fit on this page; the first row of a continued panel
            // sits where the panel's first row would.
            let mut baselines = Vec::new();
            let mut baseline = self.y;
            for (offset, row) in rows[start..].iter().enumerate() {
                let advance = if offset == 0 { first.advance } else { row.advance };
                if offset > 0 && baseline + advance + bottom_padding > self.body_bottom() {
                    break;
                }
                baseline += advance;
                baselines.push(baseline);
            }

            let panel = Rect::new(
                MARGIN_MM - 3.0,
                self.y - PANEL_TOP_PADDING_MM,
                self.content_width() + 6.0,
                baseline + bottom_padding - (self.y - PANEL_TOP_PADDING_MM),
            );
            self.canvas.fill_rect(panel, PANEL_COLOR);
            self.canvas.stroke_rect(panel, RgbColor::BLACK, 0.5);

            for (row, y) in rows[start..].iter().zip(&baselines) {
                for cell in &row.cells {
                    self.text(&cell.text, cell.x, *y, cell.font, cell.size, RgbColor::BLACK);
                }
            }

            start += baselines.len();
            if start >= rows.len() {
                return baseline;
            }
            debug!(page = self.canvas.page_count() + 1, rows_left = rows.len() - start, "panel continues");
            self.new_page();
        }
    }

    fn text(&mut self, text: &str, x: f32, y: f32, font: FontStyle, size: f32, color: RgbColor) {
        self.canvas.text(text, x, y, TextStyle::new(font, size, color));
    }

    fn centered_text(&mut self, text: &str, center_x: f32, y: f32, font: FontStyle, size: f32, color: RgbColor) {
        let x = center_x - text_width_mm(text, font, size) / 2.0;
        self.text(text, x, y, font, size, color);
    }

    fn lines(&mut self, lines: &[String], x: f32, y: f32, font: FontStyle, size: f32, advance: f32) {
        for (i, line) in lines.iter().enumerate() {
            self.text(line, x, y + i as f32 * advance, font, size, RgbColor::BLACK);
        }
    }

    fn section_title(&mut self, title: &str) {
        self.text(title, MARGIN_MM, self.y, FontStyle::Bold, SECTION_FONT_SIZE, RgbColor::BLACK);
    }

    // ------------------------------------------------------------------------
    // Header, Title
    // ------------------------------------------------------------------------

    fn draw_header(&mut self) {
        self.canvas
            .fill_rect(Rect::new(0.0, 0.0, self.page_width, HEADER_HEIGHT_MM), BAND_COLOR);

        let logo_drawn = match self.logo {
            Some(logo) => {
                let (w, h) = fit_within(logo.width(), logo.height(), LOGO_MAX_WIDTH_MM, LOGO_MAX_HEIGHT_MM);
                if w > 0.0 && h > 0.0 {
                    let top = LOGO_TOP_MM + (LOGO_MAX_HEIGHT_MM - h) / 2.0;
                    self.canvas.image(logo, Rect::new(MARGIN_MM, top, w, h), BAND_COLOR);
                    true
                } else {
                    false
                }
            }
            None => false,
        };
        if !logo_drawn {
            self.draw_text_logo();
        }

        let company = self.company;
        let left = MARGIN_MM + 40.0;
        let white = RgbColor::WHITE;
        self.text(&company.name, left, 14.0, FontStyle::Bold, COMPANY_FONT_SIZE, white);
        self.text(&company.tagline, left, 20.0, FontStyle::Regular, 9.0, white);
        self.text(&company.slogan, left, 24.0, FontStyle::Italic, 8.0, white);
        self.text(&company.contact_line(), left, 28.0, FontStyle::Regular, 7.0, white);

        self.y = BODY_TOP_MM;
    }

    fn draw_text_logo(&mut self) {
        let company = self.company;
        let center = MARGIN_MM + LOGO_MAX_WIDTH_MM / 2.0;
        self.centered_text(&company.logo_text, center, 18.0, FontStyle::Bold, 16.0, RgbColor::WHITE);
        self.centered_text(&company.logo_subtext, center, 22.0, FontStyle::Regular, 8.0, RgbColor::WHITE);
    }

    fn draw_title(&mut self) {
        let y = self.y;
        self.text("QUOTE", MARGIN_MM, y + 7.0, FontStyle::Bold, TITLE_FONT_SIZE, RgbColor::BLACK);

        let box_x = self.page_width - 60.0;
        self.canvas
            .stroke_rect(Rect::new(box_x, y - 3.0, 55.0, 12.0), DATE_BORDER_COLOR, 0.8);
        let date = format!("Date: {}", format_quote_date(&self.date));
        self.text(&date, box_x + 5.0, y + 4.0, FontStyle::Regular, NORMAL_FONT_SIZE, RgbColor::BLACK);

        self.y += 25.0;
    }

    // ------------------------------------------------------------------------
    // Client Information
    // ------------------------------------------------------------------------

    fn draw_client_info(&mut self, form: &QuoteForm) {
        let value_offset = 22.0;
        let phone_label_offset = 95.0;
        let phone_value_offset = 115.0;
        let wide_width = self.content_width() - value_offset;
        let name_width = phone_label_offset - value_offset - 3.0;
        let phone_width = self.content_width() - phone_value_offset;

        let wrap = |text: &str, width: f32| wrap_text(text, FontStyle::Regular, NORMAL_FONT_SIZE, width);
        let name = wrap(&form.customer_name, name_width);
        let phone = wrap(&form.customer_phone, phone_width);
        let email = wrap(&form.customer_email, wide_width);
        let address = wrap(&form.customer_address, wide_width);

        let bold = FontStyle::Bold;
        let regular = FontStyle::Regular;
        let size = NORMAL_FONT_SIZE;
        let value_x = MARGIN_MM + value_offset;
        let advance = |i: usize| if i == 0 { 7.0 } else { BODY_LINE_MM };

        let mut rows = vec![PanelRow::new(5.0).cell(MARGIN_MM, "CLIENT INFORMATION", bold, SECTION_FONT_SIZE)];

        for i in 0..name.len().max(phone.len()).max(1) {
            let mut row = PanelRow::new(advance(i));
            if i == 0 {
                row = row
                    .cell(MARGIN_MM, "Name:", bold, size)
                    .cell(MARGIN_MM + phone_label_offset, "Phone:", bold, size);
            }
            if let Some(line) = name.get(i) {
                row = row.cell(value_x, line.as_str(), regular, size);
            }
            if let Some(line) = phone.get(i) {
                row = row.cell(MARGIN_MM + phone_value_offset, line.as_str(), regular, size);
            }
            rows.push(row);
        }

        for (label, lines) in [("Email:", &email), ("Address:", &address)] {
            for i in 0..lines.len().max(1) {
                let mut row = PanelRow::new(advance(i));
                if i == 0 {
                    row = row.cell(MARGIN_MM, label, bold, size);
                }
                if let Some(line) = lines.get(i) {
                    row = row.cell(value_x, line.as_str(), regular, size);
                }
                rows.push(row);
            }
        }

        let last = self.draw_panel(&rows, CLIENT_PANEL_BOTTOM_PADDING_MM, 8.0);
        self.y = last + AFTER_PANEL_MM;
    }

    // ------------------------------------------------------------------------
    // Project Description
    // ------------------------------------------------------------------------

    fn draw_project_description(&mut self, form: &QuoteForm) {
        let lines = wrap_text(
            &form.project_description,
            FontStyle::Regular,
            NORMAL_FONT_SIZE,
            self.content_width(),
        );

        // Keep the heading with at least its first line
        self.ensure_space(10.0 + BODY_LINE_MM);
        self.section_title("PROJECT DESCRIPTION");
        self.y += 10.0;

        for line in &lines {
            self.ensure_space(BODY_LINE_MM);
            self.text(line, MARGIN_MM, self.y, FontStyle::Regular, NORMAL_FONT_SIZE, RgbColor::BLACK);
            self.y += BODY_LINE_MM;
        }

        self.y += 12.0;
    }

    // ------------------------------------------------------------------------
    // Items and Pricing
    // ------------------------------------------------------------------------

    fn draw_table_header(&mut self) {
        let band = Rect::new(MARGIN_MM - 3.0, self.y - 3.0, self.content_width() + 6.0, 10.0);
        self.canvas.fill_rect(band, BAND_COLOR);

        let y = self.y + 3.0;
        let w = self.page_width;
        let white = RgbColor::WHITE;
        self.text("DESCRIPTION", MARGIN_MM, y, FontStyle::Bold, NORMAL_FONT_SIZE, white);
        self.text("QTY", w - QTY_COL_FROM_RIGHT_MM, y, FontStyle::Bold, NORMAL_FONT_SIZE, white);
        self.text("UNIT PRICE", w - PRICE_COL_FROM_RIGHT_MM, y, FontStyle::Bold, NORMAL_FONT_SIZE, white);
        self.text("AMOUNT", w - AMOUNT_COL_FROM_RIGHT_MM, y, FontStyle::Bold, NORMAL_FONT_SIZE, white);

        self.y += 12.0;
    }

    fn draw_items(&mut self, form: &QuoteForm) {
        self.ensure_space(25.0);
        self.section_title("ITEMS AND PRICING");
        self.y += 12.0;

        self.draw_table_header();

        let w = self.page_width;
        let description_width = w - ITEM_DESCRIPTION_WIDTH_FROM_RIGHT_MM;

        for (index, item) in form.items.iter().enumerate() {
            let description = wrap_text(&item.description, FontStyle::Regular, NORMAL_FONT_SIZE, description_width);
            let row_height = (description.len() as f32 * BODY_LINE_MM).max(MIN_ROW_HEIGHT_MM);

            if self.ensure_space(row_height + 2.0) {
                self.draw_table_header();
            }

            if index % 2 == 0 {
                let stripe = Rect::new(MARGIN_MM - 3.0, self.y - 2.0, self.content_width() + 6.0, row_height);
                self.canvas.fill_rect(stripe, ZEBRA_COLOR);
            }

            let text_y = self.y + 2.0;
            let regular = FontStyle::Regular;
            let size = NORMAL_FONT_SIZE;
            self.lines(&description, MARGIN_MM, text_y, regular, size, BODY_LINE_MM);
            self.text(&item.quantity.to_string(), w - QTY_COL_FROM_RIGHT_MM, text_y, regular, size, RgbColor::BLACK);
            self.text(&item.price.to_string(), w - PRICE_COL_FROM_RIGHT_MM, text_y, regular, size, RgbColor::BLACK);
            self.text(&item.amount().to_string(), w - AMOUNT_COL_FROM_RIGHT_MM, text_y, regular, size, RgbColor::BLACK);

            self.y += row_height + 2.0;
        }
    }

    fn draw_total(&mut self, form: &QuoteForm) {
        self.ensure_space(30.0);
        let w = self.page_width;

        self.canvas
            .line((w - 100.0, self.y), (w - 5.0, self.y), RgbColor::BLACK, 1.0);

        self.y += 8.0;
        self.canvas
            .fill_rect(Rect::new(w - 100.0, self.y - 3.0, 95.0, 12.0), BAND_COLOR);

        let y = self.y + 4.0;
        self.text("TOTAL AMOUNT:", w - 95.0, y, FontStyle::Bold, SECTION_FONT_SIZE, RgbColor::WHITE);

        let total = form.total().to_string();
        let total_width = text_width_mm(&total, FontStyle::Bold, 14.0);
        self.text(&total, w - 8.0 - total_width, y, FontStyle::Bold, 14.0, RgbColor::WHITE);

        self.y += 20.0;
    }

    // ------------------------------------------------------------------------
    // Terms, Signatures, Footer
    // ------------------------------------------------------------------------

    fn draw_terms(&mut self) {
        let width = self.content_width() - 6.0;
        let mut rows = vec![PanelRow::new(4.0).cell(MARGIN_MM, "TERMS AND CONDITIONS", FontStyle::Bold, 11.0)];

        for (index, term) in self.company.terms().iter().enumerate() {
            let lines = wrap_text(term, FontStyle::Regular, TERMS_FONT_SIZE, width);
            for (i, line) in lines.into_iter().enumerate() {
                let advance = match (index, i) {
                    (0, 0) => 6.0,
                    (_, 0) => TERMS_LINE_MM + 1.0,
                    _ => TERMS_LINE_MM,
                };
                rows.push(PanelRow::new(advance).cell(MARGIN_MM, line, FontStyle::Regular, TERMS_FONT_SIZE));
            }
        }

        let last = self.draw_panel(&rows, TERMS_PANEL_BOTTOM_PADDING_MM, 0.0);
        self.y = last + AFTER_PANEL_MM;
    }

    fn draw_signatures(&mut self) {
        self.ensure_space(30.0);

        let line_width = 70.0;
        let gap = 40.0;
        let center = self.page_width / 2.0;
        let left = (center - gap / 2.0 - line_width, center - gap / 2.0);
        let right = (center + gap / 2.0, center + gap / 2.0 + line_width);

        let y = self.y;
        self.canvas.line((left.0, y), (left.1, y), RgbColor::BLACK, 0.8);
        self.canvas.line((right.0, y), (right.1, y), RgbColor::BLACK, 0.8);

        let company = self.company;
        self.centered_text("Client", (left.0 + left.1) / 2.0, y + 7.0, FontStyle::Bold, 10.0, RgbColor::BLACK);
        self.centered_text(&company.name, (right.0 + right.1) / 2.0, y + 7.0, FontStyle::Bold, 10.0, RgbColor::BLACK);

        self.y += 12.0;
    }

    /// Drawn once, on whatever page is current when the body is done.
    fn draw_footer(&mut self) {
        let top = self.page_height - FOOTER_HEIGHT_MM;
        self.canvas
            .fill_rect(Rect::new(0.0, top, self.page_width, FOOTER_HEIGHT_MM), BAND_COLOR);

        let center = self.page_width / 2.0;
        let company = self.company;
        self.centered_text(&company.thank_you_line(), center, top + 8.0, FontStyle::Regular, 9.0, RgbColor::WHITE);
        self.centered_text(&company.footer_note, center, top + 15.0, FontStyle::Regular, 8.0, RgbColor::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, RecordingCanvas};
    use crate::quote::{ClientDetails, Money, NewItem, QuoteItem};
    use ::image::{Rgba, RgbaImage};

    const A4: (f32, f32) = (210.0, 297.0);

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    fn form_with(items: Vec<QuoteItem>, description: &str) -> QuoteForm {
        QuoteForm::from_parts(
            ClientDetails {
                customer_name: "Maria Lopez".into(),
                customer_email: "maria@example.com".into(),
                customer_phone: "(305) 555-0100".into(),
                customer_address: "1 Ocean Dr, Miami, FL 33139".into(),
                project_description: description.into(),
            },
            items,
        )
    }

    fn item(description: &str, quantity: u32, cents: u64) -> QuoteItem {
        NewItem::new(description, quantity, Money::from_cents(cents)).into()
    }

    fn render(form: &QuoteForm, logo: Option<&DynamicImage>) -> (RecordingCanvas, RenderSummary) {
        let mut canvas = RecordingCanvas::new(A4.0, A4.1);
        let summary = render_quote(&mut canvas, form, &CompanyInfo::default(), logo, date());
        (canvas, summary)
    }

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn small_quote_draws_every_section() {
        let form = form_with(
            vec![item("Porcelain tile install", 120, 875), item("Demolition", 1, 50_000)],
            "Retile the master bathroom floor.",
        );
        let (canvas, summary) = render(&form, None);

        assert!(summary.pages <= 2);
        let texts = canvas.all_texts();
        for expected in [
            "WNL FLOORING",
            "QUOTE",
            "Date: 3/7/2025",
            "CLIENT INFORMATION",
            "Maria Lopez",
            "maria@example.com",
            "PROJECT DESCRIPTION",
            "ITEMS AND PRICING",
            "Porcelain tile install",
            "$8.75",
            "$1,050.00",
            "TOTAL AMOUNT:",
            "$1,550.00",
            "TERMS AND CONDITIONS",
            "Client",
            "Thank you for considering WNL FLOORING for your project.",
        ] {
            assert!(texts.contains(&expected), "missing {expected:?}");
        }
    }

    #[test]
    fn header_band_is_drawn_first() {
        let form = form_with(vec![item("Labor", 1, 100)], "Small job");
        let (canvas, _) = render(&form, None);
        assert_eq!(
            canvas.pages()[0][0],
            DrawOp::FillRect {
                rect: Rect::new(0.0, 0.0, 210.0, HEADER_HEIGHT_MM),
                color: BAND_COLOR,
            }
        );
    }

    #[test]
    fn text_logo_is_used_without_image() {
        let form = form_with(vec![item("Labor", 1, 100)], "Small job");
        let (canvas, _) = render(&form, None);
        let texts = canvas.texts_on(0);
        assert!(texts.contains(&"WNL"));
        assert!(texts.contains(&"FLOORING"));
        assert!(!canvas.pages()[0].iter().any(|op| matches!(op, DrawOp::Image { .. })));
    }

    #[test]
    fn image_logo_replaces_text_logo() {
        let logo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 32, Rgba([255, 0, 0, 255])));
        let form = form_with(vec![item("Labor", 1, 100)], "Small job");
        let (canvas, _) = render(&form, Some(&logo));

        let image = canvas.pages()[0].iter().find_map(|op| match op {
            DrawOp::Image { rect, background } => Some((*rect, *background)),
            _ => None,
        });
        let (rect, background) = image.expect("logo drawn");
        assert_eq!(background, BAND_COLOR);
        assert!(rect.width <= LOGO_MAX_WIDTH_MM && rect.height <= LOGO_MAX_HEIGHT_MM);
        assert!((rect.width / rect.height - 2.0).abs() < 1e-3);
        assert!(!canvas.texts_on(0).contains(&"FLOORING"));
    }

    #[test]
    fn long_item_list_repeats_table_header_on_each_page() {
        let items: Vec<QuoteItem> = (1..=70)
            .map(|i| item(&format!("Line item number {i}"), i, 1_000))
            .collect();
        let form = form_with(items, "Whole-house flooring.");
        let (canvas, summary) = render(&form, None);

        assert!(summary.pages >= 3, "pages = {}", summary.pages);
        for page in 0..summary.pages {
            let texts = canvas.texts_on(page);
            let has_items = texts.iter().any(|t| t.starts_with("Line item number"));
            if has_items {
                assert!(texts.contains(&"DESCRIPTION"), "page {page} lacks table header");
            }
        }

        let all = canvas.all_texts();
        for i in 1..=70 {
            let label = format!("Line item number {i}");
            assert_eq!(all.iter().filter(|t| **t == label).count(), 1, "{label}");
        }
    }

    #[test]
    fn header_only_on_first_page_and_footer_only_on_last() {
        let items: Vec<QuoteItem> = (0..60).map(|i| item(&format!("Item {i}"), 1, 100)).collect();
        let form = form_with(items, "Multi-page quote");
        let (canvas, summary) = render(&form, None);
        assert!(summary.pages > 1);

        let thanks = CompanyInfo::default().thank_you_line();
        let tagline = CompanyInfo::default().tagline;
        for page in 0..summary.pages {
            let texts = canvas.texts_on(page);
            let last = page == summary.pages - 1;
            assert_eq!(texts.contains(&thanks.as_str()), last, "footer on page {page}");
            assert_eq!(texts.contains(&tagline.as_str()), page == 0, "header on page {page}");
        }
    }

    #[test]
    fn long_description_spans_pages_without_losing_words() {
        let paragraph = "Remove existing vanity and toilet, demolish tile floor down to the \
                         subfloor, install cement board, level, and lay new porcelain tile. ";
        let description = paragraph.repeat(60);
        let form = form_with(vec![item("Labor", 1, 100)], description.trim());
        let (canvas, summary) = render(&form, None);
        assert!(summary.pages >= 2);

        let lines = wrap_text(description.trim(), FontStyle::Regular, NORMAL_FONT_SIZE, 170.0);
        let drawn: Vec<&str> = canvas
            .all_texts()
            .into_iter()
            .filter(|t| lines.iter().any(|l| l == t))
            .collect();
        assert_eq!(words(&drawn.join(" ")), words(&description));
    }

    #[test]
    fn even_rows_are_striped() {
        let items: Vec<QuoteItem> = (0..5).map(|i| item(&format!("Item {i}"), 1, 100)).collect();
        let form = form_with(items, "Stripes");
        let (canvas, _) = render(&form, None);
        let stripes = canvas.pages()[0]
            .iter()
            .filter(|op| matches!(op, DrawOp::FillRect { color, .. } if *color == ZEBRA_COLOR))
            .count();
        assert_eq!(stripes, 3);
    }

    #[test]
    fn body_text_stays_out_of_footer_band() {
        let items: Vec<QuoteItem> = (0..45)
            .map(|i| item(&"Large format tile with custom niche ".repeat(4)[..140].to_string(), i + 1, 99))
            .collect();
        let form = form_with(items, &"word ".repeat(900));
        let (canvas, _) = render(&form, None);
        assert_body_above_footer(&canvas, &CompanyInfo::default());
    }

    #[test]
    fn wrapped_item_rows_are_taller() {
        let long = "Custom shower pan with linear drain, full waterproofing membrane, tiled bench seat, \
                    two recessed niches, frameless glass panel and matching porcelain trim on every edge";
        let form = form_with(vec![item(long, 1, 100), item("Short", 1, 100)], "x");
        let (canvas, _) = render(&form, None);

        let y_of = |label: &str| {
            canvas.pages()[0].iter().find_map(|op| match op {
                DrawOp::Text { text, y, .. } if text == label => Some(*y),
                _ => None,
            })
        };
        let lines = wrap_text(long, FontStyle::Regular, NORMAL_FONT_SIZE, 60.0);
        assert!(lines.len() >= 3, "{lines:?}");
        let first_y = y_of(&lines[0]).unwrap();
        let short_y = y_of("Short").unwrap();
        let expected = lines.len() as f32 * BODY_LINE_MM + 2.0;
        assert!(expected > MIN_ROW_HEIGHT_MM + 2.0);
        assert!((short_y - first_y - expected).abs() < 1e-3);
    }

    fn assert_body_above_footer(canvas: &RecordingCanvas, company: &CompanyInfo) {
        let thanks = company.thank_you_line();
        for (page, ops) in canvas.pages().iter().enumerate() {
            for op in ops {
                if let DrawOp::Text { text, y, .. } = op {
                    if *text == thanks || *text == company.footer_note {
                        continue;
                    }
                    assert!(*y <= A4.1 - FOOTER_HEIGHT_MM, "{text:?} at {y} on page {page}");
                }
            }
        }
    }

    fn pages_with_panel(canvas: &RecordingCanvas) -> Vec<usize> {
        (0..canvas.pages().len())
            .filter(|&page| {
                canvas.pages()[page]
                    .iter()
                    .any(|op| matches!(op, DrawOp::FillRect { color, .. } if *color == PANEL_COLOR))
            })
            .collect()
    }

    #[test]
    fn long_address_flows_across_pages() {
        let address = "Unit 4B, 1200 Brickell Bay Drive, Miami, FL 33131. ".repeat(120);
        let mut form = form_with(vec![item("Labor", 1, 100)], "Small job");
        form.customer_address = address.trim().to_string();
        let company = CompanyInfo::default();
        let (canvas, summary) = render(&form, None);
        assert!(summary.pages >= 2);

        assert_body_above_footer(&canvas, &company);

        let lines = wrap_text(&form.customer_address, FontStyle::Regular, NORMAL_FONT_SIZE, 170.0 - 22.0);
        let drawn: Vec<&str> = canvas
            .all_texts()
            .into_iter()
            .filter(|t| lines.iter().any(|l| l == t))
            .collect();
        assert_eq!(words(&drawn.join(" ")), words(&address));

        // Every page holding part of the address has its own panel
        for page in 0..summary.pages {
            let texts = canvas.texts_on(page);
            if texts.iter().any(|t| lines.iter().any(|l| l == t)) {
                assert!(pages_with_panel(&canvas).contains(&page), "page {page} lacks a panel");
            }
        }
    }

    #[test]
    fn long_term_flows_across_pages_inside_panels() {
        let term = "Payment terms apply to all work ".repeat(400);
        let company = CompanyInfo {
            terms: Some(vec![term.clone()]),
            ..CompanyInfo::default()
        };
        let form = form_with(vec![item("Labor", 1, 100)], "Small job");
        let mut canvas = RecordingCanvas::new(A4.0, A4.1);
        let summary = render_quote(&mut canvas, &form, &company, None, date());
        assert!(summary.pages >= 2);

        assert_body_above_footer(&canvas, &company);

        let lines = wrap_text(&term, FontStyle::Regular, TERMS_FONT_SIZE, 170.0 - 6.0);
        let drawn: Vec<&str> = canvas
            .all_texts()
            .into_iter()
            .filter(|t| lines.iter().any(|l| l == t))
            .collect();
        assert_eq!(words(&drawn.join(" ")), words(&term));

        let panels = pages_with_panel(&canvas);
        for page in 0..summary.pages {
            if canvas.texts_on(page).iter().any(|t| lines.iter().any(|l| l == t)) {
                assert!(panels.contains(&page), "page {page} lacks a panel");
            }
        }
    }
}
