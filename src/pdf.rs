// pdf: printpdf-backed canvas and document generation

use ::image::{DynamicImage, Rgba, RgbImage};
use chrono::NaiveDate;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;
use tracing::info;

use crate::canvas::{Canvas, Rect, RgbColor, TextStyle};
use crate::config::CompanyInfo;
use crate::error::{AppError, Result};
use crate::quote::QuoteForm;
use crate::render::{render_quote, RenderSummary};
use crate::text::FontStyle;

/// Millimetres to points, for stroke widths
const MM_TO_PT: f32 = 72.0 / 25.4;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }
}

/// Canvas that draws into a PDF document using the built-in Helvetica fonts.
pub struct PdfCanvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    width: f32,
    height: f32,
    pages: usize,
}

impl PdfCanvas {
    pub fn new(title: &str, (width, height): (f32, f32)) -> Result<Self> {
        let (doc, page1, layer1) = PdfDocument::new(title, Mm(width), Mm(height), "Layer 1");
        let layer = doc.get_page(page1).get_layer(layer1);

        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| AppError::PdfError(e.to_string()))?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(|e| AppError::PdfError(e.to_string()))?,
            italic: doc
                .add_builtin_font(BuiltinFont::HelveticaOblique)
                .map_err(|e| AppError::PdfError(e.to_string()))?,
        };

        Ok(Self {
            doc,
            layer,
            fonts,
            width,
            height,
            pages: 1,
        })
    }

    /// Serializes the document.
    pub fn finish(self) -> Result<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| AppError::PdfError(e.to_string()))
    }

    /// PDF y axis runs bottom-up
    fn flip(&self, y: f32) -> Mm {
        Mm(self.height - y)
    }

    fn pdf_rect(&self, rect: Rect, mode: PaintMode) -> printpdf::Rect {
        printpdf::Rect::new(
            Mm(rect.x),
            self.flip(rect.bottom()),
            Mm(rect.x + rect.width),
            self.flip(rect.y),
        )
        .with_mode(mode)
        .with_winding(WindingOrder::NonZero)
    }
}

fn pdf_color(color: RgbColor) -> Color {
    let (r, g, b) = color.to_unit();
    Color::Rgb(Rgb::new(r, g, b, None))
}

/// The built-in fonts only cover single-byte text; common typographic
/// characters are mapped to ASCII and anything else becomes `?`.
pub fn pdf_safe_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' | '\u{2022}' => '-',
            '\t' => ' ',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '?',
        })
        .collect()
}

impl Canvas for PdfCanvas {
    fn page_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn add_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(self.width), Mm(self.height), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.pages += 1;
    }

    fn text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        self.layer.set_fill_color(pdf_color(style.color));
        self.layer.use_text(
            pdf_safe_text(text),
            style.size,
            Mm(x),
            self.flip(y),
            self.fonts.get(style.font),
        );
    }

    fn fill_rect(&mut self, rect: Rect, color: RgbColor) {
        self.layer.set_fill_color(pdf_color(color));
        self.layer.add_rect(self.pdf_rect(rect, PaintMode::Fill));
    }

    fn stroke_rect(&mut self, rect: Rect, color: RgbColor, thickness: f32) {
        self.layer.set_outline_color(pdf_color(color));
        self.layer.set_outline_thickness(thickness * MM_TO_PT);
        self.layer.add_rect(self.pdf_rect(rect, PaintMode::Stroke));
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: RgbColor, thickness: f32) {
        self.layer.set_outline_color(pdf_color(color));
        self.layer.set_outline_thickness(thickness * MM_TO_PT);
        let points = vec![
            (Point::new(Mm(from.0), self.flip(from.1)), false),
            (Point::new(Mm(to.0), self.flip(to.1)), false),
        ];
        self.layer.add_line(Line {
            points,
            is_closed: false,
        });
    }

    fn image(&mut self, image: &DynamicImage, rect: Rect, background: RgbColor) {
        let flattened = flatten_onto(image, background);
        let (width_px, height_px) = flattened.dimensions();
        if width_px == 0 || rect.width <= 0.0 {
            return;
        }

        let image = Image::from(ImageXObject {
            width: Px(width_px as usize),
            height: Px(height_px as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: flattened.into_raw(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });

        // DPI = pixels / (mm / 25.4)
        let dpi = (width_px as f32) / (rect.width / 25.4);

        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(rect.x)),
                translate_y: Some(self.flip(rect.bottom())),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
    }
}

/// Composites an image with alpha onto a solid background.
fn flatten_onto(image: &DynamicImage, background: RgbColor) -> RgbImage {
    let rgba_image = image.to_rgba8();
    let (width_px, height_px) = rgba_image.dimensions();
    let bg = [
        f32::from(background.0),
        f32::from(background.1),
        f32::from(background.2),
    ];

    let mut rgb_image = RgbImage::new(width_px, height_px);
    for (x, y, pixel) in rgba_image.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        let alpha = a as f32 / 255.0;
        let blend = |c: u8, bg: f32| (c as f32 * alpha + bg * (1.0 - alpha)).round() as u8;
        rgb_image.put_pixel(
            x,
            y,
            ::image::Rgb([blend(r, bg[0]), blend(g, bg[1]), blend(b, bg[2])]),
        );
    }
    rgb_image
}

// ============================================================================
// Document Generation
// ============================================================================

/// Lays out `form` and returns the finished PDF bytes.
pub fn generate_pdf(
    form: &QuoteForm,
    company: &CompanyInfo,
    logo: Option<&DynamicImage>,
    date: NaiveDate,
) -> Result<(Vec<u8>, RenderSummary)> {
    let title = format!("Quote - {}", form.customer_name);
    let mut canvas = PdfCanvas::new(&title, company.page_size.dimensions_mm())?;
    let summary = render_quote(&mut canvas, form, company, logo, date);
    let bytes = canvas.finish()?;

    info!(
        customer = %form.customer_name,
        pages = summary.pages,
        size = bytes.len(),
        "generated quote document"
    );
    Ok((bytes, summary))
}
