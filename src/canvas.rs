// canvas: Paginated drawing surface used by the quote renderer
//
// All coordinates are millimetres measured from the top-left corner of the
// current page; text `y` is the baseline. Implementations translate to
// their own coordinate system.

use ::image::DynamicImage;

use crate::text::FontStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor(pub u8, pub u8, pub u8);

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor(0, 0, 0);
    pub const WHITE: RgbColor = RgbColor(255, 255, 255);

    /// Components scaled to 0.0..=1.0
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        )
    }
}

/// Axis-aligned rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: FontStyle,
    pub size: f32,
    pub color: RgbColor,
}

impl TextStyle {
    pub fn new(font: FontStyle, size: f32, color: RgbColor) -> Self {
        Self { font, size, color }
    }
}

pub trait Canvas {
    /// Page width and height in mm
    fn page_size(&self) -> (f32, f32);

    fn page_count(&self) -> usize;

    /// Starts a new page; subsequent drawing goes there.
    fn add_page(&mut self);

    fn text(&mut self, text: &str, x: f32, y: f32, style: TextStyle);

    fn fill_rect(&mut self, rect: Rect, color: RgbColor);

    fn stroke_rect(&mut self, rect: Rect, color: RgbColor, thickness: f32);

    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: RgbColor, thickness: f32);

    /// Draws `image` scaled into `rect`, flattening transparency onto
    /// `background`.
    fn image(&mut self, image: &DynamicImage, rect: Rect, background: RgbColor);
}

// ============================================================================
// Recording Canvas
// ============================================================================

/// A drawing command captured by [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        x: f32,
        y: f32,
        style: TextStyle,
    },
    FillRect {
        rect: Rect,
        color: RgbColor,
    },
    StrokeRect {
        rect: Rect,
        color: RgbColor,
        thickness: f32,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: RgbColor,
        thickness: f32,
    },
    Image {
        rect: Rect,
        background: RgbColor,
    },
}

/// Canvas that keeps the drawing commands of every page in memory.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    width: f32,
    height: f32,
    pages: Vec<Vec<DrawOp>>,
}

impl RecordingCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            pages: vec![Vec::new()],
        }
    }

    pub fn pages(&self) -> &[Vec<DrawOp>] {
        &self.pages
    }

    /// Text strings drawn on page `index`, in drawing order.
    pub fn texts_on(&self, index: usize) -> Vec<&str> {
        self.pages
            .get(index)
            .map(|ops| {
                ops.iter()
                    .filter_map(|op| match op {
                        DrawOp::Text { text, .. } => Some(text.as_str()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All text strings on all pages.
    pub fn all_texts(&self) -> Vec<&str> {
        (0..self.pages.len()).flat_map(|i| self.texts_on(i)).collect()
    }

    fn current(&mut self) -> &mut Vec<DrawOp> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

impl Canvas for RecordingCanvas {
    fn page_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn add_page(&mut self) {
        self.pages.push(Vec::new());
    }

    fn text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        self.current().push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            style,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: RgbColor) {
        self.current().push(DrawOp::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: RgbColor, thickness: f32) {
        self.current().push(DrawOp::StrokeRect {
            rect,
            color,
            thickness,
        });
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: RgbColor, thickness: f32) {
        self.current().push(DrawOp::Line {
            from,
            to,
            color,
            thickness,
        });
    }

    fn image(&mut self, _image: &DynamicImage, rect: Rect, background: RgbColor) {
        self.current().push(DrawOp::Image { rect, background });
    }
}
