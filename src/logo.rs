// logo: Letterhead logo loading (file or URL)

use ::image::DynamicImage;
use std::io::Read;
use tracing::debug;

use crate::error::{AppError, Result};

/// Upper bound on a downloaded logo
const MAX_LOGO_BYTES: u64 = 10 * 1024 * 1024;

/// Loads a logo from a file path or an `http(s)` URL.
pub fn load_logo(source: &str) -> Result<DynamicImage> {
    let image_bytes = if source.starts_with("http://") || source.starts_with("https://") {
        let response = ureq::get(source)
            .call()
            .map_err(|e| AppError::LogoError(format!("Failed to fetch URL: {}", e)))?;

        let mut bytes = Vec::new();
        response
            .into_reader()
            .take(MAX_LOGO_BYTES)
            .read_to_end(&mut bytes)
            .map_err(|e| AppError::LogoError(format!("Failed to read response: {}", e)))?;
        bytes
    } else {
        std::fs::read(source).map_err(|e| AppError::LogoError(format!("{}: {}", source, e)))?
    };

    let img = ::image::load_from_memory(&image_bytes)
        .map_err(|e| AppError::LogoError(format!("Failed to decode image: {}", e)))?;

    debug!(source, width = img.width(), height = img.height(), "loaded logo");
    Ok(img)
}

/// Largest size (mm) with the image's aspect ratio that fits in the box.
pub fn fit_within(width_px: u32, height_px: u32, max_width_mm: f32, max_height_mm: f32) -> (f32, f32) {
    if width_px == 0 || height_px == 0 {
        return (0.0, 0.0);
    }
    let aspect_ratio = width_px as f32 / height_px as f32;
    if max_width_mm / max_height_mm > aspect_ratio {
        // Height-constrained
        (max_height_mm * aspect_ratio, max_height_mm)
    } else {
        // Width-constrained
        (max_width_mm, max_width_mm / aspect_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{ImageFormat, RgbaImage};
    use std::io::Cursor;

    #[test]
    fn wide_image_is_width_constrained() {
        let (w, h) = fit_within(400, 100, 32.0, 25.0);
        assert_eq!(w, 32.0);
        assert!((h - 8.0).abs() < 1e-4);
    }

    #[test]
    fn tall_image_is_height_constrained() {
        let (w, h) = fit_within(100, 200, 32.0, 25.0);
        assert_eq!(h, 25.0);
        assert!((w - 12.5).abs() < 1e-4);
    }

    #[test]
    fn empty_image_has_no_size() {
        assert_eq!(fit_within(0, 10, 32.0, 25.0), (0.0, 0.0));
    }

    #[test]
    fn missing_file_is_a_logo_error() {
        let err = load_logo("no/such/logo.png").unwrap_err();
        assert!(matches!(err, AppError::LogoError(_)));
    }

    #[test]
    fn loads_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        let mut bytes = Vec::new();
        RgbaImage::from_pixel(4, 2, ::image::Rgba([200, 10, 10, 255]))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        std::fs::write(&path, bytes).unwrap();

        let img = load_logo(path.to_str().unwrap()).unwrap();
        assert_eq!((img.width(), img.height()), (4, 2));
    }

    #[test]
    fn undecodable_file_is_a_logo_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"not an image").unwrap();
        let err = load_logo(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, AppError::LogoError(ref m) if m.contains("decode")));
    }
}
