//! Spectrogram image input and grayscale conversion

use crate::error::{AnalysisError, Result};
use image::{DynamicImage, RgbImage};
use ndarray::Array2;
use std::path::Path;

/// Pixel layout of raw frame buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb,
    Bgr,
    Rgba,
    Bgra,
    Grayscale,
}

impl PixelFormat {
    /// Bytes per pixel
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Rgb | PixelFormat::Bgr => 3,
            PixelFormat::Rgba | PixelFormat::Bgra => 4,
            PixelFormat::Grayscale => 1,
        }
    }
}

/// A decoded spectrogram held as 8-bit RGB
///
/// Read-only once constructed. Alpha channels are dropped on load.
#[derive(Debug, Clone)]
pub struct SpectrogramImage {
    rgb: RgbImage,
}

impl SpectrogramImage {
    /// Load and decode an image file, sniffing the format from its content
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let image = Self::from_bytes(&bytes)?;
        log::debug!(
            "Loaded {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(image)
    }

    /// Decode an in-memory PNG/JPEG upload
    ///
    /// Any failure here is a decode error, including truncated streams the
    /// codecs surface as `UnexpectedEof`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AnalysisError::decode(format!("Failed to decode image: {}", e)))?;
        Ok(Self::from_dynamic_image(img))
    }

    pub fn from_dynamic_image(img: DynamicImage) -> Self {
        Self { rgb: img.to_rgb8() }
    }

    pub fn from_rgb(rgb: RgbImage) -> Self {
        Self { rgb }
    }

    /// Wrap a raw frame buffer, converting it to RGB
    pub fn from_raw(data: &[u8], width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let expected = width as usize * height as usize * format.channels();
        if data.len() != expected {
            return Err(AnalysisError::InvalidDimensions {
                expected: vec![height as usize, width as usize, format.channels()],
                actual: vec![data.len()],
            });
        }

        let rgb_data = convert_to_rgb(data, format);
        let rgb = RgbImage::from_raw(width, height, rgb_data).ok_or_else(|| {
            AnalysisError::preprocessing("Failed to create image buffer".to_string())
        })?;

        Ok(Self { rgb })
    }

    pub fn width(&self) -> u32 {
        self.rgb.width()
    }

    pub fn height(&self) -> u32 {
        self.rgb.height()
    }

    pub fn as_rgb(&self) -> &RgbImage {
        &self.rgb
    }

    /// Grayscale intensity grid of shape (height, width), values in [0, 1]
    ///
    /// Uses fixed-point BT.601 luma quantized to 8 bits before scaling, so a
    /// color image and its pre-converted gray version yield the same grid.
    pub fn to_intensity_grid(&self) -> Array2<f32> {
        let (width, height) = self.rgb.dimensions();
        let mut grid = Array2::<f32>::zeros((height as usize, width as usize));

        for (x, y, pixel) in self.rgb.enumerate_pixels() {
            let [r, g, b] = pixel.0;
            grid[[y as usize, x as usize]] = luma(r, g, b) as f32 / 255.0;
        }

        grid
    }
}

/// Load an image file straight into a normalized grayscale grid
pub fn load_spectrogram_gray<P: AsRef<Path>>(path: P) -> Result<Array2<f32>> {
    Ok(SpectrogramImage::from_file(path)?.to_intensity_grid())
}

/// BT.601 luma in 14-bit fixed point, the same integer form OpenCV uses
fn luma(r: u8, g: u8, b: u8) -> u8 {
    const R_WEIGHT: u32 = 4899;
    const G_WEIGHT: u32 = 9617;
    const B_WEIGHT: u32 = 1868;
    const SHIFT: u32 = 14;

    let y = r as u32 * R_WEIGHT
        + g as u32 * G_WEIGHT
        + b as u32 * B_WEIGHT
        + (1 << (SHIFT - 1));
    (y >> SHIFT) as u8
}

fn convert_to_rgb(data: &[u8], format: PixelFormat) -> Vec<u8> {
    match format {
        PixelFormat::Rgb => data.to_vec(),
        PixelFormat::Bgr => data
            .chunks_exact(3)
            .flat_map(|px| [px[2], px[1], px[0]])
            .collect(),
        PixelFormat::Rgba => data
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect(),
        PixelFormat::Bgra => data
            .chunks_exact(4)
            .flat_map(|px| [px[2], px[1], px[0]])
            .collect(),
        PixelFormat::Grayscale => data.iter().flat_map(|&v| [v, v, v]).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb};
    use std::io::Cursor;

    fn encode(img: &RgbImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img.clone())
            .write_to(&mut buf, format)
            .unwrap();
        buf.into_inner()
    }

    fn encode_png(img: &RgbImage) -> Vec<u8> {
        encode(img, ImageFormat::Png)
    }

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 4) as u8, (y * 4) as u8, ((x * y) % 251) as u8])
        })
    }

    #[test]
    fn test_luma_extremes() {
        assert_eq!(luma(0, 0, 0), 0);
        assert_eq!(luma(255, 255, 255), 255);
        assert_eq!(luma(255, 0, 0), 76);
        assert_eq!(luma(0, 255, 0), 150);
        assert_eq!(luma(0, 0, 255), 29);
    }

    #[test]
    fn test_luma_matches_fixed_point_rounding() {
        // Float rounding of 0.299/0.587/0.114 gives 26 here
        assert_eq!(luma(0, 3, 217), 27);
        assert_eq!(luma(102, 102, 102), 102);
    }

    #[test]
    fn test_bgr_conversion() {
        let bgr = [64, 128, 255, 100, 150, 200];
        let image = SpectrogramImage::from_raw(&bgr, 2, 1, PixelFormat::Bgr).unwrap();
        assert_eq!(image.as_rgb().get_pixel(0, 0), &Rgb([255, 128, 64]));
        assert_eq!(image.as_rgb().get_pixel(1, 0), &Rgb([200, 150, 100]));
    }

    #[test]
    fn test_rgba_drops_alpha() {
        let rgba = [10, 20, 30, 0, 40, 50, 60, 255];
        let image = SpectrogramImage::from_raw(&rgba, 2, 1, PixelFormat::Rgba).unwrap();
        assert_eq!(image.as_rgb().get_pixel(0, 0), &Rgb([10, 20, 30]));
        assert_eq!(image.as_rgb().get_pixel(1, 0), &Rgb([40, 50, 60]));
    }

    #[test]
    fn test_raw_size_mismatch() {
        let result = SpectrogramImage::from_raw(&[0u8; 5], 2, 1, PixelFormat::Rgb);
        assert!(matches!(
            result,
            Err(AnalysisError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_intensity_grid_shape_and_range() {
        let mut img = RgbImage::new(4, 3);
        img.put_pixel(2, 1, Rgb([255, 255, 255]));
        let grid = SpectrogramImage::from_rgb(img).to_intensity_grid();

        assert_eq!(grid.dim(), (3, 4));
        assert_eq!(grid[[1, 2]], 1.0);
        assert_eq!(grid[[0, 0]], 0.0);
    }

    #[test]
    fn test_decode_png_bytes() {
        let mut img = RgbImage::new(5, 2);
        img.put_pixel(4, 0, Rgb([0, 255, 0]));
        let image = SpectrogramImage::from_bytes(&encode_png(&img)).unwrap();

        assert_eq!((image.width(), image.height()), (5, 2));
        assert_eq!(image.as_rgb().get_pixel(4, 0), &Rgb([0, 255, 0]));
    }

    #[test]
    fn test_decode_jpeg_bytes() {
        let img = RgbImage::from_pixel(16, 8, Rgb([128, 128, 128]));
        let bytes = encode(&img, ImageFormat::Jpeg);
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

        let image = SpectrogramImage::from_bytes(&bytes).unwrap();
        assert_eq!((image.width(), image.height()), (16, 8));
        let [r, g, b] = image.as_rgb().get_pixel(7, 3).0;
        for channel in [r, g, b] {
            assert!((channel as i32 - 128).abs() <= 3);
        }
    }

    #[test]
    fn test_truncated_png_is_decode_error() {
        let bytes = encode_png(&gradient(64, 64));
        let result = SpectrogramImage::from_bytes(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(AnalysisError::DecodeError(_))));
    }

    #[test]
    fn test_corrupt_bytes_fail_to_decode() {
        let result = SpectrogramImage::from_bytes(b"definitely not a png");
        assert!(matches!(result, Err(AnalysisError::DecodeError(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_spectrogram_gray("/nonexistent/spectrogram.png");
        assert!(matches!(result, Err(AnalysisError::IoError(_))));
    }

    #[test]
    fn test_load_gray_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.png");
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(1, 0, Rgb([255, 255, 255]));
        img.put_pixel(1, 1, Rgb([255, 255, 255]));
        std::fs::write(&path, encode_png(&img)).unwrap();

        let grid = load_spectrogram_gray(&path).unwrap();
        assert_eq!(grid.dim(), (2, 3));
        assert_eq!(grid.column(1).sum(), 2.0);
        assert_eq!(grid.column(0).sum(), 0.0);
    }
}
