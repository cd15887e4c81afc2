//! Image preprocessing for the classifier input tensor

use crate::config::{AnalyzerConfig, PixelScale, ResizeFilter, TensorLayout};
use crate::error::{AnalysisError, Result};
use crate::image_data::SpectrogramImage;
use image::imageops;
use ndarray::Array4;

/// Image preprocessor for preparing input data for the model
///
/// Defaults mirror the Keras `load_img(target_size=...)` + `img_to_array`
/// convention: nearest-neighbour resize, channels-last, raw 0..255 values.
#[derive(Debug, Clone)]
pub struct ImagePreprocessor {
    /// Target input size (width, height)
    input_size: (u32, u32),
    layout: TensorLayout,
    scale: PixelScale,
    filter: ResizeFilter,
}

impl ImagePreprocessor {
    /// Create new image preprocessor
    pub fn new(input_size: (u32, u32)) -> Self {
        Self {
            input_size,
            layout: TensorLayout::default(),
            scale: PixelScale::default(),
            filter: ResizeFilter::default(),
        }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(config.input_size)
            .with_layout(config.tensor_layout)
            .with_scale(config.pixel_scale)
            .with_filter(config.resize_filter)
    }

    pub fn with_layout(mut self, layout: TensorLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_scale(mut self, scale: PixelScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_filter(mut self, filter: ResizeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Get input size
    pub fn input_size(&self) -> (u32, u32) {
        self.input_size
    }

    /// Resize and convert an image to a batch-of-one input tensor
    pub fn preprocess(&self, image: &SpectrogramImage) -> Result<Array4<f32>> {
        let (width, height) = self.input_size;
        if width == 0 || height == 0 {
            return Err(AnalysisError::preprocessing(format!(
                "Invalid target size {}x{}",
                width, height
            )));
        }
        if image.width() == 0 || image.height() == 0 {
            return Err(AnalysisError::InvalidDimensions {
                expected: vec![1, 1],
                actual: vec![image.height() as usize, image.width() as usize],
            });
        }

        let rgb = image.as_rgb();
        let resized = if rgb.dimensions() == self.input_size {
            rgb.clone()
        } else {
            imageops::resize(rgb, width, height, self.filter.into())
        };

        let (w, h) = (width as usize, height as usize);
        let mut tensor = match self.layout {
            TensorLayout::Nhwc => Array4::<f32>::zeros((1, h, w, 3)),
            TensorLayout::Nchw => Array4::<f32>::zeros((1, 3, h, w)),
        };

        for (x, y, pixel) in resized.enumerate_pixels() {
            let (x, y) = (x as usize, y as usize);
            for c in 0..3 {
                let value = self.scale.apply(pixel.0[c]);
                match self.layout {
                    TensorLayout::Nhwc => tensor[[0, y, x, c]] = value,
                    TensorLayout::Nchw => tensor[[0, c, y, x]] = value,
                }
            }
        }

        Ok(tensor)
    }
}
