//! Image decoding and tensor preparation.

use crate::constants::input;
use crate::error::{Error, Result};
use image::DynamicImage;
use image::imageops::{self, FilterType};
use std::path::Path;

/// Model input: a batch of one RGB image in NHWC layout, values in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    data: Vec<f32>,
}

impl ImageTensor {
    /// Tensor shape `[1, 224, 224, 3]`.
    pub const fn shape(&self) -> [i64; 4] {
        input::SHAPE
    }

    /// Flat tensor data in row-major NHWC order.
    pub fn data(&self) -> &[f32] {
        &self.data
    }
}

/// Read and decode an image file.
///
/// The format is detected from the file contents, not the extension.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let bytes = std::fs::read(path).map_err(|e| Error::ImageUnreadable {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;
    decode_image(&bytes, path)
}

/// Decode an in-memory image. `origin` is only used for error reporting.
pub fn decode_image(bytes: &[u8], origin: &Path) -> Result<DynamicImage> {
    let image = image::load_from_memory(bytes).map_err(|e| Error::ImageUnreadable {
        path: origin.to_path_buf(),
        source: Box::new(e),
    })?;

    if image.width() == 0 || image.height() == 0 {
        return Err(Error::ImageUnreadable {
            path: origin.to_path_buf(),
            source: format!("image has no pixels ({}x{})", image.width(), image.height())
                .into(),
        });
    }

    Ok(image)
}

/// Resize to the model resolution, scale to [0, 1] and add the batch axis.
pub fn preprocess(image: &DynamicImage) -> ImageTensor {
    let rgb = image.to_rgb8();
    let resized = imageops::resize(
        &rgb,
        input::IMAGE_SIZE,
        input::IMAGE_SIZE,
        FilterType::Triangle,
    );

    let data = resized
        .as_raw()
        .iter()
        .map(|&v| f32::from(v) / input::PIXEL_SCALE)
        .collect();

    ImageTensor { data }
}
