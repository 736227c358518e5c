use std::path::Path;

use anyhow::Context;

use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::PanomorphResult;
use crate::sampler::PixelSource;

/// A decoded RGB image exposed through the [`PixelSource`] capability.
#[derive(Debug)]
pub struct ImageSource {
    size: Canvas,
    image: image::RgbImage,
}

impl ImageSource {
    pub fn from_image(image: image::RgbImage) -> PanomorphResult<Self> {
        let size = Canvas::new(image.width(), image.height())?;
        Ok(Self { size, image })
    }

    pub fn size(&self) -> Canvas {
        self.size
    }
}

impl PixelSource for ImageSource {
    fn fetch(&self, x: u32, y: u32) -> Rgb8 {
        let px = self.image.get_pixel(x, y);
        Rgb8::new(px.0[0], px.0[1], px.0[2])
    }
}

/// Decode an image file and convert it to RGB8.
pub fn decode_image(path: &Path) -> PanomorphResult<ImageSource> {
    let dyn_img =
        image::open(path).with_context(|| format!("decode image '{}'", path.display()))?;
    ImageSource::from_image(dyn_img.to_rgb8())
}
