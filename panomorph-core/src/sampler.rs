//! Per-pixel sampling over an injected pixel source.

use crate::foundation::core::{FrameRgb, Point, Rgb8};
use crate::foundation::error::{PanomorphError, PanomorphResult};
use crate::settings::RenderSettings;

/// Read capability over a decoded input image.
///
/// The sampler only ever asks for coordinates inside
/// `[0, width-1] x [0, height-1]`, so implementations do not need their own
/// bounds handling.
pub trait PixelSource: Sync {
    fn fetch(&self, x: u32, y: u32) -> Rgb8;
}

/// Write capability over an output buffer. The render loop invokes it
/// exactly once per output pixel.
pub trait PixelSink {
    fn write(&mut self, x: u32, y: u32, color: Rgb8);
}

impl PixelSource for FrameRgb {
    fn fetch(&self, x: u32, y: u32) -> Rgb8 {
        self.pixel(x, y)
    }
}

impl PixelSink for FrameRgb {
    fn write(&mut self, x: u32, y: u32, color: Rgb8) {
        self.put(x, y, color);
    }
}

/// Computes output pixel colors by tracing each one through the output
/// projection, the optional rotation and the input projection, then
/// fetching the landed-on source pixel.
///
/// Holds only shared references, so one sampler is used concurrently from
/// every render worker.
pub struct Sampler<'a> {
    settings: &'a RenderSettings,
    source: &'a dyn PixelSource,
}

impl<'a> Sampler<'a> {
    pub fn new(settings: &'a RenderSettings, source: &'a dyn PixelSource) -> PanomorphResult<Self> {
        if settings.samples == 0 {
            return Err(PanomorphError::validation("samples must be >= 1"));
        }
        Ok(Self { settings, source })
    }

    /// Color at one normalized output point. Projection gaps on either side
    /// resolve to the background color.
    pub fn sample(&self, point: Point) -> Rgb8 {
        match self.settings.source_coordinate(point) {
            Some((x, y)) => self.source.fetch(x, y),
            None => Rgb8::BLACK,
        }
    }

    /// Color of the output pixel at `(out_x, out_y)`.
    ///
    /// With `samples == 1` this is a single lookup at the pixel's
    /// normalized coordinate. Otherwise `n * n` grid-offset samples are
    /// averaged per channel with integer division, a uniform box filter.
    pub fn supersample(&self, out_x: u32, out_y: u32) -> Rgb8 {
        let out_w = f64::from(self.settings.out_size.width);
        let out_h = f64::from(self.settings.out_size.height);
        let n = self.settings.samples;

        if n == 1 {
            return self.sample(Point::new(
                f64::from(out_x) / out_w,
                f64::from(out_y) / out_h,
            ));
        }

        let mut r = 0u64;
        let mut g = 0u64;
        let mut b = 0u64;
        for y_sub in 0..n {
            for x_sub in 0..n {
                let point = Point::new(
                    (f64::from(out_x) + f64::from(x_sub) / f64::from(n)) / out_w,
                    (f64::from(out_y) + f64::from(y_sub) / f64::from(n)) / out_h,
                );
                let sample = self.sample(point);
                r += u64::from(sample.r);
                g += u64::from(sample.g);
                b += u64::from(sample.b);
            }
        }

        let total = u64::from(n) * u64::from(n);
        Rgb8::new((r / total) as u8, (g / total) as u8, (b / total) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Canvas;
    use crate::projection::registry::ProjectionKind;
    use crate::settings::ConvertRequest;

    fn identity_settings(size: Canvas, samples: u32) -> RenderSettings {
        let mut request = ConvertRequest::new(ProjectionKind::Equirectangular);
        request.in_projection = Some(ProjectionKind::Equirectangular);
        request.width = Some(size.width);
        request.height = Some(size.height);
        request.samples = samples;
        RenderSettings::resolve(&request, size).unwrap()
    }

    fn gradient_frame(size: Canvas) -> FrameRgb {
        let mut frame = FrameRgb::new(size);
        for y in 0..size.height {
            for x in 0..size.width {
                frame.put(x, y, Rgb8::new((x * 7 % 256) as u8, (y * 11 % 256) as u8, 128));
            }
        }
        frame
    }

    #[test]
    fn single_sample_supersample_equals_plain_sample() {
        let size = Canvas::new(32, 16).unwrap();
        let source = gradient_frame(size);
        let settings = identity_settings(size, 1);
        let sampler = Sampler::new(&settings, &source).unwrap();

        for y in 0..16 {
            for x in 0..32 {
                let direct = sampler.sample(Point::new(f64::from(x) / 32.0, f64::from(y) / 16.0));
                assert_eq!(sampler.supersample(x, y), direct);
            }
        }
    }

    #[test]
    fn supersampling_a_flat_source_changes_nothing() {
        let size = Canvas::new(16, 8).unwrap();
        let mut source = FrameRgb::new(size);
        for y in 0..8 {
            for x in 0..16 {
                source.put(x, y, Rgb8::new(90, 60, 30));
            }
        }

        let settings = identity_settings(size, 3);
        let sampler = Sampler::new(&settings, &source).unwrap();
        assert_eq!(sampler.supersample(5, 3), Rgb8::new(90, 60, 30));
    }

    #[test]
    fn supersampling_averages_with_floor_division() {
        // Single output pixel, 2x2 subsamples over a source whose second
        // column is white: two subsamples land on each column, and
        // 510 / 4 floors to 127.
        let in_size = Canvas::new(4, 4).unwrap();
        let mut source = FrameRgb::new(in_size);
        for y in 0..4 {
            source.put(1, y, Rgb8::new(255, 255, 255));
        }

        let mut request = ConvertRequest::new(ProjectionKind::Equirectangular);
        request.in_projection = Some(ProjectionKind::Equirectangular);
        request.width = Some(1);
        request.height = Some(1);
        request.samples = 2;
        let settings = RenderSettings::resolve(&request, in_size).unwrap();
        let sampler = Sampler::new(&settings, &source).unwrap();

        assert_eq!(sampler.supersample(0, 0), Rgb8::new(127, 127, 127));
    }

    #[test]
    fn rotation_shifts_the_sampled_azimuth() {
        let in_size = Canvas::new(64, 32).unwrap();
        let source = gradient_frame(in_size);

        let mut request = ConvertRequest::new(ProjectionKind::Equirectangular);
        request.in_projection = Some(ProjectionKind::Equirectangular);
        request.width = Some(64);
        request.height = Some(32);
        request.rotation = Some(crate::sphere::rotation::Rotation::new(0.0, 90.0, 0.0));
        let settings = RenderSettings::resolve(&request, in_size).unwrap();
        let sampler = Sampler::new(&settings, &source).unwrap();

        // Quarter turn about the vertical axis: azimuth 3/2 pi lands on pi,
        // which is the horizontal middle of the source.
        let got = sampler.sample(Point::new(0.75, 0.5));
        assert_eq!(got, source.pixel(31, 15));
    }

    #[test]
    fn projection_gaps_sample_black() {
        // Cubemap output corners are unpopulated grid cells.
        let size = Canvas::new(40, 30).unwrap();
        let source = gradient_frame(Canvas::new(64, 32).unwrap());
        let mut request = ConvertRequest::new(ProjectionKind::Cubemap);
        request.in_projection = Some(ProjectionKind::Equirectangular);
        request.width = Some(size.width);
        request.height = Some(size.height);
        let settings = RenderSettings::resolve(&request, Canvas::new(64, 32).unwrap()).unwrap();
        let sampler = Sampler::new(&settings, &source).unwrap();

        assert_eq!(sampler.sample(Point::new(0.05, 0.05)), Rgb8::BLACK);
        assert_ne!(sampler.sample(Point::new(0.3, 0.5)), Rgb8::BLACK);
    }
}
