//! Precomputed sampling plans for image sequences.
//!
//! Converting many frames with identical settings repeats the exact same
//! projection math per pixel. A [`SamplePlan`] pays that math once and
//! reduces every further frame to a plain coordinate gather.

use rayon::prelude::*;

use crate::foundation::core::{Canvas, FrameRgb, Point};
use crate::foundation::error::{PanomorphError, PanomorphResult};
use crate::render::pipeline::{RenderThreading, build_thread_pool};
use crate::sampler::PixelSource;
use crate::settings::RenderSettings;

/// The source coordinate of every output pixel, recorded once per
/// conversion. `None` entries are projection gaps and stay background.
///
/// Plans always record the single-sample nearest-neighbor path; a
/// supersampling factor in the settings does not apply here.
pub struct SamplePlan {
    out_size: Canvas,
    in_size: Canvas,
    entries: Vec<Option<(u32, u32)>>,
}

impl SamplePlan {
    /// Record the plan for `settings`, optionally partitioning output rows
    /// across a worker pool.
    #[tracing::instrument(skip(settings, threading))]
    pub fn record(
        settings: &RenderSettings,
        threading: &RenderThreading,
    ) -> PanomorphResult<Self> {
        let out_size = settings.out_size;
        let width = out_size.width as usize;
        let mut entries = vec![None; out_size.pixel_count() as usize];

        if threading.parallel {
            let pool = build_thread_pool(threading.threads)?;
            pool.install(|| {
                entries
                    .par_chunks_mut(width)
                    .enumerate()
                    .for_each(|(y, row)| record_row(settings, y as u32, row));
            });
        } else {
            for (y, row) in entries.chunks_mut(width).enumerate() {
                record_row(settings, y as u32, row);
            }
        }

        tracing::debug!(
            mapped = entries.iter().filter(|e| e.is_some()).count(),
            total = entries.len(),
            "sample plan recorded"
        );
        Ok(Self {
            out_size,
            in_size: settings.in_size,
            entries,
        })
    }

    pub fn out_size(&self) -> Canvas {
        self.out_size
    }

    /// Input dimensions the plan was recorded against. Every applied frame
    /// must match them.
    pub fn in_size(&self) -> Canvas {
        self.in_size
    }

    /// Gather one output frame from `source`.
    pub fn apply(&self, source: &dyn PixelSource, frame_size: Canvas) -> PanomorphResult<FrameRgb> {
        if frame_size != self.in_size {
            return Err(PanomorphError::validation(format!(
                "frame is {}x{} but the plan was recorded against {}x{}",
                frame_size.width, frame_size.height, self.in_size.width, self.in_size.height
            )));
        }

        let width = self.out_size.width as usize;
        let mut frame = FrameRgb::new(self.out_size);
        for (i, entry) in self.entries.iter().enumerate() {
            if let Some((in_x, in_y)) = *entry {
                let x = (i % width) as u32;
                let y = (i / width) as u32;
                frame.put(x, y, source.fetch(in_x, in_y));
            }
        }
        Ok(frame)
    }
}

fn record_row(settings: &RenderSettings, y: u32, row: &mut [Option<(u32, u32)>]) {
    let out_w = f64::from(settings.out_size.width);
    let out_h = f64::from(settings.out_size.height);
    for (x, entry) in row.iter_mut().enumerate() {
        *entry = settings.source_coordinate(Point::new(x as f64 / out_w, f64::from(y) / out_h));
    }
}
