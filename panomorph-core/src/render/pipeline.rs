//! Full-frame render loop over the output raster.

use rayon::prelude::*;

use crate::foundation::core::FrameRgb;
use crate::foundation::error::{PanomorphError, PanomorphResult};
use crate::sampler::{PixelSink, PixelSource, Sampler};
use crate::settings::RenderSettings;

/// Threading controls for full-frame rendering.
#[derive(Clone, Debug, Default)]
pub struct RenderThreading {
    /// Partition output rows across a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

/// Render every output pixel of `settings` by sampling `source`.
///
/// The parallel path hands each worker disjoint row slices of the frame
/// buffer, so every pixel is written exactly once and no locking is needed;
/// nothing in the per-pixel math touches shared mutable state.
#[tracing::instrument(skip(settings, source, threading))]
pub fn render_frame(
    settings: &RenderSettings,
    source: &dyn PixelSource,
    threading: &RenderThreading,
) -> PanomorphResult<FrameRgb> {
    let mut frame = FrameRgb::new(settings.out_size);

    if !threading.parallel {
        render_into(settings, source, &mut frame)?;
        return Ok(frame);
    }

    let sampler = Sampler::new(settings, source)?;
    let pool = build_thread_pool(threading.threads)?;
    let row_bytes = settings.out_size.width as usize * 3;
    pool.install(|| {
        frame
            .data
            .par_chunks_mut(row_bytes)
            .enumerate()
            .for_each(|(y, row)| fill_row(&sampler, y as u32, row));
    });

    tracing::debug!(
        pixels = settings.out_size.pixel_count(),
        "parallel render complete"
    );
    Ok(frame)
}

/// Sequentially render into an externally supplied pixel sink, writing each
/// output pixel exactly once.
pub fn render_into(
    settings: &RenderSettings,
    source: &dyn PixelSource,
    sink: &mut dyn PixelSink,
) -> PanomorphResult<()> {
    let sampler = Sampler::new(settings, source)?;
    for y in 0..settings.out_size.height {
        for x in 0..settings.out_size.width {
            sink.write(x, y, sampler.supersample(x, y));
        }
    }
    Ok(())
}

fn fill_row(sampler: &Sampler<'_>, y: u32, row: &mut [u8]) {
    for (x, px) in row.chunks_exact_mut(3).enumerate() {
        let color = sampler.supersample(x as u32, y);
        px[0] = color.r;
        px[1] = color.g;
        px[2] = color.b;
    }
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> PanomorphResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PanomorphError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PanomorphError::render(format!("failed to build rayon thread pool: {e}")))
}
