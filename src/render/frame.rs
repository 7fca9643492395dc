use rayon::prelude::*;

use crate::{
    foundation::color::PremulColor,
    foundation::error::{ComposeError, ComposeResult},
    pipeline::{arena::ScratchArena, raster::RasterPipeline},
    shader::{Paint, Shader, StageRec, append_shader_or_paint},
};

/// A rendered frame as RGBA8 pixels.
///
/// Pixels are **premultiplied alpha**; the flag makes this explicit at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Render options.
#[derive(Clone, Debug)]
pub struct RenderOpts {
    /// Frame width in pixels, must be non-zero.
    pub width: u32,
    /// Frame height in pixels, must be non-zero.
    pub height: u32,
    /// Paint used where the shader tree has absent slots.
    pub paint: Paint,
    /// Build and run row pipelines on rayon workers when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            paint: Paint::default(),
            parallel: false,
            threads: None,
        }
    }
}

/// Build one pipeline for `shader` and run it over `count` pixels.
///
/// The pipeline and its scratch arena live only for this call.
pub fn eval_span(
    shader: Option<&dyn Shader>,
    paint: &Paint,
    count: usize,
) -> ComposeResult<Vec<PremulColor>> {
    let mut pipeline = RasterPipeline::new();
    let mut arena = ScratchArena::new();
    append_shader_or_paint(&mut StageRec::new(&mut pipeline, &mut arena, paint), shader)?;
    pipeline.run(&mut arena, count)
}

/// Render `shader` into a premultiplied RGBA8 frame.
///
/// Each row is its own pipeline build with its own scratch arena, so rows can be built
/// concurrently against the same shader tree.
#[tracing::instrument(
    skip(shader, opts),
    fields(width = opts.width, height = opts.height, parallel = opts.parallel)
)]
pub fn render_rgba8(shader: Option<&dyn Shader>, opts: &RenderOpts) -> ComposeResult<FrameRGBA> {
    if opts.width == 0 || opts.height == 0 {
        return Err(ComposeError::validation("render width and height must be > 0"));
    }
    let width = opts.width as usize;
    let row_len = width
        .checked_mul(4)
        .ok_or_else(|| ComposeError::validation("render row size overflow"))?;
    let len = row_len
        .checked_mul(opts.height as usize)
        .ok_or_else(|| ComposeError::validation("render frame size overflow"))?;
    let mut data = vec![0u8; len];

    let render_row = |row: &mut [u8]| -> ComposeResult<()> {
        let colors = eval_span(shader, &opts.paint, width)?;
        for (px, c) in row.chunks_exact_mut(4).zip(colors) {
            px.copy_from_slice(&c.to_rgba8());
        }
        Ok(())
    };

    if opts.parallel {
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| data.par_chunks_mut(row_len).try_for_each(render_row))?;
    } else {
        data.chunks_mut(row_len).try_for_each(render_row)?;
    }

    Ok(FrameRGBA {
        width: opts.width,
        height: opts.height,
        data,
        premultiplied: true,
    })
}

fn build_thread_pool(threads: Option<usize>) -> ComposeResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ComposeError::validation(
            "render 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ComposeError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
