//! Multi-threaded image rendering.
//!
//! Rows are dealt round-robin to a fixed pool of workers: worker `k` of `n`
//! renders rows `k, k + n, k + 2n, ...`. The world is only read during a
//! render; the canvas is the single shared mutable value.

use std::time::Instant;

use rayon::prelude::*;

use crate::{Camera, Canvas, RenderResult, World, DEFAULT_MAX_DEPTH};

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Bounce budget for reflection and refraction
    pub max_depth: u32,
    /// Worker count; `None` uses the available hardware parallelism
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            threads: None,
        }
    }
}

impl RenderConfig {
    /// Resolved worker count, never zero.
    pub fn worker_count(&self) -> usize {
        self.threads
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1)
            })
            .max(1)
    }
}

/// Render the world as seen by `camera` into a new canvas.
///
/// Blocks until every worker has finished.
pub fn render(camera: &Camera, world: &World, config: &RenderConfig) -> RenderResult<Canvas> {
    let canvas = Canvas::new(camera.hsize, camera.vsize);
    let workers = config.worker_count();

    if world.light.is_none() {
        log::warn!("Rendering a world without a light");
    }
    log::info!(
        "Rendering {}x{} with {} workers (max depth {})",
        camera.hsize,
        camera.vsize,
        workers,
        config.max_depth
    );
    let start = Instant::now();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()?;

    pool.install(|| {
        (0..workers)
            .into_par_iter()
            .try_for_each(|worker| render_rows(camera, world, config, &canvas, worker, workers))
    })?;

    log::info!("Rendered {}x{} in {:?}", camera.hsize, camera.vsize, start.elapsed());
    Ok(canvas)
}

/// Render every `stride`-th row starting at `first`.
fn render_rows(
    camera: &Camera,
    world: &World,
    config: &RenderConfig,
    canvas: &Canvas,
    first: usize,
    stride: usize,
) -> RenderResult<()> {
    let mut rows = 0;
    for y in (first..camera.vsize as usize).step_by(stride) {
        let y = y as u32;
        for x in 0..camera.hsize {
            let ray = camera.ray_for_pixel(x, y);
            let color = world.color_at_depth(&ray, config.max_depth);
            canvas.write_pixel(x, y, color)?;
        }
        log::trace!("Worker {} finished row {}", first, y);
        rows += 1;
    }
    log::debug!("Worker {} rendered {} rows", first, rows);
    Ok(())
}
