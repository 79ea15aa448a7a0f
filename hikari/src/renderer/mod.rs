mod render_worker;

pub use render_worker::WorkerStats;

use render_worker::TileQueue;
use std::{
    sync::{
        mpsc::{sync_channel, Receiver},
        Arc, Mutex, PoisonError,
    },
    thread::JoinHandle,
    time::Instant,
};

use crate::{
    camera::Camera,
    canvas::{canvas_tiles, Canvas},
    hikari_debug, hikari_error, hikari_info, hikari_warn,
    math::Color,
    settings::RenderSettings,
    world::World,
};

/// A finished pixel from a streaming render.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel {
    pub x: usize,
    pub y: usize,
    pub color: Color,
}

fn worker_count(settings: &RenderSettings, tile_count: usize) -> usize {
    settings.thread_count().min(tile_count).max(1)
}

fn log_stats(label: &str, stats: &[WorkerStats], pixel_count: usize, start: Instant) {
    let rendered: usize = stats.iter().map(|s| s.pixels).sum();
    hikari_info!(
        "{}: {}/{} pixels on {} threads in {:.2}s",
        label,
        rendered,
        pixel_count,
        stats.len(),
        start.elapsed().as_secs_f32()
    );
}

/// Renders `world` as seen by `camera` into a new [Canvas] on a pool of worker threads.
///
/// Workers claim tiles through a shared cursor and copy finished tiles into
/// the mutex-guarded canvas. Blocks until the whole image is done.
pub fn render(camera: &Camera, world: &World, settings: &RenderSettings) -> Canvas {
    let start = Instant::now();
    let (width, height) = (camera.hsize(), camera.vsize());

    let queue = TileQueue::new(canvas_tiles(width, height, settings.tile_dim.max(1)));
    let canvas = Mutex::new(Canvas::new(width, height));
    let thread_count = worker_count(settings, queue.len());
    let max_bounces = settings.max_bounces;

    hikari_info!(
        "Render: {}x{} in {} tiles on {} threads",
        width,
        height,
        queue.len(),
        thread_count
    );

    let stats = std::thread::scope(|s| {
        let mut handles = Vec::with_capacity(thread_count);
        for thread_id in 0..thread_count {
            let (queue, canvas) = (&queue, &canvas);
            match std::thread::Builder::new()
                .name(format!("RenderWorker{}", thread_id))
                .spawn_scoped(s, move || {
                    render_worker::launch(thread_id, queue, camera, world, max_bounces, canvas)
                }) {
                Ok(handle) => handles.push(handle),
                Err(why) => hikari_error!("Failed to spawn render thread {}: {}", thread_id, why),
            }
        }

        if handles.is_empty() {
            hikari_warn!("Render: No worker threads, rendering on the calling thread");
            return vec![render_worker::launch(
                0,
                &queue,
                camera,
                world,
                max_bounces,
                &canvas,
            )];
        }

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(stats) => stats,
                Err(why) => std::panic::resume_unwind(why),
            })
            .collect::<Vec<_>>()
    });

    log_stats("Render", &stats, width * height, start);
    canvas.into_inner().unwrap_or_else(PoisonError::into_inner)
}

/// Starts rendering `world` as seen by `camera` in the background.
///
/// Finished pixels are handed over through a channel holding at most
/// `settings.stream_capacity` pixels, so workers stall while the consumer
/// falls behind. Dropping the returned stream stops the workers at their next
/// pixel and joins them.
pub fn stream(camera: Camera, world: Arc<World>, settings: &RenderSettings) -> PixelStream {
    let start = Instant::now();
    let (width, height) = (camera.hsize(), camera.vsize());

    let queue = Arc::new(TileQueue::new(canvas_tiles(
        width,
        height,
        settings.tile_dim.max(1),
    )));
    let camera = Arc::new(camera);
    let thread_count = worker_count(settings, queue.len());
    let max_bounces = settings.max_bounces;
    let (tx, rx) = sync_channel(settings.stream_capacity);

    hikari_info!(
        "Stream: {}x{} in {} tiles on {} threads",
        width,
        height,
        queue.len(),
        thread_count
    );

    let mut handles = Vec::with_capacity(thread_count);
    for thread_id in 0..thread_count {
        let queue = queue.clone();
        let camera = camera.clone();
        let world = world.clone();
        let tx = tx.clone();
        match std::thread::Builder::new()
            .name(format!("StreamWorker{}", thread_id))
            .spawn(move || {
                render_worker::launch_streaming(
                    thread_id,
                    &queue,
                    &camera,
                    &world,
                    max_bounces,
                    &tx,
                )
            }) {
            Ok(handle) => handles.push(handle),
            Err(why) => hikari_error!("Failed to spawn stream thread {}: {}", thread_id, why),
        }
    }
    if handles.is_empty() {
        hikari_error!("Stream: No worker threads, the stream will be empty");
    }

    PixelStream {
        rx: Some(rx),
        handles,
        width,
        height,
        start,
    }
}

/// Pixels of a background render in completion order.
///
/// Iteration ends once every pixel has been yielded.
pub struct PixelStream {
    // Dropped before joining so blocked workers wake up
    rx: Option<Receiver<Pixel>>,
    handles: Vec<JoinHandle<WorkerStats>>,
    width: usize,
    height: usize,
    start: Instant,
}

impl PixelStream {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Collects the remaining pixels into a [Canvas].
    pub fn into_canvas(mut self) -> Canvas {
        Canvas::from_stream(self.width, self.height, &mut self)
    }
}

impl Iterator for PixelStream {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        self.rx.as_ref()?.recv().ok()
    }
}

impl Drop for PixelStream {
    fn drop(&mut self) {
        drop(self.rx.take());

        let stats: Vec<WorkerStats> = self
            .handles
            .drain(..)
            .filter_map(|handle| match handle.join() {
                Ok(stats) => Some(stats),
                Err(_) => {
                    hikari_error!("Stream: Worker thread panicked");
                    None
                }
            })
            .collect();

        hikari_debug!("Stream: Workers joined");
        log_stats("Stream", &stats, self.width * self.height, self.start);
    }
}
