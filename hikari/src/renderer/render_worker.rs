use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc::SyncSender,
        Mutex, PoisonError,
    },
    time::Instant,
};

use super::Pixel;
use crate::{
    camera::Camera,
    canvas::{Canvas, Tile, TileBounds},
    hikari_debug, hikari_trace,
    world::World,
};

/// Tiles of one render, claimed by workers through a shared cursor.
pub struct TileQueue {
    tiles: Vec<TileBounds>,
    cursor: AtomicUsize,
}

impl TileQueue {
    pub fn new(tiles: Vec<TileBounds>) -> Self {
        Self {
            tiles,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Claims the next unrendered tile.
    pub fn pop(&self) -> Option<TileBounds> {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.tiles.get(i).copied()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }
}

/// What a worker did before returning.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub tiles: usize,
    pub pixels: usize,
}

fn render_tile(camera: &Camera, world: &World, max_bounces: u32, bb: TileBounds) -> Tile {
    let mut tile = Tile::new(bb);
    for (pixel, (x, y)) in tile.pixels.iter_mut().zip(bb.pixels()) {
        let ray = camera.ray_for_pixel(x, y);
        *pixel = world.color_at(&ray, max_bounces);
    }
    tile
}

/// Renders tiles from `queue` into `canvas` until the queue runs dry.
pub fn launch(
    thread_id: usize,
    queue: &TileQueue,
    camera: &Camera,
    world: &World,
    max_bounces: u32,
    canvas: &Mutex<Canvas>,
) -> WorkerStats {
    hikari_debug!("Render thread {}: Begin", thread_id);
    let start = Instant::now();

    let mut stats = WorkerStats::default();
    while let Some(bb) = queue.pop() {
        hikari_trace!("Render thread {}: Render tile {:?}", thread_id, bb);
        let tile = render_tile(camera, world, max_bounces, bb);

        hikari_trace!("Render thread {}: Waiting for lock on canvas", thread_id);
        {
            let mut canvas = canvas.lock().unwrap_or_else(PoisonError::into_inner);
            canvas.update_tile(&tile);
        }

        stats.tiles += 1;
        stats.pixels += bb.area();
    }

    hikari_debug!(
        "Render thread {}: End after {} tiles in {:.2}s",
        thread_id,
        stats.tiles,
        start.elapsed().as_secs_f32()
    );
    stats
}

/// Renders tiles from `queue`, sending each pixel to `to_parent` as soon as it's done.
///
/// Returns early once the receiving end has hung up.
pub fn launch_streaming(
    thread_id: usize,
    queue: &TileQueue,
    camera: &Camera,
    world: &World,
    max_bounces: u32,
    to_parent: &SyncSender<Pixel>,
) -> WorkerStats {
    hikari_debug!("Stream thread {}: Begin", thread_id);
    let start = Instant::now();

    let mut stats = WorkerStats::default();
    'tiles: while let Some(bb) = queue.pop() {
        hikari_trace!("Stream thread {}: Render tile {:?}", thread_id, bb);
        for (x, y) in bb.pixels() {
            let ray = camera.ray_for_pixel(x, y);
            let color = world.color_at(&ray, max_bounces);
            if to_parent.send(Pixel { x, y, color }).is_err() {
                hikari_debug!("Stream thread {}: Receiver dropped", thread_id);
                break 'tiles;
            }
            stats.pixels += 1;
        }
        stats.tiles += 1;
    }

    hikari_debug!(
        "Stream thread {}: End after {} pixels in {:.2}s",
        thread_id,
        stats.pixels,
        start.elapsed().as_secs_f32()
    );
    stats
}
