use std::collections::HashMap;

use crate::{hikari_error, math::Color, renderer::Pixel};

/// Pixel bounds of a tile. The max bounds are exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TileBounds {
    pub x_min: usize,
    pub y_min: usize,
    pub x_max: usize,
    pub y_max: usize,
}

impl TileBounds {
    pub fn width(&self) -> usize {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> usize {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// Iterates the pixel coordinates of these bounds row by row.
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize)> {
        let (x_min, x_max) = (self.x_min, self.x_max);
        (self.y_min..self.y_max).flat_map(move |y| (x_min..x_max).map(move |x| (x, y)))
    }
}

/// A rendered block of pixels.
#[derive(Clone, Debug)]
pub struct Tile {
    pub bounds: TileBounds,
    /// Pixel values stored in row-major order.
    pub pixels: Vec<Color>,
}

impl Tile {
    /// Creates a new black `Tile` covering `bounds`.
    pub fn new(bounds: TileBounds) -> Self {
        Self {
            bounds,
            pixels: vec![Color::BLACK; bounds.area()],
        }
    }
}

/// A `width` by `height` buffer of linear colors.
///
/// Values are stored as is, clamping is up to whoever encodes the image.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a new black `Canvas`.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width * height],
        }
    }

    /// Assembles a `Canvas` from streamed `pixels`. Pixels outside the canvas are dropped.
    pub fn from_stream(width: usize, height: usize, pixels: impl IntoIterator<Item = Pixel>) -> Self {
        let mut ret = Self::new(width, height);
        for Pixel { x, y, color } in pixels {
            if x < width && y < height {
                ret.write_pixel(x, y, color);
            } else {
                hikari_error!("Pixel ({}, {}) doesn't fit canvas {}x{}", x, y, width, height);
            }
        }
        ret
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns a reference to the pixels of this `Canvas` in row-major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixel_at(&self, x: usize, y: usize) -> Color {
        self.pixels[self.index(x, y)]
    }

    pub fn write_pixel(&mut self, x: usize, y: usize, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// Iterates `(x, y, color)` row by row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        let width = self.width;
        self.pixels
            .iter()
            .enumerate()
            .map(move |(i, c)| (i % width, i / width, *c))
    }

    /// Copies the pixels of `tile` over to this `Canvas`.
    pub fn update_tile(&mut self, tile: &Tile) {
        let TileBounds {
            x_min,
            y_min,
            x_max,
            y_max,
        } = tile.bounds;

        if x_max > self.width || y_max > self.height {
            hikari_error!(
                "Tile doesn't fit canvas ({}x{} {:?})",
                self.width,
                self.height,
                tile.bounds
            );
            return;
        }

        let tile_width = tile.bounds.width();
        for (tile_row, canvas_row) in (y_min..y_max).enumerate() {
            let canvas_row_offset = canvas_row * self.width;
            let canvas_slice = &mut self.pixels[canvas_row_offset + x_min..canvas_row_offset + x_max];
            let tile_slice = &tile.pixels[tile_row * tile_width..(tile_row + 1) * tile_width];
            canvas_slice.copy_from_slice(tile_slice);
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "Pixel ({}, {}) out of {}x{} canvas",
            x,
            y,
            self.width,
            self.height
        );
        y * self.width + x
    }
}

/// Splits a `width` by `height` image into tiles of at most `dim` pixels per side.
///
/// Tiles are ordered in a spiral from the middle of the image since most
/// things of interest are likely towards the center of the frame.
pub fn canvas_tiles(width: usize, height: usize, dim: usize) -> Vec<TileBounds> {
    assert!(dim > 0, "Zero tile dimension");

    // Collect tiles spanning the whole image hashed by their tile coordinates
    let mut tiles = HashMap::new();
    for j in (0..height).step_by(dim) {
        for i in (0..width).step_by(dim) {
            tiles.insert(
                ((i / dim) as i64, (j / dim) as i64),
                TileBounds {
                    x_min: i,
                    y_min: j,
                    x_max: (i + dim).min(width),
                    y_max: (j + dim).min(height),
                },
            );
        }
    }

    let tiles_x = ((width + dim - 1) / dim) as i64;
    let tiles_y = ((height + dim - 1) / dim) as i64;
    let max_dim = tiles_x.max(tiles_y);
    let center_x = tiles_x / 2;
    let center_y = tiles_y / 2;

    let mut ret = Vec::with_capacity(tiles.len());
    let (mut x, mut y) = (0i64, 0i64);
    let (mut dx, mut dy) = (0i64, -1i64);
    while !tiles.is_empty() {
        let tile_x = center_x + x;
        let tile_y = center_y + y;

        if tile_x.abs() > max_dim + 1 || tile_y.abs() > max_dim + 1 {
            hikari_error!(
                "Tile spiral overflow at tile {}, {}! {} tiles dangling",
                tile_x,
                tile_y,
                tiles.len()
            );
            // Append the rest in row order so no pixel is left out
            let mut rest: Vec<_> = tiles.drain().map(|(_, bb)| bb).collect();
            rest.sort_by_key(|bb| (bb.y_min, bb.x_min));
            ret.extend(rest);
            break;
        }

        if let Some(bb) = tiles.remove(&(tile_x, tile_y)) {
            ret.push(bb);
        }

        if x == y || (x < 0 && x == -y) || (x > 0 && x == 1 - y) {
            std::mem::swap(&mut dx, &mut dy);
            dx = -dx;
        }

        x += dx;
        y += dy;
    }

    ret
}
