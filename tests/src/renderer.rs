#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use std::{collections::HashSet, f64::consts::FRAC_PI_2, sync::Arc};

    use hikari::{
        camera::Camera,
        canvas::{canvas_tiles, Canvas, Tile, TileBounds},
        math::{point, transforms::view_transform, vector, Color},
        renderer::{self, Pixel},
        settings::RenderSettings,
        world::World,
    };

    fn camera(hsize: usize, vsize: usize) -> Camera {
        Camera::new(hsize, vsize, FRAC_PI_2).with_transform(view_transform(
            point(0.0, 0.0, -5.0),
            point(0.0, 0.0, 0.0),
            vector(0.0, 1.0, 0.0),
        ))
    }

    fn settings(threads: usize, tile_dim: usize) -> RenderSettings {
        RenderSettings {
            threads,
            tile_dim,
            ..RenderSettings::default()
        }
    }

    #[test]
    fn canvas() {
        let mut c = Canvas::new(10, 20);
        assert_eq!(c.width(), 10);
        assert_eq!(c.height(), 20);
        assert!(c.pixels().iter().all(|p| *p == Color::BLACK));

        let red = Color::new(1.0, 0.0, 0.0);
        c.write_pixel(2, 3, red);
        assert_eq!(c.pixel_at(2, 3), red);
        assert_eq!(c.pixels()[3 * 10 + 2], red);
        assert_eq!(
            c.iter().filter(|(_, _, color)| *color == red).collect::<Vec<_>>(),
            vec![(2, 3, red)]
        );
    }

    #[test]
    #[should_panic]
    fn canvas_out_of_bounds() {
        Canvas::new(10, 20).pixel_at(10, 0);
    }

    #[test]
    fn update_tile() {
        let mut c = Canvas::new(4, 4);
        let bounds = TileBounds {
            x_min: 1,
            y_min: 2,
            x_max: 3,
            y_max: 4,
        };
        let mut tile = Tile::new(bounds);
        for (i, p) in tile.pixels.iter_mut().enumerate() {
            *p = Color::gray(i as f64 + 1.0);
        }
        c.update_tile(&tile);

        assert_eq!(c.pixel_at(1, 2), Color::gray(1.0));
        assert_eq!(c.pixel_at(2, 2), Color::gray(2.0));
        assert_eq!(c.pixel_at(1, 3), Color::gray(3.0));
        assert_eq!(c.pixel_at(2, 3), Color::gray(4.0));
        assert_eq!(c.pixel_at(0, 0), Color::BLACK);

        // Tiles that don't fit are dropped
        let before = c.clone();
        c.update_tile(&Tile::new(TileBounds {
            x_min: 2,
            y_min: 2,
            x_max: 5,
            y_max: 4,
        }));
        assert_eq!(c, before);
    }

    #[test]
    fn from_stream() {
        let pixels = vec![
            Pixel {
                x: 0,
                y: 1,
                color: Color::WHITE,
            },
            Pixel {
                x: 7,
                y: 7,
                color: Color::WHITE,
            },
        ];
        let c = Canvas::from_stream(2, 2, pixels);
        assert_eq!(c.pixel_at(0, 1), Color::WHITE);
        assert_eq!(c.pixels().iter().filter(|p| **p == Color::WHITE).count(), 1);
    }

    #[test]
    fn tiles() {
        let tiles = canvas_tiles(40, 30, 16);
        assert_eq!(tiles.len(), 6);
        assert_eq!(tiles.iter().map(|t| t.area()).sum::<usize>(), 40 * 30);
        for t in &tiles {
            assert!(t.width() <= 16 && t.height() <= 16);
        }
    }

    #[test]
    fn render() {
        let w = World::default_scene();
        let c = camera(11, 11);
        let image = renderer::render(&c, &w, &settings(3, 4));
        assert_eq!((image.width(), image.height()), (11, 11));
        assert_abs_diff_eq!(
            image.pixel_at(5, 5),
            Color::new(0.38066, 0.47583, 0.2855),
            epsilon = 1e-5
        );
    }

    #[test]
    fn render_matches_single_thread() {
        let w = World::default_scene();
        let c = camera(23, 17);
        let single = c.render(&w, &settings(1, 23));
        for (threads, tile_dim) in [(4, 1), (2, 5), (8, 16)] {
            assert_eq!(c.render(&w, &settings(threads, tile_dim)), single);
        }
        // Every pixel matches the direct computation
        for (x, y, color) in single.iter() {
            assert_eq!(color, w.color_at(&c.ray_for_pixel(x, y), 5));
        }
    }

    #[test]
    fn stream() {
        let w = Arc::new(World::default_scene());
        let c = camera(13, 9);
        let s = RenderSettings {
            stream_capacity: 4,
            ..settings(3, 2)
        };
        let stream = c.stream(w.clone(), &s);
        assert_eq!((stream.width(), stream.height()), (13, 9));

        let pixels: Vec<Pixel> = stream.collect();
        assert_eq!(pixels.len(), 13 * 9);
        let unique: HashSet<(usize, usize)> = pixels.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(unique.len(), 13 * 9);

        let image = Canvas::from_stream(13, 9, pixels);
        assert_eq!(image, c.render(&w, &s));
    }

    #[test]
    fn stream_into_canvas() {
        let w = Arc::new(World::default_scene());
        let c = camera(11, 11);
        let image = renderer::stream(c.clone(), w, &settings(2, 3)).into_canvas();
        assert_abs_diff_eq!(
            image.pixel_at(5, 5),
            Color::new(0.38066, 0.47583, 0.2855),
            epsilon = 1e-5
        );
    }

    #[test]
    fn stream_drop_stops_workers() {
        let w = Arc::new(World::default_scene());
        let c = camera(200, 200);
        let s = RenderSettings {
            stream_capacity: 1,
            ..settings(4, 8)
        };
        let mut stream = c.stream(w, &s);
        let first: Vec<Pixel> = stream.by_ref().take(10).collect();
        assert_eq!(first.len(), 10);
        // Joins the workers, which would hang if they kept rendering into a full channel
        drop(stream);
    }
}
