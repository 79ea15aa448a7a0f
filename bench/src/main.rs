use std::{f64::consts::PI, sync::Arc, time::Instant};

use hikari::{
    expect,
    lights::{AreaLight, PointLight},
    materials::Material,
    math::{
        point,
        transforms::{rotation_x, rotation_y, rotation_z, scaling, translation},
        vector, Color, InverseCache, Matrix4, Transform,
    },
    patterns::{Pattern, UvMapping, UvPattern, DEFAULT_PERLIN_SEED},
    settings::Settings,
    shapes::{Cone, Cylinder, Shape},
    world::World,
};

const ITERATIONS: usize = 500000;

fn setup_logger() -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}:{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.level(),
                record.target(),
                record.line().unwrap_or(0),
                message
            ))
        })
        // .level(log::LevelFilter::Debug)
        .level(log::LevelFilter::Info)
        .chain(std::io::stdout())
        .chain(std::fs::File::create("hikari.log")?)
        .apply()?;
    Ok(())
}

fn report(label: &str, start: Instant, iterations: usize) {
    let elapsed_ns = start.elapsed().as_nanos();
    let elapsed_ms = (elapsed_ns as f64) * 1e-6;
    let us_per_iter = (elapsed_ns as f64) * 1e-3 / (iterations as f64);
    println!(
        "{:8} took {:6.1} ms total, {:0.4} us per invert",
        label, elapsed_ms, us_per_iter
    );
}

fn bench_inverse(label: &str, m: &Matrix4, cache: &InverseCache) {
    println!("{}", label);

    let start = Instant::now();
    for _ in 0..ITERATIONS {
        let mi = m.inverted();
        if mi.m[0][0].is_nan() {
            panic!("We only wanted to force the loop to be executed!")
        }
    }
    report("Full", start, ITERATIONS);

    let start = Instant::now();
    for _ in 0..ITERATIONS {
        let t = Transform::cached(*m, cache);
        if t.m_inv().m[0][0].is_nan() {
            panic!("We only wanted to force the loop to be executed!")
        }
    }
    report("Cached", start, ITERATIONS);
}

fn demo_scene(cache: &InverseCache) -> World {
    let mut world = World::new();

    world.add_object(Shape::plane().with_material(Material {
        pattern: Some(Pattern::checker(
            Color::gray(0.35),
            Pattern::perlin(Color::gray(0.65), 0.2, DEFAULT_PERLIN_SEED),
        )),
        reflective: 0.1,
        specular: 0.0,
        ..Material::default()
    }));

    world.add_object(
        Shape::sphere()
            .with_transform(translation(-0.5, 1.0, 0.5))
            .with_material(Material {
                color: Color::new(0.1, 1.0, 0.5),
                diffuse: 0.7,
                specular: 0.3,
                reflective: 0.2,
                ..Material::default()
            }),
    );

    world.add_object(
        Shape::sphere()
            .with_transform(&translation(1.5, 0.5, -0.5) * &scaling(0.5, 0.5, 0.5))
            .with_material(Material::default().with_pattern(Pattern::texture_map(
                UvPattern::checkers(16.0, 8.0, Color::new(0.9, 0.2, 0.1), Color::WHITE),
                UvMapping::Spherical,
            ))),
    );

    world.add_object(
        Shape::cube()
            .with_transform(Transform::cached(
                (translation(-2.5, 0.4, 1.5).m() * rotation_y(PI / 5.0).m())
                    * *scaling(0.4, 0.4, 0.4).m(),
                cache,
            ))
            .with_material(Material::default().with_pattern(
                Pattern::stripe(Color::new(0.2, 0.3, 0.9), Color::WHITE)
                    .with_transform(&rotation_z(PI / 4.0) * &scaling(0.2, 0.2, 0.2)),
            )),
    );

    world.add_object(
        Shape::new(Cylinder::new(0.0, 1.5, true))
            .with_transform(&translation(2.5, 0.0, 2.0) * &scaling(0.3, 1.0, 0.3))
            .with_material(Material::default().with_color(Color::new(0.8, 0.7, 0.2))),
    );

    world.add_object(
        Shape::new(Cone::new(-1.0, 0.0, true))
            .with_transform(&translation(0.8, 1.0, 2.5) * &scaling(0.4, 1.0, 0.4))
            .with_material(Material::default().with_color(Color::new(0.6, 0.2, 0.7))),
    );

    // A small faceted dome to give the subdivision something to chew on
    let mut dome = Shape::group();
    let (rings, segments) = (6, 16);
    for ring in 0..rings {
        let phi0 = (ring as f64) / (rings as f64) * PI / 2.0;
        let phi1 = ((ring + 1) as f64) / (rings as f64) * PI / 2.0;
        for segment in 0..segments {
            let theta0 = (segment as f64) / (segments as f64) * 2.0 * PI;
            let theta1 = ((segment + 1) as f64) / (segments as f64) * 2.0 * PI;
            let p = |phi: f64, theta: f64| {
                point(phi.cos() * theta.cos(), phi.sin(), phi.cos() * theta.sin())
            };
            let n = |phi: f64, theta: f64| {
                vector(phi.cos() * theta.cos(), phi.sin(), phi.cos() * theta.sin())
            };
            dome.add_child(Shape::smooth_triangle(
                p(phi0, theta0),
                p(phi1, theta0),
                p(phi0, theta1),
                n(phi0, theta0),
                n(phi1, theta0),
                n(phi0, theta1),
            ));
            dome.add_child(Shape::triangle(
                p(phi1, theta0),
                p(phi1, theta1),
                p(phi0, theta1),
            ));
        }
    }
    dome.set_transform(
        &translation(-1.5, 0.0, -1.5) * &(&rotation_x(-PI / 12.0) * &scaling(0.6, 0.6, 0.6)),
    );
    dome.set_material(Material {
        color: Color::new(1.0, 0.8, 0.6),
        specular: 0.5,
        ..Material::default()
    });
    dome.divide(4);
    world.add_object(dome);

    world.add_light(
        AreaLight::new(
            point(-5.0, 6.0, -6.0),
            vector(2.0, 0.0, 0.0),
            4,
            vector(0.0, 2.0, 0.0),
            2,
            Color::gray(0.8),
        ),
    );
    world.add_light(PointLight::new(point(6.0, 8.0, -4.0), Color::gray(0.3)));

    world
}

fn main() {
    if let Err(why) = setup_logger() {
        panic!("{}", why);
    };

    let settings = match std::env::args().nth(1) {
        Some(path) => expect!(Settings::load(&path), "Failed to load settings"),
        None => Settings::default(),
    };
    println!("{}", expect!(settings.to_yaml_string(), "Failed to serialize settings"));

    let cache = InverseCache::new(settings.render.inverse_cache_capacity);

    let s = *scaling(2.0, 3.0, 4.0).m();
    let r = Matrix4::new([
        [-0.6024969, 0.6975837, -0.3877816, 0.0],
        [-0.1818856, -0.5930915, -0.7843214, 0.0],
        [-0.7771198, -0.4020193, 0.4842162, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    let t = *translation(2.0, 3.0, 4.0).m();

    bench_inverse("Identity", &Matrix4::identity(), &cache);
    bench_inverse("S", &s, &cache);
    bench_inverse("SR", &(&r * &s), &cache);
    bench_inverse("SRT", &(&t * &(&r * &s)), &cache);
    cache.log_stats();

    let start = Instant::now();
    let world = Arc::new(demo_scene(&cache));
    println!("Scene built in {:.2}s", start.elapsed().as_secs_f32());

    let camera = expect!(settings.camera.camera(), "Invalid camera settings");

    let start = Instant::now();
    let canvas = camera.render(&world, &settings.render);
    println!(
        "Render took {:.2}s for {} pixels",
        start.elapsed().as_secs_f32(),
        canvas.pixels().len()
    );

    let start = Instant::now();
    let streamed = camera.stream(world.clone(), &settings.render).into_canvas();
    println!(
        "Stream took {:.2}s for {} pixels",
        start.elapsed().as_secs_f32(),
        streamed.pixels().len()
    );

    let mean = canvas
        .pixels()
        .iter()
        .fold(Color::BLACK, |acc, &c| acc + c)
        / (canvas.pixels().len() as f64);
    println!("Mean color {:.4} {:.4} {:.4}", mean.r, mean.g, mean.b);
}
