#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_1_SQRT_2;

    use hikari::{
        lights::{lighting, AreaLight, JitterSequence, Light, PointLight},
        materials::Material,
        math::{point, vector, Color, Tuple},
        patterns::Pattern,
        shapes::Shape,
        world::World,
    };

    fn light_at(p: Tuple) -> PointLight {
        PointLight::new(p, Color::WHITE)
    }

    fn shade(eyev: Tuple, light: &dyn Light, intensity: f64) -> Color {
        let s = Shape::sphere();
        lighting(
            &Material::default(),
            &s,
            light,
            point(0.0, 0.0, 0.0),
            eyev,
            vector(0.0, 0.0, -1.0),
            intensity,
        )
    }

    #[test]
    fn point_light() {
        let l = PointLight::new(point(0.0, 0.0, 0.0), Color::WHITE);
        assert_eq!(l.position(), point(0.0, 0.0, 0.0));
        assert_eq!(l.intensity(), Color::WHITE);
        assert_eq!((l.usteps(), l.vsteps(), l.samples()), (1, 1, 1));
        assert_eq!(l.point_on_light(0, 0), l.position());
    }

    #[test]
    fn material_default() {
        let m = Material::default();
        assert_eq!(m.color, Color::WHITE);
        assert!(m.pattern.is_none());
        assert_eq!(m.ambient, 0.1);
        assert_eq!(m.diffuse, 0.9);
        assert_eq!(m.specular, 0.9);
        assert_eq!(m.shininess, 200.0);
        assert_eq!(m.reflective, 0.0);
        assert_eq!(m.transparency, 0.0);
        assert_eq!(m.refractive_index, 1.0);
    }

    #[test]
    fn lighting_eye_between() {
        let c = shade(
            vector(0.0, 0.0, -1.0),
            &light_at(point(0.0, 0.0, -10.0)),
            1.0,
        );
        assert_abs_diff_eq!(c, Color::gray(1.9), epsilon = 1e-9);
    }

    #[test]
    fn lighting_eye_offset() {
        let c = shade(
            vector(0.0, FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
            &light_at(point(0.0, 0.0, -10.0)),
            1.0,
        );
        assert_abs_diff_eq!(c, Color::gray(1.0), epsilon = 1e-9);
    }

    #[test]
    fn lighting_light_offset() {
        let c = shade(
            vector(0.0, 0.0, -1.0),
            &light_at(point(0.0, 10.0, -10.0)),
            1.0,
        );
        assert_abs_diff_eq!(c, Color::gray(0.7364), epsilon = 1e-4);
    }

    #[test]
    fn lighting_eye_in_reflection() {
        let c = shade(
            vector(0.0, -FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
            &light_at(point(0.0, 10.0, -10.0)),
            1.0,
        );
        assert_abs_diff_eq!(c, Color::gray(1.6364), epsilon = 1e-4);
    }

    #[test]
    fn lighting_light_behind() {
        let c = shade(
            vector(0.0, 0.0, -1.0),
            &light_at(point(0.0, 0.0, 10.0)),
            1.0,
        );
        assert_abs_diff_eq!(c, Color::gray(0.1), epsilon = 1e-9);
    }

    #[test]
    fn lighting_shadowed() {
        let c = shade(
            vector(0.0, 0.0, -1.0),
            &light_at(point(0.0, 0.0, -10.0)),
            0.0,
        );
        assert_abs_diff_eq!(c, Color::gray(0.1), epsilon = 1e-9);
    }

    #[test]
    fn lighting_partial_intensity() {
        let light = light_at(point(0.0, 0.0, -10.0));
        let full = shade(vector(0.0, 0.0, -1.0), &light, 1.0);
        let half = shade(vector(0.0, 0.0, -1.0), &light, 0.5);
        // Ambient stays put, the rest scales
        assert_abs_diff_eq!(half, Color::gray(0.1) + (full - Color::gray(0.1)) * 0.5, epsilon = 1e-9);
    }

    #[test]
    fn lighting_pattern() {
        let m = Material {
            ambient: 1.0,
            diffuse: 0.0,
            specular: 0.0,
            ..Material::default()
        }
        .with_pattern(Pattern::stripe(Color::WHITE, Color::BLACK));
        let s = Shape::sphere();
        let light = light_at(point(0.0, 0.0, -10.0));
        let eyev = vector(0.0, 0.0, -1.0);
        let normalv = vector(0.0, 0.0, -1.0);

        let c1 = lighting(&m, &s, &light, point(0.9, 0.0, 0.0), eyev, normalv, 1.0);
        let c2 = lighting(&m, &s, &light, point(1.1, 0.0, 0.0), eyev, normalv, 1.0);
        assert_eq!(c1, Color::WHITE);
        assert_eq!(c2, Color::BLACK);
    }

    #[test]
    fn point_light_intensity_at() {
        let w = World::default_scene();
        let light = w.lights()[0].clone();
        let cases = [
            (point(0.0, 1.0001, 0.0), 1.0),
            (point(-1.0001, 0.0, 0.0), 1.0),
            (point(0.0, 0.0, -1.0001), 1.0),
            (point(0.0, 0.0, 1.0001), 0.0),
            (point(1.0001, 0.0, 0.0), 0.0),
            (point(0.0, -1.0001, 0.0), 0.0),
            (point(0.0, 0.0, 0.0), 0.0),
        ];
        for (p, expected) in cases {
            assert_eq!(light.intensity_at(p, &w), expected, "{:?}", p);
        }
    }

    #[test]
    fn area_light_new() {
        let l = AreaLight::new(
            point(0.0, 0.0, 0.0),
            vector(2.0, 0.0, 0.0),
            4,
            vector(0.0, 0.0, 1.0),
            2,
            Color::WHITE,
        );
        assert_eq!(l.corner(), point(0.0, 0.0, 0.0));
        assert_eq!(l.uvec(), vector(0.5, 0.0, 0.0));
        assert_eq!(l.usteps(), 4);
        assert_eq!(l.vvec(), vector(0.0, 0.0, 0.5));
        assert_eq!(l.vsteps(), 2);
        assert_eq!(l.samples(), 8);
        assert_eq!(l.position(), point(1.0, 0.0, 0.5));
    }

    #[test]
    #[should_panic]
    fn area_light_without_cells() {
        AreaLight::new(
            point(0.0, 0.0, 0.0),
            vector(2.0, 0.0, 0.0),
            0,
            vector(0.0, 0.0, 1.0),
            2,
            Color::WHITE,
        );
    }

    fn cell_light(jitter: JitterSequence) -> AreaLight {
        AreaLight::new(
            point(0.0, 0.0, 0.0),
            vector(2.0, 0.0, 0.0),
            4,
            vector(0.0, 0.0, 1.0),
            2,
            Color::WHITE,
        )
        .with_jitter(jitter)
    }

    #[test]
    fn point_on_light_centered() {
        let l = cell_light(JitterSequence::fixed(vec![0.5]));
        let cases = [
            ((0, 0), point(0.25, 0.0, 0.25)),
            ((1, 0), point(0.75, 0.0, 0.25)),
            ((0, 1), point(0.25, 0.0, 0.75)),
            ((2, 0), point(1.25, 0.0, 0.25)),
            ((3, 1), point(1.75, 0.0, 0.75)),
        ];
        for ((u, v), expected) in cases {
            assert_abs_diff_eq!(l.point_on_light(u, v), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn point_on_light_jittered() {
        let l = cell_light(JitterSequence::fixed(vec![0.3, 0.7]));
        let cases = [
            ((0, 0), point(0.15, 0.0, 0.35)),
            ((1, 0), point(0.65, 0.0, 0.35)),
            ((0, 1), point(0.15, 0.0, 0.85)),
            ((2, 0), point(1.15, 0.0, 0.35)),
            ((3, 1), point(1.65, 0.0, 0.85)),
        ];
        for ((u, v), expected) in cases {
            assert_abs_diff_eq!(l.point_on_light(u, v), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn point_on_light_random() {
        let l = cell_light(JitterSequence::seeded(7));
        for v in 0..2 {
            for u in 0..4 {
                let p = l.point_on_light(u, v);
                // Stays inside its own cell
                assert!(p.x >= u as f64 * 0.5 && p.x < (u + 1) as f64 * 0.5, "{:?}", p);
                assert!(p.z >= v as f64 * 0.5 && p.z < (v + 1) as f64 * 0.5, "{:?}", p);
                assert_eq!(p.y, 0.0);
            }
        }
    }

    #[test]
    #[should_panic]
    fn empty_fixed_jitter() {
        JitterSequence::fixed(Vec::new());
    }

    #[test]
    fn area_light_intensity_at() {
        let w = World::default_scene();
        let light = AreaLight::new(
            point(-0.5, -0.5, -5.0),
            vector(1.0, 0.0, 0.0),
            2,
            vector(0.0, 1.0, 0.0),
            2,
            Color::WHITE,
        )
        .with_jitter(JitterSequence::fixed(vec![0.5]));
        let cases = [
            (point(0.0, 0.0, 2.0), 0.0),
            (point(1.0, -1.0, 2.0), 0.25),
            (point(1.5, 0.0, 2.0), 0.5),
            (point(1.25, 1.25, 3.0), 0.75),
            (point(0.0, 0.0, -2.0), 1.0),
        ];
        for (p, expected) in cases {
            assert_abs_diff_eq!(light.intensity_at(p, &w), expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn lighting_area_light() {
        let light = AreaLight::new(
            point(-0.5, -0.5, -5.0),
            vector(1.0, 0.0, 0.0),
            2,
            vector(0.0, 1.0, 0.0),
            2,
            Color::WHITE,
        )
        .with_jitter(JitterSequence::fixed(vec![0.5]));
        let m = Material {
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.0,
            ..Material::default()
        };
        let s = Shape::sphere();
        let eye = point(0.0, 0.0, -5.0);
        let cases = [
            (point(0.0, 0.0, -1.0), Color::gray(0.9965)),
            (point(0.0, 0.7071, -0.7071), Color::gray(0.62318)),
        ];
        for (p, expected) in cases {
            let eyev = (eye - p).normalized();
            let normalv = vector(p.x, p.y, p.z);
            let c = lighting(&m, &s, &light, p, eyev, normalv, 1.0);
            assert_abs_diff_eq!(c, expected, epsilon = 1e-4);
        }
    }
}
