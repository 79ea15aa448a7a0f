use std::f64::consts::PI;
use strum::{Display, EnumIter};

use crate::math::{Color, Tuple};

/// A color function over the unit square.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum UvPattern {
    /// `width` by `height` alternating cells.
    Checkers {
        width: f64,
        height: f64,
        a: Color,
        b: Color,
    },
    /// A solid `main` color with distinct corner squares, for checking face orientation.
    AlignCheck {
        main: Color,
        ul: Color,
        ur: Color,
        bl: Color,
        br: Color,
    },
}

impl UvPattern {
    pub fn checkers(width: f64, height: f64, a: Color, b: Color) -> Self {
        Self::Checkers {
            width,
            height,
            a,
            b,
        }
    }

    pub fn align_check(main: Color, ul: Color, ur: Color, bl: Color, br: Color) -> Self {
        Self::AlignCheck {
            main,
            ul,
            ur,
            bl,
            br,
        }
    }

    pub fn color_at(&self, u: f64, v: f64) -> Color {
        match *self {
            UvPattern::Checkers {
                width,
                height,
                a,
                b,
            } => {
                let u2 = (u * width).floor() as i64;
                let v2 = (v * height).floor() as i64;
                if (u2 + v2).rem_euclid(2) == 0 {
                    a
                } else {
                    b
                }
            }
            UvPattern::AlignCheck {
                main,
                ul,
                ur,
                bl,
                br,
            } => {
                if v > 0.8 {
                    if u < 0.2 {
                        return ul;
                    }
                    if u > 0.8 {
                        return ur;
                    }
                } else if v < 0.2 {
                    if u < 0.2 {
                        return bl;
                    }
                    if u > 0.8 {
                        return br;
                    }
                }
                main
            }
        }
    }
}

/// Projection from a 3D point to (u, v) in the unit square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumIter)]
pub enum UvMapping {
    Spherical,
    Planar,
    Cylindrical,
}

impl UvMapping {
    pub fn map(&self, p: Tuple) -> (f64, f64) {
        match self {
            UvMapping::Spherical => {
                let theta = p.x.atan2(p.z);
                let radius = p.as_vector().len();
                let phi = (p.y / radius).acos();
                let raw_u = theta / (2.0 * PI);
                (1.0 - (raw_u + 0.5), 1.0 - phi / PI)
            }
            UvMapping::Planar => (p.x.rem_euclid(1.0), p.z.rem_euclid(1.0)),
            UvMapping::Cylindrical => {
                let theta = p.x.atan2(p.z);
                let raw_u = theta / (2.0 * PI);
                (1.0 - (raw_u + 0.5), p.y.rem_euclid(1.0))
            }
        }
    }
}

/// Faces of the [-1, 1] cube, in the order cube maps store them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumIter)]
pub enum CubeFace {
    Left,
    Front,
    Right,
    Back,
    Up,
    Down,
}

impl CubeFace {
    /// Finds the face whose axis dominates `p`.
    pub fn from_point(p: Tuple) -> Self {
        let coord = p.x.abs().max(p.y.abs()).max(p.z.abs());
        if coord == p.x {
            CubeFace::Right
        } else if coord == -p.x {
            CubeFace::Left
        } else if coord == p.y {
            CubeFace::Up
        } else if coord == -p.y {
            CubeFace::Down
        } else if coord == p.z {
            CubeFace::Front
        } else {
            CubeFace::Back
        }
    }

    /// Maps `p` to (u, v) on this face.
    pub fn uv(&self, p: Tuple) -> (f64, f64) {
        let wrap = |v: f64| v.rem_euclid(2.0) / 2.0;
        match self {
            CubeFace::Front => (wrap(p.x + 1.0), wrap(p.y + 1.0)),
            CubeFace::Back => (wrap(1.0 - p.x), wrap(p.y + 1.0)),
            CubeFace::Left => (wrap(p.z + 1.0), wrap(p.y + 1.0)),
            CubeFace::Right => (wrap(1.0 - p.z), wrap(p.y + 1.0)),
            CubeFace::Up => (wrap(p.x + 1.0), wrap(1.0 - p.z)),
            CubeFace::Down => (wrap(p.x + 1.0), wrap(p.z + 1.0)),
        }
    }
}
