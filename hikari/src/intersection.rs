use std::ops::Index;

use crate::{
    math::{Ray, Tuple, EPSILON},
    shapes::Shape,
};

/// A ray hit on a [Shape] at distance `t`.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub t: f64,
    pub object: &'a Shape,
    /// Barycentric coordinates of the hit for smooth triangles
    pub uv: Option<(f64, f64)>,
}

/// Info of a surface hit
#[derive(Copy, Clone, Debug)]
pub struct Computations<'a> {
    /// Hit distance
    pub t: f64,
    pub object: &'a Shape,
    /// World position
    pub point: Tuple,
    /// World position nudged along the normal, origin for secondary rays
    pub over_point: Tuple,
    /// Direction toward the eye
    pub eyev: Tuple,
    /// Surface normal, facing the eye
    pub normalv: Tuple,
    /// Incoming direction reflected about the normal
    pub reflectv: Tuple,
    /// Set if the hit is on the inside of the surface
    pub inside: bool,
}

impl<'a> Intersection<'a> {
    /// Creates a new `Intersection`.
    pub fn new(t: f64, object: &'a Shape) -> Self {
        Self::with_uv(t, object, None)
    }

    /// Creates a new `Intersection` that carries barycentric coordinates.
    pub fn with_uv(t: f64, object: &'a Shape, uv: Option<(f64, f64)>) -> Self {
        Self { t, object, uv }
    }

    /// Derives the shading quantities for this hit along `ray`.
    pub fn prepare_computations(&self, ray: &Ray) -> Computations<'a> {
        let point = ray.position(self.t);
        let eyev = -ray.direction;
        let mut normalv = self.object.normal_at(point, self.uv);

        let inside = normalv.dot(eyev) < 0.0;
        if inside {
            normalv = -normalv;
        }

        Computations {
            t: self.t,
            object: self.object,
            point,
            over_point: point + normalv * EPSILON,
            eyev,
            normalv,
            reflectv: ray.direction.reflect(normalv),
            inside,
        }
    }
}

impl<'a> PartialEq for Intersection<'a> {
    fn eq(&self, other: &Self) -> bool {
        self.t == other.t && std::ptr::eq(self.object, other.object) && self.uv == other.uv
    }
}

/// Intersections along a ray, always sorted by ascending `t`.
#[derive(Clone, Debug, Default)]
pub struct Intersections<'a> {
    hits: Vec<Intersection<'a>>,
}

impl<'a> Intersections<'a> {
    /// Creates a new `Intersections` from unsorted `hits`.
    pub fn new(mut hits: Vec<Intersection<'a>>) -> Self {
        hits.sort_by(|a, b| a.t.total_cmp(&b.t));
        Self { hits }
    }

    /// Returns the nearest intersection with a non-negative `t`.
    pub fn hit(&self) -> Option<&Intersection<'a>> {
        self.hits.iter().find(|i| i.t >= 0.0)
    }

    /// Merges `other` into these intersections, keeping the order.
    pub fn merge(&mut self, other: Intersections<'a>) {
        self.hits.extend(other.hits);
        self.hits.sort_by(|a, b| a.t.total_cmp(&b.t));
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Intersection<'a>> {
        self.hits.iter()
    }

    pub fn as_slice(&self) -> &[Intersection<'a>] {
        &self.hits
    }
}

impl<'a> Index<usize> for Intersections<'a> {
    type Output = Intersection<'a>;

    fn index(&self, i: usize) -> &Intersection<'a> {
        &self.hits[i]
    }
}

impl<'a> IntoIterator for Intersections<'a> {
    type Item = Intersection<'a>;
    type IntoIter = std::vec::IntoIter<Intersection<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.into_iter()
    }
}

impl<'a, 'b> IntoIterator for &'b Intersections<'a> {
    type Item = &'b Intersection<'a>;
    type IntoIter = std::slice::Iter<'b, Intersection<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.iter()
    }
}

impl<'a> FromIterator<Intersection<'a>> for Intersections<'a> {
    fn from_iter<I: IntoIterator<Item = Intersection<'a>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
