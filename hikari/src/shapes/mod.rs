mod cone;
mod cube;
mod cylinder;
mod group;
mod plane;
mod sphere;
mod triangle;

pub use cone::Cone;
pub use cube::Cube;
pub use cylinder::Cylinder;
pub use group::Group;
pub use plane::Plane;
pub use sphere::Sphere;
pub use triangle::{SmoothTriangle, Triangle};

use bitflags::bitflags;
use std::sync::Arc;

use crate::{
    intersection::{Intersection, Intersections},
    materials::Material,
    math::{BoundingBox, Ray, Transform, Tuple},
};

/// Local-space geometry of a primitive shape.
pub trait Primitive: Send + Sync {
    /// Intersects a local-space [Ray] with this primitive.
    fn local_intersect(&self, ray: &Ray) -> LocalHits;
    /// Returns the local-space normal at `p`.
    ///
    /// `uv` carries barycentric coordinates for primitives that interpolate normals.
    fn local_normal_at(&self, p: Tuple, uv: Option<(f64, f64)>) -> Tuple;
    /// Returns the local-space bounds of this primitive.
    fn bounds(&self) -> BoundingBox;
}

/// A single local-space hit.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LocalHit {
    pub t: f64,
    pub uv: Option<(f64, f64)>,
}

/// Local-space hits of one primitive. No primitive produces more than four.
#[derive(Copy, Clone, Debug, Default)]
pub struct LocalHits {
    hits: [LocalHit; 4],
    len: usize,
}

impl LocalHits {
    pub fn push(&mut self, t: f64) {
        self.push_uv(t, None);
    }

    pub fn push_uv(&mut self, t: f64, uv: Option<(f64, f64)>) {
        assert!(self.len < self.hits.len(), "Too many local hits");
        self.hits[self.len] = LocalHit { t, uv };
        self.len += 1;
    }

    pub fn as_slice(&self) -> &[LocalHit] {
        &self.hits[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocalHit> {
        self.as_slice().iter()
    }
}

bitflags! {
    /// Shadow behavior of a [Shape].
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct ShapeFlags: u8 {
        /// The shape occludes lights from other surfaces.
        const CASTS_SHADOW = 1;
        /// Lighting on the shape takes occlusion into account.
        const RECEIVES_SHADOW = 1 << 1;
    }
}

impl Default for ShapeFlags {
    fn default() -> Self {
        Self::all()
    }
}

#[derive(Clone)]
pub enum Geometry {
    Sphere(Sphere),
    Plane(Plane),
    Cube(Cube),
    Cylinder(Cylinder),
    Cone(Cone),
    Triangle(Triangle),
    SmoothTriangle(SmoothTriangle),
    Group(Group),
}

impl Geometry {
    fn primitive(&self) -> Option<&dyn Primitive> {
        match self {
            Geometry::Sphere(s) => Some(s),
            Geometry::Plane(s) => Some(s),
            Geometry::Cube(s) => Some(s),
            Geometry::Cylinder(s) => Some(s),
            Geometry::Cone(s) => Some(s),
            Geometry::Triangle(s) => Some(s),
            Geometry::SmoothTriangle(s) => Some(s),
            Geometry::Group(_) => None,
        }
    }
}

impl std::fmt::Debug for Geometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Geometry::Sphere(s) => s.fmt(f),
            Geometry::Plane(s) => s.fmt(f),
            Geometry::Cube(s) => s.fmt(f),
            Geometry::Cylinder(s) => s.fmt(f),
            Geometry::Cone(s) => s.fmt(f),
            Geometry::Triangle(s) => s.fmt(f),
            Geometry::SmoothTriangle(s) => s.fmt(f),
            Geometry::Group(g) => g.fmt(f),
        }
    }
}

macro_rules! impl_from_geometry {
    ($($variant:ident),+) => {
        $(
            impl From<$variant> for Geometry {
                fn from(g: $variant) -> Self {
                    Geometry::$variant(g)
                }
            }
        )+
    };
}

impl_from_geometry!(Sphere, Plane, Cube, Cylinder, Cone, Triangle, SmoothTriangle, Group);

/// A node in the scene graph: a primitive or a [Group] with its transform,
/// material and shadow flags.
///
/// Builder methods (`with_*`) consume and return the shape, setters mutate in
/// place. Changes to a group's transform, material or flags reach all of its
/// descendants.
#[derive(Clone, Debug)]
pub struct Shape {
    geometry: Geometry,
    transform: Transform,
    // Composed object-to-world frame of the containing group, identity at the root
    parent_to_world: Arc<Transform>,
    // parent_to_world * transform
    object_to_world: Arc<Transform>,
    material: Material,
    flags: ShapeFlags,
}

impl Shape {
    /// Creates a new `Shape` with identity transform and default material.
    pub fn new(geometry: impl Into<Geometry>) -> Self {
        let mut ret = Self {
            geometry: geometry.into(),
            transform: Transform::default(),
            parent_to_world: Arc::new(Transform::default()),
            object_to_world: Arc::new(Transform::default()),
            material: Material::default(),
            flags: ShapeFlags::default(),
        };
        ret.refresh_frames();
        ret
    }

    /// Creates a new unit sphere.
    pub fn sphere() -> Self {
        Self::new(Sphere)
    }

    /// Creates a new xz-plane.
    pub fn plane() -> Self {
        Self::new(Plane)
    }

    /// Creates a new axis-aligned cube spanning [-1, 1] on all axes.
    pub fn cube() -> Self {
        Self::new(Cube)
    }

    /// Creates a new infinite, open unit cylinder around the y-axis.
    pub fn cylinder() -> Self {
        Self::new(Cylinder::default())
    }

    /// Creates a new infinite, open double-napped cone around the y-axis.
    pub fn cone() -> Self {
        Self::new(Cone::default())
    }

    /// Creates a new flat triangle.
    pub fn triangle(p1: Tuple, p2: Tuple, p3: Tuple) -> Self {
        Self::new(Triangle::new(p1, p2, p3))
    }

    /// Creates a new triangle with per-vertex normals.
    pub fn smooth_triangle(
        p1: Tuple,
        p2: Tuple,
        p3: Tuple,
        n1: Tuple,
        n2: Tuple,
        n3: Tuple,
    ) -> Self {
        Self::new(SmoothTriangle::new(p1, p2, p3, n1, n2, n3))
    }

    /// Creates a new empty group.
    pub fn group() -> Self {
        Self::new(Group::default())
    }

    /// Creates a new group holding `children`.
    pub fn group_of(children: impl IntoIterator<Item = Shape>) -> Self {
        let mut ret = Self::group();
        for child in children {
            ret.add_child(child);
        }
        ret
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.set_transform(transform);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.set_material(material);
        self
    }

    pub fn with_flags(mut self, flags: ShapeFlags) -> Self {
        self.set_flags(flags);
        self
    }

    /// Sets whether this shape occludes lights.
    pub fn casting_shadow(mut self, casts: bool) -> Self {
        let mut flags = self.flags;
        flags.set(ShapeFlags::CASTS_SHADOW, casts);
        self.set_flags(flags);
        self
    }

    /// Sets whether lighting on this shape considers occlusion.
    pub fn receiving_shadow(mut self, receives: bool) -> Self {
        let mut flags = self.flags;
        flags.set(ShapeFlags::RECEIVES_SHADOW, receives);
        self.set_flags(flags);
        self
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.refresh_frames();
        // Parent bounds are stale now but the parent refreshes them when this
        // shape goes through add_child
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Sets the material of this shape and all of its descendants.
    pub fn set_material(&mut self, material: Material) {
        if let Geometry::Group(g) = &mut self.geometry {
            for child in g.children_mut() {
                child.set_material(material.clone());
            }
        }
        self.material = material;
    }

    pub fn flags(&self) -> ShapeFlags {
        self.flags
    }

    /// Sets the flags of this shape and all of its descendants.
    pub fn set_flags(&mut self, flags: ShapeFlags) {
        if let Geometry::Group(g) = &mut self.geometry {
            for child in g.children_mut() {
                child.set_flags(flags);
            }
        }
        self.flags = flags;
    }

    pub fn casts_shadow(&self) -> bool {
        self.flags.contains(ShapeFlags::CASTS_SHADOW)
    }

    pub fn receives_shadow(&self) -> bool {
        self.flags.contains(ShapeFlags::RECEIVES_SHADOW)
    }

    /// Returns the composed transform from this shape's local space to world space.
    pub fn object_to_world(&self) -> &Transform {
        &self.object_to_world
    }

    /// Converts a world-space point into this shape's local space through all enclosing groups.
    pub fn world_to_object(&self, p: Tuple) -> Tuple {
        self.object_to_world.inverse_apply(p)
    }

    /// Converts a local-space normal into a normalized world-space normal through all enclosing groups.
    pub fn normal_to_world(&self, n: Tuple) -> Tuple {
        self.object_to_world.normal(n)
    }

    /// Returns the local-space bounds of this shape.
    pub fn bounds(&self) -> BoundingBox {
        match &self.geometry {
            Geometry::Group(g) => g.bounds(),
            geometry => geometry
                .primitive()
                .map(|p| p.bounds())
                .unwrap_or_default(),
        }
    }

    /// Returns the bounds of this shape in the space of its parent.
    pub fn parent_space_bounds(&self) -> BoundingBox {
        &self.transform * self.bounds()
    }

    pub fn as_group(&self) -> Option<&Group> {
        match &self.geometry {
            Geometry::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn is_group(&self) -> bool {
        self.as_group().is_some()
    }

    /// Returns the children of this shape, empty for primitives.
    pub fn children(&self) -> &[Shape] {
        match &self.geometry {
            Geometry::Group(g) => g.children(),
            _ => &[],
        }
    }

    /// Appends `child` to this group.
    ///
    /// Panics if this shape is not a group.
    pub fn add_child(&mut self, child: Shape) {
        let frame = self.object_to_world.clone();
        match &mut self.geometry {
            Geometry::Group(g) => g.add_child(child, &frame),
            _ => panic!("add_child on a non-group shape"),
        }
    }

    /// Recursively subdivides this group so that no group holds more than
    /// `threshold` direct children that fit in either half of its bounds.
    /// Does nothing for primitives.
    pub fn divide(&mut self, threshold: usize) {
        let frame = self.object_to_world.clone();
        if let Geometry::Group(g) = &mut self.geometry {
            g.divide(threshold, &frame);
        }
    }

    /// Intersects a world-space `ray` with this shape, sorted by `t`.
    pub fn intersect<'a>(&'a self, ray: &Ray) -> Intersections<'a> {
        let mut hits = Vec::new();
        self.intersect_into(ray, &mut hits);
        Intersections::new(hits)
    }

    /// Appends the unsorted hits of a `ray` in parent space to `out`.
    pub(crate) fn intersect_into<'a>(&'a self, ray: &Ray, out: &mut Vec<Intersection<'a>>) {
        let local_ray = ray.transformed(self.transform.m_inv());
        match &self.geometry {
            Geometry::Group(g) => g.intersect_into(&local_ray, out),
            geometry => {
                if let Some(p) = geometry.primitive() {
                    out.extend(
                        p.local_intersect(&local_ray)
                            .iter()
                            .map(|h| Intersection::with_uv(h.t, self, h.uv)),
                    );
                }
            }
        }
    }

    /// Returns the world-space normal at world-space point `p`.
    ///
    /// Panics if this shape is a group.
    pub fn normal_at(&self, p: Tuple, uv: Option<(f64, f64)>) -> Tuple {
        let primitive = match self.geometry.primitive() {
            Some(p) => p,
            None => panic!("normal_at called on a group"),
        };
        let local_point = self.world_to_object(p);
        let local_normal = primitive.local_normal_at(local_point, uv);
        self.normal_to_world(local_normal)
    }

    pub(crate) fn set_parent_frame(&mut self, parent_to_world: Arc<Transform>) {
        self.parent_to_world = parent_to_world;
        self.refresh_frames();
    }

    fn refresh_frames(&mut self) {
        self.object_to_world = Arc::new(&*self.parent_to_world * &self.transform);
        let frame = self.object_to_world.clone();
        if let Geometry::Group(g) = &mut self.geometry {
            for child in g.children_mut() {
                child.set_parent_frame(frame.clone());
            }
        }
    }
}
