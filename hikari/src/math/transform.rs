use std::ops::Mul;

use super::{
    bounds::BoundingBox, inverse_cache::InverseCache, matrix::Matrix4, ray::Ray, tuple::Tuple,
};

/// A [`Matrix4`] paired with its inverse so the inversion happens once per object.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    m: Matrix4,
    m_inv: Matrix4,
}

impl Transform {
    /// Creates a new `Transform` from raw [`Matrix4`] rows.
    pub fn new(m: [[f64; 4]; 4]) -> Self {
        Self::new_m(Matrix4::new(m))
    }

    /// Creates a new `Transform` from a [`Matrix4`].
    ///
    /// Panics if `m` is singular.
    pub fn new_m(m: Matrix4) -> Self {
        let m_inv = m.inverted();
        Self::new_full(m, m_inv)
    }

    /// Creates a new `Transform` from a [`Matrix4`] and its inverse.
    pub fn new_full(m: Matrix4, m_inv: Matrix4) -> Self {
        debug_assert!(!m.has_nans());
        debug_assert!(!m_inv.has_nans());
        Self { m, m_inv }
    }

    /// Creates a new `Transform` from a [`Matrix4`], looking the inverse up in `cache`.
    ///
    /// Panics if `m` is singular.
    pub fn cached(m: Matrix4, cache: &InverseCache) -> Self {
        let m_inv = cache.inverse(&m);
        Self::new_full(m, m_inv)
    }

    /// Returns a reference to the [`Matrix4`] of this `Transform`.
    pub fn m(&self) -> &Matrix4 {
        &self.m
    }

    /// Returns a reference to the inverse [`Matrix4`] of this `Transform`.
    pub fn m_inv(&self) -> &Matrix4 {
        &self.m_inv
    }

    /// Returns the inverse of this `Transform`.
    pub fn inverted(&self) -> Self {
        Self::new_full(self.m_inv, self.m)
    }

    /// Returns the transpose of this `Transform`.
    pub fn transposed(&self) -> Self {
        Self::new_full(self.m.transposed(), self.m_inv.transposed())
    }

    /// Checks if this `Transform` is the identity transform.
    pub fn is_identity(&self) -> bool {
        self.m == Matrix4::identity()
    }

    /// Maps `p` from the space this `Transform` maps into back to its source space.
    pub fn inverse_apply(&self, p: Tuple) -> Tuple {
        &self.m_inv * p
    }

    /// Transforms a surface normal through the transpose of the inverse.
    ///
    /// The result is forced to be a vector and normalized, which keeps normals
    /// perpendicular to their surface under non-uniform scaling.
    pub fn normal(&self, n: Tuple) -> Tuple {
        let m_inv = &self.m_inv.m;
        // Transpose inverse matrix through accesses
        Tuple::new(
            m_inv[0][0] * n.x + m_inv[1][0] * n.y + m_inv[2][0] * n.z + m_inv[3][0] * n.w,
            m_inv[0][1] * n.x + m_inv[1][1] * n.y + m_inv[2][1] * n.z + m_inv[3][1] * n.w,
            m_inv[0][2] * n.x + m_inv[1][2] * n.y + m_inv[2][2] * n.z + m_inv[3][2] * n.w,
            0.0,
        )
        .normalized()
    }
}

impl Default for Transform {
    /// Creates a new identity `Transform`.
    fn default() -> Self {
        let m = Matrix4::identity();
        Self::new_full(m, m)
    }
}

impl<'a> Mul<Tuple> for &'a Transform {
    type Output = Tuple;

    fn mul(self, other: Tuple) -> Tuple {
        &self.m * other
    }
}

impl<'a> Mul<Ray> for &'a Transform {
    type Output = Ray;

    fn mul(self, other: Ray) -> Ray {
        other.transformed(&self.m)
    }
}

impl<'a> Mul<BoundingBox> for &'a Transform {
    type Output = BoundingBox;

    fn mul(self, other: BoundingBox) -> BoundingBox {
        other.transformed(&self.m)
    }
}

impl<'a, 'b> Mul<&'b Transform> for &'a Transform {
    type Output = Transform;

    fn mul(self, other: &Transform) -> Transform {
        Transform::new_full(&self.m * &other.m, &other.m_inv * &self.m_inv)
    }
}
