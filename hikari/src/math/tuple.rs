use approx::{AbsDiffEq, RelativeEq};
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

/// A homogeneous 4-component tuple.
///
/// `w == 1.0` marks a point and `w == 0.0` a vector. Every operation works
/// component-wise on all four components, `w` included, so adding two points
/// yields `w == 2.0` and subtracting a point from a vector yields `w == -1.0`.
/// Code that needs a clean vector out of such arithmetic calls [`Tuple::as_vector`].
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Tuple {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

/// Creates a new point `Tuple`.
#[inline]
pub const fn point(x: f64, y: f64, z: f64) -> Tuple {
    Tuple::new(x, y, z, 1.0)
}

/// Creates a new vector `Tuple`.
#[inline]
pub const fn vector(x: f64, y: f64, z: f64) -> Tuple {
    Tuple::new(x, y, z, 0.0)
}

impl Tuple {
    /// Creates a new `Tuple`.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a new `Tuple` filled with zeroes.
    #[inline]
    pub const fn zeros() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Checks if this `Tuple` is a point.
    #[inline]
    pub fn is_point(&self) -> bool {
        self.w == 1.0
    }

    /// Checks if this `Tuple` is a vector.
    #[inline]
    pub fn is_vector(&self) -> bool {
        self.w == 0.0
    }

    /// Checks if this `Tuple` contains NaNs.
    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan() || self.w.is_nan()
    }

    /// Returns a copy of this `Tuple` with `w` forced to zero.
    #[inline]
    pub fn as_vector(self) -> Self {
        Self { w: 0.0, ..self }
    }

    /// Returns the dot product of this `Tuple` and `other`, `w` included.
    #[inline]
    pub fn dot(&self, other: Tuple) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Returns the cross product of this `Tuple` and `other` as a vector.
    #[inline]
    pub fn cross(&self, other: Tuple) -> Tuple {
        vector(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Returns the squared length of this `Tuple`.
    #[inline]
    pub fn len_sqr(&self) -> f64 {
        self.dot(*self)
    }

    /// Returns the length of this `Tuple`.
    #[inline]
    pub fn len(&self) -> f64 {
        self.len_sqr().sqrt()
    }

    /// Returns a normalized copy of this `Tuple`.
    #[inline]
    pub fn normalized(&self) -> Self {
        *self / self.len()
    }

    /// Reflects this `Tuple` about `normal`.
    #[inline]
    pub fn reflect(&self, normal: Tuple) -> Self {
        *self - normal * 2.0 * self.dot(normal)
    }

    /// Returns the component-wise minimum of this `Tuple` and `other`.
    pub fn min(&self, other: Tuple) -> Self {
        Self::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
            self.w.min(other.w),
        )
    }

    /// Returns the component-wise maximum of this `Tuple` and `other`.
    pub fn max(&self, other: Tuple) -> Self {
        Self::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
            self.w.max(other.w),
        )
    }
}

impl Add for Tuple {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.w + other.w,
        )
    }
}

impl AddAssign for Tuple {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Tuple {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
            self.w - other.w,
        )
    }
}

impl SubAssign for Tuple {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Tuple {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl Mul<f64> for Tuple {
    type Output = Self;

    fn mul(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }
}

impl MulAssign<f64> for Tuple {
    fn mul_assign(&mut self, s: f64) {
        *self = *self * s;
    }
}

impl Div<f64> for Tuple {
    type Output = Self;

    fn div(self, s: f64) -> Self {
        Self::new(self.x / s, self.y / s, self.z / s, self.w / s)
    }
}

impl Index<usize> for Tuple {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Tuple index {} out of bounds", i),
        }
    }
}

impl IndexMut<usize> for Tuple {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("Tuple index {} out of bounds", i),
        }
    }
}

impl AbsDiffEq for Tuple {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
            && self.w.abs_diff_eq(&other.w, epsilon)
    }
}

impl RelativeEq for Tuple {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
            && self.w.relative_eq(&other.w, epsilon, max_relative)
    }
}
