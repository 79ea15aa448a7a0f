use approx::{AbsDiffEq, RelativeEq};
use std::ops::Mul;

use super::tuple::Tuple;

/// A row-major 4x4 `Matrix4`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix4 {
    /// Raw values in row-major order.
    pub m: [[f64; 4]; 4],
}

impl Matrix4 {
    /// Creates a new `Matrix4`.
    pub fn new(m: [[f64; 4]; 4]) -> Self {
        let ret = Self { m };
        debug_assert!(!ret.has_nans());
        ret
    }

    /// Creates a new identity `Matrix4`.
    pub const fn identity() -> Self {
        Self {
            m: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Creates a new `Matrix4` filled with zeroes.
    pub const fn zeros() -> Self {
        Self { m: [[0.0; 4]; 4] }
    }

    /// Checks if this `Matrix4` contains NaNs.
    pub fn has_nans(&self) -> bool {
        // NaNs are the rare special case so no need to early out
        self.m.iter().flatten().any(|v| v.is_nan())
    }

    /// Returns the `i`th row of this `Matrix4`.
    pub fn row(&self, i: usize) -> [f64; 4] {
        self.m[i]
    }

    /// Returns the `i`th column of this `Matrix4`.
    pub fn col(&self, i: usize) -> [f64; 4] {
        [self.m[0][i], self.m[1][i], self.m[2][i], self.m[3][i]]
    }

    /// Returns the transpose of this `Matrix4`.
    pub fn transposed(&self) -> Self {
        Self {
            m: [
                self.col(0),
                self.col(1),
                self.col(2),
                self.col(3),
            ],
        }
    }

    /// Returns the 3x3 matrix left after removing `row` and `col`.
    pub fn submatrix(&self, row: usize, col: usize) -> [[f64; 3]; 3] {
        let mut ret = [[0.0; 3]; 3];
        for (ri, r) in (0..4).filter(|&r| r != row).enumerate() {
            for (ci, c) in (0..4).filter(|&c| c != col).enumerate() {
                ret[ri][ci] = self.m[r][c];
            }
        }
        ret
    }

    /// Returns the determinant of the submatrix at (`row`, `col`).
    pub fn minor(&self, row: usize, col: usize) -> f64 {
        det3(&self.submatrix(row, col))
    }

    /// Returns the signed minor at (`row`, `col`).
    pub fn cofactor(&self, row: usize, col: usize) -> f64 {
        let minor = self.minor(row, col);
        if (row + col) % 2 == 0 {
            minor
        } else {
            -minor
        }
    }

    /// Returns the determinant of this `Matrix4`, expanded along the first row.
    pub fn determinant(&self) -> f64 {
        (0..4).map(|col| self.m[0][col] * self.cofactor(0, col)).sum()
    }

    /// Checks if this `Matrix4` has an inverse.
    pub fn is_invertible(&self) -> bool {
        self.determinant() != 0.0
    }

    /// Returns the inverse of this `Matrix4` or `None` if it is singular.
    pub fn try_inverted(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 {
            return None;
        }

        // Transposed cofactors, written straight into their transposed slots
        let mut mi = Self::zeros();
        for row in 0..4 {
            for col in 0..4 {
                mi.m[col][row] = self.cofactor(row, col) / det;
            }
        }
        Some(mi)
    }

    /// Returns the inverse of this `Matrix4`.
    ///
    /// Panics if the matrix is singular.
    pub fn inverted(&self) -> Self {
        match self.try_inverted() {
            Some(mi) => mi,
            None => panic!("Can't invert, singular matrix"),
        }
    }

    /// Returns the bit pattern of this `Matrix4` for use as an exact lookup key.
    pub fn key(&self) -> [u64; 16] {
        let mut ret = [0; 16];
        for (dst, v) in ret.iter_mut().zip(self.m.iter().flatten()) {
            // Fold -0.0 into 0.0 so equal matrices share a key
            *dst = if *v == 0.0 { 0 } else { v.to_bits() };
        }
        ret
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

fn det2(m: [[f64; 2]; 2]) -> f64 {
    m[0][0] * m[1][1] - m[0][1] * m[1][0]
}

fn det3(m: &[[f64; 3]; 3]) -> f64 {
    (0..3)
        .map(|col| {
            let mut sub = [[0.0; 2]; 2];
            for (ri, r) in (1..3).enumerate() {
                for (ci, c) in (0..3).filter(|&c| c != col).enumerate() {
                    sub[ri][ci] = m[r][c];
                }
            }
            let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
            sign * m[0][col] * det2(sub)
        })
        .sum()
}

impl From<[f64; 16]> for Matrix4 {
    fn from(m: [f64; 16]) -> Self {
        Self::new([
            [m[0], m[1], m[2], m[3]],
            [m[4], m[5], m[6], m[7]],
            [m[8], m[9], m[10], m[11]],
            [m[12], m[13], m[14], m[15]],
        ])
    }
}

// By ref is about twice as fast as by value so let's just endure the syntax
impl<'a, 'b> Mul<&'b Matrix4> for &'a Matrix4 {
    type Output = Matrix4;

    fn mul(self, other: &'b Matrix4) -> Matrix4 {
        let mut ret = Matrix4::zeros();
        for row in 0..4 {
            for col in 0..4 {
                ret.m[row][col] = self.m[row][0] * other.m[0][col]
                    + self.m[row][1] * other.m[1][col]
                    + self.m[row][2] * other.m[2][col]
                    + self.m[row][3] * other.m[3][col];
            }
        }
        debug_assert!(!ret.has_nans());
        ret
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(self, other: Matrix4) -> Matrix4 {
        &self * &other
    }
}

impl<'a> Mul<Tuple> for &'a Matrix4 {
    type Output = Tuple;

    fn mul(self, t: Tuple) -> Tuple {
        let m = &self.m;
        Tuple::new(
            m[0][0] * t.x + m[0][1] * t.y + m[0][2] * t.z + m[0][3] * t.w,
            m[1][0] * t.x + m[1][1] * t.y + m[1][2] * t.z + m[1][3] * t.w,
            m[2][0] * t.x + m[2][1] * t.y + m[2][2] * t.z + m[2][3] * t.w,
            m[3][0] * t.x + m[3][1] * t.y + m[3][2] * t.z + m[3][3] * t.w,
        )
    }
}

impl Mul<Tuple> for Matrix4 {
    type Output = Tuple;

    fn mul(self, t: Tuple) -> Tuple {
        &self * t
    }
}

impl AbsDiffEq for Matrix4 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Matrix4 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
