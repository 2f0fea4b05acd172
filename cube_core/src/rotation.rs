use std::ops::Mul;

use crate::slot::Axis;

/// An exact element of the rotation group of the cube, stored as an integer matrix.
///
/// Composing quarter turns never drifts, so "is this the identity" is an exact question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rotation {
    rows: [[i8; 3]; 3],
}

impl Rotation {
    pub const IDENTITY: Rotation = Rotation {
        rows: [[1, 0, 0], [0, 1, 0], [0, 0, 1]],
    };

    /// A counter-clockwise (right handed) quarter turn about `axis`, or clockwise if `positive` is false
    #[must_use]
    pub fn quarter_turn(axis: Axis, positive: bool) -> Rotation {
        let s = if positive { 1 } else { -1 };

        let rows = match axis {
            Axis::X => [[1, 0, 0], [0, 0, -s], [0, s, 0]],
            Axis::Y => [[0, 0, s], [0, 1, 0], [-s, 0, 0]],
            Axis::Z => [[0, -s, 0], [s, 0, 0], [0, 0, 1]],
        };

        Rotation { rows }
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Rotation::IDENTITY
    }

    /// The inverse rotation. For an orthogonal matrix this is the transpose.
    #[must_use]
    pub fn inverse(&self) -> Rotation {
        let mut rows = [[0; 3]; 3];

        for (i, row) in self.rows.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                rows[j][i] = *v;
            }
        }

        Rotation { rows }
    }

    /// Rotate an integer vector
    #[must_use]
    pub fn apply(&self, v: [i8; 3]) -> [i8; 3] {
        self.rows
            .map(|row| row.iter().zip(v).map(|(a, b)| a * b).sum())
    }

    /// Convert to a unit quaternion for presentation
    #[must_use]
    pub fn to_quaternion(&self) -> Quaternion {
        let m = self.rows.map(|row| row.map(f32::from));
        let trace = m[0][0] + m[1][1] + m[2][2];

        // Pick the largest diagonal term to keep the square root well away from zero
        if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Quaternion {
                w: s / 4.0,
                x: (m[2][1] - m[1][2]) / s,
                y: (m[0][2] - m[2][0]) / s,
                z: (m[1][0] - m[0][1]) / s,
            }
        } else if m[0][0] >= m[1][1] && m[0][0] >= m[2][2] {
            let s = (1.0 + m[0][0] - m[1][1] - m[2][2]).sqrt() * 2.0;
            Quaternion {
                w: (m[2][1] - m[1][2]) / s,
                x: s / 4.0,
                y: (m[0][1] + m[1][0]) / s,
                z: (m[0][2] + m[2][0]) / s,
            }
        } else if m[1][1] >= m[2][2] {
            let s = (1.0 + m[1][1] - m[0][0] - m[2][2]).sqrt() * 2.0;
            Quaternion {
                w: (m[0][2] - m[2][0]) / s,
                x: (m[0][1] + m[1][0]) / s,
                y: s / 4.0,
                z: (m[1][2] + m[2][1]) / s,
            }
        } else {
            let s = (1.0 + m[2][2] - m[0][0] - m[1][1]).sqrt() * 2.0;
            Quaternion {
                w: (m[1][0] - m[0][1]) / s,
                x: (m[0][2] + m[2][0]) / s,
                y: (m[1][2] + m[2][1]) / s,
                z: s / 4.0,
            }
        }
    }
}

impl Mul for Rotation {
    type Output = Rotation;

    /// `a * b` rotates by `b` first, then by `a`
    fn mul(self, rhs: Rotation) -> Rotation {
        let mut rows = [[0; 3]; 3];

        for (i, row) in rows.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = (0..3).map(|k| self.rows[i][k] * rhs.rows[k][j]).sum();
            }
        }

        Rotation { rows }
    }
}

/// A rotation quaternion used only by presentation code. Cube state never stores these.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// A rotation of `degrees` about the unit axis `axis`, negated if `positive` is false
    #[must_use]
    pub fn from_axis_angle(axis: Axis, positive: bool, degrees: f32) -> Quaternion {
        let half = (if positive { degrees } else { -degrees }).to_radians() / 2.0;
        let (sin, cos) = half.sin_cos();

        let mut q = Quaternion {
            w: cos,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        };

        match axis {
            Axis::X => q.x = sin,
            Axis::Y => q.y = sin,
            Axis::Z => q.z = sin,
        }

        q
    }

    /// Whether both quaternions describe the same rotation up to `epsilon`. `q` and `-q` are the same rotation.
    #[must_use]
    pub fn approx_eq(&self, other: &Quaternion, epsilon: f32) -> bool {
        let dot = self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z;
        1.0 - dot.abs() <= epsilon
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, r: Quaternion) -> Quaternion {
        Quaternion {
            w: self.w * r.w - self.x * r.x - self.y * r.y - self.z * r.z,
            x: self.w * r.x + self.x * r.w + self.y * r.z - self.z * r.y,
            y: self.w * r.y - self.x * r.z + self.y * r.w + self.z * r.x,
            z: self.w * r.z + self.x * r.y - self.y * r.x + self.z * r.w,
        }
    }
}
