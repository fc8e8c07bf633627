//! Math types for nativecall
//!
//! [`Vector3`] is the one rich value type that crosses the native boundary in
//! both directions. It is immutable: every operation returns a new value.
//!
//! Operations that accept "another vector" take `impl Into<VectorArg>`, so a
//! scalar, a `[x, y, z]` triple or any vector-like value can be passed. The
//! polymorphic operations are fallible; the `std::ops` operators are the
//! infallible typed path.

use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::VectorError;
use crate::vector_arg::VectorArg;


/// Largest precision accepted by [`Vector3::to_fixed`].
pub const MAX_FIXED_PRECISION: u32 = 100;

/// Immutable three-component vector.
///
/// Serializes as `{x, y, z}`; deserializes from any accepted input shape
/// with the same validation as [`Vector3::from_arg`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct Vector3 {
    x: f64,
    y: f64,
    z: f64,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const FORWARD: Self = Self::new(0.0, 1.0, 0.0);
    pub const BACK: Self = Self::new(0.0, -1.0, 0.0);
    pub const UP: Self = Self::new(0.0, 0.0, 1.0);
    pub const DOWN: Self = Self::new(0.0, 0.0, -1.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    pub const NEGATIVE_INFINITY: Self =
        Self::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
    pub const POSITIVE_INFINITY: Self = Self::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);

    /// Build from raw components without validation.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Build from three components, rejecting non-finite values.
    pub fn try_new(x: f64, y: f64, z: f64) -> Result<Self, VectorError> {
        Self::from_arg(VectorArg::Triple([x, y, z]))
    }

    /// Build from any accepted input shape.
    ///
    /// ```ignore
    /// Vector3::from_arg(5.0)?;                     // (5, 5, 5)
    /// Vector3::from_arg([1.0, 2.0, 3.0])?;         // (1, 2, 3)
    /// Vector3::from_arg(&json!({"x": 1, "y": 2, "z": 3}).try_into()?)?;
    /// ```
    pub fn from_arg(arg: impl Into<VectorArg>) -> Result<Self, VectorError> {
        let [x, y, z] = arg.into().components()?;
        Ok(Self::new(x, y, z))
    }

    pub const fn x(self) -> f64 {
        self.x
    }

    pub const fn y(self) -> f64 {
        self.y
    }

    pub const fn z(self) -> f64 {
        self.z
    }

    /// Euclidean norm
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Copy with each component rounded to `precision` decimal places.
    ///
    /// `precision` is limited to [`MAX_FIXED_PRECISION`].
    pub fn to_fixed(self, precision: u32) -> Result<Vector3, VectorError> {
        if precision > MAX_FIXED_PRECISION {
            return Err(VectorError::invalid(format!(
                "precision {precision} is outside 0..={MAX_FIXED_PRECISION}"
            )));
        }
        let round = |c: f64| -> f64 {
            // Formatting matches decimal rounding of the displayed value.
            format!("{:.*}", precision as usize, c).parse().unwrap_or(c)
        };
        Ok(Self::new(round(self.x), round(self.y), round(self.z)))
    }

    // The polymorphic forms are fallible; the `std::ops` impls below cover
    // plain `Vector3` and `f64` operands.
    #[allow(clippy::should_implement_trait)]

    pub fn add(self, other: impl Into<VectorArg>) -> Result<Vector3, VectorError> {
        let [x, y, z] = other.into().components()?;
        Ok(Self::new(self.x + x, self.y + y, self.z + z))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn sub(self, other: impl Into<VectorArg>) -> Result<Vector3, VectorError> {
        let [x, y, z] = other.into().components()?;
        Ok(Self::new(self.x - x, self.y - y, self.z - z))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn mul(self, other: impl Into<VectorArg>) -> Result<Vector3, VectorError> {
        let [x, y, z] = other.into().components()?;
        Ok(Self::new(self.x * x, self.y * y, self.z * z))
    }

    /// Component-wise division. Dividing by a zero component yields an
    /// infinite (or NaN) component, not an error.
    #[allow(clippy::should_implement_trait)]
    pub fn div(self, other: impl Into<VectorArg>) -> Result<Vector3, VectorError> {
        let [x, y, z] = other.into().components()?;
        Ok(Self::new(self.x / x, self.y / y, self.z / z))
    }

    pub fn dot(self, other: impl Into<VectorArg>) -> Result<f64, VectorError> {
        let [x, y, z] = other.into().components()?;
        Ok(self.x * x + self.y * y + self.z * z)
    }

    pub fn cross(self, other: impl Into<VectorArg>) -> Result<Vector3, VectorError> {
        let [x, y, z] = other.into().components()?;
        Ok(Self::new(
            self.y * z - self.z * y,
            self.z * x - self.x * z,
            self.x * y - self.y * x,
        ))
    }

    pub fn negative(self) -> Vector3 {
        Self::new(-self.x, -self.y, -self.z)
    }

    /// Component-wise reciprocal; `1 / 0` is infinity.
    pub fn inverse(self) -> Vector3 {
        Self::new(1.0 / self.x, 1.0 / self.y, 1.0 / self.z)
    }

    /// Unit-length copy.
    ///
    /// A component that is exactly zero stays exactly zero instead of going
    /// through the division. Only non-zero components are divided by the
    /// length, so a vector whose length underflows to zero still produces
    /// infinite components on its non-zero axes.
    pub fn normalize(self) -> Vector3 {
        let length = self.length();
        let scale = |c: f64| if c == 0.0 { 0.0 } else { c / length };
        Self::new(scale(self.x), scale(self.y), scale(self.z))
    }

    pub fn distance_to(self, other: impl Into<VectorArg>) -> Result<f64, VectorError> {
        Ok(self.distance_to_squared(other)?.sqrt())
    }

    pub fn distance_to_squared(self, other: impl Into<VectorArg>) -> Result<f64, VectorError> {
        let [x, y, z] = other.into().vector_like()?;
        let (dx, dy, dz) = (self.x - x, self.y - y, self.z - z);
        Ok(dx * dx + dy * dy + dz * dz)
    }

    /// Angle in radians between `self` and `other`.
    pub fn angle_to(self, other: impl Into<VectorArg>) -> Result<f64, VectorError> {
        let [x, y, z] = other.into().vector_like()?;
        let len_a = self.x.hypot(self.y).hypot(self.z);
        let len_b = x.hypot(y).hypot(z);
        if len_a == 0.0 || len_b == 0.0 {
            return Err(VectorError::DegenerateInput(
                "cannot calculate angle between zero length vectors",
            ));
        }

        let squares = (self.x * self.x + self.y * self.y + self.z * self.z)
            * (x * x + y * y + z * z);
        let cos = if squares.is_normal() {
            (self.x * x + self.y * y + self.z * z) / squares.sqrt()
        } else {
            // Squared lengths under- or overflowed; compare unit vectors instead.
            (self.x / len_a) * (x / len_b)
                + (self.y / len_a) * (y / len_b)
                + (self.z / len_a) * (z / len_b)
        };
        // Rounding can push |cos| a hair past 1 for parallel vectors.
        Ok(cos.clamp(-1.0, 1.0).acos())
    }

    pub fn angle_to_degrees(self, other: impl Into<VectorArg>) -> Result<f64, VectorError> {
        Ok(self.angle_to(other)? * 180.0 / PI)
    }

    pub fn to_degrees(self) -> Vector3 {
        Self::new(
            self.x * 180.0 / PI,
            self.y * 180.0 / PI,
            self.z * 180.0 / PI,
        )
    }

    pub fn to_radians(self) -> Vector3 {
        Self::new(
            self.x * PI / 180.0,
            self.y * PI / 180.0,
            self.z * PI / 180.0,
        )
    }

    /// Whether `other` lies within `range` of `self`.
    ///
    /// Checks the per-axis bound first, then the Euclidean bound; both must
    /// hold.
    pub fn is_in_range(self, other: impl Into<VectorArg>, range: f64) -> Result<bool, VectorError> {
        let [x, y, z] = other.into().vector_like()?;
        let (dx, dy, dz) = (self.x - x, self.y - y, self.z - z);

        Ok(dx.abs() <= range
            && dy.abs() <= range
            && dz.abs() <= range
            && dx * dx + dy * dy + dz * dz <= range * range)
    }

    /// Linear interpolation towards `other`. `t` is not clamped.
    pub fn lerp(self, other: impl Into<VectorArg>, t: f64) -> Result<Vector3, VectorError> {
        let [x, y, z] = other.into().vector_like()?;
        Ok(Self::new(
            self.x + (x - self.x) * t,
            self.y + (y - self.y) * t,
            self.z + (z - self.z) * t,
        ))
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vector3{{ x: {:.4}, y: {:.4}, z: {:.4} }}",
            self.x, self.y, self.z
        )
    }
}

impl TryFrom<&serde_json::Value> for Vector3 {
    type Error = VectorError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        Self::from_arg(VectorArg::try_from(value)?)
    }
}

impl TryFrom<serde_json::Value> for Vector3 {
    type Error = VectorError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

impl TryFrom<[f64; 3]> for Vector3 {
    type Error = VectorError;

    fn try_from(xyz: [f64; 3]) -> Result<Self, Self::Error> {
        Self::from_arg(xyz)
    }
}

impl From<Vector3> for [f64; 3] {
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}

impl From<glam::Vec3> for Vector3 {
    fn from(v: glam::Vec3) -> Self {
        Self::new(v.x as f64, v.y as f64, v.z as f64)
    }
}

impl From<Vector3> for glam::Vec3 {
    fn from(v: Vector3) -> Self {
        glam::Vec3::new(v.x as f32, v.y as f32, v.z as f32)
    }
}

impl From<glam::DVec3> for Vector3 {
    fn from(v: glam::DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for glam::DVec3 {
    fn from(v: Vector3) -> Self {
        glam::DVec3::new(v.x, v.y, v.z)
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Div<f64> for Vector3 {
    type Output = Vector3;

    fn div(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Div for Vector3 {
    type Output = Vector3;

    fn div(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        self.negative()
    }
}

/// Native in-memory layout of a vector result (POD type)
///
/// The runtime writes vectors as three 32-bit floats, each padded to an
/// 8-byte result slot. Memory layout (24 bytes):
/// - x, pad
/// - y, pad
/// - z, pad
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct RawVector {
    pub x: f32,
    _pad_x: u32,
    pub y: f32,
    _pad_y: u32,
    pub z: f32,
    _pad_z: u32,
}

impl RawVector {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            _pad_x: 0,
            y,
            _pad_y: 0,
            z,
            _pad_z: 0,
        }
    }

    /// Reinterpret three consecutive result words.
    pub fn from_words(words: [u64; 3]) -> Self {
        bytemuck::cast(words)
    }

    /// The three result words this vector occupies.
    pub fn to_words(self) -> [u64; 3] {
        bytemuck::cast(self)
    }
}

impl From<RawVector> for Vector3 {
    fn from(raw: RawVector) -> Self {
        Vector3::new(raw.x as f64, raw.y as f64, raw.z as f64)
    }
}

impl From<Vector3> for RawVector {
    fn from(v: Vector3) -> Self {
        RawVector::new(v.x as f32, v.y as f32, v.z as f32)
    }
}
