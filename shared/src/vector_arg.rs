//! Polymorphic vector arguments
//!
//! Every [`Vector3`] constructor and arithmetic operation accepts the same
//! closed set of input shapes. Callers convert into [`VectorArg`] once at the
//! boundary (via `From`/`TryFrom`) and the operation resolves it to three
//! components.

use serde_json::Value;

use crate::Vector3;
use crate::error::VectorError;

/// One of the accepted vector input shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VectorArg {
    /// A single number broadcast to all three components
    Scalar(f64),
    /// An ordered `[x, y, z]` sequence
    Triple([f64; 3]),
    /// Any structure exposing `x`, `y` and `z`
    VectorLike { x: f64, y: f64, z: f64 },
}

impl VectorArg {
    /// Resolve to `[x, y, z]`, broadcasting scalars.
    ///
    /// Fails with [`VectorError::InvalidArgument`] if any component is not a
    /// finite number.
    pub fn components(self) -> Result<[f64; 3], VectorError> {
        let xyz = match self {
            VectorArg::Scalar(v) => [v, v, v],
            VectorArg::Triple(xyz) => xyz,
            VectorArg::VectorLike { x, y, z } => [x, y, z],
        };
        ensure_finite(xyz)
    }

    /// Resolve to `[x, y, z]`, accepting only shapes with named components.
    ///
    /// Distance, angle, range and interpolation operations are defined
    /// against another point, not a broadcast scalar or bare sequence.
    pub fn vector_like(self) -> Result<[f64; 3], VectorError> {
        match self {
            VectorArg::VectorLike { x, y, z } => ensure_finite([x, y, z]),
            _ => Err(VectorError::invalid("expected a value with x, y and z")),
        }
    }
}

fn ensure_finite(xyz: [f64; 3]) -> Result<[f64; 3], VectorError> {
    if xyz.iter().all(|c| c.is_finite()) {
        Ok(xyz)
    } else {
        Err(VectorError::invalid("all components must be finite numbers"))
    }
}

impl From<f64> for VectorArg {
    fn from(value: f64) -> Self {
        VectorArg::Scalar(value)
    }
}

impl From<f32> for VectorArg {
    fn from(value: f32) -> Self {
        VectorArg::Scalar(value as f64)
    }
}

impl From<i32> for VectorArg {
    fn from(value: i32) -> Self {
        VectorArg::Scalar(value as f64)
    }
}

impl From<[f64; 3]> for VectorArg {
    fn from(xyz: [f64; 3]) -> Self {
        VectorArg::Triple(xyz)
    }
}

impl From<[f32; 3]> for VectorArg {
    fn from([x, y, z]: [f32; 3]) -> Self {
        VectorArg::Triple([x as f64, y as f64, z as f64])
    }
}

impl From<(f64, f64, f64)> for VectorArg {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        VectorArg::Triple([x, y, z])
    }
}

impl From<Vector3> for VectorArg {
    fn from(v: Vector3) -> Self {
        VectorArg::VectorLike {
            x: v.x(),
            y: v.y(),
            z: v.z(),
        }
    }
}

impl From<&Vector3> for VectorArg {
    fn from(v: &Vector3) -> Self {
        VectorArg::from(*v)
    }
}

impl From<glam::Vec3> for VectorArg {
    fn from(v: glam::Vec3) -> Self {
        VectorArg::VectorLike {
            x: v.x as f64,
            y: v.y as f64,
            z: v.z as f64,
        }
    }
}

impl From<glam::DVec3> for VectorArg {
    fn from(v: glam::DVec3) -> Self {
        VectorArg::VectorLike {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl TryFrom<&Value> for VectorArg {
    type Error = VectorError;

    /// Dynamic interchange shape: a number or numeric string, an array of
    /// three numbers, or an object with numeric `x`/`y`/`z` members.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(_) | Value::String(_) => {
                coerce_number(value).map(VectorArg::Scalar)
            }
            Value::Array(items) => {
                let [x, y, z] = items.as_slice() else {
                    return Err(VectorError::invalid("expected an array of 3 numbers"));
                };
                Ok(VectorArg::Triple([
                    coerce_number(x)?,
                    coerce_number(y)?,
                    coerce_number(z)?,
                ]))
            }
            Value::Object(fields) => {
                let field = |name: &str| {
                    fields
                        .get(name)
                        .ok_or_else(|| {
                            VectorError::invalid(format!("expected an object with {name} property"))
                        })
                        .and_then(coerce_number)
                };
                Ok(VectorArg::VectorLike {
                    x: field("x")?,
                    y: field("y")?,
                    z: field("z")?,
                })
            }
            _ => Err(VectorError::invalid(
                "argument must be a number, an array of 3 numbers or a vector",
            )),
        }
    }
}

impl TryFrom<Value> for VectorArg {
    type Error = VectorError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        VectorArg::try_from(&value)
    }
}

/// Coerce a JSON number or numeric string to `f64`.
pub(crate) fn coerce_number(value: &Value) -> Result<f64, VectorError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| VectorError::invalid("number is not representable as f64")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| VectorError::invalid(format!("'{s}' is not a number"))),
        other => Err(VectorError::invalid(format!("expected a number, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_broadcasts() {
        assert_eq!(VectorArg::from(5.0).components().unwrap(), [5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_json_shapes() {
        let scalar = VectorArg::try_from(&json!(2)).unwrap();
        assert_eq!(scalar, VectorArg::Scalar(2.0));

        let numeric_string = VectorArg::try_from(&json!(" 2.5 ")).unwrap();
        assert_eq!(numeric_string, VectorArg::Scalar(2.5));

        let triple = VectorArg::try_from(&json!([1, "2", 3.5])).unwrap();
        assert_eq!(triple, VectorArg::Triple([1.0, 2.0, 3.5]));

        let object = VectorArg::try_from(&json!({"x": 1, "y": 2, "z": 3})).unwrap();
        assert_eq!(
            object,
            VectorArg::VectorLike {
                x: 1.0,
                y: 2.0,
                z: 3.0
            }
        );
    }

    #[test]
    fn test_json_rejects_bad_shapes() {
        assert!(VectorArg::try_from(&json!(null)).is_err());
        assert!(VectorArg::try_from(&json!(true)).is_err());
        assert!(VectorArg::try_from(&json!([1, 2])).is_err());
        assert!(VectorArg::try_from(&json!([1, 2, "three"])).is_err());
        assert!(VectorArg::try_from(&json!({"x": 1, "y": 2})).is_err());
        assert!(VectorArg::try_from(&json!("abc")).is_err());
    }

    #[test]
    fn test_non_finite_components_rejected() {
        assert!(VectorArg::from(f64::NAN).components().is_err());
        let triple = VectorArg::Triple([1.0, f64::INFINITY, 0.0]);
        assert!(triple.components().is_err());
    }

    #[test]
    fn test_vector_like_rejects_scalar_and_triple() {
        assert!(VectorArg::from(1.0).vector_like().is_err());
        assert!(VectorArg::from([1.0, 2.0, 3.0]).vector_like().is_err());
        let vector = VectorArg::from(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(vector.vector_like().unwrap(), [1.0, 2.0, 3.0]);
    }
}
