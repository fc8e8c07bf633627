//! Argument encoding
//!
//! Statically typed arguments go through [`IntoArguments`]. Dynamic values
//! (anything that arrives as `serde_json::Value`) go through the encoder
//! functions in this module, which validate before anything is placed in a
//! frame.

use std::ffi::CString;

use nativecall_shared::Vector3;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::callback::CallbackHandle;
use crate::error::InvokeError;

/// One argument in the form the runtime reads it.
#[derive(Clone, Debug, PartialEq)]
pub enum EncodedArgument {
    Int(i64),
    Bool(bool),
    Float(f32),
    String(CString),
    /// Reference string of a registered callback
    FuncRef(String),
    Bytes(Vec<u8>),
}

impl EncodedArgument {
    pub fn describe(&self) -> &'static str {
        match self {
            EncodedArgument::Int(_) => "int",
            EncodedArgument::Bool(_) => "bool",
            EncodedArgument::Float(_) => "float",
            EncodedArgument::String(_) => "string",
            EncodedArgument::FuncRef(_) => "funcref",
            EncodedArgument::Bytes(_) => "bytes",
        }
    }
}

/// A value that expands into one or more encoded arguments.
pub trait IntoArguments {
    fn encode_into(self, out: &mut Vec<EncodedArgument>) -> Result<(), InvokeError>;
}

macro_rules! impl_int_argument {
    ($($ty:ty),+) => {
        $(
            impl IntoArguments for $ty {
                fn encode_into(self, out: &mut Vec<EncodedArgument>) -> Result<(), InvokeError> {
                    out.push(EncodedArgument::Int(i64::from(self)));
                    Ok(())
                }
            }
        )+
    };
}

impl_int_argument!(i8, i16, i32, i64, u8, u16, u32);

impl IntoArguments for u64 {
    fn encode_into(self, out: &mut Vec<EncodedArgument>) -> Result<(), InvokeError> {
        // Same 8-byte word, reinterpreted
        out.push(EncodedArgument::Int(self as i64));
        Ok(())
    }
}

impl IntoArguments for bool {
    fn encode_into(self, out: &mut Vec<EncodedArgument>) -> Result<(), InvokeError> {
        out.push(EncodedArgument::Bool(self));
        Ok(())
    }
}

impl IntoArguments for f32 {
    fn encode_into(self, out: &mut Vec<EncodedArgument>) -> Result<(), InvokeError> {
        out.push(EncodedArgument::Float(self));
        Ok(())
    }
}

impl IntoArguments for f64 {
    fn encode_into(self, out: &mut Vec<EncodedArgument>) -> Result<(), InvokeError> {
        out.push(EncodedArgument::Float(to_f32(self)?));
        Ok(())
    }
}

impl IntoArguments for &str {
    fn encode_into(self, out: &mut Vec<EncodedArgument>) -> Result<(), InvokeError> {
        out.push(text(self)?);
        Ok(())
    }
}

impl IntoArguments for &String {
    fn encode_into(self, out: &mut Vec<EncodedArgument>) -> Result<(), InvokeError> {
        self.as_str().encode_into(out)
    }
}

impl IntoArguments for String {
    fn encode_into(self, out: &mut Vec<EncodedArgument>) -> Result<(), InvokeError> {
        let text = CString::new(self)
            .map_err(|_| InvokeError::invalid("string argument contains a NUL byte"))?;
        out.push(EncodedArgument::String(text));
        Ok(())
    }
}

impl IntoArguments for Vector3 {
    fn encode_into(self, out: &mut Vec<EncodedArgument>) -> Result<(), InvokeError> {
        for component in self.to_array() {
            out.push(EncodedArgument::Float(to_f32(component)?));
        }
        Ok(())
    }
}

impl IntoArguments for &Vector3 {
    fn encode_into(self, out: &mut Vec<EncodedArgument>) -> Result<(), InvokeError> {
        (*self).encode_into(out)
    }
}

impl IntoArguments for &CallbackHandle {
    fn encode_into(self, out: &mut Vec<EncodedArgument>) -> Result<(), InvokeError> {
        out.push(EncodedArgument::FuncRef(self.reference().to_string()));
        Ok(())
    }
}

impl IntoArguments for EncodedArgument {
    fn encode_into(self, out: &mut Vec<EncodedArgument>) -> Result<(), InvokeError> {
        out.push(self);
        Ok(())
    }
}

impl IntoArguments for StructuredObject {
    fn encode_into(self, out: &mut Vec<EncodedArgument>) -> Result<(), InvokeError> {
        (&self).encode_into(out)
    }
}

impl IntoArguments for &StructuredObject {
    fn encode_into(self, out: &mut Vec<EncodedArgument>) -> Result<(), InvokeError> {
        let payload = self.to_payload()?;
        let len = payload.len() as i64;
        out.push(EncodedArgument::Bytes(payload));
        out.push(EncodedArgument::Int(len));
        Ok(())
    }
}

/// Lets an encoder's result be passed straight to `arg`; the error is
/// reported by the call.
impl<T: IntoArguments> IntoArguments for Result<T, InvokeError> {
    fn encode_into(self, out: &mut Vec<EncodedArgument>) -> Result<(), InvokeError> {
        self?.encode_into(out)
    }
}

/// Key/value argument serialized as one payload plus its byte length.
///
/// Fields keep insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StructuredObject {
    fields: Map<String, Value>,
}

impl StructuredObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_payload(&self) -> Result<Vec<u8>, InvokeError> {
        serde_json::to_vec(&self.fields).map_err(|e| {
            InvokeError::invalid(format!("structured argument did not serialize: {e}"))
        })
    }
}

impl TryFrom<Value> for StructuredObject {
    type Error = InvokeError;

    fn try_from(value: Value) -> Result<Self, InvokeError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(InvokeError::invalid(format!(
                "structured argument must be a map, got {}",
                json_type(&other)
            ))),
        }
    }
}

// ============================================================================
// Dynamic encoders
// ============================================================================

/// Encode a text argument. Only JSON strings are accepted.
pub fn string(value: &Value) -> Result<EncodedArgument, InvokeError> {
    match value {
        Value::String(s) => text(s),
        other => Err(InvokeError::invalid(format!("expected string, got {}", json_type(other)))),
    }
}

/// Encode a float argument from a number or a numeric string.
pub fn float(value: &Value) -> Result<EncodedArgument, InvokeError> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| InvokeError::invalid(format!("expected number, got {}", json_type(value))))?;
    Ok(EncodedArgument::Float(to_f32(number)?))
}

/// Encode an integer argument from a number or a numeric string.
///
/// Integral floats such as `7.0` are accepted; fractional, non-finite or
/// out-of-range values are rejected.
pub fn integer(value: &Value) -> Result<EncodedArgument, InvokeError> {
    let number = match value {
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => return Ok(EncodedArgument::Int(i)),
            (None, Some(u), _) => {
                return Err(InvokeError::invalid(format!("integer {u} is out of range")));
            }
            (None, None, f) => f,
        },
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(i) = trimmed.parse::<i64>() {
                return Ok(EncodedArgument::Int(i));
            }
            trimmed.parse::<f64>().ok()
        }
        _ => None,
    }
    .ok_or_else(|| InvokeError::invalid(format!("expected integer, got {}", json_type(value))))?;

    whole_number(number).map(EncodedArgument::Int)
}

fn whole_number(number: f64) -> Result<i64, InvokeError> {
    if !number.is_finite() || number.fract() != 0.0 {
        return Err(InvokeError::invalid(format!("expected integer, got {number}")));
    }
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if number < i64::MIN as f64 || number >= i64::MAX as f64 {
        return Err(InvokeError::invalid(format!("integer {number} is out of range")));
    }
    Ok(number as i64)
}

pub fn boolean(value: &Value) -> Result<EncodedArgument, InvokeError> {
    match value {
        Value::Bool(b) => Ok(EncodedArgument::Bool(*b)),
        other => Err(InvokeError::invalid(format!("expected bool, got {}", json_type(other)))),
    }
}

/// Decode a vector argument from any accepted vector shape.
pub fn vector(value: &Value) -> Result<Vector3, InvokeError> {
    Ok(Vector3::try_from(value)?)
}

/// Encode a name as its runtime hash.
pub fn hash(name: &str) -> EncodedArgument {
    EncodedArgument::Int(i64::from(joaat(name)))
}

/// Serialize any value whose serde form is a map into a structured argument.
pub fn object<T: Serialize + ?Sized>(value: &T) -> Result<StructuredObject, InvokeError> {
    let value = serde_json::to_value(value)
        .map_err(|e| InvokeError::invalid(format!("structured argument did not serialize: {e}")))?;
    StructuredObject::try_from(value)
}

/// Jenkins one-at-a-time hash over the ASCII-lowercased name.
pub fn joaat(name: &str) -> u32 {
    let mut hash: u32 = 0;
    for byte in name.bytes() {
        hash = hash.wrapping_add(u32::from(byte.to_ascii_lowercase()));
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash.wrapping_add(hash << 15)
}

fn text(s: &str) -> Result<EncodedArgument, InvokeError> {
    CString::new(s)
        .map(EncodedArgument::String)
        .map_err(|_| InvokeError::invalid("string argument contains a NUL byte"))
}

fn to_f32(value: f64) -> Result<f32, InvokeError> {
    if !value.is_finite() || value.abs() > f64::from(f32::MAX) {
        return Err(InvokeError::invalid(format!(
            "{value} is not representable as a float argument"
        )));
    }
    Ok(value as f32)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
