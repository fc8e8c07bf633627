//! Output markers
//!
//! A marker declares one value the native writes back. `Ret<K>` is the
//! primary return value, `Out<K>` a pointer out-parameter; `K` is one of the
//! zero-sized kinds in [`kind`]. A call's output set is `()`, a single
//! marker, or a tuple of markers, and its decoded type is a tuple of the
//! markers' value types in the same order:
//!
//! ```ignore
//! let (lights, high_beams, on): (i32, i32, bool) = invoker
//!     .invoke(GET_VEHICLE_LIGHTS_STATE)
//!     .arg(vehicle)
//!     .call::<(Out<kind::Int>, Out<kind::Int>, Ret<kind::Bool>)>()?;
//! ```
//!
//! Decoding is strictly positional: the n-th marker consumes the next
//! `width()` raw slots of the result buffer.

use std::fmt;
use std::marker::PhantomData;

use nativecall_shared::Vector3;
use serde_json::Value;
use smallvec::{SmallVec, smallvec};

use crate::error::InvokeError;
use crate::frame::RawSlot;
use crate::id::NativeId;

/// Shape of one declared output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Any,
    Int,
    Float,
    Long,
    String,
    Bool,
    Vector,
    Object,
}

impl SlotKind {
    /// Number of raw result slots this kind occupies.
    pub const fn width(self) -> usize {
        match self {
            SlotKind::Vector => 3,
            _ => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            SlotKind::Any => "any",
            SlotKind::Int => "int",
            SlotKind::Float => "float",
            SlotKind::Long => "long",
            SlotKind::String => "string",
            SlotKind::Bool => "bool",
            SlotKind::Vector => "vector",
            SlotKind::Object => "object",
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether an output is the primary return value or a pointer argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotRole {
    Return,
    Pointer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OutputSlot {
    pub kind: SlotKind,
    pub role: SlotRole,
}

impl OutputSlot {
    pub const fn returned(kind: SlotKind) -> Self {
        Self {
            kind,
            role: SlotRole::Return,
        }
    }

    pub const fn pointer(kind: SlotKind) -> Self {
        Self {
            kind,
            role: SlotRole::Pointer,
        }
    }
}

/// Reads raw slots front to back while decoding one output set.
pub struct SlotCursor<'a> {
    native: NativeId,
    slots: &'a [RawSlot],
    pos: usize,
}

impl<'a> SlotCursor<'a> {
    pub fn new(native: NativeId, slots: &'a [RawSlot]) -> Self {
        Self {
            native,
            slots,
            pos: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn mismatch(
        &self,
        slot: usize,
        expected: SlotKind,
        found: impl Into<String>,
    ) -> InvokeError {
        InvokeError::DecodeMismatch {
            native: self.native,
            slot,
            expected,
            found: found.into(),
        }
    }

    /// Take the next slot, failing if the buffer is exhausted.
    pub fn take(&mut self, expected: SlotKind) -> Result<(usize, &'a RawSlot), InvokeError> {
        let index = self.pos;
        let slot = self
            .slots
            .get(index)
            .ok_or_else(|| self.mismatch(index, expected, "end of results"))?;
        self.pos += 1;
        Ok((index, slot))
    }

    /// Take the next slot as a scalar word.
    pub fn take_word(&mut self, expected: SlotKind) -> Result<u64, InvokeError> {
        match self.take(expected)? {
            (_, RawSlot::Word(word)) => Ok(*word),
            (index, other) => Err(self.mismatch(index, expected, other.describe())),
        }
    }

    /// Fails if the runtime wrote more slots than were declared.
    pub fn finish(self) -> Result<(), InvokeError> {
        if self.pos == self.slots.len() {
            return Ok(());
        }
        Err(InvokeError::DecodeMismatch {
            native: self.native,
            slot: self.pos,
            expected: SlotKind::Any,
            found: format!("{} surplus slot(s)", self.slots.len() - self.pos),
        })
    }
}

/// Value kinds for output markers.
pub mod kind {
    use super::*;

    /// A kind knows its slot shape and how to decode its raw slots.
    pub trait Decode {
        const KIND: SlotKind;
        type Value;

        fn decode(cursor: &mut SlotCursor<'_>) -> Result<Self::Value, InvokeError>;
    }

    /// Untyped: the raw slot as written
    pub struct Any;
    /// 32-bit signed integer
    pub struct Int;
    /// 32-bit float
    pub struct Float;
    /// 64-bit unsigned integer
    pub struct Long;
    /// Text; a null pointer decodes to `None`
    pub struct Str;
    /// Boolean; any non-zero low word is `true`
    pub struct Bool;
    /// Three float slots
    pub struct Vector;
    /// Serialized structured object
    pub struct Object;

    impl Decode for Any {
        const KIND: SlotKind = SlotKind::Any;
        type Value = RawSlot;

        fn decode(cursor: &mut SlotCursor<'_>) -> Result<RawSlot, InvokeError> {
            cursor.take(Self::KIND).map(|(_, slot)| slot.clone())
        }
    }

    impl Decode for Int {
        const KIND: SlotKind = SlotKind::Int;
        type Value = i32;

        fn decode(cursor: &mut SlotCursor<'_>) -> Result<i32, InvokeError> {
            Ok(cursor.take_word(Self::KIND)? as u32 as i32)
        }
    }

    impl Decode for Float {
        const KIND: SlotKind = SlotKind::Float;
        type Value = f32;

        fn decode(cursor: &mut SlotCursor<'_>) -> Result<f32, InvokeError> {
            Ok(f32::from_bits(cursor.take_word(Self::KIND)? as u32))
        }
    }

    impl Decode for Long {
        const KIND: SlotKind = SlotKind::Long;
        type Value = u64;

        fn decode(cursor: &mut SlotCursor<'_>) -> Result<u64, InvokeError> {
            cursor.take_word(Self::KIND)
        }
    }

    impl Decode for Str {
        const KIND: SlotKind = SlotKind::String;
        type Value = Option<String>;

        fn decode(cursor: &mut SlotCursor<'_>) -> Result<Option<String>, InvokeError> {
            match cursor.take(Self::KIND)? {
                (_, RawSlot::Null) => Ok(None),
                (index, RawSlot::Bytes(bytes)) => String::from_utf8(bytes.clone())
                    .map(Some)
                    .map_err(|_| cursor.mismatch(index, Self::KIND, "invalid utf-8")),
                (index, other) => Err(cursor.mismatch(index, Self::KIND, other.describe())),
            }
        }
    }

    impl Decode for Bool {
        const KIND: SlotKind = SlotKind::Bool;
        type Value = bool;

        fn decode(cursor: &mut SlotCursor<'_>) -> Result<bool, InvokeError> {
            Ok(cursor.take_word(Self::KIND)? as u32 != 0)
        }
    }

    impl Decode for Vector {
        const KIND: SlotKind = SlotKind::Vector;
        type Value = Vector3;

        fn decode(cursor: &mut SlotCursor<'_>) -> Result<Vector3, InvokeError> {
            let words = [
                cursor.take_word(Self::KIND)?,
                cursor.take_word(Self::KIND)?,
                cursor.take_word(Self::KIND)?,
            ];
            Ok(crate::vector::make_vector(words))
        }
    }

    impl Decode for Object {
        const KIND: SlotKind = SlotKind::Object;
        type Value = Value;

        fn decode(cursor: &mut SlotCursor<'_>) -> Result<Value, InvokeError> {
            match cursor.take(Self::KIND)? {
                (_, RawSlot::Null) => Ok(Value::Null),
                (index, RawSlot::Bytes(bytes)) => serde_json::from_slice(bytes).map_err(|e| {
                    cursor.mismatch(index, Self::KIND, format!("malformed payload ({e})"))
                }),
                (index, other) => Err(cursor.mismatch(index, Self::KIND, other.describe())),
            }
        }
    }
}

/// One declared output of a call.
pub trait Marker {
    type Output;
    const SLOT: OutputSlot;

    fn decode(cursor: &mut SlotCursor<'_>) -> Result<Self::Output, InvokeError>;
}

/// Primary return value of kind `K`.
pub struct Ret<K>(PhantomData<K>);

/// Pointer out-parameter of kind `K`.
pub struct Out<K>(PhantomData<K>);

impl<K: kind::Decode> Marker for Ret<K> {
    type Output = K::Value;
    const SLOT: OutputSlot = OutputSlot::returned(K::KIND);

    fn decode(cursor: &mut SlotCursor<'_>) -> Result<K::Value, InvokeError> {
        K::decode(cursor)
    }
}

impl<K: kind::Decode> Marker for Out<K> {
    type Output = K::Value;
    const SLOT: OutputSlot = OutputSlot::pointer(K::KIND);

    fn decode(cursor: &mut SlotCursor<'_>) -> Result<K::Value, InvokeError> {
        K::decode(cursor)
    }
}

pub type Return = Ret<kind::Any>;
pub type ReturnInt = Ret<kind::Int>;
pub type ReturnFloat = Ret<kind::Float>;
pub type ReturnLong = Ret<kind::Long>;
pub type ReturnString = Ret<kind::Str>;
pub type ReturnBool = Ret<kind::Bool>;
pub type ReturnVector = Ret<kind::Vector>;
pub type ReturnObject = Ret<kind::Object>;
pub type PointerInt = Out<kind::Int>;
pub type PointerFloat = Out<kind::Float>;
pub type PointerVector = Out<kind::Vector>;

/// The full ordered set of outputs declared for one call.
pub trait OutputSet {
    type Output;

    fn slots() -> SmallVec<[OutputSlot; 4]>;

    fn decode(cursor: &mut SlotCursor<'_>) -> Result<Self::Output, InvokeError>;
}

impl OutputSet for () {
    type Output = ();

    fn slots() -> SmallVec<[OutputSlot; 4]> {
        SmallVec::new()
    }

    fn decode(_: &mut SlotCursor<'_>) -> Result<(), InvokeError> {
        Ok(())
    }
}

impl<K: kind::Decode> OutputSet for Ret<K> {
    type Output = K::Value;

    fn slots() -> SmallVec<[OutputSlot; 4]> {
        smallvec![<Self as Marker>::SLOT]
    }

    fn decode(cursor: &mut SlotCursor<'_>) -> Result<K::Value, InvokeError> {
        <Self as Marker>::decode(cursor)
    }
}

impl<K: kind::Decode> OutputSet for Out<K> {
    type Output = K::Value;

    fn slots() -> SmallVec<[OutputSlot; 4]> {
        smallvec![<Self as Marker>::SLOT]
    }

    fn decode(cursor: &mut SlotCursor<'_>) -> Result<K::Value, InvokeError> {
        <Self as Marker>::decode(cursor)
    }
}

macro_rules! impl_output_tuple {
    ($($m:ident),+) => {
        impl<$($m: Marker),+> OutputSet for ($($m,)+) {
            type Output = ($(<$m as Marker>::Output,)+);

            fn slots() -> SmallVec<[OutputSlot; 4]> {
                smallvec![$(<$m as Marker>::SLOT),+]
            }

            fn decode(cursor: &mut SlotCursor<'_>) -> Result<Self::Output, InvokeError> {
                Ok(($(<$m as Marker>::decode(cursor)?,)+))
            }
        }
    };
}

impl_output_tuple!(A);
impl_output_tuple!(A, B);
impl_output_tuple!(A, B, C);
impl_output_tuple!(A, B, C, D);
impl_output_tuple!(A, B, C, D, E);
impl_output_tuple!(A, B, C, D, E, F);
impl_output_tuple!(A, B, C, D, E, F, G);
impl_output_tuple!(A, B, C, D, E, F, G, H);

/// Decode a whole result buffer against an output set.
///
/// Every declared output must be present and no slot may be left over.
pub fn decode_results<O: OutputSet>(
    native: NativeId,
    slots: &[RawSlot],
) -> Result<O::Output, InvokeError> {
    let mut cursor = SlotCursor::new(native, slots);
    let output = O::decode(&mut cursor)?;
    cursor.finish()?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: NativeId = NativeId::new(0, 0x1647f1cb);

    fn vector_slots(x: f32, y: f32, z: f32) -> Vec<RawSlot> {
        crate::vector::to_slots(crate::vector::from_floats(x, y, z)).to_vec()
    }

    #[test]
    fn test_slot_shapes() {
        let slots = <(Out<kind::Int>, Ret<kind::Vector>)>::slots();
        assert_eq!(
            slots.as_slice(),
            &[
                OutputSlot::pointer(SlotKind::Int),
                OutputSlot::returned(SlotKind::Vector)
            ]
        );
        assert!(<()>::slots().is_empty());
    }

    #[test]
    fn test_decode_scalars() {
        let slots = [
            RawSlot::Word(0xffff_ffff),
            RawSlot::Word(2.5f32.to_bits() as u64),
            RawSlot::Word(u64::MAX),
            RawSlot::Word(0x1_0000_0000),
        ];
        let (int, float, long, flag) =
            decode_results::<(ReturnInt, ReturnFloat, ReturnLong, ReturnBool)>(ID, &slots).unwrap();
        assert_eq!(int, -1);
        assert_eq!(float, 2.5);
        assert_eq!(long, u64::MAX);
        // Only the low 32 bits carry the boolean
        assert!(!flag);
    }

    #[test]
    fn test_decode_vector_then_int() {
        let mut slots = vector_slots(1.0, -2.0, 3.5);
        slots.push(RawSlot::Word(7));
        let (v, n) = decode_results::<(ReturnVector, PointerInt)>(ID, &slots).unwrap();
        assert_eq!(v.to_array(), [1.0, -2.0, 3.5]);
        assert_eq!(n, 7);
    }

    #[test]
    fn test_decode_strings() {
        let slots = [RawSlot::Bytes(b"Niko".to_vec())];
        assert_eq!(
            decode_results::<ReturnString>(ID, &slots).unwrap(),
            Some("Niko".to_string())
        );
        let null = decode_results::<ReturnString>(ID, &[RawSlot::Null]).unwrap();
        assert_eq!(null, None);

        let malformed = [RawSlot::Bytes(vec![0xff, 0xfe])];
        let err = decode_results::<ReturnString>(ID, &malformed).unwrap_err();
        assert!(matches!(err, InvokeError::DecodeMismatch { slot: 0, .. }));
    }

    #[test]
    fn test_decode_object() {
        let slots = [RawSlot::Bytes(br#"[1,2,3]"#.to_vec())];
        let value = decode_results::<ReturnObject>(ID, &slots).unwrap();
        assert_eq!(value, serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn test_shape_mismatch() {
        let err = decode_results::<ReturnString>(ID, &[RawSlot::Word(3)]).unwrap_err();
        match err {
            InvokeError::DecodeMismatch {
                native,
                slot,
                expected,
                found,
            } => {
                assert_eq!(native, ID);
                assert_eq!(slot, 0);
                assert_eq!(expected, SlotKind::String);
                assert_eq!(found, "word");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_short_vector_is_mismatch() {
        let slots = [RawSlot::Word(0), RawSlot::Word(0)];
        let err = decode_results::<ReturnVector>(ID, &slots).unwrap_err();
        assert!(matches!(err, InvokeError::DecodeMismatch { slot: 2, .. }));
    }

    #[test]
    fn test_surplus_slots_are_mismatch() {
        let slots = [RawSlot::Word(1), RawSlot::Word(2)];
        let err = decode_results::<ReturnInt>(ID, &slots).unwrap_err();
        assert!(matches!(err, InvokeError::DecodeMismatch { slot: 1, .. }));
    }

    #[test]
    fn test_any_passes_raw_slot() {
        let slots = [RawSlot::Bytes(vec![1, 2])];
        assert_eq!(
            decode_results::<Return>(ID, &slots).unwrap(),
            RawSlot::Bytes(vec![1, 2])
        );
    }
}
