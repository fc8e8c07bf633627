//! Vector result adapter
//!
//! The runtime writes a vector as three float slots. These helpers convert
//! between that layout and [`Vector3`] without validation: non-finite
//! components pass through unchanged.

use nativecall_shared::{RawVector, Vector3};

use crate::frame::RawSlot;

/// Build a vector from the three raw words the runtime wrote.
pub fn make_vector(words: [u64; 3]) -> Vector3 {
    Vector3::from(RawVector::from_words(words))
}

pub fn from_floats(x: f32, y: f32, z: f32) -> Vector3 {
    Vector3::from(RawVector::new(x, y, z))
}

/// The three result slots a runtime writes for `value`.
pub fn to_slots(value: Vector3) -> [RawSlot; 3] {
    RawVector::from(value).to_words().map(RawSlot::Word)
}
