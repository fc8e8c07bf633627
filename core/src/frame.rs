//! Call frames and result buffers
//!
//! A [`CallFrame`] is what crosses the boundary: the native id plus one
//! ordered sequence of encoded arguments and output slots. A
//! [`ResultBuffer`] is what comes back: one raw slot per output slot width,
//! in the same order.

use smallvec::SmallVec;

use crate::encode::EncodedArgument;
use crate::id::NativeId;
use crate::marker::OutputSlot;

/// Initial value of an in/out pointer slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InitialValue {
    Int(i32),
    Float(f32),
}

/// One position in a call frame.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameEntry {
    Argument(EncodedArgument),
    Output {
        slot: OutputSlot,
        initial: Option<InitialValue>,
    },
}

/// Everything the runtime receives for one invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct CallFrame {
    native: NativeId,
    entries: SmallVec<[FrameEntry; 8]>,
}

impl CallFrame {
    pub fn new(native: NativeId) -> Self {
        Self {
            native,
            entries: SmallVec::new(),
        }
    }

    pub fn native(&self) -> NativeId {
        self.native
    }

    pub fn entries(&self) -> &[FrameEntry] {
        &self.entries
    }

    pub(crate) fn push_argument(&mut self, argument: EncodedArgument) {
        self.entries.push(FrameEntry::Argument(argument));
    }

    pub(crate) fn push_output(&mut self, slot: OutputSlot, initial: Option<InitialValue>) {
        self.entries.push(FrameEntry::Output { slot, initial });
    }

    /// Encoded arguments in frame order, skipping output slots.
    pub fn arguments(&self) -> impl Iterator<Item = &EncodedArgument> {
        self.entries.iter().filter_map(|entry| match entry {
            FrameEntry::Argument(argument) => Some(argument),
            FrameEntry::Output { .. } => None,
        })
    }

    /// Output slots in frame order with their initial values.
    pub fn outputs(&self) -> impl Iterator<Item = (OutputSlot, Option<InitialValue>)> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            FrameEntry::Argument(_) => None,
            FrameEntry::Output { slot, initial } => Some((*slot, *initial)),
        })
    }

    pub fn argument_count(&self) -> usize {
        self.arguments().count()
    }

    /// Number of raw result slots the declared outputs occupy.
    pub fn result_width(&self) -> usize {
        self.outputs().map(|(slot, _)| slot.kind.width()).sum()
    }
}

/// One raw value written by the runtime.
#[derive(Clone, Debug, PartialEq)]
pub enum RawSlot {
    /// Null pointer / absent value
    Null,
    /// 8-byte scalar word
    Word(u64),
    /// Byte payload (text, serialized object)
    Bytes(Vec<u8>),
}

impl RawSlot {
    pub fn describe(&self) -> &'static str {
        match self {
            RawSlot::Null => "null",
            RawSlot::Word(_) => "word",
            RawSlot::Bytes(_) => "bytes",
        }
    }
}

/// Raw values produced by one invocation, in output-slot order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultBuffer {
    slots: Vec<RawSlot>,
}

impl ResultBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, slot: RawSlot) {
        self.slots.push(slot);
    }

    pub fn slots(&self) -> &[RawSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl From<Vec<RawSlot>> for ResultBuffer {
    fn from(slots: Vec<RawSlot>) -> Self {
        Self { slots }
    }
}

impl FromIterator<RawSlot> for ResultBuffer {
    fn from_iter<T: IntoIterator<Item = RawSlot>>(iter: T) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}
