//! The native call boundary
//!
//! [`NativeHost`] is the one seam between the invoker and the runtime that
//! owns the natives. [`NativeTable`] is an in-process host: handlers are
//! registered per [`NativeId`] and read their arguments from, and write
//! their results to, a [`NativeContext`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use hashbrown::HashMap;
use nativecall_shared::Vector3;
use serde::Serialize;

use crate::encode::EncodedArgument;
use crate::error::BoundaryError;
use crate::frame::{CallFrame, InitialValue, RawSlot, ResultBuffer};
use crate::id::NativeId;
use crate::marker::OutputSlot;

/// Executes one native call.
///
/// Receives the identifier and the full ordered frame and returns the raw
/// result slots. Implementations must be callable from any thread.
pub trait NativeHost: Send + Sync {
    fn invoke(&self, frame: &CallFrame) -> Result<ResultBuffer, BoundaryError>;
}

impl<H: NativeHost + ?Sized> NativeHost for Arc<H> {
    fn invoke(&self, frame: &CallFrame) -> Result<ResultBuffer, BoundaryError> {
        (**self).invoke(frame)
    }
}

/// Handler for one native in a [`NativeTable`].
pub type NativeFn = dyn Fn(&mut NativeContext<'_>) -> Result<(), BoundaryError> + Send + Sync;

/// In-process native host.
#[derive(Default)]
pub struct NativeTable {
    natives: HashMap<NativeId, Arc<NativeFn>>,
    calls: AtomicU64,
}

impl NativeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the handler for `id`.
    pub fn define<F>(&mut self, id: NativeId, handler: F) -> &mut Self
    where
        F: Fn(&mut NativeContext<'_>) -> Result<(), BoundaryError> + Send + Sync + 'static,
    {
        self.natives.insert(id, Arc::new(handler));
        self
    }

    pub fn contains(&self, id: NativeId) -> bool {
        self.natives.contains_key(&id)
    }

    /// Number of boundary crossings so far, including failed ones.
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

impl NativeHost for NativeTable {
    fn invoke(&self, frame: &CallFrame) -> Result<ResultBuffer, BoundaryError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let handler = self
            .natives
            .get(&frame.native())
            .ok_or(BoundaryError::UnknownNative(frame.native()))?;

        let mut ctx = NativeContext::new(frame);
        handler(&mut ctx)?;
        Ok(ctx.results)
    }
}

impl std::fmt::Debug for NativeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeTable")
            .field("natives", &self.natives.len())
            .field("calls", &self.call_count())
            .finish()
    }
}

/// A handler's view of one call.
pub struct NativeContext<'a> {
    frame: &'a CallFrame,
    args: Vec<&'a EncodedArgument>,
    results: ResultBuffer,
}

impl<'a> NativeContext<'a> {
    fn new(frame: &'a CallFrame) -> Self {
        Self {
            frame,
            args: frame.arguments().collect(),
            results: ResultBuffer::new(),
        }
    }

    pub fn native(&self) -> NativeId {
        self.frame.native()
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    fn arg(
        &self,
        index: usize,
        expected: &'static str,
    ) -> Result<&'a EncodedArgument, BoundaryError> {
        self.args
            .get(index)
            .copied()
            .ok_or(BoundaryError::BadArgument { index, expected })
    }

    pub fn arg_int(&self, index: usize) -> Result<i64, BoundaryError> {
        match self.arg(index, "int")? {
            EncodedArgument::Int(v) => Ok(*v),
            _ => Err(BoundaryError::BadArgument {
                index,
                expected: "int",
            }),
        }
    }

    pub fn arg_float(&self, index: usize) -> Result<f32, BoundaryError> {
        match self.arg(index, "float")? {
            EncodedArgument::Float(v) => Ok(*v),
            _ => Err(BoundaryError::BadArgument {
                index,
                expected: "float",
            }),
        }
    }

    pub fn arg_bool(&self, index: usize) -> Result<bool, BoundaryError> {
        match self.arg(index, "bool")? {
            EncodedArgument::Bool(v) => Ok(*v),
            _ => Err(BoundaryError::BadArgument {
                index,
                expected: "bool",
            }),
        }
    }

    pub fn arg_str(&self, index: usize) -> Result<&'a str, BoundaryError> {
        match self.arg(index, "string")? {
            EncodedArgument::String(s) => s
                .to_str()
                .map_err(|_| BoundaryError::BadArgument {
                    index,
                    expected: "utf-8 string",
                }),
            _ => Err(BoundaryError::BadArgument {
                index,
                expected: "string",
            }),
        }
    }

    pub fn arg_func_ref(&self, index: usize) -> Result<&'a str, BoundaryError> {
        match self.arg(index, "funcref")? {
            EncodedArgument::FuncRef(r) => Ok(r),
            _ => Err(BoundaryError::BadArgument {
                index,
                expected: "funcref",
            }),
        }
    }

    pub fn arg_bytes(&self, index: usize) -> Result<&'a [u8], BoundaryError> {
        match self.arg(index, "bytes")? {
            EncodedArgument::Bytes(b) => Ok(b),
            _ => Err(BoundaryError::BadArgument {
                index,
                expected: "bytes",
            }),
        }
    }

    /// Three consecutive float arguments starting at `index`.
    pub fn arg_vector(&self, index: usize) -> Result<Vector3, BoundaryError> {
        Ok(Vector3::new(
            f64::from(self.arg_float(index)?),
            f64::from(self.arg_float(index + 1)?),
            f64::from(self.arg_float(index + 2)?),
        ))
    }

    /// Declared outputs in frame order.
    pub fn outputs(&self) -> impl Iterator<Item = OutputSlot> + '_ {
        self.frame.outputs().map(|(slot, _)| slot)
    }

    /// Initial value of the n-th declared output, if it was an in/out slot.
    pub fn initial(&self, output: usize) -> Option<InitialValue> {
        self.frame
            .outputs()
            .nth(output)
            .and_then(|(_, initial)| initial)
    }

    pub fn push_raw(&mut self, slot: RawSlot) -> &mut Self {
        self.results.push(slot);
        self
    }

    pub fn push_int(&mut self, value: i32) -> &mut Self {
        self.push_raw(RawSlot::Word(u64::from(value as u32)))
    }

    pub fn push_float(&mut self, value: f32) -> &mut Self {
        self.push_raw(RawSlot::Word(u64::from(value.to_bits())))
    }

    pub fn push_long(&mut self, value: u64) -> &mut Self {
        self.push_raw(RawSlot::Word(value))
    }

    pub fn push_bool(&mut self, value: bool) -> &mut Self {
        self.push_raw(RawSlot::Word(u64::from(value)))
    }

    pub fn push_str(&mut self, value: &str) -> &mut Self {
        self.push_raw(RawSlot::Bytes(value.as_bytes().to_vec()))
    }

    pub fn push_null(&mut self) -> &mut Self {
        self.push_raw(RawSlot::Null)
    }

    pub fn push_vector(&mut self, value: Vector3) -> &mut Self {
        for slot in crate::vector::to_slots(value) {
            self.push_raw(slot);
        }
        self
    }

    pub fn push_object<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
    ) -> Result<&mut Self, BoundaryError> {
        let payload = serde_json::to_vec(value)
            .map_err(|e| BoundaryError::Rejected(e.to_string()))?;
        Ok(self.push_raw(RawSlot::Bytes(payload)))
    }
}
