//! Native invocation
//!
//! Each call goes through three phases:
//!
//! 1. **Build**: arguments and interleaved output markers are encoded into
//!    a [`CallFrame`] in call order. The first encoding failure is kept and
//!    every later step is skipped.
//! 2. **Invoke**: exactly one boundary crossing through the [`NativeHost`].
//! 3. **Decode**: the [`ResultBuffer`](crate::frame::ResultBuffer) is walked
//!    positionally against the declared [`OutputSet`].


use std::sync::Arc;

use serde_json::Value;
use smallvec::SmallVec;

use crate::callback::{CallbackHandle, CallbackRegistry};
use crate::config::InvokerConfig;
use crate::encode::{EncodedArgument, IntoArguments};
use crate::error::InvokeError;
use crate::frame::{CallFrame, InitialValue};
use crate::host::NativeHost;
use crate::id::NativeId;
use crate::marker::{self, Marker, OutputSet, OutputSlot, SlotKind};

/// Entry point for native calls.
///
/// Holds no per-call state; clones share the host, the callback registry
/// and the configuration, and may be used from any thread.
#[derive(Clone)]
pub struct Invoker {
    host: Arc<dyn NativeHost>,
    callbacks: CallbackRegistry,
    config: Arc<InvokerConfig>,
}

impl Invoker {
    pub fn new(host: impl NativeHost + 'static) -> Self {
        Self::with_config(host, InvokerConfig::default())
    }

    pub fn with_config(host: impl NativeHost + 'static, config: InvokerConfig) -> Self {
        Self::from_shared(Arc::new(host), config)
    }

    /// Build from an already shared host. Questionable settings are logged
    /// as warnings, not rejected.
    pub fn from_shared(host: Arc<dyn NativeHost>, config: InvokerConfig) -> Self {
        for warning in config.validate() {
            tracing::warn!(%warning, "questionable invoker config");
        }
        let callbacks = CallbackRegistry::new(config.callbacks.resource_name.clone());
        Self {
            host,
            callbacks,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &InvokerConfig {
        &self.config
    }

    /// Registry the runtime re-enters for function-reference arguments.
    pub fn callbacks(&self) -> &CallbackRegistry {
        &self.callbacks
    }

    /// Register a callback to pass as a function-reference argument.
    pub fn register_callback<F>(&self, callback: F) -> CallbackHandle
    where
        F: Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.callbacks.register(callback)
    }

    /// Start building a call to `native`.
    pub fn invoke(&self, native: NativeId) -> Invocation<'_> {
        Invocation {
            invoker: self,
            frame: CallFrame::new(native),
            scratch: Vec::new(),
            markers: SmallVec::new(),
            error: None,
        }
    }
}

impl std::fmt::Debug for Invoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invoker")
            .field("callbacks", &self.callbacks)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// One call under construction.
#[must_use = "an invocation does nothing until `call` is used"]
pub struct Invocation<'a> {
    invoker: &'a Invoker,
    frame: CallFrame,
    scratch: Vec<EncodedArgument>,
    markers: SmallVec<[OutputSlot; 4]>,
    error: Option<InvokeError>,
}

impl Invocation<'_> {
    /// Append one argument; composite values expand to several entries.
    pub fn arg(mut self, value: impl IntoArguments) -> Self {
        if self.error.is_some() {
            return self;
        }
        match value.encode_into(&mut self.scratch) {
            Ok(()) => {
                for argument in self.scratch.drain(..) {
                    self.frame.push_argument(argument);
                }
            }
            Err(err) => {
                self.scratch.clear();
                self.error = Some(err);
            }
        }
        self
    }

    /// Place output marker `M` at the current position in the frame.
    pub fn out<M: Marker>(self) -> Self {
        self.marker(M::SLOT, None)
    }

    /// Place an integer pointer output initialized to `value`.
    pub fn in_out_int(self, value: i32) -> Self {
        self.marker(
            OutputSlot::pointer(SlotKind::Int),
            Some(InitialValue::Int(value)),
        )
    }

    /// Place a float pointer output initialized to `value`.
    pub fn in_out_float(self, value: f32) -> Self {
        self.marker(
            OutputSlot::pointer(SlotKind::Float),
            Some(InitialValue::Float(value)),
        )
    }

    fn marker(mut self, slot: OutputSlot, initial: Option<InitialValue>) -> Self {
        if self.error.is_none() {
            self.frame.push_output(slot, initial);
            self.markers.push(slot);
        }
        self
    }

    /// Cross the boundary and decode the declared outputs.
    ///
    /// Markers already placed with [`out`](Self::out) or the in/out
    /// builders must be a prefix of `O`'s slots; the rest are appended
    /// after the last argument.
    pub fn call<O: OutputSet>(self) -> Result<O::Output, InvokeError> {
        let Invocation {
            invoker,
            mut frame,
            markers,
            error,
            ..
        } = self;
        if let Some(err) = error {
            return Err(err);
        }

        let native = frame.native();
        let declared = O::slots();
        if !declared.starts_with(&markers) {
            return Err(InvokeError::invalid(format!(
                "native {native}: placed outputs {:?} do not match declared outputs {:?}",
                markers.iter().map(|s| s.kind).collect::<Vec<_>>(),
                declared.iter().map(|s| s.kind).collect::<Vec<_>>(),
            )));
        }
        for slot in &declared[markers.len()..] {
            frame.push_output(*slot, None);
        }

        let limits = &invoker.config.frame;
        let arguments = frame.argument_count();
        if arguments > limits.max_arguments {
            return Err(InvokeError::invalid(format!(
                "native {native}: {arguments} arguments exceed the frame limit of {}",
                limits.max_arguments
            )));
        }
        let width = frame.result_width();
        if width > limits.max_results {
            return Err(InvokeError::invalid(format!(
                "native {native}: {width} result slots exceed the frame limit of {}",
                limits.max_results
            )));
        }

        if invoker.config.trace.log_calls {
            tracing::debug!(%native, arguments, results = width, "invoking native");
        }

        let results = invoker
            .host
            .invoke(&frame)
            .map_err(|source| InvokeError::BoundaryFailure { native, source })?;

        marker::decode_results::<O>(native, results.slots())
    }
}
