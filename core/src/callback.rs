//! Callback registry for function-reference arguments
//!
//! A callback passed to a native is registered here and encoded as its
//! reference string. The runtime may re-enter it later, from any thread,
//! through [`CallbackRegistry::call`]. The registration lives until its
//! [`CallbackHandle`] is cancelled.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use hashbrown::HashMap;
use serde_json::Value;

/// Body of a registered callback.
pub type CallbackFn = dyn Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync;

#[derive(Debug, thiserror::Error)]
pub enum CallbackError {
    #[error("no callback registered for '{0}'")]
    NotRegistered(String),

    #[error("callback '{reference}' failed")]
    Failed {
        reference: String,
        #[source]
        source: anyhow::Error,
    },
}

struct Inner {
    resource: String,
    next_id: AtomicU64,
    entries: Mutex<HashMap<u64, Arc<CallbackFn>>>,
}

impl Inner {
    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<u64, Arc<CallbackFn>>> {
        // A panicking callback never runs under the lock, so the map is intact
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn parse_reference(&self, reference: &str) -> Option<u64> {
        let (resource, id) = reference.rsplit_once(':')?;
        if resource != self.resource {
            return None;
        }
        id.parse().ok()
    }
}

/// Shared registry of callbacks, cheap to clone.
#[derive(Clone)]
pub struct CallbackRegistry {
    inner: Arc<Inner>,
}

impl CallbackRegistry {
    pub fn new(resource: impl Into<String>) -> Self {
        Self::starting_at(resource, 1)
    }

    fn starting_at(resource: impl Into<String>, first_id: u64) -> Self {
        Self {
            inner: Arc::new(Inner {
                resource: resource.into(),
                next_id: AtomicU64::new(first_id),
                entries: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn resource(&self) -> &str {
        &self.inner.resource
    }

    /// Register a callback and return the handle that owns its registration.
    pub fn register<F>(&self, callback: F) -> CallbackHandle
    where
        F: Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.entries().insert(id, Arc::new(callback));

        let reference = format!("{}:{}", self.inner.resource, id);
        tracing::debug!(%reference, "callback registered");

        CallbackHandle {
            id,
            reference,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Invoke a registered callback by reference.
    pub fn call(&self, reference: &str, args: &[Value]) -> Result<Value, CallbackError> {
        let callback = self
            .inner
            .parse_reference(reference)
            .and_then(|id| self.inner.entries().get(&id).cloned())
            .ok_or_else(|| CallbackError::NotRegistered(reference.to_string()))?;

        callback(args).map_err(|source| CallbackError::Failed {
            reference: reference.to_string(),
            source,
        })
    }

    pub fn is_registered(&self, reference: &str) -> bool {
        self.inner
            .parse_reference(reference)
            .is_some_and(|id| self.inner.entries().contains_key(&id))
    }

    pub fn len(&self) -> usize {
        self.inner.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("resource", &self.inner.resource)
            .field("registered", &self.len())
            .finish()
    }
}

/// Owns one callback registration.
///
/// Dropping the handle keeps the callback registered; the runtime may still
/// hold its reference. Call [`cancel`](Self::cancel) to release it.
#[derive(Debug)]
pub struct CallbackHandle {
    id: u64,
    reference: String,
    registry: Weak<Inner>,
}

impl CallbackHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Unregister the callback. Returns `false` if it was already gone.
    pub fn cancel(self) -> bool {
        let Some(inner) = self.registry.upgrade() else {
            return false;
        };
        let removed = inner.entries().remove(&self.id).is_some();
        if removed {
            tracing::debug!(reference = %self.reference, "callback cancelled");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_references_are_sequential() {
        let registry = CallbackRegistry::new("garage");
        let a = registry.register(|_| Ok(Value::Null));
        let b = registry.register(|_| Ok(Value::Null));
        assert_eq!(a.reference(), "garage:1");
        assert_eq!(b.reference(), "garage:2");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_ids_continue_past_u32() {
        let registry = CallbackRegistry::starting_at("garage", u64::from(u32::MAX));
        let last_small = registry.register(|_| Ok(json!("first")));
        let next = registry.register(|_| Ok(json!("second")));

        assert_eq!(last_small.reference(), "garage:4294967295");
        assert_eq!(next.reference(), "garage:4294967296");
        assert_ne!(last_small.id(), next.id());
        assert_eq!(registry.len(), 2);
        let first = registry.call(last_small.reference(), &[]).unwrap();
        let second = registry.call(next.reference(), &[]).unwrap();
        assert_eq!((first, second), (json!("first"), json!("second")));
    }

    #[test]
    fn test_call_passes_arguments() {
        let registry = CallbackRegistry::new("garage");
        let handle = registry.register(|args| {
            let total: i64 = args.iter().filter_map(Value::as_i64).sum();
            Ok(json!(total))
        });

        let result = registry
            .call(handle.reference(), &[json!(2), json!(5)])
            .unwrap();
        assert_eq!(result, json!(7));
    }

    #[test]
    fn test_cancel_unregisters() {
        let registry = CallbackRegistry::new("garage");
        let handle = registry.register(|_| Ok(Value::Null));
        let reference = handle.reference().to_string();

        assert!(registry.is_registered(&reference));
        assert!(handle.cancel());
        assert!(!registry.is_registered(&reference));
        assert!(registry.is_empty());
        assert!(matches!(
            registry.call(&reference, &[]),
            Err(CallbackError::NotRegistered(_))
        ));
    }

    #[test]
    fn test_foreign_references_are_not_registered() {
        let registry = CallbackRegistry::new("garage");
        let _handle = registry.register(|_| Ok(Value::Null));
        assert!(!registry.is_registered("other:1"));
        assert!(!registry.is_registered("garage:x"));
        assert!(!registry.is_registered("garage"));
    }

    #[test]
    fn test_failure_is_wrapped() {
        let registry = CallbackRegistry::new("garage");
        let handle = registry.register(|_| anyhow::bail!("no vehicle"));
        match registry.call(handle.reference(), &[]) {
            Err(CallbackError::Failed { reference, source }) => {
                assert_eq!(reference, "garage:1");
                assert_eq!(source.to_string(), "no vehicle");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_callback_may_reenter_registry() {
        let registry = CallbackRegistry::new("garage");
        let inner = registry.clone();
        let handle = registry.register(move |_| {
            // Registering from inside a callback must not deadlock
            let nested = inner.register(|_| Ok(json!("nested")));
            inner
                .call(nested.reference(), &[])
                .map_err(anyhow::Error::from)
        });

        let result = registry.call(handle.reference(), &[]).unwrap();
        assert_eq!(result, json!("nested"));
    }

    #[test]
    fn test_calls_from_many_threads() {
        let registry = CallbackRegistry::new("garage");
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let handle = registry.register(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Value::Null)
        });
        let reference = handle.reference().to_string();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..25 {
                        registry.call(&reference, &[]).unwrap();
                    }
                });
            }
        });

        assert_eq!(hits.load(Ordering::SeqCst), 100);
    }

    #[test]
    fn test_cancel_after_registry_dropped() {
        let registry = CallbackRegistry::new("garage");
        let handle = registry.register(|_| Ok(Value::Null));
        drop(registry);
        assert!(!handle.cancel());
    }
}
