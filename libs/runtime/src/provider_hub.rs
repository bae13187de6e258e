//! Type-safe provider registry.
//!
//! Providers register an implementation under an interface type and a
//! registration key (for payment providers the key follows the
//! `pp_<PROVIDER>_<configKey>` convention). Consumers fetch by interface
//! type and key without knowing how the instance was built.
//!
//! The hub also keeps named string collections; the payment loader appends
//! every registration key to the `payment_providers` collection so that the
//! full set can be enumerated later.
//!
//! Implementation notes:
//! - Key = (type name, registration key). `type_name::<T>()` works for
//!   `T = dyn Trait`.
//! - Value = `Arc<T>` stored as `Box<dyn Any + Send + Sync>`, downcast on
//!   read.
//! - Re-registering a key overwrites the previous value; `Arc`s already held
//!   by consumers remain valid.

use parking_lot::RwLock;
use std::{any::Any, collections::HashMap, fmt, sync::Arc};

/// Stable type key for trait objects, from fully-qualified `type_name`.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct TypeKey(&'static str);

impl TypeKey {
    #[inline]
    fn of<T: ?Sized + 'static>() -> Self {
        TypeKey(std::any::type_name::<T>())
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderHubError {
    #[error("provider not found: type={type_key:?}, key={key}")]
    NotFound { type_key: TypeKey, key: String },

    #[error("type mismatch in hub for type={type_key:?}, key={key}")]
    TypeMismatch { type_key: TypeKey, key: String },
}

type Boxed = Box<dyn Any + Send + Sync>;

struct HubState {
    providers: HashMap<(TypeKey, Arc<str>), Boxed>,
    collections: HashMap<String, Vec<String>>,
}

/// Registry of providers keyed by (interface type, registration key),
/// plus named string collections.
pub struct ProviderHub {
    state: RwLock<HubState>,
}

impl ProviderHub {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(HubState {
                providers: HashMap::new(),
                collections: HashMap::new(),
            }),
        }
    }

    /// Register a provider under the interface type `T` and the given key.
    /// `T` is usually a trait object like `dyn PaymentProvider`.
    pub fn register<T>(&self, key: impl Into<Arc<str>>, provider: Arc<T>)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let mut w = self.state.write();
        w.providers
            .insert((TypeKey::of::<T>(), key.into()), Box::new(provider));
    }

    /// Fetch a provider by interface type and key.
    ///
    /// # Errors
    /// Returns [`ProviderHubError::NotFound`] for unknown keys and
    /// [`ProviderHubError::TypeMismatch`] when the stored value is not an
    /// `Arc<T>`.
    pub fn get<T>(&self, key: &str) -> Result<Arc<T>, ProviderHubError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let type_key = TypeKey::of::<T>();
        let r = self.state.read();

        let boxed = r
            .providers
            .get(&(type_key.clone(), Arc::from(key)))
            .ok_or_else(|| ProviderHubError::NotFound {
                type_key: type_key.clone(),
                key: key.to_owned(),
            })?;

        if let Some(arc_t) = boxed.downcast_ref::<Arc<T>>() {
            return Ok(arc_t.clone());
        }
        Err(ProviderHubError::TypeMismatch {
            type_key,
            key: key.to_owned(),
        })
    }

    /// True when a provider is registered under the type and key.
    #[must_use]
    pub fn contains<T>(&self, key: &str) -> bool
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.state
            .read()
            .providers
            .contains_key(&(TypeKey::of::<T>(), Arc::from(key)))
    }

    /// Append a value to a named string collection.
    pub fn push_collection(&self, collection: &str, value: impl Into<String>) {
        let mut w = self.state.write();
        w.collections
            .entry(collection.to_owned())
            .or_default()
            .push(value.into());
    }

    /// Snapshot of a named collection; empty when absent.
    #[must_use]
    pub fn collection(&self, collection: &str) -> Vec<String> {
        self.state
            .read()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().providers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().providers.is_empty()
    }

    /// Clear everything (useful in tests).
    pub fn clear(&self) {
        let mut w = self.state.write();
        w.providers.clear();
        w.collections.clear();
    }
}

impl Default for ProviderHub {
    fn default() -> Self {
        Self::new()
    }
}
