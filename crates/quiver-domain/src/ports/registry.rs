//! Service Registry Ports
//!
//! The registry capability consumed by the wiring layer. The builder only
//! ever declares bindings through [`ServiceRegister`]; instance creation
//! and caching are entirely the provider's concern.
//!
//! ## Binding model
//!
//! A binding associates a [`ServiceKey`] (the `TypeId` of the *handle*
//! type callers resolve, e.g. `Arc<MySchema>` or `Arc<dyn Schema>`) with
//! a lifetime and either a pre-built instance or a factory. At most one
//! binding exists per key:
//!
//! - [`ServiceRegister::register`] always overwrites (last writer wins)
//! - [`ServiceRegister::try_register`] is inert when the key is bound
//!
//! Generic "give me the most recently configured service" lookups fall
//! out of last-writer-wins `register` on a capability key.

use std::any::{Any, TypeId};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::lifetime::ServiceLifetime;

/// Type-erased shared service value stored in a binding
pub type AnyService = Arc<dyn Any + Send + Sync>;

/// Type-erased factory producing a service value within a resolution scope
pub type ServiceFactory = Arc<dyn Fn(&dyn ServiceProvider) -> Result<AnyService> + Send + Sync>;

/// Identifies a binding: the `TypeId` of the handle type plus its name
/// for diagnostics. Also used as the type token in schema type mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceKey {
    id: TypeId,
    name: &'static str,
}

impl ServiceKey {
    /// Key for the given handle type
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The underlying `TypeId`
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Human-readable type name for diagnostics
    pub fn type_name(&self) -> &'static str {
        self.name
    }
}

impl std::fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// What a binding produces when resolved
#[derive(Clone)]
pub enum ServiceSource {
    /// A pre-built value shared by every resolution
    Instance(AnyService),
    /// A factory invoked according to the binding's lifetime
    Factory(ServiceFactory),
}

impl std::fmt::Debug for ServiceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Instance(_) => f.write_str("Instance"),
            Self::Factory(_) => f.write_str("Factory"),
        }
    }
}

/// A declared binding: key, lifetime, and value source
#[derive(Clone)]
pub struct ServiceDescriptor {
    key: ServiceKey,
    lifetime: ServiceLifetime,
    source: ServiceSource,
}

impl ServiceDescriptor {
    /// Bind a pre-built value as a singleton under its own type key
    pub fn instance<T>(value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        Self {
            key: ServiceKey::of::<T>(),
            lifetime: ServiceLifetime::Singleton,
            source: ServiceSource::Instance(Arc::new(value)),
        }
    }

    /// Bind a factory under the produced type's own key
    pub fn factory<T, F>(lifetime: ServiceLifetime, factory: F) -> Self
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(&dyn ServiceProvider) -> Result<T> + Send + Sync + 'static,
    {
        Self::keyed_factory(ServiceKey::of::<T>(), lifetime, factory)
    }

    /// Bind a factory under an explicit key.
    ///
    /// Used when the key differs from the handle type, e.g. graph types
    /// keyed by their concrete type but resolved as `Arc<dyn GraphType>`.
    pub fn keyed_factory<T, F>(key: ServiceKey, lifetime: ServiceLifetime, factory: F) -> Self
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(&dyn ServiceProvider) -> Result<T> + Send + Sync + 'static,
    {
        Self {
            key,
            lifetime,
            source: ServiceSource::Factory(Arc::new(move |provider| {
                factory(provider).map(|value| Arc::new(value) as AnyService)
            })),
        }
    }

    /// The binding's key
    pub fn key(&self) -> ServiceKey {
        self.key
    }

    /// The binding's lifetime
    pub fn lifetime(&self) -> ServiceLifetime {
        self.lifetime
    }

    /// The binding's value source
    pub fn source(&self) -> &ServiceSource {
        &self.source
    }
}

impl std::fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceDescriptor")
            .field("key", &self.key.type_name())
            .field("lifetime", &self.lifetime)
            .field("source", &self.source)
            .finish()
    }
}

/// Registration capability consumed by the builder
pub trait ServiceRegister: Send + Sync {
    /// Declare a binding, replacing any existing binding for the same key
    fn register(&self, descriptor: ServiceDescriptor);

    /// Declare a binding only if the key is unbound.
    ///
    /// Returns `true` when the binding was written, `false` when an
    /// existing binding made this a no-op.
    fn try_register(&self, descriptor: ServiceDescriptor) -> bool;
}

/// Resolution capability exposed by a registry or scope
pub trait ServiceProvider: Send + Sync {
    /// Resolve the type-erased value bound under `key`
    fn resolve_entry(&self, key: ServiceKey) -> Result<AnyService>;
}

/// Typed resolution helpers, blanket-implemented for every provider
pub trait ServiceProviderExt: ServiceProvider {
    /// Resolve the binding for `T`'s own key as a `T`
    fn resolve<T>(&self) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.resolve_keyed(ServiceKey::of::<T>())
    }

    /// Resolve the binding under `key`, expecting it to hold a `T`
    fn resolve_keyed<T>(&self, key: ServiceKey) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let entry = self.resolve_entry(key)?;
        entry
            .downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| Error::type_mismatch(key.type_name(), std::any::type_name::<T>()))
    }
}

impl<P: ServiceProvider + ?Sized> ServiceProviderExt for P {}
