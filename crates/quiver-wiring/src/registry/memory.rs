//! In-Memory Service Registry
//!
//! A straightforward implementation of the registry capability: a
//! descriptor map guarded by an `RwLock` (written during startup
//! configuration, read afterwards) plus `DashMap` instance caches.
//!
//! ## Scopes
//!
//! ```text
//! ServiceRegistry (root)
//! ├── singleton cache          one instance per registry
//! ├── create_scope() ──► ServiceScope
//! │                      └── scoped cache    one instance per scope
//! └── transient               fresh instance per resolution
//! ```
//!
//! The root registry doubles as the root scope: scoped services resolved
//! directly from the root live for the registry's lifetime. Factories
//! receive the resolving scope as their provider, so a scoped service's
//! dependencies resolve within the same scope. Singleton factories are
//! the exception: they always receive the root, since the instance they
//! produce outlives any request scope.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use dashmap::DashMap;
use quiver_domain::{
    AnyService, Error, Result, ServiceDescriptor, ServiceKey, ServiceLifetime, ServiceProvider,
    ServiceRegister, ServiceSource,
};
use tracing::{debug, trace};

/// Root service registry: the single place bindings are declared
#[derive(Default)]
pub struct ServiceRegistry {
    descriptors: RwLock<HashMap<TypeId, ServiceDescriptor>>,
    singletons: DashMap<TypeId, AnyService>,
}

impl ServiceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a resolution scope, typically one per request
    pub fn create_scope(self: &Arc<Self>) -> ServiceScope {
        ServiceScope {
            root: Arc::clone(self),
            scoped: DashMap::new(),
        }
    }

    /// Whether a binding exists for `key`
    pub fn is_registered(&self, key: ServiceKey) -> bool {
        self.read_descriptors().contains_key(&key.type_id())
    }

    /// Number of declared bindings
    pub fn binding_count(&self) -> usize {
        self.read_descriptors().len()
    }

    fn read_descriptors(&self) -> std::sync::RwLockReadGuard<'_, HashMap<TypeId, ServiceDescriptor>> {
        // Registration is idempotent, so a poisoned lock is safe to recover
        self.descriptors
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_descriptors(
        &self,
    ) -> std::sync::RwLockWriteGuard<'_, HashMap<TypeId, ServiceDescriptor>> {
        self.descriptors
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn descriptor(&self, key: ServiceKey) -> Result<ServiceDescriptor> {
        self.read_descriptors()
            .get(&key.type_id())
            .cloned()
            .ok_or_else(|| Error::not_registered(key.type_name()))
    }

    fn produce(
        descriptor: &ServiceDescriptor,
        provider: &dyn ServiceProvider,
    ) -> Result<AnyService> {
        match descriptor.source() {
            ServiceSource::Instance(value) => Ok(value.clone()),
            ServiceSource::Factory(factory) => factory(provider),
        }
    }

    /// Resolve against the root, caching singletons and root-scoped
    /// services in the singleton cache.
    fn resolve_as_root(&self, key: ServiceKey, provider: &dyn ServiceProvider) -> Result<AnyService> {
        let descriptor = self.descriptor(key)?;
        match descriptor.lifetime() {
            ServiceLifetime::Transient => Self::produce(&descriptor, provider),
            ServiceLifetime::Singleton | ServiceLifetime::Scoped => {
                if let Some(cached) = self.singletons.get(&key.type_id()) {
                    return Ok(cached.clone());
                }
                let value = Self::produce(&descriptor, provider)?;
                Ok(self
                    .singletons
                    .entry(key.type_id())
                    .or_insert(value)
                    .clone())
            }
        }
    }
}

impl ServiceRegister for ServiceRegistry {
    fn register(&self, descriptor: ServiceDescriptor) {
        let key = descriptor.key();
        let replaced = self
            .write_descriptors()
            .insert(key.type_id(), descriptor)
            .is_some();
        if replaced {
            // Drop any cached instance so the new binding takes effect
            self.singletons.remove(&key.type_id());
            debug!("replaced binding for {}", key.type_name());
        } else {
            trace!("registered {}", key.type_name());
        }
    }

    fn try_register(&self, descriptor: ServiceDescriptor) -> bool {
        let key = descriptor.key();
        let mut descriptors = self.write_descriptors();
        if descriptors.contains_key(&key.type_id()) {
            trace!("{} already bound, try_register is a no-op", key.type_name());
            return false;
        }
        descriptors.insert(key.type_id(), descriptor);
        trace!("registered {}", key.type_name());
        true
    }
}

impl ServiceProvider for ServiceRegistry {
    fn resolve_entry(&self, key: ServiceKey) -> Result<AnyService> {
        self.resolve_as_root(key, self)
    }
}

/// One resolution scope over a shared root registry
pub struct ServiceScope {
    root: Arc<ServiceRegistry>,
    scoped: DashMap<TypeId, AnyService>,
}

impl ServiceScope {
    /// The root registry this scope was opened from
    pub fn root(&self) -> &Arc<ServiceRegistry> {
        &self.root
    }
}

impl ServiceProvider for ServiceScope {
    fn resolve_entry(&self, key: ServiceKey) -> Result<AnyService> {
        let descriptor = self.root.descriptor(key)?;
        match descriptor.lifetime() {
            // Singletons are produced against the root so they can never
            // capture a shorter-lived scope's dependencies
            ServiceLifetime::Singleton => self.root.resolve_as_root(key, self.root.as_ref()),
            ServiceLifetime::Scoped => {
                if let Some(cached) = self.scoped.get(&key.type_id()) {
                    return Ok(cached.clone());
                }
                let value = ServiceRegistry::produce(&descriptor, self)?;
                Ok(self.scoped.entry(key.type_id()).or_insert(value).clone())
            }
            ServiceLifetime::Transient => ServiceRegistry::produce(&descriptor, self),
        }
    }
}
