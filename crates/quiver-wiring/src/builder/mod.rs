//! Pipeline Configuration Builder
//!
//! The single mutable object a host threads through startup
//! configuration. Every `add_*` operation performs zero or more registry
//! operations and/or appends a deferred configuration callback, then
//! returns the builder for chaining. Nothing here executes a query:
//! schema callbacks run later, once per constructed schema, and
//! execution callbacks run once per request.
//!
//! ```text
//! startup (single-threaded)            later, driven by the engine
//! ──────────────────────────           ───────────────────────────
//! PipelineBuilder::new(registry)
//!   .add_schema::<AppSchema>(..)?
//!   .add_middleware::<Tracing>()       per schema:
//!   .add_document_listener::<Audit>()    apply_schema_configuration
//!   .add_metrics()                     per request:
//!   .build()  ──►  Pipeline              apply_execution_configuration
//! ```

/// Accumulator types and the built pipeline
pub mod configurators;

pub use configurators::{
    ExecutionConfigurator, InstallMode, InstallPredicate, Pipeline, SchemaConfigurator,
};

use std::sync::Arc;

use quiver_domain::{
    validate_lifetime, DocumentCache, DocumentListener, DocumentWriter, Error, ErrorInfoOptions,
    ErrorInfoProvider, ExecutionOptions, FieldMiddleware, GraphType, ResourceOwnership, Result,
    Schema, ServiceDescriptor, ServiceLifetime, ServiceProvider, ServiceProviderExt,
    ServiceRegister,
};
use tracing::debug;

use crate::catalog::{builtin_entries, TypeCatalog};
use crate::services::{
    BasicErrorInfoProvider, InstrumentFieldMiddleware, JsonDocumentWriter, NullDocumentCache,
};

/// Fluent configuration builder over an injected service registry
pub struct PipelineBuilder {
    services: Arc<dyn ServiceRegister>,
    schema_configurators: Vec<SchemaConfigurator>,
    execution_configurators: Vec<ExecutionConfigurator>,
}

impl PipelineBuilder {
    /// Create a builder and seed the registry with baseline defaults.
    ///
    /// All defaults are try-registered so earlier user bindings win. The
    /// schema default is a failing factory that every `add_schema`
    /// overwrites.
    pub fn new(services: Arc<dyn ServiceRegister>) -> Self {
        let builder = Self {
            services,
            schema_configurators: Vec::new(),
            execution_configurators: Vec::new(),
        };
        builder.register_default_services();
        builder
    }

    fn register_default_services(&self) {
        self.services
            .try_register(ServiceDescriptor::factory::<Arc<dyn Schema>, _>(
                ServiceLifetime::Singleton,
                |_| {
                    Err(Error::invalid_configuration(
                        "no schema has been configured; call add_schema first",
                    ))
                },
            ));
        self.services
            .try_register(ServiceDescriptor::factory::<Arc<dyn DocumentCache>, _>(
                ServiceLifetime::Singleton,
                |_| Ok(Arc::new(NullDocumentCache) as Arc<dyn DocumentCache>),
            ));
        self.services
            .try_register(ServiceDescriptor::factory::<Arc<dyn DocumentWriter>, _>(
                ServiceLifetime::Singleton,
                |_| Ok(Arc::new(JsonDocumentWriter::new()) as Arc<dyn DocumentWriter>),
            ));
        self.services
            .try_register(ServiceDescriptor::factory::<Arc<dyn ErrorInfoProvider>, _>(
                ServiceLifetime::Singleton,
                |provider| {
                    let options = match provider.resolve::<ErrorInfoOptions>() {
                        Ok(options) => options,
                        Err(Error::NotRegistered { .. }) => ErrorInfoOptions::default(),
                        Err(other) => return Err(other),
                    };
                    Ok(Arc::new(BasicErrorInfoProvider::new(options)) as Arc<dyn ErrorInfoProvider>)
                },
            ));
        debug!("seeded default service bindings");
    }

    // ========================================================================
    // Schema
    // ========================================================================

    /// Register a schema constructed via `Default` under the given lifetime
    pub fn add_schema<S>(self, lifetime: ServiceLifetime) -> Result<Self>
    where
        S: Schema + ResourceOwnership + Default + 'static,
    {
        self.add_schema_with(lifetime, |_| Ok(S::default()))
    }

    /// Register a pre-built schema instance as a singleton
    pub fn add_schema_instance<S>(self, schema: S) -> Self
    where
        S: Schema + 'static,
    {
        debug!("registering schema instance {}", std::any::type_name::<S>());
        self.services
            .register(ServiceDescriptor::instance(Arc::new(schema)));
        self.register_schema_default::<S>(ServiceLifetime::Singleton);
        self
    }

    /// Register a schema factory under the given lifetime.
    ///
    /// The lifetime is validated before any binding is written: a
    /// transient schema that owns resources fails here and leaves the
    /// registry untouched.
    pub fn add_schema_with<S, F>(self, lifetime: ServiceLifetime, factory: F) -> Result<Self>
    where
        S: Schema + ResourceOwnership + 'static,
        F: Fn(&dyn ServiceProvider) -> Result<S> + Send + Sync + 'static,
    {
        validate_lifetime::<S>(lifetime, std::any::type_name::<S>())?;
        debug!(
            "registering schema {} ({lifetime})",
            std::any::type_name::<S>()
        );
        self.services
            .register(ServiceDescriptor::factory::<Arc<S>, _>(
                lifetime,
                move |provider| factory(provider).map(Arc::new),
            ));
        self.register_schema_default::<S>(lifetime);
        Ok(self)
    }

    /// Point the `Arc<dyn Schema>` binding at the concrete schema, so
    /// generic "give me a schema" lookups resolve to whatever was
    /// configured last while concrete lookups stay independently
    /// resolvable.
    fn register_schema_default<S>(&self, lifetime: ServiceLifetime)
    where
        S: Schema + 'static,
    {
        self.services
            .register(ServiceDescriptor::factory::<Arc<dyn Schema>, _>(
                lifetime,
                |provider| {
                    let concrete = provider.resolve::<Arc<S>>()?;
                    Ok(concrete as Arc<dyn Schema>)
                },
            ));
    }

    // ========================================================================
    // Field middleware
    // ========================================================================

    /// Register a middleware as transient and install it on every schema.
    ///
    /// Transient is deliberate: the instance is resolved at schema-build
    /// time and captured by the schema's chain, so its effective lifetime
    /// follows the schema's.
    pub fn add_middleware<M>(self) -> Self
    where
        M: FieldMiddleware + Default + 'static,
    {
        self.add_middleware_with::<M>(ServiceLifetime::Transient, InstallMode::Always)
    }

    /// Register a transient middleware installed only when the predicate
    /// holds at schema-build time
    pub fn add_middleware_when<M, P>(self, predicate: P) -> Self
    where
        M: FieldMiddleware + Default + 'static,
        P: Fn(&dyn ServiceProvider, &dyn Schema) -> bool + Send + Sync + 'static,
    {
        self.add_middleware_with::<M>(ServiceLifetime::Transient, InstallMode::when(predicate))
    }

    /// Register a middleware with explicit lifetime and install mode
    pub fn add_middleware_with<M>(mut self, lifetime: ServiceLifetime, mode: InstallMode) -> Self
    where
        M: FieldMiddleware + Default + 'static,
    {
        debug!(
            "registering middleware {} ({lifetime}, install: {mode:?})",
            std::any::type_name::<M>()
        );
        self.services
            .register(ServiceDescriptor::factory::<Arc<M>, _>(lifetime, |_| {
                Ok(Arc::new(M::default()))
            }));
        self.register_middleware_capability::<M>(lifetime);
        self.push_middleware_install::<M>(mode);
        self
    }

    /// Register a pre-built middleware instance with the given install mode
    pub fn add_middleware_instance<M>(mut self, middleware: M, mode: InstallMode) -> Self
    where
        M: FieldMiddleware + 'static,
    {
        debug!(
            "registering middleware instance {} (install: {mode:?})",
            std::any::type_name::<M>()
        );
        self.services
            .register(ServiceDescriptor::instance(Arc::new(middleware)));
        self.register_middleware_capability::<M>(ServiceLifetime::Singleton);
        self.push_middleware_install::<M>(mode);
        self
    }

    fn register_middleware_capability<M>(&self, lifetime: ServiceLifetime)
    where
        M: FieldMiddleware + 'static,
    {
        self.services
            .register(ServiceDescriptor::factory::<Arc<dyn FieldMiddleware>, _>(
                lifetime,
                |provider| {
                    let concrete = provider.resolve::<Arc<M>>()?;
                    Ok(concrete as Arc<dyn FieldMiddleware>)
                },
            ));
    }

    fn push_middleware_install<M>(&mut self, mode: InstallMode)
    where
        M: FieldMiddleware + 'static,
    {
        match mode {
            InstallMode::Never => {}
            InstallMode::Always => self.schema_configurators.push(Arc::new(|provider, schema| {
                let middleware = provider.resolve::<Arc<M>>()?;
                schema.install_middleware(middleware);
                Ok(())
            })),
            InstallMode::When(predicate) => {
                self.schema_configurators
                    .push(Arc::new(move |provider, schema| {
                        if predicate(provider, schema) {
                            let middleware = provider.resolve::<Arc<M>>()?;
                            schema.install_middleware(middleware);
                        }
                        Ok(())
                    }));
            }
        }
    }

    // ========================================================================
    // Document listeners
    // ========================================================================

    /// Register a listener constructed via `Default` as a singleton
    pub fn add_document_listener<L>(self) -> Self
    where
        L: DocumentListener + Default + 'static,
    {
        self.add_document_listener_with_lifetime::<L>(ServiceLifetime::Singleton)
    }

    /// Register a listener constructed via `Default` under the given
    /// lifetime. A scoped lifetime yields one listener instance per
    /// request, because the per-request callback resolves from the
    /// request's scope.
    pub fn add_document_listener_with_lifetime<L>(mut self, lifetime: ServiceLifetime) -> Self
    where
        L: DocumentListener + Default + 'static,
    {
        debug!(
            "registering document listener {} ({lifetime})",
            std::any::type_name::<L>()
        );
        self.services
            .register(ServiceDescriptor::factory::<Arc<L>, _>(lifetime, |_| {
                Ok(Arc::new(L::default()))
            }));
        self.register_listener_capability::<L>(lifetime);
        self.push_listener_resolution::<L>();
        self
    }

    /// Register a pre-built listener instance as a singleton
    pub fn add_document_listener_instance<L>(mut self, listener: L) -> Self
    where
        L: DocumentListener + 'static,
    {
        debug!(
            "registering document listener instance {}",
            std::any::type_name::<L>()
        );
        self.services
            .register(ServiceDescriptor::instance(Arc::new(listener)));
        self.register_listener_capability::<L>(ServiceLifetime::Singleton);
        self.push_listener_resolution::<L>();
        self
    }

    fn register_listener_capability<L>(&self, lifetime: ServiceLifetime)
    where
        L: DocumentListener + 'static,
    {
        self.services
            .register(ServiceDescriptor::factory::<Arc<dyn DocumentListener>, _>(
                lifetime,
                |provider| {
                    let concrete = provider.resolve::<Arc<L>>()?;
                    Ok(concrete as Arc<dyn DocumentListener>)
                },
            ));
    }

    fn push_listener_resolution<L>(&mut self)
    where
        L: DocumentListener + 'static,
    {
        self.execution_configurators.push(Arc::new(|options| {
            let listener = options.services.resolve::<Arc<L>>()?;
            options.listeners.push(listener);
            Ok(())
        }));
    }

    // ========================================================================
    // Document cache / writer
    // ========================================================================

    /// Register a document cache constructed via `Default`
    pub fn add_document_cache<C>(self) -> Self
    where
        C: DocumentCache + Default + 'static,
    {
        self.add_document_cache_with(|_| Ok(Arc::new(C::default()) as Arc<dyn DocumentCache>))
    }

    /// Register a pre-built document cache instance
    pub fn add_document_cache_instance<C>(self, cache: C) -> Self
    where
        C: DocumentCache + 'static,
    {
        let cache: Arc<dyn DocumentCache> = Arc::new(cache);
        self.services.register(ServiceDescriptor::instance(cache));
        self
    }

    /// Register a document cache factory
    pub fn add_document_cache_with<F>(self, factory: F) -> Self
    where
        F: Fn(&dyn ServiceProvider) -> Result<Arc<dyn DocumentCache>> + Send + Sync + 'static,
    {
        self.services
            .register(ServiceDescriptor::factory::<Arc<dyn DocumentCache>, _>(
                ServiceLifetime::Singleton,
                factory,
            ));
        self
    }

    /// Register a document writer constructed via `Default`
    pub fn add_document_writer<W>(self) -> Self
    where
        W: DocumentWriter + Default + 'static,
    {
        self.add_document_writer_with(|_| Ok(Arc::new(W::default()) as Arc<dyn DocumentWriter>))
    }

    /// Register a pre-built document writer instance
    pub fn add_document_writer_instance<W>(self, writer: W) -> Self
    where
        W: DocumentWriter + 'static,
    {
        let writer: Arc<dyn DocumentWriter> = Arc::new(writer);
        self.services.register(ServiceDescriptor::instance(writer));
        self
    }

    /// Register a document writer factory
    pub fn add_document_writer_with<F>(self, factory: F) -> Self
    where
        F: Fn(&dyn ServiceProvider) -> Result<Arc<dyn DocumentWriter>> + Send + Sync + 'static,
    {
        self.services
            .register(ServiceDescriptor::factory::<Arc<dyn DocumentWriter>, _>(
                ServiceLifetime::Singleton,
                factory,
            ));
        self
    }

    // ========================================================================
    // Error-info provider
    // ========================================================================

    /// Register an error-info provider constructed via `Default`
    pub fn add_error_info_provider<P>(self) -> Self
    where
        P: ErrorInfoProvider + Default + 'static,
    {
        self.add_error_info_provider_with(|_| {
            Ok(Arc::new(P::default()) as Arc<dyn ErrorInfoProvider>)
        })
    }

    /// Register a pre-built error-info provider instance
    pub fn add_error_info_provider_instance<P>(self, provider: P) -> Self
    where
        P: ErrorInfoProvider + 'static,
    {
        let provider: Arc<dyn ErrorInfoProvider> = Arc::new(provider);
        self.services
            .register(ServiceDescriptor::instance(provider));
        self
    }

    /// Register an error-info provider factory
    pub fn add_error_info_provider_with<F>(self, factory: F) -> Self
    where
        F: Fn(&dyn ServiceProvider) -> Result<Arc<dyn ErrorInfoProvider>> + Send + Sync + 'static,
    {
        self.services
            .register(ServiceDescriptor::factory::<Arc<dyn ErrorInfoProvider>, _>(
                ServiceLifetime::Singleton,
                factory,
            ));
        self
    }

    /// Register the options value the basic provider consumes.
    ///
    /// Provider and options are independent bindings; either may be
    /// replaced without re-registering the other.
    pub fn add_error_info_options(self, options: ErrorInfoOptions) -> Self {
        self.services.register(ServiceDescriptor::instance(options));
        self
    }

    /// Register an options factory for the error-info provider
    pub fn add_error_info_options_with<F>(self, factory: F) -> Self
    where
        F: Fn(&dyn ServiceProvider) -> Result<ErrorInfoOptions> + Send + Sync + 'static,
    {
        self.services
            .register(ServiceDescriptor::factory::<ErrorInfoOptions, _>(
                ServiceLifetime::Singleton,
                factory,
            ));
        self
    }

    // ========================================================================
    // Metrics
    // ========================================================================

    /// Install the instrumentation middleware and enable metrics on every
    /// request
    pub fn add_metrics(self) -> Self {
        self.add_metrics_enabled(true)
    }

    /// Install the instrumentation middleware and set the per-request
    /// metrics flag unconditionally
    pub fn add_metrics_enabled(mut self, enable: bool) -> Self {
        self = self.add_middleware::<InstrumentFieldMiddleware>();
        self.execution_configurators.push(Arc::new(move |options| {
            options.metrics_enabled = enable;
            Ok(())
        }));
        self
    }

    /// Install the instrumentation middleware and decide the per-request
    /// metrics flag by evaluating the predicate against each request's
    /// options
    pub fn add_metrics_when<F>(self, enable_predicate: F) -> Self
    where
        F: Fn(&ExecutionOptions) -> bool + Send + Sync + 'static,
    {
        self.add_metrics_gated(enable_predicate, InstallMode::Always)
    }

    /// Full control over both metrics gates: `install` gates schema-level
    /// installation, `enable_predicate` gates per-request recording. The
    /// gates are independent: a set flag with no installed middleware is
    /// simply inert.
    pub fn add_metrics_gated<F>(mut self, enable_predicate: F, install: InstallMode) -> Self
    where
        F: Fn(&ExecutionOptions) -> bool + Send + Sync + 'static,
    {
        self = self.add_middleware_with::<InstrumentFieldMiddleware>(
            ServiceLifetime::Transient,
            install,
        );
        self.execution_configurators.push(Arc::new(move |options| {
            let enabled = enable_predicate(options);
            options.metrics_enabled = enabled;
            Ok(())
        }));
        self
    }

    // ========================================================================
    // Graph types and type mappings
    // ========================================================================

    /// Try-register every catalog entry, plus the built-in templates, as
    /// transient graph types. Never overwrites user bindings, so running
    /// the same catalog twice is a no-op.
    pub fn add_graph_types(self, catalog: &TypeCatalog) -> Self {
        let mut registered = 0usize;
        for entry in catalog.entries().iter().copied().chain(builtin_entries()) {
            let factory = entry.factory;
            let descriptor = ServiceDescriptor::keyed_factory::<Arc<dyn GraphType>, _>(
                (entry.key)(),
                ServiceLifetime::Transient,
                move |_| Ok(factory()),
            );
            if self.services.try_register(descriptor) {
                registered += 1;
            }
        }
        debug!(
            "registered {registered} graph types from a catalog of {}",
            catalog.len()
        );
        self
    }

    /// Capture the catalog's host-type mappings once and replay them onto
    /// every schema built afterwards
    pub fn add_type_mappings(mut self, catalog: &TypeCatalog) -> Self {
        // Computed here, at configuration time; every schema sees the
        // same frozen set.
        let mappings: Vec<_> = catalog
            .entries()
            .iter()
            .filter_map(|entry| entry.maps.map(|host| (host(), (entry.key)())))
            .collect();
        debug!("captured {} type mappings", mappings.len());
        self.schema_configurators
            .push(Arc::new(move |_provider, schema| {
                for (host, graph) in &mappings {
                    schema.register_type_mapping(*host, *graph);
                }
                Ok(())
            }));
        self
    }

    // ========================================================================
    // Raw accumulators and build
    // ========================================================================

    /// Append a schema-configuration callback, run once per schema in
    /// registration order
    pub fn configure_schema<F>(mut self, callback: F) -> Self
    where
        F: Fn(&dyn ServiceProvider, &dyn Schema) -> Result<()> + Send + Sync + 'static,
    {
        self.schema_configurators.push(Arc::new(callback));
        self
    }

    /// Append an execution-configuration callback, run once per request
    /// in registration order
    pub fn configure_execution<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut ExecutionOptions) -> Result<()> + Send + Sync + 'static,
    {
        self.execution_configurators.push(Arc::new(callback));
        self
    }

    /// Freeze the accumulated configuration into an immutable pipeline
    pub fn build(self) -> Pipeline {
        debug!(
            "built pipeline with {} schema and {} execution configurators",
            self.schema_configurators.len(),
            self.execution_configurators.len()
        );
        Pipeline::new(self.schema_configurators, self.execution_configurators)
    }
}

impl std::fmt::Debug for PipelineBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("schema_configurators", &self.schema_configurators.len())
            .field("execution_configurators", &self.execution_configurators.len())
            .finish_non_exhaustive()
    }
}
