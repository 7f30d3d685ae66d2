//! Builder behavior: registration semantics, schema lifetime validation,
//! middleware installation, defaults, and callback ordering

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use quiver_wiring::domain::{
    DocumentCache, DocumentWriter, Error, ErrorInfoOptions, ErrorInfoProvider, ExecutionOptions,
    ParsedDocument, Schema, ServiceDescriptor, ServiceLifetime, ServiceProviderExt,
    ServiceRegister,
};
use quiver_wiring::services::{JsonDocumentWriter, MemoryDocumentCache};
use quiver_wiring::{InstallMode, PipelineBuilder, ServiceRegistry};

use crate::support::{
    chain_tags, init_tracing, AlphaMiddleware, BetaMiddleware, OtherSchema, PooledSchema,
    TagMiddleware, TestSchema,
};

fn registry_and_builder() -> (Arc<ServiceRegistry>, PipelineBuilder) {
    init_tracing();
    let registry = Arc::new(ServiceRegistry::new());
    let builder = PipelineBuilder::new(registry.clone());
    (registry, builder)
}

#[test]
fn test_schema_binding_fails_until_schema_added() {
    let (registry, _builder) = registry_and_builder();

    let err = registry
        .resolve::<Arc<dyn Schema>>()
        .err()
        .expect("no schema configured yet");
    assert!(matches!(err, Error::InvalidConfiguration { .. }));
    assert!(err.to_string().contains("no schema has been configured"));
}

#[test]
fn test_transient_resource_owning_schema_rejected_atomically() {
    let (registry, builder) = registry_and_builder();

    let err = builder
        .add_schema::<PooledSchema>(ServiceLifetime::Transient)
        .expect_err("pooled schema cannot be transient");
    assert!(matches!(err, Error::InvalidConfiguration { .. }));

    // The failed call left no binding behind
    let concrete = registry.resolve::<Arc<PooledSchema>>().err().expect("untouched");
    assert!(matches!(concrete, Error::NotRegistered { .. }));
    let generic = registry.resolve::<Arc<dyn Schema>>().err().expect("untouched");
    assert!(generic.to_string().contains("no schema has been configured"));
}

#[test]
fn test_resource_owning_schema_accepts_longer_lifetimes() {
    let (registry, builder) = registry_and_builder();

    builder
        .add_schema::<PooledSchema>(ServiceLifetime::Singleton)
        .expect("singleton pooled schema is valid")
        .build();

    let schema = registry.resolve::<Arc<dyn Schema>>().unwrap();
    assert_eq!(schema.schema_name(), "pooled");
}

#[test]
fn test_last_registered_schema_wins_generic_binding() {
    let (registry, builder) = registry_and_builder();

    builder
        .add_schema::<TestSchema>(ServiceLifetime::Singleton)
        .unwrap()
        .add_schema::<OtherSchema>(ServiceLifetime::Singleton)
        .unwrap()
        .build();

    let generic = registry.resolve::<Arc<dyn Schema>>().unwrap();
    assert_eq!(generic.schema_name(), "other");

    // Concrete bindings stay independently resolvable
    assert!(registry.resolve::<Arc<TestSchema>>().is_ok());
    assert!(registry.resolve::<Arc<OtherSchema>>().is_ok());
}

#[test]
fn test_schema_instance_registration() {
    let (registry, builder) = registry_and_builder();

    builder.add_schema_instance(TestSchema::named("prebuilt")).build();

    let generic = registry.resolve::<Arc<dyn Schema>>().unwrap();
    assert_eq!(generic.schema_name(), "prebuilt");
}

#[test]
fn test_pre_registered_schema_survives_builder_defaults() {
    init_tracing();
    let registry = Arc::new(ServiceRegistry::new());
    let schema: Arc<dyn Schema> = Arc::new(TestSchema::named("prewired"));
    registry.register(ServiceDescriptor::instance(schema));

    PipelineBuilder::new(registry.clone()).build();

    let resolved = registry.resolve::<Arc<dyn Schema>>().unwrap();
    assert_eq!(resolved.schema_name(), "prewired");
}

#[test]
fn test_middleware_installed_in_registration_order_exactly_once() {
    let (registry, builder) = registry_and_builder();

    let pipeline = builder
        .add_middleware::<AlphaMiddleware>()
        .add_middleware::<BetaMiddleware>()
        .build();

    let schema = TestSchema::default();
    pipeline
        .apply_schema_configuration(registry.as_ref(), &schema)
        .unwrap();

    assert_eq!(chain_tags(&schema), vec!["alpha", "beta"]);
}

#[test]
fn test_install_never_registers_without_touching_schemas() {
    let (registry, builder) = registry_and_builder();

    let pipeline = builder
        .add_middleware_with::<TagMiddleware>(ServiceLifetime::Transient, InstallMode::Never)
        .build();

    // Resolvable for anyone who asks, but no schema callback was captured
    assert!(registry.resolve::<Arc<TagMiddleware>>().is_ok());
    assert_eq!(pipeline.schema_configurator_count(), 0);

    let schema = TestSchema::default();
    pipeline
        .apply_schema_configuration(registry.as_ref(), &schema)
        .unwrap();
    assert!(schema.installed_middleware().is_empty());
}

#[test]
fn test_install_predicate_gates_per_schema() {
    let (registry, builder) = registry_and_builder();

    let pipeline = builder
        .add_middleware_instance(
            TagMiddleware { tag: "gated" },
            InstallMode::when(|_, schema| schema.schema_name() == "enabled"),
        )
        .build();

    let enabled = TestSchema::named("enabled");
    let disabled = TestSchema::named("disabled");
    pipeline
        .apply_schema_configuration(registry.as_ref(), &enabled)
        .unwrap();
    pipeline
        .apply_schema_configuration(registry.as_ref(), &disabled)
        .unwrap();

    assert_eq!(chain_tags(&enabled), vec!["gated"]);
    assert!(disabled.installed_middleware().is_empty());
}

#[test]
fn test_schema_callback_error_halts_later_callbacks() {
    let (registry, builder) = registry_and_builder();

    let ran_after_failure = Arc::new(AtomicUsize::new(0));
    let observer = Arc::clone(&ran_after_failure);
    let pipeline = builder
        .configure_schema(|_, _| Err(Error::execution("callback failed")))
        .configure_schema(move |_, _| {
            observer.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .build();

    let schema = TestSchema::default();
    let err = pipeline
        .apply_schema_configuration(registry.as_ref(), &schema)
        .expect_err("first callback fails");
    assert!(matches!(err, Error::Execution { .. }));
    assert_eq!(ran_after_failure.load(Ordering::SeqCst), 0);
}

#[test]
fn test_execution_callbacks_run_in_registration_order() {
    let (registry, builder) = registry_and_builder();

    let order = Arc::new(Mutex::new(Vec::new()));
    let first = Arc::clone(&order);
    let second = Arc::clone(&order);
    let pipeline = builder
        .configure_execution(move |_| {
            first.lock().unwrap().push(1);
            Ok(())
        })
        .configure_execution(move |_| {
            second.lock().unwrap().push(2);
            Ok(())
        })
        .build();

    let mut options = ExecutionOptions::new(registry.clone(), "{ hero }");
    pipeline.apply_execution_configuration(&mut options).unwrap();
    assert_eq!(*order.lock().unwrap(), vec![1, 2]);
}

#[test]
fn test_execution_callback_error_halts_later_callbacks() {
    let (registry, builder) = registry_and_builder();

    let ran_after_failure = Arc::new(AtomicUsize::new(0));
    let observer = Arc::clone(&ran_after_failure);
    let pipeline = builder
        .configure_execution(|_| Err(Error::execution("callback failed")))
        .configure_execution(move |_| {
            observer.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .build();

    let mut options = ExecutionOptions::new(registry.clone(), "{ hero }");
    let err = pipeline
        .apply_execution_configuration(&mut options)
        .expect_err("first callback fails");
    assert!(matches!(err, Error::Execution { .. }));
    assert_eq!(ran_after_failure.load(Ordering::SeqCst), 0);
}

#[test]
fn test_default_cache_writer_and_error_info_are_seeded() {
    let (registry, _builder) = registry_and_builder();

    let cache = registry.resolve::<Arc<dyn DocumentCache>>().unwrap();
    cache.set("{ hero }", Arc::new(ParsedDocument::new("{ hero }")));
    assert!(cache.get("{ hero }").is_none(), "default cache is a no-op");

    let writer = registry.resolve::<Arc<dyn DocumentWriter>>().unwrap();
    let bytes = writer.write(&serde_json::json!({ "data": null })).unwrap();
    assert_eq!(bytes, br#"{"data":null}"#);

    let provider = registry.resolve::<Arc<dyn ErrorInfoProvider>>().unwrap();
    let info = provider.error_info(&Error::execution("boom"));
    assert_eq!(info.code.as_deref(), Some("EXECUTION"));
}

#[test]
fn test_user_cache_replaces_default() {
    let (registry, builder) = registry_and_builder();

    builder
        .add_document_cache_instance(MemoryDocumentCache::new(8))
        .build();

    let cache = registry.resolve::<Arc<dyn DocumentCache>>().unwrap();
    let document = Arc::new(ParsedDocument::new("{ hero }"));
    cache.set("{ hero }", Arc::clone(&document));
    assert_eq!(cache.get("{ hero }"), Some(document));
}

#[test]
fn test_pre_registered_writer_survives_builder_defaults() {
    init_tracing();
    let registry = Arc::new(ServiceRegistry::new());
    let writer: Arc<dyn DocumentWriter> = Arc::new(JsonDocumentWriter::pretty());
    registry.register(ServiceDescriptor::instance(writer));

    PipelineBuilder::new(registry.clone()).build();

    let resolved = registry.resolve::<Arc<dyn DocumentWriter>>().unwrap();
    let bytes = resolved.write(&serde_json::json!({ "a": 1 })).unwrap();
    assert!(bytes.contains(&b'\n'), "pretty writer was kept");
}

#[test]
fn test_error_info_options_feed_default_provider() {
    let (registry, builder) = registry_and_builder();

    builder
        .add_error_info_options(ErrorInfoOptions {
            expose_code: false,
            expose_extensions: false,
        })
        .build();

    let provider = registry.resolve::<Arc<dyn ErrorInfoProvider>>().unwrap();
    let info = provider.error_info(&Error::execution("boom"));
    assert!(info.code.is_none());
    assert!(info.extensions.is_none());
}
