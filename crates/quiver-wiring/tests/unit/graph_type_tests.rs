//! Graph type catalogs: bulk registration, built-in templates, and
//! type-mapping replay

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use quiver_wiring::catalog::{
    builtin_entries, construct_default, key_of, ConnectionTemplate, GraphTypeEntry,
    GRAPH_TYPES,
};
use quiver_wiring::domain::{
    GraphType, Schema, ServiceDescriptor, ServiceKey, ServiceLifetime, ServiceProviderExt,
    ServiceRegister,
};
use quiver_wiring::{PipelineBuilder, ServiceRegistry, TypeCatalog};

use crate::support::TestSchema;

#[derive(Debug, Default)]
struct PersonType;

impl GraphType for PersonType {
    fn type_name(&self) -> &str {
        "Person"
    }
}

struct Person;

#[derive(Debug, Default)]
struct LinkedType;

impl GraphType for LinkedType {
    fn type_name(&self) -> &str {
        "Linked"
    }
}

#[linkme::distributed_slice(GRAPH_TYPES)]
static LINKED_TYPE: GraphTypeEntry = GraphTypeEntry {
    name: "Linked",
    description: "compile-time registered type",
    key: key_of::<LinkedType>,
    factory: construct_default::<LinkedType>,
    maps: None,
};

fn registry_and_builder() -> (Arc<ServiceRegistry>, PipelineBuilder) {
    let registry = Arc::new(ServiceRegistry::new());
    let builder = PipelineBuilder::new(registry.clone());
    (registry, builder)
}

#[test]
fn test_add_graph_types_registers_catalog_and_builtins() {
    let (registry, builder) = registry_and_builder();
    let catalog = TypeCatalog::new().with::<PersonType>("Person", "person output type");

    builder.add_graph_types(&catalog).build();

    let person = registry
        .resolve_keyed::<Arc<dyn GraphType>>(key_of::<PersonType>())
        .unwrap();
    assert_eq!(person.type_name(), "Person");

    let connection = registry
        .resolve_keyed::<Arc<dyn GraphType>>(key_of::<ConnectionTemplate>())
        .unwrap();
    assert_eq!(connection.type_name(), "Connection");
}

#[test]
fn test_add_graph_types_twice_is_a_no_op() {
    let (registry, builder) = registry_and_builder();
    let catalog = TypeCatalog::new().with::<PersonType>("Person", "person output type");
    let before = registry.binding_count();

    builder
        .add_graph_types(&catalog)
        .add_graph_types(&catalog)
        .build();

    // One binding per key, no matter how often the catalog is applied
    let expected = 1 + builtin_entries().len();
    assert_eq!(registry.binding_count(), before + expected);
}

#[test]
fn test_user_graph_type_binding_wins_over_catalog() {
    let (registry, builder) = registry_and_builder();

    registry.register(ServiceDescriptor::keyed_factory::<Arc<dyn GraphType>, _>(
        key_of::<PersonType>(),
        ServiceLifetime::Singleton,
        |_| Ok(Arc::new(LinkedType) as Arc<dyn GraphType>),
    ));

    let catalog = TypeCatalog::new().with::<PersonType>("Person", "person output type");
    builder.add_graph_types(&catalog).build();

    let resolved = registry
        .resolve_keyed::<Arc<dyn GraphType>>(key_of::<PersonType>())
        .unwrap();
    assert_eq!(resolved.type_name(), "Linked", "user binding kept");
}

#[test]
fn test_linked_catalog_collects_compile_time_entries() {
    let (registry, builder) = registry_and_builder();
    let catalog = TypeCatalog::linked();
    assert!(catalog.entries().iter().any(|entry| entry.name == "Linked"));

    builder.add_graph_types(&catalog).build();

    let linked = registry
        .resolve_keyed::<Arc<dyn GraphType>>(key_of::<LinkedType>())
        .unwrap();
    assert_eq!(linked.type_name(), "Linked");
}

static HOST_KEY_CALLS: AtomicUsize = AtomicUsize::new(0);

fn counted_host_key() -> ServiceKey {
    HOST_KEY_CALLS.fetch_add(1, Ordering::SeqCst);
    ServiceKey::of::<Person>()
}

#[test]
fn test_type_mappings_computed_once_and_replayed_per_schema() {
    let (registry, builder) = registry_and_builder();
    let catalog = TypeCatalog::new().with_entry(GraphTypeEntry {
        name: "Person",
        description: "person output type",
        key: key_of::<PersonType>,
        factory: construct_default::<PersonType>,
        maps: Some(counted_host_key),
    });

    let pipeline = builder.add_type_mappings(&catalog).build();
    assert_eq!(HOST_KEY_CALLS.load(Ordering::SeqCst), 1, "captured eagerly");

    let first = TestSchema::named("first");
    let second = TestSchema::named("second");
    pipeline
        .apply_schema_configuration(registry.as_ref(), &first)
        .unwrap();
    pipeline
        .apply_schema_configuration(registry.as_ref(), &second)
        .unwrap();

    let expected = vec![(ServiceKey::of::<Person>(), ServiceKey::of::<PersonType>())];
    assert_eq!(first.type_mappings(), expected);
    assert_eq!(second.type_mappings(), expected);
    // Still one capture, no matter how many schemas were configured
    assert_eq!(HOST_KEY_CALLS.load(Ordering::SeqCst), 1);
}

#[test]
fn test_empty_catalog_mappings_leave_schema_untouched() {
    let (registry, builder) = registry_and_builder();

    let pipeline = builder.add_type_mappings(&TypeCatalog::new()).build();

    let schema = TestSchema::default();
    pipeline
        .apply_schema_configuration(registry.as_ref(), &schema)
        .unwrap();
    assert!(schema.type_mappings().is_empty());
}
