//! Graph Type Catalog
//!
//! Replaces runtime assembly scanning with an explicit configuration-time
//! enumeration. A [`TypeCatalog`] is a static list of [`GraphTypeEntry`]
//! values, built either by hand or collected from the [`GRAPH_TYPES`]
//! linkme distributed slice:
//!
//! ```text
//! linkme (compile-time)          builder (startup)
//! ─────────────────────          ─────────────────────
//! GRAPH_TYPES entries      →     TypeCatalog::linked()
//!                                       │
//!                                add_graph_types(&catalog)
//!                                       │
//!                                try_register each entry (transient)
//! ```
//!
//! Entries are try-registered so user-supplied bindings always win, and
//! transient so a graph type's effective lifetime follows the schema that
//! captures it.
//!
//! ## Registering a graph type at compile time
//!
//! ```ignore
//! use quiver_wiring::catalog::{key_of, GraphTypeEntry, GRAPH_TYPES};
//!
//! #[linkme::distributed_slice(GRAPH_TYPES)]
//! static PERSON_TYPE: GraphTypeEntry = GraphTypeEntry {
//!     name: "Person",
//!     description: "Person output type",
//!     key: key_of::<PersonType>,
//!     factory: construct_default::<PersonType>,
//!     maps: Some(key_of::<Person>),
//! };
//! ```

use std::sync::Arc;

use quiver_domain::{GraphType, ServiceKey};

/// Catalog entry for one graph type
#[derive(Clone, Copy)]
pub struct GraphTypeEntry {
    /// The type's schema-facing name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Key of the concrete type the binding is stored under
    pub key: fn() -> ServiceKey,
    /// Factory producing an instance behind the capability trait
    pub factory: fn() -> Arc<dyn GraphType>,
    /// Host type this graph type represents, for CLR-style type mappings
    pub maps: Option<fn() -> ServiceKey>,
}

impl std::fmt::Debug for GraphTypeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphTypeEntry")
            .field("name", &self.name)
            .field("maps", &self.maps.map(|host| host().type_name()))
            .finish_non_exhaustive()
    }
}

// Auto-collection via linkme distributed slices - graph types submit
// entries at compile time
#[linkme::distributed_slice]
pub static GRAPH_TYPES: [GraphTypeEntry] = [..];

/// Key helper usable in const entry initializers
pub fn key_of<T: ?Sized + 'static>() -> ServiceKey {
    ServiceKey::of::<T>()
}

/// Factory helper usable in const entry initializers
pub fn construct_default<G>() -> Arc<dyn GraphType>
where
    G: GraphType + Default + Send + Sync + 'static,
{
    Arc::new(G::default())
}

/// An explicit, configuration-time enumeration of graph types
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    entries: Vec<GraphTypeEntry>,
}

impl TypeCatalog {
    /// An empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of every compile-time registered entry
    pub fn linked() -> Self {
        Self {
            entries: GRAPH_TYPES.iter().copied().collect(),
        }
    }

    /// Add a pre-built entry
    pub fn with_entry(mut self, entry: GraphTypeEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Add a graph type constructed via `Default`
    pub fn with<G>(mut self, name: &'static str, description: &'static str) -> Self
    where
        G: GraphType + Default + Send + Sync + 'static,
    {
        self.entries.push(GraphTypeEntry {
            name,
            description,
            key: key_of::<G>,
            factory: construct_default::<G>,
            maps: None,
        });
        self
    }

    /// Add a graph type that represents the host type `Host`
    pub fn with_mapping<Host, G>(mut self, name: &'static str, description: &'static str) -> Self
    where
        Host: 'static,
        G: GraphType + Default + Send + Sync + 'static,
    {
        self.entries.push(GraphTypeEntry {
            name,
            description,
            key: key_of::<G>,
            factory: construct_default::<G>,
            maps: Some(key_of::<Host>),
        });
        self
    }

    /// The catalog's entries in insertion order
    pub fn entries(&self) -> &[GraphTypeEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Built-in graph type templates
// ============================================================================

/// Built-in enumeration template
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumerationTemplate;

/// Built-in connection template
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionTemplate;

/// Built-in edge template
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeTemplate;

/// Built-in input object template
#[derive(Debug, Clone, Copy, Default)]
pub struct InputObjectTemplate;

/// Built-in auto-registering output object template
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoObjectTemplate;

/// Built-in auto-registering input object template
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoInputTemplate;

macro_rules! impl_template {
    ($($template:ty => $name:literal),+ $(,)?) => {
        $(impl GraphType for $template {
            fn type_name(&self) -> &str {
                $name
            }
        })+
    };
}

impl_template! {
    EnumerationTemplate => "Enumeration",
    ConnectionTemplate => "Connection",
    EdgeTemplate => "Edge",
    InputObjectTemplate => "InputObject",
    AutoObjectTemplate => "AutoObject",
    AutoInputTemplate => "AutoInput",
}

/// The fixed set of templates every `add_graph_types` call try-registers
pub fn builtin_entries() -> [GraphTypeEntry; 6] {
    macro_rules! builtin {
        ($template:ty, $name:literal, $description:literal) => {
            GraphTypeEntry {
                name: $name,
                description: $description,
                key: key_of::<$template>,
                factory: construct_default::<$template>,
                maps: None,
            }
        };
    }

    [
        builtin!(EnumerationTemplate, "Enumeration", "generic enumeration type"),
        builtin!(ConnectionTemplate, "Connection", "relay-style connection type"),
        builtin!(EdgeTemplate, "Edge", "relay-style edge type"),
        builtin!(InputObjectTemplate, "InputObject", "generic input object type"),
        builtin!(AutoObjectTemplate, "AutoObject", "auto-registering output type"),
        builtin!(AutoInputTemplate, "AutoInput", "auto-registering input type"),
    ]
}
