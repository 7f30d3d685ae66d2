//! Service lifetimes and lifetime validation
//!
//! A lifetime declares how long a resolved instance lives relative to the
//! registry that produced it: the whole process (`Singleton`), one logical
//! scope such as a request (`Scoped`), or a single resolution (`Transient`).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How long a resolved service instance lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceLifetime {
    /// One instance for the lifetime of the registry
    Singleton,
    /// One instance per scope (typically one scope per request)
    Scoped,
    /// A fresh instance on every resolution
    Transient,
}

impl std::fmt::Display for ServiceLifetime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Singleton => "singleton",
            Self::Scoped => "scoped",
            Self::Transient => "transient",
        };
        f.write_str(name)
    }
}

/// Declares whether a service type owns resources that need explicit
/// teardown (network handles, file descriptors, subprocesses).
///
/// Types without such resources implement this with an empty block; the
/// associated const defaults to `false`. Types that do own resources
/// override it:
///
/// ```
/// use quiver_domain::ResourceOwnership;
///
/// struct PooledSchema;
///
/// impl ResourceOwnership for PooledSchema {
///     const OWNS_RESOURCES: bool = true;
/// }
/// ```
pub trait ResourceOwnership {
    /// Whether instances hold resources requiring teardown
    const OWNS_RESOURCES: bool = false;
}

/// Reject lifetime/ownership combinations that would leak resources.
///
/// A transient instance that owns resources is created per resolution but
/// may be captured by a longer-lived root such as a singleton schema, so
/// its teardown never runs. That combination is rejected here, at
/// configuration time, before any binding is written.
pub fn validate_lifetime<T: ResourceOwnership>(
    lifetime: ServiceLifetime,
    type_name: &str,
) -> Result<()> {
    if lifetime == ServiceLifetime::Transient && T::OWNS_RESOURCES {
        return Err(Error::invalid_configuration(format!(
            "{type_name} owns external resources and cannot be registered as transient; \
             use a singleton or scoped lifetime so teardown is observable"
        )));
    }
    Ok(())
}
