//! Service Registry Implementations
//!
//! The in-memory registry implements the `ServiceRegister` and
//! `ServiceProvider` ports from `quiver-domain`. The builder only ever
//! sees the ports, so alternative registries can be swapped in.

/// In-memory registry with singleton/scoped/transient caching
pub mod memory;

pub use memory::{ServiceRegistry, ServiceScope};
