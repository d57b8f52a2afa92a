//! Workload catalog and dependency resolution for Arcade Manager
//!
//! A workload (a launchable game) may inherit ROM data from a parent
//! workload, forming a chain the launcher must fully realize before handing
//! off to the emulator. This crate models the catalog as an opaque,
//! read-only map keyed by name — the catalog file's format belongs to an
//! external collaborator — and provides chain expansion, availability
//! checks, and cached capability lookups over it.

pub mod capability;
pub mod entry;
pub mod resolver;

pub use capability::CapabilityCache;
pub use entry::{Catalog, CatalogEntry};
pub use resolver::{
    WorkloadStatus, is_launchable, missing_from, required_chain, workload_status,
};
