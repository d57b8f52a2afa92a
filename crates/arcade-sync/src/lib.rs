//! Content sources and size-gated cache synchronization for Arcade Manager
//!
//! Three places content can come from — the bundled read-only asset tree,
//! the remote image catalog, and the user-chosen external archive store —
//! behind one [`ContentSource`] contract: a byte stream plus the size the
//! source vouches for. The cache layer copies an item into the local tree
//! only when the destination's size differs from that expected size, and
//! installs through a temporary sibling so a failed transfer never corrupts
//! a previously valid file.

pub mod bundled;
pub mod cache;
pub mod error;
pub mod external;
pub mod remote;
pub mod source;

pub use bundled::BundledTree;
pub use cache::{CachedItem, Outcome, Progress, SyncReport, ensure, sync_batch};
pub use error::{Error, Result};
pub use external::{ArchiveFile, ExternalStore};
pub use remote::{RemoteCatalog, RemoteEntry, RemoteListing};
pub use source::{ContentSource, Fetched};
