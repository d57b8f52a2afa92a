//! Filesystem primitives for Arcade Manager
//!
//! Provides the data-root layout and the atomic install operations shared by
//! the sync and orchestration layers.

pub mod error;
pub mod io;
pub mod layout;

pub use error::{Error, Result};
pub use layout::{AssetDir, DataRoot};
