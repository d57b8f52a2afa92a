//! Content source abstraction shared by the three fetch backends

use std::io::Read;

use crate::error::Result;

/// An opened content item: the byte stream and the size the source vouches
/// for, when it reports one.
pub struct Fetched {
    pub reader: Box<dyn Read>,
    pub expected_size: Option<u64>,
}

impl std::fmt::Debug for Fetched {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetched")
            .field("expected_size", &self.expected_size)
            .finish_non_exhaustive()
    }
}

impl Fetched {
    pub fn new(reader: impl Read + 'static, expected_size: Option<u64>) -> Self {
        Self {
            reader: Box::new(reader),
            expected_size,
        }
    }
}

/// A source of named content items.
///
/// Implemented by the bundled asset tree, the remote catalog listing, and
/// the external archive store; the cache layer depends only on this
/// contract.
pub trait ContentSource {
    /// Open `id`, yielding its byte stream and expected size.
    fn open(&self, id: &str) -> Result<Fetched>;
}
