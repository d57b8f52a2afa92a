//! Remote image catalog client

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::cache::{CachedItem, Progress, SyncReport, sync_batch};
use crate::error::{Error, Result};
use crate::source::{ContentSource, Fetched};

/// Listing endpoint for the hosted flyer image catalog.
pub const DEFAULT_LISTING_URL: &str =
    "https://api.github.com/repos/arcade-manager/flyers/contents";

const USER_AGENT: &str = "arcade-manager-sync";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const LISTING_TIMEOUT: Duration = Duration::from_secs(30);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Only image files in one of the flyer roles are synced.
const IMAGE_EXT: &str = ".png";
const ROLE_SUFFIXES: [&str; 2] = ["_front", "_back"];

/// One element of the listing payload, as served.
#[derive(Debug, Clone, Deserialize)]
struct ListingEntry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    download_url: Option<String>,
    #[serde(default)]
    size: u64,
}

/// A fetchable file from the remote catalog, with its declared size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub name: String,
    pub size: u64,
    pub download_url: String,
}

/// Client for the remote flyer catalog.
pub struct RemoteCatalog {
    client: reqwest::blocking::Client,
    listing_url: String,
}

impl RemoteCatalog {
    /// Client against the default hosted catalog.
    pub fn new() -> Result<Self> {
        Self::with_listing_url(DEFAULT_LISTING_URL)
    }

    /// Client against a specific listing endpoint.
    pub fn with_listing_url(listing_url: impl Into<String>) -> Result<Self> {
        let listing_url = listing_url.into();
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(LISTING_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Request {
                url: listing_url.clone(),
                source: e,
            })?;
        Ok(Self {
            client,
            listing_url,
        })
    }

    /// Fetch and filter the catalog listing.
    ///
    /// A non-200 answer is fatal and carries the status code.
    pub fn list(&self) -> Result<RemoteListing<'_>> {
        let response = self
            .client
            .get(&self.listing_url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .map_err(|e| Error::Request {
                url: self.listing_url.clone(),
                source: e,
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(Error::HttpStatus {
                url: self.listing_url.clone(),
                status,
            });
        }

        let entries: Vec<ListingEntry> = response.json().map_err(|e| Error::Request {
            url: self.listing_url.clone(),
            source: e,
        })?;

        Ok(RemoteListing {
            catalog: self,
            entries: filter_entries(entries),
        })
    }

    /// Sync the full listing into `dest`, skipping entries whose local size
    /// already matches the declared size.
    pub fn sync_into(&self, dest: &Path, progress: &mut dyn FnMut(Progress)) -> Result<SyncReport> {
        let listing = self.list()?;

        let items: Vec<CachedItem> = listing
            .entries()
            .iter()
            .map(|e| CachedItem::new(&e.name, dest.join(&e.name), Some(e.size)))
            .collect();

        let report = sync_batch(&items, |item| listing.open(&item.name), progress)?;
        info!(
            total = report.total,
            downloaded = report.downloaded,
            skipped = report.skipped,
            "flyer catalog synced"
        );
        Ok(report)
    }

    fn download(&self, entry: &RemoteEntry) -> Result<Fetched> {
        let response = self
            .client
            .get(&entry.download_url)
            .timeout(DOWNLOAD_TIMEOUT)
            .send()
            .map_err(|e| Error::Request {
                url: entry.download_url.clone(),
                source: e,
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(Error::HttpStatus {
                url: entry.download_url.clone(),
                status,
            });
        }

        Ok(Fetched::new(response, Some(entry.size)))
    }
}

/// A fetched listing: the qualifying entries plus the client to stream them.
pub struct RemoteListing<'a> {
    catalog: &'a RemoteCatalog,
    entries: Vec<RemoteEntry>,
}

impl RemoteListing<'_> {
    pub fn entries(&self) -> &[RemoteEntry] {
        &self.entries
    }
}

impl ContentSource for RemoteListing<'_> {
    fn open(&self, id: &str) -> Result<Fetched> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.name == id)
            .ok_or_else(|| Error::not_found(id))?;
        self.catalog.download(entry)
    }
}

/// Keep files with the image extension and one of the role suffixes.
fn filter_entries(entries: Vec<ListingEntry>) -> Vec<RemoteEntry> {
    entries
        .into_iter()
        .filter_map(|e| {
            if e.kind != "file" {
                return None;
            }
            let base = e
                .name
                .len()
                .checked_sub(IMAGE_EXT.len())
                .filter(|&i| e.name.is_char_boundary(i))
                .map(|i| e.name.split_at(i))
                .filter(|(_, ext)| ext.eq_ignore_ascii_case(IMAGE_EXT))
                .map(|(base, _)| base)?;
            if !ROLE_SUFFIXES
                .iter()
                .any(|suffix| ends_with_ignore_case(base, suffix))
            {
                return None;
            }
            let download_url = e.download_url.filter(|u| !u.is_empty())?;
            Some(RemoteEntry {
                name: e.name,
                size: e.size,
                download_url,
            })
        })
        .collect()
}

fn ends_with_ignore_case(s: &str, suffix: &str) -> bool {
    s.len()
        .checked_sub(suffix.len())
        .filter(|&i| s.is_char_boundary(i))
        .is_some_and(|i| s[i..].eq_ignore_ascii_case(suffix))
}
