//! Tests for the size-gated cache layer

use std::cell::Cell;
use std::fs;
use std::io::{self, Read};

use arcade_sync::{CachedItem, Error, Fetched, Outcome, Progress, ensure, sync_batch};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn bytes(content: &'static str) -> Fetched {
    Fetched::new(content.as_bytes(), Some(content.len() as u64))
}

/// Reader that fails after yielding a few bytes.
struct FailingReader {
    remaining: usize,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "transfer interrupted"));
        }
        let n = self.remaining.min(buf.len());
        buf[..n].fill(b'x');
        self.remaining -= n;
        Ok(n)
    }
}

#[test]
fn matching_size_is_a_cache_hit_even_when_content_differs() {
    // Freshness is size-only: a destination of the right length is never
    // re-fetched, whatever its bytes.
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("scud.zip");
    fs::write(&dest, "AAAA").unwrap();

    let fetched = Cell::new(false);
    let item = CachedItem::new("scud", &dest, Some(4));
    let outcome = ensure(&item, || {
        fetched.set(true);
        Ok(bytes("BBBB"))
    })
    .unwrap();

    assert_eq!(outcome, Outcome::Fresh);
    assert!(!fetched.get());
    assert_eq!(fs::read_to_string(&dest).unwrap(), "AAAA");
}

#[test]
fn size_mismatch_triggers_a_copy() {
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("scud.zip");
    fs::write(&dest, "short").unwrap();

    let item = CachedItem::new("scud", &dest, Some(12));
    let outcome = ensure(&item, || Ok(bytes("full archive"))).unwrap();

    assert_eq!(outcome, Outcome::Installed);
    assert_eq!(fs::read_to_string(&dest).unwrap(), "full archive");
}

#[test]
fn missing_destination_is_always_copied() {
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("scud.zip");

    let item = CachedItem::new("scud", &dest, Some(12));
    ensure(&item, || Ok(bytes("full archive"))).unwrap();

    assert_eq!(fs::read_to_string(&dest).unwrap(), "full archive");
}

#[test]
fn mid_transfer_failure_preserves_the_previous_destination() {
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("scud.zip");
    fs::write(&dest, "known-good archive").unwrap();

    let item = CachedItem::new("scud", &dest, Some(999));
    let err = ensure(&item, || {
        Ok(Fetched::new(FailingReader { remaining: 3 }, Some(999)))
    })
    .unwrap_err();

    assert!(matches!(err, Error::Install { .. }));
    assert_eq!(err.item(), Some("scud"));
    assert_eq!(fs::read_to_string(&dest).unwrap(), "known-good archive");
}

#[test]
fn batch_aborts_on_first_failure_and_names_the_item() {
    let dir = TempDir::new().unwrap();
    let items = vec![
        CachedItem::new("one", dir.path().join("one.zip"), Some(1)),
        CachedItem::new("two", dir.path().join("two.zip"), Some(1)),
        CachedItem::new("three", dir.path().join("three.zip"), Some(1)),
    ];

    let mut events: Vec<Progress> = Vec::new();
    let err = sync_batch(
        &items,
        |item| match item.name.as_str() {
            "two" => Err(Error::not_found("two")),
            _ => Ok(bytes("x")),
        },
        &mut |p| events.push(p),
    )
    .unwrap_err();

    assert_eq!(err.item(), Some("two"));
    assert!(dir.path().join("one.zip").exists());
    assert!(!dir.path().join("three.zip").exists());

    // Progress fired for the items reached, monotonically.
    let done: Vec<usize> = events.iter().map(|p| p.done).collect();
    assert_eq!(done, [1, 2]);
    assert_eq!(events[1].name, "two");
}

#[test]
fn batch_counts_downloads_and_skips() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("fresh.zip"), "ok").unwrap();

    let items = vec![
        CachedItem::new("fresh", dir.path().join("fresh.zip"), Some(2)),
        CachedItem::new("stale", dir.path().join("stale.zip"), Some(7)),
    ];

    let report = sync_batch(&items, |_| Ok(bytes("payload")), &mut |_| {}).unwrap();

    assert_eq!(report.total, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.downloaded, 1);
}
