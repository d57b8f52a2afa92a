//! Parent-chain dependency resolution

use std::collections::HashSet;

use crate::entry::Catalog;

/// Expand `name` into its full required-content chain: the workload itself,
/// then its ancestors in order.
///
/// The walk stops at an empty or absent parent, a parent missing from the
/// catalog, or a revisited name. A cycle in malformed catalog data is a
/// termination condition, not an error.
pub fn required_chain(catalog: &Catalog, name: &str) -> Vec<String> {
    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut current = name.to_string();

    loop {
        if !seen.insert(current.clone()) {
            break;
        }
        chain.push(current.clone());

        let parent = match catalog.get(&current).and_then(|e| e.parent.as_deref()) {
            Some(p) if !p.trim().is_empty() => p.to_string(),
            _ => break,
        };
        if !catalog.contains(&parent) {
            break;
        }
        current = parent;
    }

    chain
}

/// The members of `chain` not present in `available`, in chain order.
pub fn missing_from(chain: &[String], available: &HashSet<String>) -> Vec<String> {
    chain
        .iter()
        .filter(|name| !available.contains(name.as_str()))
        .cloned()
        .collect()
}

/// A workload is launchable when its own archive is available and nothing in
/// its required chain is missing.
pub fn is_launchable(catalog: &Catalog, name: &str, available: &HashSet<String>) -> bool {
    let chain = required_chain(catalog, name);
    missing_from(&chain, available).is_empty() && available.contains(name)
}

/// Per-workload launchability, with the requirement summary the list UI
/// renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadStatus {
    pub name: String,
    pub display_name: String,
    pub launchable: bool,
    pub summary: String,
}

/// Compute the status of every catalog entry against the available archive
/// set, sorted launchable-first and then by display name.
pub fn workload_status(catalog: &Catalog, available: &HashSet<String>) -> Vec<WorkloadStatus> {
    let mut statuses: Vec<WorkloadStatus> = catalog
        .entries()
        .map(|entry| {
            let chain = required_chain(catalog, &entry.name);
            let missing = missing_from(&chain, available);
            let launchable = missing.is_empty() && available.contains(&entry.name);
            let summary = if missing.is_empty() {
                if chain.len() == 1 {
                    format!("{}.zip found", entry.name)
                } else {
                    format!("needs {}", join_archives(&chain))
                }
            } else {
                format!("missing {}", join_archives(&missing))
            };
            WorkloadStatus {
                name: entry.name.clone(),
                display_name: entry.display_name.clone(),
                launchable,
                summary,
            }
        })
        .collect();

    statuses.sort_by(|a, b| {
        b.launchable
            .cmp(&a.launchable)
            .then_with(|| a.display_name.cmp(&b.display_name))
    });
    statuses
}

fn join_archives(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("{n}.zip"))
        .collect::<Vec<_>>()
        .join(" + ")
}
