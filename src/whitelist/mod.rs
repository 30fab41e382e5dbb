//! Persisted trust list.
//!
//! The whitelist is a CSV file of (domain, description) rows loaded into a
//! process-wide store. Readers take an immutable snapshot; add/remove/reload
//! build a fresh snapshot, persist it, and swap it in under a write lock, so
//! a partially updated set is never observable.

mod matcher;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error_handling::DetectError;

pub use matcher::fuzzy_match;

/// One trusted domain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WhitelistEntry {
    /// Matching key: lower-cased, trimmed, trailing slashes stripped.
    pub domain: String,
    /// Free-form note on why the domain is trusted.
    pub description: String,
}

/// An immutable view of the whitelist at one point in time.
#[derive(Debug, Default)]
pub struct WhitelistSnapshot {
    entries: Vec<WhitelistEntry>,
    domains: HashSet<String>,
}

impl WhitelistSnapshot {
    fn from_entries(entries: Vec<WhitelistEntry>) -> Self {
        let domains = entries.iter().map(|e| e.domain.clone()).collect();
        Self { entries, domains }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(&normalize_domain(domain))
    }

    /// All entries, in file order.
    pub fn entries(&self) -> &[WhitelistEntry] {
        &self.entries
    }

    /// The set of normalized domains.
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.domain.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Normalizes a domain for storage and matching.
pub fn normalize_domain(domain: &str) -> String {
    domain.trim().trim_end_matches('/').to_lowercase()
}

/// Domains seeded into a fresh whitelist file.
const DEFAULT_DOMAINS: [&str; 28] = [
    "google.com",
    "facebook.com",
    "youtube.com",
    "twitter.com",
    "github.com",
    "stackoverflow.com",
    "wikipedia.org",
    "amazon.com",
    "microsoft.com",
    "apple.com",
    "netflix.com",
    "spotify.com",
    "linkedin.com",
    "instagram.com",
    "whatsapp.com",
    "tiktok.com",
    "paypal.com",
    "ebay.com",
    "reddit.com",
    "pinterest.com",
    "wordpress.com",
    "blogspot.com",
    "medium.com",
    "quora.com",
    "shopee.com",
    "tokopedia.com",
    "bukalapak.com",
    "lazada.com",
];

/// Process-wide whitelist store backed by a CSV file.
pub struct WhitelistStore {
    path: PathBuf,
    inner: RwLock<Arc<WhitelistSnapshot>>,
}

impl WhitelistStore {
    /// Opens the store, loading the CSV file or seeding a default one when
    /// it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `DetectError::Configuration` when the file exists but cannot
    /// be read or parsed; a broken trust list must not silently become an
    /// empty one.
    pub fn open(path: &Path) -> Result<Self, DetectError> {
        let entries = if path.exists() {
            load_csv(path).map_err(|e| {
                DetectError::Configuration(format!(
                    "failed to load whitelist {}: {e}",
                    path.display()
                ))
            })?
        } else {
            log::info!(
                "Whitelist file {} not found, seeding defaults",
                path.display()
            );
            let entries: Vec<WhitelistEntry> = DEFAULT_DOMAINS
                .iter()
                .map(|d| WhitelistEntry {
                    domain: (*d).to_string(),
                    description: "Default trusted domain".to_string(),
                })
                .collect();
            save_csv(path, &entries).map_err(|e| {
                DetectError::Configuration(format!(
                    "failed to create whitelist {}: {e}",
                    path.display()
                ))
            })?;
            entries
        };

        log::info!("Loaded {} whitelist domains", entries.len());
        Ok(Self {
            path: path.to_path_buf(),
            inner: RwLock::new(Arc::new(WhitelistSnapshot::from_entries(entries))),
        })
    }

    /// The current snapshot. Cheap to clone; safe to hold across awaits.
    pub fn snapshot(&self) -> Arc<WhitelistSnapshot> {
        Arc::clone(&read_guard(&self.inner))
    }

    /// Case-insensitive membership test against the current snapshot.
    pub fn contains(&self, domain: &str) -> bool {
        self.snapshot().contains(domain)
    }

    /// Adds a domain. Returns `false` when it is already present.
    ///
    /// # Errors
    ///
    /// Returns an error when the updated file cannot be written; the
    /// in-memory set is left unchanged in that case.
    pub fn add(&self, domain: &str, description: &str) -> Result<bool> {
        let domain = normalize_domain(domain);
        if domain.is_empty() {
            anyhow::bail!("domain must not be empty");
        }

        let mut guard = write_guard(&self.inner);
        if guard.contains(&domain) {
            return Ok(false);
        }

        let mut entries = guard.entries().to_vec();
        entries.push(WhitelistEntry {
            domain: domain.clone(),
            description: description.to_string(),
        });
        save_csv(&self.path, &entries).context("failed to persist whitelist")?;
        *guard = Arc::new(WhitelistSnapshot::from_entries(entries));
        log::info!("Added {domain} to whitelist");
        Ok(true)
    }

    /// Removes a domain. Returns `false` when it was not present.
    ///
    /// # Errors
    ///
    /// Returns an error when the updated file cannot be written.
    pub fn remove(&self, domain: &str) -> Result<bool> {
        let domain = normalize_domain(domain);

        let mut guard = write_guard(&self.inner);
        if !guard.contains(&domain) {
            return Ok(false);
        }

        let entries: Vec<WhitelistEntry> = guard
            .entries()
            .iter()
            .filter(|e| e.domain != domain)
            .cloned()
            .collect();
        save_csv(&self.path, &entries).context("failed to persist whitelist")?;
        *guard = Arc::new(WhitelistSnapshot::from_entries(entries));
        log::info!("Removed {domain} from whitelist");
        Ok(true)
    }

    /// Reloads the store from disk, replacing the snapshot atomically.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read; the previous snapshot
    /// stays active.
    pub fn reload(&self) -> Result<usize> {
        let entries = load_csv(&self.path).context("failed to reload whitelist")?;
        let count = entries.len();
        let mut guard = write_guard(&self.inner);
        *guard = Arc::new(WhitelistSnapshot::from_entries(entries));
        log::info!("Reloaded {count} whitelist domains");
        Ok(count)
    }
}

fn read_guard<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_guard<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn load_csv(path: &Path) -> Result<Vec<WhitelistEntry>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("cannot open {}", path.display()))?;
    let mut entries = Vec::new();
    let mut seen = HashSet::new();
    for row in reader.deserialize() {
        let entry: WhitelistEntry = row.context("malformed whitelist row")?;
        let domain = normalize_domain(&entry.domain);
        if domain.is_empty() || !seen.insert(domain.clone()) {
            continue;
        }
        entries.push(WhitelistEntry {
            domain,
            description: entry.description,
        });
    }
    Ok(entries)
}

fn save_csv(path: &Path, entries: &[WhitelistEntry]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("cannot write {}", path.display()))?;
    for entry in entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_seeds_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("whitelist.csv");
        let store = WhitelistStore::open(&path).unwrap();
        assert!(path.exists());
        assert!(store.contains("google.com"));
        assert!(store.contains("GOOGLE.COM"));
        assert!(!store.contains("evil.example"));
    }

    #[test]
    fn test_add_normalizes_and_rejects_duplicates() {
        let dir = tempdir().unwrap();
        let store = WhitelistStore::open(&dir.path().join("wl.csv")).unwrap();

        assert!(store.add("  Example.ORG/ ", "manual").unwrap());
        assert!(store.contains("example.org"));
        // Same domain in another spelling is a duplicate
        assert!(!store.add("example.org", "again").unwrap());
    }

    #[test]
    fn test_remove_roundtrip() {
        let dir = tempdir().unwrap();
        let store = WhitelistStore::open(&dir.path().join("wl.csv")).unwrap();

        assert!(store.remove("google.com").unwrap());
        assert!(!store.contains("google.com"));
        assert!(!store.remove("google.com").unwrap());
    }

    #[test]
    fn test_changes_survive_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wl.csv");
        let store = WhitelistStore::open(&path).unwrap();
        store.add("added.example", "kept on disk").unwrap();

        let reopened = WhitelistStore::open(&path).unwrap();
        assert!(reopened.contains("added.example"));

        let count = reopened.reload().unwrap();
        assert_eq!(count, reopened.snapshot().len());
    }

    #[test]
    fn test_snapshot_is_stable_across_mutation() {
        let dir = tempdir().unwrap();
        let store = WhitelistStore::open(&dir.path().join("wl.csv")).unwrap();

        let before = store.snapshot();
        let len_before = before.len();
        store.add("new-domain.example", "x").unwrap();

        // The old snapshot is untouched; a fresh one sees the update.
        assert_eq!(before.len(), len_before);
        assert_eq!(store.snapshot().len(), len_before + 1);
    }

    #[test]
    fn test_open_rejects_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.csv");
        std::fs::write(&path, "domain,description\n\"unterminated\n").unwrap();
        assert!(WhitelistStore::open(&path).is_err());
    }
}
