//! Bounded in-memory log of recent detections.

use std::collections::VecDeque;
use std::sync::RwLock;

use serde::Serialize;

use super::DetectionResult;

/// One line of detection history.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    /// The queried URL.
    pub url: String,
    /// Safe percentage at detection time.
    pub safe_percentage: f64,
    /// Phishing percentage at detection time.
    pub phishing_percentage: f64,
    /// Detection time, `YYYY-MM-DD HH:MM` UTC.
    pub timestamp: String,
}

/// Ring buffer of the most recent detections, newest first on read.
pub struct HistoryLog {
    entries: RwLock<VecDeque<HistoryEntry>>,
    capacity: usize,
}

impl HistoryLog {
    /// Creates a log holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Records a detection, evicting the oldest entry when full.
    pub fn record(&self, result: &DetectionResult) {
        let entry = HistoryEntry {
            url: result.url.clone(),
            safe_percentage: result.safe_percentage,
            phishing_percentage: result.phishing_percentage,
            timestamp: chrono::Utc::now().format("%Y-%m-%d %H:%M").to_string(),
        };
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// The recorded entries, newest first.
    pub fn recent(&self) -> Vec<HistoryEntry> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.iter().rev().cloned().collect()
    }
}
