//! One-shot entrance animation gate.
//!
//! Regions start hidden and switch to revealed the first time they intersect
//! the viewport with a ratio at or above the threshold. The set of revealed regions only grows.
//! Notifications arrive through an [`Observation`] handle; once the handle is
//! dropped or disconnected further notifications are ignored.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Minimum intersection ratio that counts as "entered the viewport"
pub const DEFAULT_THRESHOLD: f32 = 0.1;

/// Region ids of the portfolio page, top to bottom
pub const PAGE_SECTIONS: [&str; 4] = ["home", "portfolio", "about", "contact"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Revealed,
}

/// A single intersection report for one region
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    pub region: String,
    pub ratio: f32,
}

impl IntersectionEntry {
    pub fn new(region: impl Into<String>, ratio: f32) -> Self {
        Self {
            region: region.into(),
            ratio,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VisibilityTracker {
    threshold: f32,
    revealed: Arc<Mutex<BTreeSet<String>>>,
}

impl VisibilityTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            revealed: Arc::new(Mutex::new(BTreeSet::new())),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Start observing `regions`. Keep the returned handle alive for as long
    /// as the owning view exists.
    pub fn observe<I, S>(&self, regions: I) -> Observation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Observation {
            regions: regions.into_iter().map(Into::into).collect(),
            threshold: self.threshold,
            revealed: self.revealed.clone(),
            connected: AtomicBool::new(true),
        }
    }

    pub fn is_revealed(&self, region: &str) -> bool {
        self.revealed
            .lock()
            .map(|set| set.contains(region))
            .unwrap_or(false)
    }

    pub fn reveal_state(&self, region: &str) -> RevealState {
        if self.is_revealed(region) {
            RevealState::Revealed
        } else {
            RevealState::Hidden
        }
    }

    /// Revealed region ids in sorted order.
    pub fn revealed(&self) -> Vec<String> {
        self.revealed
            .lock()
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for VisibilityTracker {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

/// Live subscription to intersection reports for a fixed set of regions
#[derive(Debug)]
pub struct Observation {
    regions: BTreeSet<String>,
    threshold: f32,
    revealed: Arc<Mutex<BTreeSet<String>>>,
    connected: AtomicBool,
}

impl Observation {
    /// Feed intersection reports; returns the regions newly revealed by them.
    pub fn notify(&self, entries: &[IntersectionEntry]) -> Vec<String> {
        if !self.is_connected() {
            return Vec::new();
        }
        let Ok(mut set) = self.revealed.lock() else {
            return Vec::new();
        };

        let mut newly = Vec::new();
        for entry in entries {
            let entered = entry.ratio > 0.0 && entry.ratio >= self.threshold;
            if !entered || !self.regions.contains(&entry.region) {
                continue;
            }
            if set.insert(entry.region.clone()) {
                log::debug!("section '{}' revealed", entry.region);
                newly.push(entry.region.clone());
            }
        }
        newly
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }
}

impl Drop for Observation {
    fn drop(&mut self) {
        self.disconnect();
    }
}
