//! # The Uniform Adapter Surface
//!
//! [`RendererAdapter`] is the contract every backend implements so the
//! facade can treat native playback, streaming engines, and remote views
//! interchangeably. The property set mirrors the standard media element
//! surface; the operation set is deliberately explicit — one method per
//! property write and playback command — so adapters stay type-checked
//! instead of dispatching on property names at runtime.
//!
//! Reads are synchronous (adapters answer from their property cache);
//! writes and playback commands are async because a backend may still be
//! initializing, in which case the adapter queues them as [`PropertyWrite`] /
//! [`MediaMethod`] records (see [`crate::pending`]).

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A property assignment an adapter can receive before its backend is ready.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyWrite {
    Src(String),
    CurrentTime(f64),
    Volume(f64),
    Muted(bool),
}

/// A playback command an adapter can receive before its backend is ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaMethod {
    Play,
    Pause,
    Load,
    Stop,
}

/// Buffered time ranges, in seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeRanges(Vec<(f64, f64)>);

impl TimeRanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `(start, end)` range, merging with the previous range when
    /// they touch or overlap.
    pub fn add(&mut self, start: f64, end: f64) {
        if let Some(last) = self.0.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                return;
            }
        }
        self.0.push((start, end));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn start(&self, index: usize) -> Option<f64> {
        self.0.get(index).map(|range| range.0)
    }

    pub fn end(&self, index: usize) -> Option<f64> {
        self.0.get(index).map(|range| range.1)
    }

    /// End of the furthest buffered range, or `0.0` when nothing is buffered.
    pub fn last_end(&self) -> f64 {
        self.0.last().map(|range| range.1).unwrap_or(0.0)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.0.iter().copied()
    }
}

/// The uniform surface every renderer backend exposes to the facade.
///
/// ## Contract
///
/// - Reads answer from the adapter's property cache and never block.
/// - Writes and commands issued before the backend is ready are queued and
///   applied exactly once, in issue order, when the backend signals
///   readiness — strictly before any operation issued afterwards.
/// - [`hide`](Self::hide) pauses playback before hiding the surface.
/// - [`stop`](Self::stop) is optional; the default implementation is a
///   no-op for backends without a stop concept.
#[async_trait]
pub trait RendererAdapter: Send + Sync {
    /// Registered renderer name (e.g. `"native_hls"`).
    fn name(&self) -> &str;

    // Property reads.
    fn src(&self) -> Option<String>;
    fn current_time(&self) -> f64;
    fn duration(&self) -> Option<f64>;
    fn volume(&self) -> f64;
    fn muted(&self) -> bool;
    fn paused(&self) -> bool;
    fn ended(&self) -> bool;
    fn buffered(&self) -> TimeRanges;

    // Property writes.
    async fn set_src(&self, value: String) -> Result<()>;
    async fn set_current_time(&self, value: f64) -> Result<()>;
    async fn set_volume(&self, value: f64) -> Result<()>;
    async fn set_muted(&self, value: bool) -> Result<()>;

    // Playback commands.
    async fn play(&self) -> Result<()>;
    async fn pause(&self) -> Result<()>;
    async fn load(&self) -> Result<()>;
    async fn stop(&self) -> Result<()> {
        Ok(())
    }

    // Lifecycle.
    fn show(&self);
    async fn hide(&self) -> Result<()>;
    fn set_size(&self, width: u32, height: u32);
    async fn destroy(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_ranges_merge_touching_segments() {
        let mut ranges = TimeRanges::new();
        ranges.add(0.0, 4.0);
        ranges.add(4.0, 10.0);
        ranges.add(15.0, 20.0);

        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges.start(0), Some(0.0));
        assert_eq!(ranges.end(0), Some(10.0));
        assert_eq!(ranges.last_end(), 20.0);
    }

    #[test]
    fn overlapping_range_does_not_shrink() {
        let mut ranges = TimeRanges::new();
        ranges.add(0.0, 10.0);
        ranges.add(2.0, 5.0);

        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges.end(0), Some(10.0));
    }

    #[test]
    fn empty_ranges_report_zero_end() {
        let ranges = TimeRanges::new();
        assert!(ranges.is_empty());
        assert_eq!(ranges.last_end(), 0.0);
        assert_eq!(ranges.start(0), None);
    }
}
