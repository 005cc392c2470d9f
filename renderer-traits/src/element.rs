//! # Element Property Cache
//!
//! [`ElementState`] stands in for the media surface a backend drives: the
//! facade owns one for its original element, and each backend adapter owns
//! one as its local working copy. Reads never touch the backend — adapters
//! keep the cache current from backend events and answer property reads
//! from it synchronously.

use crate::adapter::TimeRanges;
use parking_lot::RwLock;

/// Shared mutable property cell for one media surface.
#[derive(Debug)]
pub struct ElementState {
    src: RwLock<Option<String>>,
    current_time: RwLock<f64>,
    duration: RwLock<Option<f64>>,
    volume: RwLock<f64>,
    muted: RwLock<bool>,
    paused: RwLock<bool>,
    ended: RwLock<bool>,
    buffered: RwLock<TimeRanges>,
    visible: RwLock<bool>,
    size: RwLock<Option<(u32, u32)>>,
}

impl ElementState {
    pub fn new() -> Self {
        Self {
            src: RwLock::new(None),
            current_time: RwLock::new(0.0),
            duration: RwLock::new(None),
            volume: RwLock::new(1.0),
            muted: RwLock::new(false),
            paused: RwLock::new(true),
            ended: RwLock::new(false),
            buffered: RwLock::new(TimeRanges::new()),
            visible: RwLock::new(true),
            size: RwLock::new(None),
        }
    }

    pub fn src(&self) -> Option<String> {
        self.src.read().clone()
    }

    pub fn set_src(&self, src: Option<String>) {
        *self.src.write() = src;
    }

    pub fn current_time(&self) -> f64 {
        *self.current_time.read()
    }

    pub fn set_current_time(&self, value: f64) {
        *self.current_time.write() = value.max(0.0);
    }

    pub fn duration(&self) -> Option<f64> {
        *self.duration.read()
    }

    pub fn set_duration(&self, value: Option<f64>) {
        *self.duration.write() = value;
    }

    pub fn volume(&self) -> f64 {
        *self.volume.read()
    }

    pub fn set_volume(&self, value: f64) {
        *self.volume.write() = value.clamp(0.0, 1.0);
    }

    pub fn muted(&self) -> bool {
        *self.muted.read()
    }

    pub fn set_muted(&self, value: bool) {
        *self.muted.write() = value;
    }

    pub fn paused(&self) -> bool {
        *self.paused.read()
    }

    pub fn set_paused(&self, value: bool) {
        *self.paused.write() = value;
    }

    pub fn ended(&self) -> bool {
        *self.ended.read()
    }

    pub fn set_ended(&self, value: bool) {
        *self.ended.write() = value;
    }

    pub fn buffered(&self) -> TimeRanges {
        self.buffered.read().clone()
    }

    pub fn add_buffered(&self, start: f64, end: f64) {
        self.buffered.write().add(start, end);
    }

    pub fn visible(&self) -> bool {
        *self.visible.read()
    }

    pub fn set_visible(&self, value: bool) {
        *self.visible.write() = value;
    }

    pub fn size(&self) -> Option<(u32, u32)> {
        *self.size.read()
    }

    pub fn set_size(&self, width: u32, height: u32) {
        *self.size.write() = Some((width, height));
    }

    /// Reset playback progress, keeping src, volume, and visibility.
    pub fn reset_playback(&self) {
        *self.current_time.write() = 0.0;
        *self.duration.write() = None;
        *self.ended.write() = false;
        *self.paused.write() = true;
        self.buffered.write().clear();
    }
}

impl Default for ElementState {
    fn default() -> Self {
        Self::new()
    }
}
