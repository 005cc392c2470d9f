//! FLV engine tuning knobs.

use serde::{Deserialize, Serialize};

/// Configuration handed to the FLV engine factory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlvConfig {
    /// Allow cross-origin media requests.
    pub cors: bool,
    /// Treat the source as a live stream.
    pub is_live: bool,
    /// Run demuxing on a worker.
    pub enable_worker: bool,
    /// Buffer incoming data in a stash before demuxing.
    pub enable_stash_buffer: bool,
    /// Initial stash size in bytes; `None` lets the engine decide.
    pub stash_initial_size: Option<u32>,
    /// Only load data around the playback position.
    pub lazy_load: bool,
    /// How far ahead lazy loading keeps, in seconds.
    pub lazy_load_max_duration: u32,
    /// Defer loading until the media source is open.
    pub defer_load_after_source_open: bool,
    /// Interval between statistics reports, in milliseconds.
    pub statistics_report_interval_ms: u64,
}

impl Default for FlvConfig {
    fn default() -> Self {
        Self {
            cors: true,
            is_live: false,
            enable_worker: false,
            enable_stash_buffer: true,
            stash_initial_size: None,
            lazy_load: true,
            lazy_load_max_duration: 3 * 60,
            defer_load_after_source_open: true,
            statistics_report_interval_ms: 600,
        }
    }
}
