//! HLS engine tuning knobs.
//!
//! Field names and defaults follow the conventional HLS client settings so
//! host configuration files translate directly.

use serde::{Deserialize, Serialize};

/// Configuration handed to the HLS engine factory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HlsConfig {
    /// Start loading segments as soon as the manifest is parsed.
    pub auto_start_load: bool,
    /// Initial playback position in seconds; `-1.0` means "default".
    pub start_position: f64,
    /// Forward buffer target, in seconds.
    pub max_buffer_length: u32,
    /// Hard cap on the forward buffer, in seconds.
    pub max_max_buffer_length: u32,
    /// Forward buffer cap, in bytes.
    pub max_buffer_size: u64,
    /// Largest buffer gap playback will jump over, in seconds.
    pub max_buffer_hole: f64,
    /// Live edge distance, in target durations.
    pub live_sync_duration_count: u32,
    /// Maximum live latency, in target durations.
    pub live_max_latency_duration_count: u32,
    /// Run demuxing on a worker.
    pub enable_worker: bool,
    /// Manifest request timeout, in milliseconds.
    pub manifest_loading_timeout_ms: u64,
    /// Manifest request retry budget.
    pub manifest_loading_max_retry: u32,
    /// Level playlist request timeout, in milliseconds.
    pub level_loading_timeout_ms: u64,
    /// Fragment request timeout, in milliseconds.
    pub frag_loading_timeout_ms: u64,
    /// Fragment request retry budget.
    pub frag_loading_max_retry: u32,
}

impl Default for HlsConfig {
    fn default() -> Self {
        Self {
            auto_start_load: true,
            start_position: -1.0,
            max_buffer_length: 30,
            max_max_buffer_length: 600,
            max_buffer_size: 60 * 1000 * 1000,
            max_buffer_hole: 0.5,
            live_sync_duration_count: 3,
            live_max_latency_duration_count: 10,
            enable_worker: true,
            manifest_loading_timeout_ms: 10_000,
            manifest_loading_max_retry: 6,
            level_loading_timeout_ms: 10_000,
            frag_loading_timeout_ms: 20_000,
            frag_loading_max_retry: 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_streaming_friendly() {
        let config = HlsConfig::default();
        assert!(config.auto_start_load);
        assert_eq!(config.start_position, -1.0);
        assert_eq!(config.max_buffer_length, 30);
        assert_eq!(config.live_sync_duration_count, 3);
    }

    #[test]
    fn partial_json_overrides_merge_with_defaults() {
        let config: HlsConfig =
            serde_json::from_str(r#"{"max_buffer_length": 60, "enable_worker": false}"#).unwrap();
        assert_eq!(config.max_buffer_length, 60);
        assert!(!config.enable_worker);
        assert_eq!(config.frag_loading_timeout_ms, 20_000);
    }
}
