//! DASH engine tuning knobs.

use serde::{Deserialize, Serialize};

/// Configuration handed to the DASH engine factory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Replace buffered segments when switching to a better quality.
    pub fast_switch_enabled: bool,
    /// Let the engine pick quality levels automatically.
    pub auto_switch_bitrate: bool,
    /// Buffer target during stable playback, in seconds.
    pub stable_buffer_time: f64,
    /// Buffer target once the top quality is reached, in seconds.
    pub buffer_time_at_top_quality: f64,
    /// Distance from the live edge, in fragments.
    pub live_delay_fragment_count: u32,
    /// Explicit live delay in seconds; overrides the fragment count.
    pub live_delay: Option<f64>,
    /// Manifest request retry budget.
    pub manifest_retry_attempts: u32,
    /// Fragment request retry budget.
    pub fragment_retry_attempts: u32,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            fast_switch_enabled: true,
            auto_switch_bitrate: true,
            stable_buffer_time: 12.0,
            buffer_time_at_top_quality: 30.0,
            live_delay_fragment_count: 4,
            live_delay: None,
            manifest_retry_attempts: 3,
            fragment_retry_attempts: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_adaptive_switching() {
        let config = DashConfig::default();
        assert!(config.fast_switch_enabled);
        assert!(config.auto_switch_bitrate);
        assert_eq!(config.live_delay, None);
    }

    #[test]
    fn partial_json_overrides_merge_with_defaults() {
        let config: DashConfig =
            serde_json::from_str(r#"{"live_delay": 8.0, "auto_switch_bitrate": false}"#).unwrap();
        assert_eq!(config.live_delay, Some(8.0));
        assert!(!config.auto_switch_bitrate);
        assert_eq!(config.stable_buffer_time, 12.0);
    }
}
