//! # Media Sources and Type Utilities
//!
//! A [`MediaSource`] pairs a URL with a MIME type. Hosts rarely supply the
//! type explicitly, so the utilities here derive one from the URL structure:
//! streaming formats are recognized by their well-known extensions, and
//! everything else splits into `video/*` or `audio/*` by container
//! extension. Codec suffixes (`video/mp4; codecs="avc1..."`) are kept on the
//! source but stripped before capability matching.

use crate::error::{RendererError, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// One candidate media source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSource {
    /// Source URL (absolute once normalized by the facade).
    pub src: String,
    /// MIME type, possibly carrying a codec suffix.
    #[serde(rename = "type")]
    pub mime: String,
}

impl MediaSource {
    /// Create a source with an explicit MIME type. An empty type is replaced
    /// by one derived from the URL.
    pub fn new(src: impl Into<String>, mime: impl Into<String>) -> Self {
        let src = src.into();
        let mime = mime.into();
        let mime = if mime.is_empty() && !src.is_empty() {
            type_from_url(&src)
        } else {
            mime
        };
        Self { src, mime }
    }

    /// Create a source deriving the MIME type from the URL.
    pub fn from_url(src: impl Into<String>) -> Self {
        Self::new(src, "")
    }

    /// MIME type with any codec suffix stripped, for capability matching.
    pub fn bare_mime(&self) -> &str {
        mime_from_type(&self.mime)
    }
}

// ============================================================================
// MIME / extension helpers
// ============================================================================

/// Return the mime part of a type that may carry a codec suffix
/// (`video/mp4; codecs="avc1.42E01E"` becomes `video/mp4`).
pub fn mime_from_type(mime: &str) -> &str {
    match mime.find(';') {
        Some(index) => mime[..index].trim_end(),
        None => mime,
    }
}

/// Media file extension of a URL, with any query string ignored.
pub fn extension(url: &str) -> &str {
    let base = url.split('?').next().unwrap_or("");
    match base.rfind('.') {
        Some(index) => &base[index + 1..],
        None => "",
    }
}

/// Collapse container variants onto their canonical extension.
pub fn normalize_extension(ext: &str) -> &str {
    match ext {
        "mp4" | "m4v" => "mp4",
        "webm" | "webma" | "webmv" => "webm",
        "ogg" | "oga" | "ogv" => "ogg",
        other => other,
    }
}

const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "m4v", "ogg", "ogv", "webm", "webmv", "flv", "wmv", "mpeg", "mov",
];

/// Derive a MIME type from a URL.
///
/// Streaming formats are matched first by extension; everything else is
/// classified as `video/*` or `audio/*` by its container extension.
pub fn type_from_url(url: &str) -> String {
    let ext = extension(url).to_ascii_lowercase();

    match ext.as_str() {
        "m3u8" => return "application/x-mpegURL".to_string(),
        "mpd" => return "application/dash+xml".to_string(),
        "flv" => return "video/x-flv".to_string(),
        _ => {}
    }

    let kind = if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        "video"
    } else {
        "audio"
    };
    format!("{kind}/{}", normalize_extension(&ext))
}

/// Case-insensitive membership test against a backend's supported MIME list.
pub fn mime_matches(supported: &[&str], mime: &str) -> bool {
    supported.iter().any(|entry| entry.eq_ignore_ascii_case(mime))
}

/// Resolve `src` against `base` when it is not already absolute. Sources
/// that parse as absolute URLs (or when no base is configured) pass through
/// unchanged.
pub fn absolutize(src: &str, base: Option<&Url>) -> String {
    if src.is_empty() || Url::parse(src).is_ok() {
        return src.to_string();
    }
    match base {
        Some(base) => base
            .join(src)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| src.to_string()),
        None => src.to_string(),
    }
}

// ============================================================================
// Time codes
// ============================================================================

/// Format a time in seconds as `mm:ss`, or `hh:mm:ss` when the time reaches
/// an hour or `force_hours` is set.
pub fn seconds_to_time_code(time: f64, force_hours: bool) -> String {
    let time = if time.is_finite() && time > 0.0 {
        time
    } else {
        0.0
    };
    let total = time.floor() as u64;
    let hours = (total / 3600) % 24;
    let minutes = (total / 60) % 60;
    let seconds = total % 60;

    if force_hours || hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Parse a `hh:mm:ss`, `mm:ss`, or `ss` time code into seconds.
///
/// # Errors
///
/// Returns [`RendererError::InvalidTimeCode`] for anything that is not a
/// colon-separated list of numbers.
pub fn time_code_to_seconds(time: &str) -> Result<f64> {
    let parts: Vec<&str> = time.split(':').collect();
    if parts.is_empty() || parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
        return Err(RendererError::InvalidTimeCode(time.to_string()));
    }

    let mut seconds = 0.0;
    for part in &parts {
        let value: f64 = part
            .parse()
            .map_err(|_| RendererError::InvalidTimeCode(time.to_string()))?;
        seconds = seconds * 60.0 + value;
    }
    Ok(seconds)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_ignores_query_strings() {
        assert_eq!(extension("https://cdn.example.com/a/movie.mp4?token=x"), "mp4");
        assert_eq!(extension("stream.m3u8"), "m3u8");
        assert_eq!(extension("no-extension"), "");
    }

    #[test]
    fn extension_normalization_collapses_variants() {
        assert_eq!(normalize_extension("m4v"), "mp4");
        assert_eq!(normalize_extension("webmv"), "webm");
        assert_eq!(normalize_extension("oga"), "ogg");
        assert_eq!(normalize_extension("wav"), "wav");
    }

    #[test]
    fn codec_suffixes_are_stripped() {
        assert_eq!(
            mime_from_type("video/mp4; codecs=\"avc1.42E01E, mp4a.40.2\""),
            "video/mp4"
        );
        assert_eq!(mime_from_type("video/mp4"), "video/mp4");
        assert_eq!(mime_from_type(""), "");
    }

    #[test]
    fn streaming_extensions_map_to_streaming_types() {
        assert_eq!(type_from_url("live/stream.m3u8"), "application/x-mpegURL");
        assert_eq!(type_from_url("vod/manifest.mpd"), "application/dash+xml");
        assert_eq!(type_from_url("clip.flv"), "video/x-flv");
    }

    #[test]
    fn container_extensions_split_audio_and_video() {
        assert_eq!(type_from_url("movie.mp4"), "video/mp4");
        assert_eq!(type_from_url("movie.M4V"), "video/mp4");
        assert_eq!(type_from_url("clip.webm"), "video/webm");
        assert_eq!(type_from_url("song.mp3"), "audio/mp3");
        assert_eq!(type_from_url("note.oga"), "audio/ogg");
    }

    #[test]
    fn source_with_empty_type_derives_one() {
        let source = MediaSource::new("video.mp4", "");
        assert_eq!(source.mime, "video/mp4");

        let explicit = MediaSource::new("video.mp4", "video/mp4; codecs=\"avc1\"");
        assert_eq!(explicit.mime, "video/mp4; codecs=\"avc1\"");
        assert_eq!(explicit.bare_mime(), "video/mp4");
    }

    #[test]
    fn mime_matching_is_case_insensitive() {
        let supported = &["application/x-mpegurl", "video/hls"];
        assert!(mime_matches(supported, "application/x-mpegURL"));
        assert!(mime_matches(supported, "VIDEO/HLS"));
        assert!(!mime_matches(supported, "video/mp4"));
    }

    #[test]
    fn absolutize_uses_the_base_for_relative_sources() {
        let base = Url::parse("https://media.example.com/library/").unwrap();
        assert_eq!(
            absolutize("videos/a.mp4", Some(&base)),
            "https://media.example.com/library/videos/a.mp4"
        );
        assert_eq!(
            absolutize("https://other.example.com/b.mp4", Some(&base)),
            "https://other.example.com/b.mp4"
        );
        assert_eq!(absolutize("videos/a.mp4", None), "videos/a.mp4");
        assert_eq!(absolutize("", Some(&base)), "");
    }

    #[test]
    fn time_codes_format_and_parse() {
        assert_eq!(seconds_to_time_code(36.0, false), "00:36");
        assert_eq!(seconds_to_time_code(70.0, false), "01:10");
        assert_eq!(seconds_to_time_code(3661.5, false), "01:01:01");
        assert_eq!(seconds_to_time_code(36.0, true), "00:00:36");
        assert_eq!(seconds_to_time_code(-5.0, false), "00:00");

        assert_eq!(time_code_to_seconds("00:36").unwrap(), 36.0);
        assert_eq!(time_code_to_seconds("01:01:01").unwrap(), 3661.0);
        assert_eq!(time_code_to_seconds("90").unwrap(), 90.0);
        assert!(time_code_to_seconds("1:2:3:4").is_err());
        assert!(time_code_to_seconds("not-a-time").is_err());
    }

    #[test]
    fn source_serde_uses_the_type_field_name() {
        let source = MediaSource::new("movie.mp4", "video/mp4");
        let json = serde_json::to_string(&source).unwrap();
        assert!(json.contains("\"type\":\"video/mp4\""));

        let back: MediaSource = serde_json::from_str(&json).unwrap();
        assert_eq!(back, source);
    }
}
