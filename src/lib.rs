pub mod completions;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod search;
pub mod sources;

pub use error::{Error, Result};

const VIDEO_ID_PATTERNS: &[&str] = &[
    r"(?:youtube\.com/watch\?.*v=)([a-zA-Z0-9_-]{11})",
    r"youtu\.be/([a-zA-Z0-9_-]{11})",
    r"youtube\.com/embed/([a-zA-Z0-9_-]{11})",
    r"youtube\.com/shorts/([a-zA-Z0-9_-]{11})",
];

/// Extract the 11-character video ID from a YouTube URL or bare ID
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();

    if regex::Regex::new(r"^[a-zA-Z0-9_-]{11}$").unwrap().is_match(input) {
        return Some(input.to_string());
    }

    for pattern in VIDEO_ID_PATTERNS {
        if let Some(caps) = regex::Regex::new(pattern).unwrap().captures(input) {
            return Some(caps[1].to_string());
        }
    }

    None
}

/// Canonical `watch?v=<id>` form of a video URL.
///
/// Inputs with no recognizable video ID pass through unchanged; callers that
/// require an ID must treat [`extract_video_id`] returning `None` as fatal.
pub fn canonicalize_url(input: &str) -> String {
    match extract_video_id(input) {
        Some(id) => format!("https://www.youtube.com/watch?v={id}"),
        None => input.to_string(),
    }
}
