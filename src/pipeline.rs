use log::{debug, warn};

use crate::error::{Error, Result};
use crate::sources::{CaptionSource, InnertubeSource, TranscriptApiSource};
use crate::{canonicalize_url, extract_video_id};

/// Ordered-fallback transcript acquisition.
///
/// Sources are tried strictly sequentially; an attempt's failure is isolated
/// and the next source runs against the same video ID. The first source to
/// yield non-empty text wins. No retries, no caching.
pub struct TranscriptPipeline {
    sources: Vec<Box<dyn CaptionSource>>,
}

impl TranscriptPipeline {
    /// Fixed priority order: library-based loader first, InnerTube caption
    /// fetch second.
    pub fn new(client: reqwest::Client, lang: &str) -> Self {
        Self::with_sources(vec![
            Box::new(TranscriptApiSource::new(lang)),
            Box::new(InnertubeSource::new(client, lang)),
        ])
    }

    pub fn with_sources(sources: Vec<Box<dyn CaptionSource>>) -> Self {
        Self { sources }
    }

    pub async fn fetch(&self, url: &str) -> Result<String> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::MissingInput);
        }

        let canonical = canonicalize_url(url);
        let video_id =
            extract_video_id(&canonical).ok_or_else(|| Error::InvalidUrl(url.to_string()))?;

        let mut captions_absent = false;
        let mut last_message = "no transcript sources configured".to_string();

        for source in &self.sources {
            debug!("Trying source {} for {video_id}", source.name());
            match source.fetch(&video_id).await {
                Ok(text) if !text.trim().is_empty() => {
                    debug!("Source {} returned {} chars", source.name(), text.len());
                    return Ok(text);
                }
                Ok(_) => {
                    // An empty transcript means the video has no usable captions
                    warn!("Source {} returned an empty transcript for {video_id}", source.name());
                    captions_absent = true;
                    last_message = format!("{}: empty transcript", source.name());
                }
                Err(e) => {
                    warn!("Source {} failed for {video_id}: {e}", source.name());
                    if matches!(e, Error::NoTranscriptAvailable(_)) {
                        captions_absent = true;
                    }
                    last_message = e.to_string();
                }
            }
        }

        if captions_absent {
            Err(Error::NoTranscriptAvailable(video_id))
        } else {
            Err(Error::TranscriptFetchFailed(last_message))
        }
    }
}
