use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const YOUTUBE_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Candidates requested from the search endpoint before caption filtering
const SEARCH_CANDIDATES: &str = "10";
/// Returned result ceiling after filtering
const MAX_RESULTS: usize = 5;

/// A search hit confirmed to carry captions
#[derive(Debug, Clone, Serialize)]
pub struct VideoSearchResult {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub channel_title: String,
    pub published_at: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    #[serde(default)]
    items: Vec<DetailsItem>,
}

#[derive(Debug, Deserialize)]
struct DetailsItem {
    id: String,
    #[serde(rename = "contentDetails")]
    content_details: ContentDetails,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    // The API reports this flag as the string "true"/"false"
    #[serde(default)]
    caption: String,
}

#[derive(Debug, Default, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnails: Thumbnails,
    #[serde(rename = "channelTitle", default)]
    channel_title: String,
    #[serde(rename = "publishedAt", default)]
    published_at: String,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    medium: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

/// Keyword search filtered to videos whose caption flag is true
pub struct SearchClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SearchClient {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: YOUTUBE_API_BASE_URL.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Return up to 5 videos matching the query that are confirmed to carry
    /// captions, in search ranking order. An empty result set is a valid
    /// outcome, not an error.
    pub async fn search_captioned(&self, query: &str) -> Result<Vec<VideoSearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::MissingQuery);
        }

        debug!("Searching for captioned videos: {query}");

        let search: SearchResponse = self
            .get(
                "search",
                &[
                    ("part", "snippet"),
                    ("type", "video"),
                    ("q", query),
                    ("maxResults", SEARCH_CANDIDATES),
                ],
            )
            .await?;

        let ranked_ids: Vec<String> = search
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect();

        if ranked_ids.is_empty() {
            return Ok(Vec::new());
        }

        let details: DetailsResponse = self
            .get(
                "videos",
                &[
                    ("part", "contentDetails,snippet"),
                    ("id", &ranked_ids.join(",")),
                ],
            )
            .await?;

        let results = filter_captioned(&ranked_ids, details.items);
        debug!("{} of {} candidates carry captions", results.len(), ranked_ids.len());

        Ok(results)
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        let resp = self
            .client
            .get(format!("{}/{path}", self.base_url))
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Error::Upstream(format!("YouTube API error: {}", resp.status())));
        }

        Ok(resp.json().await?)
    }
}

/// Keep only candidates whose caption flag is literally "true", preserving
/// the search ranking order, truncated to [`MAX_RESULTS`].
fn filter_captioned(ranked_ids: &[String], details: Vec<DetailsItem>) -> Vec<VideoSearchResult> {
    let mut captioned: HashMap<String, DetailsItem> = details
        .into_iter()
        .filter(|d| d.content_details.caption == "true")
        .map(|d| (d.id.clone(), d))
        .collect();

    ranked_ids
        .iter()
        .filter_map(|id| captioned.remove(id))
        .map(|d| VideoSearchResult {
            url: format!("https://www.youtube.com/watch?v={}", d.id),
            id: d.id,
            title: d.snippet.title,
            description: d.snippet.description,
            thumbnail_url: d.snippet.thumbnails.medium.map(|t| t.url).unwrap_or_default(),
            channel_title: d.snippet.channel_title,
            published_at: d.snippet.published_at,
        })
        .take(MAX_RESULTS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(id: &str, caption: &str, title: &str) -> DetailsItem {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "contentDetails": { "caption": caption },
            "snippet": {
                "title": title,
                "description": format!("about {title}"),
                "thumbnails": { "medium": { "url": format!("https://i.ytimg.com/vi/{id}/mqdefault.jpg") } },
                "channelTitle": "Test Channel",
                "publishedAt": "2024-01-01T00:00:00Z"
            }
        }))
        .unwrap()
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_filter_keeps_only_captioned() {
        let ranked = ids(&["a", "b", "c"]);
        let details = vec![
            detail("a", "true", "first"),
            detail("b", "false", "second"),
            detail("c", "true", "third"),
        ];

        let results = filter_captioned(&ranked, details);
        let kept: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(kept, vec!["a", "c"]);
    }

    #[test]
    fn test_filter_preserves_search_ranking() {
        // Details come back in a different order than the search ranking
        let ranked = ids(&["x", "y", "z"]);
        let details = vec![
            detail("z", "true", "last"),
            detail("x", "true", "first"),
            detail("y", "true", "middle"),
        ];

        let results = filter_captioned(&ranked, details);
        let kept: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(kept, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_filter_caps_at_five() {
        let ranked: Vec<String> = (0..10).map(|i| format!("video{i:05}")).collect();
        let details: Vec<DetailsItem> = ranked.iter().map(|id| detail(id, "true", id)).collect();

        let results = filter_captioned(&ranked, details);
        assert_eq!(results.len(), 5);
        assert_eq!(results[0].id, "video00000");
        assert_eq!(results[4].id, "video00004");
    }

    #[test]
    fn test_filter_skips_candidates_without_details() {
        let ranked = ids(&["a", "b"]);
        let details = vec![detail("b", "true", "only b")];

        let results = filter_captioned(&ranked, details);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "b");
    }

    #[test]
    fn test_filter_all_uncaptioned_is_empty() {
        let ranked = ids(&["a", "b"]);
        let details = vec![detail("a", "false", "a"), detail("b", "false", "b")];
        assert!(filter_captioned(&ranked, details).is_empty());
    }

    #[test]
    fn test_result_fields_come_from_details_snippet() {
        let ranked = ids(&["abc"]);
        let results = filter_captioned(&ranked, vec![detail("abc", "true", "A Title")]);

        let r = &results[0];
        assert_eq!(r.title, "A Title");
        assert_eq!(r.url, "https://www.youtube.com/watch?v=abc");
        assert_eq!(r.thumbnail_url, "https://i.ytimg.com/vi/abc/mqdefault.jpg");
        assert_eq!(r.channel_title, "Test Channel");
        assert_eq!(r.published_at, "2024-01-01T00:00:00Z");
    }

    #[tokio::test]
    async fn test_blank_query_is_missing_query() {
        let client = SearchClient::new(reqwest::Client::new(), "key");
        let err = client.search_captioned("   ").await.unwrap_err();
        assert!(matches!(err, Error::MissingQuery));
    }
}
