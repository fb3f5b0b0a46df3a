use crate::search::VideoSearchResult;

/// Render search results as readable text, one block per video
pub fn render_results_text(results: &[VideoSearchResult]) -> String {
    if results.is_empty() {
        return "No captioned videos found".to_string();
    }

    results
        .iter()
        .map(|r| {
            format!(
                "{}\n  {}\n  {} | {}",
                r.title, r.url, r.channel_title, r.published_at
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn render_results_json(results: &[VideoSearchResult]) -> String {
    serde_json::to_string_pretty(results).unwrap_or_else(|_| "[]".to_string())
}
