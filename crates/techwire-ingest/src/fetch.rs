//! Fetch stage: pull candidate stories from NewsAPI.

use techwire_newsapi::{Article, EverythingParams, NewsApiClient};

use crate::filter::matches_topic;
use crate::types::CandidateStory;

/// Broad keyword-OR query covering common computer-tech terms. The domain
/// allow-list below and [`matches_topic`] keep the results on topic.
const TECH_QUERY: &str =
    "AI OR computer OR programming OR cybersecurity OR GPU OR CPU OR chip OR \"game development\"";

/// Technology-focused publisher domains; stories from anywhere else are
/// never requested.
const TECH_DOMAINS: &str = "techcrunch.com,theverge.com,wired.com,arstechnica.com,engadget.com,\
                            thenextweb.com,venturebeat.com,gizmodo.com,tomshardware.com,\
                            anandtech.com,bleepingcomputer.com,darkreading.com,zdnet.com,\
                            cnet.com,makeuseof.com,pcgamer.com,hackaday.com";

const PAGE_SIZE: u32 = 50;

/// Fetch fresh tech-focused candidate stories, newest first.
///
/// `client` is `None` when no news API key is configured; that and every
/// fetch failure (network, HTTP, or API error, after the client's own
/// retries) degrade to an empty list with a logged error. This stage never
/// fails the pipeline.
pub async fn fetch_candidates(client: Option<&NewsApiClient>) -> Vec<CandidateStory> {
    let Some(client) = client else {
        tracing::error!("NEWS_API_KEY is not set; skipping fetch");
        return Vec::new();
    };

    let params = EverythingParams {
        query: TECH_QUERY,
        language: "en",
        sort_by: "publishedAt",
        page_size: PAGE_SIZE,
        domains: TECH_DOMAINS,
    };

    let articles = match client.everything(&params).await {
        Ok(articles) => articles,
        Err(e) => {
            tracing::error!(error = %e, "news fetch failed");
            return Vec::new();
        }
    };

    let candidates = candidates_from_articles(articles);
    tracing::info!(count = candidates.len(), "fetched candidate stories");
    candidates
}

/// Convert raw articles into candidates, preserving order.
///
/// Drops articles missing a title or URL, falls back from description to
/// content, and applies the topic filter.
pub(crate) fn candidates_from_articles(articles: Vec<Article>) -> Vec<CandidateStory> {
    articles
        .into_iter()
        .filter_map(|article| {
            let title = article.title.map(|t| t.trim().to_owned())?;
            let source_url = article.url.map(|u| u.trim().to_owned())?;
            if title.is_empty() || source_url.is_empty() {
                return None;
            }

            let description = article
                .description
                .or(article.content)
                .map(|d| d.trim().to_owned())
                .unwrap_or_default();

            if !matches_topic(&title, &description) {
                return None;
            }

            let image_url = article
                .url_to_image
                .map(|i| i.trim().to_owned())
                .filter(|i| !i.is_empty());

            Some(CandidateStory {
                title,
                description,
                image_url,
                source_url,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: Option<&str>, url: Option<&str>, description: Option<&str>) -> Article {
        serde_json::from_value(serde_json::json!({
            "title": title,
            "description": description,
            "content": null,
            "url": url,
            "urlToImage": null,
            "publishedAt": "2025-11-02T10:00:00Z"
        }))
        .expect("article fixture should deserialize")
    }

    #[test]
    fn drops_articles_without_title_or_url() {
        let articles = vec![
            article(None, Some("https://wired.com/a"), Some("gpu news")),
            article(Some("GPU story"), None, Some("gpu news")),
            article(Some("  "), Some("https://wired.com/b"), Some("gpu news")),
            article(Some("GPU story"), Some("https://wired.com/c"), Some("gpu news")),
        ];

        let candidates = candidates_from_articles(articles);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].source_url, "https://wired.com/c");
    }

    #[test]
    fn falls_back_from_description_to_content() {
        let raw: Article = serde_json::from_value(serde_json::json!({
            "title": "Chip shortage update",
            "description": null,
            "content": "Fabs are catching up on semiconductor orders.",
            "url": "https://arstechnica.com/chips",
            "urlToImage": "",
            "publishedAt": null
        }))
        .expect("fixture");

        let candidates = candidates_from_articles(vec![raw]);
        assert_eq!(candidates.len(), 1);
        assert_eq!(
            candidates[0].description,
            "Fabs are catching up on semiconductor orders."
        );
        assert!(candidates[0].image_url.is_none(), "blank image URL becomes None");
    }

    #[test]
    fn off_topic_articles_are_filtered_out() {
        let articles = vec![
            article(
                Some("Celebrity cooking show renewed"),
                Some("https://cnet.com/off-topic"),
                Some("nothing technical here"),
            ),
            article(
                Some("Kubernetes release notes"),
                Some("https://zdnet.com/on-topic"),
                Some("cluster upgrades"),
            ),
        ];

        let candidates = candidates_from_articles(articles);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].source_url, "https://zdnet.com/on-topic");
    }

    #[test]
    fn preserves_api_order() {
        let articles = vec![
            article(Some("First GPU story"), Some("https://wired.com/1"), Some("")),
            article(Some("Second GPU story"), Some("https://wired.com/2"), Some("")),
        ];

        let candidates = candidates_from_articles(articles);
        let urls: Vec<&str> = candidates.iter().map(|c| c.source_url.as_str()).collect();
        assert_eq!(urls, vec!["https://wired.com/1", "https://wired.com/2"]);
    }
}
