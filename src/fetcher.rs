use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::EndpointConfig;
use crate::error::FetchError;
use crate::source::{FeedItem, FeedSource};

// Community listing: { data: { children: [ { data: { title, permalink } } ] } }
#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: Post,
}

#[derive(Debug, Deserialize)]
struct Post {
    title: String,
    permalink: String,
}

// Feed translation service: { status, message?, items: [ { title, link } ] }
#[derive(Debug, Deserialize)]
struct TranslatedFeed {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    items: Option<Vec<TranslatedEntry>>,
}

#[derive(Debug, Deserialize)]
struct TranslatedEntry {
    title: String,
    link: String,
}

pub struct Fetcher {
    client: Client,
    community_api: String,
    community_site: Url,
    feed_translator: String,
    per_source_cap: usize,
}

impl Fetcher {
    pub fn new(endpoints: &EndpointConfig, per_source_cap: usize) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Startpage/1.0 (Feed Aggregator)")
            .build()?;

        Ok(Self {
            client,
            community_api: endpoints.community_api.trim_end_matches('/').to_string(),
            community_site: Url::parse(&endpoints.community_site)?,
            feed_translator: endpoints.feed_translator.clone(),
            per_source_cap,
        })
    }

    /// Fetch the current items of one source.
    ///
    /// Any failure yields an empty list; one broken source must not keep the
    /// others from rendering.
    pub async fn fetch_one(&self, source: &FeedSource) -> Vec<FeedItem> {
        match self.try_fetch(source).await {
            Ok(items) => {
                debug!(source = %source.label(), count = items.len(), "fetched source");
                items
            }
            Err(e) => {
                warn!(source = %source.label(), error = %e, "failed to fetch source");
                Vec::new()
            }
        }
    }

    async fn try_fetch(&self, source: &FeedSource) -> Result<Vec<FeedItem>, FetchError> {
        match source {
            FeedSource::Community { community } => {
                let url = format!("{}/r/{}/hot.json", self.community_api, community);
                let body = self
                    .client
                    .get(&url)
                    .query(&[("limit", self.per_source_cap)])
                    .send()
                    .await?
                    .error_for_status()?
                    .bytes()
                    .await?;

                parse_community_listing(
                    &source.label(),
                    &self.community_site,
                    &body,
                    self.per_source_cap,
                )
            }
            FeedSource::Named { name, url } => {
                let body = self
                    .client
                    .get(&self.feed_translator)
                    .query(&[("rss_url", url.as_str())])
                    .send()
                    .await?
                    .error_for_status()?
                    .bytes()
                    .await?;

                parse_translated_feed(name, &body, self.per_source_cap)
            }
        }
    }
}

/// Map a community "hot" listing to items carrying `label`.
pub fn parse_community_listing(
    label: &str,
    site: &Url,
    body: &[u8],
    cap: usize,
) -> Result<Vec<FeedItem>, FetchError> {
    let listing: Listing = serde_json::from_slice(body)?;

    listing
        .data
        .children
        .into_iter()
        .take(cap)
        .map(|child| -> Result<FeedItem, FetchError> {
            let link = site.join(&child.data.permalink)?;
            Ok(FeedItem::new(child.data.title, link.to_string(), label))
        })
        .collect()
}

/// Map a feed translation response to items labelled with the source's name.
pub fn parse_translated_feed(
    name: &str,
    body: &[u8],
    cap: usize,
) -> Result<Vec<FeedItem>, FetchError> {
    let feed: TranslatedFeed = serde_json::from_slice(body)?;

    if let Some(status) = feed.status.as_deref() {
        if status != "ok" {
            return Err(FetchError::ServiceStatus(
                feed.message.unwrap_or_else(|| status.to_string()),
            ));
        }
    }

    let items = feed.items.ok_or(FetchError::MissingItems)?;

    Ok(items
        .into_iter()
        .take(cap)
        .map(|entry| FeedItem::new(entry.title, entry.link, name))
        .collect())
}
