use serde::Deserialize;

use crate::error::SourceError;

/// A configured place to pull headlines from.
///
/// Community boards are listed before named feeds so that an entry carrying
/// both a `name` and a `community` key is treated as a community board.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FeedSource {
    /// Trending posts of a discussion board, e.g. `r/rust`.
    Community { community: String },
    /// Any RSS/Atom feed, fetched through the feed translation service.
    Named { name: String, url: String },
}

impl FeedSource {
    pub fn community(community: impl Into<String>) -> Self {
        FeedSource::Community {
            community: community.into(),
        }
    }

    pub fn named(name: impl Into<String>, url: impl Into<String>) -> Self {
        FeedSource::Named {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Check that the source can be requested and yields a non-empty label.
    ///
    /// Community names are limited to ASCII letters, digits and `_` since
    /// they become a path segment of the listing URL.
    pub fn validate(&self) -> Result<(), SourceError> {
        match self {
            FeedSource::Community { community } => {
                let valid = !community.is_empty()
                    && community
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_');
                if !valid {
                    return Err(SourceError::InvalidCommunity(community.clone()));
                }
            }
            FeedSource::Named { name, url } => {
                if name.trim().is_empty() {
                    return Err(SourceError::EmptyName);
                }
                if url.trim().is_empty() {
                    return Err(SourceError::EmptyUrl(name.clone()));
                }
            }
        }
        Ok(())
    }

    /// The attribution shown next to every item this source produces.
    pub fn label(&self) -> String {
        match self {
            FeedSource::Community { community } => format!("r/{}", community),
            FeedSource::Named { name, .. } => name.clone(),
        }
    }
}

/// A normalized headline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub source_label: String,
}

impl FeedItem {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        source_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            source_label: source_label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Sources {
        sources: Vec<FeedSource>,
    }

    #[test]
    fn test_community_label_has_marker() {
        let source = FeedSource::community("Aew");
        assert_eq!(source.label(), "r/Aew");
    }

    #[test]
    fn test_named_label_is_display_name() {
        let source = FeedSource::named("NPR World News", "https://feeds.npr.org/1001/rss.xml");
        assert_eq!(source.label(), "NPR World News");
    }

    mod validate_tests {
        use super::*;

        #[test]
        fn test_valid_sources() {
            assert!(FeedSource::community("Linux_Gaming2").validate().is_ok());
            assert!(FeedSource::named("News", "https://news.example.com/rss")
                .validate()
                .is_ok());
        }

        #[test]
        fn test_blank_name_rejected() {
            let source = FeedSource::named("  ", "https://news.example.com/rss");
            assert_eq!(source.validate(), Err(SourceError::EmptyName));
        }

        #[test]
        fn test_blank_url_rejected() {
            let source = FeedSource::named("News", "");
            assert_eq!(
                source.validate(),
                Err(SourceError::EmptyUrl("News".to_string()))
            );
        }

        #[test]
        fn test_community_with_url_characters_rejected() {
            for name in ["", "r/rust", "rust?x", "rust#top", "rust x", "rüst"] {
                assert_eq!(
                    FeedSource::community(name).validate(),
                    Err(SourceError::InvalidCommunity(name.to_string())),
                    "{:?} should be rejected",
                    name
                );
            }
        }
    }

    #[test]
    fn test_deserialize_both_variants() {
        let parsed: Sources = toml::from_str(
            r#"
            [[sources]]
            name = "BBC"
            url = "http://feeds.bbci.co.uk/news/world/rss.xml"

            [[sources]]
            community = "rust"
            "#,
        )
        .unwrap();

        assert_eq!(
            parsed.sources,
            vec![
                FeedSource::named("BBC", "http://feeds.bbci.co.uk/news/world/rss.xml"),
                FeedSource::community("rust"),
            ]
        );
    }

    #[test]
    fn test_named_community_entry_is_community() {
        // The old start page listed boards as { name, subreddit }
        let parsed: Sources = toml::from_str(
            r#"
            [[sources]]
            name = "r/AEW Wrestling"
            community = "Aew"
            "#,
        )
        .unwrap();

        assert_eq!(parsed.sources[0], FeedSource::community("Aew"));
    }

    #[test]
    fn test_named_source_requires_url() {
        let parsed: Result<Sources, _> = toml::from_str(
            r#"
            [[sources]]
            name = "No URL"
            "#,
        );
        assert!(parsed.is_err());
    }
}
