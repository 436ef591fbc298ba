use serde::Deserialize;
use std::path::Path;

use crate::source::FeedSource;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Refresh interval in minutes
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
    /// Upper bound on items taken from each source per cycle
    #[serde(default = "default_items_per_source")]
    pub items_per_source: usize,
    #[serde(default = "default_listen")]
    pub listen: String,
    #[serde(default)]
    pub endpoints: EndpointConfig,
    pub sources: Vec<FeedSource>,
}

fn default_refresh_interval() -> u64 {
    15
}

fn default_items_per_page() -> usize {
    10
}

fn default_items_per_source() -> usize {
    5
}

fn default_listen() -> String {
    "0.0.0.0:3000".to_string()
}

/// Base URLs of the third-party services the fetcher talks to.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Where community listings are requested from
    #[serde(default = "default_community_api")]
    pub community_api: String,
    /// Base that community permalinks are resolved against
    #[serde(default = "default_community_site")]
    pub community_site: String,
    /// RSS/Atom to JSON translation service
    #[serde(default = "default_feed_translator")]
    pub feed_translator: String,
}

fn default_community_api() -> String {
    "https://www.reddit.com".to_string()
}

fn default_community_site() -> String {
    "https://reddit.com".to_string()
}

fn default_feed_translator() -> String {
    "https://api.rss2json.com/v1/api.json".to_string()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            community_api: default_community_api(),
            community_site: default_community_site(),
            feed_translator: default_feed_translator(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.items_per_page == 0 {
            anyhow::bail!("items_per_page must be greater than zero");
        }
        if self.items_per_source == 0 {
            anyhow::bail!("items_per_source must be greater than zero");
        }

        for (i, source) in self.sources.iter().enumerate() {
            source
                .validate()
                .map_err(|e| anyhow::anyhow!("source #{}: {}", i + 1, e))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        assert_eq!(default_refresh_interval(), 15);
        assert_eq!(default_items_per_page(), 10);
        assert_eq!(default_items_per_source(), 5);
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
            refresh_interval = 30
            items_per_page = 8

            [[sources]]
            name = "Test Feed"
            url = "https://example.com/feed.xml"

            [[sources]]
            community = "rust"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.refresh_interval, 30);
        assert_eq!(config.items_per_page, 8);
        assert_eq!(config.items_per_source, 5);
        assert_eq!(config.sources.len(), 2);
        assert_eq!(
            config.sources[0],
            FeedSource::named("Test Feed", "https://example.com/feed.xml")
        );
        assert_eq!(config.sources[1], FeedSource::community("rust"));
    }

    #[test]
    fn test_load_config_with_defaults() {
        let content = r#"
            [[sources]]
            name = "Test Feed"
            url = "https://example.com/feed.xml"
        "#;

        let config = Config::from_str(content).unwrap();

        assert_eq!(config.refresh_interval, 15);
        assert_eq!(config.items_per_page, 10);
        assert_eq!(config.listen, "0.0.0.0:3000");
        assert_eq!(config.endpoints, EndpointConfig::default());
    }

    #[test]
    fn test_partial_endpoint_override() {
        let content = r#"
            sources = []

            [endpoints]
            feed_translator = "http://localhost:9000/api.json"
        "#;

        let config = Config::from_str(content).unwrap();

        assert_eq!(
            config.endpoints.feed_translator,
            "http://localhost:9000/api.json"
        );
        assert_eq!(config.endpoints.community_api, "https://www.reddit.com");
        assert_eq!(config.endpoints.community_site, "https://reddit.com");
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = Config::load("/nonexistent/path/config.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let content = "this is not valid toml {{{";

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let result = Config::load(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_source_missing_required_fields() {
        let content = r#"
            [[sources]]
            name = "Test Feed"
            # Missing url field
        "#;

        let result = Config::from_str(content);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_sources_list() {
        let config = Config::from_str("sources = []").unwrap();
        assert!(config.sources.is_empty());
    }

    mod validation_tests {
        use super::*;

        #[test]
        fn test_zero_page_size_rejected() {
            let result = Config::from_str("items_per_page = 0\nsources = []");
            assert!(result.is_err());
        }

        #[test]
        fn test_zero_source_cap_rejected() {
            let result = Config::from_str("items_per_source = 0\nsources = []");
            assert!(result.is_err());
        }

        #[test]
        fn test_blank_name_rejected() {
            let content = r#"
                [[sources]]
                name = "   "
                url = "https://example.com/feed.xml"
            "#;
            assert!(Config::from_str(content).is_err());
        }

        #[test]
        fn test_blank_url_rejected() {
            let content = r#"
                [[sources]]
                name = "Feed"
                url = ""
            "#;
            assert!(Config::from_str(content).is_err());
        }

        #[test]
        fn test_community_with_slash_rejected() {
            let content = r#"
                [[sources]]
                community = "r/rust"
            "#;
            assert!(Config::from_str(content).is_err());
        }

        #[test]
        fn test_community_with_query_characters_rejected() {
            let content = r#"
                [[sources]]
                community = "rust?x"
            "#;
            assert!(Config::from_str(content).is_err());
        }

        #[test]
        fn test_empty_community_rejected() {
            let content = r#"
                [[sources]]
                community = ""
            "#;
            assert!(Config::from_str(content).is_err());
        }
    }
}
